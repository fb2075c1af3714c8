//! Mosaic definition and supply change.

use crate::config::MOSAIC_DURATION_PROPERTY_ID;
use crate::crypto::PublicKey;
use crate::layout::{Attribute, Table};
use crate::model::{MosaicId, UInt64};
use crate::transaction::builder::BodyLayout;
use crate::transaction::error::TransactionError;
use crate::transaction::types::TransactionType;

const FLAG_SUPPLY_MUTABLE: u8 = 0x01;
const FLAG_TRANSFERABLE: u8 = 0x02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MosaicProperties {
    pub supply_mutable: bool,
    pub transferable: bool,
    pub divisibility: u8,
    /// Blocks until expiry; `None` never expires.
    pub duration: Option<UInt64>,
}

impl MosaicProperties {
    pub fn new(supply_mutable: bool, transferable: bool, divisibility: u8) -> Self {
        Self {
            supply_mutable,
            transferable,
            divisibility,
            duration: None,
        }
    }

    pub fn with_duration(mut self, duration: UInt64) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.supply_mutable {
            flags |= FLAG_SUPPLY_MUTABLE;
        }
        if self.transferable {
            flags |= FLAG_TRANSFERABLE;
        }
        flags
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicDefinitionTransaction {
    pub nonce: u32,
    pub mosaic_id: MosaicId,
    pub properties: MosaicProperties,
}

impl MosaicDefinitionTransaction {
    /// Definition whose id is derived from `nonce` and the owner's key.
    pub fn new(nonce: u32, owner: &PublicKey, properties: MosaicProperties) -> Self {
        Self {
            nonce,
            mosaic_id: MosaicId::from_nonce(nonce, owner),
            properties,
        }
    }

    pub fn with_id(nonce: u32, mosaic_id: MosaicId, properties: MosaicProperties) -> Self {
        Self {
            nonce,
            mosaic_id,
            properties,
        }
    }
}

/// The two definition layouts: without and with the duration property.
pub(crate) fn definition_layout(has_duration: bool) -> Vec<Attribute> {
    let mut attributes = vec![
        Attribute::scalar("mosaicNonce", 4),
        Attribute::uint64("mosaicId"),
        Attribute::scalar("numOptionalProperties", 1),
        Attribute::scalar("flags", 1),
        Attribute::scalar("divisibility", 1),
    ];
    if has_duration {
        attributes.push(Attribute::scalar("propertyId", 1));
        attributes.push(Attribute::uint64("duration"));
    }
    attributes
}

impl BodyLayout for MosaicDefinitionTransaction {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::MosaicDefinition
    }

    fn body_size(&self) -> usize {
        let optional = if self.properties.duration.is_some() { 9 } else { 0 };
        4 + 8 + 1 + 1 + 1 + optional
    }

    fn attributes(&self) -> Vec<Attribute> {
        definition_layout(self.properties.duration.is_some())
    }

    fn encode(&self, table: &mut Table) -> Result<(), TransactionError> {
        let optional = u8::from(self.properties.duration.is_some());
        table
            .put_u32("mosaicNonce", self.nonce)
            .put_uint64("mosaicId", self.mosaic_id.id())
            .put_u8("numOptionalProperties", optional)
            .put_u8("flags", self.properties.flags())
            .put_u8("divisibility", self.properties.divisibility);
        if let Some(duration) = self.properties.duration {
            table
                .put_u8("propertyId", MOSAIC_DURATION_PROPERTY_ID)
                .put_uint64("duration", duration);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Supply change
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MosaicSupplyType {
    Decrease = 0,
    Increase = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicSupplyChangeTransaction {
    pub mosaic_id: MosaicId,
    pub direction: MosaicSupplyType,
    pub delta: UInt64,
}

impl MosaicSupplyChangeTransaction {
    pub fn new(mosaic_id: MosaicId, direction: MosaicSupplyType, delta: UInt64) -> Self {
        Self {
            mosaic_id,
            direction,
            delta,
        }
    }
}

pub(crate) fn supply_change_layout() -> Vec<Attribute> {
    vec![
        Attribute::uint64("mosaicId"),
        Attribute::scalar("direction", 1),
        Attribute::uint64("delta"),
    ]
}

impl BodyLayout for MosaicSupplyChangeTransaction {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::MosaicSupplyChange
    }

    fn body_size(&self) -> usize {
        8 + 1 + 8
    }

    fn attributes(&self) -> Vec<Attribute> {
        supply_change_layout()
    }

    fn encode(&self, table: &mut Table) -> Result<(), TransactionError> {
        table
            .put_uint64("mosaicId", self.mosaic_id.id())
            .put_u8("direction", self.direction as u8)
            .put_uint64("delta", self.delta);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NetworkType;
    use crate::transaction::builder::TransactionBuilder;

    fn owner() -> PublicKey {
        PublicKey::from_bytes([0x11; 32])
    }

    #[test]
    fn definition_without_duration() {
        let body = MosaicDefinitionTransaction::new(7, &owner(), MosaicProperties::new(true, false, 6));
        let tx = TransactionBuilder::new(NetworkType::MijinTest).build(body);
        let bytes = tx.build_transaction().unwrap().bytes().to_vec();
        assert_eq!(bytes.len(), 135);
        assert_eq!(&bytes[120..124], &7u32.to_le_bytes());
        assert_eq!(bytes[132], 0, "no optional properties");
        assert_eq!(bytes[133], 0x01);
        assert_eq!(bytes[134], 6);
    }

    #[test]
    fn definition_with_duration_adds_property() {
        let props = MosaicProperties::new(true, true, 0).with_duration(UInt64::from_u64(1000));
        let body = MosaicDefinitionTransaction::new(1, &owner(), props);
        let tx = TransactionBuilder::new(NetworkType::MijinTest).build(body);
        let bytes = tx.build_transaction().unwrap().bytes().to_vec();
        assert_eq!(bytes.len(), 144);
        assert_eq!(bytes[132], 1);
        assert_eq!(bytes[133], 0x03);
        assert_eq!(bytes[135], MOSAIC_DURATION_PROPERTY_ID);
        assert_eq!(&bytes[136..], &UInt64::from_u64(1000).to_le_bytes());
    }

    #[test]
    fn mosaic_id_follows_owner_and_nonce() {
        let body = MosaicDefinitionTransaction::new(3, &owner(), MosaicProperties::default());
        assert_eq!(body.mosaic_id, MosaicId::from_nonce(3, &owner()));
    }

    #[test]
    fn supply_change_is_137_bytes() {
        let body = MosaicSupplyChangeTransaction::new(
            MosaicId::new(UInt64::new(1, 2)),
            MosaicSupplyType::Increase,
            UInt64::from_u64(500),
        );
        let tx = TransactionBuilder::new(NetworkType::MijinTest).build(body);
        let bytes = tx.build_transaction().unwrap().bytes().to_vec();
        assert_eq!(bytes.len(), 137);
        assert_eq!(bytes[128], 1);
    }
}
