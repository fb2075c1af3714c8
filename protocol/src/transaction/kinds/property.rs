//! Account properties: allow or block lists of addresses, mosaics or
//! transaction types.

use crate::config::ADDRESS_LENGTH;
use crate::layout::{Attribute, Length, Schema, Table};
use crate::model::{Address, UInt64};
use crate::transaction::builder::BodyLayout;
use crate::transaction::error::TransactionError;
use crate::transaction::types::TransactionType;

use super::check_len;

const BLOCK_FLAG: u8 = 0x80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    AllowAddress = 0x01,
    AllowMosaic = 0x02,
    AllowTransaction = 0x04,
    BlockAddress = 0x81,
    BlockMosaic = 0x82,
    BlockTransaction = 0x84,
}

impl PropertyType {
    /// The kind of value this property restricts, without the block flag.
    fn value_kind(self) -> u8 {
        self as u8 & !BLOCK_FLAG
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyModificationType {
    Add = 0,
    Remove = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyModification<T> {
    pub modification_type: PropertyModificationType,
    pub value: T,
}

impl<T> PropertyModification<T> {
    pub fn add(value: T) -> Self {
        Self {
            modification_type: PropertyModificationType::Add,
            value,
        }
    }

    pub fn remove(value: T) -> Self {
        Self {
            modification_type: PropertyModificationType::Remove,
            value,
        }
    }
}

/// Modifications of one value kind. The kind also fixes the transaction type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyModifications {
    Address(Vec<PropertyModification<Address>>),
    Mosaic(Vec<PropertyModification<UInt64>>),
    EntityType(Vec<PropertyModification<TransactionType>>),
}

impl PropertyModifications {
    fn len(&self) -> usize {
        match self {
            Self::Address(m) => m.len(),
            Self::Mosaic(m) => m.len(),
            Self::EntityType(m) => m.len(),
        }
    }

    fn value_size(&self) -> usize {
        match self {
            Self::Address(_) => ADDRESS_LENGTH,
            Self::Mosaic(_) => 8,
            Self::EntityType(_) => 2,
        }
    }

    fn value_kind(&self) -> (u8, &'static str) {
        match self {
            Self::Address(_) => (0x01, "address"),
            Self::Mosaic(_) => (0x02, "mosaic"),
            Self::EntityType(_) => (0x04, "transaction type"),
        }
    }

    fn tables(&self) -> Vec<Table> {
        fn row(modification_type: PropertyModificationType, value: Vec<u8>) -> Table {
            let mut t = Table::new();
            t.put_u8("modificationType", modification_type as u8)
                .put_bytes("value", value);
            t
        }
        match self {
            Self::Address(mods) => mods
                .iter()
                .map(|m| row(m.modification_type, m.value.as_bytes().to_vec()))
                .collect(),
            Self::Mosaic(mods) => mods
                .iter()
                .map(|m| row(m.modification_type, m.value.to_le_bytes().to_vec()))
                .collect(),
            Self::EntityType(mods) => mods
                .iter()
                .map(|m| row(m.modification_type, m.value.code().to_le_bytes().to_vec()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountPropertyTransaction {
    pub property_type: PropertyType,
    pub modifications: PropertyModifications,
}

impl AccountPropertyTransaction {
    pub fn address(property_type: PropertyType, modifications: Vec<PropertyModification<Address>>) -> Self {
        Self {
            property_type,
            modifications: PropertyModifications::Address(modifications),
        }
    }

    pub fn mosaic(property_type: PropertyType, modifications: Vec<PropertyModification<UInt64>>) -> Self {
        Self {
            property_type,
            modifications: PropertyModifications::Mosaic(modifications),
        }
    }

    pub fn entity_type(
        property_type: PropertyType,
        modifications: Vec<PropertyModification<TransactionType>>,
    ) -> Self {
        Self {
            property_type,
            modifications: PropertyModifications::EntityType(modifications),
        }
    }
}

/// Layout for a property transaction whose values are `value_size` bytes.
pub(crate) fn layout(value_size: usize) -> Vec<Attribute> {
    let modification = Schema::new(vec![
        Attribute::scalar("modificationType", 1),
        Attribute::bytes("value", value_size),
    ]);
    vec![
        Attribute::scalar("propertyType", 1),
        Attribute::scalar("modificationCount", 1),
        Attribute::table_array("modifications", modification, Length::Count("modificationCount")),
    ]
}

impl BodyLayout for AccountPropertyTransaction {
    fn transaction_type(&self) -> TransactionType {
        match self.modifications {
            PropertyModifications::Address(_) => TransactionType::AccountPropertyAddress,
            PropertyModifications::Mosaic(_) => TransactionType::AccountPropertyMosaic,
            PropertyModifications::EntityType(_) => TransactionType::AccountPropertyEntityType,
        }
    }

    fn body_size(&self) -> usize {
        2 + (1 + self.modifications.value_size()) * self.modifications.len()
    }

    fn attributes(&self) -> Vec<Attribute> {
        layout(self.modifications.value_size())
    }

    fn validate(&self) -> Result<(), TransactionError> {
        let (kind, name) = self.modifications.value_kind();
        if self.property_type.value_kind() != kind {
            return Err(TransactionError::PropertyTypeMismatch {
                property_type: self.property_type as u8,
                value_kind: name,
            });
        }
        check_len("modifications", self.modifications.len(), u8::MAX as usize)
    }

    fn encode(&self, table: &mut Table) -> Result<(), TransactionError> {
        table
            .put_u8("propertyType", self.property_type as u8)
            .put_u8("modificationCount", self.modifications.len() as u8)
            .put_tables("modifications", self.modifications.tables());
        Ok(())
    }
}
