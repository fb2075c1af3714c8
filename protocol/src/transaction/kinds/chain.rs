//! Network configuration and protocol upgrade announcements.

use crate::layout::{Attribute, Length, Table};
use crate::model::UInt64;
use crate::transaction::builder::BodyLayout;
use crate::transaction::error::TransactionError;
use crate::transaction::types::TransactionType;

use super::check_len;

/// New network configuration, applied `apply_height_delta` blocks after
/// confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfigTransaction {
    pub apply_height_delta: UInt64,
    pub network_config: String,
    pub supported_entity_versions: String,
}

impl ChainConfigTransaction {
    pub fn new(apply_height_delta: UInt64, network_config: &str, supported_entity_versions: &str) -> Self {
        Self {
            apply_height_delta,
            network_config: network_config.to_string(),
            supported_entity_versions: supported_entity_versions.to_string(),
        }
    }
}

pub(crate) fn config_layout() -> Vec<Attribute> {
    vec![
        Attribute::uint64("applyHeightDelta"),
        Attribute::scalar("networkConfigSize", 2),
        Attribute::scalar("supportedEntityVersionsSize", 2),
        Attribute::string("networkConfig", Length::Count("networkConfigSize")),
        Attribute::string(
            "supportedEntityVersions",
            Length::Count("supportedEntityVersionsSize"),
        ),
    ]
}

impl BodyLayout for ChainConfigTransaction {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::ChainConfig
    }

    fn body_size(&self) -> usize {
        8 + 2 + 2 + self.network_config.len() + self.supported_entity_versions.len()
    }

    fn attributes(&self) -> Vec<Attribute> {
        config_layout()
    }

    fn validate(&self) -> Result<(), TransactionError> {
        check_len("networkConfig", self.network_config.len(), u16::MAX as usize)?;
        check_len(
            "supportedEntityVersions",
            self.supported_entity_versions.len(),
            u16::MAX as usize,
        )
    }

    fn encode(&self, table: &mut Table) -> Result<(), TransactionError> {
        table
            .put_uint64("applyHeightDelta", self.apply_height_delta)
            .put_u16("networkConfigSize", self.network_config.len() as u16)
            .put_u16(
                "supportedEntityVersionsSize",
                self.supported_entity_versions.len() as u16,
            )
            .put_bytes("networkConfig", self.network_config.as_bytes())
            .put_bytes(
                "supportedEntityVersions",
                self.supported_entity_versions.as_bytes(),
            );
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainUpgradeTransaction {
    pub upgrade_period: UInt64,
    pub new_blockchain_version: UInt64,
}

impl ChainUpgradeTransaction {
    pub fn new(upgrade_period: UInt64, new_blockchain_version: UInt64) -> Self {
        Self {
            upgrade_period,
            new_blockchain_version,
        }
    }
}

pub(crate) fn upgrade_layout() -> Vec<Attribute> {
    vec![
        Attribute::uint64("upgradePeriod"),
        Attribute::uint64("newBlockChainVersion"),
    ]
}

impl BodyLayout for ChainUpgradeTransaction {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::ChainUpgrade
    }

    fn body_size(&self) -> usize {
        16
    }

    fn attributes(&self) -> Vec<Attribute> {
        upgrade_layout()
    }

    fn encode(&self, table: &mut Table) -> Result<(), TransactionError> {
        table
            .put_uint64("upgradePeriod", self.upgrade_period)
            .put_uint64("newBlockChainVersion", self.new_blockchain_version);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NetworkType;
    use crate::transaction::builder::TransactionBuilder;

    #[test]
    fn config_size_includes_both_strings() {
        let body = ChainConfigTransaction::new(UInt64::from_u64(10), "[network]\nidentifier = mijin-test", "{}");
        let expected = 132 + body.network_config.len() + 2;
        let tx = TransactionBuilder::new(NetworkType::MijinTest).build(body);
        assert_eq!(tx.build_transaction().unwrap().bytes().len(), expected);
    }

    #[test]
    fn upgrade_is_136_bytes() {
        let tx = TransactionBuilder::new(NetworkType::MijinTest)
            .build(ChainUpgradeTransaction::new(UInt64::from_u64(100), UInt64::new(0, 1)));
        assert_eq!(tx.build_transaction().unwrap().bytes().len(), 136);
    }
}
