//! Transaction type codes and per-kind entity versions.
//!
//! The two-byte type code sits at offset 102 of every full payload (offset
//! 38 of an embedded one) and selects the body layout.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// TransactionType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TransactionType {
    Transfer,
    RegisterNamespace,
    AddressAlias,
    MosaicAlias,
    MosaicDefinition,
    MosaicSupplyChange,
    ModifyMultisigAccount,
    AggregateComplete,
    AggregateBonded,
    HashLock,
    SecretLock,
    SecretProof,
    AccountPropertyAddress,
    AccountPropertyMosaic,
    AccountPropertyEntityType,
    AccountLink,
    ModifyAccountMetadata,
    ModifyMosaicMetadata,
    ModifyNamespaceMetadata,
    ChainConfig,
    ChainUpgrade,
    ModifyContract,
}

impl TransactionType {
    pub const ALL: [TransactionType; 22] = [
        Self::Transfer,
        Self::RegisterNamespace,
        Self::AddressAlias,
        Self::MosaicAlias,
        Self::MosaicDefinition,
        Self::MosaicSupplyChange,
        Self::ModifyMultisigAccount,
        Self::AggregateComplete,
        Self::AggregateBonded,
        Self::HashLock,
        Self::SecretLock,
        Self::SecretProof,
        Self::AccountPropertyAddress,
        Self::AccountPropertyMosaic,
        Self::AccountPropertyEntityType,
        Self::AccountLink,
        Self::ModifyAccountMetadata,
        Self::ModifyMosaicMetadata,
        Self::ModifyNamespaceMetadata,
        Self::ChainConfig,
        Self::ChainUpgrade,
        Self::ModifyContract,
    ];

    /// Wire code.
    pub const fn code(self) -> u16 {
        match self {
            Self::Transfer => 0x4154,
            Self::RegisterNamespace => 0x414E,
            Self::AddressAlias => 0x424E,
            Self::MosaicAlias => 0x434E,
            Self::MosaicDefinition => 0x414D,
            Self::MosaicSupplyChange => 0x424D,
            Self::ModifyMultisigAccount => 0x4155,
            Self::AggregateComplete => 0x4141,
            Self::AggregateBonded => 0x4241,
            Self::HashLock => 0x4148,
            Self::SecretLock => 0x4152,
            Self::SecretProof => 0x4252,
            Self::AccountPropertyAddress => 0x4150,
            Self::AccountPropertyMosaic => 0x4250,
            Self::AccountPropertyEntityType => 0x4350,
            Self::AccountLink => 0x414C,
            Self::ModifyAccountMetadata => 0x413D,
            Self::ModifyMosaicMetadata => 0x423D,
            Self::ModifyNamespaceMetadata => 0x433D,
            Self::ChainConfig => 0x4159,
            Self::ChainUpgrade => 0x4158,
            Self::ModifyContract => 0x4157,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Current entity version the builders emit for this kind.
    pub const fn version(self) -> u8 {
        match self {
            Self::Transfer | Self::MosaicDefinition | Self::ModifyMultisigAccount => 3,
            Self::ModifyContract => 3,
            Self::RegisterNamespace
            | Self::MosaicSupplyChange
            | Self::AggregateComplete
            | Self::AggregateBonded
            | Self::AccountLink => 2,
            _ => 1,
        }
    }

    pub const fn is_aggregate(self) -> bool {
        matches!(self, Self::AggregateComplete | Self::AggregateBonded)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}(0x{:04X})", self, self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_are_unique_and_roundtrip() {
        let codes: HashSet<u16> = TransactionType::ALL.iter().map(|t| t.code()).collect();
        assert_eq!(codes.len(), TransactionType::ALL.len());
        for t in TransactionType::ALL {
            assert_eq!(TransactionType::from_code(t.code()), Some(t));
        }
        assert_eq!(TransactionType::from_code(0x0000), None);
    }

    #[test]
    fn versions_match_ledger() {
        assert_eq!(TransactionType::Transfer.version(), 3);
        assert_eq!(TransactionType::RegisterNamespace.version(), 2);
        assert_eq!(TransactionType::AggregateBonded.version(), 2);
        assert_eq!(TransactionType::AccountLink.version(), 2);
        assert_eq!(TransactionType::HashLock.version(), 1);
        assert_eq!(TransactionType::ModifyContract.version(), 3);
    }

    #[test]
    fn display_includes_code() {
        assert_eq!(TransactionType::Transfer.to_string(), "Transfer(0x4154)");
        assert!(TransactionType::AggregateComplete.is_aggregate());
        assert!(!TransactionType::HashLock.is_aggregate());
    }
}
