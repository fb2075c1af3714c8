//! # Transaction Kinds
//!
//! One module per family of transaction bodies. Each body is a plain struct
//! implementing [`BodyLayout`](super::builder::BodyLayout): its size is
//! computed analytically from its fields, and its attribute list is the same
//! one [`body_attributes`] hands to the decoder.
//!
//! ```text
//! transfer.rs   Transfer
//! namespace.rs  RegisterNamespace, AddressAlias, MosaicAlias
//! mosaic.rs     MosaicDefinition, MosaicSupplyChange
//! multisig.rs   ModifyMultisigAccount
//! aggregate.rs  AggregateComplete, AggregateBonded
//! lock.rs       HashLock, SecretLock, SecretProof
//! property.rs   AccountProperty{Address,Mosaic,EntityType}
//! link.rs       AccountLink
//! metadata.rs   Modify{Account,Mosaic,Namespace}Metadata
//! chain.rs      ChainConfig, ChainUpgrade
//! contract.rs   ModifyContract
//! ```

pub mod aggregate;
pub mod chain;
pub mod contract;
pub mod link;
pub mod lock;
pub mod metadata;
pub mod mosaic;
pub mod multisig;
pub mod namespace;
pub mod property;
pub mod transfer;

pub use aggregate::{AggregateTransaction, Cosignature};
pub use chain::{ChainConfigTransaction, ChainUpgradeTransaction};
pub use contract::ModifyContractTransaction;
pub use link::{AccountLinkTransaction, LinkAction};
pub use lock::{HashLockTransaction, SecretHashType, SecretLockTransaction, SecretProofTransaction};
pub use metadata::{
    MetadataModification, MetadataModificationType, MetadataTarget, MetadataType,
    ModifyMetadataTransaction,
};
pub use mosaic::{
    MosaicDefinitionTransaction, MosaicProperties, MosaicSupplyChangeTransaction, MosaicSupplyType,
};
pub use multisig::{
    CosignatoryModification, CosignatoryModificationType, ModifyMultisigAccountTransaction,
};
pub use namespace::{
    AddressAliasTransaction, AliasAction, MosaicAliasTransaction, NamespaceRegistration,
    RegisterNamespaceTransaction,
};
pub use property::{
    AccountPropertyTransaction, PropertyModification, PropertyModificationType,
    PropertyModifications, PropertyType,
};
pub use transfer::{Message, MessageType, Recipient, TransferTransaction};

use super::error::TransactionError;
use super::types::TransactionType;
use crate::config::ADDRESS_LENGTH;
use crate::layout::Attribute;

/// Offset of the optional-property count inside a mosaic definition body.
const MOSAIC_PROPERTY_COUNT_OFFSET: usize = 4 + 8;

pub(crate) fn check_len(field: &'static str, actual: usize, max: usize) -> Result<(), TransactionError> {
    if actual > max {
        return Err(TransactionError::FieldTooLong { field, max, actual });
    }
    Ok(())
}

/// `{id, amount}` as it appears in transfers.
pub(crate) fn mosaic_schema() -> Vec<Attribute> {
    vec![Attribute::uint64("id"), Attribute::uint64("amount")]
}

/// Body attributes for decoding a payload of `transaction_type`.
///
/// `body` is the undecoded body; it is only inspected where the kind has
/// more than one layout (mosaic definitions with or without a duration).
pub fn body_attributes(
    transaction_type: TransactionType,
    body: &[u8],
) -> Result<Vec<Attribute>, TransactionError> {
    use TransactionType as T;

    let attributes = match transaction_type {
        T::Transfer => transfer::layout(),
        T::RegisterNamespace => namespace::register_layout(),
        T::AddressAlias => namespace::address_alias_layout(),
        T::MosaicAlias => namespace::mosaic_alias_layout(),
        T::MosaicDefinition => {
            let count = body.get(MOSAIC_PROPERTY_COUNT_OFFSET).ok_or(
                TransactionError::PayloadTooShort {
                    minimum: MOSAIC_PROPERTY_COUNT_OFFSET + 1,
                    actual: body.len(),
                },
            )?;
            mosaic::definition_layout(*count != 0)
        }
        T::MosaicSupplyChange => mosaic::supply_change_layout(),
        T::ModifyMultisigAccount => multisig::layout(),
        T::AggregateComplete | T::AggregateBonded => aggregate::layout(),
        T::HashLock => lock::hash_lock_layout(),
        T::SecretLock => lock::secret_lock_layout(),
        T::SecretProof => lock::secret_proof_layout(),
        T::AccountPropertyAddress => property::layout(ADDRESS_LENGTH),
        T::AccountPropertyMosaic => property::layout(8),
        T::AccountPropertyEntityType => property::layout(2),
        T::AccountLink => link::layout(),
        T::ModifyAccountMetadata => metadata::layout(ADDRESS_LENGTH),
        T::ModifyMosaicMetadata | T::ModifyNamespaceMetadata => metadata::layout(8),
        T::ChainConfig => chain::config_layout(),
        T::ChainUpgrade => chain::upgrade_layout(),
        T::ModifyContract => contract::layout(),
    };
    Ok(attributes)
}
