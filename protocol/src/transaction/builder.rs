//! Transaction construction via the builder pattern.
//!
//! [`TransactionBuilder`] collects the header fields shared by every kind
//! (network, deadline, fee, signer) and its terminal `build` takes the kind
//! specific body as a required argument, so a transaction without a body
//! cannot be expressed. Nothing is encoded until
//! [`Transaction::build_transaction`], which validates the body, lays out
//! header and body with the kind's [`Schema`] and checks the result against
//! the analytic size.
//!
//! The builder does not sign. Signing happens on the
//! [`VerifiableTransaction`] that `build_transaction` returns, which keeps
//! construction testable without key material.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::TransactionError;
use super::kinds::{
    AccountLinkTransaction, AccountPropertyTransaction, AddressAliasTransaction,
    AggregateTransaction, ChainConfigTransaction, ChainUpgradeTransaction, HashLockTransaction,
    ModifyContractTransaction, ModifyMetadataTransaction, ModifyMultisigAccountTransaction,
    MosaicAliasTransaction, MosaicDefinitionTransaction, MosaicSupplyChangeTransaction,
    RegisterNamespaceTransaction, SecretLockTransaction, SecretProofTransaction,
    TransferTransaction,
};
use super::types::TransactionType;
use super::verifiable::VerifiableTransaction;
use crate::config::{DEFAULT_DEADLINE, EMBEDDED_HEADER_SIZE, TRANSACTION_HEADER_SIZE};
use crate::crypto::{PublicKey, Signature};
use crate::layout::{Attribute, Schema, Table};
use crate::model::{Deadline, NetworkType, UInt64};

// ---------------------------------------------------------------------------
// BodyLayout
// ---------------------------------------------------------------------------

/// Everything a transaction kind contributes after the common header.
pub trait BodyLayout {
    fn transaction_type(&self) -> TransactionType;

    /// Exact encoded body length in bytes.
    fn body_size(&self) -> usize;

    /// Body attributes, in wire order.
    fn attributes(&self) -> Vec<Attribute>;

    /// Writes the body fields into `table`.
    fn encode(&self, table: &mut Table) -> Result<(), TransactionError>;

    /// Policy and range checks, run before anything is encoded.
    fn validate(&self) -> Result<(), TransactionError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TransactionBody
// ---------------------------------------------------------------------------

/// Kind-specific part of a [`Transaction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionBody {
    Transfer(TransferTransaction),
    RegisterNamespace(RegisterNamespaceTransaction),
    AddressAlias(AddressAliasTransaction),
    MosaicAlias(MosaicAliasTransaction),
    MosaicDefinition(MosaicDefinitionTransaction),
    MosaicSupplyChange(MosaicSupplyChangeTransaction),
    ModifyMultisigAccount(ModifyMultisigAccountTransaction),
    Aggregate(AggregateTransaction),
    HashLock(HashLockTransaction),
    SecretLock(SecretLockTransaction),
    SecretProof(SecretProofTransaction),
    AccountProperty(AccountPropertyTransaction),
    AccountLink(AccountLinkTransaction),
    ModifyMetadata(ModifyMetadataTransaction),
    ChainConfig(ChainConfigTransaction),
    ChainUpgrade(ChainUpgradeTransaction),
    ModifyContract(ModifyContractTransaction),
}

impl TransactionBody {
    pub fn layout(&self) -> &dyn BodyLayout {
        match self {
            Self::Transfer(b) => b,
            Self::RegisterNamespace(b) => b,
            Self::AddressAlias(b) => b,
            Self::MosaicAlias(b) => b,
            Self::MosaicDefinition(b) => b,
            Self::MosaicSupplyChange(b) => b,
            Self::ModifyMultisigAccount(b) => b,
            Self::Aggregate(b) => b,
            Self::HashLock(b) => b,
            Self::SecretLock(b) => b,
            Self::SecretProof(b) => b,
            Self::AccountProperty(b) => b,
            Self::AccountLink(b) => b,
            Self::ModifyMetadata(b) => b,
            Self::ChainConfig(b) => b,
            Self::ChainUpgrade(b) => b,
            Self::ModifyContract(b) => b,
        }
    }
}

macro_rules! impl_body_from {
    ($($variant:ident($kind:ty)),* $(,)?) => {
        $(
            impl From<$kind> for TransactionBody {
                fn from(body: $kind) -> Self {
                    Self::$variant(body)
                }
            }
        )*
    };
}

impl_body_from!(
    Transfer(TransferTransaction),
    RegisterNamespace(RegisterNamespaceTransaction),
    AddressAlias(AddressAliasTransaction),
    MosaicAlias(MosaicAliasTransaction),
    MosaicDefinition(MosaicDefinitionTransaction),
    MosaicSupplyChange(MosaicSupplyChangeTransaction),
    ModifyMultisigAccount(ModifyMultisigAccountTransaction),
    Aggregate(AggregateTransaction),
    HashLock(HashLockTransaction),
    SecretLock(SecretLockTransaction),
    SecretProof(SecretProofTransaction),
    AccountProperty(AccountPropertyTransaction),
    AccountLink(AccountLinkTransaction),
    ModifyMetadata(ModifyMetadataTransaction),
    ChainConfig(ChainConfigTransaction),
    ChainUpgrade(ChainUpgradeTransaction),
    ModifyContract(ModifyContractTransaction),
);

// ---------------------------------------------------------------------------
// TransactionInfo
// ---------------------------------------------------------------------------

/// Where an announced transaction ended up. Carried alongside transactions
/// read back from a node; never encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInfo {
    pub height: UInt64,
    pub index: Option<u32>,
    pub id: Option<String>,
    pub hash: Option<String>,
    pub merkle_component_hash: Option<String>,
    pub aggregate_hash: Option<String>,
    pub aggregate_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// An unsigned (or decoded) transaction of any kind.
///
/// Immutable once built; [`Transaction::build_transaction`] derives the wire
/// bytes without touching `self`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    network_type: NetworkType,
    version: u8,
    deadline: Deadline,
    max_fee: UInt64,
    signature: Option<Signature>,
    signer: Option<PublicKey>,
    info: Option<TransactionInfo>,
    body: TransactionBody,
}

impl Transaction {
    pub fn transaction_type(&self) -> TransactionType {
        self.body.layout().transaction_type()
    }

    pub fn network_type(&self) -> NetworkType {
        self.network_type
    }

    /// Kind version, without the network byte.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// The wire `version` field: network byte high, kind version low.
    pub fn entity_version(&self) -> u16 {
        self.network_type.entity_version(self.version)
    }

    pub fn deadline(&self) -> Deadline {
        self.deadline
    }

    pub fn max_fee(&self) -> UInt64 {
        self.max_fee
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    pub fn signer(&self) -> Option<&PublicKey> {
        self.signer.as_ref()
    }

    pub fn info(&self) -> Option<&TransactionInfo> {
        self.info.as_ref()
    }

    pub fn body(&self) -> &TransactionBody {
        &self.body
    }

    /// Full payload size: 120-byte header plus body.
    pub fn size(&self) -> usize {
        TRANSACTION_HEADER_SIZE + self.body.layout().body_size()
    }

    /// Size of the embedded form used inside aggregates.
    pub fn embedded_size(&self) -> usize {
        EMBEDDED_HEADER_SIZE + self.body.layout().body_size()
    }

    /// Encodes the transaction into its canonical wire form.
    ///
    /// Signature and signer regions are zero-filled. Fails if the body does
    /// not validate or if the encoded length differs from [`size`](Self::size).
    pub fn build_transaction(&self) -> Result<VerifiableTransaction, TransactionError> {
        let layout = self.body.layout();
        layout.validate()?;

        let size = self.size();
        let declared = u32::try_from(size).map_err(|_| TransactionError::FieldTooLong {
            field: "size",
            max: u32::MAX as usize,
            actual: size,
        })?;

        let mut table = Table::new();
        table
            .put_u32("size", declared)
            .put_bytes("signature", vec![0u8; 64])
            .put_bytes("signer", vec![0u8; 32])
            .put_u16("version", self.entity_version())
            .put_u16("type", layout.transaction_type().code())
            .put_uint64("maxFee", self.max_fee)
            .put_uint64("deadline", self.deadline.value());
        layout.encode(&mut table)?;

        let schema = Schema::transaction(layout.attributes());
        let bytes = schema.serialize(&table)?;
        if bytes.len() != size {
            return Err(TransactionError::SizeMismatch {
                declared: size,
                actual: bytes.len(),
            });
        }

        debug!(
            tx_type = %layout.transaction_type(),
            network = %self.network_type,
            size,
            "transaction built"
        );
        Ok(VerifiableTransaction::new(bytes, schema, layout.transaction_type()))
    }

    /// Embedded bytes for inclusion in an aggregate, signed by this
    /// transaction's signer.
    pub fn to_embedded_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        let transaction_type = self.transaction_type();
        if transaction_type.is_aggregate() {
            return Err(TransactionError::NestedAggregate);
        }
        let signer = self
            .signer
            .as_ref()
            .ok_or(TransactionError::MissingSigner(transaction_type))?;
        self.build_transaction()?.to_aggregate_transaction(Some(signer))
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Transaction`] values.
///
/// # Usage
///
/// ```rust,no_run
/// use sirius_protocol::model::{Address, NetworkType, UInt64};
/// use sirius_protocol::transaction::{TransactionBuilder, TransferTransaction, Recipient};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recipient = Address::from_hex("90B4D61E3E8F1ED17C4A1FC0B5F6F0AE6E1E0EE8F81D4A2CD2")?;
/// let tx = TransactionBuilder::new(NetworkType::MijinTest)
///     .max_fee(UInt64::from_u64(0))
///     .build(TransferTransaction::new(Recipient::Address(recipient)));
/// let verifiable = tx.build_transaction()?;
/// assert_eq!(verifiable.bytes().len(), 149);
/// # Ok(())
/// # }
/// ```
///
/// Defaults: deadline two hours from `build`, zero max fee, the kind's
/// current version, no signer.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    network_type: NetworkType,
    deadline: Option<Deadline>,
    max_fee: UInt64,
    version: Option<u8>,
    signer: Option<PublicKey>,
    signature: Option<Signature>,
    info: Option<TransactionInfo>,
}

impl TransactionBuilder {
    pub fn new(network_type: NetworkType) -> Self {
        Self {
            network_type,
            deadline: None,
            max_fee: UInt64::ZERO,
            version: None,
            signer: None,
            signature: None,
            info: None,
        }
    }

    pub fn deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn max_fee(mut self, max_fee: UInt64) -> Self {
        self.max_fee = max_fee;
        self
    }

    /// Overrides the kind version. Only needed to target older nodes.
    pub fn version(mut self, version: u8) -> Self {
        self.version = Some(version);
        self
    }

    /// Signer to embed when this transaction goes inside an aggregate.
    pub fn signer(mut self, signer: PublicKey) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Signature of a transaction read back from a node.
    pub fn signature(mut self, signature: Signature) -> Self {
        self.signature = Some(signature);
        self
    }

    pub fn info(mut self, info: TransactionInfo) -> Self {
        self.info = Some(info);
        self
    }

    pub fn build(self, body: impl Into<TransactionBody>) -> Transaction {
        let body = body.into();
        let version = self
            .version
            .unwrap_or_else(|| body.layout().transaction_type().version());
        Transaction {
            network_type: self.network_type,
            version,
            deadline: self
                .deadline
                .unwrap_or_else(|| Deadline::create(DEFAULT_DEADLINE)),
            max_fee: self.max_fee,
            signature: self.signature,
            signer: self.signer,
            info: self.info,
            body,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
