//! Error types for building, signing and verifying transactions.
//!
//! Variants fall into three groups: construction defects (the caller built
//! something the wire format cannot express), length mismatches between a
//! payload and its header, and policy violations that a kind rejects before
//! any byte is written. None of them are retried.

use thiserror::Error;

use super::types::TransactionType;
use crate::crypto::{KeyError, PublicKey, SignatureError};
use crate::layout::LayoutError;
use crate::model::NetworkError;

#[derive(Debug, Error)]
pub enum TransactionError {
    // -- construction defects -----------------------------------------------

    /// An aggregate's inner transaction has no signer to embed.
    #[error("inner {0} transaction has no signer")]
    MissingSigner(TransactionType),

    /// Aggregates cannot be embedded in aggregates.
    #[error("aggregate transactions cannot be nested")]
    NestedAggregate,

    /// A vector or string does not fit its size field.
    #[error("{field} holds {actual} items, at most {max} fit")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    // -- length mismatches --------------------------------------------------

    /// Encoded length disagrees with the size the header declares.
    #[error("size mismatch: header declares {declared} bytes, payload has {actual}")]
    SizeMismatch { declared: usize, actual: usize },

    #[error("payload too short: need at least {minimum} bytes, got {actual}")]
    PayloadTooShort { minimum: usize, actual: usize },

    // -- policy violations --------------------------------------------------

    /// Hash locks only guard bonded aggregates.
    #[error("hash lock must reference an AggregateBonded transaction, got {0}")]
    HashLockRequiresBondedAggregate(TransactionType),

    #[error("secret for {hash_type} must be {expected} bytes, got {actual}")]
    SecretLengthMismatch {
        hash_type: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("property type 0x{property_type:02x} does not restrict {value_kind} values")]
    PropertyTypeMismatch {
        property_type: u8,
        value_kind: &'static str,
    },

    // -- decoding and verification ------------------------------------------

    #[error("unknown transaction type 0x{0:04x}")]
    UnknownTransactionType(u16),

    #[error("expected an aggregate transaction, got {0}")]
    NotAggregate(TransactionType),

    #[error("cosignature is for {actual}, not {expected}")]
    ParentHashMismatch { expected: String, actual: String },

    #[error("hash mismatch: payload hashes to {computed}, recorded {recorded}")]
    HashMismatch { computed: String, recorded: String },

    #[error("payload signer {payload} differs from recorded signer {recorded}")]
    SignerMismatch {
        payload: PublicKey,
        recorded: PublicKey,
    },

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("malformed hex: {0}")]
    Hex(#[from] hex::FromHexError),
}
