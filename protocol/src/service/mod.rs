//! # Services
//!
//! Checks that need chain state the payload does not carry. The state comes
//! from a caller-supplied provider, so nothing in this module performs I/O
//! of its own.
//!
//! ```text
//!                 SignedTransaction
//!                        |
//!                        v
//!   AggregateTransactionService::is_complete
//!      |  decode_aggregate (initiator, inner txs, cosignatures)
//!      |
//!      |  one lookup per inner signer, all in flight at once
//!      +------------------------------+
//!      v                              v
//!   MultisigGraphProvider ...  MultisigGraphProvider
//!      |                              |
//!      +---------------+--------------+
//!                      v
//!          quorum walk per inner tx, AND of verdicts
//! ```

pub mod aggregate;

use async_trait::async_trait;
use thiserror::Error;

use crate::crypto::PublicKey;
use crate::model::{MultisigAccountGraph, PublicAccount};
use crate::transaction::{TransactionError, TransactionType};

pub use aggregate::AggregateTransactionService;

/// Failure reported by a [`MultisigGraphProvider`].
#[derive(Debug, Error)]
pub enum LookupError {
    /// The node has no record of the account at all.
    #[error("account {0} is unknown")]
    UnknownAccount(PublicKey),

    /// The lookup could not be answered (network failure, malformed reply).
    #[error("multisig lookup failed: {0}")]
    Unavailable(String),
}

/// Source of multisig graphs, usually a node's REST endpoint.
///
/// A plain account yields a graph without multisig records, not an error.
#[async_trait]
pub trait MultisigGraphProvider: Send + Sync {
    async fn multisig_account_graph(
        &self,
        account: &PublicAccount,
    ) -> Result<MultisigAccountGraph, LookupError>;
}

#[derive(Debug, Error)]
pub enum AggregateServiceError {
    #[error("multisig lookup for {account} failed: {source}")]
    Lookup {
        account: PublicKey,
        #[source]
        source: LookupError,
    },

    #[error("only aggregate transactions carry cosignatures, got {0}")]
    NotAggregate(TransactionType),

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}
