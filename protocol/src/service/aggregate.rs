//! Completeness of an aggregate's cosignatures.
//!
//! An aggregate is complete when every inner transaction is authorized by
//! the keys that signed it: the initiator plus all attached cosigners. For
//! a plain account that means its own key signed. For a multisig account
//! the quorum has to be met, and a nested multisig cosignatory counts as
//! signed once its own quorum is met.

use std::collections::HashSet;

use futures::future::try_join_all;
use tracing::{debug, info, warn};

use super::{AggregateServiceError, MultisigGraphProvider};
use crate::crypto::PublicKey;
use crate::model::{MultisigAccountGraph, PublicAccount};
use crate::transaction::{decode_aggregate, EmbeddedTransaction, SignedTransaction};

/// Decides whether a signed aggregate carries every signature its inner
/// transactions need.
///
/// ```rust,no_run
/// # use sirius_protocol::service::{AggregateTransactionService, MultisigGraphProvider};
/// # use sirius_protocol::transaction::SignedTransaction;
/// # async fn check<P: MultisigGraphProvider>(provider: P, signed: SignedTransaction)
/// #     -> Result<(), Box<dyn std::error::Error>> {
/// let service = AggregateTransactionService::new(provider);
/// if service.is_complete(&signed).await? {
///     // announce as AggregateComplete
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AggregateTransactionService<P> {
    provider: P,
}

impl<P: MultisigGraphProvider> AggregateTransactionService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// True iff every inner transaction of `signed` is authorized.
    ///
    /// All multisig lookups run concurrently; the first failed lookup fails
    /// the whole evaluation and drops the rest.
    pub async fn is_complete(&self, signed: &SignedTransaction) -> Result<bool, AggregateServiceError> {
        if !signed.transaction_type.is_aggregate() {
            return Err(AggregateServiceError::NotAggregate(signed.transaction_type));
        }
        let aggregate = decode_aggregate(&signed.payload_bytes()?)?;

        let mut signers: HashSet<PublicKey> = aggregate
            .cosignatures
            .iter()
            .map(|cosignature| cosignature.signer)
            .collect();
        if !aggregate.signer.is_zero() {
            signers.insert(aggregate.signer);
        }

        let graphs = try_join_all(
            aggregate
                .transactions
                .iter()
                .map(|inner| self.lookup(inner)),
        )
        .await?;

        let mut complete = true;
        for (inner, graph) in aggregate.transactions.iter().zip(&graphs) {
            let removal = inner.removes_cosignatory()?;
            if !is_authorized(graph, &inner.signer, removal, &signers) {
                debug!(
                    signer = %inner.signer,
                    tx_type = %inner.transaction_type,
                    "inner transaction lacks signatures"
                );
                complete = false;
            }
        }

        info!(
            hash = %signed.hash,
            inner = aggregate.transactions.len(),
            signers = signers.len(),
            complete,
            "aggregate completeness evaluated"
        );
        Ok(complete)
    }

    async fn lookup(&self, inner: &EmbeddedTransaction) -> Result<MultisigAccountGraph, AggregateServiceError> {
        let account = PublicAccount::new(inner.signer, inner.network_type);
        self.provider
            .multisig_account_graph(&account)
            .await
            .map_err(|source| {
                warn!(account = %inner.signer, error = %source, "multisig lookup failed");
                AggregateServiceError::Lookup {
                    account: inner.signer,
                    source,
                }
            })
    }
}

/// Walks `graph` from its deepest cosignatories up to the signer.
///
/// `signers` is copied, so one inner transaction's synthesized keys never
/// leak into another's evaluation.
fn is_authorized(
    graph: &MultisigAccountGraph,
    signer: &PublicKey,
    removal: bool,
    signers: &HashSet<PublicKey>,
) -> bool {
    if !graph.has_multisig_records() {
        return signers.contains(signer);
    }

    let mut satisfied = signers.clone();
    for (depth, records) in graph.downward_levels() {
        for record in records {
            let key = record.account.public_key;
            if satisfied.contains(&key) {
                continue;
            }
            let required = if removal {
                record.min_removal
            } else {
                record.min_approval
            };
            let quorum = required.max(1) as usize;
            let matched = record
                .cosignatories
                .iter()
                .filter(|cosignatory| satisfied.contains(&cosignatory.public_key))
                .count();
            if matched >= quorum {
                debug!(depth, account = %key, matched, quorum, "multisig quorum met");
                satisfied.insert(key);
            }
        }
    }
    satisfied.contains(signer)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
