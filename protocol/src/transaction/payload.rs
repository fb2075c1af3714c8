//! Decoding of signed aggregate payloads.
//!
//! The multisig completeness check works from the announced bytes rather
//! than from a [`Transaction`](super::builder::Transaction), so it needs the
//! initiator, each embedded transaction's signer and body, and the attached
//! cosignatures back out of the payload.

use super::error::TransactionError;
use super::kinds::{aggregate, body_attributes, multisig, Cosignature};
use super::signing::data_end;
use super::types::TransactionType;
use crate::config::{EMBEDDED_HEADER_SIZE, EMBEDDED_TYPE_OFFSET, TYPE_OFFSET};
use crate::crypto::PublicKey;
use crate::layout::{Schema, Table};
use crate::model::NetworkType;

/// One transaction embedded in an aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedTransaction {
    pub signer: PublicKey,
    pub network_type: NetworkType,
    pub version: u8,
    pub transaction_type: TransactionType,
    /// Header and body fields, keyed by attribute name.
    pub table: Table,
}

impl EmbeddedTransaction {
    /// True for a multisig modification that removes at least one
    /// cosignatory. Such modifications are approved by the removal quorum.
    pub fn removes_cosignatory(&self) -> Result<bool, TransactionError> {
        if self.transaction_type != TransactionType::ModifyMultisigAccount {
            return Ok(false);
        }
        multisig::decoded_removes_cosignatory(&self.table)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatePayload {
    pub transaction_type: TransactionType,
    /// The initiator. All zero when the payload was never signed.
    pub signer: PublicKey,
    pub transactions: Vec<EmbeddedTransaction>,
    pub cosignatures: Vec<Cosignature>,
}

/// Splits an aggregate payload into its initiator, embedded transactions
/// and cosignatures.
pub fn decode_aggregate(payload: &[u8]) -> Result<AggregatePayload, TransactionError> {
    data_end(payload)?;
    let code = u16::from_le_bytes([payload[TYPE_OFFSET], payload[TYPE_OFFSET + 1]]);
    let transaction_type =
        TransactionType::from_code(code).ok_or(TransactionError::UnknownTransactionType(code))?;
    if !transaction_type.is_aggregate() {
        return Err(TransactionError::NotAggregate(transaction_type));
    }

    let table = Schema::transaction(aggregate::layout()).deserialize(payload)?;
    let transactions = split_embedded(table.bytes("transactions")?)?
        .into_iter()
        .map(decode_embedded)
        .collect::<Result<Vec<_>, _>>()?;
    let cosignatures = table
        .tables("cosignatures")?
        .iter()
        .map(Cosignature::from_table)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AggregatePayload {
        transaction_type,
        signer: PublicKey::from_bytes(table.byte_array("signer")?),
        transactions,
        cosignatures,
    })
}

/// Cuts the embedded region into one slice per transaction using each
/// transaction's own size field.
fn split_embedded(mut region: &[u8]) -> Result<Vec<&[u8]>, TransactionError> {
    let mut chunks = Vec::new();
    while !region.is_empty() {
        if region.len() < EMBEDDED_HEADER_SIZE {
            return Err(TransactionError::PayloadTooShort {
                minimum: EMBEDDED_HEADER_SIZE,
                actual: region.len(),
            });
        }
        let size = u32::from_le_bytes([region[0], region[1], region[2], region[3]]) as usize;
        if size < EMBEDDED_HEADER_SIZE || size > region.len() {
            return Err(TransactionError::SizeMismatch {
                declared: size,
                actual: region.len(),
            });
        }
        let (chunk, rest) = region.split_at(size);
        chunks.push(chunk);
        region = rest;
    }
    Ok(chunks)
}

fn decode_embedded(chunk: &[u8]) -> Result<EmbeddedTransaction, TransactionError> {
    let code = u16::from_le_bytes([chunk[EMBEDDED_TYPE_OFFSET], chunk[EMBEDDED_TYPE_OFFSET + 1]]);
    let transaction_type =
        TransactionType::from_code(code).ok_or(TransactionError::UnknownTransactionType(code))?;
    if transaction_type.is_aggregate() {
        return Err(TransactionError::NestedAggregate);
    }

    let attributes = body_attributes(transaction_type, &chunk[EMBEDDED_HEADER_SIZE..])?;
    let table = Schema::embedded(attributes).deserialize(chunk)?;
    let (network_type, version) = NetworkType::split_entity_version(table.u16("version")?)?;
    Ok(EmbeddedTransaction {
        signer: PublicKey::from_bytes(table.byte_array("signer")?),
        network_type,
        version,
        transaction_type,
        table,
    })
}
