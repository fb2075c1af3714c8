//! Aggregate transactions: embedded inner transactions plus cosignatures.
//!
//! ```text
//! header(120) | payloadSize u32 | embedded txs (payloadSize bytes) | {signer 32, signature 64}*
//! ```
//!
//! Cosignatures trail the signed region; they are neither hashed nor signed
//! by the initiator.

use crate::config::{COSIGNATURE_LENGTH, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use crate::crypto::{PublicKey, Signature};
use crate::layout::{Attribute, Length, Schema, Table};
use crate::transaction::builder::{BodyLayout, Transaction};
use crate::transaction::error::TransactionError;
use crate::transaction::types::TransactionType;

/// A cosignature as it appears after the embedded transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cosignature {
    pub signer: PublicKey,
    pub signature: Signature,
}

impl Cosignature {
    pub fn to_bytes(&self) -> [u8; COSIGNATURE_LENGTH] {
        let mut out = [0u8; COSIGNATURE_LENGTH];
        out[..PUBLIC_KEY_LENGTH].copy_from_slice(self.signer.as_bytes());
        out[PUBLIC_KEY_LENGTH..].copy_from_slice(self.signature.as_bytes());
        out
    }

    pub(crate) fn from_table(table: &Table) -> Result<Self, TransactionError> {
        Ok(Self {
            signer: PublicKey::from_bytes(table.byte_array("signer")?),
            signature: Signature::from_bytes(table.byte_array("signature")?),
        })
    }
}

pub(crate) fn cosignature_schema() -> Schema {
    Schema::new(vec![
        Attribute::bytes("signer", PUBLIC_KEY_LENGTH),
        Attribute::bytes("signature", SIGNATURE_LENGTH),
    ])
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateTransaction {
    bonded: bool,
    pub inner_transactions: Vec<Transaction>,
    pub cosignatures: Vec<Cosignature>,
}

impl AggregateTransaction {
    /// An aggregate whose cosignatures are all attached before announcing.
    pub fn complete(inner_transactions: Vec<Transaction>) -> Self {
        Self {
            bonded: false,
            inner_transactions,
            cosignatures: Vec::new(),
        }
    }

    /// An aggregate announced behind a hash lock, cosigned afterwards.
    pub fn bonded(inner_transactions: Vec<Transaction>) -> Self {
        Self {
            bonded: true,
            inner_transactions,
            cosignatures: Vec::new(),
        }
    }

    pub fn cosignatures(mut self, cosignatures: Vec<Cosignature>) -> Self {
        self.cosignatures = cosignatures;
        self
    }

    pub fn is_bonded(&self) -> bool {
        self.bonded
    }

    fn payload_size(&self) -> usize {
        self.inner_transactions
            .iter()
            .map(Transaction::embedded_size)
            .sum()
    }
}

pub(crate) fn layout() -> Vec<Attribute> {
    vec![
        Attribute::scalar("payloadSize", 4),
        Attribute::string("transactions", Length::Bytes("payloadSize")),
        Attribute::table_array("cosignatures", cosignature_schema(), Length::Remaining),
    ]
}

impl BodyLayout for AggregateTransaction {
    fn transaction_type(&self) -> TransactionType {
        if self.bonded {
            TransactionType::AggregateBonded
        } else {
            TransactionType::AggregateComplete
        }
    }

    fn body_size(&self) -> usize {
        4 + self.payload_size() + COSIGNATURE_LENGTH * self.cosignatures.len()
    }

    fn attributes(&self) -> Vec<Attribute> {
        layout()
    }

    fn validate(&self) -> Result<(), TransactionError> {
        for inner in &self.inner_transactions {
            let inner_type = inner.transaction_type();
            if inner_type.is_aggregate() {
                return Err(TransactionError::NestedAggregate);
            }
            if inner.signer().is_none() {
                return Err(TransactionError::MissingSigner(inner_type));
            }
            inner.body().layout().validate()?;
        }
        Ok(())
    }

    fn encode(&self, table: &mut Table) -> Result<(), TransactionError> {
        let mut embedded = Vec::with_capacity(self.payload_size());
        for inner in &self.inner_transactions {
            embedded.extend_from_slice(&inner.to_embedded_bytes()?);
        }
        let payload_size =
            u32::try_from(embedded.len()).map_err(|_| TransactionError::FieldTooLong {
                field: "transactions",
                max: u32::MAX as usize,
                actual: embedded.len(),
            })?;
        let cosignatures = self
            .cosignatures
            .iter()
            .map(|c| {
                let mut t = Table::new();
                t.put_bytes("signer", *c.signer.as_bytes())
                    .put_bytes("signature", *c.signature.as_bytes());
                t
            })
            .collect();
        table
            .put_u32("payloadSize", payload_size)
            .put_bytes("transactions", embedded)
            .put_tables("cosignatures", cosignatures);
        Ok(())
    }
}
