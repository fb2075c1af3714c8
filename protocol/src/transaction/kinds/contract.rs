//! Contract participant modification.

use crate::config::HASH_LENGTH;
use crate::layout::{Attribute, Length, Table};
use crate::model::UInt64;
use crate::transaction::builder::BodyLayout;
use crate::transaction::error::TransactionError;
use crate::transaction::types::TransactionType;

use super::check_len;
use super::multisig::{modification_schema, CosignatoryModification, MODIFICATION_SIZE};

/// Changes a contract's duration and its customer, executor and verifier
/// sets. Each set is encoded in the order given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyContractTransaction {
    pub duration_delta: i64,
    pub hash: [u8; HASH_LENGTH],
    pub customers: Vec<CosignatoryModification>,
    pub executors: Vec<CosignatoryModification>,
    pub verifiers: Vec<CosignatoryModification>,
}

impl ModifyContractTransaction {
    pub fn new(duration_delta: i64, hash: [u8; HASH_LENGTH]) -> Self {
        Self {
            duration_delta,
            hash,
            customers: Vec::new(),
            executors: Vec::new(),
            verifiers: Vec::new(),
        }
    }

    pub fn customers(mut self, customers: Vec<CosignatoryModification>) -> Self {
        self.customers = customers;
        self
    }

    pub fn executors(mut self, executors: Vec<CosignatoryModification>) -> Self {
        self.executors = executors;
        self
    }

    pub fn verifiers(mut self, verifiers: Vec<CosignatoryModification>) -> Self {
        self.verifiers = verifiers;
        self
    }

    fn participant_count(&self) -> usize {
        self.customers.len() + self.executors.len() + self.verifiers.len()
    }
}

pub(crate) fn layout() -> Vec<Attribute> {
    vec![
        Attribute::uint64("durationDelta"),
        Attribute::bytes("hash", HASH_LENGTH),
        Attribute::scalar("numCustomers", 1),
        Attribute::scalar("numExecutors", 1),
        Attribute::scalar("numVerifiers", 1),
        Attribute::table_array("customers", modification_schema(), Length::Count("numCustomers")),
        Attribute::table_array("executors", modification_schema(), Length::Count("numExecutors")),
        Attribute::table_array("verifiers", modification_schema(), Length::Count("numVerifiers")),
    ]
}

fn rows(modifications: &[CosignatoryModification]) -> Vec<Table> {
    modifications.iter().map(|m| m.to_table()).collect()
}

impl BodyLayout for ModifyContractTransaction {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::ModifyContract
    }

    fn body_size(&self) -> usize {
        8 + HASH_LENGTH + 3 + MODIFICATION_SIZE * self.participant_count()
    }

    fn attributes(&self) -> Vec<Attribute> {
        layout()
    }

    fn validate(&self) -> Result<(), TransactionError> {
        check_len("customers", self.customers.len(), u8::MAX as usize)?;
        check_len("executors", self.executors.len(), u8::MAX as usize)?;
        check_len("verifiers", self.verifiers.len(), u8::MAX as usize)
    }

    fn encode(&self, table: &mut Table) -> Result<(), TransactionError> {
        // Negative deltas travel as two's complement.
        table
            .put_uint64("durationDelta", UInt64::from_u64(self.duration_delta as u64))
            .put_bytes("hash", self.hash)
            .put_u8("numCustomers", self.customers.len() as u8)
            .put_u8("numExecutors", self.executors.len() as u8)
            .put_u8("numVerifiers", self.verifiers.len() as u8)
            .put_tables("customers", rows(&self.customers))
            .put_tables("executors", rows(&self.executors))
            .put_tables("verifiers", rows(&self.verifiers));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::PublicKey;
    use crate::model::NetworkType;
    use crate::transaction::builder::TransactionBuilder;

    #[test]
    fn contract_size_counts_all_participants() {
        let key = |b: u8| PublicKey::from_bytes([b; 32]);
        let body = ModifyContractTransaction::new(-5, [0xCC; 32])
            .customers(vec![CosignatoryModification::add(key(1))])
            .executors(vec![CosignatoryModification::add(key(2)), CosignatoryModification::remove(key(3))])
            .verifiers(vec![CosignatoryModification::add(key(4))]);
        let tx = TransactionBuilder::new(NetworkType::MijinTest).build(body);
        let bytes = tx.build_transaction().unwrap().bytes().to_vec();
        assert_eq!(bytes.len(), 163 + 4 * 33);
        assert_eq!(&bytes[120..128], &(-5i64).to_le_bytes());
        assert_eq!(&bytes[160..163], &[1, 2, 1]);
        assert_eq!(&bytes[164..196], &[1u8; 32]);
    }
}
