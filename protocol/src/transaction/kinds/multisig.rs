//! Multisig account modification.

use crate::config::PUBLIC_KEY_LENGTH;
use crate::crypto::PublicKey;
use crate::layout::{Attribute, Length, Schema, Table};
use crate::transaction::builder::BodyLayout;
use crate::transaction::error::TransactionError;
use crate::transaction::types::TransactionType;

use super::check_len;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CosignatoryModificationType {
    Add = 0,
    Remove = 1,
}

/// Adds or removes one cosignatory. Also used for contract participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CosignatoryModification {
    pub modification_type: CosignatoryModificationType,
    pub cosignatory: PublicKey,
}

impl CosignatoryModification {
    pub fn add(cosignatory: PublicKey) -> Self {
        Self {
            modification_type: CosignatoryModificationType::Add,
            cosignatory,
        }
    }

    pub fn remove(cosignatory: PublicKey) -> Self {
        Self {
            modification_type: CosignatoryModificationType::Remove,
            cosignatory,
        }
    }

    pub(crate) fn to_table(self) -> Table {
        let mut table = Table::new();
        table
            .put_u8("type", self.modification_type as u8)
            .put_bytes("cosignatoryPublicKey", *self.cosignatory.as_bytes());
        table
    }
}

pub(crate) fn modification_schema() -> Schema {
    Schema::new(vec![
        Attribute::scalar("type", 1),
        Attribute::bytes("cosignatoryPublicKey", PUBLIC_KEY_LENGTH),
    ])
}

pub(crate) const MODIFICATION_SIZE: usize = 1 + PUBLIC_KEY_LENGTH;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyMultisigAccountTransaction {
    pub min_approval_delta: i8,
    pub min_removal_delta: i8,
    /// Encoded in the order given.
    pub modifications: Vec<CosignatoryModification>,
}

impl ModifyMultisigAccountTransaction {
    pub fn new(
        min_approval_delta: i8,
        min_removal_delta: i8,
        modifications: Vec<CosignatoryModification>,
    ) -> Self {
        Self {
            min_approval_delta,
            min_removal_delta,
            modifications,
        }
    }

    pub fn removes_cosignatory(&self) -> bool {
        self.modifications
            .iter()
            .any(|m| m.modification_type == CosignatoryModificationType::Remove)
    }
}

pub(crate) fn layout() -> Vec<Attribute> {
    vec![
        Attribute::scalar("minRemovalDelta", 1),
        Attribute::scalar("minApprovalDelta", 1),
        Attribute::scalar("modificationsCount", 1),
        Attribute::table_array("modifications", modification_schema(), Length::Count("modificationsCount")),
    ]
}

/// Whether a decoded modification body removes any cosignatory.
pub(crate) fn decoded_removes_cosignatory(body: &Table) -> Result<bool, TransactionError> {
    for modification in body.tables("modifications")? {
        if modification.u8("type")? == CosignatoryModificationType::Remove as u8 {
            return Ok(true);
        }
    }
    Ok(false)
}

impl BodyLayout for ModifyMultisigAccountTransaction {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::ModifyMultisigAccount
    }

    fn body_size(&self) -> usize {
        3 + MODIFICATION_SIZE * self.modifications.len()
    }

    fn attributes(&self) -> Vec<Attribute> {
        layout()
    }

    fn validate(&self) -> Result<(), TransactionError> {
        check_len("modifications", self.modifications.len(), u8::MAX as usize)
    }

    fn encode(&self, table: &mut Table) -> Result<(), TransactionError> {
        table
            .put_u8("minRemovalDelta", self.min_removal_delta as u8)
            .put_u8("minApprovalDelta", self.min_approval_delta as u8)
            .put_u8("modificationsCount", self.modifications.len() as u8)
            .put_tables(
                "modifications",
                self.modifications.iter().map(|m| m.to_table()).collect(),
            );
        Ok(())
    }
}
