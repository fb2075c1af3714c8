//! Key/value metadata attached to an account, mosaic or namespace.

use crate::config::ADDRESS_LENGTH;
use crate::layout::{Attribute, Length, Schema, Table};
use crate::model::{Address, MosaicId, NamespaceId};
use crate::transaction::builder::BodyLayout;
use crate::transaction::error::TransactionError;
use crate::transaction::types::TransactionType;

use super::check_len;

/// Fixed part of each modification: size, type, key size, value size.
const MODIFICATION_HEADER_SIZE: usize = 4 + 1 + 1 + 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataType {
    Address = 1,
    Mosaic = 2,
    Namespace = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataModificationType {
    Add = 0,
    Remove = 1,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataModification {
    pub modification_type: MetadataModificationType,
    pub key: String,
    pub value: String,
}

impl MetadataModification {
    pub fn add(key: &str, value: &str) -> Self {
        Self {
            modification_type: MetadataModificationType::Add,
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    /// Removal carries the key only.
    pub fn remove(key: &str) -> Self {
        Self {
            modification_type: MetadataModificationType::Remove,
            key: key.to_string(),
            value: String::new(),
        }
    }

    fn encoded_len(&self) -> usize {
        MODIFICATION_HEADER_SIZE + self.key.len() + self.value.len()
    }

    fn to_table(&self) -> Table {
        let mut t = Table::new();
        t.put_u32("size", self.encoded_len() as u32)
            .put_u8("modificationType", self.modification_type as u8)
            .put_u8("keySize", self.key.len() as u8)
            .put_u16("valueSize", self.value.len() as u16)
            .put_bytes("key", self.key.as_bytes())
            .put_bytes("value", self.value.as_bytes());
        t
    }
}

/// What the metadata is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataTarget {
    Address(Address),
    Mosaic(MosaicId),
    Namespace(NamespaceId),
}

impl MetadataTarget {
    pub fn metadata_type(&self) -> MetadataType {
        match self {
            Self::Address(_) => MetadataType::Address,
            Self::Mosaic(_) => MetadataType::Mosaic,
            Self::Namespace(_) => MetadataType::Namespace,
        }
    }

    fn id_bytes(&self) -> Vec<u8> {
        match self {
            Self::Address(address) => address.as_bytes().to_vec(),
            Self::Mosaic(id) => id.id().to_le_bytes().to_vec(),
            Self::Namespace(id) => id.id().to_le_bytes().to_vec(),
        }
    }

    fn id_size(&self) -> usize {
        match self {
            Self::Address(_) => ADDRESS_LENGTH,
            Self::Mosaic(_) | Self::Namespace(_) => 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyMetadataTransaction {
    pub target: MetadataTarget,
    /// Encoded in the order given.
    pub modifications: Vec<MetadataModification>,
}

impl ModifyMetadataTransaction {
    pub fn new(target: MetadataTarget, modifications: Vec<MetadataModification>) -> Self {
        Self {
            target,
            modifications,
        }
    }
}

/// Modifications run to the end of the body; there is no count field.
pub(crate) fn layout(id_size: usize) -> Vec<Attribute> {
    let modification = Schema::new(vec![
        Attribute::scalar("size", 4),
        Attribute::scalar("modificationType", 1),
        Attribute::scalar("keySize", 1),
        Attribute::scalar("valueSize", 2),
        Attribute::string("key", Length::Count("keySize")),
        Attribute::string("value", Length::Count("valueSize")),
    ]);
    vec![
        Attribute::scalar("metadataType", 1),
        Attribute::bytes("metadataId", id_size),
        Attribute::table_array("modifications", modification, Length::Remaining),
    ]
}

impl BodyLayout for ModifyMetadataTransaction {
    fn transaction_type(&self) -> TransactionType {
        match self.target {
            MetadataTarget::Address(_) => TransactionType::ModifyAccountMetadata,
            MetadataTarget::Mosaic(_) => TransactionType::ModifyMosaicMetadata,
            MetadataTarget::Namespace(_) => TransactionType::ModifyNamespaceMetadata,
        }
    }

    fn body_size(&self) -> usize {
        1 + self.target.id_size()
            + self
                .modifications
                .iter()
                .map(MetadataModification::encoded_len)
                .sum::<usize>()
    }

    fn attributes(&self) -> Vec<Attribute> {
        layout(self.target.id_size())
    }

    fn validate(&self) -> Result<(), TransactionError> {
        for modification in &self.modifications {
            check_len("key", modification.key.len(), u8::MAX as usize)?;
            check_len("value", modification.value.len(), u16::MAX as usize)?;
        }
        Ok(())
    }

    fn encode(&self, table: &mut Table) -> Result<(), TransactionError> {
        table
            .put_u8("metadataType", self.target.metadata_type() as u8)
            .put_bytes("metadataId", self.target.id_bytes())
            .put_tables(
                "modifications",
                self.modifications.iter().map(MetadataModification::to_table).collect(),
            );
        Ok(())
    }
}
