//! Namespace registration and aliases.

use crate::config::ADDRESS_LENGTH;
use crate::layout::{Attribute, Length, Table};
use crate::model::{Address, MosaicId, NamespaceId, UInt64};
use crate::transaction::builder::BodyLayout;
use crate::transaction::error::TransactionError;
use crate::transaction::types::TransactionType;

use super::check_len;

// ---------------------------------------------------------------------------
// RegisterNamespace
// ---------------------------------------------------------------------------

/// Root namespaces are leased for a duration; children hang off a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceRegistration {
    Root { duration: UInt64 },
    Sub { parent: NamespaceId },
}

impl NamespaceRegistration {
    fn type_byte(&self) -> u8 {
        match self {
            Self::Root { .. } => 0,
            Self::Sub { .. } => 1,
        }
    }

    fn duration_or_parent(&self) -> UInt64 {
        match self {
            Self::Root { duration } => *duration,
            Self::Sub { parent } => parent.id(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterNamespaceTransaction {
    pub registration: NamespaceRegistration,
    pub namespace_id: NamespaceId,
    pub name: String,
}

impl RegisterNamespaceTransaction {
    pub fn root(name: &str, duration: UInt64) -> Self {
        Self {
            registration: NamespaceRegistration::Root { duration },
            namespace_id: NamespaceId::from_name(name, None),
            name: name.to_string(),
        }
    }

    pub fn sub(name: &str, parent: NamespaceId) -> Self {
        Self {
            registration: NamespaceRegistration::Sub { parent },
            namespace_id: NamespaceId::from_name(name, Some(parent)),
            name: name.to_string(),
        }
    }
}

pub(crate) fn register_layout() -> Vec<Attribute> {
    vec![
        Attribute::scalar("namespaceType", 1),
        Attribute::uint64("durationParentId"),
        Attribute::uint64("namespaceId"),
        Attribute::scalar("namespaceNameSize", 1),
        Attribute::string("name", Length::Count("namespaceNameSize")),
    ]
}

impl BodyLayout for RegisterNamespaceTransaction {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::RegisterNamespace
    }

    fn body_size(&self) -> usize {
        1 + 8 + 8 + 1 + self.name.len()
    }

    fn attributes(&self) -> Vec<Attribute> {
        register_layout()
    }

    fn validate(&self) -> Result<(), TransactionError> {
        check_len("name", self.name.len(), u8::MAX as usize)
    }

    fn encode(&self, table: &mut Table) -> Result<(), TransactionError> {
        table
            .put_u8("namespaceType", self.registration.type_byte())
            .put_uint64("durationParentId", self.registration.duration_or_parent())
            .put_uint64("namespaceId", self.namespace_id.id())
            .put_u8("namespaceNameSize", self.name.len() as u8)
            .put_bytes("name", self.name.as_bytes());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Aliases
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasAction {
    Link = 0,
    Unlink = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressAliasTransaction {
    pub action: AliasAction,
    pub namespace_id: NamespaceId,
    pub address: Address,
}

impl AddressAliasTransaction {
    pub fn new(action: AliasAction, namespace_id: NamespaceId, address: Address) -> Self {
        Self {
            action,
            namespace_id,
            address,
        }
    }
}

pub(crate) fn address_alias_layout() -> Vec<Attribute> {
    vec![
        Attribute::scalar("aliasAction", 1),
        Attribute::uint64("namespaceId"),
        Attribute::bytes("address", ADDRESS_LENGTH),
    ]
}

impl BodyLayout for AddressAliasTransaction {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::AddressAlias
    }

    fn body_size(&self) -> usize {
        1 + 8 + ADDRESS_LENGTH
    }

    fn attributes(&self) -> Vec<Attribute> {
        address_alias_layout()
    }

    fn encode(&self, table: &mut Table) -> Result<(), TransactionError> {
        table
            .put_u8("aliasAction", self.action as u8)
            .put_uint64("namespaceId", self.namespace_id.id())
            .put_bytes("address", *self.address.as_bytes());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MosaicAliasTransaction {
    pub action: AliasAction,
    pub namespace_id: NamespaceId,
    pub mosaic_id: MosaicId,
}

impl MosaicAliasTransaction {
    pub fn new(action: AliasAction, namespace_id: NamespaceId, mosaic_id: MosaicId) -> Self {
        Self {
            action,
            namespace_id,
            mosaic_id,
        }
    }
}

pub(crate) fn mosaic_alias_layout() -> Vec<Attribute> {
    vec![
        Attribute::scalar("aliasAction", 1),
        Attribute::uint64("namespaceId"),
        Attribute::uint64("mosaicId"),
    ]
}

impl BodyLayout for MosaicAliasTransaction {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::MosaicAlias
    }

    fn body_size(&self) -> usize {
        1 + 8 + 8
    }

    fn attributes(&self) -> Vec<Attribute> {
        mosaic_alias_layout()
    }

    fn encode(&self, table: &mut Table) -> Result<(), TransactionError> {
        table
            .put_u8("aliasAction", self.action as u8)
            .put_uint64("namespaceId", self.namespace_id.id())
            .put_uint64("mosaicId", self.mosaic_id.id());
        Ok(())
    }
}
