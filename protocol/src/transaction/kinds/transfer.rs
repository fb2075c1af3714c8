//! Transfer: mosaics and an optional message to an address or alias.

use crate::config::{ADDRESS_LENGTH, MOSAIC_LENGTH, NAMESPACE_RECIPIENT_PREFIX};
use crate::layout::{Attribute, Length, Schema, Table};
use crate::model::{Address, Mosaic, NamespaceId};
use crate::transaction::builder::BodyLayout;
use crate::transaction::error::TransactionError;
use crate::transaction::types::TransactionType;

use super::{check_len, mosaic_schema};

/// Transfer destination: a concrete address or a namespace alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    Address(Address),
    Namespace(NamespaceId),
}

impl Recipient {
    /// 25-byte wire form. Aliases are `0x91 ‖ id LE ‖ zero padding`.
    pub fn to_bytes(&self) -> [u8; ADDRESS_LENGTH] {
        match self {
            Self::Address(address) => *address.as_bytes(),
            Self::Namespace(id) => {
                let mut out = [0u8; ADDRESS_LENGTH];
                out[0] = NAMESPACE_RECIPIENT_PREFIX;
                out[1..9].copy_from_slice(&id.id().to_le_bytes());
                out
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Plain = 0,
    Secure = 1,
}

/// Message attached to a transfer: one type byte, then the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub message_type: MessageType,
    pub payload: Vec<u8>,
}

impl Message {
    pub fn plain(text: &str) -> Self {
        Self {
            message_type: MessageType::Plain,
            payload: text.as_bytes().to_vec(),
        }
    }

    /// Already-encrypted payload.
    pub fn secure(payload: Vec<u8>) -> Self {
        Self {
            message_type: MessageType::Secure,
            payload,
        }
    }

    pub fn empty() -> Self {
        Self::plain("")
    }

    fn encoded_len(&self) -> usize {
        1 + self.payload.len()
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.push(self.message_type as u8);
        out.extend_from_slice(&self.payload);
        out
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferTransaction {
    pub recipient: Recipient,
    pub mosaics: Vec<Mosaic>,
    pub message: Message,
}

impl TransferTransaction {
    pub fn new(recipient: Recipient) -> Self {
        Self {
            recipient,
            mosaics: Vec::new(),
            message: Message::empty(),
        }
    }

    pub fn mosaic(mut self, mosaic: Mosaic) -> Self {
        self.mosaics.push(mosaic);
        self
    }

    pub fn mosaics(mut self, mosaics: Vec<Mosaic>) -> Self {
        self.mosaics = mosaics;
        self
    }

    pub fn message(mut self, message: Message) -> Self {
        self.message = message;
        self
    }

    /// Mosaics in wire order. The caller's vector is left as given.
    pub fn sorted_mosaics(&self) -> Vec<Mosaic> {
        let mut sorted = self.mosaics.clone();
        sorted.sort_by(Mosaic::cmp_by_id);
        sorted
    }
}

pub(crate) fn layout() -> Vec<Attribute> {
    vec![
        Attribute::bytes("recipient", ADDRESS_LENGTH),
        Attribute::scalar("messageSize", 2),
        Attribute::scalar("numMosaics", 1),
        Attribute::string("message", Length::Bytes("messageSize")),
        Attribute::table_array("mosaics", Schema::new(mosaic_schema()), Length::Count("numMosaics")),
    ]
}

impl BodyLayout for TransferTransaction {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::Transfer
    }

    fn body_size(&self) -> usize {
        ADDRESS_LENGTH + 2 + 1 + self.message.encoded_len() + MOSAIC_LENGTH * self.mosaics.len()
    }

    fn attributes(&self) -> Vec<Attribute> {
        layout()
    }

    fn validate(&self) -> Result<(), TransactionError> {
        check_len("message", self.message.encoded_len(), u16::MAX as usize)?;
        check_len("mosaics", self.mosaics.len(), u8::MAX as usize)
    }

    fn encode(&self, table: &mut Table) -> Result<(), TransactionError> {
        let mosaics = self
            .sorted_mosaics()
            .iter()
            .map(|m| {
                let mut t = Table::new();
                t.put_uint64("id", m.id).put_uint64("amount", m.amount);
                t
            })
            .collect();
        table
            .put_bytes("recipient", self.recipient.to_bytes())
            .put_u16("messageSize", self.message.encoded_len() as u16)
            .put_u8("numMosaics", self.mosaics.len() as u8)
            .put_bytes("message", self.message.to_bytes())
            .put_tables("mosaics", mosaics);
        Ok(())
    }
}
