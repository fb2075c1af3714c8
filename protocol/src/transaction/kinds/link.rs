//! Account link: delegates harvesting to a remote key.

use crate::config::PUBLIC_KEY_LENGTH;
use crate::crypto::PublicKey;
use crate::layout::{Attribute, Table};
use crate::transaction::builder::BodyLayout;
use crate::transaction::error::TransactionError;
use crate::transaction::types::TransactionType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAction {
    Link = 0,
    Unlink = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountLinkTransaction {
    pub remote_account_key: PublicKey,
    pub action: LinkAction,
}

impl AccountLinkTransaction {
    pub fn new(remote_account_key: PublicKey, action: LinkAction) -> Self {
        Self {
            remote_account_key,
            action,
        }
    }
}

pub(crate) fn layout() -> Vec<Attribute> {
    vec![
        Attribute::bytes("remoteAccountKey", PUBLIC_KEY_LENGTH),
        Attribute::scalar("linkAction", 1),
    ]
}

impl BodyLayout for AccountLinkTransaction {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::AccountLink
    }

    fn body_size(&self) -> usize {
        PUBLIC_KEY_LENGTH + 1
    }

    fn attributes(&self) -> Vec<Attribute> {
        layout()
    }

    fn encode(&self, table: &mut Table) -> Result<(), TransactionError> {
        table
            .put_bytes("remoteAccountKey", *self.remote_account_key.as_bytes())
            .put_u8("linkAction", self.action as u8);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NetworkType;
    use crate::transaction::builder::TransactionBuilder;

    #[test]
    fn account_link_is_153_bytes() {
        let body = AccountLinkTransaction::new(PublicKey::from_bytes([5u8; 32]), LinkAction::Unlink);
        let tx = TransactionBuilder::new(NetworkType::PrivateTest).build(body);
        let bytes = tx.build_transaction().unwrap().bytes().to_vec();
        assert_eq!(bytes.len(), 153);
        assert_eq!(&bytes[100..102], &0xB002u16.to_le_bytes());
        assert_eq!(&bytes[120..152], &[5u8; 32]);
        assert_eq!(bytes[152], 1);
    }
}
