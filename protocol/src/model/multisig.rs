//! Multisig ownership as reported by the node.
//!
//! A [`MultisigAccountGraph`] is leveled: depth 0 is the queried account,
//! positive depths walk down towards its ultimate cosignatories, and
//! negative depths walk up to the accounts it cosigns for.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::account::PublicAccount;
use crate::crypto::PublicKey;

/// One account's multisig settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultisigAccountInfo {
    pub account: PublicAccount,
    pub min_approval: u32,
    pub min_removal: u32,
    pub cosignatories: Vec<PublicAccount>,
    #[serde(default)]
    pub multisig_accounts: Vec<PublicAccount>,
}

impl MultisigAccountInfo {
    /// An account with both quorums at zero is a plain account, even if the
    /// node returns a record for it.
    pub fn is_multisig(&self) -> bool {
        self.min_approval != 0 || self.min_removal != 0
    }

    pub fn has_cosigner(&self, key: &PublicKey) -> bool {
        self.cosignatories.iter().any(|c| &c.public_key == key)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisigAccountGraph {
    pub levels: BTreeMap<i32, Vec<MultisigAccountInfo>>,
}

impl MultisigAccountGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, depth: i32, records: Vec<MultisigAccountInfo>) -> Self {
        self.levels.entry(depth).or_default().extend(records);
        self
    }

    /// Multisig records at depth >= 0, deepest level first.
    pub fn downward_levels(&self) -> impl Iterator<Item = (i32, Vec<&MultisigAccountInfo>)> + '_ {
        self.levels
            .range(0..)
            .rev()
            .map(|(depth, records)| {
                let multisig = records.iter().filter(|r| r.is_multisig()).collect::<Vec<_>>();
                (*depth, multisig)
            })
    }

    pub fn has_multisig_records(&self) -> bool {
        self.levels
            .range(0..)
            .any(|(_, records)| records.iter().any(MultisigAccountInfo::is_multisig))
    }
}
