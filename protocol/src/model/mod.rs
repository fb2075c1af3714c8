//! # Ledger Data Model
//!
//! Value types shared by the builders, the signer and the aggregate service:
//! word-pair integers, network identifiers, deadlines, addresses, mosaic and
//! namespace ids, and the multisig graph returned by the node.

pub mod account;
pub mod deadline;
pub mod mosaic;
pub mod multisig;
pub mod network;
pub mod uint64;

pub use account::{Address, AddressError, PublicAccount};
pub use deadline::Deadline;
pub use mosaic::{Mosaic, MosaicId, NamespaceId};
pub use multisig::{MultisigAccountGraph, MultisigAccountInfo};
pub use network::{GenerationHash, NetworkError, NetworkType};
pub use uint64::{UInt64, UInt64Error};
