//! Mosaic and namespace identifiers.
//!
//! Both ids are 64-bit values derived from a SHA3-256 digest. Namespace ids
//! always have the high bit set and mosaic ids always have it cleared, which
//! is how a recipient or alias field can hold either kind without a tag.

use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use std::cmp::Ordering;
use std::fmt;

use super::uint64::UInt64;
use crate::crypto::PublicKey;

const ID_FLAG: u32 = 0x8000_0000;

/// First eight digest bytes as a `(lower, higher)` word pair.
fn id_words(digest: &[u8]) -> (u32, u32) {
    let lower = u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]]);
    let higher = u32::from_le_bytes([digest[4], digest[5], digest[6], digest[7]]);
    (lower, higher)
}

// ---------------------------------------------------------------------------
// MosaicId
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MosaicId(UInt64);

impl MosaicId {
    pub const fn new(id: UInt64) -> Self {
        Self(id)
    }

    /// Id the ledger assigns to a mosaic defined by `owner` with `nonce`.
    pub fn from_nonce(nonce: u32, owner: &PublicKey) -> Self {
        let digest = Sha3_256::new()
            .chain_update(nonce.to_le_bytes())
            .chain_update(owner.as_bytes())
            .finalize();
        let (lower, higher) = id_words(&digest);
        Self(UInt64::new(lower, higher & !ID_FLAG))
    }

    pub const fn id(self) -> UInt64 {
        self.0
    }

    pub fn to_hex(self) -> String {
        self.0.to_hex()
    }
}

impl fmt::Debug for MosaicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MosaicId({})", self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// NamespaceId
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamespaceId(UInt64);

impl NamespaceId {
    pub const fn new(id: UInt64) -> Self {
        Self(id)
    }

    /// Id of `name` under `parent` (root namespaces use `None`).
    ///
    /// `name` is a single path segment; nested paths are resolved by chaining
    /// calls, each child hashed under its parent's id.
    pub fn from_name(name: &str, parent: Option<NamespaceId>) -> Self {
        let parent = parent.map(|p| p.0).unwrap_or(UInt64::ZERO);
        let digest = Sha3_256::new()
            .chain_update(parent.lower().to_le_bytes())
            .chain_update(parent.higher().to_le_bytes())
            .chain_update(name.as_bytes())
            .finalize();
        let (lower, higher) = id_words(&digest);
        Self(UInt64::new(lower, higher | ID_FLAG))
    }

    pub const fn id(self) -> UInt64 {
        self.0
    }

    pub fn to_hex(self) -> String {
        self.0.to_hex()
    }
}

impl fmt::Debug for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NamespaceId({})", self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Mosaic
// ---------------------------------------------------------------------------

/// An amount of one mosaic. On the wire: id (8) then amount (8).
///
/// The id slot may hold a [`NamespaceId`] alias instead of a mosaic id,
/// hence the raw [`UInt64`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mosaic {
    pub id: UInt64,
    pub amount: UInt64,
}

impl Mosaic {
    pub const fn new(id: UInt64, amount: UInt64) -> Self {
        Self { id, amount }
    }

    pub fn to_le_bytes(&self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out[..8].copy_from_slice(&self.id.to_le_bytes());
        out[8..].copy_from_slice(&self.amount.to_le_bytes());
        out
    }

    /// Order in which a transfer lists its mosaics: low id word first, high
    /// word breaks ties.
    pub fn cmp_by_id(&self, other: &Self) -> Ordering {
        self.id
            .lower()
            .cmp(&other.id.lower())
            .then_with(|| self.id.higher().cmp(&other.id.higher()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_ids_have_high_bit_set() {
        let root = NamespaceId::from_name("prx", None);
        assert_ne!(root.id().higher() & ID_FLAG, 0);
        let child = NamespaceId::from_name("xpx", Some(root));
        assert_ne!(child.id().higher() & ID_FLAG, 0);
        assert_ne!(root, child);
    }

    #[test]
    fn namespace_id_is_deterministic() {
        assert_eq!(
            NamespaceId::from_name("foo", None),
            NamespaceId::from_name("foo", None)
        );
        assert_ne!(
            NamespaceId::from_name("foo", None),
            NamespaceId::from_name("bar", None)
        );
    }

    #[test]
    fn mosaic_ids_have_high_bit_clear() {
        let owner = PublicKey::from_bytes([0xAB; 32]);
        for nonce in [0u32, 1, 42, u32::MAX] {
            let id = MosaicId::from_nonce(nonce, &owner);
            assert_eq!(id.id().higher() & ID_FLAG, 0);
        }
        assert_ne!(MosaicId::from_nonce(1, &owner), MosaicId::from_nonce(2, &owner));
    }

    #[test]
    fn mosaic_order_uses_low_word_first() {
        let a = Mosaic::new(UInt64::new(1, 9), UInt64::ZERO);
        let b = Mosaic::new(UInt64::new(2, 0), UInt64::ZERO);
        assert_eq!(a.cmp_by_id(&b), Ordering::Less);

        let c = Mosaic::new(UInt64::new(1, 3), UInt64::ZERO);
        assert_eq!(c.cmp_by_id(&a), Ordering::Less);

        let d = Mosaic::new(UInt64::new(1, 9), UInt64::new(100, 0));
        assert_eq!(a.cmp_by_id(&d), Ordering::Equal);
    }

    #[test]
    fn mosaic_wire_bytes() {
        let m = Mosaic::new(UInt64::new(1, 2), UInt64::new(3, 4));
        assert_eq!(
            m.to_le_bytes(),
            [1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0, 4, 0, 0, 0]
        );
    }
}
