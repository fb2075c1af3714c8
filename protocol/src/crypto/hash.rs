//! # Hashing Utilities
//!
//! The ledger hashes with the SHA-3 family. Two flavours coexist:
//!
//! - **SHA3-256 / SHA3-512** — the FIPS 202 variants, used by the standard
//!   [`SignScheme::Sha3`] convention.
//! - **Keccak-256 / Keccak-512** — the pre-standard padding, used by the
//!   [`SignScheme::KeccakReversedKey`] convention.
//!
//! SHA-256 and RIPEMD-160 only show up in secret-lock hash types and in
//! address derivation.

use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use sha3::{Digest, Keccak256, Sha3_256};
use std::fmt;

/// Hash convention used for signing and transaction hashing.
///
/// The convention never changes the byte layout of a transaction, only the
/// primitive fed with those bytes. Callers select it per invocation; nothing
/// in this crate infers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SignScheme {
    /// SHA3-512 key expansion and challenge hash, SHA3-256 transaction hash.
    #[default]
    Sha3,
    /// Private key bytes reversed, Keccak-512 key expansion and challenge
    /// hash, Keccak-256 transaction hash.
    KeccakReversedKey,
}

impl fmt::Display for SignScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha3 => write!(f, "sha3"),
            Self::KeccakReversedKey => write!(f, "keccak-reversed-key"),
        }
    }
}

/// SHA3-256 of `data`.
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    Sha3_256::digest(data).into()
}

/// Keccak-256 of `data`.
pub fn keccak_256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// SHA-256 of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// `SHA-256(SHA-256(data))`.
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// RIPEMD-160 of `data`.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// `RIPEMD-160(SHA-256(data))`.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}

/// 256-bit hash of the concatenation of `parts` under the given scheme.
///
/// Used for transaction hashes, where the hashed material is stitched
/// together from several regions of the payload. Feeding the parts one by
/// one avoids copying the payload into a scratch buffer.
pub fn scheme_hash_256(scheme: SignScheme, parts: &[&[u8]]) -> [u8; 32] {
    match scheme {
        SignScheme::Sha3 => digest_parts::<Sha3_256>(parts),
        SignScheme::KeccakReversedKey => digest_parts::<Keccak256>(parts),
    }
}

fn digest_parts<D: Digest>(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = D::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha3_256_empty_vector() {
        assert_eq!(
            hex::encode(sha3_256(b"")),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn keccak_256_empty_vector() {
        assert_eq!(
            hex::encode(keccak_256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn sha256_abc_vector() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn ripemd160_empty_vector() {
        assert_eq!(
            hex::encode(ripemd160(b"")),
            "9c1185a5c5e9fc54612808977ee8f548b2258d31"
        );
    }

    #[test]
    fn double_sha256_is_sha256_twice() {
        assert_eq!(double_sha256(b"secret"), sha256(&sha256(b"secret")));
    }

    #[test]
    fn scheme_hash_concatenates_parts() {
        let whole = sha3_256(b"helloworld");
        assert_eq!(scheme_hash_256(SignScheme::Sha3, &[b"hello", b"world"]), whole);

        let whole = keccak_256(b"helloworld");
        assert_eq!(
            scheme_hash_256(SignScheme::KeccakReversedKey, &[b"hel", b"lowor", b"ld"]),
            whole
        );
    }

    #[test]
    fn schemes_disagree() {
        assert_ne!(
            scheme_hash_256(SignScheme::Sha3, &[b"x"]),
            scheme_hash_256(SignScheme::KeccakReversedKey, &[b"x"])
        );
    }
}
