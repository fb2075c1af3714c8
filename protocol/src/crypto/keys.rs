//! # Key Management
//!
//! Ed25519 keys under two hash conventions.
//!
//! Standard Ed25519 fixes SHA-512 for both the key expansion and the
//! challenge hash. The ledger instead uses SHA3-512 ([`SignScheme::Sha3`]) or
//! Keccak-512 over the byte-reversed private key
//! ([`SignScheme::KeccakReversedKey`]). The curve arithmetic is unchanged, so
//! we drive `ed25519-dalek`'s hazmat layer with the matching digest instead of
//! its SHA-512 defaults.
//!
//! A [`KeyPair`] holds only the 32-byte seed. The public key depends on the
//! scheme, so it is derived on demand.
//!
//! Key bytes are never logged.

use ed25519_dalek::hazmat::{raw_sign, ExpandedSecretKey};
use ed25519_dalek::VerifyingKey;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak512, Sha3_512};
use std::fmt;
use thiserror::Error;

use super::hash::SignScheme;
use crate::config::{PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};

/// Errors that can occur while parsing key material.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid private key: expected 32 bytes of hex")]
    InvalidPrivateKey,

    #[error("invalid public key: expected 32 bytes, got {0}")]
    InvalidPublicKeyLength(usize),

    #[error("invalid signature: expected 64 bytes, got {0}")]
    InvalidSignatureLength(usize),

    #[error("malformed hex: {0}")]
    Hex(#[from] hex::FromHexError),
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// A 32-byte Ed25519 public key as it appears on the wire.
///
/// No curve-point validation happens here: zero-filled signer regions and
/// keys taken from decoded payloads must be representable. Verification
/// rejects invalid points.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PublicKey([u8; PUBLIC_KEY_LENGTH]);

impl PublicKey {
    pub const fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parses a key from a byte slice of exactly 32 bytes.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; PUBLIC_KEY_LENGTH] = slice
            .try_into()
            .map_err(|_| KeyError::InvalidPublicKeyLength(slice.len()))?;
        Ok(Self(bytes))
    }

    /// Parses a hex-encoded key (either case).
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        Self::try_from_slice(&hex::decode(s)?)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    /// Upper-case hex, the form used in payloads and REST responses.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// `true` for the all-zero placeholder written by builders.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

impl Serialize for PublicKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_LENGTH]);

impl Signature {
    pub const fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; SIGNATURE_LENGTH] = slice
            .try_into()
            .map_err(|_| KeyError::InvalidSignatureLength(slice.len()))?;
        Ok(Self(bytes))
    }

    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        Self::try_from_slice(&hex::decode(s)?)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(f, "Signature({}...{})", &hex_str[..8], &hex_str[120..])
    }
}

impl Serialize for Signature {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// KeyPair
// ---------------------------------------------------------------------------

/// An account's private key.
///
/// `KeyPair` intentionally does not implement `Serialize`: exporting the seed
/// has to be an explicit [`KeyPair::private_key_bytes`] call.
pub struct KeyPair {
    seed: [u8; PRIVATE_KEY_LENGTH],
}

impl KeyPair {
    /// Fresh key from the OS RNG.
    pub fn generate() -> Self {
        let mut seed = [0u8; PRIVATE_KEY_LENGTH];
        OsRng.fill_bytes(&mut seed);
        Self { seed }
    }

    pub fn from_private_key(seed: [u8; PRIVATE_KEY_LENGTH]) -> Self {
        Self { seed }
    }

    /// Parses a hex-encoded 32-byte private key.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str).map_err(|_| KeyError::InvalidPrivateKey)?;
        let seed: [u8; PRIVATE_KEY_LENGTH] =
            bytes.try_into().map_err(|_| KeyError::InvalidPrivateKey)?;
        Ok(Self { seed })
    }

    /// Exports the raw seed. Handle with care.
    pub fn private_key_bytes(&self) -> [u8; PRIVATE_KEY_LENGTH] {
        self.seed
    }

    /// Public key under the given scheme.
    pub fn public_key(&self, scheme: SignScheme) -> PublicKey {
        let expanded = self.expand(scheme);
        PublicKey(VerifyingKey::from(&expanded).to_bytes())
    }

    /// Signs `message` under the given scheme. Deterministic.
    pub fn sign(&self, message: &[u8], scheme: SignScheme) -> Signature {
        let expanded = self.expand(scheme);
        let verifying_key = VerifyingKey::from(&expanded);
        let signature = match scheme {
            SignScheme::Sha3 => raw_sign::<Sha3_512>(&expanded, message, &verifying_key),
            SignScheme::KeccakReversedKey => {
                raw_sign::<Keccak512>(&expanded, message, &verifying_key)
            }
        };
        Signature(signature.to_bytes())
    }

    /// Hashes the seed with the scheme's 512-bit digest and clamps the lower
    /// half into an Ed25519 scalar.
    fn expand(&self, scheme: SignScheme) -> ExpandedSecretKey {
        let mut digest = [0u8; 64];
        match scheme {
            SignScheme::Sha3 => digest.copy_from_slice(&Sha3_512::digest(self.seed)),
            SignScheme::KeccakReversedKey => {
                let mut reversed = self.seed;
                reversed.reverse();
                digest.copy_from_slice(&Keccak512::digest(reversed));
            }
        }
        digest[0] &= 248;
        digest[31] &= 127;
        digest[31] |= 64;
        ExpandedSecretKey::from_bytes(&digest)
    }
}

impl Clone for KeyPair {
    fn clone(&self) -> Self {
        Self { seed: self.seed }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the seed.
        write!(f, "KeyPair(pub={})", self.public_key(SignScheme::Sha3).to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::signatures::verify;

    const SEED: [u8; 32] = [7u8; 32];

    #[test]
    fn sign_verify_roundtrip_both_schemes() {
        let kp = KeyPair::from_private_key(SEED);
        for scheme in [SignScheme::Sha3, SignScheme::KeccakReversedKey] {
            let sig = kp.sign(b"transfer 100 xpx", scheme);
            assert!(verify(&kp.public_key(scheme), b"transfer 100 xpx", &sig, scheme));
        }
    }

    #[test]
    fn public_key_depends_on_scheme() {
        let kp = KeyPair::from_private_key(SEED);
        assert_ne!(
            kp.public_key(SignScheme::Sha3),
            kp.public_key(SignScheme::KeccakReversedKey)
        );
    }

    #[test]
    fn signature_does_not_verify_under_other_scheme() {
        let kp = KeyPair::from_private_key(SEED);
        let sig = kp.sign(b"payload", SignScheme::Sha3);
        let pk = kp.public_key(SignScheme::Sha3);
        assert!(!verify(&pk, b"payload", &sig, SignScheme::KeccakReversedKey));
    }

    #[test]
    fn wrong_message_fails() {
        let kp = KeyPair::generate();
        let sig = kp.sign(b"correct", SignScheme::Sha3);
        assert!(!verify(&kp.public_key(SignScheme::Sha3), b"wrong", &sig, SignScheme::Sha3));
    }

    #[test]
    fn wrong_key_fails() {
        let kp1 = KeyPair::generate();
        let kp2 = KeyPair::generate();
        let sig = kp1.sign(b"message", SignScheme::Sha3);
        assert!(!verify(&kp2.public_key(SignScheme::Sha3), b"message", &sig, SignScheme::Sha3));
    }

    #[test]
    fn signing_is_deterministic() {
        let kp = KeyPair::from_private_key(SEED);
        let a = kp.sign(b"determinism", SignScheme::KeccakReversedKey);
        let b = kp.sign(b"determinism", SignScheme::KeccakReversedKey);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_public_key_never_verifies() {
        let kp = KeyPair::generate();
        let sig = kp.sign(b"m", SignScheme::Sha3);
        assert!(!verify(&PublicKey::default(), b"m", &sig, SignScheme::Sha3));
    }

    #[test]
    fn hex_roundtrips() {
        let kp = KeyPair::generate();
        let restored = KeyPair::from_hex(&hex::encode(kp.private_key_bytes())).unwrap();
        assert_eq!(
            kp.public_key(SignScheme::Sha3),
            restored.public_key(SignScheme::Sha3)
        );

        let pk = kp.public_key(SignScheme::Sha3);
        assert_eq!(PublicKey::from_hex(&pk.to_hex()).unwrap(), pk);
        assert_eq!(PublicKey::from_hex(&pk.to_hex().to_lowercase()).unwrap(), pk);

        let sig = kp.sign(b"x", SignScheme::Sha3);
        assert_eq!(Signature::from_hex(&sig.to_hex()).unwrap(), sig);
    }

    #[test]
    fn rejects_bad_lengths() {
        assert!(KeyPair::from_hex("deadbeef").is_err());
        assert!(KeyPair::from_hex("not hex").is_err());
        assert!(matches!(
            PublicKey::try_from_slice(&[0u8; 31]),
            Err(KeyError::InvalidPublicKeyLength(31))
        ));
        assert!(matches!(
            Signature::try_from_slice(&[0u8; 63]),
            Err(KeyError::InvalidSignatureLength(63))
        ));
    }

    #[test]
    fn debug_does_not_leak_seed() {
        let kp = KeyPair::from_private_key(SEED);
        let debug_str = format!("{:?}", kp);
        assert!(debug_str.starts_with("KeyPair(pub="));
        assert!(!debug_str.contains(&hex::encode_upper(SEED)));
    }
}
