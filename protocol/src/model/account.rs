//! Addresses and public accounts.
//!
//! An address is 25 raw bytes: the network byte, the RIPEMD-160 of the
//! SHA3-256 of the public key, and a 4-byte SHA3-256 checksum over the first
//! 21 bytes. The base32 text form is handled outside this crate; here
//! addresses travel as raw bytes or hex.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::network::{NetworkError, NetworkType};
use crate::config::ADDRESS_LENGTH;
use crate::crypto::hash::{ripemd160, sha3_256};
use crate::crypto::PublicKey;

#[derive(Debug, Error)]
pub enum AddressError {
    #[error("address must be 25 bytes, got {0}")]
    InvalidLength(usize),

    #[error("malformed hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// Decoded 25-byte address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    pub const fn from_raw(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn try_from_slice(slice: &[u8]) -> Result<Self, AddressError> {
        let bytes: [u8; ADDRESS_LENGTH] = slice
            .try_into()
            .map_err(|_| AddressError::InvalidLength(slice.len()))?;
        Ok(Self(bytes))
    }

    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        Self::try_from_slice(&hex::decode(s)?)
    }

    /// Derives the address of `public_key` on `network_type`.
    pub fn from_public_key(public_key: &PublicKey, network_type: NetworkType) -> Self {
        let key_hash = ripemd160(&sha3_256(public_key.as_bytes()));
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[0] = network_type.as_byte();
        bytes[1..21].copy_from_slice(&key_hash);
        let checksum = sha3_256(&bytes[..21]);
        bytes[21..].copy_from_slice(&checksum[..4]);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    pub fn network_type(&self) -> Result<NetworkType, NetworkError> {
        NetworkType::from_byte(self.0[0])
    }

    /// Checks the embedded checksum.
    pub fn is_valid(&self) -> bool {
        sha3_256(&self.0[..21])[..4] == self.0[21..]
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

/// A public key together with the network it lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicAccount {
    pub public_key: PublicKey,
    pub network_type: NetworkType,
}

impl PublicAccount {
    pub const fn new(public_key: PublicKey, network_type: NetworkType) -> Self {
        Self {
            public_key,
            network_type,
        }
    }

    pub fn address(&self) -> Address {
        Address::from_public_key(&self.public_key, self.network_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_address_has_network_byte_and_checksum() {
        let pk = PublicKey::from_bytes([3u8; 32]);
        let address = Address::from_public_key(&pk, NetworkType::MijinTest);
        assert_eq!(address.as_bytes()[0], 0x90);
        assert_eq!(address.network_type().unwrap(), NetworkType::MijinTest);
        assert!(address.is_valid());
    }

    #[test]
    fn tampered_address_fails_checksum() {
        let pk = PublicKey::from_bytes([3u8; 32]);
        let mut raw = *Address::from_public_key(&pk, NetworkType::MainNet).as_bytes();
        raw[5] ^= 0xff;
        assert!(!Address::from_raw(raw).is_valid());
    }

    #[test]
    fn different_networks_different_addresses() {
        let account = PublicAccount::new(PublicKey::from_bytes([9u8; 32]), NetworkType::MainNet);
        let other = PublicAccount::new(account.public_key, NetworkType::TestNet);
        assert_ne!(account.address(), other.address());
    }

    #[test]
    fn hex_roundtrip_and_length_check() {
        let address = Address::from_public_key(&PublicKey::from_bytes([1u8; 32]), NetworkType::Mijin);
        assert_eq!(Address::from_hex(&address.to_hex()).unwrap(), address);
        assert!(matches!(
            Address::try_from_slice(&[0u8; 24]),
            Err(AddressError::InvalidLength(24))
        ));
    }
}
