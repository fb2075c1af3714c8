//! Network identifiers and the generation hash.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::HASH_LENGTH;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NetworkError {
    #[error("unknown network type byte 0x{0:02x}")]
    UnknownNetworkType(u8),

    #[error("generation hash must be 32 bytes of hex: {0}")]
    InvalidGenerationHash(String),
}

/// The network a transaction is meant for. Encoded in the high byte of the
/// wire `version` field and in the first byte of every address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkType {
    MainNet,
    TestNet,
    Private,
    PrivateTest,
    Mijin,
    MijinTest,
}

impl NetworkType {
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::MainNet => 0xb8,
            Self::TestNet => 0xa8,
            Self::Private => 0xc8,
            Self::PrivateTest => 0xb0,
            Self::Mijin => 0x60,
            Self::MijinTest => 0x90,
        }
    }

    pub fn from_byte(byte: u8) -> Result<Self, NetworkError> {
        match byte {
            0xb8 => Ok(Self::MainNet),
            0xa8 => Ok(Self::TestNet),
            0xc8 => Ok(Self::Private),
            0xb0 => Ok(Self::PrivateTest),
            0x60 => Ok(Self::Mijin),
            0x90 => Ok(Self::MijinTest),
            other => Err(NetworkError::UnknownNetworkType(other)),
        }
    }

    /// Wire `version` field: network byte high, entity version low.
    pub const fn entity_version(self, version: u8) -> u16 {
        ((self.as_byte() as u16) << 8) | version as u16
    }

    /// Splits a wire `version` field into network type and entity version.
    pub fn split_entity_version(raw: u16) -> Result<(Self, u8), NetworkError> {
        Ok((Self::from_byte((raw >> 8) as u8)?, raw as u8))
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MainNet => write!(f, "MAIN_NET"),
            Self::TestNet => write!(f, "TEST_NET"),
            Self::Private => write!(f, "PRIVATE"),
            Self::PrivateTest => write!(f, "PRIVATE_TEST"),
            Self::Mijin => write!(f, "MIJIN"),
            Self::MijinTest => write!(f, "MIJIN_TEST"),
        }
    }
}

/// Identifies a network instance; mixed into every transaction hash and
/// signature so that a payload signed for one network is useless on another.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenerationHash([u8; HASH_LENGTH]);

impl GenerationHash {
    pub const fn from_bytes(bytes: [u8; HASH_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn from_hex(s: &str) -> Result<Self, NetworkError> {
        let bytes = hex::decode(s).map_err(|_| NetworkError::InvalidGenerationHash(s.into()))?;
        let bytes: [u8; HASH_LENGTH] = bytes
            .try_into()
            .map_err(|_| NetworkError::InvalidGenerationHash(s.into()))?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LENGTH] {
        &self.0
    }
}

impl fmt::Debug for GenerationHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GenerationHash({})", hex::encode_upper(self.0))
    }
}
