//! Hash locks and secret locks.
//!
//! A hash lock deposits funds against the hash of a bonded aggregate so the
//! network will hold the aggregate while cosignatures arrive. Secret locks
//! release funds to a recipient once someone reveals a proof hashing to the
//! locked secret.

use crate::config::{ADDRESS_LENGTH, HASH_LENGTH};
use crate::crypto::hash::{double_sha256, hash160, keccak_256, sha3_256};
use crate::layout::{Attribute, LayoutError, Length, Table};
use crate::model::{Address, Mosaic, UInt64};
use crate::transaction::builder::BodyLayout;
use crate::transaction::error::TransactionError;
use crate::transaction::signing::SignedTransaction;
use crate::transaction::types::TransactionType;

use super::check_len;

// ---------------------------------------------------------------------------
// HashLock
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashLockTransaction {
    pub mosaic: Mosaic,
    pub duration: UInt64,
    locked_hash: String,
    locked_type: TransactionType,
}

impl HashLockTransaction {
    /// Locks `mosaic` for `duration` blocks against `signed`, which must be
    /// a bonded aggregate. The check runs when the lock is encoded.
    pub fn new(mosaic: Mosaic, duration: UInt64, signed: &SignedTransaction) -> Self {
        Self {
            mosaic,
            duration,
            locked_hash: signed.hash.clone(),
            locked_type: signed.transaction_type,
        }
    }

    pub fn locked_hash(&self) -> &str {
        &self.locked_hash
    }

    fn hash_bytes(&self) -> Result<[u8; HASH_LENGTH], TransactionError> {
        let bytes = hex::decode(&self.locked_hash)?;
        let actual = bytes.len();
        bytes.try_into().map_err(|_| {
            TransactionError::Layout(LayoutError::WidthMismatch {
                name: "hash",
                expected: HASH_LENGTH,
                actual,
            })
        })
    }
}

pub(crate) fn hash_lock_layout() -> Vec<Attribute> {
    vec![
        Attribute::uint64("mosaicId"),
        Attribute::uint64("mosaicAmount"),
        Attribute::uint64("duration"),
        Attribute::bytes("hash", HASH_LENGTH),
    ]
}

impl BodyLayout for HashLockTransaction {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::HashLock
    }

    fn body_size(&self) -> usize {
        8 + 8 + 8 + HASH_LENGTH
    }

    fn attributes(&self) -> Vec<Attribute> {
        hash_lock_layout()
    }

    fn validate(&self) -> Result<(), TransactionError> {
        if self.locked_type != TransactionType::AggregateBonded {
            return Err(TransactionError::HashLockRequiresBondedAggregate(
                self.locked_type,
            ));
        }
        self.hash_bytes().map(|_| ())
    }

    fn encode(&self, table: &mut Table) -> Result<(), TransactionError> {
        table
            .put_uint64("mosaicId", self.mosaic.id)
            .put_uint64("mosaicAmount", self.mosaic.amount)
            .put_uint64("duration", self.duration)
            .put_bytes("hash", self.hash_bytes()?);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Secret hash types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretHashType {
    Sha3_256 = 0,
    Keccak256 = 1,
    /// RIPEMD-160 of SHA-256; 20-byte secrets, zero-padded on the wire.
    Hash160 = 2,
    /// Double SHA-256.
    Hash256 = 3,
}

impl SecretHashType {
    pub const fn secret_length(self) -> usize {
        match self {
            Self::Hash160 => 20,
            _ => 32,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sha3_256 => "SHA3-256",
            Self::Keccak256 => "Keccak-256",
            Self::Hash160 => "Hash160",
            Self::Hash256 => "Hash256",
        }
    }

    /// Secret that `proof` unlocks.
    pub fn hash(self, proof: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha3_256 => sha3_256(proof).to_vec(),
            Self::Keccak256 => keccak_256(proof).to_vec(),
            Self::Hash160 => hash160(proof).to_vec(),
            Self::Hash256 => double_sha256(proof).to_vec(),
        }
    }

    fn check_secret(self, secret: &[u8]) -> Result<(), TransactionError> {
        if secret.len() != self.secret_length() {
            return Err(TransactionError::SecretLengthMismatch {
                hash_type: self.name(),
                expected: self.secret_length(),
                actual: secret.len(),
            });
        }
        Ok(())
    }
}

fn padded_secret(secret: &[u8]) -> [u8; HASH_LENGTH] {
    let mut out = [0u8; HASH_LENGTH];
    let n = secret.len().min(HASH_LENGTH);
    out[..n].copy_from_slice(&secret[..n]);
    out
}

// ---------------------------------------------------------------------------
// SecretLock
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretLockTransaction {
    pub mosaic: Mosaic,
    pub duration: UInt64,
    pub hash_type: SecretHashType,
    pub secret: Vec<u8>,
    pub recipient: Address,
}

impl SecretLockTransaction {
    pub fn new(
        mosaic: Mosaic,
        duration: UInt64,
        hash_type: SecretHashType,
        secret: Vec<u8>,
        recipient: Address,
    ) -> Self {
        Self {
            mosaic,
            duration,
            hash_type,
            secret,
            recipient,
        }
    }
}

pub(crate) fn secret_lock_layout() -> Vec<Attribute> {
    vec![
        Attribute::uint64("mosaicId"),
        Attribute::uint64("mosaicAmount"),
        Attribute::uint64("duration"),
        Attribute::scalar("hashAlgorithm", 1),
        Attribute::bytes("secret", HASH_LENGTH),
        Attribute::bytes("recipient", ADDRESS_LENGTH),
    ]
}

impl BodyLayout for SecretLockTransaction {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::SecretLock
    }

    fn body_size(&self) -> usize {
        8 + 8 + 8 + 1 + HASH_LENGTH + ADDRESS_LENGTH
    }

    fn attributes(&self) -> Vec<Attribute> {
        secret_lock_layout()
    }

    fn validate(&self) -> Result<(), TransactionError> {
        self.hash_type.check_secret(&self.secret)
    }

    fn encode(&self, table: &mut Table) -> Result<(), TransactionError> {
        table
            .put_uint64("mosaicId", self.mosaic.id)
            .put_uint64("mosaicAmount", self.mosaic.amount)
            .put_uint64("duration", self.duration)
            .put_u8("hashAlgorithm", self.hash_type as u8)
            .put_bytes("secret", padded_secret(&self.secret))
            .put_bytes("recipient", *self.recipient.as_bytes());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SecretProof
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretProofTransaction {
    pub hash_type: SecretHashType,
    pub secret: Vec<u8>,
    pub recipient: Address,
    pub proof: Vec<u8>,
}

impl SecretProofTransaction {
    pub fn new(hash_type: SecretHashType, secret: Vec<u8>, recipient: Address, proof: Vec<u8>) -> Self {
        Self {
            hash_type,
            secret,
            recipient,
            proof,
        }
    }

    /// Proof transaction whose secret is computed from `proof`.
    pub fn from_proof(hash_type: SecretHashType, recipient: Address, proof: Vec<u8>) -> Self {
        let secret = hash_type.hash(&proof);
        Self::new(hash_type, secret, recipient, proof)
    }
}

pub(crate) fn secret_proof_layout() -> Vec<Attribute> {
    vec![
        Attribute::scalar("hashAlgorithm", 1),
        Attribute::bytes("secret", HASH_LENGTH),
        Attribute::bytes("recipient", ADDRESS_LENGTH),
        Attribute::scalar("proofSize", 2),
        Attribute::string("proof", Length::Count("proofSize")),
    ]
}

impl BodyLayout for SecretProofTransaction {
    fn transaction_type(&self) -> TransactionType {
        TransactionType::SecretProof
    }

    fn body_size(&self) -> usize {
        1 + HASH_LENGTH + ADDRESS_LENGTH + 2 + self.proof.len()
    }

    fn attributes(&self) -> Vec<Attribute> {
        secret_proof_layout()
    }

    fn validate(&self) -> Result<(), TransactionError> {
        self.hash_type.check_secret(&self.secret)?;
        check_len("proof", self.proof.len(), u16::MAX as usize)
    }

    fn encode(&self, table: &mut Table) -> Result<(), TransactionError> {
        table
            .put_u8("hashAlgorithm", self.hash_type as u8)
            .put_bytes("secret", padded_secret(&self.secret))
            .put_bytes("recipient", *self.recipient.as_bytes())
            .put_u16("proofSize", self.proof.len() as u16)
            .put_bytes("proof", self.proof.clone());
        Ok(())
    }
}
