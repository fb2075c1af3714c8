//! Signed transactions and the payload regions that signing covers.
//!
//! ```text
//!  0      4                68           100             data_end        len
//!  | size | signature (64) | signer (32) | version .. body | cosignatures |
//!         '-- written -----'-- written --'                 '- aggregates only
//!
//!  hash   = H(payload[4..36] ‖ payload[68..100] ‖ generation_hash ‖ payload[100..data_end])
//!  signed =                                       generation_hash ‖ payload[100..data_end]
//! ```
//!
//! `data_end` is the payload length, except for aggregates where it stops
//! after the embedded transactions: cosignatures are appended after signing
//! and must not change the hash.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::TransactionError;
use super::kinds::Cosignature;
use super::types::TransactionType;
use crate::config::{
    AGGREGATE_PAYLOAD_SIZE_OFFSET, COSIGNATURE_LENGTH, HASH_LENGTH, SIGNATURE_OFFSET,
    SIGNED_DATA_OFFSET, SIGNER_OFFSET, TRANSACTION_HEADER_SIZE, TYPE_OFFSET,
};
use crate::crypto::hash::scheme_hash_256;
use crate::crypto::{KeyPair, PublicKey, SignScheme, Signature};
use crate::model::{GenerationHash, NetworkType};

// ---------------------------------------------------------------------------
// SignedTransaction
// ---------------------------------------------------------------------------

/// A signed payload ready to announce.
///
/// `payload` and `hash` are upper-case hex. The struct serializes to the
/// JSON shape nodes accept on their announce endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTransaction {
    pub payload: String,
    pub hash: String,
    pub signer: PublicKey,
    pub transaction_type: TransactionType,
    pub network_type: NetworkType,
}

impl SignedTransaction {
    pub fn payload_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        Ok(hex::decode(&self.payload)?)
    }

    pub fn hash_bytes(&self) -> Result<[u8; HASH_LENGTH], TransactionError> {
        parse_hash(&self.hash)
    }

    /// Appends cosignatures collected off-chain to an aggregate payload.
    ///
    /// Every cosignature must be for this transaction's hash. The hash
    /// itself is unchanged because cosignatures sit outside the hashed
    /// region; only the size field is rewritten.
    pub fn with_cosignatures(
        &self,
        cosignatures: &[CosignatureSignedTransaction],
    ) -> Result<SignedTransaction, TransactionError> {
        if !self.transaction_type.is_aggregate() {
            return Err(TransactionError::NotAggregate(self.transaction_type));
        }
        for cosignature in cosignatures {
            if !cosignature.parent_hash.eq_ignore_ascii_case(&self.hash) {
                return Err(TransactionError::ParentHashMismatch {
                    expected: self.hash.clone(),
                    actual: cosignature.parent_hash.clone(),
                });
            }
        }

        let mut payload = self.payload_bytes()?;
        data_end(&payload)?;
        append_cosignatures(
            &mut payload,
            cosignatures.iter().map(CosignatureSignedTransaction::to_cosignature),
        )?;
        debug!(
            hash = %self.hash,
            count = cosignatures.len(),
            "cosignatures attached"
        );
        Ok(SignedTransaction {
            payload: hex::encode_upper(payload),
            ..self.clone()
        })
    }
}

// ---------------------------------------------------------------------------
// CosignatureSignedTransaction
// ---------------------------------------------------------------------------

/// One cosigner's signature over an aggregate's hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CosignatureSignedTransaction {
    pub parent_hash: String,
    pub signature: Signature,
    pub signer: PublicKey,
}

impl CosignatureSignedTransaction {
    pub fn to_cosignature(&self) -> Cosignature {
        Cosignature {
            signer: self.signer,
            signature: self.signature,
        }
    }
}

// ---------------------------------------------------------------------------
// Payload regions
// ---------------------------------------------------------------------------

fn read_u32(payload: &[u8], offset: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&payload[offset..offset + 4]);
    u32::from_le_bytes(word)
}

/// Checks the declared size and returns the end of the signed region.
pub(crate) fn data_end(payload: &[u8]) -> Result<usize, TransactionError> {
    if payload.len() < TRANSACTION_HEADER_SIZE {
        return Err(TransactionError::PayloadTooShort {
            minimum: TRANSACTION_HEADER_SIZE,
            actual: payload.len(),
        });
    }
    let declared = read_u32(payload, 0) as usize;
    if declared != payload.len() {
        return Err(TransactionError::SizeMismatch {
            declared,
            actual: payload.len(),
        });
    }

    let code = u16::from_le_bytes([payload[TYPE_OFFSET], payload[TYPE_OFFSET + 1]]);
    let is_aggregate = TransactionType::from_code(code).is_some_and(TransactionType::is_aggregate);
    if !is_aggregate {
        return Ok(payload.len());
    }

    let minimum = AGGREGATE_PAYLOAD_SIZE_OFFSET + 4;
    if payload.len() < minimum {
        return Err(TransactionError::PayloadTooShort {
            minimum,
            actual: payload.len(),
        });
    }
    let end = minimum + read_u32(payload, AGGREGATE_PAYLOAD_SIZE_OFFSET) as usize;
    if end > payload.len() || (payload.len() - end) % COSIGNATURE_LENGTH != 0 {
        return Err(TransactionError::SizeMismatch {
            declared: end,
            actual: payload.len(),
        });
    }
    Ok(end)
}

/// Transaction hash of a payload whose size has already been checked.
pub(crate) fn transaction_hash(
    payload: &[u8],
    end: usize,
    generation_hash: &GenerationHash,
    scheme: SignScheme,
) -> [u8; HASH_LENGTH] {
    scheme_hash_256(
        scheme,
        &[
            &payload[SIGNATURE_OFFSET..SIGNATURE_OFFSET + 32],
            &payload[SIGNER_OFFSET..SIGNED_DATA_OFFSET],
            generation_hash.as_bytes(),
            &payload[SIGNED_DATA_OFFSET..end],
        ],
    )
}

/// The message an initiator signs.
pub(crate) fn signing_data(payload: &[u8], end: usize, generation_hash: &GenerationHash) -> Vec<u8> {
    let mut data = Vec::with_capacity(HASH_LENGTH + end - SIGNED_DATA_OFFSET);
    data.extend_from_slice(generation_hash.as_bytes());
    data.extend_from_slice(&payload[SIGNED_DATA_OFFSET..end]);
    data
}

/// Signs `payload` in place: signature and signer regions are overwritten.
pub(crate) fn sign_payload(
    payload: &mut [u8],
    end: usize,
    key_pair: &KeyPair,
    generation_hash: &GenerationHash,
    scheme: SignScheme,
) -> PublicKey {
    let signer = key_pair.public_key(scheme);
    let signature = key_pair.sign(&signing_data(payload, end, generation_hash), scheme);
    payload[SIGNATURE_OFFSET..SIGNER_OFFSET].copy_from_slice(signature.as_bytes());
    payload[SIGNER_OFFSET..SIGNED_DATA_OFFSET].copy_from_slice(signer.as_bytes());
    signer
}

/// Appends cosignatures and rewrites the size field.
pub(crate) fn append_cosignatures(
    payload: &mut Vec<u8>,
    cosignatures: impl IntoIterator<Item = Cosignature>,
) -> Result<(), TransactionError> {
    for cosignature in cosignatures {
        payload.extend_from_slice(&cosignature.to_bytes());
    }
    let size = u32::try_from(payload.len()).map_err(|_| TransactionError::FieldTooLong {
        field: "size",
        max: u32::MAX as usize,
        actual: payload.len(),
    })?;
    payload[..4].copy_from_slice(&size.to_le_bytes());
    Ok(())
}

pub(crate) fn parse_hash(hash: &str) -> Result<[u8; HASH_LENGTH], TransactionError> {
    let bytes = hex::decode(hash)?;
    bytes
        .try_into()
        .map_err(|bytes: Vec<u8>| TransactionError::PayloadTooShort {
            minimum: HASH_LENGTH,
            actual: bytes.len(),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn header(size: u32, code: u16) -> Vec<u8> {
        let mut payload = vec![0u8; size as usize];
        payload[..4].copy_from_slice(&size.to_le_bytes());
        payload[TYPE_OFFSET..TYPE_OFFSET + 2].copy_from_slice(&code.to_le_bytes());
        payload
    }

    #[test]
    fn data_end_is_length_for_plain_transactions() {
        let payload = header(153, TransactionType::AccountLink.code());
        assert_eq!(data_end(&payload).unwrap(), 153);
    }

    #[test]
    fn data_end_excludes_cosignatures() {
        let mut payload = header(124 + 10 + 96, TransactionType::AggregateComplete.code());
        payload[120..124].copy_from_slice(&10u32.to_le_bytes());
        assert_eq!(data_end(&payload).unwrap(), 134);
    }

    #[test]
    fn short_and_mislabelled_payloads_are_rejected() {
        assert!(matches!(
            data_end(&[0u8; 50]),
            Err(TransactionError::PayloadTooShort { minimum: 120, actual: 50 })
        ));

        let mut payload = header(130, TransactionType::Transfer.code());
        payload[..4].copy_from_slice(&131u32.to_le_bytes());
        assert!(matches!(
            data_end(&payload),
            Err(TransactionError::SizeMismatch { declared: 131, actual: 130 })
        ));

        let mut aggregate = header(124 + 5, TransactionType::AggregateBonded.code());
        aggregate[120..124].copy_from_slice(&9u32.to_le_bytes());
        assert!(matches!(data_end(&aggregate), Err(TransactionError::SizeMismatch { .. })));
    }

    #[test]
    fn cosignatures_must_match_parent_hash() {
        let signed = SignedTransaction {
            payload: hex::encode_upper(header(124, TransactionType::AggregateBonded.code())),
            hash: "AA".repeat(32),
            signer: PublicKey::from_bytes([1u8; 32]),
            transaction_type: TransactionType::AggregateBonded,
            network_type: NetworkType::MijinTest,
        };
        let stray = CosignatureSignedTransaction {
            parent_hash: "BB".repeat(32),
            signature: Signature::from_bytes([0u8; 64]),
            signer: PublicKey::from_bytes([2u8; 32]),
        };
        assert!(matches!(
            signed.with_cosignatures(&[stray]),
            Err(TransactionError::ParentHashMismatch { .. })
        ));
    }

    #[test]
    fn signed_transaction_json_is_camel_case() {
        let signed = SignedTransaction {
            payload: "00".into(),
            hash: "AB".repeat(32),
            signer: PublicKey::from_bytes([1u8; 32]),
            transaction_type: TransactionType::Transfer,
            network_type: NetworkType::MijinTest,
        };
        let json = serde_json::to_value(&signed).unwrap();
        assert!(json.get("transactionType").is_some());
        assert!(json.get("networkType").is_some());
        let back: SignedTransaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, signed);
    }
}
