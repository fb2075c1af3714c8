//! The encoded form of a transaction, and everything that operates on raw
//! payload bytes: hashing, signing, cosigning and embedding.

use tracing::debug;

use super::error::TransactionError;
use super::kinds::{body_attributes, Cosignature};
use super::signing::{
    append_cosignatures, data_end, parse_hash, sign_payload, transaction_hash,
    CosignatureSignedTransaction, SignedTransaction,
};
use super::types::TransactionType;
use crate::config::{
    EMBEDDED_HEADER_SIZE, HASH_LENGTH, SIGNED_DATA_OFFSET, SIGNER_OFFSET,
    TRANSACTION_HEADER_SIZE, TYPE_OFFSET,
};
use crate::crypto::{KeyPair, PublicKey, SignScheme};
use crate::layout::{Schema, Table};
use crate::model::{GenerationHash, NetworkType};

/// Canonical wire bytes of one transaction together with the schema that
/// produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiableTransaction {
    bytes: Vec<u8>,
    schema: Schema,
    transaction_type: TransactionType,
}

impl VerifiableTransaction {
    pub(crate) fn new(bytes: Vec<u8>, schema: Schema, transaction_type: TransactionType) -> Self {
        Self {
            bytes,
            schema,
            transaction_type,
        }
    }

    /// Wraps a payload received from elsewhere, e.g. a node or a peer
    /// collecting signatures. The schema is chosen from the type field.
    pub fn from_payload(bytes: Vec<u8>) -> Result<Self, TransactionError> {
        data_end(&bytes)?;
        let code = u16::from_le_bytes([bytes[TYPE_OFFSET], bytes[TYPE_OFFSET + 1]]);
        let transaction_type =
            TransactionType::from_code(code).ok_or(TransactionError::UnknownTransactionType(code))?;
        let attributes = body_attributes(transaction_type, &bytes[TRANSACTION_HEADER_SIZE..])?;
        Ok(Self::new(bytes, Schema::transaction(attributes), transaction_type))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(&self.bytes)
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Network byte from the `version` field.
    pub fn network_type(&self) -> Result<NetworkType, TransactionError> {
        let raw = u16::from_le_bytes([self.bytes[SIGNED_DATA_OFFSET], self.bytes[SIGNED_DATA_OFFSET + 1]]);
        Ok(NetworkType::split_entity_version(raw)?.0)
    }

    /// Decodes the payload back into a table keyed by attribute name.
    pub fn decode(&self) -> Result<Table, TransactionError> {
        Ok(self.schema.deserialize(&self.bytes)?)
    }

    // -- hashing and signing -------------------------------------------------

    /// Hash of any full payload under `scheme`.
    ///
    /// Covers the first half of the signature, the signer, the generation
    /// hash and the signed data region. Aggregate cosignatures are excluded.
    pub fn create_transaction_hash(
        payload: &[u8],
        generation_hash: &GenerationHash,
        scheme: SignScheme,
    ) -> Result<[u8; HASH_LENGTH], TransactionError> {
        let end = data_end(payload)?;
        Ok(transaction_hash(payload, end, generation_hash, scheme))
    }

    /// Signs with `key_pair` for the network identified by `generation_hash`.
    pub fn sign_transaction(
        &self,
        key_pair: &KeyPair,
        generation_hash: &GenerationHash,
        scheme: SignScheme,
    ) -> Result<SignedTransaction, TransactionError> {
        let mut payload = self.bytes.clone();
        let end = data_end(&payload)?;
        let signer = sign_payload(&mut payload, end, key_pair, generation_hash, scheme);
        let hash = transaction_hash(&payload, end, generation_hash, scheme);
        let signed = SignedTransaction {
            payload: hex::encode_upper(&payload),
            hash: hex::encode_upper(hash),
            signer,
            transaction_type: self.transaction_type,
            network_type: self.network_type()?,
        };
        debug!(
            tx_type = %self.transaction_type,
            hash = %signed.hash,
            signer = %signer,
            %scheme,
            "transaction signed"
        );
        Ok(signed)
    }

    /// Signs an aggregate as initiator and appends one cosignature per
    /// `cosigners` entry, in order.
    pub fn sign_transaction_with_cosignatories(
        &self,
        initiator: &KeyPair,
        cosigners: &[KeyPair],
        generation_hash: &GenerationHash,
        scheme: SignScheme,
    ) -> Result<SignedTransaction, TransactionError> {
        if !self.transaction_type.is_aggregate() {
            return Err(TransactionError::NotAggregate(self.transaction_type));
        }
        let signed = self.sign_transaction(initiator, generation_hash, scheme)?;
        let hash = signed.hash_bytes()?;
        let cosignatures = cosigners.iter().map(|cosigner| Cosignature {
            signer: cosigner.public_key(scheme),
            signature: cosigner.sign(&hash, scheme),
        });

        let mut payload = signed.payload_bytes()?;
        append_cosignatures(&mut payload, cosignatures)?;
        debug!(
            hash = %signed.hash,
            cosigners = cosigners.len(),
            "aggregate cosigned"
        );
        Ok(SignedTransaction {
            payload: hex::encode_upper(payload),
            ..signed
        })
    }

    /// Cosigns the aggregate whose hash is `parent_hash` (hex).
    pub fn sign_cosignatories_transaction(
        key_pair: &KeyPair,
        parent_hash: &str,
        scheme: SignScheme,
    ) -> Result<CosignatureSignedTransaction, TransactionError> {
        let hash = parse_hash(parent_hash)?;
        Ok(CosignatureSignedTransaction {
            parent_hash: hex::encode_upper(hash),
            signature: key_pair.sign(&hash, scheme),
            signer: key_pair.public_key(scheme),
        })
    }

    // -- embedding -----------------------------------------------------------

    /// Embedded form for inclusion in an aggregate:
    /// `size | signer | version | type | body`.
    ///
    /// `signer` replaces the signer region; without it the payload's own
    /// signer bytes are kept.
    pub fn to_aggregate_transaction(&self, signer: Option<&PublicKey>) -> Result<Vec<u8>, TransactionError> {
        if self.bytes.len() < TRANSACTION_HEADER_SIZE {
            return Err(TransactionError::PayloadTooShort {
                minimum: TRANSACTION_HEADER_SIZE,
                actual: self.bytes.len(),
            });
        }
        let body = &self.bytes[TRANSACTION_HEADER_SIZE..];
        let size = EMBEDDED_HEADER_SIZE + body.len();
        let declared = u32::try_from(size).map_err(|_| TransactionError::FieldTooLong {
            field: "size",
            max: u32::MAX as usize,
            actual: size,
        })?;

        let mut out = Vec::with_capacity(size);
        out.extend_from_slice(&declared.to_le_bytes());
        match signer {
            Some(key) => out.extend_from_slice(key.as_bytes()),
            None => out.extend_from_slice(&self.bytes[SIGNER_OFFSET..SIGNED_DATA_OFFSET]),
        }
        // version and type
        out.extend_from_slice(&self.bytes[SIGNED_DATA_OFFSET..SIGNED_DATA_OFFSET + 4]);
        out.extend_from_slice(body);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{sha3_256, verify};
    use crate::model::{Address, UInt64};
    use crate::transaction::builder::TransactionBuilder;
    use crate::transaction::kinds::{
        AccountLinkTransaction, AggregateTransaction, LinkAction, Recipient, TransferTransaction,
    };

    const GENERATION_HASH: &str = "7B631D803F912B00DC0CBED3014BBD17A302BA50B99D233B9C2D9533B842ABDF";

    fn generation_hash() -> GenerationHash {
        GenerationHash::from_hex(GENERATION_HASH).unwrap()
    }

    fn link() -> VerifiableTransaction {
        TransactionBuilder::new(NetworkType::MijinTest)
            .build(AccountLinkTransaction::new(PublicKey::from_bytes([5u8; 32]), LinkAction::Link))
            .build_transaction()
            .unwrap()
    }

    #[test]
    fn hash_covers_documented_regions() {
        let tx = link();
        let bytes = tx.bytes();
        let mut material = Vec::new();
        material.extend_from_slice(&bytes[4..36]);
        material.extend_from_slice(&bytes[68..100]);
        material.extend_from_slice(generation_hash().as_bytes());
        material.extend_from_slice(&bytes[100..]);
        let hash =
            VerifiableTransaction::create_transaction_hash(bytes, &generation_hash(), SignScheme::Sha3)
                .unwrap();
        assert_eq!(hash, sha3_256(&material));
    }

    #[test]
    fn schemes_hash_differently() {
        let tx = link();
        let sha3 =
            VerifiableTransaction::create_transaction_hash(tx.bytes(), &generation_hash(), SignScheme::Sha3)
                .unwrap();
        let keccak = VerifiableTransaction::create_transaction_hash(
            tx.bytes(),
            &generation_hash(),
            SignScheme::KeccakReversedKey,
        )
        .unwrap();
        assert_ne!(sha3, keccak);
    }

    #[test]
    fn signing_fills_signature_and_signer() {
        let kp = KeyPair::generate();
        let tx = link();
        let signed = tx.sign_transaction(&kp, &generation_hash(), SignScheme::Sha3).unwrap();
        let payload = signed.payload_bytes().unwrap();

        assert_eq!(payload.len(), 153);
        assert_eq!(signed.payload, signed.payload.to_uppercase());
        assert_eq!(signed.hash.len(), 64);
        assert_eq!(&payload[68..100], kp.public_key(SignScheme::Sha3).as_bytes());
        assert_eq!(signed.network_type, NetworkType::MijinTest);
        assert_eq!(signed.transaction_type, TransactionType::AccountLink);

        let mut message = generation_hash().as_bytes().to_vec();
        message.extend_from_slice(&payload[100..]);
        let signature = crate::crypto::Signature::try_from_slice(&payload[4..68]).unwrap();
        assert!(verify(&signed.signer, &message, &signature, SignScheme::Sha3));

        let recomputed =
            VerifiableTransaction::create_transaction_hash(&payload, &generation_hash(), SignScheme::Sha3)
                .unwrap();
        assert_eq!(hex::encode_upper(recomputed), signed.hash);
    }

    #[test]
    fn signing_is_deterministic() {
        let kp = KeyPair::from_private_key([3u8; 32]);
        let tx = link();
        let a = tx.sign_transaction(&kp, &generation_hash(), SignScheme::KeccakReversedKey).unwrap();
        let b = tx.sign_transaction(&kp, &generation_hash(), SignScheme::KeccakReversedKey).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn embedding_keeps_body_and_replaces_signer() {
        let tx = link();
        let signer = PublicKey::from_bytes([9u8; 32]);
        let embedded = tx.to_aggregate_transaction(Some(&signer)).unwrap();
        assert_eq!(embedded.len(), 40 + 33);
        assert_eq!(&embedded[..4], &73u32.to_le_bytes());
        assert_eq!(&embedded[4..36], signer.as_bytes());
        assert_eq!(&embedded[36..40], &tx.bytes()[100..104]);
        assert_eq!(&embedded[40..], &tx.bytes()[120..]);

        let kept = tx.to_aggregate_transaction(None).unwrap();
        assert_eq!(&kept[4..36], &[0u8; 32]);
    }

    #[test]
    fn cosignatures_leave_hash_unchanged() {
        let inner = TransactionBuilder::new(NetworkType::MijinTest)
            .signer(PublicKey::from_bytes([1u8; 32]))
            .build(TransferTransaction::new(Recipient::Address(Address::from_raw([0x90; 25]))));
        let aggregate = TransactionBuilder::new(NetworkType::MijinTest)
            .max_fee(UInt64::from_u64(0))
            .build(AggregateTransaction::complete(vec![inner]))
            .build_transaction()
            .unwrap();

        let initiator = KeyPair::generate();
        let cosigners = [KeyPair::generate(), KeyPair::generate()];
        let plain = aggregate.sign_transaction(&initiator, &generation_hash(), SignScheme::Sha3).unwrap();
        let cosigned = aggregate
            .sign_transaction_with_cosignatories(&initiator, &cosigners, &generation_hash(), SignScheme::Sha3)
            .unwrap();

        assert_eq!(plain.hash, cosigned.hash);
        let payload = cosigned.payload_bytes().unwrap();
        assert_eq!(payload.len(), aggregate.bytes().len() + 2 * 96);
        assert_eq!(&payload[..4], &(payload.len() as u32).to_le_bytes());
        let recomputed =
            VerifiableTransaction::create_transaction_hash(&payload, &generation_hash(), SignScheme::Sha3)
                .unwrap();
        assert_eq!(hex::encode_upper(recomputed), cosigned.hash);
    }

    #[test]
    fn cosigning_requires_an_aggregate() {
        let kp = KeyPair::generate();
        assert!(matches!(
            link().sign_transaction_with_cosignatories(&kp, &[], &generation_hash(), SignScheme::Sha3),
            Err(TransactionError::NotAggregate(TransactionType::AccountLink))
        ));
    }

    #[test]
    fn cosignature_signs_parent_hash() {
        let kp = KeyPair::generate();
        let parent = "ab".repeat(32);
        let cosig =
            VerifiableTransaction::sign_cosignatories_transaction(&kp, &parent, SignScheme::Sha3).unwrap();
        assert_eq!(cosig.parent_hash, parent.to_uppercase());
        assert!(verify(&cosig.signer, &[0xAB; 32], &cosig.signature, SignScheme::Sha3));
        assert!(VerifiableTransaction::sign_cosignatories_transaction(&kp, "abcd", SignScheme::Sha3).is_err());
    }

    #[test]
    fn payload_round_trips_through_from_payload() {
        let tx = link();
        let reparsed = VerifiableTransaction::from_payload(tx.bytes().to_vec()).unwrap();
        assert_eq!(reparsed, tx);
        assert_eq!(reparsed.decode().unwrap().u8("linkAction").unwrap(), 0);
    }
}
