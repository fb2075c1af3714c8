//! Verification of signed payloads.
//!
//! [`verify_signed_transaction`] re-derives everything a
//! [`SignedTransaction`] claims from its payload bytes. The checks are
//! ordered from cheapest to most expensive so that malformed input fails
//! before any curve arithmetic runs.

use tracing::warn;

use super::error::TransactionError;
use super::signing::{data_end, signing_data, transaction_hash, SignedTransaction};
use crate::config::{
    COSIGNATURE_LENGTH, PUBLIC_KEY_LENGTH, SIGNATURE_OFFSET, SIGNED_DATA_OFFSET, SIGNER_OFFSET,
};
use crate::crypto::{batch_verify, verify, PublicKey, SignScheme, Signature, SignatureError};
use crate::model::GenerationHash;

/// Verifies a signed transaction against the network's generation hash.
///
/// The checks, in order:
///
/// 1. **Size** — the header size equals the payload length; aggregates
///    leave a whole number of cosignatures after the embedded region.
/// 2. **Hash** — recomputing the hash reproduces `signed.hash`.
/// 3. **Signer** — the signer region matches `signed.signer`.
/// 4. **Signature** — the initiator's signature verifies over the
///    generation hash and signed data.
/// 5. **Cosignatures** — each trailing cosignature verifies over the hash.
///
/// # Errors
///
/// Returns the first failing check.
pub fn verify_signed_transaction(
    signed: &SignedTransaction,
    generation_hash: &GenerationHash,
    scheme: SignScheme,
) -> Result<(), TransactionError> {
    let payload = signed.payload_bytes()?;

    // 1. Size.
    let end = data_end(&payload)?;

    // 2. Hash.
    let computed = hex::encode_upper(transaction_hash(&payload, end, generation_hash, scheme));
    if !computed.eq_ignore_ascii_case(&signed.hash) {
        return Err(TransactionError::HashMismatch {
            computed,
            recorded: signed.hash.clone(),
        });
    }

    // 3. Signer.
    let signer = PublicKey::try_from_slice(&payload[SIGNER_OFFSET..SIGNED_DATA_OFFSET])?;
    if signer != signed.signer {
        return Err(TransactionError::SignerMismatch {
            payload: signer,
            recorded: signed.signer,
        });
    }

    // 4. Initiator signature.
    let signature = Signature::try_from_slice(&payload[SIGNATURE_OFFSET..SIGNER_OFFSET])?;
    if !verify(&signer, &signing_data(&payload, end, generation_hash), &signature, scheme) {
        warn!(hash = %signed.hash, signer = %signer, "initiator signature rejected");
        return Err(SignatureError::VerificationFailed { signer }.into());
    }

    // 5. Cosignatures, all over the same hash.
    let cosignatures = payload[end..]
        .chunks_exact(COSIGNATURE_LENGTH)
        .map(|chunk| {
            Ok((
                PublicKey::try_from_slice(&chunk[..PUBLIC_KEY_LENGTH])?,
                Signature::try_from_slice(&chunk[PUBLIC_KEY_LENGTH..])?,
            ))
        })
        .collect::<Result<Vec<_>, TransactionError>>()?;
    if !cosignatures.is_empty() {
        let hash = signed.hash_bytes()?;
        if let Err(e) = batch_verify(&hash, &cosignatures, scheme) {
            warn!(hash = %signed.hash, error = %e, "cosignature rejected");
            return Err(e.into());
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::KeyPair;
    use crate::model::{Address, NetworkType};
    use crate::transaction::builder::TransactionBuilder;
    use crate::transaction::kinds::{AggregateTransaction, Recipient, TransferTransaction};
    use crate::transaction::verifiable::VerifiableTransaction;

    fn generation_hash() -> GenerationHash {
        GenerationHash::from_bytes([0x42; 32])
    }

    fn transfer() -> VerifiableTransaction {
        TransactionBuilder::new(NetworkType::MijinTest)
            .build(TransferTransaction::new(Recipient::Address(Address::from_raw([0x90; 25]))))
            .build_transaction()
            .unwrap()
    }

    fn signed_aggregate(scheme: SignScheme) -> SignedTransaction {
        let inner = TransactionBuilder::new(NetworkType::MijinTest)
            .signer(PublicKey::from_bytes([1u8; 32]))
            .build(TransferTransaction::new(Recipient::Address(Address::from_raw([0x90; 25]))));
        TransactionBuilder::new(NetworkType::MijinTest)
            .build(AggregateTransaction::complete(vec![inner]))
            .build_transaction()
            .unwrap()
            .sign_transaction_with_cosignatories(
                &KeyPair::generate(),
                &[KeyPair::generate(), KeyPair::generate()],
                &generation_hash(),
                scheme,
            )
            .unwrap()
    }

    #[test]
    fn valid_transaction_passes() {
        for scheme in [SignScheme::Sha3, SignScheme::KeccakReversedKey] {
            let signed = transfer()
                .sign_transaction(&KeyPair::generate(), &generation_hash(), scheme)
                .unwrap();
            verify_signed_transaction(&signed, &generation_hash(), scheme).unwrap();
        }
    }

    #[test]
    fn cosigned_aggregate_passes() {
        let signed = signed_aggregate(SignScheme::KeccakReversedKey);
        verify_signed_transaction(&signed, &generation_hash(), SignScheme::KeccakReversedKey).unwrap();
    }

    #[test]
    fn rejects_other_network() {
        let signed = transfer()
            .sign_transaction(&KeyPair::generate(), &generation_hash(), SignScheme::Sha3)
            .unwrap();
        let other = GenerationHash::from_bytes([0x43; 32]);
        assert!(matches!(
            verify_signed_transaction(&signed, &other, SignScheme::Sha3),
            Err(TransactionError::HashMismatch { .. })
        ));
    }

    #[test]
    fn rejects_wrong_scheme() {
        let signed = transfer()
            .sign_transaction(&KeyPair::generate(), &generation_hash(), SignScheme::Sha3)
            .unwrap();
        assert!(verify_signed_transaction(&signed, &generation_hash(), SignScheme::KeccakReversedKey).is_err());
    }

    #[test]
    fn rejects_tampered_body() {
        let mut signed = transfer()
            .sign_transaction(&KeyPair::generate(), &generation_hash(), SignScheme::Sha3)
            .unwrap();
        let mut payload = signed.payload_bytes().unwrap();
        let last = payload.len() - 1;
        payload[last] ^= 0xFF;
        signed.payload = hex::encode_upper(&payload);
        // Re-derive the hash so only the signature check can catch it.
        signed.hash = hex::encode_upper(
            VerifiableTransaction::create_transaction_hash(&payload, &generation_hash(), SignScheme::Sha3)
                .unwrap(),
        );
        assert!(matches!(
            verify_signed_transaction(&signed, &generation_hash(), SignScheme::Sha3),
            Err(TransactionError::Signature(SignatureError::VerificationFailed { .. }))
        ));
    }

    #[test]
    fn rejects_recorded_signer_swap() {
        let mut signed = transfer()
            .sign_transaction(&KeyPair::generate(), &generation_hash(), SignScheme::Sha3)
            .unwrap();
        signed.signer = KeyPair::generate().public_key(SignScheme::Sha3);
        assert!(matches!(
            verify_signed_transaction(&signed, &generation_hash(), SignScheme::Sha3),
            Err(TransactionError::SignerMismatch { .. })
        ));
    }

    #[test]
    fn rejects_forged_cosignature() {
        let mut signed = signed_aggregate(SignScheme::Sha3);
        let mut payload = signed.payload_bytes().unwrap();
        let last = payload.len() - 1;
        payload[last] ^= 0x01;
        signed.payload = hex::encode_upper(&payload);
        assert!(matches!(
            verify_signed_transaction(&signed, &generation_hash(), SignScheme::Sha3),
            Err(TransactionError::Signature(SignatureError::VerificationFailed { .. }))
        ));
    }
}
