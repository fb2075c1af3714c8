//! # Signature Verification
//!
//! Verification counterpart of [`KeyPair::sign`](super::keys::KeyPair::sign).
//! The challenge hash must match the scheme the signer used, so the scheme is
//! an explicit argument everywhere.

use ed25519_dalek::hazmat::raw_verify;
use ed25519_dalek::{Signature as DalekSignature, VerifyingKey};
use sha3::{Keccak512, Sha3_512};
use thiserror::Error;

use super::hash::SignScheme;
use super::keys::{PublicKey, Signature};

/// Errors during signature checks.
#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("signature by {signer} does not verify")]
    VerificationFailed { signer: PublicKey },
}

/// Verifies `signature` over `message` against `public_key` under `scheme`.
///
/// Returns `false` for any failure, including a public key that is not a
/// valid curve point.
pub fn verify(
    public_key: &PublicKey,
    message: &[u8],
    signature: &Signature,
    scheme: SignScheme,
) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(public_key.as_bytes()) else {
        return false;
    };
    let signature = DalekSignature::from_bytes(signature.as_bytes());
    match scheme {
        SignScheme::Sha3 => raw_verify::<Sha3_512>(&verifying_key, message, &signature).is_ok(),
        SignScheme::KeccakReversedKey => {
            raw_verify::<Keccak512>(&verifying_key, message, &signature).is_ok()
        }
    }
}

/// Verifies several `(signer, signature)` pairs over one message.
///
/// Used for aggregate cosignatures, which all sign the same transaction hash.
/// Reports the first signer that fails.
pub fn batch_verify(
    message: &[u8],
    items: &[(PublicKey, Signature)],
    scheme: SignScheme,
) -> Result<(), SignatureError> {
    for (signer, signature) in items {
        if !verify(signer, message, signature, scheme) {
            return Err(SignatureError::VerificationFailed { signer: *signer });
        }
    }
    Ok(())
}
