//! # Cryptographic Primitives
//!
//! Everything that touches key material or digests flows through here:
//!
//! - **keys** — Ed25519 key pairs whose hash function is selected per call.
//! - **signatures** — verification, single and batched.
//! - **hash** — SHA3 / Keccak, plus the SHA-256 and RIPEMD-160 helpers that
//!   secret locks and address derivation need.
//!
//! Nothing here is hand-rolled: the curve comes from `ed25519-dalek`, the
//! digests from the RustCrypto crates.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{keccak_256, sha3_256, SignScheme};
pub use keys::{KeyError, KeyPair, PublicKey, Signature};
pub use signatures::{batch_verify, verify, SignatureError};
