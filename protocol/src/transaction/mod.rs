//! # Transaction Module
//!
//! Construction, encoding, signing and verification of ledger transactions.
//! Every account operation on the network (transfers, namespace and mosaic
//! management, multisig changes, locks, metadata) is a [`Transaction`] with
//! a kind-specific [`TransactionBody`].
//!
//! ## Architecture
//!
//! ```text
//! types.rs        — TransactionType codes and entity versions
//! builder.rs      — TransactionBuilder, Transaction, the BodyLayout trait
//! kinds/          — One body struct per transaction kind
//! verifiable.rs   — Encoded bytes: hash, sign, cosign, embed, decode
//! signing.rs      — SignedTransaction and the signed payload regions
//! payload.rs      — Decoding of signed aggregate payloads
//! verification.rs — Re-derivation checks on signed payloads
//! error.rs        — TransactionError
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build** — [`TransactionBuilder`] collects the header fields and takes
//!    the body in its terminal `build`.
//! 2. **Encode** — [`Transaction::build_transaction`] lays the transaction
//!    out and returns a [`VerifiableTransaction`].
//! 3. **Sign** — [`VerifiableTransaction::sign_transaction`] produces a
//!    [`SignedTransaction`] for one network (generation hash) and sign
//!    scheme.
//! 4. **Cosign** — aggregates collect [`CosignatureSignedTransaction`]s,
//!    either at signing time or afterwards via
//!    [`SignedTransaction::with_cosignatures`].
//! 5. **Verify** — [`verify_signed_transaction`] re-derives hash, signer and
//!    signatures from the payload.
//!
//! ## Design Decisions
//!
//! - Layouts are data ([`crate::layout::Schema`]), shared by the encoder and
//!   the decoder, so the two cannot drift apart.
//! - Sizes are computed analytically per kind and checked against the
//!   encoded length; a mismatch is an error, never a silent truncation.
//! - Aggregate cosignatures sit outside the hashed region. Attaching them
//!   never changes the transaction hash.

pub mod builder;
pub mod error;
pub mod kinds;
pub mod payload;
pub mod signing;
pub mod types;
pub mod verifiable;
pub mod verification;

pub use builder::{BodyLayout, Transaction, TransactionBody, TransactionBuilder, TransactionInfo};
pub use error::TransactionError;
pub use kinds::*;
pub use payload::{decode_aggregate, AggregatePayload, EmbeddedTransaction};
pub use signing::{CosignatureSignedTransaction, SignedTransaction};
pub use types::TransactionType;
pub use verifiable::VerifiableTransaction;
pub use verification::verify_signed_transaction;
