// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Sirius Protocol — Transaction Core
//!
//! Client-side core for a Catapult-family ledger: everything between "I want
//! to transfer a mosaic" and a signed payload a node will accept, plus the
//! check that tells an aggregate's initiator whether enough cosigners have
//! signed.
//!
//! ## Architecture
//!
//! The crate is split along the path a transaction takes:
//!
//! - **config** — Wire offsets, field lengths and deadline bounds.
//! - **crypto** — Ed25519 under the SHA3 and Keccak conventions, and the
//!   hash primitives used for transaction hashes and secret locks.
//! - **model** — Value types: 64-bit ids, network identifiers, addresses,
//!   mosaics, namespaces, deadlines, multisig graphs.
//! - **layout** — The binary layout descriptor. Ordered attribute lists
//!   that drive both encoding and decoding.
//! - **transaction** — Builders for every transaction kind, the verifiable
//!   (encoded) form, signing, cosigning and verification.
//! - **service** — Aggregate completeness against multisig graphs supplied
//!   by the caller.
//!
//! ## Design Philosophy
//!
//! 1. Bytes are exact. Every kind computes its size analytically and the
//!    encoder refuses to produce anything else.
//! 2. The sign scheme is always an explicit argument. Nothing guesses it.
//! 3. No I/O in the core. Chain state arrives through traits.
//! 4. If it touches a signature, it has tests.

pub mod config;
pub mod crypto;
pub mod layout;
pub mod model;
pub mod service;
pub mod transaction;
