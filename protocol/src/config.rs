//! # Protocol Configuration & Constants
//!
//! Every fixed width, offset and epoch the wire format depends on lives here.
//! A node re-derives all of these independently, so a constant that drifts
//! from the ledger's value produces transactions that are silently rejected.
//!
//! Runtime parameters (network type, generation hash, sign scheme) are not
//! configuration: callers pass them explicitly at each call site.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Primitive widths
// ---------------------------------------------------------------------------

/// Width of the leading `size` field of every entity.
pub const SIZE_FIELD_LENGTH: usize = 4;

/// Ed25519 signature length.
pub const SIGNATURE_LENGTH: usize = 64;

/// Ed25519 public key length.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 private key (seed) length.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Raw (decoded) address length: network byte, 20-byte RIPEMD-160, 4-byte checksum.
pub const ADDRESS_LENGTH: usize = 25;

/// SHA3-256 / Keccak-256 output, used for transaction hashes and generation hashes.
pub const HASH_LENGTH: usize = 32;

/// A mosaic entry on the wire: 8-byte id followed by 8-byte amount.
pub const MOSAIC_LENGTH: usize = 16;

/// A cosignature appended to an aggregate: signer key followed by signature.
pub const COSIGNATURE_LENGTH: usize = PUBLIC_KEY_LENGTH + SIGNATURE_LENGTH;

// ---------------------------------------------------------------------------
// Header layout
// ---------------------------------------------------------------------------

/// Offset of the signature region inside a full transaction.
pub const SIGNATURE_OFFSET: usize = SIZE_FIELD_LENGTH;

/// Offset of the signer region inside a full transaction.
pub const SIGNER_OFFSET: usize = SIGNATURE_OFFSET + SIGNATURE_LENGTH;

/// First byte after the size/signature/signer prefix. Everything from here on
/// is what gets signed.
pub const SIGNED_DATA_OFFSET: usize = SIGNER_OFFSET + PUBLIC_KEY_LENGTH;

/// `size | signature | signer | version u16 | type u16 | max_fee 8 | deadline 8`.
pub const TRANSACTION_HEADER_SIZE: usize = SIGNED_DATA_OFFSET + 2 + 2 + 8 + 8;

/// `size | signer | version u16 | type u16`.
pub const EMBEDDED_HEADER_SIZE: usize = SIZE_FIELD_LENGTH + PUBLIC_KEY_LENGTH + 2 + 2;

/// Offset of the `type` field inside a full transaction.
pub const TYPE_OFFSET: usize = SIGNED_DATA_OFFSET + 2;

/// Offset of the `type` field inside an embedded transaction.
pub const EMBEDDED_TYPE_OFFSET: usize = SIZE_FIELD_LENGTH + PUBLIC_KEY_LENGTH + 2;

/// Offset of the aggregate `payloadSize` field; inner transactions follow it.
pub const AGGREGATE_PAYLOAD_SIZE_OFFSET: usize = TRANSACTION_HEADER_SIZE;

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Network epoch (2016-04-01T00:00:00Z) in Unix milliseconds. Deadlines are
/// expressed relative to this instant.
pub const NETWORK_EPOCH_MILLIS: i64 = 1_459_468_800_000;

/// Deadline applied by [`crate::transaction::TransactionBuilder`] when the
/// caller does not set one.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(2 * 60 * 60);

/// Nodes reject deadlines further out than this.
pub const MAX_DEADLINE: Duration = Duration::from_secs(24 * 60 * 60);

// ---------------------------------------------------------------------------
// Encoding details
// ---------------------------------------------------------------------------

/// First byte of a recipient that refers to a namespace alias rather than an
/// address. The namespace id follows, then zero padding up to 25 bytes.
pub const NAMESPACE_RECIPIENT_PREFIX: u8 = 0x91;

/// Mosaic property id of the optional duration entry.
pub const MOSAIC_DURATION_PROPERTY_ID: u8 = 0x02;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_sizes_match_wire_format() {
        assert_eq!(SIGNED_DATA_OFFSET, 100);
        assert_eq!(TRANSACTION_HEADER_SIZE, 120);
        assert_eq!(EMBEDDED_HEADER_SIZE, 40);
        assert_eq!(TYPE_OFFSET, 102);
        assert_eq!(EMBEDDED_TYPE_OFFSET, 38);
    }

    #[test]
    fn default_deadline_within_limit() {
        assert!(DEFAULT_DEADLINE <= MAX_DEADLINE);
    }
}
