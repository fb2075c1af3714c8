//! Wide unsigned integer stored as two 32-bit words.
//!
//! Heights, fees, deadlines, amounts and ids are all 64-bit on the ledger,
//! and REST responses carry them as `[lower, higher]` word pairs. Keeping
//! the pair representation makes the wire encoding (`lower LE ‖ higher LE`)
//! and the JSON shape explicit, and all arithmetic here carries between
//! the words by hand.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UInt64Error {
    #[error("expected 16 hex digits, got {0:?}")]
    InvalidHex(String),

    #[error("expected 8 bytes, got {0}")]
    InvalidLength(usize),
}

/// 64-bit unsigned value as a `(lower, higher)` word pair.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct UInt64 {
    lower: u32,
    higher: u32,
}

impl UInt64 {
    pub const ZERO: Self = Self::new(0, 0);

    pub const fn new(lower: u32, higher: u32) -> Self {
        Self { lower, higher }
    }

    pub const fn from_u64(value: u64) -> Self {
        Self {
            lower: value as u32,
            higher: (value >> 32) as u32,
        }
    }

    pub const fn to_u64(self) -> u64 {
        ((self.higher as u64) << 32) | self.lower as u64
    }

    pub const fn lower(self) -> u32 {
        self.lower
    }

    pub const fn higher(self) -> u32 {
        self.higher
    }

    pub const fn is_zero(self) -> bool {
        self.lower == 0 && self.higher == 0
    }

    /// Wire form: low word little-endian, then high word little-endian.
    pub fn to_le_bytes(self) -> [u8; 8] {
        let mut out = [0u8; 8];
        out[..4].copy_from_slice(&self.lower.to_le_bytes());
        out[4..].copy_from_slice(&self.higher.to_le_bytes());
        out
    }

    pub fn from_le_slice(bytes: &[u8]) -> Result<Self, UInt64Error> {
        if bytes.len() != 8 {
            return Err(UInt64Error::InvalidLength(bytes.len()));
        }
        let mut lower = [0u8; 4];
        let mut higher = [0u8; 4];
        lower.copy_from_slice(&bytes[..4]);
        higher.copy_from_slice(&bytes[4..]);
        Ok(Self::new(u32::from_le_bytes(lower), u32::from_le_bytes(higher)))
    }

    /// 16 upper-case hex digits, most significant word first. This is how
    /// mosaic and namespace ids are displayed.
    pub fn to_hex(self) -> String {
        format!("{:08X}{:08X}", self.higher, self.lower)
    }

    pub fn from_hex(s: &str) -> Result<Self, UInt64Error> {
        if s.len() != 16 || !s.is_ascii() {
            return Err(UInt64Error::InvalidHex(s.to_string()));
        }
        let higher =
            u32::from_str_radix(&s[..8], 16).map_err(|_| UInt64Error::InvalidHex(s.to_string()))?;
        let lower =
            u32::from_str_radix(&s[8..], 16).map_err(|_| UInt64Error::InvalidHex(s.to_string()))?;
        Ok(Self::new(lower, higher))
    }

    /// Word-wise addition with carry. `None` on overflow.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        let (lower, carry) = self.lower.overflowing_add(other.lower);
        let higher = self
            .higher
            .checked_add(other.higher)?
            .checked_add(carry as u32)?;
        Some(Self::new(lower, higher))
    }

    /// Word-wise subtraction with borrow. `None` on underflow.
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        let (lower, borrow) = self.lower.overflowing_sub(other.lower);
        let higher = self
            .higher
            .checked_sub(other.higher)?
            .checked_sub(borrow as u32)?;
        Some(Self::new(lower, higher))
    }
}

impl Ord for UInt64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.higher
            .cmp(&other.higher)
            .then_with(|| self.lower.cmp(&other.lower))
    }
}

impl PartialOrd for UInt64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<[u32; 2]> for UInt64 {
    fn from(words: [u32; 2]) -> Self {
        Self::new(words[0], words[1])
    }
}

impl From<UInt64> for [u32; 2] {
    fn from(value: UInt64) -> Self {
        [value.lower, value.higher]
    }
}

impl From<u64> for UInt64 {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl fmt::Display for UInt64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_u64())
    }
}

impl fmt::Debug for UInt64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UInt64[{}, {}]", self.lower, self.higher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_roundtrip_through_u64() {
        let v = UInt64::from_u64(0x0123_4567_89AB_CDEF);
        assert_eq!(v.lower(), 0x89AB_CDEF);
        assert_eq!(v.higher(), 0x0123_4567);
        assert_eq!(v.to_u64(), 0x0123_4567_89AB_CDEF);
    }

    #[test]
    fn wire_bytes_are_low_word_first() {
        let v = UInt64::new(1, 2);
        assert_eq!(v.to_le_bytes(), [1, 0, 0, 0, 2, 0, 0, 0]);
        assert_eq!(UInt64::from_le_slice(&v.to_le_bytes()).unwrap(), v);
        assert_eq!(UInt64::from_le_slice(&[0; 7]), Err(UInt64Error::InvalidLength(7)));
    }

    #[test]
    fn ordering_is_word_pair_wise() {
        // A larger low word must not beat a larger high word.
        assert!(UInt64::new(u32::MAX, 0) < UInt64::new(0, 1));
        assert!(UInt64::new(1, 5) < UInt64::new(2, 5));
        assert_eq!(UInt64::new(3, 3).cmp(&UInt64::new(3, 3)), Ordering::Equal);
    }

    #[test]
    fn add_carries_into_high_word() {
        let a = UInt64::new(u32::MAX, 0);
        assert_eq!(a.checked_add(UInt64::new(1, 0)), Some(UInt64::new(0, 1)));
        assert_eq!(UInt64::new(0, u32::MAX).checked_add(UInt64::new(0, 1)), None);
        assert_eq!(
            UInt64::new(u32::MAX, u32::MAX).checked_add(UInt64::new(1, 0)),
            None
        );
    }

    #[test]
    fn sub_borrows_from_high_word() {
        let a = UInt64::new(0, 1);
        assert_eq!(a.checked_sub(UInt64::new(1, 0)), Some(UInt64::new(u32::MAX, 0)));
        assert_eq!(UInt64::ZERO.checked_sub(UInt64::new(1, 0)), None);
    }

    #[test]
    fn hex_is_high_word_first() {
        let v = UInt64::new(0x0000_0002, 0x85BB_EA6C);
        assert_eq!(v.to_hex(), "85BBEA6C00000002");
        assert_eq!(UInt64::from_hex("85BBEA6C00000002").unwrap(), v);
        assert!(UInt64::from_hex("xyz").is_err());
    }

    #[test]
    fn serde_uses_word_array() {
        let v = UInt64::new(10, 20);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[10,20]");
        let back: UInt64 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}
