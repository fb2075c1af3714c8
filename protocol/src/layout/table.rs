//! Named intermediate values that a [`Schema`](super::Schema) turns into
//! bytes, or recovers from them.

use std::collections::BTreeMap;

use super::LayoutError;
use crate::model::UInt64;

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Little-endian integer bytes; the schema fixes the width.
    Scalar(Vec<u8>),
    /// Raw vector for array and string attributes.
    Bytes(Vec<u8>),
    Table(Table),
    Tables(Vec<Table>),
}

impl Value {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Bytes(_) => "bytes",
            Self::Table(_) => "table",
            Self::Tables(_) => "table array",
        }
    }
}

/// Attribute values keyed by name. Insertion order does not matter; the
/// schema decides the byte order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    values: BTreeMap<&'static str, Value>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &'static str, value: Value) -> &mut Self {
        self.values.insert(name, value);
        self
    }

    pub fn put_u8(&mut self, name: &'static str, value: u8) -> &mut Self {
        self.insert(name, Value::Scalar(vec![value]))
    }

    pub fn put_u16(&mut self, name: &'static str, value: u16) -> &mut Self {
        self.insert(name, Value::Scalar(value.to_le_bytes().to_vec()))
    }

    pub fn put_u32(&mut self, name: &'static str, value: u32) -> &mut Self {
        self.insert(name, Value::Scalar(value.to_le_bytes().to_vec()))
    }

    /// Word-pair values travel as two-element `u32` arrays.
    pub fn put_uint64(&mut self, name: &'static str, value: UInt64) -> &mut Self {
        self.insert(name, Value::Bytes(value.to_le_bytes().to_vec()))
    }

    pub fn put_bytes(&mut self, name: &'static str, bytes: impl Into<Vec<u8>>) -> &mut Self {
        self.insert(name, Value::Bytes(bytes.into()))
    }

    pub fn put_table(&mut self, name: &'static str, table: Table) -> &mut Self {
        self.insert(name, Value::Table(table))
    }

    pub fn put_tables(&mut self, name: &'static str, tables: Vec<Table>) -> &mut Self {
        self.insert(name, Value::Tables(tables))
    }

    pub fn get(&self, name: &'static str) -> Result<&Value, LayoutError> {
        self.values
            .get(name)
            .ok_or(LayoutError::MissingAttribute(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    // -- typed reads ---------------------------------------------------------

    pub fn scalar(&self, name: &'static str) -> Result<&[u8], LayoutError> {
        match self.get(name)? {
            Value::Scalar(bytes) => Ok(bytes),
            _ => Err(LayoutError::KindMismatch {
                name,
                expected: "scalar",
            }),
        }
    }

    /// A scalar of any width up to 8 bytes, widened to `u64`.
    pub fn scalar_u64(&self, name: &'static str) -> Result<u64, LayoutError> {
        let bytes = self.scalar(name)?;
        if bytes.len() > 8 {
            return Err(LayoutError::WidthMismatch {
                name,
                expected: 8,
                actual: bytes.len(),
            });
        }
        Ok(bytes
            .iter()
            .rev()
            .fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
    }

    pub fn u8(&self, name: &'static str) -> Result<u8, LayoutError> {
        let bytes: [u8; 1] = self.fixed_scalar(name)?;
        Ok(bytes[0])
    }

    pub fn u16(&self, name: &'static str) -> Result<u16, LayoutError> {
        Ok(u16::from_le_bytes(self.fixed_scalar(name)?))
    }

    pub fn u32(&self, name: &'static str) -> Result<u32, LayoutError> {
        Ok(u32::from_le_bytes(self.fixed_scalar(name)?))
    }

    pub fn bytes(&self, name: &'static str) -> Result<&[u8], LayoutError> {
        match self.get(name)? {
            Value::Bytes(bytes) => Ok(bytes),
            _ => Err(LayoutError::KindMismatch {
                name,
                expected: "bytes",
            }),
        }
    }

    /// A byte array of exactly `N` bytes.
    pub fn byte_array<const N: usize>(&self, name: &'static str) -> Result<[u8; N], LayoutError> {
        let bytes = self.bytes(name)?;
        bytes.try_into().map_err(|_| LayoutError::WidthMismatch {
            name,
            expected: N,
            actual: bytes.len(),
        })
    }

    pub fn uint64(&self, name: &'static str) -> Result<UInt64, LayoutError> {
        let bytes = self.bytes(name)?;
        UInt64::from_le_slice(bytes).map_err(|_| LayoutError::WidthMismatch {
            name,
            expected: 8,
            actual: bytes.len(),
        })
    }

    pub fn table(&self, name: &'static str) -> Result<&Table, LayoutError> {
        match self.get(name)? {
            Value::Table(table) => Ok(table),
            _ => Err(LayoutError::KindMismatch {
                name,
                expected: "table",
            }),
        }
    }

    pub fn tables(&self, name: &'static str) -> Result<&[Table], LayoutError> {
        match self.get(name)? {
            Value::Tables(tables) => Ok(tables),
            _ => Err(LayoutError::KindMismatch {
                name,
                expected: "table array",
            }),
        }
    }

    fn fixed_scalar<const N: usize>(&self, name: &'static str) -> Result<[u8; N], LayoutError> {
        let bytes = self.scalar(name)?;
        bytes.try_into().map_err(|_| LayoutError::WidthMismatch {
            name,
            expected: N,
            actual: bytes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_reads_match_writes() {
        let mut table = Table::new();
        table
            .put_u8("a", 7)
            .put_u16("b", 0x0102)
            .put_u32("c", 0xDEAD_BEEF)
            .put_uint64("d", UInt64::new(5, 6))
            .put_bytes("e", vec![1, 2, 3]);

        assert_eq!(table.u8("a").unwrap(), 7);
        assert_eq!(table.u16("b").unwrap(), 0x0102);
        assert_eq!(table.u32("c").unwrap(), 0xDEAD_BEEF);
        assert_eq!(table.uint64("d").unwrap(), UInt64::new(5, 6));
        assert_eq!(table.bytes("e").unwrap(), &[1, 2, 3]);
        assert_eq!(table.scalar_u64("c").unwrap(), 0xDEAD_BEEF);
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn wrong_kind_and_missing_are_reported() {
        let mut table = Table::new();
        table.put_u8("a", 1);
        assert_eq!(table.bytes("a"), Err(LayoutError::KindMismatch { name: "a", expected: "bytes" }));
        assert_eq!(table.u8("zz"), Err(LayoutError::MissingAttribute("zz")));
        assert!(matches!(table.u16("a"), Err(LayoutError::WidthMismatch { .. })));
    }

    #[test]
    fn byte_array_checks_length() {
        let mut table = Table::new();
        table.put_bytes("k", vec![0u8; 31]);
        assert!(table.byte_array::<32>("k").is_err());
        table.put_bytes("k", vec![9u8; 32]);
        assert_eq!(table.byte_array::<32>("k").unwrap(), [9u8; 32]);
    }
}
