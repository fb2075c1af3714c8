//! Ordered attribute lists and the encoder/decoder they drive.

use bytes::{Buf, BufMut, BytesMut};

use super::table::{Table, Value};
use super::LayoutError;
use crate::config::{PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};

/// How many elements (or bytes) a vector attribute spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    /// A fixed element count.
    Fixed(usize),
    /// Element count held by the named earlier scalar.
    Count(&'static str),
    /// Byte span held by the named earlier scalar.
    Bytes(&'static str),
    /// Everything left in the enclosing input.
    Remaining,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    Scalar {
        name: &'static str,
        width: usize,
    },
    Array {
        name: &'static str,
        element_width: usize,
        length: Length,
    },
    /// Raw bytes, one byte per element.
    String {
        name: &'static str,
        length: Length,
    },
    Table {
        name: &'static str,
        schema: Schema,
    },
    TableArray {
        name: &'static str,
        schema: Schema,
        length: Length,
    },
}

impl Attribute {
    pub const fn scalar(name: &'static str, width: usize) -> Self {
        Self::Scalar { name, width }
    }

    /// `length` bytes, fixed.
    pub const fn bytes(name: &'static str, length: usize) -> Self {
        Self::Array {
            name,
            element_width: 1,
            length: Length::Fixed(length),
        }
    }

    /// A word-pair `UInt64`: two 4-byte elements.
    pub const fn uint64(name: &'static str) -> Self {
        Self::Array {
            name,
            element_width: 4,
            length: Length::Fixed(2),
        }
    }

    pub const fn string(name: &'static str, length: Length) -> Self {
        Self::String { name, length }
    }

    pub fn table(name: &'static str, schema: Schema) -> Self {
        Self::Table { name, schema }
    }

    pub fn table_array(name: &'static str, schema: Schema, length: Length) -> Self {
        Self::TableArray {
            name,
            schema,
            length,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Scalar { name, .. }
            | Self::Array { name, .. }
            | Self::String { name, .. }
            | Self::Table { name, .. }
            | Self::TableArray { name, .. } => *name,
        }
    }
}

/// An ordered list of attributes describing one binary layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    attributes: Vec<Attribute>,
}

impl Schema {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self { attributes }
    }

    /// Full transaction layout: the 120-byte header followed by `body`.
    pub fn transaction(body: Vec<Attribute>) -> Self {
        let mut attributes = vec![
            Attribute::scalar("size", 4),
            Attribute::bytes("signature", SIGNATURE_LENGTH),
            Attribute::bytes("signer", PUBLIC_KEY_LENGTH),
            Attribute::scalar("version", 2),
            Attribute::scalar("type", 2),
            Attribute::uint64("maxFee"),
            Attribute::uint64("deadline"),
        ];
        attributes.extend(body);
        Self { attributes }
    }

    /// Embedded layout used inside aggregates: the 40-byte header followed
    /// by `body`.
    pub fn embedded(body: Vec<Attribute>) -> Self {
        let mut attributes = vec![
            Attribute::scalar("size", 4),
            Attribute::bytes("signer", PUBLIC_KEY_LENGTH),
            Attribute::scalar("version", 2),
            Attribute::scalar("type", 2),
        ];
        attributes.extend(body);
        Self { attributes }
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Encodes `table` in attribute order.
    ///
    /// Nothing is padded or truncated: every scalar must have its exact
    /// width and every vector must agree with its length attribute.
    pub fn serialize(&self, table: &Table) -> Result<Vec<u8>, LayoutError> {
        let mut out = BytesMut::new();
        self.write(table, &mut out)?;
        Ok(out.to_vec())
    }

    /// Decodes `bytes` into a table. The whole input must be consumed.
    pub fn deserialize(&self, mut bytes: &[u8]) -> Result<Table, LayoutError> {
        let table = self.read(&mut bytes)?;
        if bytes.has_remaining() {
            return Err(LayoutError::TrailingBytes(bytes.remaining()));
        }
        Ok(table)
    }

    // -- encoding ------------------------------------------------------------

    fn write(&self, table: &Table, out: &mut BytesMut) -> Result<(), LayoutError> {
        for attribute in &self.attributes {
            match *attribute {
                Attribute::Scalar { name, width } => {
                    let bytes = table.scalar(name)?;
                    if bytes.len() != width {
                        return Err(LayoutError::WidthMismatch {
                            name,
                            expected: width,
                            actual: bytes.len(),
                        });
                    }
                    out.put_slice(bytes);
                }
                Attribute::Array {
                    name,
                    element_width,
                    length,
                } => {
                    let bytes = table.bytes(name)?;
                    check_vector(table, name, element_width, length, bytes.len())?;
                    out.put_slice(bytes);
                }
                Attribute::String { name, length } => {
                    let bytes = table.bytes(name)?;
                    check_vector(table, name, 1, length, bytes.len())?;
                    out.put_slice(bytes);
                }
                Attribute::Table { name, ref schema } => {
                    schema.write(table.table(name)?, out)?;
                }
                Attribute::TableArray {
                    name,
                    ref schema,
                    length,
                } => {
                    let start = out.len();
                    let elements = table.tables(name)?;
                    for element in elements {
                        schema.write(element, out)?;
                    }
                    let written = out.len() - start;
                    match length {
                        Length::Fixed(n) => check_count(name, "fixed", n, elements.len())?,
                        Length::Count(field) => {
                            check_count(name, field, declared(table, field)?, elements.len())?
                        }
                        Length::Bytes(field) => {
                            check_count(name, field, declared(table, field)?, written)?
                        }
                        Length::Remaining => {}
                    }
                }
            }
        }
        Ok(())
    }

    // -- decoding ------------------------------------------------------------

    fn read(&self, buf: &mut &[u8]) -> Result<Table, LayoutError> {
        let mut table = Table::new();
        for attribute in &self.attributes {
            match *attribute {
                Attribute::Scalar { name, width } => {
                    let bytes = take(buf, name, width)?;
                    table.insert(name, Value::Scalar(bytes.to_vec()));
                }
                Attribute::Array {
                    name,
                    element_width,
                    length,
                } => {
                    let span = byte_span(&table, buf, name, element_width, length)?;
                    let bytes = take(buf, name, span)?;
                    table.put_bytes(name, bytes);
                }
                Attribute::String { name, length } => {
                    let span = byte_span(&table, buf, name, 1, length)?;
                    let bytes = take(buf, name, span)?;
                    table.put_bytes(name, bytes);
                }
                Attribute::Table { name, ref schema } => {
                    let nested = schema.read(buf)?;
                    table.put_table(name, nested);
                }
                Attribute::TableArray {
                    name,
                    ref schema,
                    length,
                } => {
                    let elements = match length {
                        Length::Fixed(n) => read_n(schema, buf, n)?,
                        Length::Count(field) => read_n(schema, buf, declared(&table, field)?)?,
                        Length::Bytes(field) => {
                            let span = declared(&table, field)?;
                            let mut region = take(buf, name, span)?;
                            read_all(schema, &mut region)?
                        }
                        Length::Remaining => read_all(schema, buf)?,
                    };
                    table.put_tables(name, elements);
                }
            }
        }
        Ok(table)
    }
}

/// Value of the length-carrying scalar `field`.
fn declared(table: &Table, field: &'static str) -> Result<usize, LayoutError> {
    // Length scalars are at most four bytes wide.
    Ok(table.scalar_u64(field)? as usize)
}

fn check_count(
    name: &'static str,
    field: &'static str,
    declared: usize,
    actual: usize,
) -> Result<(), LayoutError> {
    if declared != actual {
        return Err(LayoutError::CountMismatch {
            name,
            field,
            declared,
            actual,
        });
    }
    Ok(())
}

fn check_vector(
    table: &Table,
    name: &'static str,
    element_width: usize,
    length: Length,
    byte_len: usize,
) -> Result<(), LayoutError> {
    match length {
        Length::Fixed(n) => {
            let expected = n * element_width;
            if byte_len != expected {
                return Err(LayoutError::WidthMismatch {
                    name,
                    expected,
                    actual: byte_len,
                });
            }
            Ok(())
        }
        Length::Count(field) => {
            if byte_len % element_width != 0 {
                return Err(LayoutError::WidthMismatch {
                    name,
                    expected: element_width,
                    actual: byte_len % element_width,
                });
            }
            check_count(name, field, declared(table, field)?, byte_len / element_width)
        }
        Length::Bytes(field) => check_count(name, field, declared(table, field)?, byte_len),
        Length::Remaining => {
            if byte_len % element_width != 0 {
                return Err(LayoutError::WidthMismatch {
                    name,
                    expected: element_width,
                    actual: byte_len % element_width,
                });
            }
            Ok(())
        }
    }
}

/// Number of bytes a vector attribute occupies when decoding.
fn byte_span(
    table: &Table,
    buf: &mut &[u8],
    name: &'static str,
    element_width: usize,
    length: Length,
) -> Result<usize, LayoutError> {
    let span = match length {
        Length::Fixed(n) => n * element_width,
        Length::Count(field) => declared(table, field)? * element_width,
        Length::Bytes(field) => declared(table, field)?,
        Length::Remaining => buf.remaining() - buf.remaining() % element_width,
    };
    if span > buf.remaining() {
        return Err(LayoutError::Truncated {
            name,
            needed: span,
            remaining: buf.remaining(),
        });
    }
    Ok(span)
}

fn take<'a>(buf: &mut &'a [u8], name: &'static str, n: usize) -> Result<&'a [u8], LayoutError> {
    if buf.remaining() < n {
        return Err(LayoutError::Truncated {
            name,
            needed: n,
            remaining: buf.remaining(),
        });
    }
    let (head, tail) = buf.split_at(n);
    *buf = tail;
    Ok(head)
}

fn read_n(schema: &Schema, buf: &mut &[u8], n: usize) -> Result<Vec<Table>, LayoutError> {
    (0..n).map(|_| schema.read(buf)).collect()
}

fn read_all(schema: &Schema, buf: &mut &[u8]) -> Result<Vec<Table>, LayoutError> {
    let mut elements = Vec::new();
    while buf.has_remaining() {
        elements.push(schema.read(buf)?);
    }
    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modification_schema() -> Schema {
        Schema::new(vec![
            Attribute::scalar("modificationType", 1),
            Attribute::bytes("cosignatoryPublicKey", 4),
        ])
    }

    fn sample_schema() -> Schema {
        Schema::new(vec![
            Attribute::scalar("flag", 1),
            Attribute::scalar("nameSize", 1),
            Attribute::scalar("modificationsCount", 1),
            Attribute::uint64("id"),
            Attribute::string("name", Length::Count("nameSize")),
            Attribute::table_array(
                "modifications",
                modification_schema(),
                Length::Count("modificationsCount"),
            ),
            Attribute::Array {
                name: "tail",
                element_width: 2,
                length: Length::Remaining,
            },
        ])
    }

    fn modification(kind: u8, key: [u8; 4]) -> Table {
        let mut t = Table::new();
        t.put_u8("modificationType", kind).put_bytes("cosignatoryPublicKey", key.to_vec());
        t
    }

    fn sample_table() -> Table {
        let mut t = Table::new();
        t.put_u8("flag", 0xAA)
            .put_u8("nameSize", 3)
            .put_u8("modificationsCount", 2)
            .put_uint64("id", crate::model::UInt64::new(1, 2))
            .put_bytes("name", b"foo".to_vec())
            .put_tables(
                "modifications",
                vec![modification(0, [1, 2, 3, 4]), modification(1, [5, 6, 7, 8])],
            )
            .put_bytes("tail", vec![9, 9, 8, 8]);
        t
    }

    #[test]
    fn serialize_concatenates_in_attribute_order() {
        let bytes = sample_schema().serialize(&sample_table()).unwrap();
        assert_eq!(
            bytes,
            vec![
                0xAA, 3, 2, 1, 0, 0, 0, 2, 0, 0, 0, b'f', b'o', b'o', 0, 1, 2, 3, 4, 1, 5, 6, 7,
                8, 9, 9, 8, 8
            ]
        );
    }

    #[test]
    fn deserialize_recovers_every_field() {
        let schema = sample_schema();
        let table = sample_table();
        let bytes = schema.serialize(&table).unwrap();
        assert_eq!(schema.deserialize(&bytes).unwrap(), table);
    }

    #[test]
    fn empty_vectors_contribute_nothing() {
        let schema = sample_schema();
        let mut table = sample_table();
        table
            .put_u8("nameSize", 0)
            .put_u8("modificationsCount", 0)
            .put_bytes("name", Vec::new())
            .put_tables("modifications", Vec::new())
            .put_bytes("tail", Vec::new());
        let bytes = schema.serialize(&table).unwrap();
        assert_eq!(bytes.len(), 1 + 1 + 1 + 8);
        assert_eq!(schema.deserialize(&bytes).unwrap(), table);
    }

    #[test]
    fn count_disagreement_is_rejected() {
        let mut table = sample_table();
        table.put_u8("nameSize", 4);
        assert_eq!(
            sample_schema().serialize(&table),
            Err(LayoutError::CountMismatch {
                name: "name",
                field: "nameSize",
                declared: 4,
                actual: 3
            })
        );

        let mut table = sample_table();
        table.put_u8("modificationsCount", 1);
        assert!(matches!(
            sample_schema().serialize(&table),
            Err(LayoutError::CountMismatch { name: "modifications", .. })
        ));
    }

    #[test]
    fn scalar_width_is_exact() {
        let mut table = sample_table();
        table.put_u16("flag", 1);
        assert_eq!(
            sample_schema().serialize(&table),
            Err(LayoutError::WidthMismatch {
                name: "flag",
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn missing_attribute_is_rejected() {
        let schema = Schema::new(vec![Attribute::scalar("a", 1), Attribute::scalar("b", 1)]);
        let mut table = Table::new();
        table.put_u8("a", 1);
        assert_eq!(schema.serialize(&table), Err(LayoutError::MissingAttribute("b")));
    }

    #[test]
    fn truncated_and_trailing_input_are_rejected() {
        let schema = Schema::new(vec![Attribute::scalar("a", 2), Attribute::bytes("k", 4)]);
        assert!(matches!(
            schema.deserialize(&[1, 0, 7, 7]),
            Err(LayoutError::Truncated { name: "k", needed: 4, remaining: 2 })
        ));
        assert_eq!(
            schema.deserialize(&[1, 0, 7, 7, 7, 7, 0xFF]),
            Err(LayoutError::TrailingBytes(1))
        );
    }

    #[test]
    fn byte_spanned_table_array_decodes_region() {
        let schema = Schema::new(vec![
            Attribute::scalar("payloadSize", 4),
            Attribute::table_array("items", modification_schema(), Length::Bytes("payloadSize")),
            Attribute::table_array("rest", modification_schema(), Length::Remaining),
        ]);
        let mut table = Table::new();
        table
            .put_u32("payloadSize", 10)
            .put_tables("items", vec![modification(0, [1; 4]), modification(1, [2; 4])])
            .put_tables("rest", vec![modification(2, [3; 4])]);
        let bytes = schema.serialize(&table).unwrap();
        assert_eq!(bytes.len(), 4 + 10 + 5);
        assert_eq!(schema.deserialize(&bytes).unwrap(), table);

        table.put_u32("payloadSize", 9);
        assert!(schema.serialize(&table).is_err());
    }

    #[test]
    fn transaction_header_is_120_bytes() {
        let schema = Schema::transaction(Vec::new());
        let mut table = Table::new();
        table
            .put_u32("size", 120)
            .put_bytes("signature", vec![0u8; 64])
            .put_bytes("signer", vec![0u8; 32])
            .put_u16("version", 0x9003)
            .put_u16("type", 0x4154)
            .put_uint64("maxFee", crate::model::UInt64::ZERO)
            .put_uint64("deadline", crate::model::UInt64::new(1, 0));
        assert_eq!(schema.serialize(&table).unwrap().len(), 120);
        assert_eq!(Schema::embedded(Vec::new()).attributes().len(), 4);
    }
}
