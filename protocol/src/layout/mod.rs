//! # Binary Layout Descriptor
//!
//! Every transaction kind is described once, as a [`Schema`]: an ordered list
//! of [`Attribute`]s. The same schema drives both directions:
//!
//! - **encoding**: a builder fills a [`Table`] with named values and
//!   [`Schema::serialize`] concatenates them in attribute order;
//! - **decoding**: [`Schema::deserialize`] walks the same attributes over a
//!   byte slice and recovers the table.
//!
//! Vector attributes name the earlier scalar that carries their element count
//! or byte span ([`Length`]), so decoding needs no out-of-band hints and
//! encoding can cross-check that the two agree.
//!
//! ```text
//! Scalar      fixed-width little-endian integer
//! Array       element_width × length raw bytes
//! String      length raw bytes
//! Table       nested schema, inline
//! TableArray  nested schema, repeated
//! ```
//!
//! A mismatch anywhere is a construction defect and surfaces as a
//! [`LayoutError`]; nothing is ever padded or truncated to fit.

pub mod schema;
pub mod table;

pub use schema::{Attribute, Length, Schema};
pub use table::{Table, Value};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("missing attribute `{0}`")]
    MissingAttribute(&'static str),

    #[error("attribute `{name}` expects a {expected} value")]
    KindMismatch {
        name: &'static str,
        expected: &'static str,
    },

    #[error("attribute `{name}` must span {expected} bytes, got {actual}")]
    WidthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("attribute `{name}` holds {actual} but `{field}` declares {declared}")]
    CountMismatch {
        name: &'static str,
        field: &'static str,
        declared: usize,
        actual: usize,
    },

    #[error("input truncated at `{name}`: need {needed} bytes, {remaining} left")]
    Truncated {
        name: &'static str,
        needed: usize,
        remaining: usize,
    },

    #[error("{0} trailing bytes after the last attribute")]
    TrailingBytes(usize),
}
