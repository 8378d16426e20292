//! Closed value representation for cell contents.
//!
//! Cells and node payloads store raw big-endian bytes; a `Value` exists
//! only at conversion edges (text parsing, display, adapter plumbing) and
//! is matched exhaustively wherever it is consumed.

/// A fully-owned cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Uint(u64),
    Float(f64),
    Bytes(Vec<u8>),
    Bool(bool),
}

impl Value {
    /// Returns true for integer and float values.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Uint(_) | Value::Float(_))
    }

    /// Short noun for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Uint(_) => "unsigned integer",
            Value::Float(_) => "float",
            Value::Bytes(_) => "bytes",
            Value::Bool(_) => "bool",
        }
    }
}

/// Display width/precision for rendering a cell, printf-style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatSpec {
    pub width: Option<usize>,
    pub precision: Option<usize>,
}

impl FormatSpec {
    pub fn with_precision(precision: usize) -> Self {
        FormatSpec {
            width: None,
            precision: Some(precision),
        }
    }
}
