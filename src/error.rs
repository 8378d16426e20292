//! # Error Types
//!
//! Unified error taxonomy for schema construction, binary decode/encode,
//! table mutation, and command parsing. Every fallible operation in the
//! crate returns [`Result`], and callers at the CLI boundary convert into
//! `eyre::Report` via `?`.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Malformed schema: bad field count, repeat below one, section arity,
    /// or a buffer larger than the schema describes.
    #[error("schema error: {0}")]
    Schema(String),

    /// Buffer ran out before the schema was satisfied.
    #[error("short read: needed {needed} bytes, {available} available")]
    ShortRead { needed: usize, available: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Instance tree does not line up with its template during encode.
    #[error("structural mismatch: {0}")]
    StructuralMismatch(String),

    #[error("syntax error: {0}")]
    CommandSyntax(String),

    #[error("range error: {0}")]
    Range(String),

    #[error("type error: {0}")]
    Type(String),

    #[error("table is fixed-size: {0}")]
    FixedSize(String),
}

impl Error {
    pub fn schema(msg: impl Into<String>) -> Self {
        Error::Schema(msg.into())
    }

    pub fn short_read(needed: usize, available: usize) -> Self {
        Error::ShortRead { needed, available }
    }

    pub fn structural(msg: impl Into<String>) -> Self {
        Error::StructuralMismatch(msg.into())
    }

    pub fn syntax(msg: impl Into<String>) -> Self {
        Error::CommandSyntax(msg.into())
    }

    pub fn range(msg: impl Into<String>) -> Self {
        Error::Range(msg.into())
    }

    pub fn type_mismatch(msg: impl Into<String>) -> Self {
        Error::Type(msg.into())
    }

    pub fn fixed_size(msg: impl Into<String>) -> Self {
        Error::FixedSize(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_read_display_names_both_counts() {
        let err = Error::short_read(8, 3);
        let msg = err.to_string();
        assert!(msg.contains('8'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_io_error_converts() {
        fn read_missing() -> Result<Vec<u8>> {
            Ok(std::fs::read("/definitely/not/a/real/path/xyz")?)
        }
        assert!(matches!(read_missing(), Err(Error::Io(_))));
    }
}
