//! # Encoding Module
//!
//! This module provides the byte-level plumbing of the binary engine:
//!
//! - **Reader**: borrowed-slice cursor with big-endian typed reads
//! - **Writer**: owned growable buffer with big-endian typed writes

pub mod cursor;

pub use cursor::{Reader, Writer};
