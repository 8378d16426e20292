//! # Binary Layout Schemas
//!
//! This module provides the recursive [`Template`] describing a fixed
//! binary record layout. A template names its fields, fixes their order,
//! widths, and element counts, and nests repeated sub-templates through
//! section placeholders.
//!
//! Templates are built once by a format adapter and stay read-only for
//! the lifetime of any instance tree decoded from them.

mod template;

pub use template::{FieldSpec, Template};
