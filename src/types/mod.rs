//! # Unified Type System
//!
//! This module provides the canonical type system shared by schema
//! definitions, decoded instance trees, and table columns.
//!
//! ## Module Structure
//!
//! - `tag`: Compact `TypeTag` descriptor and `TypeCategory`
//! - `value`: Owned `Value` variants and `FormatSpec`
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | `TypeTag` | Category + byte width + char flag of one cell type |
//! | `TypeCategory` | Broad classification (int, float, bytes, ...) |
//! | `Value` | Owned cell value at conversion edges |
//! | `FormatSpec` | printf-like display width/precision |

mod tag;
mod value;

pub use tag::{TypeCategory, TypeTag};
pub use value::{FormatSpec, Value};
