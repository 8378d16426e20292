//! # binsheet - Schema-Driven Binary Structure Editor
//!
//! binsheet decodes fixed-layout binary files into navigable instance
//! trees, projects them into a typed table, and lets the table be edited
//! through a small textual command language before re-encoding the file
//! byte-exactly. The crate prioritizes:
//!
//! - **Raw-byte fidelity**: cell and field storage is always the wire's
//!   big-endian bytes; typed values materialize only at the edges
//! - **Whole-command atomicity**: a command that fails validation leaves
//!   the table untouched
//! - **Schema-driven layout**: templates describe field types, widths,
//!   repeat counts, and nested repeated sections; nothing about a file's
//!   shape is hard-coded outside its adapter
//!
//! ## Quick Start
//!
//! ```ignore
//! use binsheet::adapter::LightSet;
//! use binsheet::session::Session;
//!
//! let mut session = Session::open(Box::new(LightSet), "lights.bin".as_ref())?;
//! session.apply("Set Effect 0-3 to 1.5");
//! session.apply("Swap rows 0 and 15");
//! session.save("edited.bin".as_ref(), false)?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │      CLI (REPL / one-shot edit)      │
//! ├─────────────────────────────────────┤
//! │        Session (open/apply/save)     │
//! ├──────────────────┬──────────────────┤
//! │  Format Adapter  │ Command Language  │
//! ├──────────────────┼──────────────────┤
//! │  Instance Trees  │      Table        │
//! ├──────────────────┴──────────────────┤
//! │    Schema Templates │ Type Tags      │
//! ├─────────────────────────────────────┤
//! │     Big-Endian Cursors (codec)       │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`schema`]: Templates describing binary record layouts
//! - [`tree`]: Decoded instance trees and the buffer codec
//! - [`table`]: Fixed-width row store with typed columns
//! - [`commands`]: The Set/Swap/Replace/Add/Delete/Insert language
//! - [`adapter`]: Format adapters binding schemas to table projections
//! - [`session`]: File lifecycle around one edit
//! - [`cli`]: Interactive editor loop and table rendering
//! - [`encoding`]: Big-endian read/write cursors
//! - [`types`]: Type tags and edge-converted values

pub mod adapter;
pub mod cli;
pub mod commands;
pub mod config;
pub mod encoding;
pub mod error;
pub mod schema;
pub mod session;
pub mod table;
pub mod tree;
pub mod types;

pub use error::{Error, Result};
pub use schema::{FieldSpec, Template};
pub use session::Session;
pub use table::Table;
pub use tree::{Hub, Node, Section, decode_buffer, encode_buffer};
pub use types::{FormatSpec, TypeCategory, TypeTag, Value};
