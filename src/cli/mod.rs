//! # CLI Module
//!
//! Interactive command-line surface for editing binary structure files
//! through their table projection.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      CLI Entry Point                        │
//! │                    (bin/binsheet.rs)                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │                         REPL Loop                           │
//! │  - Reads input via rustyline                                │
//! │  - Dispatches session words (q, quit, help, save)           │
//! │  - Hands table commands to the command language             │
//! ├─────────────────────────────────────────────────────────────┤
//! │        Table View           │            History            │
//! │  ASCII grid with id column  │  Persistent ~/.binsheet_*     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Session Words
//!
//! | Word           | Description                            |
//! |----------------|----------------------------------------|
//! | `q` / `quit`   | Exit the editor                        |
//! | `save`         | Flush the table and write the file     |
//! | `help`         | Show the command reference             |
//!
//! Everything else is interpreted as a table command (`Set`, `Swap`,
//! `Replace`, `Add`, `Delete`, `Insert`).
//!
//! ## Module Organization
//!
//! - `repl`: Main read-eval-print loop with rustyline integration
//! - `render`: ASCII table view of the projected table
//! - `history`: History file path resolution

pub mod history;
pub mod render;
pub mod repl;

pub use render::{TableView, render_table};
pub use repl::Repl;
