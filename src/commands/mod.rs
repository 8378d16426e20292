//! # Table Command Language
//!
//! A small line-oriented language for editing a [`Table`](crate::table::Table)
//! in place. Keywords are case-insensitive; row and column indexes are
//! zero-based; ranges are written `start-end` with an inclusive end.
//!
//! ## Commands
//!
//! | Command | Shape |
//! |---------|-------|
//! | Set | `Set <columns> [<rows>] To <value> [Incrementing [By <step>]] [Advancing By <stride>]` |
//! | Swap | `Swap Rows <range> And <range>` |
//! | Replace | `Replace Rows <dest> With Rows <source> [Columns <range>]` |
//! | Add | `Add [<count>] Rows [Matching Rows <range>]` |
//! | Delete | `Delete Rows [<range>]` |
//! | Insert | `Insert [<count>] Rows At <index> [Matching Rows <range>]` |
//!
//! Column ranges accept header names as well as indexes; a lone header
//! name is tried before the `-` range split so names containing `-`
//! still work. A command that fails to parse or resolve is rejected as a
//! whole and the table is left untouched.

mod exec;
mod lexer;
mod parser;
mod range;

pub use exec::execute;
pub use lexer::{Keyword, keyword, tokenize};
pub use parser::{Command, parse, usage_hint};
pub use range::{Bound, RangeSpec, Span};

use crate::table::Table;

/// Result of feeding one line to [`apply_line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command parsed, resolved, and mutated the table.
    Applied,
    /// The line was rejected; the table is unchanged.
    Rejected(String),
}

/// Parses and executes one command line against the table.
///
/// Rejection messages carry the usage line for the attempted command
/// when the first token names one.
pub fn apply_line(table: &mut Table, line: &str) -> CommandOutcome {
    let command = match parse(line) {
        Ok(command) => command,
        Err(err) => {
            let message = match usage_hint(line) {
                Some(usage) => format!("{}\nusage: {}", err, usage),
                None => err.to_string(),
            };
            return CommandOutcome::Rejected(message);
        }
    };
    match execute(table, &command) {
        Ok(()) => CommandOutcome::Applied,
        Err(err) => CommandOutcome::Rejected(format!("{}\nusage: {}", err, command.usage())),
    }
}

/// Help text for the interactive prompt.
pub fn help_text() -> &'static str {
    r#"Commands (keywords are case-insensitive, indexes zero-based,
ranges inclusive as start-end, columns by index or header name):

  Set <columns> [<rows>] To <value> [Incrementing [By <step>]] [Advancing By <stride>]
      Assign a value across a column/row rectangle. Incrementing counts
      the value up per visited row, restarting in each column; Advancing
      visits every <stride>-th row.

  Swap Rows <range> And <range>
      Exchange two equal-length, non-overlapping row ranges.

  Replace Rows <dest> With Rows <source> [Columns <range>]
      Copy the source rows onto the destination rows, reusing the source
      cyclically when lengths differ.

  Add [<count>] Rows [Matching Rows <range>]
      Append empty rows, optionally filled from an existing row range.

  Delete Rows [<range>]
      Delete the given rows, or the last row when no range is given.

  Insert [<count>] Rows At <index> [Matching Rows <range>]
      Insert empty rows before <index>, optionally filled as with Add.

Session commands: help, save, q / quit."#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TypeTag, Value};

    fn small_table() -> Table {
        let mut table = Table::new(vec![TypeTag::U16, TypeTag::U16]).unwrap();
        table
            .set_headers(vec!["Left".into(), "Right".into()])
            .unwrap();
        for i in 0..4u64 {
            table.add_row(&[Value::Uint(i), Value::Uint(i + 100)]).unwrap();
        }
        table
    }

    #[test]
    fn applied_lines_mutate() {
        let mut table = small_table();
        assert_eq!(apply_line(&mut table, "set Right to 7"), CommandOutcome::Applied);
        assert_eq!(table.value(3, 1).unwrap(), Value::Uint(7));
    }

    #[test]
    fn parse_failures_carry_usage() {
        let mut table = small_table();
        match apply_line(&mut table, "set Left") {
            CommandOutcome::Rejected(msg) => {
                assert!(msg.contains("usage: Set"), "message was: {}", msg);
            }
            other => panic!("got {:?}", other),
        }
    }

    #[test]
    fn execution_failures_carry_usage() {
        let mut table = small_table();
        match apply_line(&mut table, "Swap rows 0-1 and 1-2") {
            CommandOutcome::Rejected(msg) => {
                assert!(msg.contains("overlap"), "message was: {}", msg);
                assert!(msg.contains("usage: Swap"), "message was: {}", msg);
            }
            other => panic!("got {:?}", other),
        }
        assert_eq!(table.value(0, 0).unwrap(), Value::Uint(0));
    }

    #[test]
    fn unknown_first_token_has_no_usage_line() {
        let mut table = small_table();
        match apply_line(&mut table, "paint rows 0") {
            CommandOutcome::Rejected(msg) => {
                assert!(!msg.contains("usage:"), "message was: {}", msg);
            }
            other => panic!("got {:?}", other),
        }
    }
}
