//! # Configuration Constants
//!
//! Centralizes the crate's tunable values. Rendering constants are
//! co-located because the table view derives column widths from them;
//! changing one without the others skews the grid.

// ============================================================================
// TABLE RENDERING
// ============================================================================

/// Fractional digits when rendering float cells.
pub const FLOAT_PRECISION: usize = 2;

/// Width of the leading row-id column.
pub const ID_COLUMN_WIDTH: usize = 3;

/// Minimum width of a data column. Headers shorter than this are padded
/// so single-digit cells still line up under three-letter headers.
pub const MIN_COLUMN_WIDTH: usize = 3;

const _: () = assert!(
    MIN_COLUMN_WIDTH >= 1,
    "a zero-width column would collapse the grid separators"
);

// ============================================================================
// INTERACTIVE SESSION
// ============================================================================

/// Prompt shown by the interactive editor.
pub const PROMPT: &str = "binsheet> ";

/// History file name, created in the user's home directory.
pub const HISTORY_FILE: &str = ".binsheet_history";

/// Environment variable overriding the history file location.
/// An empty value disables history persistence.
pub const HISTORY_ENV: &str = "BINSHEET_HISTORY";
