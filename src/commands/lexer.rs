//! # Command Tokenizer
//!
//! Splits an input line on whitespace and classifies keyword tokens with
//! a compile-time perfect hash map. Keywords are case-insensitive;
//! everything else (indexes, ranges, header names, literal values) passes
//! through verbatim for the parser to interpret.

use phf::phf_map;
use smallvec::SmallVec;

/// Reserved words of the command language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Set,
    Swap,
    Replace,
    Add,
    Delete,
    Insert,
    To,
    And,
    With,
    Columns,
    Matching,
    Incrementing,
    Advancing,
    By,
    Row,
    Rows,
    At,
}

impl Keyword {
    /// `row` and `rows` are interchangeable everywhere they appear.
    pub fn is_row_marker(self) -> bool {
        matches!(self, Keyword::Row | Keyword::Rows)
    }

    /// Returns true for the six command-opening keywords.
    pub fn starts_command(self) -> bool {
        matches!(
            self,
            Keyword::Set
                | Keyword::Swap
                | Keyword::Replace
                | Keyword::Add
                | Keyword::Delete
                | Keyword::Insert
        )
    }

    /// Canonical spelling, for error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Set => "Set",
            Keyword::Swap => "Swap",
            Keyword::Replace => "Replace",
            Keyword::Add => "Add",
            Keyword::Delete => "Delete",
            Keyword::Insert => "Insert",
            Keyword::To => "To",
            Keyword::And => "And",
            Keyword::With => "With",
            Keyword::Columns => "Columns",
            Keyword::Matching => "Matching",
            Keyword::Incrementing => "Incrementing",
            Keyword::Advancing => "Advancing",
            Keyword::By => "By",
            Keyword::Row => "Row",
            Keyword::Rows => "Rows",
            Keyword::At => "At",
        }
    }
}

static KEYWORDS: phf::Map<&'static str, Keyword> = phf_map! {
    "SET" => Keyword::Set,
    "SWAP" => Keyword::Swap,
    "REPLACE" => Keyword::Replace,
    "ADD" => Keyword::Add,
    "DELETE" => Keyword::Delete,
    "INSERT" => Keyword::Insert,
    "TO" => Keyword::To,
    "AND" => Keyword::And,
    "WITH" => Keyword::With,
    "COLUMNS" => Keyword::Columns,
    "MATCHING" => Keyword::Matching,
    "INCREMENTING" => Keyword::Incrementing,
    "ADVANCING" => Keyword::Advancing,
    "BY" => Keyword::By,
    "ROW" => Keyword::Row,
    "ROWS" => Keyword::Rows,
    "AT" => Keyword::At,
};

/// Case-insensitive keyword lookup.
pub fn keyword(token: &str) -> Option<Keyword> {
    let upper = token.to_ascii_uppercase();
    KEYWORDS.get(&upper).copied()
}

/// Splits a line into whitespace-separated tokens.
pub fn tokenize(line: &str) -> SmallVec<[&str; 8]> {
    line.split_whitespace().collect()
}
