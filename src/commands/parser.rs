//! # Command Parser
//!
//! Recursive-descent parser over the tokenizer, one function per command.
//! Parsing validates shape only; range resolution and type checks happen
//! at execution time against the live table, so a command either parses
//! into a [`Command`] or fails without touching anything.

use super::lexer::{Keyword, keyword, tokenize};
use super::range::RangeSpec;
use crate::error::{Error, Result};

const SET_USAGE: &str =
    "Set <columns> [<rows>] To <value> [Incrementing [By <step>]] [Advancing By <stride>]";
const SWAP_USAGE: &str = "Swap Rows <range> And <range>";
const REPLACE_USAGE: &str = "Replace Rows <dest> With Rows <source> [Columns <range>]";
const ADD_USAGE: &str = "Add [<count>] Rows [Matching Rows <range>]";
const DELETE_USAGE: &str = "Delete Rows [<range>]";
const INSERT_USAGE: &str = "Insert [<count>] Rows At <index> [Matching Rows <range>]";

/// A fully parsed, not yet resolved command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Set {
        cols: RangeSpec,
        rows: Option<RangeSpec>,
        value: String,
        increment: Option<String>,
        stride: usize,
    },
    Swap {
        first: RangeSpec,
        second: RangeSpec,
    },
    Replace {
        dest: RangeSpec,
        src: RangeSpec,
        cols: Option<RangeSpec>,
    },
    Add {
        count: usize,
        matching: Option<RangeSpec>,
    },
    Delete {
        rows: Option<RangeSpec>,
    },
    Insert {
        count: usize,
        at: usize,
        matching: Option<RangeSpec>,
    },
}

impl Command {
    pub fn usage(&self) -> &'static str {
        match self {
            Command::Set { .. } => SET_USAGE,
            Command::Swap { .. } => SWAP_USAGE,
            Command::Replace { .. } => REPLACE_USAGE,
            Command::Add { .. } => ADD_USAGE,
            Command::Delete { .. } => DELETE_USAGE,
            Command::Insert { .. } => INSERT_USAGE,
        }
    }
}

/// Usage line for the command a failed line was trying to be, if its
/// first token names one.
pub fn usage_hint(line: &str) -> Option<&'static str> {
    let tokens = tokenize(line);
    match keyword(tokens.first()?)? {
        Keyword::Set => Some(SET_USAGE),
        Keyword::Swap => Some(SWAP_USAGE),
        Keyword::Replace => Some(REPLACE_USAGE),
        Keyword::Add => Some(ADD_USAGE),
        Keyword::Delete => Some(DELETE_USAGE),
        Keyword::Insert => Some(INSERT_USAGE),
        _ => None,
    }
}

/// Parses one command line.
pub fn parse(line: &str) -> Result<Command> {
    let mut tokens = Tokens::new(line);
    let first = tokens.expect("a command")?;
    let command = match keyword(first) {
        Some(kw) if kw.starts_command() => match kw {
            Keyword::Set => parse_set(&mut tokens)?,
            Keyword::Swap => parse_swap(&mut tokens)?,
            Keyword::Replace => parse_replace(&mut tokens)?,
            Keyword::Add => parse_add(&mut tokens)?,
            Keyword::Delete => parse_delete(&mut tokens)?,
            Keyword::Insert => parse_insert(&mut tokens)?,
            _ => unreachable!(),
        },
        _ => return Err(Error::syntax(format!("unknown command '{}'", first))),
    };
    tokens.finish()?;
    Ok(command)
}

fn parse_set(tokens: &mut Tokens) -> Result<Command> {
    let cols = RangeSpec::parse(tokens.expect("a column range")?)?;
    let rows = match tokens.peek_keyword() {
        Some(Keyword::To) => None,
        _ => Some(RangeSpec::parse(tokens.expect("a row range")?)?),
    };
    tokens.expect_keyword(Keyword::To)?;
    let value = tokens.expect("a value")?.to_string();

    let mut increment = None;
    if tokens.take_keyword(Keyword::Incrementing) {
        if tokens.take_keyword(Keyword::By) {
            increment = Some(tokens.expect("an increment step")?.to_string());
        } else {
            increment = Some(String::from("1"));
        }
    }

    let mut stride = 1;
    if tokens.take_keyword(Keyword::Advancing) {
        tokens.expect_keyword(Keyword::By)?;
        let tok = tokens.expect("a stride")?;
        let parsed = tok
            .parse::<i64>()
            .map_err(|_| Error::syntax(format!("'{}' is not a stride", tok)))?;
        if parsed < 1 {
            return Err(Error::syntax("stride must be positive"));
        }
        stride = parsed as usize;
    }

    Ok(Command::Set {
        cols,
        rows,
        value,
        increment,
        stride,
    })
}

fn parse_swap(tokens: &mut Tokens) -> Result<Command> {
    tokens.expect_row_marker()?;
    let first = RangeSpec::parse(tokens.expect("a row range")?)?;
    tokens.expect_keyword(Keyword::And)?;
    let second = RangeSpec::parse(tokens.expect("a row range")?)?;
    Ok(Command::Swap { first, second })
}

fn parse_replace(tokens: &mut Tokens) -> Result<Command> {
    tokens.expect_row_marker()?;
    let dest = RangeSpec::parse(tokens.expect("a row range")?)?;
    tokens.expect_keyword(Keyword::With)?;
    tokens.expect_row_marker()?;
    let src = RangeSpec::parse(tokens.expect("a row range")?)?;
    let cols = if tokens.take_keyword(Keyword::Columns) {
        Some(RangeSpec::parse(tokens.expect("a column range")?)?)
    } else {
        None
    };
    Ok(Command::Replace { dest, src, cols })
}

fn parse_add(tokens: &mut Tokens) -> Result<Command> {
    let count = parse_count(tokens)?;
    tokens.expect_row_marker()?;
    let matching = parse_matching(tokens)?;
    Ok(Command::Add { count, matching })
}

fn parse_delete(tokens: &mut Tokens) -> Result<Command> {
    tokens.expect_row_marker()?;
    let rows = if tokens.peek().is_some() {
        Some(RangeSpec::parse(tokens.expect("a row range")?)?)
    } else {
        None
    };
    Ok(Command::Delete { rows })
}

fn parse_insert(tokens: &mut Tokens) -> Result<Command> {
    let count = parse_count(tokens)?;
    tokens.expect_row_marker()?;
    tokens.expect_keyword(Keyword::At)?;
    let tok = tokens.expect("an insertion index")?;
    let at = tok
        .parse::<usize>()
        .map_err(|_| Error::syntax(format!("'{}' is not an insertion index", tok)))?;
    let matching = parse_matching(tokens)?;
    Ok(Command::Insert {
        count,
        at,
        matching,
    })
}

/// Optional leading row count, defaulting to 1 when the row marker
/// follows immediately.
fn parse_count(tokens: &mut Tokens) -> Result<usize> {
    match tokens.peek_keyword() {
        Some(kw) if kw.is_row_marker() => Ok(1),
        _ => {
            let tok = tokens.expect("a row count")?;
            let count = tok
                .parse::<usize>()
                .map_err(|_| Error::syntax(format!("'{}' is not a row count", tok)))?;
            if count == 0 {
                return Err(Error::syntax("row count must be at least 1"));
            }
            Ok(count)
        }
    }
}

fn parse_matching(tokens: &mut Tokens) -> Result<Option<RangeSpec>> {
    if tokens.take_keyword(Keyword::Matching) {
        tokens.expect_row_marker()?;
        Ok(Some(RangeSpec::parse(tokens.expect("a row range")?)?))
    } else {
        Ok(None)
    }
}

/// Forward-only cursor over the tokenized line.
struct Tokens<'a> {
    items: smallvec::SmallVec<[&'a str; 8]>,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(line: &'a str) -> Self {
        Tokens {
            items: tokenize(line),
            pos: 0,
        }
    }

    fn next(&mut self) -> Option<&'a str> {
        let tok = self.items.get(self.pos).copied();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn peek(&self) -> Option<&'a str> {
        self.items.get(self.pos).copied()
    }

    fn peek_keyword(&self) -> Option<Keyword> {
        self.peek().and_then(keyword)
    }

    fn expect(&mut self, what: &str) -> Result<&'a str> {
        self.next()
            .ok_or_else(|| Error::syntax(format!("expected {}", what)))
    }

    fn expect_keyword(&mut self, kw: Keyword) -> Result<()> {
        let tok = self.expect(&format!("'{}'", kw.as_str()))?;
        if keyword(tok) == Some(kw) {
            Ok(())
        } else {
            Err(Error::syntax(format!(
                "expected '{}', got '{}'",
                kw.as_str(),
                tok
            )))
        }
    }

    fn expect_row_marker(&mut self) -> Result<()> {
        let tok = self.expect("'Rows'")?;
        match keyword(tok) {
            Some(kw) if kw.is_row_marker() => Ok(()),
            _ => Err(Error::syntax(format!("expected 'Rows', got '{}'", tok))),
        }
    }

    /// Consumes the next token if it is the given keyword.
    fn take_keyword(&mut self, kw: Keyword) -> bool {
        if self.peek_keyword() == Some(kw) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Rejects anything left over after a complete command.
    fn finish(&mut self) -> Result<()> {
        match self.next() {
            Some(tok) => Err(Error::syntax(format!("unexpected token '{}'", tok))),
            None => Ok(()),
        }
    }
}
