//! # Range Grammar
//!
//! Row and column ranges as they appear in command text: a bare index, a
//! header name, or `start-end` with an inclusive end. Parsing is purely
//! syntactic; resolution against a concrete [`Table`] turns a spec into a
//! bounds-checked end-exclusive [`Span`].
//!
//! Resolution rules:
//!
//! - Column ranges try the whole token as a header name first, so a
//!   header containing `-` still resolves.
//! - Row ranges accept numeric indexes only.
//! - A reversed span (`3-1`), an out-of-bounds index, and an unknown
//!   header all reject the whole command.

use crate::error::{Error, Result};
use crate::table::Table;

/// One side of a range: a numeric index or a header name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bound {
    Index(usize),
    Name(String),
}

impl Bound {
    fn parse(token: &str) -> Result<Self> {
        if token.is_empty() {
            return Err(Error::syntax("empty range bound"));
        }
        if token.bytes().all(|b| b.is_ascii_digit()) {
            let index = token
                .parse::<usize>()
                .map_err(|_| Error::syntax(format!("index '{}' is out of range", token)))?;
            Ok(Bound::Index(index))
        } else {
            Ok(Bound::Name(token.to_string()))
        }
    }
}

/// A parsed, unresolved range token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSpec {
    raw: String,
    start: Bound,
    end: Option<Bound>,
}

impl RangeSpec {
    /// Parses a range token: `N`, `name`, or `start-end`.
    pub fn parse(token: &str) -> Result<Self> {
        let (start, end) = match token.split_once('-') {
            Some((a, b)) => {
                if a.is_empty() || b.is_empty() {
                    return Err(Error::syntax(format!("'{}' is not a valid range", token)));
                }
                (Bound::parse(a)?, Some(Bound::parse(b)?))
            }
            None => (Bound::parse(token)?, None),
        };
        Ok(RangeSpec {
            raw: token.to_string(),
            start,
            end,
        })
    }

    /// Resolves against the table's rows. Names are rejected; the
    /// inclusive end becomes exclusive.
    pub fn resolve_rows(&self, table: &Table) -> Result<Span> {
        let start = self.numeric_bound(&self.start)?;
        let end = match &self.end {
            Some(bound) => self.numeric_bound(bound)?,
            None => start,
        };
        Span::checked(start, end, table.row_count(), "row")
    }

    /// Resolves against the table's columns, trying the whole raw token
    /// as a header name before splitting on `-`.
    pub fn resolve_cols(&self, table: &Table) -> Result<Span> {
        if let Some(col) = table.find_column(&self.raw) {
            return Span::checked(col, col, table.column_count(), "column");
        }
        let start = self.column_bound(&self.start, table)?;
        let end = match &self.end {
            Some(bound) => self.column_bound(bound, table)?,
            None => start,
        };
        Span::checked(start, end, table.column_count(), "column")
    }

    fn numeric_bound(&self, bound: &Bound) -> Result<usize> {
        match bound {
            Bound::Index(i) => Ok(*i),
            Bound::Name(name) => Err(Error::syntax(format!(
                "row ranges use numeric indexes, got '{}'",
                name
            ))),
        }
    }

    fn column_bound(&self, bound: &Bound, table: &Table) -> Result<usize> {
        match bound {
            Bound::Index(i) => Ok(*i),
            Bound::Name(name) => table
                .find_column(name)
                .ok_or_else(|| Error::range(format!("unknown column '{}'", name))),
        }
    }
}

/// A resolved end-exclusive index span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Validates an inclusive pair against `limit` and converts to
    /// end-exclusive form.
    fn checked(start: usize, end_inclusive: usize, limit: usize, axis: &str) -> Result<Self> {
        if end_inclusive < start {
            return Err(Error::range(format!(
                "{} range {}-{} is reversed",
                axis, start, end_inclusive
            )));
        }
        if end_inclusive >= limit {
            return Err(Error::range(format!(
                "{} range {}-{} exceeds {} {}s",
                axis, start, end_inclusive, limit, axis
            )));
        }
        Ok(Span {
            start,
            end: end_inclusive + 1,
        })
    }

    /// Covers every row of the table. Empty when the table is empty.
    pub fn all_rows(table: &Table) -> Self {
        Span {
            start: 0,
            end: table.row_count(),
        }
    }

    /// Covers every column of the table.
    pub fn all_cols(table: &Table) -> Self {
        Span {
            start: 0,
            end: table.column_count(),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn iter(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeTag;

    fn table_with(rows: usize) -> Table {
        let mut table = Table::new(vec![TypeTag::U8, TypeTag::U16, TypeTag::F32]).unwrap();
        table
            .set_headers(vec!["Flag".into(), "Count".into(), "Ratio".into()])
            .unwrap();
        for _ in 0..rows {
            table.add_empty_row().unwrap();
        }
        table
    }

    #[test]
    fn single_index_becomes_unit_span() {
        let table = table_with(5);
        let span = RangeSpec::parse("3").unwrap().resolve_rows(&table).unwrap();
        assert_eq!(span, Span { start: 3, end: 4 });
    }

    #[test]
    fn pair_is_inclusive_on_input() {
        let table = table_with(5);
        let span = RangeSpec::parse("1-3").unwrap().resolve_rows(&table).unwrap();
        assert_eq!(span, Span { start: 1, end: 4 });
        assert_eq!(span.len(), 3);
    }

    #[test]
    fn reversed_range_is_range_error() {
        let table = table_with(5);
        let result = RangeSpec::parse("3-1").unwrap().resolve_rows(&table);
        assert!(matches!(result, Err(Error::Range(_))));
    }

    #[test]
    fn out_of_bounds_rejected() {
        let table = table_with(3);
        let result = RangeSpec::parse("1-5").unwrap().resolve_rows(&table);
        assert!(matches!(result, Err(Error::Range(_))));
    }

    #[test]
    fn dangling_dash_is_syntax_error() {
        assert!(matches!(RangeSpec::parse("-1"), Err(Error::CommandSyntax(_))));
        assert!(matches!(RangeSpec::parse("3-"), Err(Error::CommandSyntax(_))));
    }

    #[test]
    fn name_in_row_range_is_syntax_error() {
        let table = table_with(3);
        let result = RangeSpec::parse("Count").unwrap().resolve_rows(&table);
        assert!(matches!(result, Err(Error::CommandSyntax(_))));
    }

    #[test]
    fn column_names_resolve() {
        let table = table_with(1);
        let span = RangeSpec::parse("Count")
            .unwrap()
            .resolve_cols(&table)
            .unwrap();
        assert_eq!(span, Span { start: 1, end: 2 });

        let span = RangeSpec::parse("Flag-Ratio")
            .unwrap()
            .resolve_cols(&table)
            .unwrap();
        assert_eq!(span, Span { start: 0, end: 3 });
    }

    #[test]
    fn mixed_index_and_name_bounds() {
        let table = table_with(1);
        let span = RangeSpec::parse("0-Count")
            .unwrap()
            .resolve_cols(&table)
            .unwrap();
        assert_eq!(span, Span { start: 0, end: 2 });
    }

    #[test]
    fn unknown_column_name_is_range_error() {
        let table = table_with(1);
        let result = RangeSpec::parse("Missing").unwrap().resolve_cols(&table);
        assert!(matches!(result, Err(Error::Range(_))));
    }

    #[test]
    fn overlap_detection() {
        let a = Span { start: 2, end: 5 };
        let b = Span { start: 3, end: 6 };
        let c = Span { start: 5, end: 7 };
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }
}
