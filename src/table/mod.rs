//! # Generic Fixed-Width Table
//!
//! This module provides the dynamically-typed tabular store the command
//! interpreter operates on: ordered [`TypeTag`] columns, precomputed byte
//! offsets for O(1) cell addressing, optional header names, a default row
//! for fills, and rectangular [`Range`] extraction with cyclic paste.
//!
//! ## Row Layout
//!
//! Every row is one contiguous fixed-width buffer. Column `c` of a row
//! occupies bytes `[offsets[c], offsets[c + 1])`; `offsets` carries one
//! trailing entry so `offsets[column_count]` is the row width.
//!
//! ```text
//! offsets:  0     1     3     7
//! row:      [u8 ][u16      ][u32            ]
//! ```
//!
//! ## Mutation Rules
//!
//! - Cells store raw big-endian bytes; conversion happens through the
//!   column's [`TypeTag`] at the edges.
//! - `fixed_size` disables every operation that changes the row count
//!   (add, insert, delete). Swapping and overwriting stay allowed.
//! - Every mutating operation validates all of its inputs before touching
//!   a row, so a failed call leaves the table unchanged.

mod range;

pub use range::Range;

use crate::error::{Error, Result};
use crate::types::{TypeTag, Value};
use hashbrown::HashMap;

/// Columnar store with fixed-width rows and offset-addressed cells.
#[derive(Debug, Clone)]
pub struct Table {
    tags: Vec<TypeTag>,
    offsets: Vec<usize>,
    headers: Vec<Option<String>>,
    header_index: HashMap<String, usize>,
    default_row: Vec<u8>,
    rows: Vec<Vec<u8>>,
    fixed_size: bool,
}

impl Table {
    /// Creates an empty table over the given column types.
    ///
    /// Section tags cannot back a column. The default row starts zeroed.
    pub fn new(tags: Vec<TypeTag>) -> Result<Self> {
        let mut offsets = Vec::with_capacity(tags.len() + 1);
        let mut offset = 0;
        offsets.push(0);
        for tag in &tags {
            if tag.is_section() {
                return Err(Error::schema(
                    "section placeholders cannot back a table column",
                ));
            }
            offset += tag.size();
            offsets.push(offset);
        }
        let headers = vec![None; tags.len()];
        Ok(Table {
            tags,
            offsets,
            headers,
            header_index: HashMap::new(),
            default_row: vec![0; offset],
            rows: Vec::new(),
            fixed_size: false,
        })
    }

    /// Overwrites the default row cell by cell.
    pub fn set_defaults(&mut self, values: &[Value]) -> Result<()> {
        if values.len() != self.tags.len() {
            return Err(Error::schema(format!(
                "{} default values for {} columns",
                values.len(),
                self.tags.len()
            )));
        }
        for (col, value) in values.iter().enumerate() {
            let tag = self.tags[col];
            let span = self.offsets[col]..self.offsets[col + 1];
            tag.encode_into(value, &mut self.default_row[span])?;
        }
        Ok(())
    }

    /// Names every column. On duplicate names the first occurrence wins
    /// for lookup.
    pub fn set_headers(&mut self, headers: Vec<String>) -> Result<()> {
        if headers.len() != self.tags.len() {
            return Err(Error::schema(format!(
                "{} headers for {} columns",
                headers.len(),
                self.tags.len()
            )));
        }
        self.header_index.clear();
        for (col, name) in headers.iter().enumerate() {
            self.header_index.entry(name.clone()).or_insert(col);
        }
        self.headers = headers.into_iter().map(Some).collect();
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.tags.len()
    }

    pub fn column_tag(&self, col: usize) -> Option<TypeTag> {
        self.tags.get(col).copied()
    }

    pub fn header(&self, col: usize) -> Option<&str> {
        self.headers.get(col)?.as_deref()
    }

    pub fn row_width(&self) -> usize {
        self.default_row.len()
    }

    pub fn is_fixed_size(&self) -> bool {
        self.fixed_size
    }

    pub fn set_fixed_size(&mut self, fixed: bool) {
        self.fixed_size = fixed;
    }

    /// Column index for a header name.
    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.header_index.get(name).copied()
    }

    /// Appends one row built from per-column values.
    pub fn add_row(&mut self, values: &[Value]) -> Result<()> {
        self.ensure_resizable("add")?;
        if values.len() != self.tags.len() {
            return Err(Error::schema(format!(
                "{} values for {} columns",
                values.len(),
                self.tags.len()
            )));
        }
        let mut row = self.default_row.clone();
        for (col, value) in values.iter().enumerate() {
            let tag = self.tags[col];
            let span = self.offsets[col]..self.offsets[col + 1];
            tag.encode_into(value, &mut row[span])?;
        }
        self.rows.push(row);
        Ok(())
    }

    /// Appends one copy of the default row.
    pub fn add_empty_row(&mut self) -> Result<()> {
        self.ensure_resizable("add")?;
        self.rows.push(self.default_row.clone());
        Ok(())
    }

    /// Raw big-endian bytes of one cell.
    pub fn cell(&self, row: usize, col: usize) -> Result<&[u8]> {
        self.check_cell(row, col)?;
        Ok(&self.rows[row][self.offsets[col]..self.offsets[col + 1]])
    }

    /// Overwrites one cell with raw bytes of exactly the column width.
    pub fn set_cell(&mut self, row: usize, col: usize, raw: &[u8]) -> Result<()> {
        self.check_cell(row, col)?;
        let span = self.offsets[col]..self.offsets[col + 1];
        if raw.len() != span.len() {
            return Err(Error::type_mismatch(format!(
                "column {} holds {}-byte cells, got {}",
                col,
                span.len(),
                raw.len()
            )));
        }
        self.rows[row][span].copy_from_slice(raw);
        Ok(())
    }

    /// Decodes one cell through its column tag.
    pub fn value(&self, row: usize, col: usize) -> Result<Value> {
        let tag = self.tags[self.check_cell(row, col)?];
        tag.decode(&self.rows[row][self.offsets[col]..self.offsets[col + 1]])
    }

    /// Encodes a value into one cell through its column tag.
    pub fn set_value(&mut self, row: usize, col: usize, value: &Value) -> Result<()> {
        let tag = self.tags[self.check_cell(row, col)?];
        let span = self.offsets[col]..self.offsets[col + 1];
        tag.encode_into(value, &mut self.rows[row][span])
    }

    /// All values of one column, top to bottom.
    pub fn column_values(&self, col: usize) -> Result<Vec<Value>> {
        if col >= self.tags.len() {
            return Err(Error::range(format!(
                "column {} out of range ({} columns)",
                col,
                self.tags.len()
            )));
        }
        (0..self.rows.len()).map(|row| self.value(row, col)).collect()
    }

    pub fn delete_row(&mut self, row: usize) -> Result<()> {
        self.ensure_resizable("delete")?;
        if row >= self.rows.len() {
            return Err(Error::range(format!(
                "row {} out of range ({} rows)",
                row,
                self.rows.len()
            )));
        }
        self.rows.remove(row);
        Ok(())
    }

    /// Swaps two whole rows. Allowed on fixed-size tables; the row count
    /// does not change.
    pub fn swap_rows(&mut self, a: usize, b: usize) -> Result<()> {
        if a >= self.rows.len() || b >= self.rows.len() {
            return Err(Error::range(format!(
                "rows {} and {} must both be below {}",
                a,
                b,
                self.rows.len()
            )));
        }
        self.rows.swap(a, b);
        Ok(())
    }

    /// Inserts `count` default-filled rows before `at`, shifting the rest
    /// down.
    pub fn insert_rows(&mut self, at: usize, count: usize) -> Result<()> {
        self.ensure_resizable("insert")?;
        if at > self.rows.len() {
            return Err(Error::range(format!(
                "insert position {} out of range ({} rows)",
                at,
                self.rows.len()
            )));
        }
        let default = self.default_row.clone();
        self.rows
            .splice(at..at, std::iter::repeat_with(|| default.clone()).take(count));
        Ok(())
    }

    /// Deep-copies the rectangle `[row_start, row_end) x [col_start,
    /// col_end)` out of the table. Both ends are exclusive and the
    /// rectangle must be non-empty.
    pub fn extract_range(
        &self,
        row_start: usize,
        col_start: usize,
        row_end: usize,
        col_end: usize,
    ) -> Result<Range> {
        self.check_row_span(row_start, row_end)?;
        self.check_col_span(col_start, col_end)?;
        let byte_span = self.offsets[col_start]..self.offsets[col_end];
        let rows = self.rows[row_start..row_end]
            .iter()
            .map(|row| row[byte_span.clone()].to_vec())
            .collect();
        Ok(Range::new(col_start, col_end, byte_span.len(), rows))
    }

    /// Pastes a range onto `[dest_row_start, dest_row_end)`, reusing
    /// source rows cyclically. Only the range's column span is touched.
    pub fn paste_range(
        &mut self,
        range: &Range,
        dest_row_start: usize,
        dest_row_end: usize,
    ) -> Result<()> {
        self.check_row_span(dest_row_start, dest_row_end)?;
        if range.col_end() > self.tags.len() {
            return Err(Error::range(format!(
                "range covers columns up to {} but the table has {}",
                range.col_end(),
                self.tags.len()
            )));
        }
        let byte_span = self.offsets[range.col_start()]..self.offsets[range.col_end()];
        if byte_span.len() != range.span_len() {
            return Err(Error::range(
                "range column layout does not match this table",
            ));
        }
        for row in dest_row_start..dest_row_end {
            self.rows[row][byte_span.clone()]
                .copy_from_slice(range.row_span(row - dest_row_start));
        }
        Ok(())
    }

    fn ensure_resizable(&self, what: &str) -> Result<()> {
        if self.fixed_size {
            return Err(Error::fixed_size(format!("cannot {} rows", what)));
        }
        Ok(())
    }

    fn check_cell(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows.len() {
            return Err(Error::range(format!(
                "row {} out of range ({} rows)",
                row,
                self.rows.len()
            )));
        }
        if col >= self.tags.len() {
            return Err(Error::range(format!(
                "column {} out of range ({} columns)",
                col,
                self.tags.len()
            )));
        }
        Ok(col)
    }

    fn check_row_span(&self, start: usize, end: usize) -> Result<()> {
        if start >= end {
            return Err(Error::range(format!(
                "row range {}..{} is empty or reversed",
                start, end
            )));
        }
        if end > self.rows.len() {
            return Err(Error::range(format!(
                "row range {}..{} exceeds {} rows",
                start,
                end,
                self.rows.len()
            )));
        }
        Ok(())
    }

    fn check_col_span(&self, start: usize, end: usize) -> Result<()> {
        if start >= end {
            return Err(Error::range(format!(
                "column range {}..{} is empty or reversed",
                start, end
            )));
        }
        if end > self.tags.len() {
            return Err(Error::range(format!(
                "column range {}..{} exceeds {} columns",
                start,
                end,
                self.tags.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        let mut table = Table::new(vec![TypeTag::U8, TypeTag::U16, TypeTag::F32]).unwrap();
        table
            .set_headers(vec!["Flag".into(), "Count".into(), "Ratio".into()])
            .unwrap();
        for i in 0..4u64 {
            table
                .add_row(&[
                    Value::Uint(i),
                    Value::Uint(i * 100),
                    Value::Float(i as f64 / 2.0),
                ])
                .unwrap();
        }
        table
    }

    #[test]
    fn offsets_accumulate_column_widths() {
        let table = sample_table();
        assert_eq!(table.row_width(), 1 + 2 + 4);
        assert_eq!(table.cell(1, 1).unwrap(), &[0x00, 0x64]);
        assert_eq!(table.value(3, 2).unwrap(), Value::Float(1.5));
    }

    #[test]
    fn section_column_rejected() {
        let result = Table::new(vec![TypeTag::U8, TypeTag::section()]);
        assert!(matches!(result, Err(Error::Schema(_))));
    }

    #[test]
    fn defaults_fill_new_rows() {
        let mut table = Table::new(vec![TypeTag::U16, TypeTag::U8]).unwrap();
        table
            .set_defaults(&[Value::Uint(7), Value::Uint(1)])
            .unwrap();
        table.add_empty_row().unwrap();
        assert_eq!(table.value(0, 0).unwrap(), Value::Uint(7));
        assert_eq!(table.value(0, 1).unwrap(), Value::Uint(1));
    }

    #[test]
    fn headers_resolve_first_occurrence() {
        let mut table = Table::new(vec![TypeTag::U8, TypeTag::U8, TypeTag::U8]).unwrap();
        table
            .set_headers(vec!["A".into(), "B".into(), "A".into()])
            .unwrap();
        assert_eq!(table.find_column("A"), Some(0));
        assert_eq!(table.find_column("B"), Some(1));
        assert_eq!(table.find_column("C"), None);
        assert_eq!(table.header(2), Some("A"));
    }

    #[test]
    fn add_then_delete_last_restores_rows() {
        let mut table = sample_table();
        let before: Vec<Vec<u8>> = (0..table.row_count())
            .map(|r| {
                (0..table.column_count())
                    .flat_map(|c| table.cell(r, c).unwrap().to_vec())
                    .collect()
            })
            .collect();

        table.add_empty_row().unwrap();
        table.delete_row(table.row_count() - 1).unwrap();

        assert_eq!(table.row_count(), before.len());
        for (r, expected) in before.iter().enumerate() {
            let actual: Vec<u8> = (0..table.column_count())
                .flat_map(|c| table.cell(r, c).unwrap().to_vec())
                .collect();
            assert_eq!(&actual, expected);
        }
    }

    #[test]
    fn swap_exchanges_whole_rows() {
        let mut table = sample_table();
        table.swap_rows(0, 3).unwrap();
        assert_eq!(table.value(0, 1).unwrap(), Value::Uint(300));
        assert_eq!(table.value(3, 1).unwrap(), Value::Uint(0));
    }

    #[test]
    fn insert_shifts_rows_down() {
        let mut table = sample_table();
        table.insert_rows(1, 2).unwrap();
        assert_eq!(table.row_count(), 6);
        assert_eq!(table.value(1, 1).unwrap(), Value::Uint(0));
        assert_eq!(table.value(2, 1).unwrap(), Value::Uint(0));
        assert_eq!(table.value(3, 1).unwrap(), Value::Uint(100));
    }

    #[test]
    fn cyclic_paste_reuses_source_rows() {
        let mut table = sample_table();
        table.set_value(0, 1, &Value::Uint(5)).unwrap();
        table.set_value(1, 1, &Value::Uint(6)).unwrap();

        let range = table.extract_range(0, 1, 2, 2).unwrap();
        assert_eq!(range.height(), 2);
        assert_eq!(range.width(), 1);
        table.paste_range(&range, 0, 4).unwrap();

        let counts: Vec<Value> = table.column_values(1).unwrap();
        assert_eq!(
            counts,
            vec![
                Value::Uint(5),
                Value::Uint(6),
                Value::Uint(5),
                Value::Uint(6)
            ]
        );
    }

    #[test]
    fn paste_touches_only_covered_columns() {
        let mut table = sample_table();
        let range = table.extract_range(0, 1, 1, 2).unwrap();
        table.paste_range(&range, 3, 4).unwrap();
        // column 0 and 2 of row 3 keep their old values
        assert_eq!(table.value(3, 0).unwrap(), Value::Uint(3));
        assert_eq!(table.value(3, 1).unwrap(), Value::Uint(0));
        assert_eq!(table.value(3, 2).unwrap(), Value::Float(1.5));
    }

    #[test]
    fn reversed_or_empty_spans_rejected() {
        let table = sample_table();
        assert!(matches!(
            table.extract_range(3, 0, 1, 2),
            Err(Error::Range(_))
        ));
        assert!(matches!(
            table.extract_range(1, 2, 2, 2),
            Err(Error::Range(_))
        ));
        assert!(matches!(
            table.extract_range(0, 0, 9, 1),
            Err(Error::Range(_))
        ));
    }

    #[test]
    fn fixed_size_blocks_resizing_but_not_swaps() {
        let mut table = sample_table();
        table.set_fixed_size(true);
        assert!(matches!(table.add_empty_row(), Err(Error::FixedSize(_))));
        assert!(matches!(table.delete_row(0), Err(Error::FixedSize(_))));
        assert!(matches!(table.insert_rows(0, 1), Err(Error::FixedSize(_))));
        assert!(table.swap_rows(0, 1).is_ok());
        assert!(table.set_value(0, 0, &Value::Uint(9)).is_ok());
        assert_eq!(table.row_count(), 4);
    }

    #[test]
    fn set_cell_validates_width() {
        let mut table = sample_table();
        assert!(matches!(
            table.set_cell(0, 1, &[1, 2, 3]),
            Err(Error::Type(_))
        ));
        table.set_cell(0, 1, &[0x01, 0x02]).unwrap();
        assert_eq!(table.value(0, 1).unwrap(), Value::Uint(0x0102));
    }
}
