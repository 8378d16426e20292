//! Rectangular row/column slices copied out of a table.
//!
//! A `Range` owns a deep copy of the covered cell bytes and never aliases
//! the source table, so the table is free to mutate (or drop) while the
//! range is alive. Pasting reuses source rows cyclically when the
//! destination is taller than the range.

/// A deep-copied rectangle of table cells.
///
/// Rows hold only the byte span of the covered columns, end-exclusive on
/// both axes. Construction goes through
/// [`Table::extract_range`](crate::table::Table::extract_range), which
/// guarantees at least one row and one column.
#[derive(Debug, Clone)]
pub struct Range {
    col_start: usize,
    col_end: usize,
    span_len: usize,
    rows: Vec<Vec<u8>>,
}

impl Range {
    pub(crate) fn new(col_start: usize, col_end: usize, span_len: usize, rows: Vec<Vec<u8>>) -> Self {
        Range {
            col_start,
            col_end,
            span_len,
            rows,
        }
    }

    /// Number of copied rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of covered columns.
    pub fn width(&self) -> usize {
        self.col_end - self.col_start
    }

    pub fn col_start(&self) -> usize {
        self.col_start
    }

    pub fn col_end(&self) -> usize {
        self.col_end
    }

    /// Byte length of one copied row span.
    pub fn span_len(&self) -> usize {
        self.span_len
    }

    /// The copied bytes of row `index`, cyclically reused: `index` wraps
    /// modulo [`height`](Self::height).
    pub fn row_span(&self, index: usize) -> &[u8] {
        &self.rows[index % self.rows.len()]
    }
}
