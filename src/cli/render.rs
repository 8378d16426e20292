//! # Table View
//!
//! Renders the projected table as an ASCII grid with a leading row-id
//! column:
//!
//! ```text
//!   id | Lig | AmI | AmR |
//! -----+-----+-----+-----+
//!    0 |   1 |   0 | 255 |
//!    1 |   0 |   3 |  16 |
//! ```
//!
//! ## Column Width Calculation
//!
//! Column widths are the maximum of the header length, the longest
//! formatted cell, and [`MIN_COLUMN_WIDTH`]. Cells are right-aligned
//! since the data is predominantly numeric; floats are rendered with
//! [`FLOAT_PRECISION`] fractional digits, byte cells as hex pairs, char
//! cells as their raw bytes.
//!
//! The formatter makes two passes: one to format cells and settle
//! widths, one to emit the grid.

use std::fmt::Write;

use crate::config::{FLOAT_PRECISION, ID_COLUMN_WIDTH, MIN_COLUMN_WIDTH};
use crate::error::Result;
use crate::table::Table;
use crate::types::FormatSpec;

pub struct TableView {
    headers: Vec<String>,
    widths: Vec<usize>,
    id_width: usize,
    rows: Vec<Vec<String>>,
}

impl TableView {
    pub fn new(table: &Table) -> Result<Self> {
        let spec = FormatSpec::with_precision(FLOAT_PRECISION);

        let headers: Vec<String> = (0..table.column_count())
            .map(|col| table.header(col).unwrap_or("").to_string())
            .collect();
        let mut widths: Vec<usize> = headers
            .iter()
            .map(|h| h.len().max(MIN_COLUMN_WIDTH))
            .collect();

        let mut rows = Vec::with_capacity(table.row_count());
        for row in 0..table.row_count() {
            let mut cells = Vec::with_capacity(table.column_count());
            for col in 0..table.column_count() {
                let tag = match table.column_tag(col) {
                    Some(tag) => tag,
                    None => continue,
                };
                let text = tag.format(table.cell(row, col)?, &spec)?;
                widths[col] = widths[col].max(text.len());
                cells.push(text);
            }
            rows.push(cells);
        }

        let id_width = match table.row_count() {
            0 => ID_COLUMN_WIDTH,
            n => ID_COLUMN_WIDTH.max((n - 1).to_string().len()),
        };

        Ok(TableView {
            headers,
            widths,
            id_width,
            rows,
        })
    }

    pub fn render(&self) -> String {
        let mut output = String::new();
        self.write_header(&mut output);
        self.write_separator(&mut output);
        for (id, row) in self.rows.iter().enumerate() {
            self.write_row(&mut output, id, row);
        }
        output
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn write_header(&self, output: &mut String) {
        let _ = write!(output, " {:>width$} |", "id", width = self.id_width);
        for (i, header) in self.headers.iter().enumerate() {
            let _ = write!(output, " {:>width$} |", header, width = self.widths[i]);
        }
        output.push('\n');
    }

    fn write_separator(&self, output: &mut String) {
        for _ in 0..self.id_width + 2 {
            output.push('-');
        }
        output.push('+');
        for width in &self.widths {
            for _ in 0..width + 2 {
                output.push('-');
            }
            output.push('+');
        }
        output.push('\n');
    }

    fn write_row(&self, output: &mut String, id: usize, row: &[String]) {
        let _ = write!(output, " {:>width$} |", id, width = self.id_width);
        for (i, cell) in row.iter().enumerate() {
            let _ = write!(output, " {:>width$} |", cell, width = self.widths[i]);
        }
        output.push('\n');
    }
}

/// Formats the whole table for display.
pub fn render_table(table: &Table) -> Result<String> {
    Ok(TableView::new(table)?.render())
}
