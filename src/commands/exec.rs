//! # Command Execution
//!
//! Applies a parsed [`Command`] to a [`Table`]. Every command resolves
//! ranges and validates types in a first pass and only then mutates, so
//! a rejected command leaves the table byte-for-byte unchanged.

use super::parser::Command;
use super::range::{RangeSpec, Span};
use crate::error::{Error, Result};
use crate::table::Table;
use crate::types::{TypeCategory, Value};

/// Executes one command against the table.
pub fn execute(table: &mut Table, command: &Command) -> Result<()> {
    match command {
        Command::Set {
            cols,
            rows,
            value,
            increment,
            stride,
        } => exec_set(table, cols, rows.as_ref(), value, increment.as_deref(), *stride),
        Command::Swap { first, second } => exec_swap(table, first, second),
        Command::Replace { dest, src, cols } => exec_replace(table, dest, src, cols.as_ref()),
        Command::Add { count, matching } => exec_add(table, *count, matching.as_ref()),
        Command::Delete { rows } => exec_delete(table, rows.as_ref()),
        Command::Insert {
            count,
            at,
            matching,
        } => exec_insert(table, *count, *at, matching.as_ref()),
    }
}

/// Per-column write plan for `Set`. Increments restart from the base
/// value in each column.
enum SetPlan {
    Plain(Value),
    Integer { base: i128, step: i128 },
    Float { base: f64, step: f64 },
}

fn exec_set(
    table: &mut Table,
    cols: &RangeSpec,
    rows: Option<&RangeSpec>,
    value: &str,
    increment: Option<&str>,
    stride: usize,
) -> Result<()> {
    let col_span = cols.resolve_cols(table)?;
    let row_span = match rows {
        Some(spec) => spec.resolve_rows(table)?,
        None => Span::all_rows(table),
    };
    // The parser never emits zero, but step_by panics on it.
    if stride == 0 {
        return Err(Error::syntax("stride must be positive"));
    }

    // Validate every column before the first write.
    let mut plans = Vec::with_capacity(col_span.len());
    for col in col_span.iter() {
        let tag = table
            .column_tag(col)
            .ok_or_else(|| Error::range(format!("column {} out of range", col)))?;
        let plan = match increment {
            None => SetPlan::Plain(tag.parse_text(value)?),
            Some(step) => match tag.category() {
                TypeCategory::Float => SetPlan::Float {
                    base: parse_float(value)?,
                    step: parse_float(step)?,
                },
                TypeCategory::SignedInt | TypeCategory::UnsignedInt => SetPlan::Integer {
                    base: parse_integer(value)?,
                    step: parse_integer(step)?,
                },
                _ => {
                    return Err(Error::type_mismatch(format!(
                        "cannot increment a {} column",
                        tag
                    )));
                }
            },
        };
        plans.push((col, plan));
    }

    for (col, plan) in &plans {
        for (k, row) in row_span.iter().step_by(stride).enumerate() {
            let value = match plan {
                SetPlan::Plain(v) => v.clone(),
                SetPlan::Integer { base, step } => {
                    Value::Int((base + step * k as i128) as i64)
                }
                SetPlan::Float { base, step } => Value::Float(base + step * k as f64),
            };
            table.set_value(row, *col, &value)?;
        }
    }
    Ok(())
}

fn parse_integer(text: &str) -> Result<i128> {
    text.parse::<i128>()
        .map_err(|_| Error::type_mismatch(format!("'{}' is not an integer", text)))
}

fn parse_float(text: &str) -> Result<f64> {
    text.parse::<f64>()
        .map_err(|_| Error::type_mismatch(format!("'{}' is not a number", text)))
}

fn exec_swap(table: &mut Table, first: &RangeSpec, second: &RangeSpec) -> Result<()> {
    let a = first.resolve_rows(table)?;
    let b = second.resolve_rows(table)?;
    if a.len() != b.len() {
        return Err(Error::range(format!(
            "cannot swap {} rows with {} rows",
            a.len(),
            b.len()
        )));
    }
    if a.overlaps(&b) {
        return Err(Error::range("swap ranges overlap"));
    }
    for offset in 0..a.len() {
        table.swap_rows(a.start + offset, b.start + offset)?;
    }
    Ok(())
}

fn exec_replace(
    table: &mut Table,
    dest: &RangeSpec,
    src: &RangeSpec,
    cols: Option<&RangeSpec>,
) -> Result<()> {
    let dest_span = dest.resolve_rows(table)?;
    let src_span = src.resolve_rows(table)?;
    let col_span = match cols {
        Some(spec) => spec.resolve_cols(table)?,
        None => Span::all_cols(table),
    };
    let range = table.extract_range(src_span.start, col_span.start, src_span.end, col_span.end)?;
    table.paste_range(&range, dest_span.start, dest_span.end)
}

fn exec_add(table: &mut Table, count: usize, matching: Option<&RangeSpec>) -> Result<()> {
    // Extract before growing so the source cannot include the new rows.
    let pattern = match matching {
        Some(spec) => {
            let span = spec.resolve_rows(table)?;
            Some(table.extract_range(span.start, 0, span.end, table.column_count())?)
        }
        None => None,
    };
    let start = table.row_count();
    for _ in 0..count {
        table.add_empty_row()?;
    }
    if let Some(range) = pattern {
        table.paste_range(&range, start, start + count)?;
    }
    Ok(())
}

fn exec_delete(table: &mut Table, rows: Option<&RangeSpec>) -> Result<()> {
    let span = match rows {
        Some(spec) => spec.resolve_rows(table)?,
        None => {
            if table.row_count() == 0 {
                return Err(Error::range("table has no rows"));
            }
            Span {
                start: table.row_count() - 1,
                end: table.row_count(),
            }
        }
    };
    for _ in span.iter() {
        table.delete_row(span.start)?;
    }
    Ok(())
}

fn exec_insert(
    table: &mut Table,
    count: usize,
    at: usize,
    matching: Option<&RangeSpec>,
) -> Result<()> {
    let pattern = match matching {
        Some(spec) => {
            let span = spec.resolve_rows(table)?;
            Some(table.extract_range(span.start, 0, span.end, table.column_count())?)
        }
        None => None,
    };
    table.insert_rows(at, count)?;
    if let Some(range) = pattern {
        table.paste_range(&range, at, at + count)?;
    }
    Ok(())
}
