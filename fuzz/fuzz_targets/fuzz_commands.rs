//! Fuzz testing for the command interpreter.
//!
//! Feeds arbitrary command lines to a small mixed-type table and checks
//! the rejection contract: a rejected command must leave the table
//! exactly as it was, and no line may panic the interpreter.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use binsheet::commands::{self, CommandOutcome};
use binsheet::{Table, TypeTag, Value};

#[derive(Debug, Arbitrary)]
struct CommandInput {
    lines: Vec<String>,
    fixed: bool,
}

fn small_table() -> Table {
    let mut table = Table::new(vec![
        TypeTag::U8,
        TypeTag::I16,
        TypeTag::F32,
        TypeTag::BYTES,
    ])
    .expect("building table");
    table
        .set_headers(vec![
            "Num".to_string(),
            "Val".to_string(),
            "Pos".to_string(),
            "Raw".to_string(),
        ])
        .expect("headers");
    for i in 0..4i64 {
        let row = i as usize;
        table.add_empty_row().expect("row");
        table
            .set_value(row, 0, &Value::Uint(i as u64))
            .expect("Num");
        table.set_value(row, 1, &Value::Int(-i)).expect("Val");
        table
            .set_value(row, 2, &Value::Float(i as f64 * 0.5))
            .expect("Pos");
    }
    table
}

fn snapshot(table: &Table) -> Vec<Vec<u8>> {
    (0..table.row_count())
        .map(|row| {
            (0..table.column_count())
                .flat_map(|col| table.cell(row, col).expect("cell in range").to_vec())
                .collect()
        })
        .collect()
}

/// Counts above four digits only exercise the allocator.
fn has_long_number(line: &str) -> bool {
    let mut run = 0;
    for b in line.bytes() {
        if b.is_ascii_digit() {
            run += 1;
            if run > 4 {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

fuzz_target!(|input: CommandInput| {
    if input.lines.len() > 8 {
        return;
    }

    let mut table = small_table();
    table.set_fixed_size(input.fixed);

    for line in &input.lines {
        if line.len() > 256 || has_long_number(line) {
            continue;
        }
        let before = snapshot(&table);
        match commands::apply_line(&mut table, line) {
            CommandOutcome::Applied => {}
            CommandOutcome::Rejected(_) => assert_eq!(snapshot(&table), before),
        }
    }
});
