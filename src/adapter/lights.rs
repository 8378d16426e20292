//! # Light Set Adapter
//!
//! Adapter for light-placement files: a 40-byte header followed by 16
//! lamp sections of 80 bytes and 16 ambient-color sections of 8 bytes,
//! 1448 bytes in total. All integers are big-endian; floats are
//! big-endian IEEE-754.
//!
//! ## Table Projection
//!
//! One table row per lamp, 17 columns:
//!
//! | Columns | Source |
//! |---------|--------|
//! | `Lig` | lamp kind byte |
//! | `AmI` | ambient index (u16) |
//! | `AmR AmG AmB AmA` | rgba of the ambient section the lamp points at |
//! | `OriginX..OriginZ` | lamp origin (3 × f32) |
//! | `DestinX..DestinZ` | lamp destination (3 × f32) |
//! | `Effect` | lamp color effect (f32) |
//! | `LiR LiG LiB LiA` | lamp rgba |
//!
//! The ambient columns follow the lamp's `AmI` indirection in both
//! directions, so editing `AmI` before an ambient color writes the
//! color into the newly referenced section. Unedited files re-encode
//! byte-identically. The table is fixed-size: the 16 rows mirror the 16
//! lamp sections and cannot be added to or deleted.

use super::FormatAdapter;
use crate::error::{Error, Result};
use crate::schema::Template;
use crate::table::Table;
use crate::tree::{Hub, Section};
use crate::types::{TypeTag, Value};

pub const LAMP_COUNT: usize = 16;
pub const AMBIENT_COUNT: usize = 16;

const COL_KIND: usize = 0;
const COL_AMBIENT_INDEX: usize = 1;
const COL_AMBIENT_RGBA: usize = 2;
const COL_ORIGIN: usize = 6;
const COL_DESTINATION: usize = 9;
const COL_EFFECT: usize = 12;
const COL_LAMP_RGBA: usize = 13;

const COLUMNS: [TypeTag; 17] = [
    TypeTag::U8,
    TypeTag::U16,
    TypeTag::U8,
    TypeTag::U8,
    TypeTag::U8,
    TypeTag::U8,
    TypeTag::F32,
    TypeTag::F32,
    TypeTag::F32,
    TypeTag::F32,
    TypeTag::F32,
    TypeTag::F32,
    TypeTag::F32,
    TypeTag::U8,
    TypeTag::U8,
    TypeTag::U8,
    TypeTag::U8,
];

const HEADERS: [&str; 17] = [
    "Lig", "AmI", "AmR", "AmG", "AmB", "AmA", "OriginX", "OriginY", "OriginZ", "DestinX",
    "DestinY", "DestinZ", "Effect", "LiR", "LiG", "LiB", "LiA",
];

/// The built-in light-placement format.
#[derive(Debug, Default)]
pub struct LightSet;

impl FormatAdapter for LightSet {
    fn name(&self) -> &str {
        "lightset"
    }

    fn template(&self) -> Result<Template> {
        let mut root = Template::new("lightset");
        root.add_field(TypeTag::CHAR, "magic", 4)?;
        root.add_field(TypeTag::U32, "file_size", 1)?;
        root.add_field(TypeTag::U8, "version", 1)?;
        root.add_field(TypeTag::BYTES, "padding", 3)?;
        root.add_field(TypeTag::U32, "unknown0", 1)?;
        root.add_field(TypeTag::U16, "lamp_count", 1)?;
        root.add_field(TypeTag::U16, "ambient_count", 1)?;
        root.add_field(TypeTag::BYTES, "unknown1", 4)?;
        root.add_field(TypeTag::BYTES, "pad_end", 16)?;

        let mut lamp = Template::repeated("lamp", LAMP_COUNT)?;
        lamp.add_field(TypeTag::CHAR, "magic", 4)?;
        lamp.add_field(TypeTag::U32, "section_size", 1)?;
        lamp.add_field(TypeTag::U8, "version", 1)?;
        lamp.add_field(TypeTag::BYTES, "padding", 3)?;
        lamp.add_field(TypeTag::U32, "unknown0", 1)?;
        lamp.add_field(TypeTag::U16, "unknown1", 1)?;
        lamp.add_field(TypeTag::U8, "kind", 1)?;
        lamp.add_field(TypeTag::BYTES, "unknown2", 1)?;
        lamp.add_field(TypeTag::U16, "ambient_index", 1)?;
        lamp.add_field(TypeTag::U16, "unknown3", 1)?;
        lamp.add_field(TypeTag::F32, "origin", 3)?;
        lamp.add_field(TypeTag::F32, "destination", 3)?;
        lamp.add_field(TypeTag::F32, "effect", 1)?;
        lamp.add_field(TypeTag::U8, "rgba", 4)?;
        lamp.add_field(TypeTag::U32, "unknown4", 1)?;
        lamp.add_field(TypeTag::F32, "unknown5", 3)?;
        lamp.add_field(TypeTag::BYTES, "pad_end", 8)?;
        root.add_subtemplate(lamp);

        let mut ambient = Template::repeated("ambient", AMBIENT_COUNT)?;
        ambient.add_field(TypeTag::U8, "rgba", 4)?;
        ambient.add_field(TypeTag::BYTES, "padding", 4)?;
        root.add_subtemplate(ambient);

        Ok(root)
    }

    fn build_table(&self, hubs: &[Hub]) -> Result<Table> {
        let root = hubs
            .first()
            .ok_or_else(|| Error::structural("no decoded instance to project"))?;
        let lamps = section(root, "lamp")?;
        let ambients = section(root, "ambient")?;

        let mut table = Table::new(COLUMNS.to_vec())?;
        table.set_headers(HEADERS.iter().map(|h| h.to_string()).collect())?;
        for _ in 0..LAMP_COUNT {
            table.add_empty_row()?;
        }

        for row in 0..LAMP_COUNT {
            let lamp = lamps.get(row).ok_or_else(|| {
                Error::structural(format!(
                    "lamp section holds {} instances, expected {}",
                    lamps.len(),
                    LAMP_COUNT
                ))
            })?;
            copy_from_node(&mut table, row, COL_KIND, lamp, "kind", 1)?;
            copy_from_node(&mut table, row, COL_AMBIENT_INDEX, lamp, "ambient_index", 1)?;

            let slot = ambient_slot(lamp)?;
            let ambient = ambients.get(slot).ok_or_else(|| {
                Error::range(format!(
                    "lamp {} references ambient {}, file holds {}",
                    row,
                    slot,
                    ambients.len()
                ))
            })?;
            copy_from_node(&mut table, row, COL_AMBIENT_RGBA, ambient, "rgba", 4)?;

            copy_from_node(&mut table, row, COL_ORIGIN, lamp, "origin", 3)?;
            copy_from_node(&mut table, row, COL_DESTINATION, lamp, "destination", 3)?;
            copy_from_node(&mut table, row, COL_EFFECT, lamp, "effect", 1)?;
            copy_from_node(&mut table, row, COL_LAMP_RGBA, lamp, "rgba", 4)?;
        }

        table.set_fixed_size(true);
        Ok(table)
    }

    fn flush_table(&self, table: &Table, hubs: &mut [Hub]) -> Result<()> {
        if table.row_count() != LAMP_COUNT {
            return Err(Error::structural(format!(
                "table holds {} rows, expected {}",
                table.row_count(),
                LAMP_COUNT
            )));
        }
        let root = hubs
            .first_mut()
            .ok_or_else(|| Error::structural("no decoded instance to flush into"))?;
        for row in 0..LAMP_COUNT {
            flush_row(table, root, row)?;
        }
        Ok(())
    }
}

/// Writes one row back. The ambient index is written first so the
/// ambient color lands in the section the row now points at.
fn flush_row(table: &Table, root: &mut Hub, row: usize) -> Result<()> {
    {
        let lamp = lamp_mut(root, row)?;
        copy_into_node(table, row, COL_KIND, lamp, "kind", 1)?;
        copy_into_node(table, row, COL_AMBIENT_INDEX, lamp, "ambient_index", 1)?;
    }

    let slot = ambient_slot(lamp_ref(root, row)?)?;
    {
        let ambients = section_mut(root, "ambient")?;
        let count = ambients.len();
        let ambient = ambients.get_mut(slot).ok_or_else(|| {
            Error::range(format!(
                "lamp {} references ambient {}, file holds {}",
                row, slot, count
            ))
        })?;
        copy_into_node(table, row, COL_AMBIENT_RGBA, ambient, "rgba", 4)?;
    }

    let lamp = lamp_mut(root, row)?;
    copy_into_node(table, row, COL_ORIGIN, lamp, "origin", 3)?;
    copy_into_node(table, row, COL_DESTINATION, lamp, "destination", 3)?;
    copy_into_node(table, row, COL_EFFECT, lamp, "effect", 1)?;
    copy_into_node(table, row, COL_LAMP_RGBA, lamp, "rgba", 4)
}

fn section<'a>(root: &'a Hub, name: &str) -> Result<&'a Section> {
    root.section(name)
        .ok_or_else(|| Error::structural(format!("'{}' has no section '{}'", root.name(), name)))
}

fn section_mut<'a>(root: &'a mut Hub, name: &str) -> Result<&'a mut Section> {
    match root.section_mut(name) {
        Some(section) => Ok(section),
        None => Err(Error::structural(format!("missing section '{}'", name))),
    }
}

fn lamp_ref(root: &Hub, row: usize) -> Result<&Hub> {
    section(root, "lamp")?
        .get(row)
        .ok_or_else(|| Error::structural(format!("missing lamp instance {}", row)))
}

fn lamp_mut(root: &mut Hub, row: usize) -> Result<&mut Hub> {
    section_mut(root, "lamp")?
        .get_mut(row)
        .ok_or_else(|| Error::structural(format!("missing lamp instance {}", row)))
}

/// Copies `count` raw elements of field `name` into consecutive cells.
fn copy_from_node(
    table: &mut Table,
    row: usize,
    col: usize,
    hub: &Hub,
    name: &str,
    count: usize,
) -> Result<()> {
    let node = hub
        .node(name)
        .ok_or_else(|| Error::structural(format!("'{}' has no field '{}'", hub.name(), name)))?;
    for i in 0..count {
        table.set_cell(row, col + i, node.element(i)?)?;
    }
    Ok(())
}

/// Copies `count` consecutive cells into the raw elements of field `name`.
fn copy_into_node(
    table: &Table,
    row: usize,
    col: usize,
    hub: &mut Hub,
    name: &str,
    count: usize,
) -> Result<()> {
    let node = hub
        .node_mut(name)
        .ok_or_else(|| Error::structural(format!("missing field '{}'", name)))?;
    for i in 0..count {
        node.set_element(i, table.cell(row, col + i)?)?;
    }
    Ok(())
}

fn ambient_slot(lamp: &Hub) -> Result<usize> {
    let node = lamp
        .node("ambient_index")
        .ok_or_else(|| Error::structural("lamp has no 'ambient_index' field"))?;
    match node.value(0)? {
        Value::Uint(slot) => Ok(slot as usize),
        other => Err(Error::structural(format!(
            "ambient_index decoded as {}",
            other.kind_name()
        ))),
    }
}
