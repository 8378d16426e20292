//! # Format Adapters
//!
//! A [`FormatAdapter`] packages everything the session layer needs to
//! know about one concrete file format: the schema describing its wire
//! layout, and the projection between decoded instance trees and the
//! editable table the command language operates on.
//!
//! [`LightSet`] is the built-in adapter for light-placement files.

mod lights;

pub use lights::LightSet;

use crate::error::Result;
use crate::schema::Template;
use crate::table::Table;
use crate::tree::Hub;

pub trait FormatAdapter {
    /// Root structure name, also used to address sections from the CLI.
    fn name(&self) -> &str;

    /// Schema describing one file of this format.
    fn template(&self) -> Result<Template>;

    /// Projects decoded instance trees into an editable table.
    fn build_table(&self, hubs: &[Hub]) -> Result<Table>;

    /// Writes edited table values back into the instance trees.
    fn flush_table(&self, table: &Table, hubs: &mut [Hub]) -> Result<()>;
}
