//! # Edit Session
//!
//! Ties one adapter, one decoded file, and one projected table together
//! for the lifetime of an edit. The session owns the instance trees;
//! commands mutate only the table, and [`save`](Session::save) flushes
//! the table through the adapter before re-encoding, so the file on
//! disk always reflects the last visible table state.

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr, bail};

use crate::adapter::FormatAdapter;
use crate::commands::{self, CommandOutcome};
use crate::schema::Template;
use crate::table::Table;
use crate::tree::{Hub, decode_buffer, encode_buffer};

pub struct Session {
    adapter: Box<dyn FormatAdapter>,
    template: Template,
    hubs: Vec<Hub>,
    table: Table,
    source: PathBuf,
}

impl Session {
    /// Reads and decodes `path` with the given adapter and projects it
    /// into an editable table.
    pub fn open(adapter: Box<dyn FormatAdapter>, path: &Path) -> Result<Self> {
        let template = adapter.template()?;
        let bytes = std::fs::read(path)
            .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;
        let hubs = decode_buffer(&template, &bytes).wrap_err_with(|| {
            format!("'{}' is not a {} file", path.display(), adapter.name())
        })?;
        let table = adapter.build_table(&hubs)?;
        Ok(Session {
            adapter,
            template,
            hubs,
            table,
            source: path.to_path_buf(),
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Applies one command line to the projected table.
    pub fn apply(&mut self, line: &str) -> CommandOutcome {
        commands::apply_line(&mut self.table, line)
    }

    /// Sets one element of a named field directly in the instance tree,
    /// bypassing the table projection. `section` may be the root
    /// structure's name or the name of a repeated child section. The
    /// table is rebuilt afterwards so it reflects the edit.
    pub fn set_field(
        &mut self,
        section: &str,
        index: usize,
        key: &str,
        element: usize,
        text: &str,
    ) -> Result<()> {
        let root = match self.hubs.first_mut() {
            Some(root) => root,
            None => bail!("no decoded instance"),
        };
        let hub = if section == root.name() {
            root
        } else {
            let found = match root.section_mut(section) {
                Some(found) => found,
                None => bail!("no section named '{}'", section),
            };
            let len = found.len();
            match found.get_mut(index) {
                Some(hub) => hub,
                None => bail!(
                    "section '{}' holds {} instances, index {} out of range",
                    section,
                    len,
                    index
                ),
            }
        };
        let node = match hub.node_mut(key) {
            Some(node) => node,
            None => bail!("'{}' has no field named '{}'", section, key),
        };
        let value = node.tag().parse_text(text)?;
        node.set_value(element, &value)?;
        self.table = self.adapter.build_table(&self.hubs)?;
        Ok(())
    }

    /// Flushes the table into the instance trees and writes the encoded
    /// file to `dest`. Refuses to clobber an existing file unless
    /// `overwrite` is set.
    pub fn save(&mut self, dest: &Path, overwrite: bool) -> Result<()> {
        self.adapter.flush_table(&self.table, &mut self.hubs)?;
        let bytes = encode_buffer(&self.template, &self.hubs)?;
        if dest.exists() && !overwrite {
            bail!("file '{}' already exists", dest.display());
        }
        std::fs::write(dest, bytes)
            .wrap_err_with(|| format!("failed to write '{}'", dest.display()))?;
        Ok(())
    }
}
