//! # Decoded Instance Tree
//!
//! A [`Hub`] is one materialized instance of a template repetition: its
//! ordered payload [`Node`]s plus one [`Section`] per child template,
//! each holding that child's repeated hubs.
//!
//! Nodes own their payload as raw big-endian bytes. A hub tree is created
//! by the decode walk, mutated only in place per node, and dropped with
//! its owning session. Nothing in the tree aliases the source buffer.

use crate::error::{Error, Result};
use crate::types::{TypeTag, Value};

/// One decoded field: tag, name, element count, raw big-endian payload.
///
/// Element `i` occupies bytes `[i * width, (i + 1) * width)`.
#[derive(Debug, Clone)]
pub struct Node {
    tag: TypeTag,
    name: String,
    count: usize,
    data: Vec<u8>,
}

impl Node {
    pub(crate) fn from_raw(tag: TypeTag, name: impl Into<String>, count: usize, data: Vec<u8>) -> Self {
        Node {
            tag,
            name: name.into(),
            count,
            data,
        }
    }

    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// The full raw payload, all elements back to back.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Raw bytes of one element.
    pub fn element(&self, index: usize) -> Result<&[u8]> {
        let width = self.tag.size();
        if index >= self.count {
            return Err(Error::range(format!(
                "element {} out of range for field '{}' ({} elements)",
                index, self.name, self.count
            )));
        }
        Ok(&self.data[index * width..(index + 1) * width])
    }

    /// Overwrites one element with raw bytes of exactly the element width.
    pub fn set_element(&mut self, index: usize, raw: &[u8]) -> Result<()> {
        let width = self.tag.size();
        if index >= self.count {
            return Err(Error::range(format!(
                "element {} out of range for field '{}' ({} elements)",
                index, self.name, self.count
            )));
        }
        if raw.len() != width {
            return Err(Error::type_mismatch(format!(
                "field '{}' holds {}-byte elements, got {}",
                self.name,
                width,
                raw.len()
            )));
        }
        self.data[index * width..(index + 1) * width].copy_from_slice(raw);
        Ok(())
    }

    /// Decodes one element into a [`Value`].
    pub fn value(&self, index: usize) -> Result<Value> {
        let tag = self.tag;
        tag.decode(self.element(index)?)
    }

    /// Encodes a [`Value`] into one element.
    pub fn set_value(&mut self, index: usize, value: &Value) -> Result<()> {
        let tag = self.tag;
        let width = tag.size();
        if index >= self.count {
            return Err(Error::range(format!(
                "element {} out of range for field '{}' ({} elements)",
                index, self.name, self.count
            )));
        }
        tag.encode_into(value, &mut self.data[index * width..(index + 1) * width])
    }
}

/// The repeated hubs decoded for one child template.
#[derive(Debug, Clone)]
pub struct Section {
    name: String,
    hubs: Vec<Hub>,
}

impl Section {
    pub(crate) fn new(name: impl Into<String>, hubs: Vec<Hub>) -> Self {
        Section {
            name: name.into(),
            hubs,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hubs(&self) -> &[Hub] {
        &self.hubs
    }

    pub fn hubs_mut(&mut self) -> &mut [Hub] {
        &mut self.hubs
    }

    pub fn len(&self) -> usize {
        self.hubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hubs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Hub> {
        self.hubs.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Hub> {
        self.hubs.get_mut(index)
    }
}

/// One materialized template instance: payload nodes in schema order plus
/// one section per child template.
#[derive(Debug, Clone)]
pub struct Hub {
    name: String,
    nodes: Vec<Node>,
    sections: Vec<Section>,
}

impl Hub {
    pub(crate) fn new(name: impl Into<String>, nodes: Vec<Node>, sections: Vec<Section>) -> Self {
        Hub {
            name: name.into(),
            nodes,
            sections,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// First node with the given field name.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn node_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.name == name)
    }

    /// Finds a section by name, searching this hub first and then
    /// descending into child hubs.
    pub fn section(&self, name: &str) -> Option<&Section> {
        if let Some(section) = self.sections.iter().find(|s| s.name == name) {
            return Some(section);
        }
        for section in &self.sections {
            for hub in &section.hubs {
                if let Some(found) = hub.section(name) {
                    return Some(found);
                }
            }
        }
        None
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        if let Some(idx) = self.sections.iter().position(|s| s.name == name) {
            return self.sections.get_mut(idx);
        }
        for section in self.sections.iter_mut() {
            for hub in section.hubs.iter_mut() {
                if let Some(found) = hub.section_mut(name) {
                    return Some(found);
                }
            }
        }
        None
    }
}
