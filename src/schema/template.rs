//! # Schema Templates
//!
//! This module provides the `Template` struct describing a fixed binary
//! record layout: ordered typed fields plus nested sub-templates, each
//! repeated a fixed number of times.
//!
//! ## Structure
//!
//! - `fields`: ordered [`FieldSpec`]s; a `Section` field is a placeholder
//!   correlating, in declaration order, with one child template
//! - `children`: sub-templates, one per section placeholder
//! - `repeat`: how many consecutive instances appear on the wire
//!
//! A template is built once and is read-only for the lifetime of any
//! instance tree decoded from it. Field order is fixed at construction
//! and never reordered.
//!
//! ## Size Model
//!
//! ```text
//! instance_size = sum(field width * count)  (non-section fields)
//!              + sum(child byte_size)       (each child already repeated)
//! byte_size     = repeat * instance_size
//! ```

use crate::error::{Error, Result};
use crate::types::TypeTag;

/// One typed field slot in a template: tag, name, element count.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    tag: TypeTag,
    name: String,
    count: usize,
}

impl FieldSpec {
    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Wire footprint of this field: element width times element count.
    pub fn byte_size(&self) -> usize {
        self.tag.size() * self.count
    }
}

/// Recursive named description of a binary record layout.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    repeat: usize,
    fields: Vec<FieldSpec>,
    children: Vec<Template>,
}

impl Template {
    /// Creates a template that appears exactly once on the wire.
    pub fn new(name: impl Into<String>) -> Self {
        Template {
            name: name.into(),
            repeat: 1,
            fields: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates a template repeated `repeat` consecutive times.
    pub fn repeated(name: impl Into<String>, repeat: usize) -> Result<Self> {
        let name = name.into();
        if repeat < 1 {
            return Err(Error::schema(format!(
                "template '{}' must repeat at least once",
                name
            )));
        }
        Ok(Template {
            name,
            repeat,
            fields: Vec::new(),
            children: Vec::new(),
        })
    }

    /// Appends a typed field. Section tags are reserved for
    /// [`add_subtemplate`](Self::add_subtemplate).
    pub fn add_field(&mut self, tag: TypeTag, name: impl Into<String>, count: usize) -> Result<()> {
        let name = name.into();
        if tag.is_section() {
            return Err(Error::schema(format!(
                "field '{}' may not use the section tag directly",
                name
            )));
        }
        if count < 1 {
            return Err(Error::schema(format!(
                "field '{}' needs an element count of at least one",
                name
            )));
        }
        self.fields.push(FieldSpec { tag, name, count });
        Ok(())
    }

    /// Appends a sub-template and its correlated section placeholder.
    ///
    /// The child's repeat count is fixed from this point on. Placeholders
    /// correlate with children strictly in declaration order.
    pub fn add_subtemplate(&mut self, child: Template) {
        self.fields.push(FieldSpec {
            tag: TypeTag::section(),
            name: child.name.clone(),
            count: 1,
        });
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn repeat(&self) -> usize {
        self.repeat
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn children(&self) -> &[Template] {
        &self.children
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Byte size of one instance, children included.
    pub fn instance_size(&self) -> usize {
        let field_bytes: usize = self
            .fields
            .iter()
            .filter(|f| !f.tag.is_section())
            .map(FieldSpec::byte_size)
            .sum();
        let child_bytes: usize = self.children.iter().map(Template::byte_size).sum();
        field_bytes + child_bytes
    }

    /// Total wire footprint: `repeat` times the instance size.
    pub fn byte_size(&self) -> usize {
        self.repeat * self.instance_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_below_one_rejected() {
        assert!(matches!(
            Template::repeated("block", 0),
            Err(Error::Schema(_))
        ));
    }

    #[test]
    fn test_zero_count_field_rejected() {
        let mut t = Template::new("header");
        assert!(matches!(
            t.add_field(TypeTag::U8, "flags", 0),
            Err(Error::Schema(_))
        ));
    }

    #[test]
    fn test_section_tag_rejected_in_add_field() {
        let mut t = Template::new("header");
        assert!(t.add_field(TypeTag::section(), "body", 1).is_err());
    }

    #[test]
    fn test_flat_byte_size() {
        let mut t = Template::new("header");
        t.add_field(TypeTag::CHAR, "magic", 4).unwrap();
        t.add_field(TypeTag::U32, "length", 1).unwrap();
        t.add_field(TypeTag::U16, "flags", 2).unwrap();
        assert_eq!(t.byte_size(), 4 + 4 + 4);
    }

    #[test]
    fn test_nested_byte_size_counts_child_repeats() {
        let mut entry = Template::repeated("entry", 3).unwrap();
        entry.add_field(TypeTag::U32, "id", 1).unwrap();
        entry.add_field(TypeTag::F32, "weight", 2).unwrap();

        let mut root = Template::new("file");
        root.add_field(TypeTag::U16, "version", 1).unwrap();
        root.add_subtemplate(entry);

        // 2 header bytes + 3 * (4 + 8) entry bytes
        assert_eq!(root.byte_size(), 2 + 3 * 12);
        assert_eq!(root.instance_size(), root.byte_size());
        assert_eq!(root.field_count(), 2);
        assert_eq!(root.child_count(), 1);
    }

    #[test]
    fn test_section_placeholder_takes_child_name() {
        let child = Template::repeated("entry", 2).unwrap();
        let mut root = Template::new("file");
        root.add_subtemplate(child);
        let placeholder = &root.fields()[0];
        assert!(placeholder.tag().is_section());
        assert_eq!(placeholder.name(), "entry");
        assert_eq!(placeholder.byte_size(), 0);
    }
}
