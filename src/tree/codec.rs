//! # Template Walk Codec
//!
//! This module implements the recursive walks that decode a byte buffer
//! into a [`Hub`] tree mirroring a [`Template`], and re-encode a hub tree
//! back into bytes.
//!
//! ## Walk Order
//!
//! Both walks visit a template's field specs strictly in declaration
//! order. An ordinary field transfers `width * count` payload bytes; a
//! section placeholder recurses into the correlated child template for
//! `child.repeat()` consecutive instances:
//!
//! ```text
//! file
//! ├── field "version"          2 bytes
//! ├── section "entry"  ──┐
//! │                      ├── entry[0]: "id" 4 bytes, "weight" 8 bytes
//! │                      ├── entry[1]: ...
//! │                      └── entry[2]: ...
//! └── field "crc"              4 bytes
//! ```
//!
//! Because nodes keep their payload as the raw big-endian bytes read from
//! the wire, `encode(decode(buffer))` reproduces the buffer byte for byte.
//!
//! ## Failure Semantics
//!
//! - Decode failures ([`Error::ShortRead`], [`Error::Schema`]) discard the
//!   partially built tree; the caller installs nothing.
//! - Encode failures ([`Error::StructuralMismatch`]) abort before any
//!   output leaves the in-memory writer.
//! - [`decode_buffer`] holds the exact-size contract: a short buffer is a
//!   short read, an oversized one is a schema mismatch.

use crate::encoding::{Reader, Writer};
use crate::error::{Error, Result};
use crate::schema::Template;
use crate::tree::{Hub, Node, Section};

/// Decodes `template.repeat()` consecutive instances from the reader.
pub fn decode_hubs(template: &Template, reader: &mut Reader<'_>) -> Result<Vec<Hub>> {
    let mut hubs = Vec::with_capacity(template.repeat());
    for _ in 0..template.repeat() {
        hubs.push(decode_one(template, reader)?);
    }
    Ok(hubs)
}

fn decode_one(template: &Template, reader: &mut Reader<'_>) -> Result<Hub> {
    let mut nodes = Vec::new();
    let mut sections = Vec::new();
    let mut section_idx = 0;

    for field in template.fields() {
        if field.tag().is_section() {
            let child = template.children().get(section_idx).ok_or_else(|| {
                Error::schema(format!(
                    "too many sections in template '{}'",
                    template.name()
                ))
            })?;
            let child_hubs = decode_hubs(child, reader)?;
            sections.push(Section::new(child.name(), child_hubs));
            section_idx += 1;
        } else {
            let raw = reader.read_bytes(field.byte_size())?.to_vec();
            nodes.push(Node::from_raw(field.tag(), field.name(), field.count(), raw));
        }
    }

    Ok(Hub::new(template.name(), nodes, sections))
}

/// Decodes a whole buffer under the exact-size contract.
pub fn decode_buffer(template: &Template, bytes: &[u8]) -> Result<Vec<Hub>> {
    let expected = template.byte_size();
    if bytes.len() < expected {
        return Err(Error::short_read(expected, bytes.len()));
    }
    if bytes.len() > expected {
        return Err(Error::schema(format!(
            "buffer is {} bytes but template '{}' describes {}",
            bytes.len(),
            template.name(),
            expected
        )));
    }
    let mut reader = Reader::new(bytes);
    decode_hubs(template, &mut reader)
}

/// Encodes `hubs` against the template, mirroring the decode walk.
pub fn encode_hubs(template: &Template, hubs: &[Hub], writer: &mut Writer) -> Result<()> {
    if hubs.len() != template.repeat() {
        return Err(Error::structural(format!(
            "template '{}' repeats {} times but {} hubs were supplied",
            template.name(),
            template.repeat(),
            hubs.len()
        )));
    }
    for hub in hubs {
        encode_one(template, hub, writer)?;
    }
    Ok(())
}

fn encode_one(template: &Template, hub: &Hub, writer: &mut Writer) -> Result<()> {
    let mut nodes = hub.nodes().iter();
    let mut section_idx = 0;

    for field in template.fields() {
        if field.tag().is_section() {
            let child = template.children().get(section_idx).ok_or_else(|| {
                Error::schema(format!(
                    "too many sections in template '{}'",
                    template.name()
                ))
            })?;
            let section = hub.sections().get(section_idx).ok_or_else(|| {
                Error::structural(format!(
                    "hub '{}' is missing section '{}'",
                    hub.name(),
                    child.name()
                ))
            })?;
            encode_hubs(child, section.hubs(), writer)?;
            section_idx += 1;
        } else {
            let node = nodes.next().ok_or_else(|| {
                Error::structural(format!(
                    "hub '{}' ran out of nodes at field '{}'",
                    hub.name(),
                    field.name()
                ))
            })?;
            if node.name() != field.name() || node.tag() != field.tag() || node.count() != field.count()
            {
                return Err(Error::structural(format!(
                    "node '{}' does not match field '{}' in template '{}'",
                    node.name(),
                    field.name(),
                    template.name()
                )));
            }
            writer.write_bytes(node.bytes());
        }
    }

    if nodes.next().is_some() {
        return Err(Error::structural(format!(
            "hub '{}' carries more nodes than template '{}' declares",
            hub.name(),
            template.name()
        )));
    }
    if section_idx != hub.sections().len() {
        return Err(Error::structural(format!(
            "hub '{}' carries more sections than template '{}' declares",
            hub.name(),
            template.name()
        )));
    }
    Ok(())
}

/// Encodes a hub tree into a fresh buffer and verifies the total size.
pub fn encode_buffer(template: &Template, hubs: &[Hub]) -> Result<Vec<u8>> {
    let mut writer = Writer::with_capacity(template.byte_size());
    encode_hubs(template, hubs, &mut writer)?;
    let bytes = writer.into_bytes();
    if bytes.len() != template.byte_size() {
        return Err(Error::structural(format!(
            "encoded {} bytes but template '{}' describes {}",
            bytes.len(),
            template.name(),
            template.byte_size()
        )));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TypeTag, Value};

    fn nested_template() -> Template {
        let mut entry = Template::repeated("entry", 3).unwrap();
        entry.add_field(TypeTag::U32, "id", 1).unwrap();
        entry.add_field(TypeTag::F32, "weight", 2).unwrap();

        let mut root = Template::new("file");
        root.add_field(TypeTag::U16, "version", 1).unwrap();
        root.add_subtemplate(entry);
        root.add_field(TypeTag::U32, "crc", 1).unwrap();
        root
    }

    fn nested_buffer() -> Vec<u8> {
        let mut w = Writer::new();
        w.write_u16(2);
        for id in 0..3u32 {
            w.write_u32(id + 10);
            w.write_f32(id as f32 + 0.5);
            w.write_f32(id as f32 + 1.5);
        }
        w.write_u32(0xDEAD_BEEF);
        w.into_bytes()
    }

    #[test]
    fn decode_materializes_schema_order() {
        let template = nested_template();
        let buffer = nested_buffer();
        let hubs = decode_buffer(&template, &buffer).unwrap();
        assert_eq!(hubs.len(), 1);

        let root = &hubs[0];
        assert_eq!(root.node("version").unwrap().value(0).unwrap(), Value::Uint(2));
        assert_eq!(
            root.node("crc").unwrap().value(0).unwrap(),
            Value::Uint(0xDEAD_BEEF)
        );

        let entries = root.section("entry").unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries.get(1).unwrap().node("id").unwrap().value(0).unwrap(),
            Value::Uint(11)
        );
        assert_eq!(
            entries.get(2).unwrap().node("weight").unwrap().value(1).unwrap(),
            Value::Float(3.5)
        );
    }

    #[test]
    fn roundtrip_is_byte_identical() {
        let template = nested_template();
        let buffer = nested_buffer();
        let hubs = decode_buffer(&template, &buffer).unwrap();
        let encoded = encode_buffer(&template, &hubs).unwrap();
        assert_eq!(encoded, buffer);
    }

    #[test]
    fn short_buffer_reports_short_read() {
        let template = nested_template();
        let buffer = nested_buffer();
        let result = decode_buffer(&template, &buffer[..buffer.len() - 1]);
        assert!(matches!(result, Err(Error::ShortRead { .. })));
    }

    #[test]
    fn oversized_buffer_reports_schema_mismatch() {
        let template = nested_template();
        let mut buffer = nested_buffer();
        buffer.push(0);
        assert!(matches!(
            decode_buffer(&template, &buffer),
            Err(Error::Schema(_))
        ));
    }

    #[test]
    fn hub_count_mismatch_rejected_on_encode() {
        let template = nested_template();
        let buffer = nested_buffer();
        let hubs = decode_buffer(&template, &buffer).unwrap();

        let entry_template = &template.children()[0];
        let entry_hubs = hubs[0].section("entry").unwrap().hubs();
        let mut writer = Writer::new();
        let result = encode_hubs(entry_template, &entry_hubs[..2], &mut writer);
        assert!(matches!(result, Err(Error::StructuralMismatch(_))));
    }

    #[test]
    fn foreign_hub_rejected_on_encode() {
        let template = nested_template();
        let hubs = decode_buffer(&template, &nested_buffer()).unwrap();

        let mut other = Template::new("file");
        other.add_field(TypeTag::U32, "version", 1).unwrap();
        let result = encode_buffer(&other, &hubs);
        assert!(matches!(result, Err(Error::StructuralMismatch(_))));
    }

    #[test]
    fn edited_node_survives_roundtrip() {
        let template = nested_template();
        let mut hubs = decode_buffer(&template, &nested_buffer()).unwrap();

        hubs[0]
            .section_mut("entry")
            .unwrap()
            .get_mut(0)
            .unwrap()
            .node_mut("weight")
            .unwrap()
            .set_value(0, &Value::Float(9.25))
            .unwrap();

        let encoded = encode_buffer(&template, &hubs).unwrap();
        let reread = decode_buffer(&template, &encoded).unwrap();
        assert_eq!(
            reread[0]
                .section("entry")
                .unwrap()
                .get(0)
                .unwrap()
                .node("weight")
                .unwrap()
                .value(0)
                .unwrap(),
            Value::Float(9.25)
        );
    }
}
