//! Fuzz testing for the template codec.
//!
//! Builds a template from an arbitrary field list, decodes arbitrary
//! bytes against it, and re-encodes whatever decoded. Decoding must
//! never panic, and every successful decode must re-encode to the
//! original buffer.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use binsheet::{Template, TypeTag, decode_buffer, encode_buffer};

#[derive(Debug, Arbitrary)]
struct DecoderInput {
    fields: Vec<FuzzField>,
    nested: Vec<FuzzField>,
    repeat: u8,
    data: Vec<u8>,
}

#[derive(Debug, Arbitrary, Clone, Copy)]
struct FuzzField {
    tag: FuzzTag,
    count: u8,
}

#[derive(Debug, Arbitrary, Clone, Copy)]
enum FuzzTag {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    Bytes,
    Char,
}

impl From<FuzzTag> for TypeTag {
    fn from(tag: FuzzTag) -> Self {
        match tag {
            FuzzTag::I8 => TypeTag::I8,
            FuzzTag::I16 => TypeTag::I16,
            FuzzTag::I32 => TypeTag::I32,
            FuzzTag::I64 => TypeTag::I64,
            FuzzTag::U8 => TypeTag::U8,
            FuzzTag::U16 => TypeTag::U16,
            FuzzTag::U32 => TypeTag::U32,
            FuzzTag::U64 => TypeTag::U64,
            FuzzTag::F32 => TypeTag::F32,
            FuzzTag::F64 => TypeTag::F64,
            FuzzTag::Bool => TypeTag::BOOL,
            FuzzTag::Bytes => TypeTag::BYTES,
            FuzzTag::Char => TypeTag::CHAR,
        }
    }
}

fn build(name: &str, repeat: usize, fields: &[FuzzField]) -> Option<Template> {
    let mut template = Template::repeated(name, repeat).ok()?;
    for (i, field) in fields.iter().enumerate() {
        let count = usize::from(field.count % 8) + 1;
        template
            .add_field(field.tag.into(), format!("f{}", i), count)
            .ok()?;
    }
    Some(template)
}

fuzz_target!(|input: DecoderInput| {
    if input.fields.is_empty() || input.fields.len() > 16 || input.nested.len() > 16 {
        return;
    }

    let mut root = match build("root", 1, &input.fields) {
        Some(template) => template,
        None => return,
    };
    if !input.nested.is_empty() {
        let repeat = usize::from(input.repeat % 4) + 1;
        let child = match build("child", repeat, &input.nested) {
            Some(template) => template,
            None => return,
        };
        root.add_subtemplate(child);
    }

    match decode_buffer(&root, &input.data) {
        Ok(hubs) => {
            let encoded = encode_buffer(&root, &hubs).expect("decoded tree must re-encode");
            assert_eq!(encoded, input.data);
        }
        Err(_) => {}
    }
});
