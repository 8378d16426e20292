//! # Type Tag System
//!
//! This module provides the canonical `TypeTag` descriptor used across
//! schema definitions, instance trees, and table columns.
//!
//! ## Design Principles
//!
//! 1. **Single source of truth**: one TypeTag used everywhere a cell,
//!    field, or column needs a type
//! 2. **Value-compact**: category + byte width + char flag, `Copy`,
//!    compared by value
//! 3. **Edge conversion only**: storage is always raw big-endian bytes;
//!    a [`Value`] materializes only when a caller converts, formats, or
//!    parses text
//!
//! ## Categories
//!
//! | Category | Widths | Text form |
//! |----------|--------|-----------|
//! | **SignedInt** | 1, 2, 4, 8 | decimal, `0x` hex, leading `-` |
//! | **UnsignedInt** | 1, 2, 4, 8 | decimal, `0x` hex |
//! | **Float** | 4, 8 | decimal with fraction/exponent |
//! | **Bytes** | 1 | two hex digits (`ff`), `char` flag prints raw |
//! | **Bool** | 1 | `true` / `false`, rendered `True` / `False` |
//! | **Section** | 0 | none; placeholder correlating a sub-template |
//!
//! ## Wire Encoding
//!
//! Multi-byte integers are big-endian. 32-bit floats are the big-endian
//! byte sequence of their IEEE-754 bit pattern (`f32::from_bits` /
//! `f32::to_bits`), 64-bit floats likewise.

use crate::error::{Error, Result};
use crate::types::value::{FormatSpec, Value};

/// Broad classification of a primitive cell type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    SignedInt,
    UnsignedInt,
    Float,
    Bytes,
    Bool,
    Section,
}

/// Compact descriptor of a primitive cell type: category, byte width,
/// and whether a one-byte cell renders as a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTag {
    category: TypeCategory,
    width: usize,
    is_char: bool,
}

impl TypeTag {
    pub const I8: TypeTag = TypeTag::new(TypeCategory::SignedInt, 1);
    pub const I16: TypeTag = TypeTag::new(TypeCategory::SignedInt, 2);
    pub const I32: TypeTag = TypeTag::new(TypeCategory::SignedInt, 4);
    pub const I64: TypeTag = TypeTag::new(TypeCategory::SignedInt, 8);
    pub const U8: TypeTag = TypeTag::new(TypeCategory::UnsignedInt, 1);
    pub const U16: TypeTag = TypeTag::new(TypeCategory::UnsignedInt, 2);
    pub const U32: TypeTag = TypeTag::new(TypeCategory::UnsignedInt, 4);
    pub const U64: TypeTag = TypeTag::new(TypeCategory::UnsignedInt, 8);
    pub const F32: TypeTag = TypeTag::new(TypeCategory::Float, 4);
    pub const F64: TypeTag = TypeTag::new(TypeCategory::Float, 8);
    pub const BOOL: TypeTag = TypeTag::new(TypeCategory::Bool, 1);
    pub const BYTES: TypeTag = TypeTag::new(TypeCategory::Bytes, 1);
    pub const CHAR: TypeTag = TypeTag {
        category: TypeCategory::Bytes,
        width: 1,
        is_char: true,
    };

    const fn new(category: TypeCategory, width: usize) -> Self {
        TypeTag {
            category,
            width,
            is_char: false,
        }
    }

    /// Placeholder tag correlating a field slot with a sub-template.
    /// Occupies no bytes of its own; only templates construct these.
    pub(crate) const fn section() -> Self {
        TypeTag::new(TypeCategory::Section, 0)
    }

    /// Byte width of one element of this type.
    pub fn size(&self) -> usize {
        self.width
    }

    pub fn category(&self) -> TypeCategory {
        self.category
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self.category,
            TypeCategory::SignedInt | TypeCategory::UnsignedInt
        )
    }

    pub fn is_float(&self) -> bool {
        self.category == TypeCategory::Float
    }

    /// Returns true if this type participates in numeric narrowing
    /// (integers and floats).
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    pub fn is_char(&self) -> bool {
        self.is_char
    }

    pub fn is_bool(&self) -> bool {
        self.category == TypeCategory::Bool
    }

    pub fn is_section(&self) -> bool {
        self.category == TypeCategory::Section
    }

    /// Decodes one raw big-endian element into a [`Value`].
    ///
    /// The slice must be exactly [`size`](Self::size) bytes.
    pub fn decode(&self, raw: &[u8]) -> Result<Value> {
        match (self.category, self.width) {
            (TypeCategory::SignedInt, 1) => {
                let b: [u8; 1] = raw.try_into().map_err(|_| self.width_error(raw))?;
                Ok(Value::Int(i8::from_be_bytes(b) as i64))
            }
            (TypeCategory::SignedInt, 2) => {
                let b: [u8; 2] = raw.try_into().map_err(|_| self.width_error(raw))?;
                Ok(Value::Int(i16::from_be_bytes(b) as i64))
            }
            (TypeCategory::SignedInt, 4) => {
                let b: [u8; 4] = raw.try_into().map_err(|_| self.width_error(raw))?;
                Ok(Value::Int(i32::from_be_bytes(b) as i64))
            }
            (TypeCategory::SignedInt, 8) => {
                let b: [u8; 8] = raw.try_into().map_err(|_| self.width_error(raw))?;
                Ok(Value::Int(i64::from_be_bytes(b)))
            }
            (TypeCategory::UnsignedInt, 1) => {
                let b: [u8; 1] = raw.try_into().map_err(|_| self.width_error(raw))?;
                Ok(Value::Uint(b[0] as u64))
            }
            (TypeCategory::UnsignedInt, 2) => {
                let b: [u8; 2] = raw.try_into().map_err(|_| self.width_error(raw))?;
                Ok(Value::Uint(u16::from_be_bytes(b) as u64))
            }
            (TypeCategory::UnsignedInt, 4) => {
                let b: [u8; 4] = raw.try_into().map_err(|_| self.width_error(raw))?;
                Ok(Value::Uint(u32::from_be_bytes(b) as u64))
            }
            (TypeCategory::UnsignedInt, 8) => {
                let b: [u8; 8] = raw.try_into().map_err(|_| self.width_error(raw))?;
                Ok(Value::Uint(u64::from_be_bytes(b)))
            }
            (TypeCategory::Float, 4) => {
                let b: [u8; 4] = raw.try_into().map_err(|_| self.width_error(raw))?;
                Ok(Value::Float(f32::from_bits(u32::from_be_bytes(b)) as f64))
            }
            (TypeCategory::Float, 8) => {
                let b: [u8; 8] = raw.try_into().map_err(|_| self.width_error(raw))?;
                Ok(Value::Float(f64::from_bits(u64::from_be_bytes(b))))
            }
            (TypeCategory::Bool, 1) => {
                let b: [u8; 1] = raw.try_into().map_err(|_| self.width_error(raw))?;
                Ok(Value::Bool(b[0] != 0))
            }
            (TypeCategory::Bytes, w) => {
                if raw.len() != w {
                    return Err(self.width_error(raw));
                }
                Ok(Value::Bytes(raw.to_vec()))
            }
            (TypeCategory::Section, _) => {
                Err(Error::type_mismatch("section placeholders carry no value"))
            }
            (cat, w) => Err(Error::type_mismatch(format!(
                "unsupported width {} for {:?}",
                w, cat
            ))),
        }
    }

    /// Encodes a [`Value`] into a raw big-endian element.
    ///
    /// Integer values narrow to the cell width exactly as an `as` cast;
    /// floats targeting a 4-byte cell round through `f32`. The destination
    /// must be exactly [`size`](Self::size) bytes.
    pub fn encode_into(&self, value: &Value, dest: &mut [u8]) -> Result<()> {
        if dest.len() != self.width {
            return Err(Error::type_mismatch(format!(
                "destination for {} is {} bytes, expected {}",
                self,
                dest.len(),
                self.width
            )));
        }
        match self.category {
            TypeCategory::SignedInt | TypeCategory::UnsignedInt => {
                let wide = match value {
                    Value::Int(i) => *i as i128,
                    Value::Uint(u) => *u as i128,
                    Value::Float(f) => *f as i128,
                    other => {
                        return Err(Error::type_mismatch(format!(
                            "cannot store {} into {} cell",
                            other.kind_name(),
                            self
                        )));
                    }
                };
                match self.width {
                    1 => dest.copy_from_slice(&(wide as u8).to_be_bytes()),
                    2 => dest.copy_from_slice(&(wide as u16).to_be_bytes()),
                    4 => dest.copy_from_slice(&(wide as u32).to_be_bytes()),
                    8 => dest.copy_from_slice(&(wide as u64).to_be_bytes()),
                    w => {
                        return Err(Error::type_mismatch(format!(
                            "unsupported integer width {}",
                            w
                        )));
                    }
                }
                Ok(())
            }
            TypeCategory::Float => {
                let f = match value {
                    Value::Float(f) => *f,
                    Value::Int(i) => *i as f64,
                    Value::Uint(u) => *u as f64,
                    other => {
                        return Err(Error::type_mismatch(format!(
                            "cannot store {} into {} cell",
                            other.kind_name(),
                            self
                        )));
                    }
                };
                match self.width {
                    4 => dest.copy_from_slice(&(f as f32).to_bits().to_be_bytes()),
                    8 => dest.copy_from_slice(&f.to_bits().to_be_bytes()),
                    w => {
                        return Err(Error::type_mismatch(format!(
                            "unsupported float width {}",
                            w
                        )));
                    }
                }
                Ok(())
            }
            TypeCategory::Bool => match value {
                Value::Bool(b) => {
                    dest[0] = *b as u8;
                    Ok(())
                }
                other => Err(Error::type_mismatch(format!(
                    "cannot store {} into bool cell",
                    other.kind_name()
                ))),
            },
            TypeCategory::Bytes => match value {
                Value::Bytes(b) if b.len() == self.width => {
                    dest.copy_from_slice(b);
                    Ok(())
                }
                Value::Bytes(b) => Err(Error::type_mismatch(format!(
                    "byte literal is {} bytes, cell holds {}",
                    b.len(),
                    self.width
                ))),
                other => Err(Error::type_mismatch(format!(
                    "cannot store {} into {} cell",
                    other.kind_name(),
                    self
                ))),
            },
            TypeCategory::Section => {
                Err(Error::type_mismatch("section placeholders carry no value"))
            }
        }
    }

    /// Parses a textual literal into a [`Value`] suitable for this tag.
    ///
    /// Failure is always [`Error::Type`]; nothing is silently defaulted.
    pub fn parse_text(&self, text: &str) -> Result<Value> {
        let text = text.trim();
        match self.category {
            TypeCategory::SignedInt => parse_i64(text).map(Value::Int),
            TypeCategory::UnsignedInt => parse_u64(text).map(Value::Uint),
            TypeCategory::Float => text.parse::<f64>().map(Value::Float).map_err(|_| {
                Error::type_mismatch(format!("'{}' is not a floating-point number", text))
            }),
            TypeCategory::Bool => {
                if text.eq_ignore_ascii_case("true") {
                    Ok(Value::Bool(true))
                } else if text.eq_ignore_ascii_case("false") {
                    Ok(Value::Bool(false))
                } else {
                    Err(Error::type_mismatch(format!(
                        "'{}' is not a boolean (expected true or false)",
                        text
                    )))
                }
            }
            TypeCategory::Bytes if self.is_char => {
                if text.len() == self.width {
                    Ok(Value::Bytes(text.as_bytes().to_vec()))
                } else {
                    Err(Error::type_mismatch(format!(
                        "char literal '{}' is {} bytes, cell holds {}",
                        text,
                        text.len(),
                        self.width
                    )))
                }
            }
            TypeCategory::Bytes => parse_hex_bytes(text, self.width).map(Value::Bytes),
            TypeCategory::Section => {
                Err(Error::type_mismatch("section placeholders carry no value"))
            }
        }
    }

    /// Renders one raw element as display text.
    ///
    /// Bools render `True`/`False`, char cells render their raw byte,
    /// byte cells render lowercase hex pairs, floats honor the
    /// [`FormatSpec`] precision.
    pub fn format(&self, raw: &[u8], spec: &FormatSpec) -> Result<String> {
        let text = match self.decode(raw)? {
            Value::Int(i) => i.to_string(),
            Value::Uint(u) => u.to_string(),
            Value::Float(f) => match spec.precision {
                Some(p) => format!("{:.prec$}", f, prec = p),
                None => f.to_string(),
            },
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Bytes(b) if self.is_char => String::from_utf8_lossy(&b).into_owned(),
            Value::Bytes(b) => b.iter().map(|byte| format!("{:02x}", byte)).collect(),
        };
        Ok(match spec.width {
            Some(w) => format!("{:>width$}", text, width = w),
            None => text,
        })
    }

    fn width_error(&self, raw: &[u8]) -> Error {
        Error::type_mismatch(format!(
            "expected {} bytes for {}, got {}",
            self.width,
            self,
            raw.len()
        ))
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.category {
            TypeCategory::SignedInt => write!(f, "i{}", self.width * 8),
            TypeCategory::UnsignedInt => write!(f, "u{}", self.width * 8),
            TypeCategory::Float => write!(f, "f{}", self.width * 8),
            TypeCategory::Bytes if self.is_char => write!(f, "char"),
            TypeCategory::Bytes => write!(f, "byte"),
            TypeCategory::Bool => write!(f, "bool"),
            TypeCategory::Section => write!(f, "section"),
        }
    }
}

fn parse_i64(text: &str) -> Result<i64> {
    let err = || Error::type_mismatch(format!("'{}' is not an integer", text));
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let magnitude = if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16).map_err(|_| err())?
    } else {
        body.parse::<i64>().map_err(|_| err())?
    };
    if negative {
        magnitude.checked_neg().ok_or_else(err)
    } else {
        Ok(magnitude)
    }
}

fn parse_u64(text: &str) -> Result<u64> {
    let err = || Error::type_mismatch(format!("'{}' is not an unsigned integer", text));
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).map_err(|_| err())
    } else {
        text.parse::<u64>().map_err(|_| err())
    }
}

fn parse_hex_bytes(text: &str, width: usize) -> Result<Vec<u8>> {
    let body = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if body.len() != width * 2 {
        return Err(Error::type_mismatch(format!(
            "byte literal '{}' must be {} hex digits",
            text,
            width * 2
        )));
    }
    let mut out = Vec::with_capacity(width);
    for i in 0..width {
        let pair = &body[i * 2..i * 2 + 2];
        let byte = u8::from_str_radix(pair, 16)
            .map_err(|_| Error::type_mismatch(format!("'{}' is not a hex byte", pair)))?;
        out.push(byte);
    }
    Ok(out)
}
