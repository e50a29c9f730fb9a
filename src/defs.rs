//! Serde-deserializable header descriptions.
//!
//! These types describe the *shape* of a header family. They are intended to
//! be constructed from a schema file shipped with your application (JSON,
//! YAML, anything serde can read) and then compiled into a
//! [HeaderLayout](crate::layout::HeaderLayout). Code generation from such
//! descriptions happens outside this crate; here they are only the input
//! boundary.
//!
//! Field widths can be given explicitly in `bits` or through a type-name
//! shorthand: `u8`/`u16`/`u32`/`u64` and `s8`/`s16`/`s32`/`s64` for whole-byte
//! integers, `f32`/`f64` for floats, and `b1`..`b7` for sub-byte fields.
//! An explicit `bits` value overrides the shorthand.

use serde::{Deserialize, Serialize};

use crate::{errors::SchemaError, field::FieldSpec, layout::HeaderLayout};

/// Description of one header family.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HeaderDef {
    /// Header family name.
    pub name: String,
    /// Declared whole-byte size.
    pub num_bytes: usize,
    /// Declared bits past the last whole byte; defaults to zero.
    #[serde(default)]
    pub num_extra_bits: u8,
    /// Fields in wire order.
    pub fields: Vec<FieldDef>,
}

impl HeaderDef {
    /// Resolves every field's width and compiles the layout.
    pub fn compile(&self) -> Result<HeaderLayout, SchemaError> {
        let specs = self
            .fields
            .iter()
            .map(FieldDef::resolve)
            .collect::<Result<Vec<_>, _>>()?;

        HeaderLayout::compile_with_extra_bits(&specs, self.num_bytes, self.num_extra_bits)
    }
}

/// Description of a single field: a name plus a type shorthand and/or an
/// explicit bit width.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FieldDef {
    /// Name used for get/set lookups.
    pub name: String,
    /// Optional type-name shorthand, e.g. `"u16"` or `"b3"`.
    #[serde(default)]
    pub ty: Option<String>,
    /// Optional explicit bit width; overrides `ty`.
    #[serde(default)]
    pub bits: Option<u32>,
}

impl FieldDef {
    /// Resolves the declared width into a [FieldSpec].
    pub fn resolve(&self) -> Result<FieldSpec, SchemaError> {
        let bit_width = match (self.bits, self.ty.as_deref()) {
            (Some(bits), _) => bits,
            (None, Some(ty)) => {
                type_width(ty).ok_or_else(|| SchemaError::UnknownTypeName {
                    name: self.name.clone(),
                    ty: ty.to_string(),
                })?
            }
            (None, None) => {
                return Err(SchemaError::MissingWidth {
                    name: self.name.clone(),
                });
            }
        };

        Ok(FieldSpec::new(self.name.clone(), bit_width))
    }
}

/// Width in bits of a type-name shorthand, or `None` if unknown.
fn type_width(ty: &str) -> Option<u32> {
    match ty {
        "u8" | "s8" => Some(8),
        "u16" | "s16" => Some(16),
        "u32" | "s32" | "f32" => Some(32),
        "u64" | "s64" | "f64" => Some(64),
        "b1" => Some(1),
        "b2" => Some(2),
        "b3" => Some(3),
        "b4" => Some(4),
        "b5" => Some(5),
        "b6" => Some(6),
        "b7" => Some(7),
        _ => None,
    }
}
