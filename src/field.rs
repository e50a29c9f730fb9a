//! Field declarations used to build a [crate::layout::HeaderLayout].

/// A single named field as declared by the user: a name and a width in bits.
/// Byte and bit offsets are computed at compile time, not supplied here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Name used for get/set lookups; unique within its layout.
    pub name: String,
    /// Number of bits the field's value occupies. Must be in `1..=64`.
    pub bit_width: u32,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, bit_width: u32) -> Self {
        FieldSpec {
            name: name.into(),
            bit_width,
        }
    }
}
