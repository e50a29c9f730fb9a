//! Error types for layout construction and buffer encode/decode.

use thiserror::Error;

/// Errors produced when compiling [crate::field::FieldSpec]s into a
/// [crate::layout::HeaderLayout]. Raised at construction time, before any
/// buffer is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Field width is zero.
    #[error("field '{name}' has zero bit width")]
    ZeroWidthField { name: String },
    /// Field width exceeds the 64-bit value cap.
    #[error("field '{name}' is {bits} bits wide, the maximum is 64")]
    FieldTooWide { name: String, bits: u32 },
    /// Two fields in the same layout share a name.
    #[error("duplicate field name '{name}'")]
    DuplicateFieldName { name: String },
    /// Fields occupy more bits than the layout declares.
    #[error("fields occupy {total_bits} bits but the layout declares {declared_bits}")]
    Overflow { declared_bits: usize, total_bits: usize },
    /// Fields leave a gap before the declared end of the layout.
    #[error("fields occupy {total_bits} bits, leaving a gap before the declared {declared_bits}")]
    Underflow { declared_bits: usize, total_bits: usize },
    /// A layout with fields must declare at least one byte.
    #[error("layout declares zero bytes but contains fields")]
    ZeroSize,
    /// Extra bits must stay inside a single trailing byte.
    #[error("declared {declared} extra bits, must be below 8")]
    ExtraBitsOutOfRange { declared: u8 },
    /// A schema definition names a type with no known width.
    #[error("field '{name}' has unknown type '{ty}'")]
    UnknownTypeName { name: String, ty: String },
    /// A schema definition gives neither a type nor an explicit width.
    #[error("field '{name}' specifies neither a type nor a bit width")]
    MissingWidth { name: String },
}

/// The buffer region at the given offset is shorter than the layout's total
/// byte length.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("buffer too short: need {needed} bytes at offset {offset}, have {available}")]
pub struct BoundsError {
    pub offset: usize,
    pub needed: usize,
    pub available: usize,
}

/// Errors produced when writing field values into a buffer. A failed write
/// leaves the buffer unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The value needs more bits than the field declares.
    #[error("value {value} does not fit in the {bits}-bit field '{name}'")]
    ValueOutOfRange { name: String, value: u64, bits: u32 },
    /// No field with this name exists in the layout.
    #[error("no field named '{name}' in this layout")]
    UnknownField { name: String },
    /// The number of supplied values does not match the layout's field count.
    #[error("layout has {expected} fields but {got} values were supplied")]
    ValueCountMismatch { expected: usize, got: usize },
    /// The target buffer region is too short.
    #[error(transparent)]
    Bounds(#[from] BoundsError),
}
