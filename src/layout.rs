//! Header layouts: validated, immutable field position tables.
//!
//! A [HeaderLayout] is compiled once from an ordered list of
//! [FieldSpec](crate::field::FieldSpec)s, then reused across arbitrarily many
//! encode/decode calls. Compilation computes every field's byte and bit
//! offset with a running bit cursor and checks the widths against the
//! declared size, so a layout that constructs successfully can never fail
//! size validation at codec time.

use crate::{errors::SchemaError, field::FieldSpec};

/// A compiled field: the declared name and width plus derived positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Name used for get/set lookups; unique within the layout.
    pub name: String,
    /// Width in bits, `1..=64`.
    pub bit_width: u32,
    /// Index of the first byte the field touches.
    pub byte_offset: usize,
    /// Offset of the field's first bit within that byte, MSB-first, `0..8`.
    pub bit_offset: u8,
}

impl FieldDescriptor {
    /// Absolute position of the field's first bit from the layout start.
    pub fn bit_position(&self) -> usize {
        self.byte_offset * 8 + self.bit_offset as usize
    }
}

/// Codec path for a whole layout, selected once at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecPath {
    /// Every field starts on a byte boundary and spans whole bytes; fields
    /// never share a byte, so no read-modify-write is needed.
    ByteAligned,
    /// At least one field starts mid-byte or has a width that is not a
    /// multiple of 8; writes are masked per affected byte.
    BitPacked,
}

/// An ordered, validated set of [FieldDescriptor]s with a declared total
/// size. Immutable after construction; holds no per-call state, so one
/// layout can back any number of header instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLayout {
    fields: Vec<FieldDescriptor>,
    num_bytes: usize,
    num_extra_bits: u8,
    path: CodecPath,
}

impl HeaderLayout {
    /// Compiles a byte-aligned declaration: field widths must sum to exactly
    /// `num_bytes * 8`.
    pub fn compile(fields: &[FieldSpec], num_bytes: usize) -> Result<Self, SchemaError> {
        Self::compile_with_extra_bits(fields, num_bytes, 0)
    }

    /// Compiles a declaration whose fields extend `num_extra_bits` bits past
    /// the last whole byte: widths must sum to exactly
    /// `num_bytes * 8 + num_extra_bits`.
    pub fn compile_with_extra_bits(
        fields: &[FieldSpec],
        num_bytes: usize,
        num_extra_bits: u8,
    ) -> Result<Self, SchemaError> {
        if num_extra_bits >= 8 {
            return Err(SchemaError::ExtraBitsOutOfRange {
                declared: num_extra_bits,
            });
        }
        if num_bytes == 0 && !fields.is_empty() {
            return Err(SchemaError::ZeroSize);
        }

        let declared_bits = num_bytes * 8 + num_extra_bits as usize;

        let mut compiled: Vec<FieldDescriptor> = Vec::with_capacity(fields.len());
        let mut cursor = 0usize;
        let mut path = CodecPath::ByteAligned;

        for field in fields {
            if field.bit_width == 0 {
                return Err(SchemaError::ZeroWidthField {
                    name: field.name.clone(),
                });
            }
            if field.bit_width > 64 {
                return Err(SchemaError::FieldTooWide {
                    name: field.name.clone(),
                    bits: field.bit_width,
                });
            }
            if compiled.iter().any(|f| f.name == field.name) {
                return Err(SchemaError::DuplicateFieldName {
                    name: field.name.clone(),
                });
            }

            let byte_offset = cursor / 8;
            let bit_offset = (cursor % 8) as u8;

            if bit_offset != 0 || field.bit_width % 8 != 0 {
                path = CodecPath::BitPacked;
            }

            compiled.push(FieldDescriptor {
                name: field.name.clone(),
                bit_width: field.bit_width,
                byte_offset,
                bit_offset,
            });

            cursor += field.bit_width as usize;
            if cursor > declared_bits {
                return Err(SchemaError::Overflow {
                    declared_bits,
                    total_bits: cursor,
                });
            }
        }

        if cursor < declared_bits {
            return Err(SchemaError::Underflow {
                declared_bits,
                total_bits: cursor,
            });
        }

        Ok(Self {
            fields: compiled,
            num_bytes,
            num_extra_bits,
            path,
        })
    }

    /// Compiled fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Declared whole-byte size.
    pub fn num_bytes(&self) -> usize {
        self.num_bytes
    }

    /// Declared bits past the last whole byte, `0..8`.
    pub fn num_extra_bits(&self) -> u8 {
        self.num_extra_bits
    }

    /// Codec path selected for this layout.
    pub fn path(&self) -> CodecPath {
        self.path
    }

    /// Total bytes the layout occupies in a buffer: the extra bits, if any,
    /// take up one more byte.
    pub fn byte_len(&self) -> usize {
        self.num_bytes + usize::from(self.num_extra_bits > 0)
    }

    /// Total occupied bits.
    pub fn total_bits(&self) -> usize {
        self.num_bytes * 8 + self.num_extra_bits as usize
    }

    /// Looks up a field descriptor by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Looks up a field's index in declaration order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}
