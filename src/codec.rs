//! Stateless encode/decode of field values against a [HeaderLayout].
//!
//! Both functions take a caller-owned buffer and a starting offset and
//! return the offset advanced past the layout, so calls chain across the
//! components of a packet. The codec path was fixed when the layout was
//! compiled: byte-aligned layouts use whole-byte block copies, everything
//! else goes through masked bit writes that never touch bits outside the
//! field being written.

use crate::{
    bits,
    errors::{BoundsError, EncodeError},
    layout::{CodecPath, HeaderLayout},
};

/// Writes `values` (one per field, in declaration order) into `buf` at
/// `offset`. Returns the offset just past the layout.
///
/// All bounds and range checks run before the first mutation, so on error
/// the buffer is unchanged.
pub fn write(
    buf: &mut [u8],
    offset: usize,
    layout: &HeaderLayout,
    values: &[u64],
) -> Result<usize, EncodeError> {
    if values.len() != layout.fields().len() {
        return Err(EncodeError::ValueCountMismatch {
            expected: layout.fields().len(),
            got: values.len(),
        });
    }

    check_bounds(buf.len(), offset, layout)?;

    for (field, &value) in layout.fields().iter().zip(values) {
        if !bits::fits(value, field.bit_width) {
            return Err(EncodeError::ValueOutOfRange {
                name: field.name.clone(),
                value,
                bits: field.bit_width,
            });
        }
    }

    let region = &mut buf[offset..];
    match layout.path() {
        CodecPath::ByteAligned => write_aligned(region, layout, values),
        CodecPath::BitPacked => write_packed(region, layout, values)?,
    }

    Ok(offset + layout.byte_len())
}

/// Reads one value per field from `buf` at `offset`. Returns the values in
/// declaration order and the offset just past the layout.
pub fn read(
    buf: &[u8],
    offset: usize,
    layout: &HeaderLayout,
) -> Result<(Vec<u64>, usize), BoundsError> {
    check_bounds(buf.len(), offset, layout)?;

    let region = &buf[offset..];
    let values = match layout.path() {
        CodecPath::ByteAligned => read_aligned(region, layout),
        CodecPath::BitPacked => read_packed(region, layout)?,
    };

    Ok((values, offset + layout.byte_len()))
}

fn check_bounds(len: usize, offset: usize, layout: &HeaderLayout) -> Result<(), BoundsError> {
    let needed = layout.byte_len();
    let available = len.saturating_sub(offset);
    if available < needed {
        return Err(BoundsError {
            offset,
            needed,
            available,
        });
    }

    Ok(())
}

/// Fast path: every field spans whole bytes from a byte boundary. Values are
/// copied big-endian, most significant byte first.
fn write_aligned(region: &mut [u8], layout: &HeaderLayout, values: &[u64]) {
    for (field, &value) in layout.fields().iter().zip(values) {
        let n = (field.bit_width / 8) as usize;
        let be = value.to_be_bytes();
        region[field.byte_offset..field.byte_offset + n].copy_from_slice(&be[8 - n..]);
    }
}

fn read_aligned(region: &[u8], layout: &HeaderLayout) -> Vec<u64> {
    let mut values = Vec::with_capacity(layout.fields().len());

    for field in layout.fields() {
        let n = (field.bit_width / 8) as usize;
        let mut be = [0u8; 8];
        be[8 - n..].copy_from_slice(&region[field.byte_offset..field.byte_offset + n]);
        values.push(u64::from_be_bytes(be));
    }

    values
}

/// General path: masked read-modify-write per affected byte, MSB-first.
fn write_packed(
    region: &mut [u8],
    layout: &HeaderLayout,
    values: &[u64],
) -> Result<(), BoundsError> {
    for (field, &value) in layout.fields().iter().zip(values) {
        bits::write_bits_at(region, field.bit_position(), field.bit_width, value)?;
    }

    Ok(())
}

fn read_packed(region: &[u8], layout: &HeaderLayout) -> Result<Vec<u64>, BoundsError> {
    let mut values = Vec::with_capacity(layout.fields().len());

    for field in layout.fields() {
        values.push(bits::read_bits_at(
            region,
            field.bit_position(),
            field.bit_width,
        )?);
    }

    Ok(values)
}
