//! Low-level bit read and write utilities for byte slices.
//!
//! Bits are addressed in MSB-first order: bit 0 is the high bit of the first
//! byte. Multi-byte values are split most-significant-bits-first into the
//! earliest byte.

use crate::errors::BoundsError;

/// Reads a single bit at `bit_pos` (0 = MSB of first byte). Returns 0 or 1.
pub fn read_bit_at(data: &[u8], bit_pos: usize) -> Result<u8, BoundsError> {
    if bit_pos >= data.len() * 8 {
        return Err(BoundsError {
            offset: bit_pos / 8,
            needed: bit_pos / 8 + 1,
            available: data.len(),
        });
    }

    let byte_index = bit_pos / 8;
    let bit_index = bit_pos % 8;

    Ok((data[byte_index] >> (7 - bit_index)) & 1)
}

/// Reads `n` bits starting at `bit_pos` as an unsigned value (max 64 bits).
/// MSB-first: the first bit read becomes the highest bit of the result.
pub fn read_bits_at(data: &[u8], bit_pos: usize, n: u32) -> Result<u64, BoundsError> {
    debug_assert!(n <= 64);

    check_bit_range(data.len(), bit_pos, n)?;

    let mut value = 0u64;
    let mut pos = bit_pos;

    for _ in 0..n {
        let bit = read_bit_at(data, pos)? as u64;
        value = (value << 1) | bit;
        pos += 1;
    }

    Ok(value)
}

/// Writes the low `n` bits of `value` starting at `bit_pos`, MSB-first.
///
/// Each affected byte is updated with a masked read-modify-write, so bits
/// outside the `[bit_pos, bit_pos + n)` range are never changed. `value`
/// must already fit in `n` bits (see [fits]).
pub fn write_bits_at(data: &mut [u8], bit_pos: usize, n: u32, value: u64) -> Result<(), BoundsError> {
    debug_assert!(n <= 64);
    debug_assert!(fits(value, n));

    check_bit_range(data.len(), bit_pos, n)?;

    let mut remaining = n;
    let mut pos = bit_pos;

    while remaining > 0 {
        let byte_index = pos / 8;
        let bit_index = (pos % 8) as u32;

        // Bits of this field that land in the current byte.
        let take = (8 - bit_index).min(remaining);
        let shift = 8 - bit_index - take;
        let mask = (((1u16 << take) - 1) as u8) << shift;
        let chunk = ((value >> (remaining - take)) as u8) << shift;

        data[byte_index] = (data[byte_index] & !mask) | (chunk & mask);

        pos += take as usize;
        remaining -= take;
    }

    Ok(())
}

/// Whether `value` is representable in `bits` bits.
pub fn fits(value: u64, bits: u32) -> bool {
    bits >= 64 || value < (1u64 << bits)
}

fn check_bit_range(len: usize, bit_pos: usize, n: u32) -> Result<(), BoundsError> {
    if bit_pos
        .checked_add(n as usize)
        .is_none_or(|end| end > len * 8)
    {
        let needed = bit_pos
            .saturating_add(n as usize)
            .div_ceil(8);
        return Err(BoundsError {
            offset: bit_pos / 8,
            needed,
            available: len,
        });
    }

    Ok(())
}
