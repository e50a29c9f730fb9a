//! A concrete header instance: a shared layout plus instance-owned values.

use std::sync::Arc;

use crate::{
    codec,
    errors::{BoundsError, EncodeError},
    layout::HeaderLayout,
};

/// One instance of a header type. Many instances share a single compiled
/// [HeaderLayout] through an `Arc`; each instance owns its own field values.
///
/// Values are validated against their field width when set, and again by
/// [Header::write], so an out-of-range value is never silently truncated
/// onto the wire.
#[derive(Debug, Clone)]
pub struct Header {
    layout: Arc<HeaderLayout>,
    values: Vec<u64>,
}

impl Header {
    /// Creates an instance with all fields zeroed.
    pub fn new(layout: Arc<HeaderLayout>) -> Self {
        let values = vec![0; layout.fields().len()];
        Header { layout, values }
    }

    pub fn layout(&self) -> &HeaderLayout {
        &self.layout
    }

    /// Current field values in declaration order.
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// Returns the value of the named field, or `None` if no such field.
    pub fn get(&self, name: &str) -> Option<u64> {
        self.layout.position(name).map(|i| self.values[i])
    }

    /// Sets the named field. Rejects values wider than the field.
    pub fn set(&mut self, name: &str, value: u64) -> Result<(), EncodeError> {
        let Some(index) = self.layout.position(name) else {
            return Err(EncodeError::UnknownField {
                name: name.to_string(),
            });
        };

        let field = &self.layout.fields()[index];
        if !crate::bits::fits(value, field.bit_width) {
            return Err(EncodeError::ValueOutOfRange {
                name: field.name.clone(),
                value,
                bits: field.bit_width,
            });
        }

        self.values[index] = value;
        Ok(())
    }

    /// Writes this instance's values into `buf` at `offset`; returns the
    /// offset just past the header.
    pub fn write(&self, buf: &mut [u8], offset: usize) -> Result<usize, EncodeError> {
        codec::write(buf, offset, &self.layout, &self.values)
    }

    /// Populates this instance's values from `buf` at `offset`; returns the
    /// offset just past the header.
    pub fn read(&mut self, buf: &[u8], offset: usize) -> Result<usize, BoundsError> {
        let (values, next) = codec::read(buf, offset, &self.layout)?;
        self.values = values;
        Ok(next)
    }

    /// Bytes this header occupies in a buffer.
    pub fn byte_len(&self) -> usize {
        self.layout.byte_len()
    }
}
