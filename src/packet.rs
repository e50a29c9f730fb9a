//! Packet composition: ordered components encoded back to back.
//!
//! A packet owns an ordered sequence of components, each either a header
//! instance or a nested packet (one layer's payload encapsulated inside
//! another). Encoding walks the sequence left to right, handing each
//! component the offset the previous one returned, so components cover a
//! contiguous buffer region with no gaps and no overlap.

use crate::{
    errors::{BoundsError, EncodeError},
    header::Header,
};

/// One unit inside a [Packet]: a header instance or an encapsulated packet.
#[derive(Debug, Clone)]
pub enum Component {
    Header(Header),
    Packet(Packet),
}

impl Component {
    /// Bytes this component occupies in a buffer.
    pub fn byte_len(&self) -> usize {
        match self {
            Component::Header(header) => header.byte_len(),
            Component::Packet(packet) => packet.byte_len(),
        }
    }

    /// Writes this component at `offset`; returns the offset just past it.
    pub fn write(&self, buf: &mut [u8], offset: usize) -> Result<usize, EncodeError> {
        match self {
            Component::Header(header) => header.write(buf, offset),
            Component::Packet(packet) => packet.write(buf, offset),
        }
    }

    /// Populates this component from `buf` at `offset`; returns the offset
    /// just past it.
    pub fn read(&mut self, buf: &[u8], offset: usize) -> Result<usize, BoundsError> {
        match self {
            Component::Header(header) => header.read(buf, offset),
            Component::Packet(packet) => packet.read(buf, offset),
        }
    }
}

impl From<Header> for Component {
    fn from(header: Header) -> Self {
        Component::Header(header)
    }
}

impl From<Packet> for Component {
    fn from(packet: Packet) -> Self {
        Component::Packet(packet)
    }
}

/// An ordered sequence of owned [Component]s.
#[derive(Debug, Clone, Default)]
pub struct Packet {
    components: Vec<Component>,
}

impl Packet {
    pub fn new() -> Self {
        Packet {
            components: Vec::new(),
        }
    }

    /// Appends a component; builder style.
    pub fn push(&mut self, component: impl Into<Component>) -> &mut Self {
        self.components.push(component.into());
        self
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn components_mut(&mut self) -> &mut [Component] {
        &mut self.components
    }

    /// Total bytes of all components. Deterministic: no component's length
    /// depends on buffer contents.
    pub fn byte_len(&self) -> usize {
        self.components.iter().map(Component::byte_len).sum()
    }

    /// Writes every component in order starting at `offset`; returns the
    /// offset just past the last one.
    pub fn write(&self, buf: &mut [u8], offset: usize) -> Result<usize, EncodeError> {
        let mut cursor = offset;
        for component in &self.components {
            cursor = component.write(buf, cursor)?;
        }

        Ok(cursor)
    }

    /// Populates every component in order from `buf` starting at `offset`;
    /// returns the offset just past the last one.
    pub fn read(&mut self, buf: &[u8], offset: usize) -> Result<usize, BoundsError> {
        let mut cursor = offset;
        for component in &mut self.components {
            cursor = component.read(buf, cursor)?;
        }

        Ok(cursor)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{field::FieldSpec, layout::HeaderLayout};

    fn header(widths: &[(&str, u32)], num_bytes: usize) -> Header {
        let specs: Vec<FieldSpec> = widths
            .iter()
            .map(|&(name, bits)| FieldSpec::new(name, bits))
            .collect();
        Header::new(Arc::new(HeaderLayout::compile(&specs, num_bytes).unwrap()))
    }

    #[test]
    fn test_component_boundaries() {
        // Components of 3, 1 and 2 bytes land at [0,3), [3,4), [4,6).
        let mut h3 = header(&[("a", 4), ("b", 4), ("c", 16)], 3);
        h3.set("a", 0xA).unwrap();
        h3.set("b", 0x5).unwrap();
        h3.set("c", 0x1234).unwrap();

        let mut h1 = header(&[("flags", 8)], 1);
        h1.set("flags", 0xEE).unwrap();

        let mut h2 = header(&[("crc", 16)], 2);
        h2.set("crc", 0xBEEF).unwrap();

        let mut packet = Packet::new();
        packet.push(h3).push(h1).push(h2);
        assert_eq!(packet.byte_len(), 6);

        let mut buf = [0u8; 6];
        let next = packet.write(&mut buf, 0).unwrap();
        assert_eq!(next, 6);
        assert_eq!(buf, [0xA5, 0x12, 0x34, 0xEE, 0xBE, 0xEF]);
    }

    #[test]
    fn test_nested_packet() {
        let mut outer_header = header(&[("proto", 8)], 1);
        outer_header.set("proto", 0x06).unwrap();

        let mut inner_header = header(&[("port", 16)], 2);
        inner_header.set("port", 443).unwrap();
        let mut inner = Packet::new();
        inner.push(inner_header);

        let mut outer = Packet::new();
        outer.push(outer_header).push(inner);
        assert_eq!(outer.byte_len(), 3);

        let mut buf = [0u8; 3];
        let next = outer.write(&mut buf, 0).unwrap();
        assert_eq!(next, 3);
        assert_eq!(buf, [0x06, 0x01, 0xBB]);
    }

    #[test]
    fn test_read_populates_components() {
        let mut packet = Packet::new();
        packet
            .push(header(&[("a", 4), ("b", 4), ("c", 16)], 3))
            .push(header(&[("flags", 8)], 1));

        let buf = [0xA5, 0x12, 0x34, 0xEE];
        let next = packet.read(&buf, 0).unwrap();
        assert_eq!(next, 4);

        let Component::Header(first) = &packet.components()[0] else {
            panic!("expected header");
        };
        assert_eq!(first.get("a"), Some(10));
        assert_eq!(first.get("b"), Some(5));
        assert_eq!(first.get("c"), Some(0x1234));

        let Component::Header(second) = &packet.components()[1] else {
            panic!("expected header");
        };
        assert_eq!(second.get("flags"), Some(0xEE));
    }

    #[test]
    fn test_write_short_buffer_fails() {
        let mut packet = Packet::new();
        packet.push(header(&[("crc", 16)], 2));

        let mut buf = [0u8; 1];
        assert!(packet.write(&mut buf, 0).is_err());
    }

    #[test]
    fn test_round_trip_preserves_values() {
        let mut h = header(&[("kind", 3), ("id", 13)], 2);
        h.set("kind", 0b101).unwrap();
        h.set("id", 0x17FF).unwrap();

        let mut packet = Packet::new();
        packet.push(h);

        let mut buf = [0u8; 2];
        packet.write(&mut buf, 0).unwrap();

        let mut parsed = Packet::new();
        parsed.push(header(&[("kind", 3), ("id", 13)], 2));
        parsed.read(&buf, 0).unwrap();

        let Component::Header(h) = &parsed.components()[0] else {
            panic!("expected header");
        };
        assert_eq!(h.get("kind"), Some(0b101));
        assert_eq!(h.get("id"), Some(0x17FF));
    }
}
