//! # bitlayout
//!
//! Bit-level packing and unpacking of protocol headers described by
//! declarative layouts.
//!
//! A header is an ordered set of named, fixed-width fields, including fields
//! whose width is not a multiple of 8 bits and that therefore share bytes
//! with their neighbors. Compile the field list once into a
//! [HeaderLayout](layout::HeaderLayout) (offsets are computed and validated
//! at construction), then encode and decode any number of buffers against it.
//! Headers compose into [Packet](packet::Packet)s, where each component is
//! either a header instance or a nested packet, encoded back to back.
//!
//! Bit order is fixed: MSB-first within a byte, most significant bits first
//! when a field spans bytes, big-endian for whole-byte fields.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use bitlayout::field::FieldSpec;
//! use bitlayout::header::Header;
//! use bitlayout::layout::HeaderLayout;
//!
//! let layout = Arc::new(HeaderLayout::compile(
//!     &[
//!         FieldSpec::new("version", 4),
//!         FieldSpec::new("ihl", 4),
//!         FieldSpec::new("length", 16),
//!     ],
//!     3,
//! ).unwrap());
//!
//! let mut header = Header::new(layout);
//! header.set("version", 4).unwrap();
//! header.set("ihl", 5).unwrap();
//! header.set("length", 1500).unwrap();
//!
//! let mut buf = [0u8; 3];
//! let next = header.write(&mut buf, 0).unwrap();
//! assert_eq!(next, 3);
//! assert_eq!(buf[0], 0x45);
//! ```

pub mod bits;
pub mod codec;
#[cfg(feature = "serde")]
pub mod defs;
pub mod errors;
pub mod field;
pub mod header;
pub mod layout;
pub mod packet;
