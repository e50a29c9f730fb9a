//! Property tests: round-trip and non-interference over random layouts.

use bitlayout::{bits, codec, field::FieldSpec, layout::HeaderLayout};
use proptest::prelude::*;

fn mask(value: u64, bits: u32) -> u64 {
    if bits >= 64 {
        value
    } else {
        value & ((1u64 << bits) - 1)
    }
}

fn layout_from_widths(widths: &[u32]) -> HeaderLayout {
    let specs: Vec<FieldSpec> = widths
        .iter()
        .enumerate()
        .map(|(i, &w)| FieldSpec::new(format!("f{i}"), w))
        .collect();
    let total: usize = widths.iter().map(|&w| w as usize).sum();

    HeaderLayout::compile_with_extra_bits(&specs, total / 8, (total % 8) as u8).unwrap()
}

proptest! {
    #[test]
    fn round_trip_any_layout(
        widths in prop::collection::vec(1u32..=32, 1..8),
        raw in prop::collection::vec(any::<u64>(), 8),
    ) {
        let layout = layout_from_widths(&widths);
        let values: Vec<u64> = widths.iter().zip(&raw).map(|(&w, &r)| mask(r, w)).collect();

        let mut buf = vec![0u8; layout.byte_len()];
        let next = codec::write(&mut buf, 0, &layout, &values).unwrap();
        prop_assert_eq!(next, layout.byte_len());

        let (decoded, next) = codec::read(&buf, 0, &layout).unwrap();
        prop_assert_eq!(next, layout.byte_len());
        prop_assert_eq!(decoded, values);
    }

    #[test]
    fn round_trip_byte_aligned_layout(
        byte_widths in prop::collection::vec(1u32..=4, 1..6),
        raw in prop::collection::vec(any::<u64>(), 6),
    ) {
        let widths: Vec<u32> = byte_widths.iter().map(|&b| b * 8).collect();
        let layout = layout_from_widths(&widths);
        prop_assert_eq!(layout.path(), bitlayout::layout::CodecPath::ByteAligned);

        let values: Vec<u64> = widths.iter().zip(&raw).map(|(&w, &r)| mask(r, w)).collect();

        let mut buf = vec![0u8; layout.byte_len()];
        codec::write(&mut buf, 0, &layout, &values).unwrap();

        let (decoded, _) = codec::read(&buf, 0, &layout).unwrap();
        prop_assert_eq!(decoded, values);
    }

    #[test]
    fn masked_write_touches_only_owned_bits(
        mut buf in prop::collection::vec(any::<u8>(), 8..16),
        start in 0usize..32,
        n in 1u32..=32,
        raw in any::<u64>(),
    ) {
        let before = buf.clone();
        let value = mask(raw, n);

        bits::write_bits_at(&mut buf, start, n, value).unwrap();
        prop_assert_eq!(bits::read_bits_at(&buf, start, n).unwrap(), value);

        for pos in 0..buf.len() * 8 {
            if pos >= start && pos < start + n as usize {
                continue;
            }
            prop_assert_eq!(
                bits::read_bit_at(&buf, pos).unwrap(),
                bits::read_bit_at(&before, pos).unwrap(),
                "bit {} changed",
                pos
            );
        }
    }

    #[test]
    fn rejected_write_leaves_buffer_unchanged(
        widths in prop::collection::vec(1u32..=16, 2..6),
        raw in prop::collection::vec(any::<u64>(), 6),
        oversized_index in 0usize..6,
    ) {
        let layout = layout_from_widths(&widths);
        let index = oversized_index % widths.len();
        // Widths are capped at 16 so an oversized value always exists.
        let mut values: Vec<u64> = widths.iter().zip(&raw).map(|(&w, &r)| mask(r, w)).collect();
        values[index] = 1u64 << widths[index];

        let mut buf = vec![0xA7u8; layout.byte_len()];
        let before = buf.clone();

        prop_assert!(codec::write(&mut buf, 0, &layout, &values).is_err());
        prop_assert_eq!(buf, before);
    }
}
