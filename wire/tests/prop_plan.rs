use proptest::prelude::*;
use wire::{decode_header, plan_sections, Limits, ScfHeader, ScfVersion, HEADER_SIZE};

fn arb_header() -> impl Strategy<Value = ScfHeader> {
    (
        (0u32..64, 0u32..512, 0u32..32, 0u32..512),
        (0u32..64, 0u32..512, 0u32..64, 0u32..512),
        1u32..=2,
    )
        .prop_map(
            |(
                (samples, samples_offset, bases, bases_offset),
                (comments_size, comments_offset, private_size, private_offset),
                sample_size,
            )| ScfHeader {
                samples,
                samples_offset,
                bases,
                bases_offset,
                comments_size,
                comments_offset,
                private_size,
                private_offset,
                sample_size,
                ..ScfHeader::new(ScfVersion::V3)
            },
        )
}

proptest! {
    #[test]
    fn planned_sections_are_disjoint_and_ordered(header in arb_header()) {
        if let Ok(spans) = plan_sections(&header, &Limits::unlimited()) {
            let mut end = HEADER_SIZE as u64;
            for span in &spans {
                prop_assert!(span.len > 0);
                prop_assert!(span.offset >= end);
                end = span.end();
            }
        }
    }

    #[test]
    fn header_bytes_reparse(header in arb_header()) {
        let bytes = header.to_bytes();
        prop_assert_eq!(decode_header(&bytes).unwrap(), header);
    }

    #[test]
    fn decode_header_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..200)) {
        let _ = decode_header(&bytes);
    }
}
