use codec::{
    decode_glyph_at, decode_glyphs, DeltaCodec, DeltaEncoder, RunLengthGlyphCodec, ValueWidth,
    MAX_RUN_LENGTH, RUN_LENGTH_PREAMBLE,
};
use proptest::prelude::*;

const WIDTHS: [ValueWidth; 4] = [
    ValueWidth::Byte,
    ValueWidth::Short,
    ValueWidth::Int,
    ValueWidth::Long,
];

const ORDERS: [DeltaEncoder; 3] = [
    DeltaEncoder::FirstOrder,
    DeltaEncoder::SecondOrder,
    DeltaEncoder::ThirdOrder,
];

fn to_bytes(values: &[u64], width: ValueWidth) -> Vec<u8> {
    let n = width.bytes();
    values
        .iter()
        .flat_map(|v| v.to_be_bytes()[8 - n..].to_vec())
        .collect()
}

/// Size formula counted independently of the encoder.
fn predicted_len(input: &[u8], guard: u8) -> usize {
    let mut total = RUN_LENGTH_PREAMBLE;
    let mut i = 0;
    while i < input.len() {
        let value = input[i];
        let mut len = 1;
        while i + len < input.len() && input[i + len] == value {
            len += 1;
        }
        total += if value == guard {
            3 * len
        } else {
            let tail = match len % MAX_RUN_LENGTH {
                0 => 0,
                1 => 1,
                _ => 4,
            };
            4 * (len / MAX_RUN_LENGTH) + tail
        };
        i += len;
    }
    total
}

fn glyphs_with_runs() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec((0u8..6, 1usize..40), 0..24).prop_map(|runs| {
        runs.into_iter()
            .flat_map(|(value, len)| std::iter::repeat(value).take(len))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_delta_roundtrip(values in prop::collection::vec(any::<u64>(), 0..64)) {
        for width in WIDTHS {
            let raw = to_bytes(&values, width);
            for order in ORDERS {
                let codec = DeltaCodec::new(order, width);
                let encoded = codec.encode(&raw).unwrap();
                prop_assert_eq!(encoded.len(), raw.len());
                prop_assert_eq!(codec.decode(&encoded).unwrap(), raw.clone());
            }
        }
    }

    #[test]
    fn prop_delta_values_roundtrip(values in prop::collection::vec(any::<i64>(), 0..64)) {
        for width in WIDTHS {
            let expected: Vec<i64> = values.iter().map(|&v| width.normalize(v)).collect();
            for order in ORDERS {
                let codec = DeltaCodec::new(order, width);
                let mut working = values.clone();
                codec.encode_values(&mut working);
                codec.decode_values(&mut working);
                prop_assert_eq!(&working, &expected);
            }
        }
    }

    #[test]
    fn prop_rle_roundtrip(input in glyphs_with_runs(), guard in 0u8..6) {
        let codec = RunLengthGlyphCodec::new(guard);
        let encoded = codec.encode(&input).unwrap();
        prop_assert_eq!(decode_glyphs(&encoded).unwrap(), input);
    }

    #[test]
    fn prop_rle_arbitrary_bytes(input in prop::collection::vec(any::<u8>(), 0..256), guard in any::<u8>()) {
        let codec = RunLengthGlyphCodec::new(guard);
        let encoded = codec.encode(&input).unwrap();
        prop_assert_eq!(decode_glyphs(&encoded).unwrap(), input);
    }

    #[test]
    fn prop_rle_all_guard(len in 0usize..200, guard in any::<u8>()) {
        let input = vec![guard; len];
        let codec = RunLengthGlyphCodec::new(guard);
        let encoded = codec.encode(&input).unwrap();
        prop_assert_eq!(encoded.len(), RUN_LENGTH_PREAMBLE + 3 * len);
        prop_assert_eq!(decode_glyphs(&encoded).unwrap(), input);
    }

    #[test]
    fn prop_rle_decode_at_matches_decode(input in glyphs_with_runs(), guard in 0u8..6) {
        let encoded = RunLengthGlyphCodec::new(guard).encode(&input).unwrap();
        let decoded = decode_glyphs(&encoded).unwrap();
        for (i, value) in decoded.iter().enumerate() {
            prop_assert_eq!(decode_glyph_at(&encoded, i).unwrap(), *value);
        }
        prop_assert!(decode_glyph_at(&encoded, decoded.len()).is_err());
    }

    #[test]
    fn prop_rle_size_prediction(input in glyphs_with_runs(), guard in 0u8..6) {
        let codec = RunLengthGlyphCodec::new(guard);
        let encoded = codec.encode(&input).unwrap();
        prop_assert_eq!(encoded.len(), predicted_len(&input, guard));
        prop_assert_eq!(codec.encoded_len(&input), encoded.len());
    }

    #[test]
    fn prop_rle_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = decode_glyphs(&bytes);
        let _ = decode_glyph_at(&bytes, 3);
    }
}
