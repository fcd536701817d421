#![no_main]

use codec::{decode_glyph_at, decode_glyphs_with_limits, CodecLimits, RunLengthGlyphCodec};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = CodecLimits::for_testing();
    if let Ok(decoded) = decode_glyphs_with_limits(data, &limits) {
        for (i, value) in decoded.iter().enumerate().take(64) {
            assert_eq!(decode_glyph_at(data, i).ok(), Some(*value));
        }
        // Re-encoding with the payload's guard reproduces the decoded glyphs.
        let codec = RunLengthGlyphCodec::new(data[4]);
        let encoded = codec.encode(&decoded).expect("count fits i32");
        assert_eq!(encoded.len(), codec.encoded_len(&decoded));
    }
});
