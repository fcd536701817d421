#![no_main]

use codec::{decode_scf, encode_scf, EncodeOptions, WireLimits};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = WireLimits {
        max_bases: 4096,
        max_samples: 16 * 1024,
        max_comment_bytes: 4096,
        max_private_bytes: 4096,
    };
    if let Ok(file) = decode_scf(data, &limits) {
        if let Ok(encoded) = encode_scf(&file.chromatogram, &EncodeOptions::default()) {
            let again = decode_scf(&encoded.bytes[..], &WireLimits::unlimited())
                .expect("re-encoded file decodes");
            assert_eq!(again.chromatogram.bases, file.chromatogram.bases);
        }
    }
});
