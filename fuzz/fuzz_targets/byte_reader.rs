#![no_main]

use bytestream::{ByteReader, ValueWidth};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First half drives operations, second half is the stream.
    let (ops, stream) = data.split_at(data.len() / 2);
    let mut reader = ByteReader::new(stream);

    for &op in ops.iter().take(1024) {
        match op % 7 {
            0 => {
                let _ = reader.read_u8();
            }
            1 => {
                let _ = reader.read_u16();
            }
            2 => {
                let _ = reader.read_i32();
            }
            3 => {
                let _ = reader.read_i64();
            }
            4 => {
                let _ = reader.read_bytes(usize::from(op));
            }
            5 => {
                let target = reader.position() + u64::from(op >> 3);
                let _ = reader.skip_to(target);
            }
            _ => {
                let width = ValueWidth::from_bytes(1 << (op % 4)).unwrap_or(ValueWidth::Byte);
                if let Ok(value) = width.read(&mut reader) {
                    assert_eq!(width.normalize(value), value);
                }
            }
        }
    }
});
