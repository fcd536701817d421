//! Guard-byte run-length encoding for quality values.
//!
//! Layout: `[i32 count][u8 guard][tokens...]`, big-endian. Tokens:
//!
//! | Token                      | Meaning                          |
//! |----------------------------|----------------------------------|
//! | `b` (b != guard)           | one literal `b`                  |
//! | `guard, 0i16`              | one literal guard value          |
//! | `guard, n: i16, v` (n > 0) | `n` repetitions of `v`           |
//!
//! Runs longer than `i16::MAX` are split into several run tokens.

use bytestream::{ByteReader, ByteWriter, MAX_PREALLOC};

use crate::error::{CodecError, CodecResult, LimitKind, MalformedReason, ValueReason};
use crate::limits::CodecLimits;

/// Bytes before the first token: element count and guard.
pub const RUN_LENGTH_PREAMBLE: usize = 5;

/// Longest run a single token can carry.
pub const MAX_RUN_LENGTH: usize = i16::MAX as usize;

/// Guard used by [`RunLengthGlyphCodec::default`].
pub const DEFAULT_GUARD: u8 = 0xFF;

/// A maximal run of equal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityRun {
    pub value: u8,
    pub length: usize,
}

/// Splits `input` into maximal runs of equal values.
#[must_use]
pub fn runs(input: &[u8]) -> Vec<QualityRun> {
    let mut out: Vec<QualityRun> = Vec::new();
    for &value in input {
        match out.last_mut() {
            Some(run) if run.value == value => run.length += 1,
            _ => out.push(QualityRun { value, length: 1 }),
        }
    }
    out
}

/// Run-length codec for single-byte glyphs with a caller-chosen guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLengthGlyphCodec {
    guard: u8,
}

impl Default for RunLengthGlyphCodec {
    fn default() -> Self {
        Self::new(DEFAULT_GUARD)
    }
}

impl RunLengthGlyphCodec {
    #[must_use]
    pub const fn new(guard: u8) -> Self {
        Self { guard }
    }

    #[must_use]
    pub const fn guard(&self) -> u8 {
        self.guard
    }

    /// Returns the exact number of bytes [`encode`](Self::encode) writes.
    #[must_use]
    pub fn encoded_len(&self, input: &[u8]) -> usize {
        RUN_LENGTH_PREAMBLE
            + runs(input)
                .iter()
                .map(|run| self.run_cost(*run))
                .sum::<usize>()
    }

    fn run_cost(&self, run: QualityRun) -> usize {
        if run.value == self.guard {
            return 3 * run.length;
        }
        let full = run.length / MAX_RUN_LENGTH;
        let tail = match run.length % MAX_RUN_LENGTH {
            0 => 0,
            1 => 1,
            _ => 4,
        };
        4 * full + tail
    }

    /// Encodes `input`. Fails only if the count does not fit the `i32` preamble.
    pub fn encode(&self, input: &[u8]) -> CodecResult<Vec<u8>> {
        let count = i32::try_from(input.len()).map_err(|_| CodecError::LimitsExceeded {
            kind: LimitKind::Glyphs,
            limit: i32::MAX as usize,
            actual: input.len(),
        })?;
        let expected = self.encoded_len(input);
        let mut writer = ByteWriter::with_capacity(expected);
        writer.write_i32(count);
        writer.write_u8(self.guard);

        for run in runs(input) {
            if run.value == self.guard {
                for _ in 0..run.length {
                    writer.write_u8(self.guard);
                    writer.write_i16(0);
                }
                continue;
            }
            let mut remaining = run.length;
            while remaining > 0 {
                let chunk = remaining.min(MAX_RUN_LENGTH);
                if chunk == 1 {
                    writer.write_u8(run.value);
                } else {
                    writer.write_u8(self.guard);
                    // chunk <= i16::MAX
                    writer.write_i16(chunk as i16);
                    writer.write_u8(run.value);
                }
                remaining -= chunk;
            }
        }

        debug_assert_eq!(writer.len(), expected);
        debug_assert!(writer.capacity() >= expected);
        tracing::trace!(
            glyphs = input.len(),
            encoded = expected,
            guard = self.guard,
            "run-length encoded"
        );
        Ok(writer.finish())
    }

    /// Decodes a payload. The guard stored in the payload is used, not `self.guard`.
    pub fn decode(&self, encoded: &[u8]) -> CodecResult<Vec<u8>> {
        decode_glyphs(encoded)
    }

    /// Decodes the element at `index`, stopping once it is produced.
    pub fn decode_at(&self, encoded: &[u8], index: usize) -> CodecResult<u8> {
        decode_glyph_at(encoded, index)
    }
}

/// Decodes a run-length payload with default limits.
pub fn decode_glyphs(encoded: &[u8]) -> CodecResult<Vec<u8>> {
    decode_glyphs_with_limits(encoded, &CodecLimits::default())
}

/// Decodes a run-length payload, rejecting declared counts above `limits`.
pub fn decode_glyphs_with_limits(encoded: &[u8], limits: &CodecLimits) -> CodecResult<Vec<u8>> {
    let mut tokens = TokenReader::new(encoded)?;
    if tokens.count > limits.max_glyphs {
        return Err(CodecError::LimitsExceeded {
            kind: LimitKind::Glyphs,
            limit: limits.max_glyphs,
            actual: tokens.count,
        });
    }

    let mut out = Vec::with_capacity(tokens.count.min(MAX_PREALLOC));
    while out.len() < tokens.count {
        let run = tokens.next_run(out.len())?;
        out.resize(out.len() + run.length, run.value);
    }
    let guard = tokens.guard;
    tokens.finish()?;
    tracing::trace!(
        glyphs = out.len(),
        encoded = encoded.len(),
        guard = guard,
        "run-length decoded"
    );
    Ok(out)
}

/// Decodes only as far as needed to return element `index`.
pub fn decode_glyph_at(encoded: &[u8], index: usize) -> CodecResult<u8> {
    let mut tokens = TokenReader::new(encoded)?;
    if index >= tokens.count {
        return Err(CodecError::IndexOutOfRange {
            index,
            len: tokens.count,
        });
    }

    let mut produced = 0;
    loop {
        let run = tokens.next_run(produced)?;
        produced += run.length;
        if index < produced {
            return Ok(run.value);
        }
    }
}

/// Reads the declared element count without decoding any tokens.
pub fn decoded_glyph_count(encoded: &[u8]) -> CodecResult<usize> {
    TokenReader::new(encoded).map(|tokens| tokens.count)
}

struct TokenReader<'a> {
    reader: ByteReader<&'a [u8]>,
    len: usize,
    count: usize,
    guard: u8,
}

impl<'a> TokenReader<'a> {
    fn new(encoded: &'a [u8]) -> CodecResult<Self> {
        if encoded.len() < RUN_LENGTH_PREAMBLE {
            return Err(CodecError::Malformed {
                reason: MalformedReason::MissingPreamble {
                    len: encoded.len(),
                    required: RUN_LENGTH_PREAMBLE,
                },
            });
        }
        let mut reader = ByteReader::new(encoded);
        let raw_count = reader.read_i32()?;
        let count = usize::try_from(raw_count).map_err(|_| CodecError::IllegalEncodedValue {
            reason: ValueReason::NegativeCount { value: raw_count },
        })?;
        let guard = reader.read_u8()?;
        Ok(Self {
            reader,
            len: encoded.len(),
            count,
            guard,
        })
    }

    /// Reads one token. `produced` is the number of elements already emitted.
    fn next_run(&mut self, produced: usize) -> CodecResult<QualityRun> {
        let byte = self.reader.read_u8()?;
        if byte != self.guard {
            return Ok(QualityRun {
                value: byte,
                length: 1,
            });
        }

        let raw = self.reader.read_i16()?;
        let run = match raw {
            0 => QualityRun {
                value: self.guard,
                length: 1,
            },
            n if n < 0 => {
                return Err(CodecError::IllegalEncodedValue {
                    reason: ValueReason::NegativeRunLength { value: n },
                })
            }
            n => QualityRun {
                value: self.reader.read_u8()?,
                length: n as usize,
            },
        };

        if produced + run.length > self.count {
            return Err(CodecError::IllegalEncodedValue {
                reason: ValueReason::RunOverflow {
                    declared: self.count,
                    produced: produced + run.length,
                },
            });
        }
        Ok(run)
    }

    fn finish(self) -> CodecResult<()> {
        if (self.reader.position() as usize) < self.len {
            return Err(CodecError::Malformed {
                reason: MalformedReason::TrailingBytes,
            });
        }
        Ok(())
    }
}
