//! Delta prediction for sample and peak arrays.
//!
//! A [`DeltaEncoder`] predicts the next value from the previously seen
//! values; a [`DeltaCodec`] stores each value as its difference from that
//! prediction. Smooth traces turn into runs of small residuals.
//!
//! All arithmetic wraps in 64 bits and stored values are truncated to the
//! configured [`ValueWidth`], so encode and decode agree modulo the width
//! even when a residual does not fit.

use bytestream::{ByteReader, ByteWriter, ValueWidth};

use crate::error::{CodecError, CodecResult, MalformedReason};

/// Predictor used to compute the expected next value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeltaEncoder {
    /// Repeats the last value.
    FirstOrder,
    /// Linear extrapolation: `2*last - second_to_last`.
    SecondOrder,
    /// Quadratic extrapolation: `3*last - 3*second_to_last + third_to_last`.
    ThirdOrder,
}

impl DeltaEncoder {
    /// Returns the predicted next value for `history`.
    #[must_use]
    pub const fn compute_delta(self, history: DeltaHistory) -> i64 {
        match self {
            Self::FirstOrder => history.last,
            Self::SecondOrder => history
                .last
                .wrapping_mul(2)
                .wrapping_sub(history.second_to_last),
            Self::ThirdOrder => history
                .last
                .wrapping_mul(3)
                .wrapping_sub(history.second_to_last.wrapping_mul(3))
                .wrapping_add(history.third_to_last),
        }
    }
}

/// The three most recent actual values, newest first.
///
/// Slots not yet filled are zero. An order-3 prediction for the second
/// element therefore sees `third_to_last = 0` and `second_to_last = 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeltaHistory {
    pub last: i64,
    pub second_to_last: i64,
    pub third_to_last: i64,
}

impl DeltaHistory {
    /// Returns the history after observing `actual`.
    #[must_use]
    pub const fn advance(self, actual: i64) -> Self {
        Self {
            last: actual,
            second_to_last: self.last,
            third_to_last: self.second_to_last,
        }
    }
}

/// Encodes and decodes fixed-width value arrays as prediction residuals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeltaCodec {
    encoder: DeltaEncoder,
    width: ValueWidth,
}

impl DeltaCodec {
    #[must_use]
    pub const fn new(encoder: DeltaEncoder, width: ValueWidth) -> Self {
        Self { encoder, width }
    }

    #[must_use]
    pub const fn encoder(&self) -> DeltaEncoder {
        self.encoder
    }

    #[must_use]
    pub const fn width(&self) -> ValueWidth {
        self.width
    }

    /// Replaces actual values with residuals, in place.
    ///
    /// The first value is kept raw. Later values become
    /// `actual - compute_delta(history)` truncated to the width.
    pub fn encode_values(&self, values: &mut [i64]) {
        let mut history = DeltaHistory::default();
        for (i, slot) in values.iter_mut().enumerate() {
            let actual = self.width.normalize(*slot);
            if i > 0 {
                let predicted = self.encoder.compute_delta(history);
                *slot = self.width.normalize(actual.wrapping_sub(predicted));
            } else {
                *slot = actual;
            }
            history = history.advance(actual);
        }
    }

    /// Replaces residuals with actual values, in place.
    pub fn decode_values(&self, values: &mut [i64]) {
        let mut history = DeltaHistory::default();
        for (i, slot) in values.iter_mut().enumerate() {
            let residual = self.width.normalize(*slot);
            let actual = if i > 0 {
                let predicted = self.encoder.compute_delta(history);
                self.width.normalize(residual.wrapping_add(predicted))
            } else {
                residual
            };
            *slot = actual;
            history = history.advance(actual);
        }
    }

    /// Encodes a buffer of big-endian values of this codec's width.
    ///
    /// The output has exactly the input's length.
    pub fn encode(&self, values: &[u8]) -> CodecResult<Vec<u8>> {
        let mut working = self.read_all(values)?;
        self.encode_values(&mut working);
        tracing::trace!(
            values = working.len(),
            width = self.width.bytes(),
            "delta encoded"
        );
        Ok(self.write_all(&working))
    }

    /// Decodes a buffer produced by [`encode`](Self::encode).
    pub fn decode(&self, encoded: &[u8]) -> CodecResult<Vec<u8>> {
        let mut working = self.read_all(encoded)?;
        self.decode_values(&mut working);
        tracing::trace!(
            values = working.len(),
            width = self.width.bytes(),
            "delta decoded"
        );
        Ok(self.write_all(&working))
    }

    fn read_all(&self, bytes: &[u8]) -> CodecResult<Vec<i64>> {
        let width = self.width.bytes();
        if bytes.len() % width != 0 {
            return Err(CodecError::Malformed {
                reason: MalformedReason::UnalignedLength {
                    len: bytes.len(),
                    width,
                },
            });
        }
        let mut reader = ByteReader::new(bytes);
        let mut out = Vec::with_capacity(bytes.len() / width);
        for _ in 0..bytes.len() / width {
            out.push(self.width.read(&mut reader)?);
        }
        Ok(out)
    }

    fn write_all(&self, values: &[i64]) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(values.len() * self.width.bytes());
        for &value in values {
            self.width.write(&mut writer, value);
        }
        writer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(last: i64, second: i64, third: i64) -> DeltaHistory {
        DeltaHistory {
            last,
            second_to_last: second,
            third_to_last: third,
        }
    }

    fn short_bytes(values: &[u16]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_be_bytes()).collect()
    }

    #[test]
    fn second_order_extrapolates_linearly() {
        assert_eq!(
            DeltaEncoder::SecondOrder.compute_delta(history(10, 7, 0)),
            13
        );
    }

    #[test]
    fn third_order_extrapolates_quadratically() {
        // 1, 4, 9 -> 16
        assert_eq!(DeltaEncoder::ThirdOrder.compute_delta(history(9, 4, 1)), 16);
    }

    #[test]
    fn first_order_repeats_last() {
        assert_eq!(DeltaEncoder::FirstOrder.compute_delta(history(5, 1, 2)), 5);
    }

    #[test]
    fn history_shifts() {
        let h = DeltaHistory::default().advance(1).advance(2).advance(3);
        assert_eq!(h, history(3, 2, 1));
        assert_eq!(h.advance(4), history(4, 3, 2));
    }

    #[test]
    fn linear_ramp_has_zero_residuals_after_two() {
        let codec = DeltaCodec::new(DeltaEncoder::SecondOrder, ValueWidth::Short);
        let mut values = vec![10, 20, 30, 40, 50];
        codec.encode_values(&mut values);
        // second residual: 20 - 2*10
        assert_eq!(values, vec![10, 0, 0, 0, 0]);
    }

    #[test]
    fn third_order_second_element_uses_zero_history() {
        let codec = DeltaCodec::new(DeltaEncoder::ThirdOrder, ValueWidth::Int);
        let mut values = vec![5, 20, 50];
        codec.encode_values(&mut values);
        // 20 - 3*5 = 5; 50 - (3*20 - 3*5 + 0) = 5
        assert_eq!(values, vec![5, 5, 5]);
    }

    #[test]
    fn encode_empty_and_single() {
        let codec = DeltaCodec::new(DeltaEncoder::SecondOrder, ValueWidth::Short);
        assert!(codec.encode(&[]).unwrap().is_empty());
        assert!(codec.decode(&[]).unwrap().is_empty());

        let single = short_bytes(&[1234]);
        assert_eq!(codec.encode(&single).unwrap(), single);
        assert_eq!(codec.decode(&single).unwrap(), single);
    }

    #[test]
    fn residuals_wrap_at_width() {
        let codec = DeltaCodec::new(DeltaEncoder::SecondOrder, ValueWidth::Byte);
        let encoded = codec.encode(&[200, 100]).unwrap();
        // 100 - 400 = -300, stored as -300 mod 256
        assert_eq!(encoded, vec![200, 212]);
        assert_eq!(codec.decode(&encoded).unwrap(), vec![200, 100]);
    }

    #[test]
    fn short_roundtrip() {
        let codec = DeltaCodec::new(DeltaEncoder::SecondOrder, ValueWidth::Short);
        let raw = short_bytes(&[0, 3, 65_535, 17, 40_000, 40_001, 2]);
        let encoded = codec.encode(&raw).unwrap();
        assert_eq!(encoded.len(), raw.len());
        assert_eq!(codec.decode(&encoded).unwrap(), raw);
    }

    #[test]
    fn unaligned_input_is_malformed() {
        let codec = DeltaCodec::new(DeltaEncoder::ThirdOrder, ValueWidth::Int);
        let err = codec.decode(&[0, 0, 0, 1, 2]).unwrap_err();
        assert_eq!(
            err,
            CodecError::Malformed {
                reason: MalformedReason::UnalignedLength { len: 5, width: 4 }
            }
        );
    }
}
