use std::ops::Range;
use std::time::Duration;

use super::error::DecodeError;
use super::packet::PacketKind;

/// Bounds-checked big-endian access to one packet body.
///
/// Every read returns `DecodeError` instead of panicking, so a corrupt body
/// can only ever fail its own decode.
pub struct TsipReader<'a> {
    kind: PacketKind,
    payload: &'a [u8],
}

impl<'a> TsipReader<'a> {
    pub fn new(kind: PacketKind, payload: &'a [u8]) -> Self {
        Self { kind, payload }
    }

    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    pub fn require_len(&self, needed: usize) -> Result<(), DecodeError> {
        if self.payload.len() < needed {
            return Err(self.too_short(needed));
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, DecodeError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or_else(|| self.too_short(offset.saturating_add(1)))
    }

    pub fn read_i8(&self, offset: usize) -> Result<i8, DecodeError> {
        self.read_u8(offset).map(|value| value as i8)
    }

    pub fn read_u16_be(&self, range: Range<usize>) -> Result<u16, DecodeError> {
        self.read_array(range).map(u16::from_be_bytes)
    }

    pub fn read_i16_be(&self, range: Range<usize>) -> Result<i16, DecodeError> {
        self.read_array(range).map(i16::from_be_bytes)
    }

    pub fn read_u32_be(&self, range: Range<usize>) -> Result<u32, DecodeError> {
        self.read_array(range).map(u32::from_be_bytes)
    }

    pub fn read_f32_be(&self, range: Range<usize>) -> Result<f32, DecodeError> {
        self.read_array(range).map(f32::from_be_bytes)
    }

    pub fn read_f64_be(&self, range: Range<usize>) -> Result<f64, DecodeError> {
        self.read_array(range).map(f64::from_be_bytes)
    }

    pub fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], DecodeError> {
        self.payload
            .get(range.clone())
            .ok_or_else(|| self.too_short(range.end))
    }

    /// Read a float32 millisecond count as a duration, truncated to whole
    /// milliseconds.
    pub fn read_millis_f32(
        &self,
        range: Range<usize>,
        field: &'static str,
    ) -> Result<Duration, DecodeError> {
        let value = self.read_f32_be(range)?;
        self.whole_units(f64::from(value), field)
            .map(Duration::from_millis)
    }

    /// Read a float64 second count as a duration, truncated to whole seconds.
    pub fn read_secs_f64(
        &self,
        range: Range<usize>,
        field: &'static str,
    ) -> Result<Duration, DecodeError> {
        let value = self.read_f64_be(range)?;
        self.whole_units(value, field).map(Duration::from_secs)
    }

    fn read_array<const N: usize>(&self, range: Range<usize>) -> Result<[u8; N], DecodeError> {
        let bytes = self.read_slice(range.clone())?;
        bytes
            .try_into()
            .map_err(|_| self.too_short(range.start.saturating_add(N)))
    }

    fn whole_units(&self, value: f64, field: &'static str) -> Result<u64, DecodeError> {
        let whole = value.trunc();
        if !whole.is_finite() || whole < 0.0 || whole >= u64::MAX as f64 {
            return Err(DecodeError::InvalidField {
                kind: self.kind,
                field,
                reason: format!("{value} is not a representable duration"),
            });
        }
        Ok(whole as u64)
    }

    fn too_short(&self, needed: usize) -> DecodeError {
        DecodeError::Malformed {
            kind: self.kind,
            expected_min_len: needed,
            actual_len: self.payload.len(),
        }
    }
}
