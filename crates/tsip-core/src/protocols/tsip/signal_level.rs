use std::collections::BTreeMap;

use serde::Serialize;

use super::error::DecodeError;
use super::layout;
use super::packet::PacketKind;
use super::reader::TsipReader;

/// Satellite signal strength in the receiver's configured unit (AMU or dB-Hz).
///
/// Sign encodes lock state: positive is locked, negative is acquired but not
/// locked, zero is not acquired.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct SignalLevel(pub f32);

impl SignalLevel {
    pub fn value(self) -> f32 {
        self.0
    }

    /// Magnitude regardless of lock state.
    pub fn level(self) -> f32 {
        self.0.abs()
    }

    pub fn locked(self) -> bool {
        self.0 > 0.0
    }

    pub fn acquired(self) -> bool {
        self.0 != 0.0
    }
}

/// Signal level per PRN, ordered by PRN.
pub type SignalLevels = BTreeMap<u8, SignalLevel>;

/// Signal levels for all tracked satellites (0x47).
pub fn parse_signal_levels(body: &[u8]) -> Result<SignalLevels, DecodeError> {
    let reader = TsipReader::new(PacketKind::SignalLevel, body);
    reader.require_len(layout::SIGNAL_MIN_LEN)?;

    let count = usize::from(reader.read_u8(layout::SIGNAL_COUNT_OFFSET)?);
    reader.require_len(layout::SIGNAL_ENTRIES_OFFSET + count * layout::SIGNAL_ENTRY_LEN)?;

    let mut levels = SignalLevels::new();
    for index in 0..count {
        let entry = layout::SIGNAL_ENTRIES_OFFSET + index * layout::SIGNAL_ENTRY_LEN;
        let level_start = entry + layout::SIGNAL_ENTRY_LEVEL_OFFSET;
        let prn = reader.read_u8(entry)?;
        let level = reader.read_f32_be(level_start..level_start + 4)?;
        levels.insert(prn, SignalLevel(level));
    }
    Ok(levels)
}
