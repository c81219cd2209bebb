use std::time::Duration;

use serde::Serialize;

use super::error::DecodeError;
use super::layout;
use super::packet::PacketKind;
use super::reader::TsipReader;
use super::signal_level::SignalLevel;

/// Raw measurement data for one satellite (0x5A).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawMeasurement {
    pub prn: u8,
    /// Integration time, sent as float milliseconds.
    pub sample_length: Duration,
    pub signal_level: SignalLevel,
    /// Code phase in 1/16 chip units.
    pub code_phase: f32,
    /// Doppler at L1 in Hz.
    pub doppler: f32,
    /// GPS time of week of the measurement, sent as float seconds.
    pub time_of_measurement: Duration,
}

pub fn parse_raw_measurement(body: &[u8]) -> Result<RawMeasurement, DecodeError> {
    let reader = TsipReader::new(PacketKind::RawMeasurement, body);
    reader.require_len(layout::RAW_MIN_LEN)?;

    Ok(RawMeasurement {
        prn: reader.read_u8(layout::RAW_PRN_OFFSET)?,
        sample_length: reader.read_millis_f32(layout::RAW_SAMPLE_LENGTH_RANGE, "sample length")?,
        signal_level: SignalLevel(reader.read_f32_be(layout::RAW_SIGNAL_LEVEL_RANGE)?),
        code_phase: reader.read_f32_be(layout::RAW_CODE_PHASE_RANGE)?,
        doppler: reader.read_f32_be(layout::RAW_DOPPLER_RANGE)?,
        time_of_measurement: reader.read_secs_f64(layout::RAW_TIME_RANGE, "time of measurement")?,
    })
}
