use serde::Serialize;

use super::error::DecodeError;
use super::layout;
use super::packet::PacketKind;
use super::reader::TsipReader;
use super::signal_level::SignalLevel;

/// Satellite tracking status (0x5C).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingStatus {
    pub prn: u8,
    pub channel: u8,
    pub acquisition_flag: u8,
    pub ephemeris_flag: u8,
    pub signal_level: SignalLevel,
    /// GPS time of week of the last measurement, in seconds.
    pub last_measurement: f32,
    /// Radians.
    pub elevation: f32,
    /// Radians.
    pub azimuth: f32,
    pub old_measurement: bool,
    pub bad_data: bool,
    pub data_collection: bool,
}

pub fn parse_tracking_status(body: &[u8]) -> Result<TrackingStatus, DecodeError> {
    let reader = TsipReader::new(PacketKind::TrackingStatus, body);
    reader.require_len(layout::TRACK_MIN_LEN)?;

    let flag = |offset| {
        reader
            .read_u8(offset)
            .map(|value| value & layout::TRACK_FLAG_MASK != 0)
    };

    Ok(TrackingStatus {
        prn: reader.read_u8(layout::TRACK_PRN_OFFSET)?,
        channel: reader.read_u8(layout::TRACK_SLOT_CHANNEL_OFFSET)? >> layout::TRACK_CHANNEL_SHIFT,
        acquisition_flag: reader.read_u8(layout::TRACK_ACQUISITION_OFFSET)?,
        ephemeris_flag: reader.read_u8(layout::TRACK_EPHEMERIS_OFFSET)?,
        signal_level: SignalLevel(reader.read_f32_be(layout::TRACK_SIGNAL_LEVEL_RANGE)?),
        last_measurement: reader.read_f32_be(layout::TRACK_LAST_MEASUREMENT_RANGE)?,
        elevation: reader.read_f32_be(layout::TRACK_ELEVATION_RANGE)?,
        azimuth: reader.read_f32_be(layout::TRACK_AZIMUTH_RANGE)?,
        old_measurement: flag(layout::TRACK_OLD_MEASUREMENT_OFFSET)?,
        bad_data: flag(layout::TRACK_BAD_DATA_OFFSET)?,
        data_collection: flag(layout::TRACK_DATA_COLLECTION_OFFSET)?,
    })
}
