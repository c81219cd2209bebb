use bitflags::bitflags;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};
use tracing::trace;

use super::error::DecodeError;
use super::layout;
use super::packet::{Packet, PacketKind};
use super::reader::TsipReader;

bitflags! {
    /// Timing flags of the primary timing packet.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub struct TimingFlags: u8 {
        /// Time fields are UTC rather than GPS time.
        const UTC_TIME = 1 << 0;
        /// PPS is aligned to UTC rather than GPS.
        const UTC_PPS = 1 << 1;
        /// Time has not been set yet.
        const TIME_NOT_SET = 1 << 2;
        /// No UTC parameters received yet.
        const NO_UTC_INFO = 1 << 3;
        /// Time was entered by the user rather than derived from GPS.
        const USER_TIME = 1 << 4;
    }
}

bitflags! {
    /// Minor alarm bits of the supplemental timing packet.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub struct MinorAlarms: u16 {
        const ANTENNA_OPEN = 1 << 1;
        const ANTENNA_SHORTED = 1 << 2;
        const NOT_TRACKING = 1 << 3;
        const SURVEY_IN_PROGRESS = 1 << 5;
        const NO_STORED_POSITION = 1 << 6;
        const LEAP_SECOND_PENDING = 1 << 7;
        const TEST_MODE = 1 << 8;
        const POSITION_QUESTIONABLE = 1 << 9;
        const ALMANAC_INCOMPLETE = 1 << 11;
        const PPS_NOT_GENERATED = 1 << 12;
    }
}

/// Primary timing packet (0x8F-AB), sent once per second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimaryTiming {
    pub time_of_week: u32,
    pub week_number: u16,
    /// GPS-UTC offset in seconds.
    pub utc_offset: i16,
    pub flags: TimingFlags,
    pub seconds: u8,
    pub minutes: u8,
    pub hours: u8,
    pub day_of_month: u8,
    pub month: u8,
    pub year: u16,
}

impl PrimaryTiming {
    /// Calendar fields as a timestamp. The timescale (UTC or GPS) follows
    /// `TimingFlags::UTC_TIME`; the offset is always reported as `+00:00`.
    pub fn datetime(&self) -> Result<OffsetDateTime, time::error::ComponentRange> {
        let month = Month::try_from(self.month)?;
        let date = Date::from_calendar_date(i32::from(self.year), month, self.day_of_month)?;
        let time = Time::from_hms(self.hours, self.minutes, self.seconds)?;
        Ok(PrimitiveDateTime::new(date, time).assume_utc())
    }

    pub fn rfc3339(&self) -> Option<String> {
        self.datetime().ok().and_then(|dt| dt.format(&Rfc3339).ok())
    }
}

/// Supplemental timing packet (0x8F-AC), sent once per second.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplementalTiming {
    pub receiver_mode: u8,
    /// Self-survey progress in percent.
    pub self_survey_progress: u8,
    pub minor_alarms: MinorAlarms,
    pub decoding_status: u8,
    /// Local clock bias in ns.
    pub clock_bias: f32,
    /// Local clock bias rate in ppb.
    pub clock_bias_rate: f32,
    /// Receiver temperature in degrees Celsius.
    pub temperature: f32,
    /// Radians.
    pub latitude: f64,
    /// Radians.
    pub longitude: f64,
    /// Meters.
    pub altitude: f64,
    /// PPS quantization error in ns.
    pub quantization_error: f32,
}

/// Decode a 0x8F body by its sub-id.
pub fn parse_timing_superpacket(body: &[u8]) -> Result<Packet, DecodeError> {
    let reader = TsipReader::new(PacketKind::TimingSuperpacket, body);
    reader.require_len(layout::SUPERPACKET_MIN_LEN)?;

    match reader.read_u8(layout::SUPERPACKET_SUB_ID_OFFSET)? {
        layout::SUB_ID_PRIMARY_TIMING => parse_primary_timing(body).map(Packet::PrimaryTiming),
        layout::SUB_ID_SUPPLEMENTAL_TIMING => {
            parse_supplemental_timing(body).map(Packet::SupplementalTiming)
        }
        sub_id => {
            trace!(sub_id, "no decoder for timing superpacket sub-id");
            Ok(Packet::Unknown(layout::ID_TIMING_SUPERPACKET))
        }
    }
}

/// `body` starts with the 0xAB sub-id.
pub fn parse_primary_timing(body: &[u8]) -> Result<PrimaryTiming, DecodeError> {
    let reader = TsipReader::new(PacketKind::PrimaryTiming, body);
    reader.require_len(layout::PRIMARY_MIN_LEN)?;

    Ok(PrimaryTiming {
        time_of_week: reader.read_u32_be(layout::PRIMARY_TIME_OF_WEEK_RANGE)?,
        week_number: reader.read_u16_be(layout::PRIMARY_WEEK_RANGE)?,
        utc_offset: reader.read_i16_be(layout::PRIMARY_UTC_OFFSET_RANGE)?,
        flags: TimingFlags::from_bits_retain(reader.read_u8(layout::PRIMARY_FLAGS_OFFSET)?),
        seconds: reader.read_u8(layout::PRIMARY_SECONDS_OFFSET)?,
        minutes: reader.read_u8(layout::PRIMARY_MINUTES_OFFSET)?,
        hours: reader.read_u8(layout::PRIMARY_HOURS_OFFSET)?,
        day_of_month: reader.read_u8(layout::PRIMARY_DAY_OFFSET)?,
        month: reader.read_u8(layout::PRIMARY_MONTH_OFFSET)?,
        year: reader.read_u16_be(layout::PRIMARY_YEAR_RANGE)?,
    })
}

/// `body` starts with the 0xAC sub-id.
pub fn parse_supplemental_timing(body: &[u8]) -> Result<SupplementalTiming, DecodeError> {
    let reader = TsipReader::new(PacketKind::SupplementalTiming, body);
    reader.require_len(layout::SUPPLEMENTAL_MIN_LEN)?;

    Ok(SupplementalTiming {
        receiver_mode: reader.read_u8(layout::SUPPLEMENTAL_RECEIVER_MODE_OFFSET)?,
        self_survey_progress: reader.read_u8(layout::SUPPLEMENTAL_SURVEY_PROGRESS_OFFSET)?,
        minor_alarms: MinorAlarms::from_bits_retain(
            reader.read_u16_be(layout::SUPPLEMENTAL_MINOR_ALARMS_RANGE)?,
        ),
        decoding_status: reader.read_u8(layout::SUPPLEMENTAL_DECODING_STATUS_OFFSET)?,
        clock_bias: reader.read_f32_be(layout::SUPPLEMENTAL_CLOCK_BIAS_RANGE)?,
        clock_bias_rate: reader.read_f32_be(layout::SUPPLEMENTAL_CLOCK_BIAS_RATE_RANGE)?,
        temperature: reader.read_f32_be(layout::SUPPLEMENTAL_TEMPERATURE_RANGE)?,
        latitude: reader.read_f64_be(layout::SUPPLEMENTAL_LATITUDE_RANGE)?,
        longitude: reader.read_f64_be(layout::SUPPLEMENTAL_LONGITUDE_RANGE)?,
        altitude: reader.read_f64_be(layout::SUPPLEMENTAL_ALTITUDE_RANGE)?,
        quantization_error: reader.read_f32_be(layout::SUPPLEMENTAL_QUANTIZATION_ERROR_RANGE)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIMARY: [u8; 17] = [
        0xab, 0x00, 0x03, 0xed, 0x53, 0x07, 0xca, 0x00, 0x12, 0x03, 0x05, 0x1d, 0x17, 0x1b, 0x03,
        0x07, 0xe2,
    ];

    fn supplemental() -> Vec<u8> {
        let mut body = vec![0u8; layout::SUPPLEMENTAL_MIN_LEN];
        body[0] = layout::SUB_ID_SUPPLEMENTAL_TIMING;
        body[layout::SUPPLEMENTAL_RECEIVER_MODE_OFFSET] = 7;
        body[layout::SUPPLEMENTAL_SURVEY_PROGRESS_OFFSET] = 42;
        body[layout::SUPPLEMENTAL_MINOR_ALARMS_RANGE]
            .copy_from_slice(&0b0000_0000_0010_0010u16.to_be_bytes());
        body[layout::SUPPLEMENTAL_DECODING_STATUS_OFFSET] = 8;
        body[layout::SUPPLEMENTAL_CLOCK_BIAS_RANGE].copy_from_slice(&91_126.29f32.to_be_bytes());
        body[layout::SUPPLEMENTAL_CLOCK_BIAS_RATE_RANGE]
            .copy_from_slice(&1_268.693_5f32.to_be_bytes());
        body[layout::SUPPLEMENTAL_TEMPERATURE_RANGE].copy_from_slice(&34.932_25f32.to_be_bytes());
        body[layout::SUPPLEMENTAL_LATITUDE_RANGE].copy_from_slice(&0.7f64.to_be_bytes());
        body[layout::SUPPLEMENTAL_LONGITUDE_RANGE].copy_from_slice(&(-1.3f64).to_be_bytes());
        body[layout::SUPPLEMENTAL_ALTITUDE_RANGE].copy_from_slice(&25.5f64.to_be_bytes());
        body[layout::SUPPLEMENTAL_QUANTIZATION_ERROR_RANGE]
            .copy_from_slice(&17.161_757f32.to_be_bytes());
        body
    }

    #[test]
    fn parse_valid_primary_timing() {
        let parsed = parse_primary_timing(&PRIMARY).unwrap();
        assert_eq!(
            parsed,
            PrimaryTiming {
                time_of_week: 257_363,
                week_number: 1994,
                utc_offset: 18,
                flags: TimingFlags::UTC_TIME | TimingFlags::UTC_PPS,
                seconds: 5,
                minutes: 29,
                hours: 23,
                day_of_month: 27,
                month: 3,
                year: 2018,
            }
        );
        assert_eq!(parsed.rfc3339().as_deref(), Some("2018-03-27T23:29:05Z"));
    }

    #[test]
    fn unknown_timing_flag_bits_are_kept() {
        let mut body = PRIMARY;
        body[layout::PRIMARY_FLAGS_OFFSET] = 0x84;
        let parsed = parse_primary_timing(&body).unwrap();
        assert!(parsed.flags.contains(TimingFlags::TIME_NOT_SET));
        assert_eq!(parsed.flags.bits(), 0x84);
    }

    #[test]
    fn invalid_calendar_fields_have_no_timestamp() {
        let mut body = PRIMARY;
        body[layout::PRIMARY_MONTH_OFFSET] = 13;
        let parsed = parse_primary_timing(&body).unwrap();
        assert!(parsed.datetime().is_err());
        assert_eq!(parsed.rfc3339(), None);
    }

    #[test]
    fn parse_valid_supplemental_timing() {
        let parsed = parse_supplemental_timing(&supplemental()).unwrap();
        assert_eq!(parsed.receiver_mode, 7);
        assert_eq!(parsed.self_survey_progress, 42);
        assert_eq!(
            parsed.minor_alarms,
            MinorAlarms::ANTENNA_OPEN | MinorAlarms::SURVEY_IN_PROGRESS
        );
        assert_eq!(parsed.decoding_status, 8);
        assert_eq!(parsed.clock_bias, 91_126.29);
        assert_eq!(parsed.clock_bias_rate, 1_268.693_5);
        assert_eq!(parsed.temperature, 34.932_25);
        assert_eq!(parsed.latitude, 0.7);
        assert_eq!(parsed.longitude, -1.3);
        assert_eq!(parsed.altitude, 25.5);
        assert_eq!(parsed.quantization_error, 17.161_757);
    }

    #[test]
    fn superpacket_dispatches_on_sub_id() {
        assert!(matches!(
            parse_timing_superpacket(&PRIMARY),
            Ok(Packet::PrimaryTiming(_))
        ));
        assert!(matches!(
            parse_timing_superpacket(&supplemental()),
            Ok(Packet::SupplementalTiming(_))
        ));
        assert_eq!(
            parse_timing_superpacket(&[0x20, 0x01]),
            Ok(Packet::Unknown(layout::ID_TIMING_SUPERPACKET))
        );
    }

    #[test]
    fn superpacket_without_sub_id_is_malformed() {
        let err = parse_timing_superpacket(&[]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Malformed {
                kind: PacketKind::TimingSuperpacket,
                expected_min_len: 1,
                actual_len: 0,
            }
        );
    }

    #[test]
    fn parse_short_payloads() {
        let err = parse_timing_superpacket(&PRIMARY[..16]).unwrap_err();
        assert_eq!(err.kind(), PacketKind::PrimaryTiming);

        let body = supplemental();
        let err = parse_timing_superpacket(&body[..67]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Malformed {
                kind: PacketKind::SupplementalTiming,
                expected_min_len: 68,
                actual_len: 67,
            }
        );
    }
}
