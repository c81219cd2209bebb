use std::ops::Range;

pub const ID_SIGNAL_LEVEL: u8 = 0x47;
pub const ID_RAW_MEASUREMENT: u8 = 0x5a;
pub const ID_TRACKING_STATUS: u8 = 0x5c;
pub const ID_ALL_IN_VIEW: u8 = 0x6d;
pub const ID_TIMING_SUPERPACKET: u8 = 0x8f;

pub const SUB_ID_PRIMARY_TIMING: u8 = 0xab;
pub const SUB_ID_SUPPLEMENTAL_TIMING: u8 = 0xac;

// 0x6D all-in-view satellite selection
pub const AIV_STATUS_OFFSET: usize = 0;
pub const AIV_PDOP_RANGE: Range<usize> = 1..5;
pub const AIV_HDOP_RANGE: Range<usize> = 5..9;
pub const AIV_VDOP_RANGE: Range<usize> = 9..13;
pub const AIV_TDOP_RANGE: Range<usize> = 13..17;
pub const AIV_PRN_OFFSET: usize = 17;
pub const AIV_MIN_LEN: usize = AIV_PRN_OFFSET;
pub const AIV_FIX_MASK: u8 = 0x07;
pub const AIV_AUTO_FIX_MASK: u8 = 0x08;
pub const AIV_SATELLITE_COUNT_SHIFT: u32 = 4;

// 0x47 signal levels
pub const SIGNAL_COUNT_OFFSET: usize = 0;
pub const SIGNAL_ENTRIES_OFFSET: usize = 1;
pub const SIGNAL_ENTRY_LEN: usize = 5;
pub const SIGNAL_ENTRY_LEVEL_OFFSET: usize = 1;
pub const SIGNAL_MIN_LEN: usize = SIGNAL_ENTRIES_OFFSET;

// 0x5A raw measurement data
pub const RAW_PRN_OFFSET: usize = 0;
pub const RAW_SAMPLE_LENGTH_RANGE: Range<usize> = 1..5;
pub const RAW_SIGNAL_LEVEL_RANGE: Range<usize> = 5..9;
pub const RAW_CODE_PHASE_RANGE: Range<usize> = 9..13;
pub const RAW_DOPPLER_RANGE: Range<usize> = 13..17;
pub const RAW_TIME_RANGE: Range<usize> = 17..25;
pub const RAW_MIN_LEN: usize = 25;

// 0x5C satellite tracking status
pub const TRACK_PRN_OFFSET: usize = 0;
pub const TRACK_SLOT_CHANNEL_OFFSET: usize = 1;
pub const TRACK_CHANNEL_SHIFT: u32 = 3;
pub const TRACK_ACQUISITION_OFFSET: usize = 2;
pub const TRACK_EPHEMERIS_OFFSET: usize = 3;
pub const TRACK_SIGNAL_LEVEL_RANGE: Range<usize> = 4..8;
pub const TRACK_LAST_MEASUREMENT_RANGE: Range<usize> = 8..12;
pub const TRACK_ELEVATION_RANGE: Range<usize> = 12..16;
pub const TRACK_AZIMUTH_RANGE: Range<usize> = 16..20;
pub const TRACK_OLD_MEASUREMENT_OFFSET: usize = 20;
pub const TRACK_BAD_DATA_OFFSET: usize = 21;
pub const TRACK_DATA_COLLECTION_OFFSET: usize = 22;
pub const TRACK_FLAG_MASK: u8 = 0x01;
pub const TRACK_MIN_LEN: usize = 24;

// 0x8F timing superpacket
pub const SUPERPACKET_SUB_ID_OFFSET: usize = 0;
pub const SUPERPACKET_MIN_LEN: usize = 1;

// 0x8F-AB primary timing, offsets include the sub-id byte
pub const PRIMARY_TIME_OF_WEEK_RANGE: Range<usize> = 1..5;
pub const PRIMARY_WEEK_RANGE: Range<usize> = 5..7;
pub const PRIMARY_UTC_OFFSET_RANGE: Range<usize> = 7..9;
pub const PRIMARY_FLAGS_OFFSET: usize = 9;
pub const PRIMARY_SECONDS_OFFSET: usize = 10;
pub const PRIMARY_MINUTES_OFFSET: usize = 11;
pub const PRIMARY_HOURS_OFFSET: usize = 12;
pub const PRIMARY_DAY_OFFSET: usize = 13;
pub const PRIMARY_MONTH_OFFSET: usize = 14;
pub const PRIMARY_YEAR_RANGE: Range<usize> = 15..17;
pub const PRIMARY_MIN_LEN: usize = 17;

// 0x8F-AC supplemental timing, offsets include the sub-id byte
pub const SUPPLEMENTAL_RECEIVER_MODE_OFFSET: usize = 1;
pub const SUPPLEMENTAL_SURVEY_PROGRESS_OFFSET: usize = 3;
pub const SUPPLEMENTAL_MINOR_ALARMS_RANGE: Range<usize> = 10..12;
pub const SUPPLEMENTAL_DECODING_STATUS_OFFSET: usize = 12;
pub const SUPPLEMENTAL_CLOCK_BIAS_RANGE: Range<usize> = 16..20;
pub const SUPPLEMENTAL_CLOCK_BIAS_RATE_RANGE: Range<usize> = 20..24;
pub const SUPPLEMENTAL_TEMPERATURE_RANGE: Range<usize> = 32..36;
pub const SUPPLEMENTAL_LATITUDE_RANGE: Range<usize> = 36..44;
pub const SUPPLEMENTAL_LONGITUDE_RANGE: Range<usize> = 44..52;
pub const SUPPLEMENTAL_ALTITUDE_RANGE: Range<usize> = 52..60;
pub const SUPPLEMENTAL_QUANTIZATION_ERROR_RANGE: Range<usize> = 60..64;
pub const SUPPLEMENTAL_MIN_LEN: usize = 68;
