//! Deterministic aggregate over a decoded TSIP stream.
//!
//! The summary is what a status dashboard shows for a receiver: how many
//! packets of each kind arrived, which frames failed to decode, the latest
//! GPS time and receiver health, the current fix and a per-satellite table.
//! Every collection is emitted in a stable order so two runs over the same
//! bytes serialize identically.

use serde::{Deserialize, Serialize};

mod builder;
mod satellites;

pub use builder::SummaryBuilder;

/// Current summary schema version.
pub const SUMMARY_VERSION: u32 = 1;
/// Used as `generated_at` when the stream carried no valid GPS time.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";
/// Examples kept per decode error kind.
pub const MAX_ERROR_EXAMPLES: usize = 3;

/// Aggregated stream summary with deterministic ordering.
///
/// # Examples
/// ```
/// use tsip_core::make_stub_summary;
///
/// let summary = make_stub_summary("capture.tsip", 123);
/// assert_eq!(summary.summary_version, tsip_core::SUMMARY_VERSION);
/// assert!(summary.satellites.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamSummary {
    /// Summary schema version (not the binary version).
    pub summary_version: u32,
    pub tool: ToolInfo,
    /// Latest valid GPS time in the stream, else the Unix epoch.
    pub generated_at: String,
    pub input: InputInfo,
    /// Frames extracted by the framer, decodable or not.
    pub frames_total: u64,
    /// Successfully decoded packets per kind, ordered by kind.
    pub packets: Vec<PacketCount>,
    /// Decode failures per kind, ordered by kind.
    pub decode_errors: Vec<DecodeErrorSummary>,
    /// RFC3339 timestamp of the latest primary timing packet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps_time: Option<String>,
    /// GPS-UTC offset in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<i16>,
    /// Receiver temperature in degrees Celsius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Self-survey progress in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_survey_progress: Option<u8>,
    /// Active minor alarms of the latest supplemental timing packet.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub minor_alarms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fix: Option<FixSummary>,
    /// Satellites seen in the stream, ordered by PRN.
    pub satellites: Vec<SatelliteSummary>,
}

/// Tool metadata embedded in summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Input metadata embedded in summaries.
///
/// # Examples
/// ```
/// use tsip_core::InputInfo;
///
/// let input = InputInfo {
///     path: "/dev/ttyUSB0".to_string(),
///     bytes: 1024,
/// };
/// assert_eq!(input.bytes, 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided by the caller (`-` for standard input).
    pub path: String,
    /// Bytes read from the input.
    pub bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketCount {
    /// Packet kind key, e.g. `primary_timing`.
    pub kind: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeErrorSummary {
    /// Packet kind key of the failing layout.
    pub kind: String,
    pub count: u64,
    /// The first few failures, formatted as `id 0x.. (N bytes): message`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

/// Latest all-in-view selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixSummary {
    /// Fix type code, e.g. `5` for an overdetermined clock fix.
    pub fix_type: u8,
    pub auto_fix: bool,
    pub pdop: f32,
    pub hdop: f32,
    pub vdop: f32,
    pub tdop: f32,
    pub satellites: Vec<i8>,
}

/// Last known state of one satellite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteSummary {
    pub prn: u8,
    /// Signal level magnitude; zero until a non-zero level is seen.
    pub level: f32,
    pub locked: bool,
    /// Radians; absent until the receiver reports a position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f32>,
    /// Radians; absent until the receiver reports a position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azimuth: Option<f32>,
}

/// Build a summary with base fields filled and empty aggregates.
pub fn make_stub_summary(input_path: &str, input_bytes: u64) -> StreamSummary {
    StreamSummary {
        summary_version: SUMMARY_VERSION,
        tool: ToolInfo {
            name: "tsip".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        frames_total: 0,
        packets: vec![],
        decode_errors: vec![],
        gps_time: None,
        utc_offset: None,
        temperature: None,
        self_survey_progress: None,
        minor_alarms: vec![],
        fix: None,
        satellites: vec![],
    }
}
