use std::fmt;

use serde::Serialize;

use super::all_in_view::AllInView;
use super::raw_measurement::RawMeasurement;
use super::signal_level::SignalLevels;
use super::timing::{PrimaryTiming, SupplementalTiming};
use super::tracking_status::TrackingStatus;

/// One decoded TSIP packet. Exactly one variant is produced per frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Packet {
    AllInView(AllInView),
    SignalLevel(SignalLevels),
    RawMeasurement(RawMeasurement),
    PrimaryTiming(PrimaryTiming),
    SupplementalTiming(SupplementalTiming),
    TrackingStatus(TrackingStatus),
    /// Id with no decoder; not an error. Timing superpackets with an
    /// unrecognized sub-id report the superpacket id `0x8f`.
    Unknown(u8),
}

impl Packet {
    pub fn kind(&self) -> PacketKind {
        match self {
            Packet::AllInView(_) => PacketKind::AllInView,
            Packet::SignalLevel(_) => PacketKind::SignalLevel,
            Packet::RawMeasurement(_) => PacketKind::RawMeasurement,
            Packet::PrimaryTiming(_) => PacketKind::PrimaryTiming,
            Packet::SupplementalTiming(_) => PacketKind::SupplementalTiming,
            Packet::TrackingStatus(_) => PacketKind::TrackingStatus,
            Packet::Unknown(_) => PacketKind::Unknown,
        }
    }
}

/// Packet layout identifier, used for counting and error attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PacketKind {
    AllInView,
    SignalLevel,
    RawMeasurement,
    TrackingStatus,
    /// The `0x8f` container before its sub-id is known.
    TimingSuperpacket,
    PrimaryTiming,
    SupplementalTiming,
    Unknown,
}

impl PacketKind {
    /// Stable snake_case identifier, as used in JSON output.
    pub fn key(self) -> &'static str {
        match self {
            PacketKind::AllInView => "all_in_view",
            PacketKind::SignalLevel => "signal_level",
            PacketKind::RawMeasurement => "raw_measurement",
            PacketKind::TrackingStatus => "tracking_status",
            PacketKind::TimingSuperpacket => "timing_superpacket",
            PacketKind::PrimaryTiming => "primary_timing",
            PacketKind::SupplementalTiming => "supplemental_timing",
            PacketKind::Unknown => "unknown",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PacketKind::AllInView => "all-in-view satellite selection",
            PacketKind::SignalLevel => "signal level",
            PacketKind::RawMeasurement => "raw measurement",
            PacketKind::TrackingStatus => "satellite tracking status",
            PacketKind::TimingSuperpacket => "timing superpacket",
            PacketKind::PrimaryTiming => "primary timing",
            PacketKind::SupplementalTiming => "supplemental timing",
            PacketKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PacketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
