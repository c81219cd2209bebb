use std::collections::BTreeMap;

use crate::protocols::tsip::{AllInView, DecodeError, Packet, PacketKind, SupplementalTiming};

use super::satellites::SatelliteTable;
use super::{
    DecodeErrorSummary, FixSummary, InputInfo, MAX_ERROR_EXAMPLES, PacketCount, StreamSummary,
    make_stub_summary,
};

#[derive(Debug, Default)]
struct ErrorStats {
    count: u64,
    examples: Vec<String>,
}

/// Folds decode results, in stream order, into a `StreamSummary`.
///
/// # Examples
/// ```
/// use tsip_core::{InputInfo, SummaryBuilder, decode_packet};
///
/// let mut builder = SummaryBuilder::new();
/// builder.observe(0x42, &decode_packet(0x42, &[0x00]));
/// let summary = builder.finish(InputInfo {
///     path: "-".to_string(),
///     bytes: 5,
/// });
/// assert_eq!(summary.frames_total, 1);
/// assert_eq!(summary.packets[0].kind, "unknown");
/// ```
#[derive(Debug, Default)]
pub struct SummaryBuilder {
    frames_total: u64,
    packets: BTreeMap<PacketKind, u64>,
    errors: BTreeMap<PacketKind, ErrorStats>,
    gps_time: Option<String>,
    utc_offset: Option<i16>,
    supplemental: Option<SupplementalTiming>,
    fix: Option<AllInView>,
    satellites: SatelliteTable,
}

impl SummaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one frame with id `id` and its decode result.
    pub fn observe(&mut self, id: u8, result: &Result<Packet, DecodeError>) {
        self.frames_total += 1;
        match result {
            Ok(packet) => self.observe_packet(packet),
            Err(err) => self.observe_error(id, err),
        }
    }

    fn observe_packet(&mut self, packet: &Packet) {
        *self.packets.entry(packet.kind()).or_default() += 1;
        match packet {
            Packet::AllInView(aiv) => self.fix = Some(aiv.clone()),
            Packet::SignalLevel(levels) => {
                for (&prn, &level) in levels {
                    self.satellites.record_signal(prn, level);
                }
            }
            Packet::RawMeasurement(raw) => self.satellites.record_signal(raw.prn, raw.signal_level),
            Packet::TrackingStatus(status) => self.satellites.record(
                status.prn,
                status.signal_level,
                status.elevation,
                status.azimuth,
            ),
            Packet::PrimaryTiming(timing) => {
                self.utc_offset = Some(timing.utc_offset);
                // A receiver without a fix may send calendar fields that do not form a date.
                if let Some(time) = timing.rfc3339() {
                    self.gps_time = Some(time);
                }
            }
            Packet::SupplementalTiming(timing) => self.supplemental = Some(timing.clone()),
            Packet::Unknown(_) => {}
        }
    }

    fn observe_error(&mut self, id: u8, err: &DecodeError) {
        let stats = self.errors.entry(err.kind()).or_default();
        stats.count += 1;
        if stats.examples.len() < MAX_ERROR_EXAMPLES {
            stats.examples.push(format!("id 0x{id:02x}: {err}"));
        }
    }

    pub fn frames_total(&self) -> u64 {
        self.frames_total
    }

    pub fn finish(self, input: InputInfo) -> StreamSummary {
        let mut summary = make_stub_summary(&input.path, input.bytes);
        summary.frames_total = self.frames_total;
        summary.packets = self
            .packets
            .into_iter()
            .map(|(kind, count)| PacketCount {
                kind: kind.key().to_string(),
                count,
            })
            .collect();
        summary.decode_errors = self
            .errors
            .into_iter()
            .map(|(kind, stats)| DecodeErrorSummary {
                kind: kind.key().to_string(),
                count: stats.count,
                examples: stats.examples,
            })
            .collect();

        if let Some(time) = &self.gps_time {
            summary.generated_at = time.clone();
        }
        summary.gps_time = self.gps_time;
        summary.utc_offset = self.utc_offset;

        if let Some(timing) = self.supplemental {
            summary.temperature = Some(timing.temperature);
            summary.self_survey_progress = Some(timing.self_survey_progress);
            summary.minor_alarms = timing
                .minor_alarms
                .iter_names()
                .map(|(name, _)| name.to_ascii_lowercase())
                .collect();
        }

        summary.fix = self.fix.map(|aiv| FixSummary {
            fix_type: aiv.status.code(),
            auto_fix: aiv.auto_fix,
            pdop: aiv.pdop,
            hdop: aiv.hdop,
            vdop: aiv.vdop,
            tdop: aiv.tdop,
            satellites: aiv.satellites,
        });
        summary.satellites = self.satellites.summaries();
        summary
    }
}
