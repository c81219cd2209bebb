use tracing::debug;

use super::all_in_view::parse_all_in_view;
use super::error::DecodeError;
use super::layout;
use super::packet::Packet;
use super::raw_measurement::parse_raw_measurement;
use super::signal_level::parse_signal_levels;
use super::timing::parse_timing_superpacket;
use super::tracking_status::parse_tracking_status;

/// Decode one frame payload: the id byte and the unescaped body after it.
///
/// Unrecognized ids decode to `Packet::Unknown`. A body too short for its
/// layout, or a field that cannot be represented, is a `DecodeError` scoped
/// to this frame; decoding never panics.
///
/// # Examples
/// ```
/// use tsip_core::{Packet, decode_packet};
///
/// assert_eq!(decode_packet(0x42, &[0x00]), Ok(Packet::Unknown(0x42)));
/// assert!(decode_packet(0x6d, &[0x2d]).is_err());
/// ```
pub fn decode_packet(id: u8, body: &[u8]) -> Result<Packet, DecodeError> {
    let result = match id {
        layout::ID_ALL_IN_VIEW => parse_all_in_view(body).map(Packet::AllInView),
        layout::ID_SIGNAL_LEVEL => parse_signal_levels(body).map(Packet::SignalLevel),
        layout::ID_RAW_MEASUREMENT => parse_raw_measurement(body).map(Packet::RawMeasurement),
        layout::ID_TRACKING_STATUS => parse_tracking_status(body).map(Packet::TrackingStatus),
        layout::ID_TIMING_SUPERPACKET => parse_timing_superpacket(body),
        _ => Ok(Packet::Unknown(id)),
    };
    if let Err(err) = &result {
        debug!(id, len = body.len(), error = %err, "TSIP packet rejected");
    }
    result
}
