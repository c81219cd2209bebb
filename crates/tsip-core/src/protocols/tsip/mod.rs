//! TSIP packet decoding for the Trimble Resolution-T.
//!
//! `decode_packet` maps a frame's id byte to one of the fixed layouts in
//! `layout` and returns a typed `Packet`. Multi-byte integers are big-endian
//! and floats are the IEEE-754 bit patterns of big-endian words. Durations
//! sent as float milliseconds or seconds are truncated to whole units.
//!
//! Bodies longer than a layout's minimum are accepted and the trailing bytes
//! ignored; shorter bodies are `DecodeError::Malformed`. Ids without a
//! decoder are `Packet::Unknown`, never an error.

pub mod all_in_view;
pub mod error;
pub mod layout;
pub mod packet;
pub mod parser;
pub mod raw_measurement;
pub mod reader;
pub mod signal_level;
pub mod timing;
pub mod tracking_status;

pub use all_in_view::{AllInView, FixType};
pub use error::DecodeError;
pub use packet::{Packet, PacketKind};
pub use parser::decode_packet;
pub use raw_measurement::RawMeasurement;
pub use signal_level::{SignalLevel, SignalLevels};
pub use timing::{MinorAlarms, PrimaryTiming, SupplementalTiming, TimingFlags};
pub use tracking_status::TrackingStatus;
