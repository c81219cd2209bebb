//! Trimble Standard Interface Protocol (TSIP) core library.
//!
//! This crate turns the raw byte stream of a Trimble Resolution-T timing
//! receiver into typed packets: byte sources feed the framer, which strips
//! the DLE/ETX framing and DLE stuffing, and the decoder maps each frame to a
//! packet record (layout/reader/parser per packet family). Results can be
//! consumed one by one or folded into a deterministic stream summary.
//! All I/O is isolated in `source`; framing and decoding are pure.
//!
//! Invariants:
//! - Framing output does not depend on how the stream is split into chunks.
//! - A frame that fails to decode never affects the frames around it.
//! - Summary output is deterministic and stable across runs.
//!
//! # Examples
//! ```
//! use tsip_core::{Framer, Packet};
//!
//! let mut framer = Framer::new();
//! let frames = framer.feed(&[0x10, 0x42, 0x00, 0x10, 0x03]);
//! assert_eq!(frames[0].decode(), Ok(Packet::Unknown(0x42)));
//! ```
//!
//! ```no_run
//! use std::path::Path;
//!
//! use tsip_core::{ReaderSource, summarize_source};
//!
//! let source = ReaderSource::open(Path::new("capture.tsip"))?;
//! let summary = summarize_source(source, "capture.tsip")?;
//! println!("frames: {}", summary.frames_total);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod framing;
mod pipeline;
pub mod protocols;
mod source;
mod summary;

pub use framing::{Frame, Framer};
pub use pipeline::{
    DecodedFrame, PacketRecord, Pipeline, PipelineError, PipelineStats, run, spawn_pipeline,
    summarize_source,
};
pub use protocols::tsip::{
    AllInView, DecodeError, FixType, MinorAlarms, Packet, PacketKind, PrimaryTiming,
    RawMeasurement, SignalLevel, SignalLevels, SupplementalTiming, TimingFlags, TrackingStatus,
    decode_packet,
};
pub use source::{ByteSource, CommandSource, ReaderSource, SerialConfig, SourceError, open_serial};
pub use summary::{
    DEFAULT_GENERATED_AT, DecodeErrorSummary, FixSummary, InputInfo, MAX_ERROR_EXAMPLES,
    PacketCount, SUMMARY_VERSION, SatelliteSummary, StreamSummary, SummaryBuilder, ToolInfo,
    make_stub_summary,
};
