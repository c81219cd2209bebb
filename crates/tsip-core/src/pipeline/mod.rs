//! Byte source -> framer -> decoder wiring.
//!
//! `run` drives everything on the calling thread. `spawn_pipeline` splits the
//! work into a producer thread (source reads and framing) and a consumer
//! thread (decoding) joined by unbounded channels. Both deliver decode
//! results in frame order.

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::framing::{Frame, Framer};
use crate::protocols::tsip::{DecodeError, Packet};
use crate::source::{ByteSource, SourceError};
use crate::summary::{InputInfo, StreamSummary, SummaryBuilder};

mod threaded;

pub use threaded::{Pipeline, spawn_pipeline};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    #[error("failed to start {thread} thread: {source}")]
    Spawn {
        thread: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} thread panicked")]
    Panicked(&'static str),
}

/// One extracted frame and the outcome of decoding it.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFrame {
    pub id: u8,
    pub body_len: usize,
    pub result: Result<Packet, DecodeError>,
}

impl DecodedFrame {
    pub fn decode(frame: &Frame) -> Self {
        Self {
            id: frame.id,
            body_len: frame.body.len(),
            result: frame.decode(),
        }
    }

    /// Serializable view for JSON-lines output.
    pub fn record(&self) -> PacketRecord<'_> {
        let (packet, error) = match &self.result {
            Ok(packet) => (Some(packet), None),
            Err(err) => (None, Some(err.to_string())),
        };
        PacketRecord {
            id: self.id,
            packet,
            error,
        }
    }
}

/// JSON shape of one decoded frame: the packet on success, the error text
/// otherwise.
///
/// # Examples
/// ```
/// use tsip_core::{DecodedFrame, Frame};
///
/// let decoded = DecodedFrame::decode(&Frame::new(0x42, vec![0x00]));
/// let json = serde_json::to_string(&decoded.record())?;
/// assert_eq!(json, r#"{"id":66,"packet":{"unknown":66}}"#);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Serialize)]
pub struct PacketRecord<'a> {
    pub id: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packet: Option<&'a Packet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Counters reported when a pipeline finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub bytes: u64,
    pub frames: u64,
}

/// Read `source` to its end, passing every decoded frame to `sink`.
pub fn run<S, F>(source: &mut S, framer: &mut Framer, mut sink: F) -> Result<PipelineStats, PipelineError>
where
    S: ByteSource + ?Sized,
    F: FnMut(DecodedFrame),
{
    let mut stats = PipelineStats::default();
    while let Some(chunk) = source.next_chunk()? {
        stats.bytes += chunk.len() as u64;
        for frame in framer.feed(&chunk) {
            stats.frames += 1;
            sink(DecodedFrame::decode(&frame));
        }
    }
    info!(bytes = stats.bytes, frames = stats.frames, "byte source exhausted");
    Ok(stats)
}

/// Decode `source` to its end and summarize it. `input_path` is recorded
/// as given.
///
/// # Examples
/// ```
/// use std::io::Cursor;
///
/// use tsip_core::{ReaderSource, summarize_source};
///
/// let bytes = vec![0x10, 0x42, 0x00, 0x10, 0x03];
/// let summary = summarize_source(ReaderSource::new(Cursor::new(bytes)), "-")?;
/// assert_eq!(summary.frames_total, 1);
/// assert_eq!(summary.input.bytes, 5);
/// # Ok::<(), tsip_core::PipelineError>(())
/// ```
pub fn summarize_source<S: ByteSource>(
    mut source: S,
    input_path: &str,
) -> Result<StreamSummary, PipelineError> {
    let mut framer = Framer::new();
    let mut builder = SummaryBuilder::new();
    let stats = run(&mut source, &mut framer, |decoded| {
        builder.observe(decoded.id, &decoded.result)
    })?;
    Ok(builder.finish(InputInfo {
        path: input_path.to_string(),
        bytes: stats.bytes,
    }))
}
