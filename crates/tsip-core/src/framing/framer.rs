use serde::Serialize;
use tracing::{trace, warn};

use super::layout;
use crate::protocols::tsip::{DecodeError, Packet, decode_packet};

/// One de-stuffed TSIP frame: the packet id and its unescaped body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub id: u8,
    pub body: Vec<u8>,
}

impl Frame {
    pub fn new(id: u8, body: Vec<u8>) -> Self {
        Self { id, body }
    }

    /// Id byte followed by the body, the shape the receiver logs use.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.body.len() + 1);
        bytes.push(self.id);
        bytes.extend_from_slice(&self.body);
        bytes
    }

    pub fn decode(&self) -> Result<Packet, DecodeError> {
        decode_packet(self.id, &self.body)
    }
}

#[derive(Debug, Default)]
struct FramerState {
    buffer: Vec<u8>,
    // The last buffered byte is the second half of a doubled DLE.
    escaped: bool,
}

impl FramerState {
    fn reset(&mut self) {
        self.buffer.clear();
        self.escaped = false;
    }

    fn ends_with_unescaped_dle(&self) -> bool {
        !self.escaped && self.buffer.last() == Some(&layout::DLE)
    }
}

/// Incremental TSIP de-stuffer.
///
/// # Examples
/// ```
/// use tsip_core::Framer;
///
/// let mut framer = Framer::new();
/// assert!(framer.feed(&[0x10, 0x42, 0x10, 0x10]).is_empty());
/// let frames = framer.feed(&[0x00, 0x10, 0x03]);
/// assert_eq!(frames.len(), 1);
/// assert_eq!(frames[0].id, 0x42);
/// assert_eq!(frames[0].body, vec![0x10, 0x00]);
/// ```
#[derive(Debug)]
pub struct Framer {
    state: FramerState,
    max_buffered: usize,
}

impl Framer {
    pub fn new() -> Self {
        Self::with_max_buffered(layout::DEFAULT_MAX_BUFFERED)
    }

    /// Build a framer that discards its partial frame once it holds
    /// `max_buffered` bytes without seeing a terminator.
    pub fn with_max_buffered(max_buffered: usize) -> Self {
        Self {
            state: FramerState::default(),
            max_buffered: max_buffered.max(layout::MIN_MAX_BUFFERED),
        }
    }

    /// Ingest a chunk and return every frame it completes, in stream order.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Frame> {
        let mut frames = Vec::new();
        for &byte in bytes {
            if let Some(frame) = self.push_byte(byte) {
                frames.push(frame);
            }
        }
        frames
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn buffered_len(&self) -> usize {
        self.state.buffer.len()
    }

    fn push_byte(&mut self, byte: u8) -> Option<Frame> {
        if self.state.ends_with_unescaped_dle() {
            match byte {
                layout::ETX => {
                    let frame = extract_frame(&self.state.buffer);
                    if frame.is_none() {
                        trace!(
                            buffered = self.state.buffer.len(),
                            "dropping terminated bytes without a frame start"
                        );
                    }
                    self.state.reset();
                    return frame;
                }
                layout::DLE => {
                    self.state.escaped = true;
                    return None;
                }
                _ => {}
            }
        }

        if self.state.buffer.len() >= self.max_buffered {
            warn!(
                buffered = self.state.buffer.len(),
                "discarding unterminated bytes over the framer limit"
            );
            self.state.buffer.clear();
        }
        self.state.buffer.push(byte);
        self.state.escaped = false;
        None
    }
}

impl Default for Framer {
    fn default() -> Self {
        Self::new()
    }
}

// `buffer` ends with the DLE preceding the ETX. The frame starts at the first
// DLE in the buffer; anything before it is line noise.
fn extract_frame(buffer: &[u8]) -> Option<Frame> {
    let end = buffer.len().checked_sub(1)?;
    let start = buffer.iter().position(|&b| b == layout::DLE)?;
    let payload = buffer.get(start + 1..end)?;
    let (&id, body) = payload.split_first()?;
    Some(Frame::new(id, body.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framing::layout::{DLE, ETX};

    #[test]
    fn empty_input_yields_nothing() {
        let mut framer = Framer::new();
        assert!(framer.feed(&[]).is_empty());
        assert_eq!(framer.buffered_len(), 0);
    }

    #[test]
    fn basic_frame() {
        let mut framer = Framer::new();
        let frames = framer.feed(&[DLE, 0x42, 0x00, DLE, ETX]);
        assert_eq!(frames, vec![Frame::new(0x42, vec![0x00])]);
        assert_eq!(framer.buffered_len(), 0);
    }

    #[test]
    fn escaped_dle_at_end_of_body() {
        let mut framer = Framer::new();
        let frames = framer.feed(&[DLE, 0x42, 0x00, DLE, DLE, DLE, ETX]);
        assert_eq!(frames, vec![Frame::new(0x42, vec![0x00, DLE])]);
    }

    #[test]
    fn escaped_dle_in_middle_of_body() {
        let mut framer = Framer::new();
        let frames = framer.feed(&[DLE, 0x42, DLE, DLE, 0x00, DLE, ETX]);
        assert_eq!(frames, vec![Frame::new(0x42, vec![DLE, 0x00])]);
    }

    #[test]
    fn escaped_dle_followed_by_escaped_etx_value() {
        let mut framer = Framer::new();
        // A literal DLE followed by a literal 0x03 must not terminate.
        let frames = framer.feed(&[DLE, 0x42, DLE, DLE, ETX, DLE, ETX]);
        assert_eq!(frames, vec![Frame::new(0x42, vec![DLE, ETX])]);
    }

    #[test]
    fn garbage_without_dle_is_buffered() {
        let mut framer = Framer::new();
        assert!(framer.feed(b"garbage").is_empty());
        assert_eq!(framer.buffered_len(), 7);
    }

    #[test]
    fn leading_text_is_skipped() {
        let mut framer = Framer::new();
        let frames = framer.feed(&[b'f', b'o', b'o', DLE, 0x42, 0x00, DLE, ETX]);
        assert_eq!(frames, vec![Frame::new(0x42, vec![0x00])]);
    }

    #[test]
    fn leading_text_with_incidental_dle_shifts_first_frame() {
        let mut framer = Framer::new();
        let frames = framer.feed(&[b'x', DLE, b'y', DLE, 0x42, 0x00, DLE, ETX]);
        assert_eq!(frames, vec![Frame::new(b'y', vec![DLE, 0x42, 0x00])]);

        let frames = framer.feed(&[DLE, 0x47, 0x00, DLE, ETX]);
        assert_eq!(frames, vec![Frame::new(0x47, vec![0x00])]);
    }

    #[test]
    fn terminator_without_id_is_dropped() {
        let mut framer = Framer::new();
        assert!(framer.feed(&[DLE, ETX]).is_empty());
        assert_eq!(framer.buffered_len(), 0);
        let frames = framer.feed(&[DLE, 0x42, DLE, ETX]);
        assert_eq!(frames, vec![Frame::new(0x42, Vec::new())]);
    }

    #[test]
    fn split_frame_across_chunks() {
        let mut framer = Framer::new();
        assert!(framer.feed(&[DLE, 0x42]).is_empty());
        assert!(framer.feed(&[0x01, DLE]).is_empty());
        assert!(framer.feed(&[DLE]).is_empty());
        assert!(framer.feed(&[0x02, DLE]).is_empty());
        let frames = framer.feed(&[ETX]);
        assert_eq!(frames, vec![Frame::new(0x42, vec![0x01, DLE, 0x02])]);
    }

    #[test]
    fn multiple_frames_in_one_chunk() {
        let mut framer = Framer::new();
        let frames = framer.feed(&[DLE, 0x01, 0xaa, DLE, ETX, DLE, 0x02, 0xbb, DLE, ETX]);
        assert_eq!(
            frames,
            vec![Frame::new(0x01, vec![0xaa]), Frame::new(0x02, vec![0xbb])]
        );
    }

    #[test]
    fn overflow_discards_partial_frame() {
        let mut framer = Framer::with_max_buffered(8);
        assert!(framer.feed(&[DLE, 0x42, 1, 2, 3, 4, 5, 6]).is_empty());
        assert_eq!(framer.buffered_len(), 8);
        assert!(framer.feed(&[7]).is_empty());
        assert_eq!(framer.buffered_len(), 1);

        // The truncated frame has no start marker left and is dropped.
        assert!(framer.feed(&[DLE, ETX]).is_empty());
        let frames = framer.feed(&[DLE, 0x47, 0x00, DLE, ETX]);
        assert_eq!(frames, vec![Frame::new(0x47, vec![0x00])]);
    }

    #[test]
    fn reset_drops_partial_state() {
        let mut framer = Framer::new();
        framer.feed(&[DLE, 0x42, DLE, DLE]);
        framer.reset();
        assert_eq!(framer.buffered_len(), 0);
        let frames = framer.feed(&[DLE, 0x43, DLE, ETX]);
        assert_eq!(frames, vec![Frame::new(0x43, Vec::new())]);
    }

    #[test]
    fn frame_to_bytes_prefixes_id() {
        let frame = Frame::new(0x8f, vec![0xab, 0x01]);
        assert_eq!(frame.to_bytes(), vec![0x8f, 0xab, 0x01]);
    }
}
