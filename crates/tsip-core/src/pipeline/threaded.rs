use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use tracing::{debug, info};

use super::{DecodedFrame, PipelineError, PipelineStats};
use crate::framing::{Frame, Framer};
use crate::source::{ByteSource, SourceError};

/// Running two-thread pipeline. Decoded frames arrive on `recv`/`iter` in
/// stream order; the channels are unbounded, so a slow caller only grows
/// memory.
pub struct Pipeline {
    decoded: Receiver<DecodedFrame>,
    producer: JoinHandle<Result<PipelineStats, SourceError>>,
    consumer: JoinHandle<()>,
}

/// Start the producer (reads `source`, feeds `framer`) and the consumer
/// (decodes frames).
///
/// The producer stops at end of stream, on a source error, or once the
/// consumer side has been dropped.
pub fn spawn_pipeline<S>(mut source: S, mut framer: Framer) -> Result<Pipeline, PipelineError>
where
    S: ByteSource + Send + 'static,
{
    let (frame_tx, frame_rx) = mpsc::channel::<Frame>();
    let (decoded_tx, decoded_rx) = mpsc::channel();

    let consumer = thread::Builder::new()
        .name("tsip-decoder".to_string())
        .spawn(move || {
            for frame in frame_rx {
                if decoded_tx.send(DecodedFrame::decode(&frame)).is_err() {
                    debug!("decoded frame receiver dropped");
                    break;
                }
            }
        })
        .map_err(|source| PipelineError::Spawn {
            thread: "decoder",
            source,
        })?;

    let producer = thread::Builder::new()
        .name("tsip-reader".to_string())
        .spawn(move || -> Result<PipelineStats, SourceError> {
            let mut stats = PipelineStats::default();
            while let Some(chunk) = source.next_chunk()? {
                stats.bytes += chunk.len() as u64;
                for frame in framer.feed(&chunk) {
                    stats.frames += 1;
                    if frame_tx.send(frame).is_err() {
                        debug!("decoder thread gone, stopping reader");
                        return Ok(stats);
                    }
                }
            }
            info!(bytes = stats.bytes, frames = stats.frames, "byte source exhausted");
            Ok(stats)
        })
        .map_err(|source| PipelineError::Spawn {
            thread: "reader",
            source,
        })?;

    Ok(Pipeline {
        decoded: decoded_rx,
        producer,
        consumer,
    })
}

impl Pipeline {
    /// Next decoded frame, or `None` once both threads have finished.
    pub fn recv(&self) -> Option<DecodedFrame> {
        self.decoded.recv().ok()
    }

    pub fn iter(&self) -> mpsc::Iter<'_, DecodedFrame> {
        self.decoded.iter()
    }

    /// Wait for the source to run dry and both threads to finish. Frames not
    /// yet received are discarded.
    pub fn join(self) -> Result<PipelineStats, PipelineError> {
        let Pipeline {
            decoded: _decoded,
            producer,
            consumer,
        } = self;
        let stats = producer
            .join()
            .map_err(|_| PipelineError::Panicked("reader"))?;
        consumer
            .join()
            .map_err(|_| PipelineError::Panicked("decoder"))?;
        Ok(stats?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::spawn_pipeline;
    use crate::framing::Framer;
    use crate::pipeline::{PipelineError, PipelineStats};
    use crate::protocols::tsip::Packet;
    use crate::source::{ByteSource, ReaderSource, SourceError};

    fn stream(frames: usize) -> Vec<u8> {
        let mut bytes = Vec::new();
        for _ in 0..frames {
            bytes.extend_from_slice(&[0x10, 0x42, 0x00, 0x10, 0x03]);
        }
        bytes
    }

    #[test]
    fn delivers_frames_in_order() {
        let source = ReaderSource::new(Cursor::new(stream(200))).with_chunk_size(7);
        let pipeline = spawn_pipeline(source, Framer::new()).unwrap();

        let decoded: Vec<_> = pipeline.iter().collect();
        assert_eq!(decoded.len(), 200);
        for frame in &decoded {
            assert_eq!(frame.id, 0x42);
            assert_eq!(frame.result, Ok(Packet::Unknown(0x42)));
            assert_eq!(frame.body_len, 1);
        }

        let stats = pipeline.join().unwrap();
        assert_eq!(
            stats,
            PipelineStats {
                bytes: 1000,
                frames: 200,
            }
        );
    }

    struct BrokenSource;

    impl ByteSource for BrokenSource {
        fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, SourceError> {
            Err(SourceError::Command {
                command: "gpspipe -R".to_string(),
                message: "exited with exit status: 1".to_string(),
            })
        }
    }

    #[test]
    fn source_error_surfaces_on_join() {
        let pipeline = spawn_pipeline(BrokenSource, Framer::new()).unwrap();
        assert!(pipeline.recv().is_none());
        let err = pipeline.join().unwrap_err();
        assert!(matches!(err, PipelineError::Source(SourceError::Command { .. })));
    }

    #[test]
    fn join_without_draining_finishes() {
        let source = ReaderSource::new(Cursor::new(stream(10)));
        let pipeline = spawn_pipeline(source, Framer::new()).unwrap();
        assert_eq!(pipeline.join().unwrap().frames, 10);
    }
}
