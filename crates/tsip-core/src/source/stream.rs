use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use super::{ByteSource, SourceError, layout};

/// `ByteSource` over any blocking reader: a capture file, standard input, a
/// pipe or an opened serial device.
pub struct ReaderSource<R> {
    reader: R,
    chunk_size: usize,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            chunk_size: layout::DEFAULT_CHUNK_SIZE,
        }
    }

    /// Upper bound on the size of each chunk; never below one byte.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl ReaderSource<File> {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, SourceError> {
        let mut buf = vec![0u8; self.chunk_size];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(read) => {
                    buf.truncate(read);
                    return Ok(Some(buf));
                }
                // Serial ports report an idle line as a timeout.
                Err(err)
                    if matches!(
                        err.kind(),
                        ErrorKind::Interrupted | ErrorKind::TimedOut | ErrorKind::WouldBlock
                    ) => {}
                Err(err) => return Err(err.into()),
            }
        }
    }
}
