//! Byte sources feeding the framer.
//!
//! A `ByteSource` yields chunks in stream order with arbitrary boundaries
//! and `None` at end of stream. Implementations cover any `Read`er (files,
//! standard input), a serial device and a spawned command's standard output.

mod command;
pub mod layout;
mod serial;
mod stream;

pub use command::CommandSource;
pub use serial::{SerialConfig, open_serial};
pub use stream::ReaderSource;

use thiserror::Error;

pub trait ByteSource {
    fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, SourceError>;
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, SourceError> {
        (**self).next_chunk()
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serial port error ({path}): {message}")]
    Serial { path: String, message: String },
    #[error("command `{command}` failed: {message}")]
    Command { command: String, message: String },
}
