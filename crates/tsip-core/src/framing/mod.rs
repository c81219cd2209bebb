//! TSIP byte de-stuffing.
//!
//! The receiver wraps every packet as `<DLE> <id> <body> <DLE> <ETX>` and
//! doubles any literal DLE inside the body. `Framer` consumes bytes in
//! whatever chunks the transport delivers and yields `Frame` values holding
//! the id and the unescaped body. Output depends only on the byte sequence,
//! never on where chunk boundaries fall.
//!
//! The framer never fails: a terminator with no frame start in the buffer
//! drops the buffered bytes silently, and resynchronization picks the first
//! DLE in the buffer as the frame start. Leading non-TSIP text containing an
//! incidental `0x10` therefore corrupts at most the first frame after it.

pub mod framer;
pub mod layout;

pub use framer::{Frame, Framer};
