//! Protocol decoding modules.
//!
//! Each protocol follows a layered structure:
//! - `layout`: ids, byte offsets and ranges (source of truth)
//! - `reader`: safe byte access and numeric conventions
//! - one module per packet: record types and their decoding
//! - `error`: explicit, actionable errors
//!
//! Decoders are pure and contain no I/O; `source` and `pipeline` handle byte
//! transport and sequencing.

pub mod tsip;
