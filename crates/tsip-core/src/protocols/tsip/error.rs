use thiserror::Error;

use super::packet::PacketKind;

/// Errors returned by TSIP packet decoding.
///
/// Every error is scoped to the one frame being decoded; callers log it and
/// move on to the next frame.
///
/// # Examples
/// ```
/// use tsip_core::{DecodeError, PacketKind, decode_packet};
///
/// let err = decode_packet(0x5a, &[0x0b]).unwrap_err();
/// assert_eq!(
///     err,
///     DecodeError::Malformed {
///         kind: PacketKind::RawMeasurement,
///         expected_min_len: 25,
///         actual_len: 1,
///     }
/// );
/// assert!(err.to_string().contains("need at least 25 bytes"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("malformed {kind} packet: need at least {expected_min_len} bytes, got {actual_len}")]
    Malformed {
        kind: PacketKind,
        expected_min_len: usize,
        actual_len: usize,
    },
    #[error("malformed {kind} packet: invalid {field}: {reason}")]
    InvalidField {
        kind: PacketKind,
        field: &'static str,
        reason: String,
    },
}

impl DecodeError {
    /// Packet layout the error belongs to.
    pub fn kind(&self) -> PacketKind {
        match self {
            DecodeError::Malformed { kind, .. } | DecodeError::InvalidField { kind, .. } => *kind,
        }
    }
}
