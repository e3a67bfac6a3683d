//! Protocol error types.

use thiserror::Error;

/// Errors that can occur when converting raw values into protocol types.
///
/// Frame parsing itself never fails; malformed input resynchronizes the
/// parser instead. These errors come from conversions at the edges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The upstream channel index does not name a transfer direction.
    #[error("invalid direction index: {0}")]
    InvalidDirection(u8),

    /// Control byte does not match any known frame type.
    #[error("unknown control byte: 0x{0:02X}")]
    UnknownControl(u8),

    /// Unrecognized data format name.
    #[error("unknown data format: {0:?} (expected ascii, dec, hex, oct or bin)")]
    UnknownFormat(String),

    /// Unrecognized length mode name.
    #[error("unknown length mode: {0:?} (expected extended or single)")]
    UnknownLengthMode(String),
}

/// Result type alias for protocol conversions.
pub type ProtocolResult<T> = Result<T, ProtocolError>;
