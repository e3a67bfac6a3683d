//! Error types for the decoder.

use cmux_protocol::ProtocolError;
use thiserror::Error;

/// Errors that can occur while configuring the decoder.
#[derive(Debug, Error)]
pub enum DecoderError {
    /// Option key is not recognized.
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// Option value is not one of the allowed values.
    #[error("invalid value {value:?} for option {key}: {source}")]
    InvalidOption {
        /// Option key.
        key: String,
        /// Rejected value.
        value: String,
        /// Why the value was rejected.
        #[source]
        source: ProtocolError,
    },

    /// Debug flag is neither `yes` nor `no`.
    #[error("invalid value {0:?} for option debug (expected yes or no)")]
    InvalidDebugFlag(String),

    /// Options document could not be parsed.
    #[error("failed to parse options: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for decoder operations.
pub type DecoderResult<T> = Result<T, DecoderError>;
