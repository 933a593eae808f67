use thiserror::Error;

/// Errors that can occur while recording or exporting audio.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecorderError {
    /// Export was requested but nothing is registered to receive the result.
    #[error("no export consumer registered")]
    MissingConsumer,

    /// Channel buffers (or a fed block set) disagree on shape.
    ///
    /// Blocks are fed in lockstep, so hitting this at export time means the
    /// caller broke that contract.
    #[error("channel mismatch: expected {expected}, got {actual}")]
    ChannelMismatch { expected: usize, actual: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("encoding failed: {0}")]
    EncodingFailed(String),

    #[error("malformed wav: {0}")]
    MalformedWav(String),

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("session has been shut down")]
    ShutDown,
}
