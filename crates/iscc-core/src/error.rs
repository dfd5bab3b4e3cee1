//! Error types shared by every ISCC crate.

use thiserror::Error;

/// Errors from ISCC codec, hashing, and generator operations.
#[derive(Debug, Error)]
pub enum IsccError {
    /// Malformed or out-of-range input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation not allowed in the current hasher state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Reading streamed input failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ISCC operations.
pub type IsccResult<T> = Result<T, IsccError>;

impl IsccError {
    /// Returns true for [`IsccError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Returns true for [`IsccError::InvalidState`].
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }

    /// Returns true for [`IsccError::Io`].
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
