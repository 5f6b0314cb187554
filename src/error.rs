use thiserror::Error;

/// Byte-level errors raised by the binary cursor.
#[derive(Debug, Clone, Error)]
pub enum CursorError {
    /// Fewer bytes were available than a fixed-size read required
    #[error("truncated read at offset {offset}: requested {requested} bytes, {available} available")]
    Truncated {
        offset: u64,
        requested: u64,
        available: u64,
    },

    /// Requested absolute offset exceeds the source bounds
    #[error("seek to offset {offset} failed: source is {len} bytes")]
    SeekFailed { offset: u64, len: u64 },

    /// OS-level read error from the underlying byte source
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for CursorError {
    fn from(err: std::io::Error) -> Self {
        CursorError::Io(err.to_string())
    }
}

/// Errors raised while decoding a container file.
#[derive(Debug, Clone, Error)]
pub enum FormatError {
    /// The file is not in this reader's format (wrong extension or magic).
    ///
    /// This is the expected decline signal for reader-chain dispatch, not a
    /// decode failure: the next candidate format should be tried.
    #[error("unrecognized format: {reason}")]
    Unrecognized { reason: String },

    /// Byte-level failure; fatal for the current file
    #[error("decode error: {0}")]
    Cursor(#[from] CursorError),
}

impl FormatError {
    /// Build the decline signal with a human-readable reason.
    pub fn unrecognized(reason: impl Into<String>) -> Self {
        FormatError::Unrecognized {
            reason: reason.into(),
        }
    }

    /// Whether this error is the reader-chain decline signal rather than a
    /// hard decode failure.
    pub fn is_decline(&self) -> bool {
        matches!(self, FormatError::Unrecognized { .. })
    }
}

// =============================================================================
// Tests
// =============================================================================
