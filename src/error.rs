//! Error types for oxilz operations.

use thiserror::Error;

/// The error type for compression and decompression operations.
#[derive(Debug, Error)]
pub enum OxiLzError {
    /// The compressed stream is malformed or truncated.
    ///
    /// Decompression makes no finer distinction: a caller retries nothing
    /// and discards the output. The message is diagnostic only.
    #[error("corrupt stream at offset {offset}: {message}")]
    CorruptStream {
        /// Byte offset into the compressed input where decoding failed.
        offset: usize,
        /// Description of the violation.
        message: String,
    },

    /// The output buffer is too small for the operation.
    #[error("output buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Number of bytes required.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// The input exceeds the maximum supported length.
    #[error("input of {len} bytes exceeds the supported maximum of {max}")]
    InputTooLarge {
        /// Length of the rejected input.
        len: usize,
        /// Maximum supported input length.
        max: usize,
    },
}

/// Result type alias for oxilz operations.
pub type Result<T> = std::result::Result<T, OxiLzError>;

impl OxiLzError {
    /// Create a corrupt stream error.
    pub(crate) fn corrupt(offset: usize, message: impl Into<String>) -> Self {
        Self::CorruptStream {
            offset,
            message: message.into(),
        }
    }

    /// Create a buffer too small error.
    pub(crate) fn buffer_too_small(needed: usize, available: usize) -> Self {
        Self::BufferTooSmall { needed, available }
    }

    /// Create an input too large error.
    pub(crate) fn input_too_large(len: usize, max: usize) -> Self {
        Self::InputTooLarge { len, max }
    }
}
