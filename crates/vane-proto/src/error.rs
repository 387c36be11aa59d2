//! DNS codec error types.
//!
//! Every structural problem found while decoding aborts the whole decode;
//! partial results are never returned as if they were valid.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// DNS codec errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Buffer is too short to contain the expected data.
    #[error("buffer too short: expected at least {expected} bytes, got {actual}")]
    BufferTooShort {
        /// Expected minimum size.
        expected: usize,
        /// Actual buffer size.
        actual: usize,
    },

    /// Unexpected end of data while parsing.
    #[error("unexpected end of data at offset {offset}")]
    UnexpectedEof {
        /// Byte offset where EOF was encountered.
        offset: usize,
    },

    /// Invalid data encountered during parsing.
    #[error("invalid data at offset {offset}: {message}")]
    InvalidData {
        /// Byte offset of the invalid data.
        offset: usize,
        /// Description of the error.
        message: String,
    },

    /// Label exceeds the maximum length of 63 bytes.
    ///
    /// Raised before any wire bytes are produced when encoding, and while
    /// scanning length bytes when decoding.
    #[error("label too long: {length} bytes exceeds maximum of 63")]
    LabelTooLong {
        /// Actual label length.
        length: usize,
    },

    /// Domain name exceeds the maximum wire length of 255 bytes.
    #[error("name too long: {length} bytes exceeds maximum of 255")]
    NameTooLong {
        /// Actual name length in wire format.
        length: usize,
    },

    /// Invalid compression pointer (points forward or at itself).
    #[error("invalid compression pointer at offset {offset}: points to {target}")]
    InvalidCompressionPointer {
        /// Offset of the pointer.
        offset: usize,
        /// Target offset the pointer references.
        target: usize,
    },

    /// Too many compression pointer jumps while decoding one name.
    #[error("too many compression pointer jumps (>{max_jumps})")]
    TooManyCompressionJumps {
        /// Maximum allowed jumps.
        max_jumps: usize,
    },

    /// RDATA length does not match what the record type requires.
    #[error("RDATA length mismatch for {rtype}: expected {expected}, got {actual}")]
    RDataLengthMismatch {
        /// Record type name.
        rtype: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },
}

impl Error {
    /// Creates a `BufferTooShort` error.
    #[inline]
    pub fn buffer_too_short(expected: usize, actual: usize) -> Self {
        Self::BufferTooShort { expected, actual }
    }

    /// Creates an `UnexpectedEof` error.
    #[inline]
    pub fn unexpected_eof(offset: usize) -> Self {
        Self::UnexpectedEof { offset }
    }

    /// Creates an `InvalidData` error.
    #[inline]
    pub fn invalid_data(offset: usize, message: impl Into<String>) -> Self {
        Self::InvalidData {
            offset,
            message: message.into(),
        }
    }
}
