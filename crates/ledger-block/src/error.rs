//! Decode failures.
//!
//! Decoding is all-or-nothing: every variant aborts the whole block and the
//! caller never sees a partially built value.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DecodeError>;

#[derive(Debug, Error)]
pub enum DecodeError {
    /// The cursor ran out before a field was complete. `available` is only
    /// known for buffer-backed cursors.
    #[error("short read: needed {requested} bytes, {}", describe_available(.available))]
    ShortRead {
        requested: usize,
        available: Option<usize>,
    },

    #[error("malformed {field}: {reason}")]
    MalformedField { field: &'static str, reason: String },

    #[error("declared {declared} transactions but only {decoded} decoded: {source}")]
    CountMismatch {
        declared: u64,
        decoded: u64,
        #[source]
        source: Box<DecodeError>,
    },

    #[error("{remaining} trailing bytes after block")]
    TrailingBytes { remaining: usize },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_available(available: &Option<usize>) -> String {
    match available {
        Some(n) => format!("{n} available"),
        None => "stream ended".to_string(),
    }
}

impl DecodeError {
    pub(crate) fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        DecodeError::MalformedField {
            field,
            reason: reason.into(),
        }
    }

    /// True when the failure was caused by running out of input rather than
    /// by rejected content.
    pub fn is_short_read(&self) -> bool {
        match self {
            DecodeError::ShortRead { .. } => true,
            DecodeError::CountMismatch { source, .. } => source.is_short_read(),
            _ => false,
        }
    }
}
