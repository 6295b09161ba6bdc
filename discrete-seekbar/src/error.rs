//! Errors surfaced by the crate.
//!
//! Interaction itself never fails: bad ranges are corrected, values clamped
//! and stale frame tokens dropped. Only decoding a persisted record can go
//! wrong.

use thiserror::Error;

/// Errors returned by the seek bar API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeekBarError {
    /// A persisted record was shorter than the fixed record size.
    #[error("truncated seek bar state: expected {expected} bytes, got {actual}")]
    TruncatedState {
        /// Required length in bytes.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },
}
