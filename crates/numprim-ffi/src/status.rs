//! C-compatible status codes.
//!
//! [`NprimStatus`] is a `repr(i32)` enum returned by the batch and
//! generator entry points. Scalar math never reports a status: domain
//! errors are IEEE-754 values. Conversions from [`BatchError`] are
//! provided.

use numprim::BatchError;

/// C-compatible status code.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NprimStatus {
    /// Success.
    Ok = 0,
    /// Generator handle is invalid or was already destroyed.
    InvalidHandle = -1,
    /// Negative count, null pointer with a non-zero count, or an output
    /// range that partially overlaps an input.
    InvalidArgument = -2,
    /// Blob allocation failed.
    AllocationFailed = -3,
    /// Internal error (e.g. poisoned mutex after a prior panic).
    InternalError = -4,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&BatchError> for NprimStatus {
    fn from(e: &BatchError) -> Self {
        match e {
            BatchError::LengthMismatch { .. } | BatchError::PartialOverlap => {
                NprimStatus::InvalidArgument
            }
        }
    }
}
