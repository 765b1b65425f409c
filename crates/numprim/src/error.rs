//! Error types for the numprim library.
//!
//! Numeric domain errors are never represented here: `sqrt(-1.0)` is
//! `NaN`, `ln(0.0)` is `-Infinity`. These enums cover the Rust-level
//! API surface only, organized by module: batch kernels, configuration,
//! and the SQL extension.

use std::error::Error;
use std::fmt;

/// Errors from the slice-based batch kernels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatchError {
    /// An operand slice has a different length from the first input.
    LengthMismatch {
        /// Which operand disagreed (`"b"` or `"out"`).
        operand: &'static str,
        /// Length of the first input.
        expected: usize,
        /// Length of the offending operand.
        actual: usize,
    },
    /// The output range overlaps an input without starting at the same
    /// address. Only exact aliasing is supported.
    PartialOverlap,
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch {
                operand,
                expected,
                actual,
            } => write!(
                f,
                "operand '{operand}' has length {actual}, expected {expected}"
            ),
            Self::PartialOverlap => {
                write!(f, "output partially overlaps an input; only exact aliasing is supported")
            }
        }
    }
}

impl Error for BatchError {}

/// Errors detected while resolving a [`NumprimConfig`](crate::NumprimConfig).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `NUMPRIM_BACKEND` held something other than `auto`, `scalar` or `simd`.
    UnknownBackend {
        /// The rejected value.
        value: String,
    },
    /// `NUMPRIM_SEED` was not a decimal `u64`.
    InvalidSeed {
        /// The rejected value.
        value: String,
    },
    /// A vector backend was requested but the CPU offers none.
    BackendUnavailable {
        /// Name of the requested preference.
        requested: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownBackend { value } => {
                write!(f, "unknown batch backend '{value}' (expected auto, scalar or simd)")
            }
            Self::InvalidSeed { value } => write!(f, "seed '{value}' is not a valid u64"),
            Self::BackendUnavailable { requested } => {
                write!(f, "backend '{requested}' is not available on this CPU")
            }
        }
    }
}

impl Error for ConfigError {}

/// Errors from [`Extension::call`](crate::Extension::call).
///
/// Bad argument types are not errors: SQL semantics turn them into
/// `NULL`. Only dispatch failures end up here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtensionError {
    /// The extension does not provide a function with this name.
    UnknownFunction {
        /// The name as passed by the caller.
        name: String,
    },
    /// The shared generator mutex was poisoned by a panic in another caller.
    GeneratorPoisoned,
}

impl fmt::Display for ExtensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFunction { name } => write!(f, "unknown function '{name}'"),
            Self::GeneratorPoisoned => write!(f, "random generator poisoned by a prior panic"),
        }
    }
}

impl Error for ExtensionError {}
