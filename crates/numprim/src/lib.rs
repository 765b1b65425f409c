//! Stateless numeric primitives for host programs.
//!
//! Three families of functions, all independent of each other:
//!
//! - [`scalar`]: absolute value, rounding, the power/log family and sign,
//!   over `i64` and `f64`. Domain errors surface as IEEE-754 `NaN` or
//!   `Infinity`, never as Rust errors.
//! - [`random`]: signed 64-bit draws and byte blobs from an explicit
//!   [`Generator`], plus thread-local convenience functions.
//! - [`batch`]: in-place absolute value and elementwise add over `f64`
//!   slices, with a vectorized fast path and a scalar fallback that
//!   produce bit-identical output.
//!
//! [`extension`] exposes the same primitives as SQL functions over a
//! dynamically typed [`Value`], and [`config`] resolves backend and seed
//! settings from the environment.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod batch;
pub mod config;
pub mod error;
pub mod extension;
pub mod random;
pub mod scalar;

pub use batch::{batch_abs_double, batch_add_double, Backend, BatchKernels};
pub use config::{BackendPreference, NumprimConfig};
pub use error::{BatchError, ConfigError, ExtensionError};
pub use extension::{Extension, MathExtension, Value};
pub use random::{zero_blob, Generator};
