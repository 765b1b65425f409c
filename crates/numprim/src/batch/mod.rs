//! Batch kernels over contiguous `f64` slices.
//!
//! Each operation has a vectorized implementation that works in groups
//! of four doubles and a scalar implementation for the remainder and for
//! CPUs without vector support. Both produce bit-identical output:
//!
//! - absolute value clears the sign bit everywhere (sign-mask semantics,
//!   so `-NaN` becomes `+NaN` and `-0.0` becomes `+0.0`), in the bulk and
//!   the remainder alike;
//! - addition is a single IEEE-754 add per element.
//!
//! The backend is chosen at runtime by [`Backend::detect`] and cached for
//! the life of the process.
//!
//! Output may alias an input only when both start at the same address
//! ([`BatchKernels::add_assign`], or [`BatchKernels::add_raw`] with
//! `out == a` / `out == b`). Partial overlap is rejected by
//! [`check_overlap`].

#[cfg(target_arch = "x86_64")]
mod avx;
#[cfg(target_arch = "aarch64")]
mod neon;
mod scalar;

use std::fmt;
use std::sync::OnceLock;

use crate::error::BatchError;

/// Number of doubles processed per vector group.
pub const LANES: usize = 4;

/// Instruction set used by a [`BatchKernels`] instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Portable element-at-a-time loop.
    Scalar,
    /// x86_64 AVX, one 256-bit register per group.
    Avx,
    /// aarch64 NEON, two 128-bit registers per group.
    Neon,
}

static DETECTED: OnceLock<Backend> = OnceLock::new();

impl Backend {
    /// Best backend the running CPU supports. Detected once per process.
    pub fn detect() -> Backend {
        *DETECTED.get_or_init(|| {
            let backend = detect_uncached();
            log::debug!("numprim: batch backend detected: {backend}");
            backend
        })
    }

    /// Whether this backend can run on the current CPU.
    pub fn is_available(self) -> bool {
        match self {
            Backend::Scalar => true,
            Backend::Avx => avx_available(),
            Backend::Neon => neon_available(),
        }
    }

    /// Lower-case name, as reported over the C ABI.
    pub fn name(self) -> &'static str {
        match self {
            Backend::Scalar => "scalar",
            Backend::Avx => "avx",
            Backend::Neon => "neon",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn detect_uncached() -> Backend {
    if avx_available() {
        Backend::Avx
    } else if neon_available() {
        Backend::Neon
    } else {
        Backend::Scalar
    }
}

#[cfg(target_arch = "x86_64")]
fn avx_available() -> bool {
    std::arch::is_x86_feature_detected!("avx")
}

#[cfg(not(target_arch = "x86_64"))]
fn avx_available() -> bool {
    false
}

#[cfg(target_arch = "aarch64")]
fn neon_available() -> bool {
    std::arch::is_aarch64_feature_detected!("neon")
}

#[cfg(not(target_arch = "aarch64"))]
fn neon_available() -> bool {
    false
}

/// Batch kernels bound to one [`Backend`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchKernels {
    backend: Backend,
}

impl Default for BatchKernels {
    fn default() -> Self {
        Self::detect()
    }
}

impl BatchKernels {
    /// Kernels for the best backend on this CPU.
    pub fn detect() -> Self {
        Self {
            backend: Backend::detect(),
        }
    }

    /// Kernels for the portable scalar loop.
    pub fn scalar() -> Self {
        Self {
            backend: Backend::Scalar,
        }
    }

    /// Kernels for a specific backend, or `None` if the CPU lacks it.
    pub fn with_backend(backend: Backend) -> Option<Self> {
        backend.is_available().then_some(Self { backend })
    }

    /// The backend these kernels dispatch to.
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Clear the sign bit of every element in place.
    #[allow(unsafe_code)]
    pub fn abs_in_place(&self, data: &mut [f64]) {
        match self.backend {
            // SAFETY: `with_backend`/`detect` only select Avx when the CPU has it.
            #[cfg(target_arch = "x86_64")]
            Backend::Avx => unsafe { avx::abs_in_place(data) },
            // SAFETY: `with_backend`/`detect` only select Neon when the CPU has it.
            #[cfg(target_arch = "aarch64")]
            Backend::Neon => unsafe { neon::abs_in_place(data) },
            _ => scalar::abs_in_place(data),
        }
    }

    /// `out[i] = a[i] + b[i]` for every index.
    ///
    /// All three slices must have the same length.
    #[allow(unsafe_code)]
    pub fn add(&self, a: &[f64], b: &[f64], out: &mut [f64]) -> Result<(), BatchError> {
        check_len("b", a.len(), b.len())?;
        check_len("out", a.len(), out.len())?;
        // SAFETY: lengths checked above; `out` is a unique borrow so it
        // cannot overlap `a` or `b`.
        unsafe { self.add_raw(a.as_ptr(), b.as_ptr(), out.as_mut_ptr(), a.len()) };
        Ok(())
    }

    /// `acc[i] += b[i]`: the add with output aliased to the first input.
    #[allow(unsafe_code)]
    pub fn add_assign(&self, acc: &mut [f64], b: &[f64]) -> Result<(), BatchError> {
        check_len("b", acc.len(), b.len())?;
        let out = acc.as_mut_ptr();
        // SAFETY: lengths checked above; `out` and `a` are the same pointer,
        // which the kernels support, and `b` is a shared borrow distinct
        // from the unique borrow `acc`.
        unsafe { self.add_raw(out, b.as_ptr(), out, acc.len()) };
        Ok(())
    }

    /// Raw-pointer add for callers that cannot express aliasing with
    /// slices, such as the C ABI.
    ///
    /// Each group of four is fully loaded before it is stored, and every
    /// element is read before it is written, so `out == a` and `out == b`
    /// give the same result as a separate output buffer.
    ///
    /// # Safety
    ///
    /// `a` and `b` must be valid for `n` reads and `out` for `n` writes.
    /// `out` may equal `a` or `b`, but must not otherwise overlap either
    /// range (see [`check_overlap`]). Pointers may be dangling when `n == 0`.
    #[allow(unsafe_code)]
    pub unsafe fn add_raw(&self, a: *const f64, b: *const f64, out: *mut f64, n: usize) {
        match self.backend {
            #[cfg(target_arch = "x86_64")]
            Backend::Avx => avx::add_raw(a, b, out, n),
            #[cfg(target_arch = "aarch64")]
            Backend::Neon => neon::add_raw(a, b, out, n),
            _ => scalar::add_raw(a, b, out, 0, n),
        }
    }
}

fn check_len(operand: &'static str, expected: usize, actual: usize) -> Result<(), BatchError> {
    if expected != actual {
        return Err(BatchError::LengthMismatch {
            operand,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Reject an output range that overlaps an input range without starting
/// at the same address.
///
/// Addresses are compared as integers; nothing is dereferenced.
pub fn check_overlap(input: *const f64, out: *const f64, n: usize) -> Result<(), BatchError> {
    if n == 0 || input == out {
        return Ok(());
    }
    let bytes = n.saturating_mul(std::mem::size_of::<f64>());
    let in_start = input as usize;
    let out_start = out as usize;
    let in_end = in_start.saturating_add(bytes);
    let out_end = out_start.saturating_add(bytes);
    if in_start < out_end && out_start < in_end {
        return Err(BatchError::PartialOverlap);
    }
    Ok(())
}

/// In-place absolute value using the detected backend.
pub fn batch_abs_double(data: &mut [f64]) {
    BatchKernels::detect().abs_in_place(data);
}

/// Elementwise add using the detected backend.
pub fn batch_add_double(a: &[f64], b: &[f64], out: &mut [f64]) -> Result<(), BatchError> {
    BatchKernels::detect().add(a, b, out)
}
