//! Batch array entry points.
//!
//! The kernels are resolved once per process from `NUMPRIM_BACKEND` alone;
//! an invalid or unavailable preference is logged and replaced by
//! automatic detection. `NUMPRIM_SEED` plays no part here.
//!
//! Unlike the raw C contract these functions validate what they can
//! without dereferencing: a negative count, a null pointer with a
//! non-zero count, or an output that partially overlaps an input all
//! return `InvalidArgument`. They cannot detect a pointer to fewer than
//! `n` valid doubles; that remains the caller's responsibility.

use std::ffi::c_char;
use std::sync::OnceLock;

use numprim::batch::check_overlap;
use numprim::{Backend, BackendPreference, BatchKernels, NumprimConfig};

use crate::status::NprimStatus;

static KERNELS: OnceLock<BatchKernels> = OnceLock::new();

fn kernels() -> BatchKernels {
    *KERNELS.get_or_init(|| resolve_kernels(|key| std::env::var(key).ok()))
}

fn resolve_kernels<F>(lookup: F) -> BatchKernels
where
    F: Fn(&str) -> Option<String>,
{
    let config = BackendPreference::from_lookup(lookup).map(|backend| NumprimConfig {
        backend,
        seed: None,
    });
    match config.and_then(|config| config.kernels()) {
        Ok(kernels) => kernels,
        Err(e) => {
            log::warn!("numprim-ffi: {e}; falling back to automatic backend detection");
            BatchKernels::detect()
        }
    }
}

/// Validate `n` and a pointer that must be non-null when `n > 0`.
fn checked_len<T>(ptr: *const T, n: i64) -> Result<usize, NprimStatus> {
    let len = usize::try_from(n).map_err(|_| NprimStatus::InvalidArgument)?;
    if len > 0 && ptr.is_null() {
        return Err(NprimStatus::InvalidArgument);
    }
    Ok(len)
}

/// Absolute value of `n` doubles in place (sign bit cleared).
///
/// `data` may be null when `n == 0`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_batch_abs_double(data: *mut f64, n: i64) -> i32 {
    ffi_guard!({
        let len = match checked_len(data, n) {
            Ok(len) => len,
            Err(status) => return status as i32,
        };
        if len == 0 {
            return NprimStatus::Ok as i32;
        }
        // SAFETY: data is non-null and points to n doubles per caller contract.
        let slice = unsafe { std::slice::from_raw_parts_mut(data, len) };
        kernels().abs_in_place(slice);
        NprimStatus::Ok as i32
    })
}

/// `out[i] = a[i] + b[i]` for `n` doubles.
///
/// `out` may be the same pointer as `a` or `b`. Any other overlap is
/// rejected with `InvalidArgument` and nothing is written.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_batch_add_double(
    a: *const f64,
    b: *const f64,
    out: *mut f64,
    n: i64,
) -> i32 {
    ffi_guard!({
        let len = match checked_len(a, n)
            .and(checked_len(b, n))
            .and(checked_len(out, n))
        {
            Ok(len) => len,
            Err(status) => return status as i32,
        };
        if len == 0 {
            return NprimStatus::Ok as i32;
        }
        for input in [a, b] {
            if let Err(e) = check_overlap(input, out, len) {
                return NprimStatus::from(&e) as i32;
            }
        }
        // SAFETY: all three pointers are non-null and valid for n doubles
        // per caller contract; `out` is either disjoint from or identical
        // to each input, checked above.
        unsafe { kernels().add_raw(a, b, out, len) };
        NprimStatus::Ok as i32
    })
}

/// Name of the active batch backend (`"scalar"`, `"avx"` or `"neon"`) as
/// a static NUL-terminated string. Never free it.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_backend_name() -> *const c_char {
    ffi_guard!(c"unknown".as_ptr(), {
        match kernels().backend() {
            Backend::Scalar => c"scalar".as_ptr(),
            Backend::Avx => c"avx".as_ptr(),
            Backend::Neon => c"neon".as_ptr(),
        }
    })
}
