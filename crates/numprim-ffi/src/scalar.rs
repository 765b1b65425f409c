//! Scalar math entry points.
//!
//! Thin `extern "C"` wrappers over [`numprim::scalar`]. Results are
//! returned by value; there is no status code because domain errors are
//! IEEE-754 values. A caught panic yields `NaN` (or `0` for integers),
//! though none of these bodies can panic.

use numprim::scalar;

/// Absolute value of `v`. `INT64_MIN` wraps to itself.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_abs_int(v: i64) -> i64 {
    ffi_guard!(0, { scalar::abs_int(v) })
}

/// Comparison-based absolute value; `NaN` is returned unchanged.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_abs_double(v: f64) -> f64 {
    ffi_guard!(f64::NAN, { scalar::abs_double(v) })
}

/// Ceiling of `v`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_ceil(v: f64) -> f64 {
    ffi_guard!(f64::NAN, { scalar::ceil(v) })
}

/// Floor of `v`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_floor(v: f64) -> f64 {
    ffi_guard!(f64::NAN, { scalar::floor(v) })
}

/// Round `v` to `decimals` places; negative `decimals` round to tens,
/// hundreds, and so on.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_round(v: f64, decimals: i32) -> f64 {
    ffi_guard!(f64::NAN, { scalar::round(v, decimals) })
}

/// `base` raised to `exp`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_power(base: f64, exp: f64) -> f64 {
    ffi_guard!(f64::NAN, { scalar::power(base, exp) })
}

/// Square root.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_sqrt(v: f64) -> f64 {
    ffi_guard!(f64::NAN, { scalar::sqrt(v) })
}

/// Floating remainder with the sign of `a` (C `fmod`).
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_mod(a: f64, b: f64) -> f64 {
    ffi_guard!(f64::NAN, { scalar::modulo(a, b) })
}

/// `e` raised to `v`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_exp(v: f64) -> f64 {
    ffi_guard!(f64::NAN, { scalar::exp(v) })
}

/// Natural logarithm.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_ln(v: f64) -> f64 {
    ffi_guard!(f64::NAN, { scalar::ln(v) })
}

/// `ln(v) / ln(base)`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_log(base: f64, v: f64) -> f64 {
    ffi_guard!(f64::NAN, { scalar::log(base, v) })
}

/// Base-2 logarithm.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_log2(v: f64) -> f64 {
    ffi_guard!(f64::NAN, { scalar::log2(v) })
}

/// Base-10 logarithm.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_log10(v: f64) -> f64 {
    ffi_guard!(f64::NAN, { scalar::log10(v) })
}

/// `1`, `0` or `-1`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_sign_int(v: i64) -> i64 {
    ffi_guard!(0, { scalar::sign_int(v) })
}

/// `1.0`, `0.0` or `-1.0`; `NaN` maps to `0.0`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_sign_double(v: f64) -> f64 {
    ffi_guard!(0.0, { scalar::sign_double(v) })
}

/// The constant π.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_pi() -> f64 {
    scalar::PI
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrappers_forward() {
        assert_eq!(nprim_abs_int(-4), 4);
        assert_eq!(nprim_abs_int(i64::MIN), i64::MIN);
        assert_eq!(nprim_round(1234.5678, -2), 1200.0);
        assert_eq!(nprim_mod(-7.0, 3.0), -1.0);
        assert_eq!(nprim_sign_double(f64::NAN), 0.0);
        assert!(nprim_sqrt(-1.0).is_nan());
        assert_eq!(nprim_pi(), std::f64::consts::PI);
    }
}
