//! Scalar math over `i64` and `f64`.
//!
//! Pure functions with no hidden state. Nothing here validates its
//! input: domain errors (`sqrt` of a negative, `ln` of zero, `modulo`
//! by zero) come back as IEEE-754 `NaN` or `Infinity`.

/// The constant returned by the SQL `PI()` function.
pub const PI: f64 = std::f64::consts::PI;

/// Absolute value of a signed 64-bit integer.
///
/// `i64::MIN` has no positive counterpart; negation wraps and the result
/// is `i64::MIN` itself. Use [`checked_abs_int`] to detect that case.
pub fn abs_int(v: i64) -> i64 {
    if v < 0 {
        v.wrapping_neg()
    } else {
        v
    }
}

/// Absolute value, or `None` for `i64::MIN`.
pub fn checked_abs_int(v: i64) -> Option<i64> {
    v.checked_abs()
}

/// Comparison-based absolute value.
///
/// Returns `-v` only when `v < 0.0`. `NaN` fails the comparison and is
/// returned with its sign bit intact, and `-0.0` stays `-0.0`. This
/// differs from [`f64::abs`], which clears the sign bit unconditionally.
pub fn abs_double(v: f64) -> f64 {
    if v < 0.0 {
        -v
    } else {
        v
    }
}

/// Smallest integer not less than `v`.
pub fn ceil(v: f64) -> f64 {
    v.ceil()
}

/// Largest integer not greater than `v`.
pub fn floor(v: f64) -> f64 {
    v.floor()
}

/// Round `v` to `decimals` places, ties away from zero.
///
/// Positive `decimals` scale up before rounding (`round(1234.5678, 2)` is
/// `1234.57`). Negative `decimals` divide first and multiply after, so the
/// value snaps to the nearest `10^-decimals` (`round(1234.5678, -2)` is
/// `1200.0`).
pub fn round(v: f64, decimals: i32) -> f64 {
    if decimals < 0 {
        let multiplier = 10f64.powf(-(decimals as f64));
        return (v / multiplier).round() * multiplier;
    }
    let multiplier = 10f64.powf(decimals as f64);
    (v * multiplier).round() / multiplier
}

/// `base` raised to `exp`.
pub fn power(base: f64, exp: f64) -> f64 {
    base.powf(exp)
}

/// Square root; `NaN` for negative input.
pub fn sqrt(v: f64) -> f64 {
    v.sqrt()
}

/// Floating remainder with the sign of the dividend (C `fmod`).
///
/// Not Euclidean: `modulo(-7.0, 3.0)` is `-1.0`.
pub fn modulo(a: f64, b: f64) -> f64 {
    a % b
}

/// `e` raised to `v`.
pub fn exp(v: f64) -> f64 {
    v.exp()
}

/// Natural logarithm.
pub fn ln(v: f64) -> f64 {
    v.ln()
}

/// Logarithm of `v` in `base`, computed as `ln(v) / ln(base)`.
///
/// Two rounded logarithms are divided, so exact powers do not always
/// land on integers (`log(10.0, 1000.0)` may be `2.9999999999999996`).
pub fn log(base: f64, v: f64) -> f64 {
    v.ln() / base.ln()
}

/// Base-2 logarithm.
pub fn log2(v: f64) -> f64 {
    v.log2()
}

/// Base-10 logarithm.
pub fn log10(v: f64) -> f64 {
    v.log10()
}

/// `1`, `0` or `-1` by comparison with zero.
pub fn sign_int(v: i64) -> i64 {
    (v > 0) as i64 - (v < 0) as i64
}

/// `1.0`, `0.0` or `-1.0` by comparison with zero.
///
/// Both comparisons fail for `NaN`, so it maps to `0.0`. `-0.0` also maps
/// to positive `0.0`.
pub fn sign_double(v: f64) -> f64 {
    ((v > 0.0) as i32 - (v < 0.0) as i32) as f64
}
