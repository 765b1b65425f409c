//! x86_64 AVX kernels, four doubles per 256-bit register.
//!
//! Only reachable through [`BatchKernels`](super::BatchKernels) after
//! runtime detection has confirmed AVX support.

#![allow(unsafe_code)]

use core::arch::x86_64::*;

use super::{scalar, LANES};

/// # Safety
///
/// The CPU must support AVX.
#[target_feature(enable = "avx")]
pub unsafe fn abs_in_place(data: &mut [f64]) {
    let n = data.len();
    let ptr = data.as_mut_ptr();
    let sign_mask = _mm256_set1_pd(-0.0);
    let mut i = 0usize;
    while i + LANES <= n {
        let v = _mm256_loadu_pd(ptr.add(i));
        _mm256_storeu_pd(ptr.add(i), _mm256_andnot_pd(sign_mask, v));
        i += LANES;
    }
    scalar::abs_in_place(&mut data[i..]);
}

/// # Safety
///
/// The CPU must support AVX, plus the pointer contract of
/// [`BatchKernels::add_raw`](super::BatchKernels::add_raw).
#[target_feature(enable = "avx")]
pub unsafe fn add_raw(a: *const f64, b: *const f64, out: *mut f64, n: usize) {
    let mut i = 0usize;
    while i + LANES <= n {
        let va = _mm256_loadu_pd(a.add(i));
        let vb = _mm256_loadu_pd(b.add(i));
        _mm256_storeu_pd(out.add(i), _mm256_add_pd(va, vb));
        i += LANES;
    }
    scalar::add_raw(a, b, out, i, n);
}
