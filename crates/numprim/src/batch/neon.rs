//! aarch64 NEON kernels. NEON registers hold two doubles, so each group
//! of four is two loads per operand.

#![allow(unsafe_code)]

use core::arch::aarch64::*;

use super::{scalar, LANES};

/// # Safety
///
/// The CPU must support NEON.
#[target_feature(enable = "neon")]
pub unsafe fn abs_in_place(data: &mut [f64]) {
    let n = data.len();
    let ptr = data.as_mut_ptr();
    let mut i = 0usize;
    while i + LANES <= n {
        let lo = vld1q_f64(ptr.add(i));
        let hi = vld1q_f64(ptr.add(i + 2));
        vst1q_f64(ptr.add(i), vabsq_f64(lo));
        vst1q_f64(ptr.add(i + 2), vabsq_f64(hi));
        i += LANES;
    }
    scalar::abs_in_place(&mut data[i..]);
}

/// # Safety
///
/// The CPU must support NEON, plus the pointer contract of
/// [`BatchKernels::add_raw`](super::BatchKernels::add_raw).
#[target_feature(enable = "neon")]
pub unsafe fn add_raw(a: *const f64, b: *const f64, out: *mut f64, n: usize) {
    let mut i = 0usize;
    while i + LANES <= n {
        let a_lo = vld1q_f64(a.add(i));
        let a_hi = vld1q_f64(a.add(i + 2));
        let b_lo = vld1q_f64(b.add(i));
        let b_hi = vld1q_f64(b.add(i + 2));
        vst1q_f64(out.add(i), vaddq_f64(a_lo, b_lo));
        vst1q_f64(out.add(i + 2), vaddq_f64(a_hi, b_hi));
        i += LANES;
    }
    scalar::add_raw(a, b, out, i, n);
}
