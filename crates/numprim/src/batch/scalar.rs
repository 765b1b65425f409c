//! Portable element-at-a-time kernels.
//!
//! Also used by the vector backends for the trailing `n % 4` elements,
//! which is what keeps bulk and remainder bit-identical.

#![allow(unsafe_code)]

pub fn abs_in_place(data: &mut [f64]) {
    for v in data {
        *v = v.abs();
    }
}

/// `out[i] = a[i] + b[i]` for `i` in `start..n`.
///
/// Each element is read in full before it is written, so `out` may equal
/// `a` or `b`.
///
/// # Safety
///
/// Same contract as [`BatchKernels::add_raw`](super::BatchKernels::add_raw).
pub unsafe fn add_raw(a: *const f64, b: *const f64, out: *mut f64, start: usize, n: usize) {
    for i in start..n {
        let sum = *a.add(i) + *b.add(i);
        *out.add(i) = sum;
    }
}
