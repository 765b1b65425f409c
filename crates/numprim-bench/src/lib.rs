//! Benchmark fixtures for the numprim numeric primitives.
//!
//! - [`bench_sizes`]: array lengths covering remainder-only through large batches
//! - [`bench_arrays`]: deterministic operand pair for a given length

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use numprim::{Backend, BatchKernels};

/// Array lengths benchmarked for every batch kernel.
///
/// 3 never reaches the vector loop; 1027 ends with a scalar tail.
pub fn bench_sizes() -> &'static [usize] {
    &[3, 64, 1027, 16_384, 1 << 20]
}

/// Two mixed-sign operand arrays of length `n`, stable across runs.
pub fn bench_arrays(n: usize) -> (Vec<f64>, Vec<f64>) {
    let a = (0..n).map(|i| (i as f64 * 0.37).sin() * 1000.0).collect();
    let b = (0..n).map(|i| (i as f64 * 0.11).cos() * -250.0).collect();
    (a, b)
}

/// Every backend the running CPU supports, scalar first.
pub fn available_kernels() -> Vec<BatchKernels> {
    [Backend::Scalar, Backend::Avx, Backend::Neon]
        .into_iter()
        .filter_map(BatchKernels::with_backend)
        .collect()
}
