//! Test fixtures and proptest strategies for numprim development.
//!
//! Provides the awkward `f64` values that separate comparison-based from
//! sign-mask absolute value, the array lengths that straddle the 4-wide
//! vector/remainder boundary, deterministic array builders, and
//! bit-exact assertion helpers (`assert_eq!` on `f64` treats every `NaN`
//! as unequal and `-0.0 == 0.0`).

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use proptest::prelude::*;

/// Lengths that cover empty input, remainder-only input, exact groups,
/// and groups plus remainder.
pub const BOUNDARY_LENGTHS: &[usize] = &[0, 1, 3, 4, 5, 8, 13, 31];

/// `NaN` with the sign bit set.
pub fn negative_nan() -> f64 {
    f64::from_bits(f64::NAN.to_bits() | (1 << 63))
}

/// Values whose sign or class trips up naive implementations.
pub fn special_values() -> Vec<f64> {
    vec![
        0.0,
        -0.0,
        1.0,
        -1.0,
        f64::MIN_POSITIVE,
        -f64::MIN_POSITIVE,
        f64::from_bits(1),
        -f64::from_bits(1),
        f64::MAX,
        f64::MIN,
        f64::INFINITY,
        f64::NEG_INFINITY,
        f64::NAN,
        negative_nan(),
        f64::EPSILON,
        -1234.5678,
    ]
}

/// Deterministic mixed-sign array of length `n`.
///
/// Uses a 64-bit LCG so fixtures stay stable without pulling an RNG into
/// the assertions.
pub fn mixed_array(n: usize, seed: u64) -> Vec<f64> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let magnitude = (state >> 11) as f64 / (1u64 << 53) as f64 * 1000.0;
            if state & 1 == 0 {
                magnitude
            } else {
                -magnitude
            }
        })
        .collect()
}

/// Array of length `n` cycling through [`special_values`].
pub fn special_array(n: usize) -> Vec<f64> {
    let specials = special_values();
    (0..n).map(|i| specials[i % specials.len()]).collect()
}

/// Bit patterns of a slice, for exact comparison including `NaN` and `-0.0`.
pub fn bits(values: &[f64]) -> Vec<u64> {
    values.iter().map(|v| v.to_bits()).collect()
}

/// Bit patterns with every `NaN` collapsed to the canonical quiet `NaN`.
///
/// For results of arithmetic, where the payload of a `NaN` produced from
/// two `NaN` operands depends on operand order chosen by the compiler.
pub fn canonical_bits(values: &[f64]) -> Vec<u64> {
    values
        .iter()
        .map(|v| if v.is_nan() { f64::NAN.to_bits() } else { v.to_bits() })
        .collect()
}

/// Assert two slices are identical bit for bit.
#[track_caller]
pub fn assert_bits_eq(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert_eq!(
            a.to_bits(),
            e.to_bits(),
            "index {i}: got {a:?} ({:#018x}), expected {e:?} ({:#018x})",
            a.to_bits(),
            e.to_bits()
        );
    }
}

/// Any `f64` bit pattern, including every `NaN` payload and subnormals.
pub fn arb_f64_bits() -> impl Strategy<Value = f64> {
    any::<u64>().prop_map(f64::from_bits)
}

/// Vector of arbitrary `f64` bit patterns with length in `0..max_len`.
pub fn arb_f64_vec(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(arb_f64_bits(), 0..max_len)
}

/// Two equal-length vectors of arbitrary `f64`s.
pub fn arb_f64_pair(max_len: usize) -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (0..max_len).prop_flat_map(|n| {
        (
            proptest::collection::vec(arb_f64_bits(), n),
            proptest::collection::vec(arb_f64_bits(), n),
        )
    })
}
