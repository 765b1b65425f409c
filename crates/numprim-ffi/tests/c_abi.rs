//! Exercise the C ABI from Rust the way a host program would call it.

#![allow(unsafe_code)]

use numprim::BatchKernels;
use numprim_ffi::batch::{nprim_backend_name, nprim_batch_abs_double, nprim_batch_add_double};
use numprim_ffi::generator::{
    nprim_generator_create, nprim_generator_destroy, nprim_generator_random_blob,
};
use numprim_ffi::random::{nprim_blob_free, nprim_random_blob, nprim_zero_blob};
use numprim_ffi::NprimStatus;
use numprim_test_utils::{arb_f64_pair, arb_f64_vec, bits, canonical_bits, mixed_array};
use proptest::prelude::*;

const OK: i32 = NprimStatus::Ok as i32;
const INVALID: i32 = NprimStatus::InvalidArgument as i32;

#[test]
fn abs_clears_sign_bits() {
    let mut data = vec![-1.5, 2.0, -0.0, f64::NEG_INFINITY, -3.25];
    assert_eq!(nprim_batch_abs_double(data.as_mut_ptr(), data.len() as i64), OK);
    assert_eq!(data, vec![1.5, 2.0, 0.0, f64::INFINITY, 3.25]);
    assert!(data[2].is_sign_positive());
}

#[test]
fn zero_length_accepts_null() {
    assert_eq!(nprim_batch_abs_double(std::ptr::null_mut(), 0), OK);
    let null = std::ptr::null();
    assert_eq!(nprim_batch_add_double(null, null, std::ptr::null_mut(), 0), OK);
}

#[test]
fn bad_arguments_are_rejected() {
    let mut data = vec![-1.0; 4];
    assert_eq!(nprim_batch_abs_double(data.as_mut_ptr(), -1), INVALID);
    assert_eq!(nprim_batch_abs_double(std::ptr::null_mut(), 4), INVALID);
    assert_eq!(data, vec![-1.0; 4]);

    let a = [1.0; 4];
    let mut out = [0.0; 4];
    assert_eq!(
        nprim_batch_add_double(a.as_ptr(), std::ptr::null(), out.as_mut_ptr(), 4),
        INVALID
    );
    assert_eq!(
        nprim_batch_add_double(a.as_ptr(), a.as_ptr(), out.as_mut_ptr(), -4),
        INVALID
    );
    assert_eq!(out, [0.0; 4]);
}

#[test]
fn aliased_add_matches_separate_output() {
    let a = mixed_array(37, 5);
    let b = mixed_array(37, 6);
    let n = a.len() as i64;

    let mut expected = vec![0.0; a.len()];
    assert_eq!(
        nprim_batch_add_double(a.as_ptr(), b.as_ptr(), expected.as_mut_ptr(), n),
        OK
    );

    let mut acc = a.clone();
    assert_eq!(
        nprim_batch_add_double(acc.as_ptr(), b.as_ptr(), acc.as_mut_ptr(), n),
        OK
    );
    assert_eq!(canonical_bits(&acc), canonical_bits(&expected));

    let mut acc = b.clone();
    assert_eq!(
        nprim_batch_add_double(a.as_ptr(), acc.as_ptr(), acc.as_mut_ptr(), n),
        OK
    );
    assert_eq!(canonical_bits(&acc), canonical_bits(&expected));
}

#[test]
fn partial_overlap_is_rejected_untouched() {
    let mut buf: Vec<f64> = (0..12).map(f64::from).collect();
    let before = buf.clone();
    let base = buf.as_mut_ptr();
    // out starts one element into a: overlapping but not identical.
    let status = unsafe { nprim_batch_add_double(base, base.add(8), base.add(1), 4) };
    assert_eq!(status, INVALID);
    assert_eq!(buf, before);
}

#[test]
fn adjacent_ranges_are_not_overlap() {
    let mut buf = vec![1.0; 12];
    let base = buf.as_mut_ptr();
    let status = unsafe { nprim_batch_add_double(base, base.add(4), base.add(8), 4) };
    assert_eq!(status, OK);
    assert_eq!(&buf[8..], &[2.0; 4]);
}

#[test]
fn blob_lifecycle() {
    for n in [1i64, 7, 64] {
        let blob = nprim_random_blob(n);
        assert!(!blob.is_null());
        nprim_blob_free(blob, n);

        let zeros = nprim_zero_blob(n);
        assert!(!zeros.is_null());
        let bytes = unsafe { std::slice::from_raw_parts(zeros, n as usize) };
        assert!(bytes.iter().all(|&b| b == 0));
        nprim_blob_free(zeros, n);
    }
}

#[test]
fn generator_blobs_are_reproducible() {
    let mut handles = [0u64; 2];
    for h in &mut handles {
        assert_eq!(nprim_generator_create(99, 1, h), OK);
    }
    let mut blobs = [std::ptr::null_mut::<u8>(); 2];
    for (h, blob) in handles.iter().zip(&mut blobs) {
        assert_eq!(nprim_generator_random_blob(*h, 16, blob), OK);
        assert!(!blob.is_null());
    }
    let first = unsafe { std::slice::from_raw_parts(blobs[0], 16) }.to_vec();
    let second = unsafe { std::slice::from_raw_parts(blobs[1], 16) }.to_vec();
    assert_eq!(first, second);
    for (h, blob) in handles.iter().zip(blobs) {
        nprim_blob_free(blob, 16);
        assert_eq!(nprim_generator_destroy(*h), OK);
    }
}

#[test]
fn generator_zero_length_blob_is_null() {
    let mut h = 0u64;
    assert_eq!(nprim_generator_create(1, 1, &mut h), OK);
    let mut blob = std::ptr::NonNull::<u8>::dangling().as_ptr();
    assert_eq!(nprim_generator_random_blob(h, 0, &mut blob), OK);
    assert!(blob.is_null());
    assert_eq!(nprim_generator_destroy(h), OK);
}

#[test]
fn backend_name_is_known() {
    let name = unsafe { std::ffi::CStr::from_ptr(nprim_backend_name()) };
    let name = name.to_str().unwrap();
    assert!(["scalar", "avx", "neon"].contains(&name), "unexpected backend {name}");
}

proptest! {
    #[test]
    fn ffi_abs_matches_scalar_kernels(mut data in arb_f64_vec(64)) {
        let mut expected = data.clone();
        BatchKernels::scalar().abs_in_place(&mut expected);
        prop_assert_eq!(nprim_batch_abs_double(data.as_mut_ptr(), data.len() as i64), OK);
        prop_assert_eq!(bits(&data), bits(&expected));
    }

    #[test]
    fn ffi_add_matches_scalar_kernels((a, b) in arb_f64_pair(64)) {
        let mut expected = vec![0.0; a.len()];
        BatchKernels::scalar().add(&a, &b, &mut expected).unwrap();
        let mut out = vec![0.0; a.len()];
        prop_assert_eq!(
            nprim_batch_add_double(a.as_ptr(), b.as_ptr(), out.as_mut_ptr(), a.len() as i64),
            OK
        );
        prop_assert_eq!(canonical_bits(&out), canonical_bits(&expected));
    }
}
