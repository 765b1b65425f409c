//! Random integers and blobs for C callers.
//!
//! Draws come from the calling thread's generator (see
//! [`numprim::random`]), so concurrent C threads never race on shared
//! generator state.
//!
//! Blobs are allocated by the Rust global allocator and handed to the
//! caller, who owns them from then on and must release them with
//! [`nprim_blob_free`], passing the same length. Passing a blob to C
//! `free()` is undefined behavior.

use numprim::random;

/// Leak a byte vector to C as a raw pointer to exactly `len` bytes.
pub(crate) fn into_raw_blob(bytes: Vec<u8>) -> *mut u8 {
    Box::into_raw(bytes.into_boxed_slice()) as *mut u8
}

/// Next signed 64-bit draw from this thread's generator.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_random() -> i64 {
    ffi_guard!(0, { random::random() })
}

/// Reseed this thread's generator. Other threads are unaffected.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_reseed(seed: u64) {
    ffi_guard!((), { random::reseed_thread(seed) })
}

/// Allocate `n` random bytes.
///
/// Returns null when `n <= 0` or the allocation fails; the caller tells
/// the two apart by the size it asked for.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_random_blob(n: i64) -> *mut u8 {
    ffi_guard!(std::ptr::null_mut(), {
        random::random_blob(n).map_or(std::ptr::null_mut(), into_raw_blob)
    })
}

/// Allocate `n` zero bytes. Null when `n <= 0` or the allocation fails.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_zero_blob(n: i64) -> *mut u8 {
    ffi_guard!(std::ptr::null_mut(), {
        random::zero_blob(n).map_or(std::ptr::null_mut(), into_raw_blob)
    })
}

/// Release a blob returned by this library. Null is a no-op.
///
/// `n` must be the size the blob was requested with.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_blob_free(blob: *mut u8, n: i64) {
    ffi_guard!((), {
        if blob.is_null() || n <= 0 {
            return;
        }
        let slice = std::ptr::slice_from_raw_parts_mut(blob, n as usize);
        // SAFETY: blob came from `into_raw_blob` with exactly n bytes, per
        // caller contract, and is released only once.
        drop(unsafe { Box::from_raw(slice) });
    })
}
