//! Explicit generator handles.
//!
//! For hosts that want reproducible or isolated random streams instead of
//! the per-thread generator: create a handle (seeded or from entropy),
//! draw from it, destroy it. All generators live in one registry; its lock
//! is held for the lookup and the draw. Destroyed handles are never
//! reissued, so a stale handle always reports `InvalidHandle`.

use std::sync::Mutex;

use crate::random::into_raw_blob;
use crate::registry::GeneratorRegistry;
use crate::status::NprimStatus;

static GENERATORS: Mutex<GeneratorRegistry> = Mutex::new(GeneratorRegistry::new());

/// Create a generator and write its handle to `handle_out`.
///
/// With `seeded != 0` the generator is seeded from `seed` and its
/// sequence is reproducible; otherwise it is seeded from entropy and
/// `seed` is ignored. Returns `AllocationFailed` if the handle space is
/// exhausted.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_generator_create(seed: u64, seeded: u8, handle_out: *mut u64) -> i32 {
    ffi_guard!({
        if handle_out.is_null() {
            return NprimStatus::InvalidArgument as i32;
        }
        let seed = (seeded != 0).then_some(seed);
        let Some(handle) = ffi_lock!(GENERATORS).register(seed) else {
            return NprimStatus::AllocationFailed as i32;
        };
        // SAFETY: handle_out is non-null and valid per caller contract.
        unsafe { *handle_out = handle };
        NprimStatus::Ok as i32
    })
}

/// Destroy a generator. Destroying twice returns `InvalidHandle`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_generator_destroy(handle: u64) -> i32 {
    ffi_guard!({
        if ffi_lock!(GENERATORS).unregister(handle) {
            NprimStatus::Ok as i32
        } else {
            NprimStatus::InvalidHandle as i32
        }
    })
}

/// Report how a generator was created.
///
/// Writes `1` to `seeded_out` and the seed to `seed_out` for a seeded
/// generator; writes `0` to both for an entropy-seeded one.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_generator_seed(
    handle: u64,
    seed_out: *mut u64,
    seeded_out: *mut u8,
) -> i32 {
    ffi_guard!({
        if seed_out.is_null() || seeded_out.is_null() {
            return NprimStatus::InvalidArgument as i32;
        }
        let Some(seed) = ffi_lock!(GENERATORS).seed(handle) else {
            return NprimStatus::InvalidHandle as i32;
        };
        // SAFETY: both pointers are non-null and valid per caller contract.
        unsafe {
            *seed_out = seed.unwrap_or(0);
            *seeded_out = u8::from(seed.is_some());
        }
        NprimStatus::Ok as i32
    })
}

/// Write the generator's next signed draw to `value_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_generator_next(handle: u64, value_out: *mut i64) -> i32 {
    ffi_guard!({
        if value_out.is_null() {
            return NprimStatus::InvalidArgument as i32;
        }
        let mut registry = ffi_lock!(GENERATORS);
        let Some(generator) = registry.generator_mut(handle) else {
            return NprimStatus::InvalidHandle as i32;
        };
        let value = generator.next_i64();
        // SAFETY: value_out is non-null and valid per caller contract.
        unsafe { *value_out = value };
        NprimStatus::Ok as i32
    })
}

/// Allocate `n` random bytes from the generator and write the blob
/// pointer to `blob_out`.
///
/// `n <= 0` writes null and returns `Ok`. Allocation failure writes null
/// and returns `AllocationFailed`. Free the blob with
/// [`nprim_blob_free`](crate::random::nprim_blob_free).
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn nprim_generator_random_blob(handle: u64, n: i64, blob_out: *mut *mut u8) -> i32 {
    ffi_guard!({
        if blob_out.is_null() {
            return NprimStatus::InvalidArgument as i32;
        }
        // SAFETY: blob_out is non-null and valid per caller contract.
        unsafe { *blob_out = std::ptr::null_mut() };
        let mut registry = ffi_lock!(GENERATORS);
        let Some(generator) = registry.generator_mut(handle) else {
            return NprimStatus::InvalidHandle as i32;
        };
        if n <= 0 {
            return NprimStatus::Ok as i32;
        }
        match generator.random_blob(n) {
            Some(bytes) => {
                // SAFETY: as above.
                unsafe { *blob_out = into_raw_blob(bytes) };
                NprimStatus::Ok as i32
            }
            None => NprimStatus::AllocationFailed as i32,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use numprim::Generator;

    #[test]
    fn seeded_generators_agree() {
        let mut a = 0u64;
        let mut b = 0u64;
        assert_eq!(nprim_generator_create(3, 1, &mut a), 0);
        assert_eq!(nprim_generator_create(3, 1, &mut b), 0);
        assert_ne!(a, b);
        let (mut x, mut y) = (0i64, 0i64);
        assert_eq!(nprim_generator_next(a, &mut x), 0);
        assert_eq!(nprim_generator_next(b, &mut y), 0);
        assert_eq!(x, y);
        assert_eq!(x, Generator::from_seed(3).next_i64());
        assert_eq!(nprim_generator_destroy(a), 0);
        assert_eq!(nprim_generator_destroy(b), 0);
    }

    #[test]
    fn destroyed_handle_is_rejected() {
        let mut h = 0u64;
        assert_eq!(nprim_generator_create(0, 0, &mut h), 0);
        assert_eq!(nprim_generator_destroy(h), 0);
        let mut v = 0i64;
        assert_eq!(nprim_generator_next(h, &mut v), NprimStatus::InvalidHandle as i32);
        assert_eq!(nprim_generator_destroy(h), NprimStatus::InvalidHandle as i32);
    }

    #[test]
    fn seed_is_reported_for_replay() {
        let (mut seeded, mut entropy) = (0u64, 0u64);
        assert_eq!(nprim_generator_create(41, 1, &mut seeded), 0);
        assert_eq!(nprim_generator_create(41, 0, &mut entropy), 0);

        let (mut seed, mut flag) = (0u64, 0u8);
        assert_eq!(nprim_generator_seed(seeded, &mut seed, &mut flag), 0);
        assert_eq!((seed, flag), (41, 1));
        assert_eq!(nprim_generator_seed(entropy, &mut seed, &mut flag), 0);
        assert_eq!((seed, flag), (0, 0));

        assert_eq!(nprim_generator_destroy(seeded), 0);
        assert_eq!(
            nprim_generator_seed(seeded, &mut seed, &mut flag),
            NprimStatus::InvalidHandle as i32
        );
        assert_eq!(nprim_generator_destroy(entropy), 0);
    }

    #[test]
    fn null_out_pointers_are_invalid_arguments() {
        let invalid = NprimStatus::InvalidArgument as i32;
        assert_eq!(nprim_generator_create(0, 1, std::ptr::null_mut()), invalid);
        assert_eq!(nprim_generator_next(0, std::ptr::null_mut()), invalid);
        assert_eq!(nprim_generator_random_blob(0, 4, std::ptr::null_mut()), invalid);
        let mut flag = 0u8;
        assert_eq!(nprim_generator_seed(0, std::ptr::null_mut(), &mut flag), invalid);
    }
}
