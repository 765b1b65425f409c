//! C FFI bindings for the numprim numeric primitives.
//!
//! Exposes a flat `nprim_*` function table for host programs. Scalar
//! functions return their result directly; batch functions and explicit
//! generator handles report [`NprimStatus`](status::NprimStatus) codes.
//! No panic crosses the C boundary: every entry point runs inside
//! `ffi_guard!`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

/// Run `$body` under `catch_unwind`, returning `$fallback` on panic.
///
/// `return` inside the body returns from the guarded closure, so early
/// exits behave as they would in the enclosing function.
macro_rules! ffi_guard {
    ($fallback:expr, $body:block) => {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $body)) {
            Ok(value) => value,
            Err(_) => {
                log::error!("numprim-ffi: panic caught at C boundary");
                $fallback
            }
        }
    };
    ($body:block) => {
        ffi_guard!($crate::status::NprimStatus::Panicked as i32, $body)
    };
}

/// Lock a mutex, returning `InternalError` from the enclosing guarded
/// closure if it is poisoned.
macro_rules! ffi_lock {
    ($mutex:expr) => {
        match $mutex.lock() {
            Ok(guard) => guard,
            Err(_) => return $crate::status::NprimStatus::InternalError as i32,
        }
    };
}

pub mod batch;
pub mod generator;
pub mod random;
pub(crate) mod registry;
pub mod scalar;
pub mod status;

pub use status::NprimStatus;
