//! Random integers and byte blobs.
//!
//! [`Generator`] is an explicit ChaCha8 instance: callers own it, seed it
//! for reproducible tests, or seed it from entropy. The free functions
//! [`random`], [`random_blob`] and [`reseed_thread`] draw from a
//! thread-local generator instead of a process-wide one, so concurrent
//! callers never share unsynchronized state.
//!
//! Thread generators start from `NUMPRIM_SEED` when it is set (see
//! [`Generator::from_env`]); every thread then replays the same sequence
//! from its first draw, independent of scheduling.
//!
//! Blob allocation goes through `Vec::try_reserve_exact`. An allocation
//! failure is reported the same way as a non-positive size: `None`.

use std::cell::RefCell;

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config;

thread_local! {
    /// Generator for the calling thread, created on first use.
    static THREAD_GENERATOR: RefCell<Generator> = RefCell::new(Generator::from_env());
}

/// A seedable source of 64-bit random draws.
#[derive(Clone, Debug)]
pub struct Generator {
    rng: ChaCha8Rng,
}

impl Generator {
    /// Seed from the operating system's entropy (via `rand`'s thread RNG).
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random::<u64>())
    }

    /// Seed from `NUMPRIM_SEED` when it is set and valid, otherwise from
    /// entropy. The variable is read once per process.
    pub fn from_env() -> Self {
        match config::process_seed() {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    /// Seed deterministically. Identical seeds produce identical sequences.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Next raw draw, reinterpreted as a signed integer.
    pub fn next_i64(&mut self) -> i64 {
        self.rng.next_u64() as i64
    }

    /// `n` random bytes, or `None` if `n <= 0` or the allocation fails.
    ///
    /// Each byte is the low 8 bits of its own draw; draws are not batched,
    /// so a blob of `n` bytes advances the generator by exactly `n` steps.
    pub fn random_blob(&mut self, n: i64) -> Option<Vec<u8>> {
        let (mut buf, len) = allocate(n)?;
        for _ in 0..len {
            buf.push((self.rng.next_u64() & 0xFF) as u8);
        }
        Some(buf)
    }
}

/// Reserve room for exactly `n` bytes, or `None` for `n <= 0` or
/// allocation failure. Returns the empty buffer and its target length.
fn allocate(n: i64) -> Option<(Vec<u8>, usize)> {
    if n <= 0 {
        return None;
    }
    let len = usize::try_from(n).ok()?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).ok()?;
    Some((buf, len))
}

/// `n` zero bytes, or `None` if `n <= 0` or the allocation fails.
pub fn zero_blob(n: i64) -> Option<Vec<u8>> {
    let (mut buf, len) = allocate(n)?;
    buf.resize(len, 0);
    Some(buf)
}

/// Next draw from the calling thread's generator.
pub fn random() -> i64 {
    THREAD_GENERATOR.with(|g| g.borrow_mut().next_i64())
}

/// Random blob from the calling thread's generator.
pub fn random_blob(n: i64) -> Option<Vec<u8>> {
    THREAD_GENERATOR.with(|g| g.borrow_mut().random_blob(n))
}

/// Replace the calling thread's generator with a seeded one.
///
/// Other threads are unaffected.
pub fn reseed_thread(seed: u64) {
    THREAD_GENERATOR.with(|g| *g.borrow_mut() = Generator::from_seed(seed));
}
