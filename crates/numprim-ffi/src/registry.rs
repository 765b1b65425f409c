//! Generators created over the C ABI, keyed by handle.
//!
//! Handles come from a counter that starts at 1 and only moves forward, so
//! a destroyed handle is never handed out again and `0` is never valid.
//! Each entry keeps the seed it was created with, so a host can log it and
//! replay the stream later.

use std::collections::BTreeMap;

use numprim::Generator;

struct Registered {
    generator: Generator,
    seed: Option<u64>,
}

pub(crate) struct GeneratorRegistry {
    next_handle: u64,
    live: BTreeMap<u64, Registered>,
}

impl GeneratorRegistry {
    pub(crate) const fn new() -> Self {
        Self {
            next_handle: 1,
            live: BTreeMap::new(),
        }
    }

    /// Create a generator from `seed`, or from entropy when `None`.
    ///
    /// Returns `None` only once every `u64` handle has been used.
    pub(crate) fn register(&mut self, seed: Option<u64>) -> Option<u64> {
        let handle = self.next_handle;
        self.next_handle = handle.checked_add(1)?;
        let generator = match seed {
            Some(seed) => Generator::from_seed(seed),
            None => Generator::from_entropy(),
        };
        self.live.insert(handle, Registered { generator, seed });
        Some(handle)
    }

    pub(crate) fn generator_mut(&mut self, handle: u64) -> Option<&mut Generator> {
        self.live.get_mut(&handle).map(|entry| &mut entry.generator)
    }

    /// The creation seed: `Some(None)` for an entropy-seeded generator,
    /// `None` for an unknown handle.
    pub(crate) fn seed(&self, handle: u64) -> Option<Option<u64>> {
        self.live.get(&handle).map(|entry| entry.seed)
    }

    pub(crate) fn unregister(&mut self, handle: u64) -> bool {
        self.live.remove(&handle).is_some()
    }
}
