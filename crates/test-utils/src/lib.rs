//! Test-only helpers: an [`ArbitraryGenerator`] drawing instances out of a
//! pre-filled pool of OS entropy, plus chain builders for settlement tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use arbitrary::{Arbitrary, Unstructured};
use rand::{rngs::OsRng, RngCore};

pub mod chain;

/// Enough entropy that a test never drains the pool mid-generate.
const ENTROPY_LEN: usize = 1 << 20;

pub struct ArbitraryGenerator {
    entropy: Vec<u8>,
    cursor: AtomicUsize,
}

impl Default for ArbitraryGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ArbitraryGenerator {
    pub fn new() -> Self {
        Self::with_pool_size(ENTROPY_LEN)
    }

    pub fn with_pool_size(n: usize) -> Self {
        let mut entropy = vec![0; n];
        OsRng.fill_bytes(&mut entropy);
        ArbitraryGenerator {
            entropy,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Draws a fresh instance, advancing the cursor past the bytes consumed.
    /// Racing callers may read overlapping windows; harmless in tests.
    pub fn generate<'a, T: Arbitrary<'a>>(&'a self) -> T {
        let start = self.cursor.load(Ordering::Relaxed);
        let mut u = Unstructured::new(&self.entropy[start..]);
        let before = u.len();
        let inst = T::arbitrary(&mut u).expect("testutils: generate arbitrary");
        self.cursor
            .store(start + (before - u.len()), Ordering::Relaxed);
        inst
    }
}
