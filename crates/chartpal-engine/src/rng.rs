//! Seeded pseudo-random numbers.
//!
//! Palette generation must be reproducible: the same request with the same
//! seed has to produce the same colors, because shared links replay a
//! generation from its inputs. All "randomness" in the engine (synthesis
//! jitter, near-tie breaking, repetition order) is drawn from a
//! [`SeededRng`] built from the request seed, never from global state.

/// A small 64-bit linear congruential generator.
///
/// Not suitable for anything security-related; it only needs to be fast,
/// well-spread over `[0, 1)` and stable across platforms.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u64,
}

const MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const INCREMENT: u64 = 1_442_695_040_888_963_407;

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        let mut rng = Self {
            state: seed.wrapping_add(INCREMENT),
        };
        // Discard the first output so nearby seeds diverge immediately.
        rng.next_u64();
        rng
    }

    /// Derives an independent stream for a sub-task (e.g. one per mode).
    pub fn fork(&self, salt: u64) -> Self {
        Self::new(self.state ^ salt.wrapping_mul(MULTIPLIER))
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        // The low bits of an LCG are weak; fold the high half down.
        let x = self.state;
        x ^ (x >> 29)
    }

    /// Uniform float in `[0.0, 1.0)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform float in `[-1.0, 1.0)`.
    pub fn next_signed(&mut self) -> f64 {
        self.next_f64() * 2.0 - 1.0
    }

    /// Uniform float in `[lo, hi)`.
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Uniform index in `0..len`. Returns 0 for an empty range.
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.next_f64() * len as f64) as usize % len
    }

    /// Fisher–Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }
}
