//! Injectable randomness.
//!
//! Every draw made by the simulator, the scoring engine and the ability
//! resolver goes through a single [`RandomSource`] owned by the simulator.
//! Production code uses [`SeededRandom`] (`ChaCha8`); tests substitute a
//! scripted source to force exact outcomes.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform random values.
///
/// Only [`next_f64`](RandomSource::next_f64) is required; the other methods
/// derive from it and may be overridden with better-distributed versions.
pub trait RandomSource {
    /// Returns a uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Draws once and returns true when the draw is `<= probability`.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() <= probability
    }

    /// Uniformly picks an index in `0..len`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    fn pick_index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot pick from an empty slice");
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let idx = (self.next_f64() * len as f64) as usize;
        idx.min(len - 1)
    }

    /// Fair coin flip.
    fn coin_flip(&mut self) -> bool {
        self.next_f64() < 0.5
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }

    fn chance(&mut self, probability: f64) -> bool {
        (**self).chance(probability)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        (**self).pick_index(len)
    }

    fn coin_flip(&mut self) -> bool {
        (**self).coin_flip()
    }
}

/// Deterministic `ChaCha8` source that remembers its seed for replay.
///
/// # Example
///
/// ```
/// use prehazovana_core::rng::{RandomSource, SeededRandom};
///
/// let mut a = SeededRandom::new(42);
/// let mut b = SeededRandom::new(42);
/// assert_eq!(a.next_f64(), b.next_f64());
/// assert_eq!(a.seed(), 42);
/// ```
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
    seed: u64,
}

impl SeededRandom {
    /// Creates a source from a fixed seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates a source seeded from OS entropy; the drawn seed is kept so
    /// the match can be replayed.
    #[must_use]
    pub fn from_entropy() -> Self {
        let seed = rand::thread_rng().gen();
        Self::new(seed)
    }

    /// Creates a seeded source, or an entropy-seeded one when `seed` is `None`.
    #[must_use]
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// The seed this source was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rewinds the source to its initial state.
    pub fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen()
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn coin_flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}
