//! Single source of randomness for question selection, distractor sampling
//! and option ordering.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Wraps an RNG so every random draw in a session goes through one place.
#[derive(Debug, Clone)]
pub struct Sampler<R = ChaCha8Rng> {
    rng: R,
}

impl Sampler<ChaCha8Rng> {
    /// Deterministic sampler; the same seed replays the same sessions.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Sampler seeded from OS entropy. Returns the seed so it can be logged.
    pub fn from_entropy() -> (Self, u64) {
        let seed: u64 = rand::random();
        (Self::seeded(seed), seed)
    }
}

impl<R: Rng> Sampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// `amount` distinct indices from `0..len`, in random order.
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..len).collect();
        let (picked, _) = indices.partial_shuffle(&mut self.rng, amount.min(len));
        picked.to_vec()
    }

    /// Every index of `0..len` except `excluded`, in random order.
    pub fn shuffled_indices_except(&mut self, len: usize, excluded: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..len).filter(|&i| i != excluded).collect();
        indices.shuffle(&mut self.rng);
        indices
    }

    /// Unweighted coin flip.
    pub fn coin_flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}
