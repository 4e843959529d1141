use crate::domain::ports::RandomSource;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// `RandomSource` backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<ChaCha8Rng> {
    /// Same seed, same questions. Used by tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn int_in_range(&mut self, low: i64, high: i64) -> i64 {
        self.rng.gen_range(low..=high)
    }

    fn pick_index(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }
}
