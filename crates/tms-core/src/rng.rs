//! Deterministic simulation-level RNG.
//!
//! The whole model runs on one thread, so a single `SmallRng` seeded from
//! `SimConfig::seed` is enough.  Identical seeds and identical inputs give
//! identical runs.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG for exogenous inputs such as synthetic congestion.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
