//! Deterministic simulation-level RNG wrapper.
//!
//! Used by drivers that populate a world (scattering mobs and players) so
//! that runs with the same seed are reproducible.  The alert engine itself
//! makes no random decisions.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seeded RNG for scattering mobs and players across a world.
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

    /// Choose a random element from a slice.  `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
