//! Deterministic RNG wrapper for scenario generation.
//!
//! The tick itself is deterministic and draws no random numbers.  Randomness
//! only enters when a driver scatters agents or waypoints, and it goes
//! through `SimRng` so a seed fully reproduces the starting population.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::GridPos;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded simulation-level RNG.
///
/// Used only in single-threaded contexts.  If parallel randomness is ever
/// needed, derive one child per worker with [`SimRng::child`].
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform cell in the inclusive rectangle `[min, max]`.
    ///
    /// # Panics
    /// Panics if `min` is not component-wise `<= max`.
    pub fn cell_in(&mut self, min: GridPos, max: GridPos) -> GridPos {
        GridPos::new(
            self.0.gen_range(min.x..=max.x),
            self.0.gen_range(min.y..=max.y),
        )
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates).
    #[inline]
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }
}
