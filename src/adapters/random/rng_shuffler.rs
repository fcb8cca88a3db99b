//! Shuffler backed by `rand`.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::ports::Shuffler;

/// Uniform Fisher-Yates shuffles from a `StdRng`.
///
/// Use [`RngShuffler::seeded`] for reproducible games.
#[derive(Debug)]
pub struct RngShuffler {
    rng: Mutex<StdRng>,
}

impl RngShuffler {
    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic sequence of permutations for `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Picks the seeded or entropy constructor.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl Shuffler for RngShuffler {
    fn shuffle(&self, indices: &mut [usize]) {
        // A poisoned RNG is still a valid RNG.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        indices.shuffle(&mut *rng);
    }
}
