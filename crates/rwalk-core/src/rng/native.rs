use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::RandomSource;

/// Uniform selection backed by `rand`; used when no modular generator is configured.
#[derive(Debug, Clone)]
pub struct NativeSource {
    rng: StdRng,
}

impl NativeSource {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible stream, handy for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for NativeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for NativeSource {
    fn generate(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}
