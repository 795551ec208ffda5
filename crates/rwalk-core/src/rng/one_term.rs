use super::{accepted, check_param, unit, ParamValue, RandomSource, DEFAULT_MODULUS};
use crate::error::ParamError;

pub const DEFAULT_MULTIPLIER: u64 = 16_807;
pub const DEFAULT_SEED: u64 = 10;

/// Prime modulus multiplicative linear congruential generator (Lehmer).
///
/// `seed <- multiplier * seed mod modulus`, yielding `seed / modulus`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneTermGenerator {
    modulus: u64,
    multiplier: u64,
    seed: u64,
}

impl Default for OneTermGenerator {
    fn default() -> Self {
        Self {
            modulus: DEFAULT_MODULUS,
            multiplier: DEFAULT_MULTIPLIER,
            seed: DEFAULT_SEED,
        }
    }
}

impl OneTermGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a generator from explicit parameters.
    ///
    /// Requires `0 < multiplier < modulus` and `0 < seed < modulus`.
    pub fn with_params(modulus: u64, multiplier: u64, seed: u64) -> Result<Self, ParamError> {
        let modulus = check_param("modulus", modulus, 2, u64::MAX)?;
        let multiplier = check_param("multiplier", multiplier, 1, modulus - 1)?;
        let seed = check_param("seed", seed, 1, modulus - 1)?;
        Ok(Self {
            modulus,
            multiplier,
            seed,
        })
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    pub fn multiplier(&self) -> u64 {
        self.multiplier
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Accepts a modulus that is positive and above the current seed.
    pub fn change_modulus(&mut self, value: impl ParamValue) -> bool {
        accepted(
            check_param("modulus", value, self.seed + 1, u64::MAX)
                .map(|m| self.modulus = m),
        )
    }

    /// Accepts a positive multiplier strictly below the *current* multiplier.
    pub fn change_multiplier(&mut self, value: impl ParamValue) -> bool {
        // Once the multiplier is 1 the range is empty and everything is refused.
        accepted(
            check_param("multiplier", value, 1, self.multiplier - 1)
                .map(|a| self.multiplier = a),
        )
    }

    /// Accepts a positive seed strictly below the modulus.
    pub fn change_seed(&mut self, value: impl ParamValue) -> bool {
        accepted(check_param("seed", value, 1, self.modulus - 1).map(|s| self.seed = s))
    }
}

impl RandomSource for OneTermGenerator {
    fn generate(&mut self) -> f64 {
        let next = (u128::from(self.multiplier) * u128::from(self.seed)) % u128::from(self.modulus);
        self.seed = next as u64;
        unit(self.seed, self.modulus)
    }
}
