use super::{accepted, check_param, unit, ParamValue, RandomSource, DEFAULT_MODULUS};
use crate::error::ParamError;

pub const DEFAULT_MULTIPLIER_N2: u64 = 1_583_458_089;
pub const DEFAULT_MULTIPLIER_N1: u64 = 784_588_716;
pub const DEFAULT_SEED_N2: u64 = 10;
pub const DEFAULT_SEED_N1: u64 = 10;

/// Linear recursive generator over the two previous terms.
///
/// `s(n) = a(n-2) * s(n-2) + a(n-1) * s(n-1) mod modulus`, yielding `s(n) / modulus`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoTermGenerator {
    modulus: u64,
    multiplier_n2: u64,
    multiplier_n1: u64,
    seed_n2: u64,
    seed_n1: u64,
}

impl Default for TwoTermGenerator {
    fn default() -> Self {
        Self {
            modulus: DEFAULT_MODULUS,
            multiplier_n2: DEFAULT_MULTIPLIER_N2,
            multiplier_n1: DEFAULT_MULTIPLIER_N1,
            seed_n2: DEFAULT_SEED_N2,
            seed_n1: DEFAULT_SEED_N1,
        }
    }
}

impl TwoTermGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a generator from explicit parameters; every multiplier and term must lie in
    /// `1..modulus`.
    pub fn with_params(
        modulus: u64,
        multipliers: (u64, u64),
        seeds: (u64, u64),
    ) -> Result<Self, ParamError> {
        let modulus = check_param("modulus", modulus, 2, u64::MAX)?;
        let top = modulus - 1;
        Ok(Self {
            modulus,
            multiplier_n2: check_param("multiplier_n2", multipliers.0, 1, top)?,
            multiplier_n1: check_param("multiplier_n1", multipliers.1, 1, top)?,
            seed_n2: check_param("seed_n2", seeds.0, 1, top)?,
            seed_n1: check_param("seed_n1", seeds.1, 1, top)?,
        })
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// `(a(n-2), a(n-1))`.
    pub fn multipliers(&self) -> (u64, u64) {
        (self.multiplier_n2, self.multiplier_n1)
    }

    /// `(s(n-2), s(n-1))`.
    pub fn seeds(&self) -> (u64, u64) {
        (self.seed_n2, self.seed_n1)
    }

    /// Accepts a modulus above both recurrence terms.
    pub fn change_modulus(&mut self, value: impl ParamValue) -> bool {
        let min = self.seed_n2.max(self.seed_n1) + 1;
        accepted(check_param("modulus", value, min, u64::MAX).map(|m| self.modulus = m))
    }

    pub fn change_multiplier_n2(&mut self, value: impl ParamValue) -> bool {
        accepted(
            check_param("multiplier_n2", value, 1, self.modulus - 1)
                .map(|a| self.multiplier_n2 = a),
        )
    }

    pub fn change_multiplier_n1(&mut self, value: impl ParamValue) -> bool {
        accepted(
            check_param("multiplier_n1", value, 1, self.modulus - 1)
                .map(|a| self.multiplier_n1 = a),
        )
    }

    pub fn change_seed_n2(&mut self, value: impl ParamValue) -> bool {
        accepted(check_param("seed_n2", value, 1, self.modulus - 1).map(|s| self.seed_n2 = s))
    }

    pub fn change_seed_n1(&mut self, value: impl ParamValue) -> bool {
        accepted(check_param("seed_n1", value, 1, self.modulus - 1).map(|s| self.seed_n1 = s))
    }
}

impl RandomSource for TwoTermGenerator {
    fn generate(&mut self) -> f64 {
        let m = u128::from(self.modulus);
        // Reduce each product first so the sum cannot overflow.
        let lhs = u128::from(self.multiplier_n2) * u128::from(self.seed_n2) % m;
        let rhs = u128::from(self.multiplier_n1) * u128::from(self.seed_n1) % m;
        let next = ((lhs + rhs) % m) as u64;
        self.seed_n2 = self.seed_n1;
        self.seed_n1 = next;
        unit(next, self.modulus)
    }
}
