//! Pseudo-random sources that drive direction choices.
//!
//! None of these are cryptographic. The two modular generators are fully reproducible from their
//! parameters; [`NativeSource`] is the default when no generator is configured.

mod native;
pub mod one_term;
pub mod two_term;

pub use native::NativeSource;
pub use one_term::OneTermGenerator;
pub use two_term::TwoTermGenerator;

use crate::error::ParamError;

pub const DEFAULT_MODULUS: u64 = 2_147_483_647;

/// Largest `f64` strictly below 1.0.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

pub trait RandomSource {
    /// Next value in `[0, 1)`. Always advances the source.
    fn generate(&mut self) -> f64;

    /// Uniform index in `0..len`, derived from [`generate`](Self::generate).
    fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "cannot pick from an empty set");
        let idx = (self.generate() * len as f64) as usize;
        idx.min(len.saturating_sub(1))
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn generate(&mut self) -> f64 {
        (**self).generate()
    }

    fn pick_index(&mut self, len: usize) -> usize {
        (**self).pick_index(len)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn generate(&mut self) -> f64 {
        (**self).generate()
    }

    fn pick_index(&mut self, len: usize) -> usize {
        (**self).pick_index(len)
    }
}

/// Anything a generator setter accepts: integer types, or text holding a decimal integer.
pub trait ParamValue {
    fn to_param(self) -> Option<i128>;
}

macro_rules! int_param {
    ($($t:ty),*) => {
        $(
            impl ParamValue for $t {
                fn to_param(self) -> Option<i128> {
                    i128::try_from(self).ok()
                }
            }
        )*
    };
}

int_param!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl ParamValue for &str {
    fn to_param(self) -> Option<i128> {
        self.trim().parse().ok()
    }
}

impl ParamValue for String {
    fn to_param(self) -> Option<i128> {
        self.as_str().to_param()
    }
}

impl ParamValue for &String {
    fn to_param(self) -> Option<i128> {
        self.as_str().to_param()
    }
}

/// Converts `value` and checks `min <= value <= max`.
pub(crate) fn check_param(
    field: &'static str,
    value: impl ParamValue,
    min: u64,
    max: u64,
) -> Result<u64, ParamError> {
    let value = value
        .to_param()
        .ok_or(ParamError::NotAnInteger { field })?;
    if value < i128::from(min) || value > i128::from(max) {
        return Err(ParamError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(value as u64)
}

/// Collapses a setter result into the boolean contract, logging the refusal.
pub(crate) fn accepted(result: Result<(), ParamError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(error = %err, "Rejected generator parameter");
            false
        }
    }
}

/// `term / modulus`, kept strictly below 1.0 even when the division rounds up.
pub(crate) fn unit(term: u64, modulus: u64) -> f64 {
    (term as f64 / modulus as f64).min(BELOW_ONE)
}
