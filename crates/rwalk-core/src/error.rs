use thiserror::Error;

use crate::geometry::Point;

/// Why a generator parameter was refused.
///
/// Setters swallow this into a `false` return; validated constructors surface it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("{field}: value is not an integer")]
    NotAnInteger { field: &'static str },

    #[error("{field}: {value} must be in {min}..{max}")]
    OutOfRange {
        field: &'static str,
        value: i128,
        min: u64,
        max: u64,
    },
}

/// Precondition violations caught at the walk boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkError {
    #[error("step count must be non-negative, got {0}")]
    NegativeSteps(i64),

    #[error("a walk reaching {reach} steps from {start} leaves the i64 lattice")]
    OutOfReach { start: Point, reach: u64 },

    #[error("conflict probe sight must be at least 1")]
    ZeroSight,

    #[error("statistics need at least one walk per step count")]
    NoWalks,

    #[error("sweep stride must be at least 1")]
    ZeroStride,
}
