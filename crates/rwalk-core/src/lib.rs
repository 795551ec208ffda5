//! Random walks on the integer lattice.
//!
//! Three step policies are provided (unrestricted, non-reversing and self-avoiding), all driven by
//! a pluggable [`RandomSource`]. The self-avoiding policy can either abandon on the first
//! self-intersection or unwind the tail of its path with a bounded-lookahead conflict probe.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod backtrack;
pub mod config;
pub mod error;
pub mod geometry;
pub mod path;
pub mod rng;
pub mod sink;
pub mod stats;
pub mod walk;

pub use backtrack::{Aggregation, ConflictProbe, DEFAULT_SIGHT};
pub use config::{GeneratorConfig, SimulationConfig, StatsConfig};
pub use error::{ParamError, WalkError};
pub use geometry::{available_directions, distance, opposite, towards, Direction, Point};
pub use path::PathHistory;
pub use rng::{NativeSource, OneTermGenerator, ParamValue, RandomSource, TwoTermGenerator};
pub use sink::{
    event_channel, ChannelSink, EventReceiver, NullSink, StepEvent, StepMode, StepSink, VecSink,
};
pub use stats::{average_distance, sweep, DistanceSample, SweepRow};
pub use walk::{
    non_reversing_walk, random_walk, self_avoiding_walk, AbandonReason, WalkKind, WalkOptions,
    WalkOutcome, Walker,
};
