//! Batch statistics over many walks (end-to-end distance).

use serde::Serialize;

use crate::error::WalkError;
use crate::geometry::{distance, Point};
use crate::rng::RandomSource;
use crate::sink::NullSink;
use crate::walk::{WalkKind, WalkOptions, Walker};

/// End-to-end distance over `walks` successful walks of `nb_steps` steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistanceSample {
    pub nb_steps: usize,
    pub walks: usize,
    /// Walks thrown away and retried.
    pub abandoned: u64,
    pub mean_distance: f64,
    /// Mean of `distance²`.
    pub mean_square_distance: f64,
    /// `mean_distance²`.
    pub squared_mean_distance: f64,
}

/// Runs `walker` until `nb_walks` walks from `start` have arrived, retrying abandoned ones.
///
/// There is no retry cap: a self-avoiding walker without backtracking can take a very long time
/// for large step counts.
pub fn average_distance<R: RandomSource + ?Sized>(
    walker: &Walker,
    start: Point,
    nb_steps: usize,
    nb_walks: usize,
    source: &mut R,
) -> Result<DistanceSample, WalkError> {
    if nb_walks == 0 {
        return Err(WalkError::NoWalks);
    }

    let mut abandoned = 0u64;
    let mut total = 0.0;
    let mut total_square = 0.0;
    for _ in 0..nb_walks {
        let arrival = loop {
            match walker.run(start, nb_steps, &mut NullSink, source).arrival() {
                Some(p) => break p,
                None => abandoned += 1,
            }
        };
        let d = distance(start, arrival);
        total += d;
        total_square += d * d;
    }

    let n = nb_walks as f64;
    let mean_distance = total / n;
    Ok(DistanceSample {
        nb_steps,
        walks: nb_walks,
        abandoned,
        mean_distance,
        mean_square_distance: total_square / n,
        squared_mean_distance: mean_distance * mean_distance,
    })
}

/// One step count of a [`sweep`], with a sample per walk kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepRow {
    pub nb_steps: usize,
    pub random: DistanceSample,
    pub non_reversing: DistanceSample,
    pub self_avoiding: DistanceSample,
}

/// Samples every walk kind at step counts `0, stride, 2 * stride, ...` up to `max_steps`.
pub fn sweep<R: RandomSource + ?Sized>(
    options: &WalkOptions,
    max_steps: usize,
    stride: usize,
    nb_walks: usize,
    source: &mut R,
) -> Result<Vec<SweepRow>, WalkError> {
    if stride == 0 {
        return Err(WalkError::ZeroStride);
    }

    let start = Point::ORIGIN;
    let walker = |kind| Walker::new(kind, *options);
    let mut rows = Vec::with_capacity(max_steps / stride + 1);
    for nb_steps in (0..=max_steps).step_by(stride) {
        tracing::info!(nb_steps, nb_walks, "Sampling walks");
        rows.push(SweepRow {
            nb_steps,
            random: average_distance(&walker(WalkKind::Random), start, nb_steps, nb_walks, source)?,
            non_reversing: average_distance(
                &walker(WalkKind::NonReversing),
                start,
                nb_steps,
                nb_walks,
                source,
            )?,
            self_avoiding: average_distance(
                &walker(WalkKind::SelfAvoiding),
                start,
                nb_steps,
                nb_walks,
                source,
            )?,
        });
    }
    Ok(rows)
}
