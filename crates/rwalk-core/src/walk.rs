//! Walk engine: unrestricted, non-reversing and self-avoiding step policies.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::backtrack::ConflictProbe;
use crate::error::WalkError;
use crate::geometry::{available_directions, opposite, Direction, Point};
use crate::path::PathHistory;
use crate::rng::RandomSource;
use crate::sink::{StepEvent, StepSink};

pub const DEFAULT_MAX_BACKTRACKS: u64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkKind {
    #[default]
    Random,
    NonReversing,
    SelfAvoiding,
}

impl WalkKind {
    pub const ALL: [WalkKind; 3] = [
        WalkKind::Random,
        WalkKind::NonReversing,
        WalkKind::SelfAvoiding,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WalkKind::Random => "random",
            WalkKind::NonReversing => "non_reversing",
            WalkKind::SelfAvoiding => "self_avoiding",
        }
    }
}

impl fmt::Display for WalkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbandonReason {
    /// The walk ran into itself and backtracking is off.
    Collision,
    /// Backtracking was needed more often than [`WalkOptions::max_backtracks`] allows.
    BacktrackLimit,
}

/// How a walk ended. Abandonment is an expected outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkOutcome {
    Arrived(Point),
    Abandoned(AbandonReason),
}

impl WalkOutcome {
    pub fn arrival(self) -> Option<Point> {
        match self {
            WalkOutcome::Arrived(p) => Some(p),
            WalkOutcome::Abandoned(_) => None,
        }
    }

    pub fn is_abandoned(self) -> bool {
        matches!(self, WalkOutcome::Abandoned(_))
    }
}

/// Self-avoiding walk settings; the other policies ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    pub backtrack: bool,
    pub probe: ConflictProbe,
    /// Cap on backtracking episodes per walk; `None` means unbounded.
    pub max_backtracks: Option<u64>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            backtrack: false,
            probe: ConflictProbe::default(),
            max_backtracks: Some(DEFAULT_MAX_BACKTRACKS),
        }
    }
}

impl WalkOptions {
    pub fn with_backtrack(mut self, backtrack: bool) -> Self {
        self.backtrack = backtrack;
        self
    }

    pub fn with_probe(mut self, probe: ConflictProbe) -> Self {
        self.probe = probe;
        self
    }

    pub fn with_max_backtracks(mut self, max: Option<u64>) -> Self {
        self.max_backtracks = max;
        self
    }
}

/// A walk policy plus its options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Walker {
    pub kind: WalkKind,
    pub options: WalkOptions,
}

impl Walker {
    pub fn new(kind: WalkKind, options: WalkOptions) -> Self {
        Self { kind, options }
    }

    pub fn run<K, R>(
        &self,
        start: Point,
        nb_steps: usize,
        sink: &mut K,
        source: &mut R,
    ) -> WalkOutcome
    where
        K: StepSink + ?Sized,
        R: RandomSource + ?Sized,
    {
        match self.kind {
            WalkKind::Random => WalkOutcome::Arrived(random_walk(start, nb_steps, sink, source)),
            WalkKind::NonReversing => {
                WalkOutcome::Arrived(non_reversing_walk(start, nb_steps, sink, source))
            }
            WalkKind::SelfAvoiding => {
                self_avoiding_walk(start, nb_steps, &self.options, sink, source)
            }
        }
    }

    /// Validates a step count from untyped input.
    ///
    /// The walk, plus the probe's lookahead when backtracking, must stay on the `i64` lattice.
    pub fn check(&self, start: Point, nb_steps: i64) -> Result<usize, WalkError> {
        let steps = usize::try_from(nb_steps).map_err(|_| WalkError::NegativeSteps(nb_steps))?;
        let lookahead = match self.kind {
            WalkKind::SelfAvoiding if self.options.backtrack => {
                u64::from(self.options.probe.sight())
            }
            _ => 0,
        };
        let reach = u64::try_from(steps)
            .unwrap_or(u64::MAX)
            .saturating_add(lookahead);
        if !start.reaches(reach) {
            return Err(WalkError::OutOfReach { start, reach });
        }
        Ok(steps)
    }

    /// Like [`run`](Self::run), for step counts coming from untyped input.
    pub fn run_checked<K, R>(
        &self,
        start: Point,
        nb_steps: i64,
        sink: &mut K,
        source: &mut R,
    ) -> Result<WalkOutcome, WalkError>
    where
        K: StepSink + ?Sized,
        R: RandomSource + ?Sized,
    {
        let nb_steps = self.check(start, nb_steps)?;
        Ok(self.run(start, nb_steps, sink, source))
    }
}

fn pick_direction<R>(forbidden: Option<Direction>, source: &mut R) -> Direction
where
    R: RandomSource + ?Sized,
{
    let directions = available_directions(forbidden);
    directions[source.pick_index(directions.len())]
}

/// Each step picks uniformly among all four directions.
pub fn random_walk<K, R>(start: Point, nb_steps: usize, sink: &mut K, source: &mut R) -> Point
where
    K: StepSink + ?Sized,
    R: RandomSource + ?Sized,
{
    let mut point = start;
    for _ in 0..nb_steps {
        let direction = pick_direction(None, source);
        point = point.moved(direction, 1);
        sink.emit(StepEvent::forward(direction));
    }
    point
}

/// Like [`random_walk`], but a step never undoes the one before it.
pub fn non_reversing_walk<K, R>(
    start: Point,
    nb_steps: usize,
    sink: &mut K,
    source: &mut R,
) -> Point
where
    K: StepSink + ?Sized,
    R: RandomSource + ?Sized,
{
    let mut point = start;
    let mut previous: Option<Direction> = None;
    for _ in 0..nb_steps {
        let direction = pick_direction(opposite(previous), source);
        point = point.moved(direction, 1);
        previous = Some(direction);
        sink.emit(StepEvent::forward(direction));
    }
    point
}

/// A non-reversing walk that never revisits a point.
///
/// Without backtracking the first collision abandons the walk; restarting instead of continuing
/// with fewer choices keeps averages over many walks unbiased. With backtracking the path tail is
/// unwound until the conflict probe sees no collision ahead, and the walk carries on from there.
pub fn self_avoiding_walk<K, R>(
    start: Point,
    nb_steps: usize,
    options: &WalkOptions,
    sink: &mut K,
    source: &mut R,
) -> WalkOutcome
where
    K: StepSink + ?Sized,
    R: RandomSource + ?Sized,
{
    let mut path = PathHistory::new(start);
    let mut point = start;
    let mut previous: Option<Direction> = None;
    let mut accepted: usize = 0;
    let mut backtracks: u64 = 0;

    while accepted < nb_steps {
        let direction = pick_direction(opposite(previous), source);
        let candidate = point.moved(direction, 1);

        if path.push(candidate) {
            accepted += 1;
            point = candidate;
            previous = Some(direction);
            sink.emit(StepEvent::forward(direction));
            continue;
        }

        if !options.backtrack {
            tracing::debug!(steps = accepted, point = %candidate, "Walk collided, abandoning");
            return WalkOutcome::Abandoned(AbandonReason::Collision);
        }

        if options.max_backtracks.is_some_and(|max| backtracks >= max) {
            tracing::warn!(
                backtracks = backtracks,
                steps = accepted,
                "Backtrack limit reached, abandoning"
            );
            return WalkOutcome::Abandoned(AbandonReason::BacktrackLimit);
        }
        backtracks += 1;

        let unwind = options.probe.resolve(&path);
        for _ in 0..unwind.removed {
            let back = path.coming_from();
            path.pop();
            if let Some(back) = back {
                sink.emit(StepEvent::backward(back));
            }
        }
        accepted -= unwind.removed;
        debug_assert_eq!(accepted, path.steps());

        tracing::trace!(
            removed = unwind.removed,
            steps = accepted,
            tail = %path.tail(),
            "Backtracked"
        );

        point = path.tail();
        previous = unwind.direction;
    }

    WalkOutcome::Arrived(point)
}
