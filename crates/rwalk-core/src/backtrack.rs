//! Bounded-lookahead conflict detection for self-avoiding walks.
//!
//! The probe looks at most `sight` steps ahead of the path tail. It is deliberately approximate:
//! it can miss traps deeper than its sight and can flag open regions in dense configurations.

use serde::{Deserialize, Serialize};

use crate::error::WalkError;
use crate::geometry::{available_directions, opposite, Direction, Point};
use crate::path::{PathHistory, PathView};

pub const DEFAULT_SIGHT: u32 = 2;

/// How conflicts found beyond the first step are combined across sibling branches.
///
/// A neighbour of the probed point that is already on the path is a conflict under every rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Only direct neighbours count; deeper levels never report a conflict, whatever the sight.
    #[default]
    FirstLevel,
    /// A deeper conflict counts only when every branch conflicts (the point is a dead-end pocket).
    All,
    /// Any branch that meets the path within sight is a conflict.
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictProbe {
    sight: u32,
    aggregation: Aggregation,
}

impl Default for ConflictProbe {
    fn default() -> Self {
        Self {
            sight: DEFAULT_SIGHT,
            aggregation: Aggregation::default(),
        }
    }
}

/// Result of [`ConflictProbe::resolve`]: how far to unwind and where the walk now points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unwind {
    /// Trailing points to remove.
    pub removed: usize,
    /// Direction of the last step into the new tail, `None` once back at the start.
    pub direction: Option<Direction>,
}

impl ConflictProbe {
    pub fn new(sight: u32, aggregation: Aggregation) -> Result<Self, WalkError> {
        if sight == 0 {
            return Err(WalkError::ZeroSight);
        }
        Ok(Self { sight, aggregation })
    }

    pub fn sight(&self) -> u32 {
        self.sight
    }

    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    /// Whether continuing from `point` may run into `path` within sight.
    ///
    /// `coming_from` is excluded from the first level so the previous point is not counted.
    pub fn conflicts(
        &self,
        path: &PathView<'_>,
        point: Point,
        coming_from: Option<Direction>,
    ) -> bool {
        self.probe(path, point, self.sight, coming_from)
    }

    fn probe(
        &self,
        path: &PathView<'_>,
        point: Point,
        depth: u32,
        exclude: Option<Direction>,
    ) -> bool {
        if depth == 0 {
            return false;
        }
        let directions = available_directions(exclude);
        if directions.iter().any(|d| path.contains(point.moved(*d, 1))) {
            return true;
        }
        if depth == 1 || self.aggregation == Aggregation::FirstLevel {
            return false;
        }
        let mut branches = directions
            .iter()
            .map(|d| self.probe(path, point.moved(*d, 1), depth - 1, Some(d.opposite())));
        match self.aggregation {
            Aggregation::All => branches.all(|c| c),
            Aggregation::Any => branches.any(|c| c),
            Aggregation::FirstLevel => false,
        }
    }

    /// Plans how many tail points must go before no conflict is in sight.
    ///
    /// Reads `path` only; the caller performs the removal. The start point is never removed.
    pub fn resolve(&self, path: &PathHistory) -> Unwind {
        let mut len = path.len();
        loop {
            let view = path.prefix(len);
            let coming_from = view.coming_from();
            if len > 1 && self.conflicts(&view, view.tail(), coming_from) {
                len -= 1;
                continue;
            }
            return Unwind {
                removed: path.len() - len,
                direction: opposite(coming_from),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_of(points: &[(i64, i64)]) -> PathHistory {
        let mut iter = points.iter().map(|&p| Point::from(p));
        let mut path = PathHistory::new(iter.next().expect("non-empty"));
        for p in iter {
            assert!(path.push(p));
        }
        path
    }

    #[test]
    fn straight_line_has_no_conflict() {
        let path = path_of(&[(0, 0), (1, 0), (2, 0), (3, 0)]);
        for aggregation in [Aggregation::FirstLevel, Aggregation::All, Aggregation::Any] {
            let probe = ConflictProbe::new(2, aggregation).unwrap();
            assert_eq!(
                probe.resolve(&path),
                Unwind {
                    removed: 0,
                    direction: Some(Direction::East)
                }
            );
        }
    }

    #[test]
    fn adjacent_history_forces_unwind() {
        // A U-turn: the tail (0, 1) touches the start.
        let path = path_of(&[(0, 0), (1, 0), (1, 1), (0, 1)]);
        let unwind = ConflictProbe::default().resolve(&path);
        assert_eq!(unwind.removed, 1);
        assert_eq!(unwind.direction, Some(Direction::North));
    }

    #[test]
    fn any_sees_further_than_all() {
        // Tail (2, 0) heads east; (1, 1) is two steps away via the north neighbour.
        let path = path_of(&[(1, 1), (0, 1), (0, 0), (1, 0), (2, 0)]);
        let view = path.view();
        let tail = view.tail();
        let coming_from = view.coming_from();

        let any = ConflictProbe::new(2, Aggregation::Any).unwrap();
        let all = ConflictProbe::new(2, Aggregation::All).unwrap();
        let shallow = ConflictProbe::new(1, Aggregation::Any).unwrap();

        assert!(any.conflicts(&view, tail, coming_from));
        assert!(!all.conflicts(&view, tail, coming_from));
        assert!(!shallow.conflicts(&view, tail, coming_from));
    }

    // Tail (0, 0) came up from (0, -1); its free neighbours each lead back into the path.
    const POCKET: [(i64, i64); 11] = [
        (-1, 1),
        (-1, 2),
        (0, 2),
        (1, 2),
        (1, 1),
        (2, 1),
        (2, 0),
        (2, -1),
        (1, -1),
        (0, -1),
        (0, 0),
    ];

    #[test]
    fn first_level_ignores_dead_end_pockets() {
        let path = path_of(&POCKET);
        let view = path.view();
        let first_level = ConflictProbe::default();
        assert_eq!(first_level.aggregation(), Aggregation::FirstLevel);

        assert!(!first_level.conflicts(&view, view.tail(), view.coming_from()));
        assert_eq!(
            first_level.resolve(&path),
            Unwind {
                removed: 0,
                direction: Some(Direction::North)
            }
        );

        let all = ConflictProbe::new(2, Aggregation::All).unwrap();
        assert!(all.conflicts(&view, view.tail(), view.coming_from()));
        assert_eq!(
            all.resolve(&path),
            Unwind {
                removed: 1,
                direction: Some(Direction::West)
            }
        );
    }

    #[test]
    fn first_level_matches_a_single_step_of_sight() {
        let paths = [
            path_of(&POCKET),
            path_of(&[(0, 0), (1, 0), (1, 1), (0, 1)]),
            path_of(&[(1, 1), (0, 1), (0, 0), (1, 0), (2, 0)]),
            path_of(&[(0, 0), (1, 0), (2, 0), (3, 0)]),
        ];
        let single = ConflictProbe::new(1, Aggregation::Any).unwrap();
        for sight in [1, 2, 5] {
            let first_level = ConflictProbe::new(sight, Aggregation::FirstLevel).unwrap();
            for path in &paths {
                for len in 1..=path.len() {
                    let view = path.prefix(len);
                    let tail = view.tail();
                    let coming_from = view.coming_from();
                    assert_eq!(
                        first_level.conflicts(&view, tail, coming_from),
                        single.conflicts(&view, tail, coming_from),
                        "sight {sight}, prefix {len}"
                    );
                }
                assert_eq!(first_level.resolve(path), single.resolve(path));
            }
        }
    }

    #[test]
    fn unwinding_can_reach_the_start() {
        // Every prefix tail of this hook sees the start within three steps.
        let path = path_of(&[(0, 0), (1, 0), (1, 1), (0, 1)]);
        let probe = ConflictProbe::new(3, Aggregation::Any).unwrap();
        assert_eq!(
            probe.resolve(&path),
            Unwind {
                removed: 3,
                direction: None
            }
        );
    }

    #[test]
    fn zero_sight_is_rejected() {
        assert_eq!(
            ConflictProbe::new(0, Aggregation::All),
            Err(WalkError::ZeroSight)
        );
    }
}
