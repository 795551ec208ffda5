use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A point of the integer lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Translates the point by `step` lattice units along `direction`.
    ///
    /// North/South change `y`, East/West change `x`. Panics if the result leaves the `i64`
    /// lattice; see [`Point::reaches`].
    pub fn moved(self, direction: Direction, step: i64) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx * step,
            y: self.y + dy * step,
        }
    }

    /// Whether every point within `radius` lattice steps along either axis is representable.
    pub fn reaches(self, radius: u64) -> bool {
        let Ok(radius) = i64::try_from(radius) else {
            return false;
        };
        [self.x, self.y]
            .iter()
            .all(|c| c.checked_add(radius).is_some() && c.checked_sub(radius).is_some())
    }

    /// The four grid-adjacent points, in direction order.
    pub fn neighbors(self) -> [Point; 4] {
        Direction::ALL.map(|d| self.moved(d, 1))
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Fixed order for determinism: N, E, S, W. Direction picking indexes into it.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    const fn delta(self) -> (i64, i64) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

/// Opposite of an optional direction; no direction stays no direction.
pub fn opposite(direction: Option<Direction>) -> Option<Direction> {
    direction.map(Direction::opposite)
}

/// Direction from `from` to `to`.
///
/// The x offset is checked before the y offset, so only grid-adjacent points get an exact
/// answer. Returns `None` when both points are equal.
pub fn towards(from: Point, to: Point) -> Option<Direction> {
    match (to.x.cmp(&from.x), to.y.cmp(&from.y)) {
        (Ordering::Greater, _) => Some(Direction::East),
        (Ordering::Less, _) => Some(Direction::West),
        (_, Ordering::Greater) => Some(Direction::North),
        (_, Ordering::Less) => Some(Direction::South),
        (Ordering::Equal, Ordering::Equal) => None,
    }
}

pub fn distance(a: Point, b: Point) -> f64 {
    let dx = a.x as f64 - b.x as f64;
    let dy = a.y as f64 - b.y as f64;
    dx.hypot(dy)
}

/// The four directions minus `forbidden`, keeping N, E, S, W order.
pub fn available_directions(forbidden: Option<Direction>) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|d| Some(*d) != forbidden)
        .collect()
}
