use std::collections::HashMap;

use crate::geometry::{towards, Direction, Point};

/// Ordered, duplicate-free history of a self-avoiding walk.
///
/// The start point is always the first entry and is never removed. Each point maps to its
/// position so read-only prefixes of the history can be probed without copying.
#[derive(Debug, Clone)]
pub struct PathHistory {
    points: Vec<Point>,
    index: HashMap<Point, usize>,
}

impl PathHistory {
    pub fn new(start: Point) -> Self {
        let mut index = HashMap::new();
        index.insert(start, 0);
        Self {
            points: vec![start],
            index,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a history holds at least its start point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Accepted steps, i.e. points beyond the start.
    pub fn steps(&self) -> usize {
        self.points.len() - 1
    }

    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn tail(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    pub fn contains(&self, point: Point) -> bool {
        self.index.contains_key(&point)
    }

    /// Appends `point`; refuses duplicates.
    pub fn push(&mut self, point: Point) -> bool {
        if self.index.contains_key(&point) {
            return false;
        }
        self.index.insert(point, self.points.len());
        self.points.push(point);
        true
    }

    /// Removes the tail, unless only the start point remains.
    pub fn pop(&mut self) -> Option<Point> {
        if self.points.len() <= 1 {
            return None;
        }
        let point = self.points.pop()?;
        self.index.remove(&point);
        Some(point)
    }

    /// Direction from the tail back to the point before it.
    pub fn coming_from(&self) -> Option<Direction> {
        self.view().coming_from()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn view(&self) -> PathView<'_> {
        PathView {
            history: self,
            len: self.points.len(),
        }
    }

    /// The first `len` points, clamped to `1..=self.len()`.
    pub fn prefix(&self, len: usize) -> PathView<'_> {
        PathView {
            history: self,
            len: len.clamp(1, self.points.len()),
        }
    }
}

/// A read-only prefix of a [`PathHistory`].
#[derive(Debug, Clone, Copy)]
pub struct PathView<'a> {
    history: &'a PathHistory,
    len: usize,
}

impl<'a> PathView<'a> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn tail(&self) -> Point {
        self.history.points[self.len - 1]
    }

    pub fn contains(&self, point: Point) -> bool {
        self.history
            .index
            .get(&point)
            .is_some_and(|&i| i < self.len)
    }

    pub fn coming_from(&self) -> Option<Direction> {
        if self.len < 2 {
            return None;
        }
        let points = &self.history.points;
        towards(points[self.len - 1], points[self.len - 2])
    }
}
