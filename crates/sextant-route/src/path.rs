//! Polyline values returned by the router, plus free-standing path utilities.

use serde::{Deserialize, Serialize};
use sextant_geom::{Point, Rect, RectExt, point};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathRequest {
    pub start: Point,
    pub end: Point,
    #[serde(default)]
    pub obstacles: Vec<Rect>,
}

impl PathRequest {
    pub fn new(start: Point, end: Point, obstacles: Vec<Rect>) -> Self {
        Self {
            start,
            end,
            obstacles,
        }
    }
}

/// An ordered polyline from a request's start to its end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    points: Vec<Point>,
}

impl Path {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// The two-point segment used when no routed path exists.
    pub fn direct(start: Point, end: Point) -> Self {
        Self::new(vec![start, end])
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn length(&self) -> f64 {
        path_length(&self.points)
    }

    pub fn to_orthogonal(&self) -> Path {
        Path::new(force_orthogonal(&self.points))
    }

    /// Whether an obstacle blocks the first or the last segment.
    pub(crate) fn end_segments_blocked(&self, obstacles: &[Rect]) -> bool {
        let n = self.points.len();
        if n < 2 {
            return false;
        }
        [(0, 1), (n - 2, n - 1)].into_iter().any(|(i, j)| {
            obstacles
                .iter()
                .any(|o| o.blocks_segment(self.points[i], self.points[j]))
        })
    }

    /// Moves the first and last points onto `start` / `end`.
    pub(crate) fn pin_endpoints(&mut self, start: Point, end: Point) {
        if let Some(first) = self.points.first_mut() {
            *first = start;
        }
        if let Some(last) = self.points.last_mut() {
            *last = end;
        }
    }
}

pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| (w[1] - w[0]).length()).sum()
}

/// Replaces every diagonal segment with two axis-aligned legs.
///
/// The first leg runs along the axis with the larger displacement.
pub fn force_orthogonal(points: &[Point]) -> Vec<Point> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(points.len() * 2);
    out.push(first);
    for w in points.windows(2) {
        let (a, b) = (w[0], w[1]);
        let (dx, dy) = ((b.x - a.x).abs(), (b.y - a.y).abs());
        if dx > 0.0 && dy > 0.0 {
            let bend = if dx >= dy {
                point(b.x, a.y)
            } else {
                point(a.x, b.y)
            };
            out.push(bend);
        }
        out.push(b);
    }
    out
}
