//! A* search over the waypoint set.
//!
//! Every pair of waypoints is a candidate link; a link exists when no obstacle blocks it. Link
//! cost is the Euclidean length and the heuristic is the Manhattan distance to the goal. The open
//! set is a binary heap ordered on `f = g + h` alone, so equal scores come out in heap order.

use crate::waypoints::{GOAL, START};
use sextant_geom::{Point, Rect, RectExt, manhattan};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    f: f64,
    node: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: `BinaryHeap` is a max-heap.
        other.f.total_cmp(&self.f)
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Whether the router may walk straight from `a` to `b`.
///
/// Horizontal and vertical links are always tested. Diagonal links are tested only when
/// `check_diagonals` is set and are otherwise taken as clear.
pub fn reachable(a: Point, b: Point, obstacles: &[Rect], check_diagonals: bool) -> bool {
    let axis_aligned = a.x == b.x || a.y == b.y;
    if !axis_aligned && !check_diagonals {
        return true;
    }
    !obstacles.iter().any(|o| o.blocks_segment(a, b))
}

/// Searches from `waypoints[START]` towards `waypoints[GOAL]`.
///
/// Stops at the first dequeued waypoint within `goal_radius` of the goal and returns the route to
/// it, with the exact goal appended when that waypoint is not the goal itself. Returns `None`
/// when the open set runs dry.
pub fn search(
    waypoints: &[Point],
    obstacles: &[Rect],
    goal_radius: f64,
    check_diagonals: bool,
) -> Option<Vec<Point>> {
    let n = waypoints.len();
    if n <= GOAL {
        return None;
    }
    let goal = waypoints[GOAL];

    let mut g = vec![f64::INFINITY; n];
    let mut parent = vec![usize::MAX; n];
    let mut closed = vec![false; n];
    let mut open = BinaryHeap::new();

    g[START] = 0.0;
    open.push(OpenEntry {
        f: manhattan(waypoints[START], goal),
        node: START,
    });

    let mut expanded = 0usize;
    while let Some(OpenEntry { node, .. }) = open.pop() {
        if closed[node] {
            continue;
        }
        closed[node] = true;
        expanded += 1;

        let here = waypoints[node];
        if (here - goal).length() <= goal_radius {
            tracing::trace!(expanded, waypoints = n, "route found");
            let mut route = Vec::new();
            let mut cur = node;
            while cur != usize::MAX {
                route.push(waypoints[cur]);
                cur = parent[cur];
            }
            route.reverse();
            if route.last() != Some(&goal) {
                route.push(goal);
            }
            return Some(route);
        }

        for next in 0..n {
            if closed[next] || next == node {
                continue;
            }
            let there = waypoints[next];
            if !reachable(here, there, obstacles, check_diagonals) {
                continue;
            }
            let candidate = g[node] + (there - here).length();
            if candidate < g[next] {
                g[next] = candidate;
                parent[next] = node;
                open.push(OpenEntry {
                    f: candidate + manhattan(there, goal),
                    node: next,
                });
            }
        }
    }

    tracing::trace!(expanded, waypoints = n, "open set exhausted");
    None
}
