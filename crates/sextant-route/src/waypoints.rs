//! Candidate waypoint generation.
//!
//! The search graph's vertices are the start and end points, the corners of every obstacle pushed
//! outward by one grid unit, and a sparse grid (two grid units apart) covering the start/end box
//! plus a margin. Index 0 is always the start and index 1 the end. Callers must pass finite
//! coordinates. Without a positive grid only the start and end are returned.

use crate::options::RouterOptions;
use sextant_geom::{Point, Rect, RectExt, point};

pub const START: usize = 0;
pub const GOAL: usize = 1;

/// Past this many grid points the grid step doubles until the grid fits.
pub const MAX_GRID_WAYPOINTS: f64 = 4096.0;

pub fn search_box(start: Point, end: Point, margin: f64) -> Rect {
    Rect::from_points([start, end]).inflate(margin, margin)
}

pub fn generate(start: Point, end: Point, obstacles: &[Rect], options: &RouterOptions) -> Vec<Point> {
    let grid = options.grid_size;
    if !(grid.is_finite() && grid > 0.0) {
        return vec![start, end];
    }
    let bounds = search_box(start, end, options.search_margin);
    let inside_any = |p: Point| obstacles.iter().any(|o| o.contains_interior(p));

    let mut points = vec![start, end];

    for o in obstacles {
        let corners = [
            point(o.min.x - grid, o.min.y - grid),
            point(o.max.x + grid, o.min.y - grid),
            point(o.max.x + grid, o.max.y + grid),
            point(o.min.x - grid, o.max.y + grid),
        ];
        for c in corners {
            if bounds.contains_closed(c) && !inside_any(c) {
                points.push(c);
            }
        }
    }

    // Aligned to multiples of the step so neighbouring requests share grid lines.
    let mut step = grid * 2.0;
    while (bounds.width() / step + 1.0) * (bounds.height() / step + 1.0) > MAX_GRID_WAYPOINTS {
        step *= 2.0;
    }
    let x0 = (bounds.min.x / step).ceil() * step;
    let y0 = (bounds.min.y / step).ceil() * step;
    let cols = ((bounds.max.x - x0) / step).floor().max(-1.0) as i64 + 1;
    let rows = ((bounds.max.y - y0) / step).floor().max(-1.0) as i64 + 1;
    for row in 0..rows {
        let y = y0 + row as f64 * step;
        for col in 0..cols {
            let p = point(x0 + col as f64 * step, y);
            if inside_any(p) || (p - start).length() <= grid || (p - end).length() <= grid {
                continue;
            }
            points.push(p);
        }
    }

    points
}
