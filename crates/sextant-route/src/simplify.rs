//! Path post-processing: collinear removal, greedy orthogonal smoothing and Douglas-Peucker.

use sextant_geom::{Point, Rect, RectExt, point};

const COLLINEAR_EPSILON: f64 = 1e-9;

fn clear(a: Point, b: Point, obstacles: &[Rect]) -> bool {
    !obstacles.iter().any(|o| o.blocks_segment(a, b))
}

/// Drops repeated points and interior points lying on the line through their neighbours.
pub fn remove_collinear(points: &[Point]) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len());
    for &p in points {
        if out.last() == Some(&p) {
            continue;
        }
        if out.len() >= 2 {
            let a = out[out.len() - 2];
            let b = out[out.len() - 1];
            if (b - a).cross(p - b).abs() <= COLLINEAR_EPSILON {
                out.pop();
            }
        }
        out.push(p);
    }
    out
}

/// Greedily shortcuts `points` through one-bend orthogonal detours.
///
/// From each point the farthest later point reachable through a clear horizontal-then-vertical or
/// vertical-then-horizontal detour is taken next. The bend is emitted unless the straight segment
/// is clear as well. When no detour works the next point is taken as-is.
pub fn smooth(points: &[Point], obstacles: &[Rect]) -> Vec<Point> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    let mut out = vec![first];
    let last = points.len() - 1;
    let mut i = 0;
    while i < last {
        let a = points[i];
        let mut advanced = false;
        for j in (i + 1..=last).rev() {
            let b = points[j];
            let bends = [point(b.x, a.y), point(a.x, b.y)];
            let Some(bend) = bends
                .into_iter()
                .find(|&c| clear(a, c, obstacles) && clear(c, b, obstacles))
            else {
                continue;
            };
            if !clear(a, b, obstacles) && bend != a && bend != b {
                out.push(bend);
            }
            out.push(b);
            i = j;
            advanced = true;
            break;
        }
        if !advanced {
            i += 1;
            out.push(points[i]);
        }
    }
    out
}

/// Douglas-Peucker simplification. Endpoints are always kept.
pub fn douglas_peucker(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;
    mark(points, 0, points.len() - 1, tolerance, &mut keep);
    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}

fn mark(points: &[Point], lo: usize, hi: usize, tolerance: f64, keep: &mut [bool]) {
    if hi <= lo + 1 {
        return;
    }
    let (a, b) = (points[lo], points[hi]);
    let mut best = (lo, 0.0f64);
    for (k, p) in points.iter().enumerate().take(hi).skip(lo + 1) {
        let d = distance_to_line(*p, a, b);
        if d > best.1 {
            best = (k, d);
        }
    }
    if best.1 > tolerance {
        keep[best.0] = true;
        mark(points, lo, best.0, tolerance, keep);
        mark(points, best.0, hi, tolerance, keep);
    }
}

fn distance_to_line(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len = ab.length();
    if len == 0.0 {
        return (p - a).length();
    }
    ab.cross(p - a).abs() / len
}

/// Collinear removal followed by Douglas-Peucker.
pub fn simplify_path(points: &[Point], tolerance: f64) -> Vec<Point> {
    douglas_peucker(&remove_collinear(points), tolerance)
}

/// Full post-processing of a raw search result.
///
/// Falls back to the smoothed path when Douglas-Peucker would cut through an obstacle.
pub(crate) fn post_process(raw: &[Point], obstacles: &[Rect], tolerance: f64) -> Vec<Point> {
    let smoothed = remove_collinear(&smooth(&remove_collinear(raw), obstacles));
    let simplified = douglas_peucker(&smoothed, tolerance);
    let blocked = simplified.windows(2).any(|w| !clear(w[0], w[1], obstacles));
    let mut out = if blocked { smoothed } else { simplified };
    if out.len() < 2 {
        if let (Some(&s), Some(&e)) = (raw.first(), raw.last()) {
            out = vec![s, e];
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sextant_geom::rect;

    #[test]
    fn remove_collinear_drops_straight_runs_and_duplicates() {
        let pts = [
            point(0.0, 0.0),
            point(10.0, 0.0),
            point(10.0, 0.0),
            point(20.0, 0.0),
            point(20.0, 10.0),
        ];
        assert_eq!(
            remove_collinear(&pts),
            vec![point(0.0, 0.0), point(20.0, 0.0), point(20.0, 10.0)]
        );
    }

    #[test]
    fn smooth_collapses_a_staircase_into_one_bend() {
        let pts = [
            point(0.0, 0.0),
            point(10.0, 0.0),
            point(10.0, 10.0),
            point(20.0, 10.0),
            point(20.0, 20.0),
        ];
        let obstacle = rect(2.0, 6.0, 6.0, 12.0);
        let out = smooth(&pts, &[obstacle]);
        assert_eq!(out, vec![point(0.0, 0.0), point(20.0, 0.0), point(20.0, 20.0)]);
    }

    #[test]
    fn smooth_jumps_straight_when_the_diagonal_is_clear() {
        let pts = [point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)];
        assert_eq!(smooth(&pts, &[]), vec![point(0.0, 0.0), point(10.0, 10.0)]);
    }

    #[test]
    fn douglas_peucker_keeps_the_peak() {
        let pts = [point(0.0, 0.0), point(5.0, 2.0), point(10.0, 5.0), point(20.0, 0.0)];
        assert_eq!(
            douglas_peucker(&pts, 1.0),
            vec![point(0.0, 0.0), point(10.0, 5.0), point(20.0, 0.0)]
        );
    }
}
