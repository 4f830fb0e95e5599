#![forbid(unsafe_code)]

//! Geometry primitives shared by the `sextant` engines.
//!
//! Coordinates are canvas units with y growing downwards. Rectangles are stored as min/max boxes;
//! use [`rect`] to build one from an origin and a size.

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;
pub type Size = euclid::Size2D<f64, Unit>;
pub type Rect = euclid::Box2D<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

/// Builds a rectangle from its top-left corner and size.
pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Rect {
    Rect::new(point(x, y), point(x + width, y + height))
}

/// Builds a rectangle of the given size centered on `center`.
pub fn rect_around(center: Point, width: f64, height: f64) -> Rect {
    let (hw, hh) = (width / 2.0, height / 2.0);
    Rect::new(point(center.x - hw, center.y - hh), point(center.x + hw, center.y + hh))
}

/// Overlap length below which a segment is considered to merely touch a rectangle.
pub const SEGMENT_EPSILON: f64 = 1e-9;

pub fn manhattan(a: Point, b: Point) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Inclusive/exclusive containment and intersection tests.
///
/// `euclid`'s own `Box2D` predicates treat zero-area boxes as empty and use half-open bounds,
/// which drops point-sized items and boundary contacts. Hit-testing wants closed rectangles and
/// routing wants "shares a stretch with" semantics, so both are spelled out here.
pub trait RectExt {
    /// Closed-rectangle overlap (touching edges count).
    fn overlaps(&self, other: &Rect) -> bool;
    /// `other` lies entirely within `self` (boundaries included).
    fn encloses(&self, other: &Rect) -> bool;
    fn contains_closed(&self, p: Point) -> bool;
    /// `p` lies strictly inside (not on the boundary).
    fn contains_interior(&self, p: Point) -> bool;
    /// Whether the segment `a`-`b` shares a stretch of positive length with the closed
    /// rectangle: crossing the interior or running along an edge. Touching a single boundary
    /// point (a corner, or an endpoint sitting on an edge) does not count.
    fn blocks_segment(&self, a: Point, b: Point) -> bool;
    fn union_with(&self, other: &Rect) -> Rect;
}

impl RectExt for Rect {
    fn overlaps(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    fn encloses(&self, other: &Rect) -> bool {
        self.min.x <= other.min.x
            && other.max.x <= self.max.x
            && self.min.y <= other.min.y
            && other.max.y <= self.max.y
    }

    fn contains_closed(&self, p: Point) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }

    fn contains_interior(&self, p: Point) -> bool {
        self.min.x < p.x && p.x < self.max.x && self.min.y < p.y && p.y < self.max.y
    }

    fn blocks_segment(&self, a: Point, b: Point) -> bool {
        // Liang-Barsky clip against the closed box.
        let d = b - a;
        let mut t0: f64 = 0.0;
        let mut t1: f64 = 1.0;
        for (p, q) in [
            (-d.x, a.x - self.min.x),
            (d.x, self.max.x - a.x),
            (-d.y, a.y - self.min.y),
            (d.y, self.max.y - a.y),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return false;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return false;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return false;
                }
                t1 = t1.min(r);
            }
        }
        (t1 - t0) * d.length() > SEGMENT_EPSILON
    }

    fn union_with(&self, other: &Rect) -> Rect {
        Rect::new(
            point(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            point(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlaps_counts_touching_edges() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&rect(10.0, 0.0, 5.0, 5.0)));
        assert!(!a.overlaps(&rect(10.5, 0.0, 5.0, 5.0)));
        // Point-sized boxes are not treated as empty.
        assert!(a.overlaps(&rect(5.0, 5.0, 0.0, 0.0)));
    }

    #[test]
    fn encloses_includes_boundary() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.encloses(&a));
        assert!(a.encloses(&rect(2.0, 2.0, 0.0, 0.0)));
        assert!(!a.encloses(&rect(-1.0, 2.0, 3.0, 3.0)));
    }

    #[test]
    fn segment_through_the_middle_is_blocked() {
        let r = rect(80.0, -20.0, 40.0, 40.0);
        assert!(r.blocks_segment(point(0.0, 0.0), point(200.0, 0.0)));
        assert!(r.blocks_segment(point(0.0, -30.0), point(200.0, 30.0)));
    }

    #[test]
    fn segment_along_an_edge_is_blocked() {
        let r = rect(80.0, -20.0, 40.0, 40.0);
        assert!(r.blocks_segment(point(0.0, -20.0), point(200.0, -20.0)));
        assert!(r.blocks_segment(point(80.0, -40.0), point(80.0, 40.0)));
    }

    #[test]
    fn touching_or_missing_segments_are_not_blocked() {
        let r = rect(80.0, -20.0, 40.0, 40.0);
        assert!(!r.blocks_segment(point(0.0, -30.0), point(200.0, -30.0)));
        assert!(!r.blocks_segment(point(0.0, 0.0), point(50.0, 0.0)));
        // Ends on the left edge.
        assert!(!r.blocks_segment(point(0.0, 0.0), point(80.0, 0.0)));
        // Grazes the top-left corner only.
        assert!(!r.blocks_segment(point(60.0, 0.0), point(100.0, -40.0)));
    }

    #[test]
    fn degenerate_segment_never_blocks() {
        let r = rect(0.0, 0.0, 10.0, 10.0);
        assert!(!r.blocks_segment(point(5.0, 5.0), point(5.0, 5.0)));
    }

    #[test]
    fn union_covers_both() {
        let u = rect(0.0, 0.0, 10.0, 10.0).union_with(&rect(20.0, -5.0, 5.0, 5.0));
        assert_eq!(u, Rect::new(point(0.0, -5.0), point(25.0, 10.0)));
    }
}
