//! Exact overlap tests between the player's circle and tile shapes
//!
//! Every predicate answers "do the two shapes share a region of positive
//! area". Shapes that only touch along an edge or at a point do not overlap,
//! so a hazard at exactly one radius away is harmless.

use glam::DVec2;

/// Closest point to `p` on segment `a`-`b`
#[inline]
pub fn closest_point_on_segment(p: DVec2, a: DVec2, b: DVec2) -> DVec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < 1e-18 {
        return a; // Degenerate segment
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Strict point-in-triangle test (either winding)
pub fn point_in_triangle(p: DVec2, tri: &[DVec2; 3]) -> bool {
    let edge = |a: DVec2, b: DVec2| (b - a).perp_dot(p - a);
    let d0 = edge(tri[0], tri[1]);
    let d1 = edge(tri[1], tri[2]);
    let d2 = edge(tri[2], tri[0]);

    (d0 > 0.0 && d1 > 0.0 && d2 > 0.0) || (d0 < 0.0 && d1 < 0.0 && d2 < 0.0)
}

/// Distance from `p` to the boundary of a triangle
pub fn distance_to_triangle_edges(p: DVec2, tri: &[DVec2; 3]) -> f64 {
    (0..3)
        .map(|i| p.distance(closest_point_on_segment(p, tri[i], tri[(i + 1) % 3])))
        .fold(f64::INFINITY, f64::min)
}

/// Circle vs triangle, positive-area overlap
pub fn circle_overlaps_triangle(center: DVec2, radius: f64, tri: &[DVec2; 3]) -> bool {
    point_in_triangle(center, tri) || distance_to_triangle_edges(center, tri) < radius
}

/// Axis-aligned rectangle by corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: DVec2,
    pub size: DVec2,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            min: DVec2::new(x, y),
            size: DVec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> DVec2 {
        self.min + self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Overlapping region, empty size when disjoint
    pub fn intersection(&self, other: &Rect) -> Rect {
        let min = self.min.max(other.min);
        let max = self.max().min(other.max());
        Rect {
            min,
            size: (max - min).max(DVec2::ZERO),
        }
    }

    /// Distance from `p` to the closed rectangle (0 when inside)
    pub fn distance_to(&self, p: DVec2) -> f64 {
        p.distance(p.clamp(self.min, self.max()))
    }
}

/// Circle vs rectangle, positive-area overlap
pub fn circle_overlaps_rect(center: DVec2, radius: f64, rect: &Rect) -> bool {
    !rect.is_empty() && rect.distance_to(center) < radius
}

/// Circle vs circle, positive-area overlap
#[inline]
pub fn circle_overlaps_circle(a: DVec2, ra: f64, b: DVec2, rb: f64) -> bool {
    a.distance(b) < ra + rb
}
