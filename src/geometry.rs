// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Plane-geometry solvers for the clock face.
//!
//! The unequal-hour boundaries on the dial are circular arcs that are not
//! concentric with the clock. They are found by intersecting the latitude's
//! horizon circle with the dial's reference circles and by fitting a circle
//! through three known points.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in the dial plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Polar angle about the origin, degrees.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }
}

/// A circle in the dial plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    #[inline]
    pub const fn new(cx: f64, cy: f64, radius: f64) -> Self {
        Self {
            center: Point::new(cx, cy),
            radius,
        }
    }

    /// Intersections of `self` with `other`.
    pub fn intersect(&self, other: &Circle) -> Intersection {
        circle_intersections(
            self.center.x,
            self.center.y,
            self.radius,
            other.center.x,
            other.center.y,
            other.radius,
        )
    }
}

/// Outcome of intersecting two circles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    /// The circles are the same circle: every point is shared.
    Coincident,
    /// No common point.
    Disjoint,
    /// The circles touch at one point.
    Tangent(Point),
    /// Two crossing points; the first is offset by `+h` from the radical line.
    Secant(Point, Point),
}

impl Intersection {
    /// The finite list of common points (empty for `Coincident`).
    pub fn points(&self) -> Vec<Point> {
        match *self {
            Intersection::Coincident | Intersection::Disjoint => Vec::new(),
            Intersection::Tangent(p) => vec![p],
            Intersection::Secant(p, q) => vec![p, q],
        }
    }

    #[inline]
    pub fn is_coincident(&self) -> bool {
        matches!(self, Intersection::Coincident)
    }
}

/// Intersect circle `(x1, y1, r1)` with circle `(x2, y2, r2)`.
///
/// Radical-line construction: `a = (r1² − r2² + d²) / 2d` along the line of
/// centres, `h = √max(r1² − a², 0)` perpendicular to it.
pub fn circle_intersections(x1: f64, y1: f64, r1: f64, x2: f64, y2: f64, r2: f64) -> Intersection {
    if x1 == x2 && y1 == y2 && r1 == r2 {
        return Intersection::Coincident;
    } else if r1 == 0.0 && r2 == 0.0 {
        return Intersection::Disjoint;
    }

    let dx = x2 - x1;
    let dy = y2 - y1;
    let d = (dx * dx + dy * dy).sqrt();

    if d == 0.0 || d > r1 + r2 || d < (r1 - r2).abs() {
        return Intersection::Disjoint;
    }

    let a = (r1 * r1 - r2 * r2 + d * d) / (2.0 * d);
    let x3 = x1 + a * dx / d;
    let y3 = y1 + a * dy / d;

    // exact contact: do not let rounding in `a` split the tangent point in two
    let touching = d == r1 + r2 || d == (r1 - r2).abs();
    let h = if touching {
        0.0
    } else {
        (r1 * r1 - a * a).max(0.0).sqrt()
    };

    if h == 0.0 {
        return Intersection::Tangent(Point::new(x3, y3));
    }

    Intersection::Secant(
        Point::new(x3 + h * dy / d, y3 - h * dx / d),
        Point::new(x3 - h * dy / d, y3 + h * dx / d),
    )
}

/// Radius of the circle through three points.
///
/// Collinear points have no finite circle; the result is then
/// `f64::INFINITY`.
pub fn find_circle_radius(x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) -> f64 {
    let x12 = x1 - x2;
    let x13 = x1 - x3;
    let y12 = y1 - y2;
    let y13 = y1 - y3;
    let y31 = y3 - y1;
    let y21 = y2 - y1;
    let x31 = x3 - x1;
    let x21 = x2 - x1;

    let sx13 = x1 * x1 - x3 * x3;
    let sy13 = y1 * y1 - y3 * y3;
    let sx21 = x2 * x2 - x1 * x1;
    let sy21 = y2 * y2 - y1 * y1;

    let f_den = 2.0 * (y31 * x12 - y21 * x13);
    let g_den = 2.0 * (x31 * y12 - x21 * y13);
    if f_den == 0.0 || g_den == 0.0 {
        return f64::INFINITY;
    }

    let f = (sx13 * x12 + sy13 * x12 + sx21 * x13 + sy21 * x13) / f_den;
    let g = (sx13 * y12 + sy13 * y12 + sx21 * y13 + sy21 * y13) / g_den;

    // x² + y² + 2gx + 2fy + c = 0, centre (−g, −f)
    let c = -(x1 * x1) - y1 * y1 - 2.0 * g * x1 - 2.0 * f * y1;
    let r2 = g * g + f * f - c;

    r2.max(0.0).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn same_point(a: &Point, b: &Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn polar_angle_of_points() {
        assert!((Point::new(1.0, 1.0).angle() - 45.0).abs() < 1e-12);
        assert!((Point::new(0.0, -2.0).angle() + 90.0).abs() < 1e-12);
        assert!((Point::new(-3.0, 0.0).angle() - 180.0).abs() < 1e-12);
    }

    #[test]
    fn identical_circles_are_coincident() {
        assert!(circle_intersections(1.0, 2.0, 3.0, 1.0, 2.0, 3.0).is_coincident());
        assert!(circle_intersections(1.0, 2.0, 3.0, 1.0, 2.0, 3.0).points().is_empty());
    }

    #[test]
    fn degenerate_inputs_are_disjoint() {
        assert_eq!(circle_intersections(0.0, 0.0, 0.0, 1.0, 0.0, 0.0), Intersection::Disjoint);
        // concentric, different radii
        assert_eq!(circle_intersections(0.0, 0.0, 1.0, 0.0, 0.0, 2.0), Intersection::Disjoint);
        // too far apart
        assert_eq!(circle_intersections(0.0, 0.0, 1.0, 5.0, 0.0, 1.0), Intersection::Disjoint);
        // one inside the other
        assert_eq!(circle_intersections(0.0, 0.0, 10.0, 1.0, 0.0, 2.0), Intersection::Disjoint);
    }

    #[test]
    fn external_tangency_gives_one_point() {
        match circle_intersections(0.0, 0.0, 3.0, 5.0, 0.0, 2.0) {
            Intersection::Tangent(p) => assert!(same_point(&p, &Point::new(3.0, 0.0))),
            other => panic!("expected tangent point, got {other:?}"),
        }
    }

    #[test]
    fn tangency_with_inexact_radii() {
        let (r1, r2) = (0.1, 0.2);
        let d = r1 + r2;
        let hits = circle_intersections(0.0, 0.0, r1, d, 0.0, r2).points();
        assert_eq!(hits.len(), 1);
        assert!((hits[0].x - r1).abs() < 1e-12);
    }

    #[test]
    fn internal_tangency_gives_one_point() {
        let hits = circle_intersections(0.0, 0.0, 5.0, 2.0, 0.0, 3.0).points();
        assert_eq!(hits.len(), 1);
        assert!(same_point(&hits[0], &Point::new(5.0, 0.0)));
    }

    #[test]
    fn secant_points_lie_on_both_circles() {
        let (c1, c2) = (Circle::new(0.0, 0.0, 5.0), Circle::new(4.0, 3.0, 4.0));
        let hits = c1.intersect(&c2).points();
        assert_eq!(hits.len(), 2);
        for p in &hits {
            assert!((p.distance(&c1.center) - 5.0).abs() < 1e-9);
            assert!((p.distance(&c2.center) - 4.0).abs() < 1e-9);
        }
    }

    #[test]
    fn secant_order_uses_plus_h_first() {
        // centres on the x axis: +h goes to negative y
        match circle_intersections(0.0, 0.0, 5.0, 8.0, 0.0, 5.0) {
            Intersection::Secant(p, q) => {
                assert!(same_point(&p, &Point::new(4.0, -3.0)));
                assert!(same_point(&q, &Point::new(4.0, 3.0)));
            }
            other => panic!("expected two points, got {other:?}"),
        }
    }

    #[test]
    fn swapping_circles_gives_same_points() {
        let a = circle_intersections(1.0, -2.0, 7.0, 6.0, 3.0, 5.5).points();
        let b = circle_intersections(6.0, 3.0, 5.5, 1.0, -2.0, 7.0).points();
        assert_eq!(a.len(), 2);
        assert!(
            (same_point(&a[0], &b[0]) && same_point(&a[1], &b[1]))
                || (same_point(&a[0], &b[1]) && same_point(&a[1], &b[0]))
        );
    }

    #[test]
    fn circumradius_of_right_triangle() {
        // hypotenuse of a 3-4-5 triangle is a diameter
        let r = find_circle_radius(0.0, 0.0, 3.0, 0.0, 0.0, 4.0);
        assert!((r - 2.5).abs() < 1e-12);
    }

    #[test]
    fn circumradius_of_points_on_known_circle() {
        let r = find_circle_radius(12.0, 5.0, -5.0, 12.0, 0.0, -13.0);
        assert!((r - 13.0).abs() < 1e-9);
    }

    #[test]
    fn collinear_points_have_no_circle() {
        assert!(find_circle_radius(0.0, 0.0, 1.0, 1.0, 2.0, 2.0).is_infinite());
    }
}
