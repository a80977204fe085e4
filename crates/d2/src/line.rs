//! Infinite lines and rays.
//!
//! A [`Line`] is stored in general form `a·x + b·y + c = 0` with `(a, b)`
//! normalized to unit length, so `a·x + b·y + c` is the signed distance of a
//! point from the line. The sign convention is fixed at construction: points
//! to the left of the build direction have positive distance.
//!
//! ## Classification
//!
//! ```rust
//! use u_collide_d2::{Line, Point, Position};
//!
//! let diagonal = Line::through(Point::new(0.0, 0.0), Point::new(1.0, 1.0)).unwrap();
//! assert_eq!(diagonal.classify(Point::new(0.0, 2.0), 1e-9), Position::Left);
//! assert_eq!(diagonal.classify(Point::new(2.0, 0.0), 1e-9), Position::Right);
//! assert_eq!(diagonal.classify(Point::new(3.0, 3.0), 1e-9), Position::Collides);
//! ```

use nalgebra::{Matrix2, Vector2 as NVector2};

use crate::vector::{Point, Vector2};
use u_collide_core::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where a point lies relative to a line or segment.
///
/// Lines only produce the first three variants. Segments additionally report
/// points that are collinear with them but outside their endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Position {
    /// Strictly left of the build direction.
    Left,
    /// Strictly right of the build direction.
    Right,
    /// On the line, or on the segment between its endpoints.
    Collides,
    /// Collinear with a segment, beyond its second endpoint.
    CollinearAbove,
    /// Collinear with a segment, before its first endpoint.
    CollinearBelow,
}

impl Position {
    /// Returns true for the two segment-only collinear variants.
    #[inline]
    pub fn is_collinear_outside(self) -> bool {
        matches!(self, Position::CollinearAbove | Position::CollinearBelow)
    }
}

/// Outcome of intersecting two lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    /// The lines cross at exactly one point.
    Point(Point),
    /// Parallel and distinct.
    Parallel,
    /// The same line. `witness` is the point of the line closest to the origin.
    Coincident { witness: Point },
}

/// Orientation class of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Vertical,
    Horizontal,
    Oblique,
}

/// An infinite directed line in normalized general form.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Line {
    a: f64,
    b: f64,
    c: f64,
}

impl Line {
    /// Builds the line through `p1` and `p2`, directed from `p1` to `p2`.
    pub fn through(p1: Point, p2: Point) -> Result<Self> {
        let dir = (p2 - p1).unit().map_err(|_| {
            Error::DegenerateGeometry(format!("line through coincident points {}", p1))
        })?;
        Ok(Self::with_unit_direction(p1, dir))
    }

    /// Builds the line through `point` heading along `direction`.
    pub fn from_direction(point: Point, direction: Vector2) -> Result<Self> {
        Ok(Self::with_unit_direction(point, direction.unit()?))
    }

    fn with_unit_direction(point: Point, dir: Vector2) -> Self {
        let a = -dir.vy();
        let b = dir.vx();
        Self {
            a,
            b,
            c: -(a * point.x + b * point.y),
        }
    }

    /// Coefficients `(a, b, c)` of `a·x + b·y + c = 0`.
    #[inline]
    pub fn coefficients(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    pub fn kind(&self) -> LineKind {
        if self.b == 0.0 {
            LineKind::Vertical
        } else if self.a == 0.0 {
            LineKind::Horizontal
        } else {
            LineKind::Oblique
        }
    }

    /// Unit vector along the build direction.
    #[inline]
    pub fn direction(&self) -> Vector2 {
        Vector2::new(self.b, -self.a)
    }

    /// Slope `dy/dx`, undefined for vertical lines.
    pub fn slope(&self) -> Option<f64> {
        match self.kind() {
            LineKind::Vertical => None,
            LineKind::Horizontal => Some(0.0),
            LineKind::Oblique => Some(-self.a / self.b),
        }
    }

    /// Y coordinate where the line crosses `x = 0`, undefined for vertical lines.
    pub fn y_intercept(&self) -> Option<f64> {
        match self.kind() {
            LineKind::Vertical => None,
            _ => Some(-self.c / self.b),
        }
    }

    /// Signed distance of `p`; positive on the left.
    pub fn signed_distance(&self, p: Point) -> f64 {
        match self.kind() {
            LineKind::Vertical => self.a * p.x + self.c,
            LineKind::Horizontal => self.b * p.y + self.c,
            LineKind::Oblique => self.a * p.x + self.b * p.y + self.c,
        }
    }

    /// Classifies `p` as left of, right of, or on the line.
    pub fn classify(&self, p: Point, eps: f64) -> Position {
        let d = self.signed_distance(p);
        if d > eps {
            Position::Left
        } else if d < -eps {
            Position::Right
        } else {
            Position::Collides
        }
    }

    /// Returns the parallel line passing through `p`, with the same direction.
    pub fn translate_through(&self, p: Point) -> Line {
        Line {
            a: self.a,
            b: self.b,
            c: -(self.a * p.x + self.b * p.y),
        }
    }

    /// Returns `p` moved by `t` along the line's direction.
    #[inline]
    pub fn shift_along(&self, p: Point, t: f64) -> Point {
        p + self.direction().scale(t)
    }

    /// The point of the line nearest the origin.
    #[inline]
    pub fn foot_from_origin(&self) -> Point {
        Point::new(-self.a * self.c, -self.b * self.c)
    }

    /// Y coordinate at `x`. Vertical lines have none.
    pub fn calculate_y(&self, x: f64) -> Result<f64> {
        match self.kind() {
            LineKind::Vertical => Err(Error::NoUniqueIntersection(format!(
                "vertical line x = {} has no y at a given x",
                -self.c / self.a
            ))),
            _ => Ok((-self.c - self.a * x) / self.b),
        }
    }

    /// X coordinate at `y`. Horizontal lines have none.
    pub fn calculate_x(&self, y: f64) -> Result<f64> {
        match self.kind() {
            LineKind::Horizontal => Err(Error::NoUniqueIntersection(format!(
                "horizontal line y = {} has no x at a given y",
                -self.c / self.b
            ))),
            _ => Ok((-self.c - self.b * y) / self.a),
        }
    }

    /// Intersects two lines.
    ///
    /// Lines whose directions differ by less than `eps` (as a sine) are
    /// parallel; parallel lines closer than `eps` coincide.
    pub fn intersect(&self, other: &Line, eps: f64) -> Intersection {
        let det = self.a * other.b - other.a * self.b;

        if det.abs() <= eps {
            let aligned = self.a * other.a + self.b * other.b > 0.0;
            let offset = if aligned {
                self.c - other.c
            } else {
                self.c + other.c
            };
            return if offset.abs() <= eps {
                Intersection::Coincident {
                    witness: self.foot_from_origin(),
                }
            } else {
                Intersection::Parallel
            };
        }

        let m = Matrix2::new(self.a, self.b, other.a, other.b);
        match m.try_inverse() {
            Some(inv) => {
                let sol = inv * NVector2::new(-self.c, -other.c);
                Intersection::Point(Point::new(sol.x, sol.y))
            }
            None => Intersection::Parallel,
        }
    }

    /// Like [`Line::intersect`], but only a single crossing point is a success.
    pub fn intersection_point(&self, other: &Line, eps: f64) -> Result<Point> {
        match self.intersect(other, eps) {
            Intersection::Point(p) => Ok(p),
            Intersection::Parallel => Err(Error::NoUniqueIntersection(format!(
                "{:?} and {:?} are parallel",
                self, other
            ))),
            Intersection::Coincident { witness } => Err(Error::NoUniqueIntersection(format!(
                "{:?} and {:?} coincide (witness {})",
                self, other, witness
            ))),
        }
    }
}

// ============================================================================
// Ray
// ============================================================================

/// A half-line: a [`Line`] anchored at an origin with one of its two senses.
///
/// `neg_to_pos` selects the sense travelling from negative to positive x, or
/// from negative to positive y when the line is vertical.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ray {
    origin: Point,
    line: Line,
    neg_to_pos: bool,
}

impl Ray {
    /// Anchors `line` at `origin`. The line is moved to pass through `origin`.
    pub fn new(origin: Point, line: &Line, neg_to_pos: bool) -> Self {
        Self {
            origin,
            line: line.translate_through(origin),
            neg_to_pos,
        }
    }

    /// Builds the ray starting at `origin` heading along `direction`.
    pub fn from_direction(origin: Point, direction: Vector2) -> Result<Self> {
        let line = Line::from_direction(origin, direction)?;
        let neg_to_pos = match line.kind() {
            LineKind::Vertical => direction.vy() > 0.0,
            _ => direction.vx() > 0.0,
        };
        Ok(Self {
            origin,
            line,
            neg_to_pos,
        })
    }

    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// The supporting line, passing through the origin.
    #[inline]
    pub fn line(&self) -> &Line {
        &self.line
    }

    #[inline]
    pub fn neg_to_pos(&self) -> bool {
        self.neg_to_pos
    }

    /// Unit vector in the direction of travel.
    pub fn direction(&self) -> Vector2 {
        let d = self.line.direction();
        let increasing = match self.line.kind() {
            LineKind::Vertical => d.vy() > 0.0,
            _ => d.vx() > 0.0,
        };
        if increasing == self.neg_to_pos {
            d
        } else {
            d.negate()
        }
    }

    /// Same line, opposite sense.
    pub fn reversed(&self) -> Ray {
        Ray {
            neg_to_pos: !self.neg_to_pos,
            ..*self
        }
    }

    /// Returns the ray moved to start at `origin`.
    pub fn anchored_at(&self, origin: Point) -> Ray {
        Ray::new(origin, &self.line, self.neg_to_pos)
    }

    /// Signed travel distance from the origin to the projection of `p`.
    #[inline]
    pub fn parameter_of(&self, p: Point) -> f64 {
        (p - self.origin).dot(&self.direction())
    }

    /// Returns true if `p` does not lie behind the origin (within `eps`).
    #[inline]
    pub fn is_ahead(&self, p: Point, eps: f64) -> bool {
        self.parameter_of(p) >= -eps
    }

    /// The point reached after travelling `t`.
    #[inline]
    pub fn point_at(&self, t: f64) -> Point {
        self.origin + self.direction().scale(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPS: f64 = 1e-9;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
        Line::through(Point::new(x1, y1), Point::new(x2, y2)).unwrap()
    }

    fn assert_point(actual: Point, x: f64, y: f64) {
        assert_relative_eq!(actual.x, x, epsilon = 1e-9);
        assert_relative_eq!(actual.y, y, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_line() {
        let p = Point::new(3.0, 3.0);
        assert!(matches!(
            Line::through(p, p),
            Err(Error::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_classify_diagonal() {
        let l = line(0.0, 0.0, 1.0, 1.0);
        assert_eq!(l.classify(Point::new(2.0, 0.0), EPS), Position::Right);
        assert_eq!(l.classify(Point::new(-2.0, 0.0), EPS), Position::Left);
        assert_eq!(l.classify(Point::new(0.0, 2.0), EPS), Position::Left);
        assert_eq!(l.classify(Point::new(0.0, -2.0), EPS), Position::Right);
        assert_eq!(l.classify(Point::new(0.0, 0.0), EPS), Position::Collides);
    }

    #[test]
    fn test_classify_follows_build_direction() {
        let up = line(0.0, 0.0, 0.0, 1.0);
        let down = line(0.0, 1.0, 0.0, 0.0);
        let p = Point::new(-1.0, 0.5);
        assert_eq!(up.classify(p, EPS), Position::Left);
        assert_eq!(down.classify(p, EPS), Position::Right);

        let right = line(0.0, 0.0, 1.0, 0.0);
        assert_eq!(right.classify(Point::new(5.0, 1.0), EPS), Position::Left);
        assert_eq!(right.classify(Point::new(5.0, -1.0), EPS), Position::Right);
    }

    #[test]
    fn test_classify_tolerance() {
        let l = line(0.0, 0.0, 1.0, 0.0);
        assert_eq!(l.classify(Point::new(0.5, 1e-12), EPS), Position::Collides);
        assert_eq!(l.classify(Point::new(0.5, 1e-4), 1e-3), Position::Collides);
        assert_eq!(l.classify(Point::new(0.5, 1e-4), EPS), Position::Left);
    }

    #[test]
    fn test_kind() {
        assert_eq!(line(10.0, 0.0, 10.0, 5.0).kind(), LineKind::Vertical);
        assert_eq!(line(0.0, 30.0, 1.0, 30.0).kind(), LineKind::Horizontal);
        assert_eq!(line(0.0, 0.0, 1.0, -1.0).kind(), LineKind::Oblique);
    }

    #[test]
    fn test_intersections() {
        let x10 = line(10.0, 0.0, 10.0, 1.0);
        let y30 = line(0.0, 30.0, 1.0, 30.0);
        let y_neg_x = line(0.0, 0.0, 1.0, -1.0);
        let y_neg10 = line(0.0, -10.0, 1.0, -10.0);
        let y_x = line(0.0, 0.0, 1.0, 1.0);

        assert_point(x10.intersection_point(&y30, EPS).unwrap(), 10.0, 30.0);
        assert_point(x10.intersection_point(&y_neg_x, EPS).unwrap(), 10.0, -10.0);
        assert_point(y_neg10.intersection_point(&x10, EPS).unwrap(), 10.0, -10.0);
        assert_point(y_neg10.intersection_point(&y_neg_x, EPS).unwrap(), 10.0, -10.0);
        assert_point(y_x.intersection_point(&x10, EPS).unwrap(), 10.0, 10.0);
        assert_point(y_x.intersection_point(&y30, EPS).unwrap(), 30.0, 30.0);
        assert_point(y_x.intersection_point(&y_neg_x, EPS).unwrap(), 0.0, 0.0);

        assert_eq!(y_neg10.intersect(&y30, EPS), Intersection::Parallel);
        assert!(matches!(
            y_neg10.intersection_point(&y30, EPS),
            Err(Error::NoUniqueIntersection(_))
        ));
    }

    #[test]
    fn test_coincident_reported_distinctly() {
        let a = line(10.0, 0.0, 10.0, 1.0);
        let b = line(10.0, 7.0, 10.0, -3.0);

        match a.intersect(&b, EPS) {
            Intersection::Coincident { witness } => assert_point(witness, 10.0, 0.0),
            other => panic!("expected coincident, got {:?}", other),
        }
        assert!(a.intersection_point(&b, EPS).is_err());
    }

    #[test]
    fn test_translate_through_keeps_slope() {
        let l = line(0.0, 0.0, 2.0, 1.0);
        let moved = l.translate_through(Point::new(0.0, 3.0));
        assert_eq!(moved.slope(), l.slope());
        assert_relative_eq!(moved.y_intercept().unwrap(), 3.0, epsilon = 1e-12);
        assert_eq!(moved.classify(Point::new(4.0, 5.0), EPS), Position::Collides);
        assert_eq!(moved.direction(), l.direction());
    }

    #[test]
    fn test_calculate_axis() {
        let l = line(0.0, 1.0, 1.0, 3.0);
        assert_relative_eq!(l.calculate_y(2.0).unwrap(), 5.0, epsilon = 1e-12);
        assert_relative_eq!(l.calculate_x(5.0).unwrap(), 2.0, epsilon = 1e-12);

        let vertical = line(4.0, 0.0, 4.0, 1.0);
        assert!(vertical.calculate_y(4.0).is_err());
        assert_relative_eq!(vertical.calculate_x(100.0).unwrap(), 4.0);

        let horizontal = line(0.0, 2.0, 1.0, 2.0);
        assert!(horizontal.calculate_x(2.0).is_err());
        assert_relative_eq!(horizontal.calculate_y(-7.0).unwrap(), 2.0);
    }

    #[test]
    fn test_shift_along() {
        let l = line(0.0, 0.0, 3.0, 4.0);
        assert_point(l.shift_along(Point::new(1.0, 1.0), 5.0), 4.0, 5.0);
    }

    #[test]
    fn test_ray_orientation() {
        let diagonal = line(1.0, 1.0, 0.0, 0.0);
        let forward = Ray::new(Point::origin(), &diagonal, true);
        let backward = forward.reversed();
        assert!(forward.direction().vx() > 0.0);
        assert!(backward.direction().vx() < 0.0);

        let vertical = line(0.0, 5.0, 0.0, 0.0);
        let up = Ray::new(Point::origin(), &vertical, true);
        assert_eq!(up.direction(), Vector2::new(0.0, 1.0));
        assert_eq!(up.reversed().direction(), Vector2::new(0.0, -1.0));
    }

    #[test]
    fn test_ray_from_direction() {
        let ray = Ray::from_direction(Point::new(1.0, 1.0), Vector2::new(-3.0, 4.0)).unwrap();
        assert!(!ray.neg_to_pos());
        assert_relative_eq!(ray.direction().vx(), -0.6, epsilon = 1e-12);
        assert_relative_eq!(ray.direction().vy(), 0.8, epsilon = 1e-12);

        assert!(ray.is_ahead(Point::new(-2.0, 5.0), EPS));
        assert!(!ray.is_ahead(Point::new(4.0, -3.0), EPS));
        assert_point(ray.point_at(5.0), -2.0, 5.0);

        assert!(Ray::from_direction(Point::origin(), Vector2::zero()).is_err());
    }

    #[test]
    fn test_ray_anchoring_moves_line() {
        let ray = Ray::new(Point::new(0.0, 2.0), &line(0.0, 0.0, 1.0, 0.0), true);
        assert_eq!(ray.line().classify(Point::new(9.0, 2.0), EPS), Position::Collides);

        let moved = ray.anchored_at(Point::new(0.0, -1.0));
        assert_eq!(moved.origin(), Point::new(0.0, -1.0));
        assert_eq!(moved.direction(), ray.direction());
    }
}
