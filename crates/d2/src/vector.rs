//! Points and free vectors.
//!
//! [`Point`] is a position and [`Vector2`] a displacement. Both are immutable
//! `Copy` values: every transform returns a new value.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use u_collide_core::config::UNIT_TOLERANCE;
use u_collide_core::robust::{cmp_lex_x, cmp_lex_y};
use u_collide_core::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin.
    #[inline]
    pub const fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Returns the point shifted by `(dx, dy)`.
    #[inline]
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Returns the point reflected through the origin.
    #[inline]
    pub fn negate(self) -> Self {
        Self::new(-self.x, -self.y)
    }

    /// Returns the position vector of this point.
    #[inline]
    pub fn to_vector(self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (other - self).length()
    }

    /// Orders by x, breaking ties by y.
    #[inline]
    pub fn cmp_lex_x(&self, other: &Point) -> Ordering {
        cmp_lex_x(self.as_tuple(), other.as_tuple())
    }

    /// Orders by y, breaking ties by x.
    #[inline]
    pub fn cmp_lex_y(&self, other: &Point) -> Ordering {
        cmp_lex_y(self.as_tuple(), other.as_tuple())
    }

    /// Returns the coordinates as a tuple.
    #[inline]
    pub fn as_tuple(self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for geo::Coord<f64> {
    fn from(p: Point) -> Self {
        geo::Coord { x: p.x, y: p.y }
    }
}

impl From<geo::Coord<f64>> for Point {
    fn from(c: geo::Coord<f64>) -> Self {
        Self::new(c.x, c.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add<Vector2> for Point {
    type Output = Point;

    fn add(self, v: Vector2) -> Point {
        Point::new(self.x + v.vx, self.y + v.vy)
    }
}

impl Sub<Vector2> for Point {
    type Output = Point;

    fn sub(self, v: Vector2) -> Point {
        Point::new(self.x - v.vx, self.y - v.vy)
    }
}

impl Sub for Point {
    type Output = Vector2;

    fn sub(self, other: Point) -> Vector2 {
        Vector2::new(self.x - other.x, self.y - other.y)
    }
}

/// A free vector with its length cached at construction.
///
/// Components are read through [`Vector2::vx`] and [`Vector2::vy`] and only
/// set by constructors, so the cached length always matches them. The
/// serialized form carries the components alone.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "VectorRepr", into = "VectorRepr")
)]
pub struct Vector2 {
    vx: f64,
    vy: f64,
    length: f64,
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct VectorRepr {
    vx: f64,
    vy: f64,
}

#[cfg(feature = "serde")]
impl From<VectorRepr> for Vector2 {
    fn from(repr: VectorRepr) -> Self {
        Vector2::new(repr.vx, repr.vy)
    }
}

#[cfg(feature = "serde")]
impl From<Vector2> for VectorRepr {
    fn from(v: Vector2) -> Self {
        VectorRepr { vx: v.vx, vy: v.vy }
    }
}

impl Vector2 {
    /// Unit X axis.
    pub const X_AXIS: Vector2 = Vector2 {
        vx: 1.0,
        vy: 0.0,
        length: 1.0,
    };

    /// Unit Y axis.
    pub const Y_AXIS: Vector2 = Vector2 {
        vx: 0.0,
        vy: 1.0,
        length: 1.0,
    };

    /// Creates a vector from its components.
    #[inline]
    pub fn new(vx: f64, vy: f64) -> Self {
        Self {
            vx,
            vy,
            length: vx.hypot(vy),
        }
    }

    /// The zero vector.
    #[inline]
    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// The displacement from `from` to `to`.
    #[inline]
    pub fn between(from: Point, to: Point) -> Self {
        to - from
    }

    #[inline]
    pub fn vx(&self) -> f64 {
        self.vx
    }

    #[inline]
    pub fn vy(&self) -> f64 {
        self.vy
    }

    /// Euclidean length.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns true if both components are exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.vx == 0.0 && self.vy == 0.0
    }

    /// Returns true if the length lies within the unit tolerance band of 1.0.
    #[inline]
    pub fn is_unit(&self) -> bool {
        (self.length - 1.0).abs() <= UNIT_TOLERANCE
    }

    #[inline]
    pub fn dot(&self, other: &Vector2) -> f64 {
        self.vx * other.vx + self.vy * other.vy
    }

    /// The z-component of the 3D cross product. Positive when `other` lies
    /// counter-clockwise from `self`.
    #[inline]
    pub fn cross(&self, other: &Vector2) -> f64 {
        self.vx * other.vy - self.vy * other.vx
    }

    /// Projects this vector onto `axis`.
    ///
    /// The axis need not be unit length; the result is divided by
    /// `axis · axis`. Projecting onto the zero vector is degenerate.
    pub fn project_onto(&self, axis: &Vector2) -> Result<Vector2> {
        let denom = axis.dot(axis);
        if denom == 0.0 {
            return Err(Error::DegenerateGeometry(
                "cannot project onto the zero vector".into(),
            ));
        }
        Ok(axis.scale(self.dot(axis) / denom))
    }

    /// The normal obtained by rotating a quarter turn counter-clockwise.
    #[inline]
    pub fn left_normal(&self) -> Vector2 {
        Vector2::new(-self.vy, self.vx)
    }

    /// The normal obtained by rotating a quarter turn clockwise.
    ///
    /// For an edge of a counter-clockwise polygon this points outward.
    #[inline]
    pub fn right_normal(&self) -> Vector2 {
        Vector2::new(self.vy, -self.vx)
    }

    /// Returns the unit vector with the same direction.
    pub fn unit(&self) -> Result<Vector2> {
        if self.length == 0.0 {
            return Err(Error::DegenerateGeometry(
                "zero-length vector has no direction".into(),
            ));
        }
        Ok(Vector2::new(self.vx / self.length, self.vy / self.length))
    }

    #[inline]
    pub fn scale(&self, k: f64) -> Vector2 {
        Vector2::new(self.vx * k, self.vy * k)
    }

    #[inline]
    pub fn negate(&self) -> Vector2 {
        Vector2 {
            vx: -self.vx,
            vy: -self.vy,
            length: self.length,
        }
    }

    /// Angle from the positive x axis, normalized to `[0, 2π)`.
    pub fn angle(&self) -> f64 {
        let angle = self.vy.atan2(self.vx);
        if angle < 0.0 {
            angle + 2.0 * std::f64::consts::PI
        } else {
            angle
        }
    }

    /// Converts to an nalgebra column vector.
    #[inline]
    pub fn to_nalgebra(&self) -> nalgebra::Vector2<f64> {
        nalgebra::Vector2::new(self.vx, self.vy)
    }
}

impl PartialEq for Vector2 {
    fn eq(&self, other: &Self) -> bool {
        self.vx == other.vx && self.vy == other.vy
    }
}

impl Default for Vector2 {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<nalgebra::Vector2<f64>> for Vector2 {
    fn from(v: nalgebra::Vector2<f64>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.vx, self.vy)
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, other: Vector2) -> Vector2 {
        Vector2::new(self.vx + other.vx, self.vy + other.vy)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, other: Vector2) -> Vector2 {
        Vector2::new(self.vx - other.vx, self.vy - other.vy)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        self.negate()
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, k: f64) -> Vector2 {
        self.scale(k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_length_cached() {
        let v = Vector2::new(3.0, 4.0);
        assert_relative_eq!(v.length(), 5.0);
        assert_relative_eq!(v.scale(2.0).length(), 10.0);
        assert_relative_eq!(v.negate().length(), 5.0);
    }

    #[test]
    fn test_length_follows_components() {
        let v = Vector2::new(3.0, 4.0);
        let vertical = Vector2::new(0.0, v.vy());
        assert_eq!(vertical.length(), 4.0);

        // Every derived vector reports the length of its own components.
        for w in [
            v.unit().unwrap(),
            v.left_normal(),
            v.right_normal(),
            v.scale(-0.5),
            v.negate(),
            v + Vector2::X_AXIS,
            v - v,
            Vector2::from(v.to_nalgebra()),
        ] {
            assert_eq!(w.length(), w.vx().hypot(w.vy()));
        }
    }

    #[test]
    fn test_dot_and_cross() {
        let a = Vector2::new(1.0, 0.0);
        let b = Vector2::new(0.0, 1.0);
        assert_eq!(a.dot(&b), 0.0);
        assert_eq!(a.cross(&b), 1.0);
        assert_eq!(b.cross(&a), -1.0);
        assert_eq!(Vector2::new(2.0, 3.0).dot(&Vector2::new(4.0, -1.0)), 5.0);
    }

    #[test]
    fn test_project_onto_unit_axis() {
        let v = Vector2::new(3.0, 4.0);
        let p = v.project_onto(&Vector2::X_AXIS).unwrap();
        assert_eq!(p, Vector2::new(3.0, 0.0));
    }

    #[test]
    fn test_project_onto_non_unit_axis() {
        let v = Vector2::new(2.0, 0.0);
        let p = v.project_onto(&Vector2::new(1.0, 1.0)).unwrap();
        assert_relative_eq!(p.vx(), 1.0);
        assert_relative_eq!(p.vy(), 1.0);

        assert!(v.project_onto(&Vector2::zero()).is_err());
    }

    #[test]
    fn test_normals() {
        let edge = Vector2::new(1.0, 0.0);
        assert_eq!(edge.left_normal(), Vector2::new(0.0, 1.0));
        assert_eq!(edge.right_normal(), Vector2::new(0.0, -1.0));
    }

    #[test]
    fn test_unit() {
        let u = Vector2::new(0.0, -7.0).unit().unwrap();
        assert_eq!(u, Vector2::new(0.0, -1.0));
        assert!(u.is_unit());
        assert!(Vector2::new(1.005, 0.0).is_unit());
        assert!(!Vector2::new(1.5, 0.0).is_unit());

        let err = Vector2::zero().unit();
        assert!(matches!(err, Err(Error::DegenerateGeometry(_))));
    }

    #[test]
    fn test_angle_normalized() {
        assert_relative_eq!(Vector2::new(1.0, 0.0).angle(), 0.0);
        assert_relative_eq!(Vector2::new(0.0, 1.0).angle(), PI / 2.0);
        assert_relative_eq!(Vector2::new(-1.0, 0.0).angle(), PI);
        assert_relative_eq!(Vector2::new(0.0, -1.0).angle(), 3.0 * PI / 2.0);
    }

    #[test]
    fn test_point_vector_arithmetic() {
        let p = Point::new(1.0, 2.0);
        let q = Point::new(4.0, 6.0);
        let v = q - p;
        assert_eq!(v, Vector2::new(3.0, 4.0));
        assert_eq!(p + v, q);
        assert_eq!(q - v, p);
        assert_eq!(p.negate(), Point::new(-1.0, -2.0));
        assert_relative_eq!(p.distance(q), 5.0);
    }

    #[test]
    fn test_exact_equality() {
        assert_eq!(Vector2::new(0.1, 0.2), Vector2::new(0.1, 0.2));
        assert_ne!(Vector2::new(0.1 + 0.2, 0.0), Vector2::new(0.3, 0.0));
    }

    #[test]
    fn test_lexicographic_compare() {
        let a = Point::new(0.0, 1.0);
        let b = Point::new(0.0, 2.0);
        let c = Point::new(1.0, 0.0);
        assert_eq!(a.cmp_lex_x(&b), Ordering::Less);
        assert_eq!(c.cmp_lex_x(&a), Ordering::Greater);
        assert_eq!(c.cmp_lex_y(&a), Ordering::Less);
    }
}
