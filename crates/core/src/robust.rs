//! Robust geometric predicates.
//!
//! Orientation tests use Shewchuk's adaptive precision arithmetic, so the sign
//! of a turn is exact even for nearly collinear points. Every left-turn and
//! convexity decision in the kernel goes through this module.
//!
//! ## References
//!
//! - Shewchuk, J.R. (1997). "Adaptive Precision Floating-Point Arithmetic and
//!   Fast Robust Predicates for Computational Geometry"
//! - <https://www.cs.cmu.edu/~quake/robust.html>
//!
//! ## Example
//!
//! ```rust
//! use u_collide_core::robust::{orient2d, Orientation};
//!
//! let a = (0.0, 0.0);
//! let b = (1.0, 0.0);
//! let c = (0.5, 1.0);
//!
//! assert_eq!(orient2d(a, b, c), Orientation::CounterClockwise);
//! ```

use std::cmp::Ordering;

use robust::{orient2d as robust_orient2d, Coord};

/// Result of an orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Points are arranged counter-clockwise (left turn).
    CounterClockwise,
    /// Points are arranged clockwise (right turn).
    Clockwise,
    /// Points are collinear.
    Collinear,
}

impl Orientation {
    /// Returns true if the orientation is counter-clockwise.
    #[inline]
    pub fn is_ccw(self) -> bool {
        matches!(self, Orientation::CounterClockwise)
    }

    /// Returns true if the points are collinear.
    #[inline]
    pub fn is_collinear(self) -> bool {
        matches!(self, Orientation::Collinear)
    }
}

// ============================================================================
// Core Predicates
// ============================================================================

/// Determines the orientation of three 2D points.
///
/// Returns [`Orientation::CounterClockwise`] if `pc` lies to the left of the
/// directed line from `pa` to `pb`, [`Orientation::Clockwise`] if it lies to
/// the right, and [`Orientation::Collinear`] otherwise.
#[inline]
pub fn orient2d(pa: (f64, f64), pb: (f64, f64), pc: (f64, f64)) -> Orientation {
    let det = orient2d_raw(pa, pb, pc);

    if det > 0.0 {
        Orientation::CounterClockwise
    } else if det < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Returns the raw orientation determinant (twice the signed triangle area).
#[inline]
pub fn orient2d_raw(pa: (f64, f64), pb: (f64, f64), pc: (f64, f64)) -> f64 {
    robust_orient2d(
        Coord { x: pa.0, y: pa.1 },
        Coord { x: pb.0, y: pb.1 },
        Coord { x: pc.0, y: pc.1 },
    )
}

/// Returns true if `a -> b -> c` turns strictly left.
///
/// Collinear triples are not left turns; hull construction relies on this to
/// drop points lying on a hull edge.
#[inline]
pub fn is_left_turn(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> bool {
    orient2d(a, b, c).is_ccw()
}

// ============================================================================
// Polygon Predicates
// ============================================================================

/// Checks that every consecutive vertex triple, wrapping around, is a strict
/// left turn.
///
/// This accepts exactly the strictly convex counter-clockwise polygons. A
/// clockwise polygon, a polygon with a straight angle, or one with fewer than
/// three vertices is rejected.
pub fn is_strictly_convex_ccw(polygon: &[(f64, f64)]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    (0..n).all(|i| is_left_turn(polygon[i], polygon[(i + 1) % n], polygon[(i + 2) % n]))
}

/// Checks if a polygon has counter-clockwise winding order.
///
/// Decided by the exact turn at the lowest vertex.
pub fn is_ccw_robust(polygon: &[(f64, f64)]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    // The lowest-leftmost vertex is always convex, so its turn decides winding.
    let mut min_idx = 0;
    for (i, &p) in polygon.iter().enumerate() {
        if cmp_lex_y(p, polygon[min_idx]) == Ordering::Less {
            min_idx = i;
        }
    }

    let n = polygon.len();
    let prev = polygon[(min_idx + n - 1) % n];
    let curr = polygon[min_idx];
    let next = polygon[(min_idx + 1) % n];

    orient2d(prev, curr, next).is_ccw()
}

/// Computes the signed area of a polygon with compensated summation.
///
/// Positive for counter-clockwise winding, negative for clockwise.
pub fn signed_area_robust(polygon: &[(f64, f64)]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }

    // Kahan summation
    let mut sum = 0.0;
    let mut c = 0.0;

    for i in 0..n {
        let j = (i + 1) % n;
        let term = polygon[i].0 * polygon[j].1 - polygon[j].0 * polygon[i].1;

        let y = term - c;
        let t = sum + y;
        c = (t - sum) - y;
        sum = t;
    }

    sum / 2.0
}

// ============================================================================
// Ordering Predicates
// ============================================================================

/// Orders points by x, breaking ties by y.
#[inline]
pub fn cmp_lex_x(a: (f64, f64), b: (f64, f64)) -> Ordering {
    a.0.total_cmp(&b.0).then_with(|| a.1.total_cmp(&b.1))
}

/// Orders points by y, breaking ties by x.
#[inline]
pub fn cmp_lex_y(a: (f64, f64), b: (f64, f64)) -> Ordering {
    a.1.total_cmp(&b.1).then_with(|| a.0.total_cmp(&b.0))
}

// ============================================================================
// Tests
// ============================================================================
