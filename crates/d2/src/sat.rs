//! Separating-axis overlap test.
//!
//! Two convex polygons are disjoint iff their projections onto some edge
//! normal do not overlap. When every axis overlaps, the axis with the
//! smallest overlap gives the minimum translation vector (MTV).

use crate::polygon::Polygon;
use crate::vector::Vector2;

/// Overlap of two polygons' projections onto one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisOverlap {
    /// Unit axis.
    pub axis: Vector2,
    /// `(span_p + span_q) / 2 − |centre_p − centre_q|`. Zero or negative
    /// means the axis separates the polygons.
    pub depth: f64,
    /// `+1` if P's projection centre is at or past Q's along the axis.
    pub sign: f64,
}

impl AxisOverlap {
    /// Measures the overlap of `p` and `q` along `axis`.
    pub fn measure(p: &Polygon, q: &Polygon, axis: Vector2) -> Self {
        let (p_min, p_max) = p.projection(&axis);
        let (q_min, q_max) = q.projection(&axis);
        let p_center = (p_min + p_max) / 2.0;
        let q_center = (q_min + q_max) / 2.0;

        let depth = ((p_max - p_min) + (q_max - q_min)) / 2.0 - (p_center - q_center).abs();
        let sign = if p_center >= q_center { 1.0 } else { -1.0 };

        Self { axis, depth, sign }
    }

    /// The translation of P along this axis that separates it from Q.
    pub fn push_vector(&self) -> Vector2 {
        self.axis.scale(self.sign * self.depth)
    }
}

/// Candidate axes: the separating axes of both polygons, without parallel
/// duplicates.
pub fn candidate_axes(p: &Polygon, q: &Polygon, eps: f64) -> Vec<Vector2> {
    let mut axes: Vec<Vector2> = Vec::new();
    for axis in p
        .separating_axes(eps)
        .into_iter()
        .chain(q.separating_axes(eps))
    {
        if !axes.iter().any(|a| a.cross(&axis).abs() <= eps) {
            axes.push(axis);
        }
    }
    axes
}

/// Returns the minimum translation vector pushing `p` out of `q`, or the zero
/// vector when they do not overlap.
///
/// Touching polygons (overlap depth within `eps` on some axis) do not overlap.
pub fn overlap_test(p: &Polygon, q: &Polygon, eps: f64) -> Vector2 {
    deepest_separation(p, q, eps)
        .map(|o| o.push_vector())
        .unwrap_or_else(Vector2::zero)
}

/// The least-deep axis when `p` and `q` overlap on every axis, else `None`.
pub fn deepest_separation(p: &Polygon, q: &Polygon, eps: f64) -> Option<AxisOverlap> {
    let mut best: Option<AxisOverlap> = None;

    for axis in candidate_axes(p, q, eps) {
        let overlap = AxisOverlap::measure(p, q, axis);
        if overlap.depth <= eps {
            return None;
        }
        if best.map_or(true, |b| overlap.depth < b.depth) {
            best = Some(overlap);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_overlapping_unit_squares() {
        let a = Polygon::aabb(0.5, 0.5, 1.0, 1.0).unwrap();
        let b = Polygon::aabb(1.0, 0.5, 1.0, 1.0).unwrap();
        let mtv = overlap_test(&a, &b, EPS);
        assert_relative_eq!(mtv.vx(), -0.5, epsilon = 1e-12);
        assert_relative_eq!(mtv.vy(), 0.0, epsilon = 1e-12);

        // Pushing the other way round flips the sign.
        let back = overlap_test(&b, &a, EPS);
        assert_relative_eq!(back.vx(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_disjoint_is_zero() {
        let a = Polygon::aabb(0.0, 0.0, 1.0, 1.0).unwrap();
        let b = Polygon::aabb(3.0, 0.0, 1.0, 1.0).unwrap();
        assert!(overlap_test(&a, &b, EPS).is_zero());
        assert!(deepest_separation(&a, &b, EPS).is_none());
    }

    #[test]
    fn test_touching_is_zero() {
        let a = Polygon::aabb(0.0, 0.0, 2.0, 2.0).unwrap();
        let b = Polygon::aabb(2.0, 0.5, 2.0, 2.0).unwrap();
        assert!(overlap_test(&a, &b, EPS).is_zero());
    }

    #[test]
    fn test_separated_by_slanted_axis() {
        // Bounding boxes overlap; only the hypotenuse normal separates.
        let tri = Polygon::from_coords(&[(0.0, 0.0), (2.0, 0.0), (0.0, 2.0)]).unwrap();
        let square = Polygon::aabb(1.6, 1.6, 1.0, 1.0).unwrap();
        assert!(overlap_test(&tri, &square, EPS).is_zero());
    }

    #[test]
    fn test_candidate_axes_drop_parallel_duplicates() {
        let a = Polygon::aabb(0.0, 0.0, 1.0, 1.0).unwrap();
        let b = Polygon::aabb(5.0, 5.0, 2.0, 3.0).unwrap();
        assert_eq!(candidate_axes(&a, &b, EPS).len(), 2);

        let tri = Polygon::from_coords(&[(0.0, 0.0), (2.0, 0.0), (0.0, 2.0)]).unwrap();
        assert_eq!(candidate_axes(&a, &tri, EPS).len(), 3);
    }

    #[test]
    fn test_mtv_picks_shallowest_axis() {
        let a = Polygon::aabb(0.0, 0.0, 4.0, 4.0).unwrap();
        let b = Polygon::aabb(1.0, 3.5, 4.0, 4.0).unwrap();
        let mtv = overlap_test(&a, &b, EPS);
        assert_relative_eq!(mtv.vx(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(mtv.vy(), -0.5, epsilon = 1e-12);
    }
}
