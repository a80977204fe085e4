//! Minkowski sums of convex polygons.
//!
//! The edges of a convex polygon, walked counter-clockwise from its lowest
//! vertex, are already sorted by angle. The sum is built by merging the two
//! sorted edge sequences, as in the merge step of merge sort. O(n + m).

use std::cmp::Ordering;

use crate::polygon::Polygon;
use crate::vector::{Point, Vector2};
use u_collide_core::robust::orient2d;
use u_collide_core::{Error, Result};

/// Computes the Minkowski sum `P ⊕ Q` of two convex polygons.
///
/// Both inputs are normalized first so that each walk starts at its lowest
/// (then leftmost) vertex. Edges with exactly the same direction are merged,
/// so the result has at most `|P| + |Q|` vertices, each equal to some
/// `p_i + q_j`.
///
/// # Errors
///
/// [`Error::NonConvexInput`] if either polygon is not strictly convex and
/// counter-clockwise.
pub fn sum(p: &Polygon, q: &Polygon) -> Result<Polygon> {
    require_convex(p, "first")?;
    require_convex(q, "second")?;

    let p = p.normalize_vertex_order();
    let q = q.normalize_vertex_order();
    let (n, m) = (p.len(), q.len());

    let mut vertices = Vec::with_capacity(n + m);
    let (mut i, mut j) = (0, 0);

    while i < n || j < m {
        vertices.push(p.vertex(i) + q.vertex(j).to_vector());

        let order = if i == n {
            Ordering::Greater
        } else if j == m {
            Ordering::Less
        } else {
            cmp_edge_angle(&p.edge(i), &q.edge(j))
        };

        match order {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                i += 1;
                j += 1;
            }
        }
    }

    Polygon::new(vertices)
}

/// Computes the Minkowski difference `P ⊕ (−Q)`.
///
/// `P + v` and `Q` overlap exactly when `−v` lies inside `difference(P, Q)`
/// translated by the offset between their reference points.
pub fn difference(p: &Polygon, q: &Polygon) -> Result<Polygon> {
    sum(p, &q.negated())
}

/// Computes the Minkowski sum as the hull of all pairwise vertex sums.
///
/// O(nm log nm). Used as a reference for [`sum`].
pub fn brute_force_sum(p: &Polygon, q: &Polygon) -> Result<Polygon> {
    let sums: Vec<Point> = p
        .vertices()
        .iter()
        .flat_map(|&a| q.vertices().iter().map(move |&b| a + b.to_vector()))
        .collect();
    Polygon::from_hull(&sums)
}

/// Orders two edge vectors by angle in `[0, 2π)`.
///
/// Edges pointing in exactly the same direction compare equal, decided with
/// an exact orientation test rather than by comparing floating angles.
pub fn cmp_edge_angle(a: &Vector2, b: &Vector2) -> Ordering {
    let same_direction = orient2d((0.0, 0.0), (a.vx(), a.vy()), (b.vx(), b.vy())).is_collinear()
        && a.dot(b) > 0.0;
    if same_direction {
        Ordering::Equal
    } else {
        a.angle().total_cmp(&b.angle())
    }
}

fn require_convex(polygon: &Polygon, which: &str) -> Result<()> {
    if polygon.is_convex() {
        Ok(())
    } else {
        Err(Error::NonConvexInput(format!(
            "{} Minkowski operand {} is not convex",
            which, polygon
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Polygon {
        Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap()
    }

    #[test]
    fn test_square_plus_square() {
        let big = Polygon::aabb(0.0, 0.0, 2.0, 2.0).unwrap();
        let s = sum(&unit_square(), &big).unwrap();
        assert_eq!(s.len(), 4);
        assert_relative_eq!(s.area(), 9.0);
        assert_eq!(s.vertices()[0], Point::new(-1.0, -1.0));
    }

    #[test]
    fn test_square_plus_triangle() {
        let tri = Polygon::from_coords(&[(0.0, 0.0), (2.0, 0.0), (1.0, 2.0)]).unwrap();
        let s = sum(&unit_square(), &tri).unwrap();
        // The bottom edges share a direction and merge.
        assert_eq!(s.len(), 6);
        assert!(s.is_convex());
        assert_relative_eq!(s.area(), brute_force_sum(&unit_square(), &tri).unwrap().area());
    }

    #[test]
    fn test_vertex_order_independent() {
        let tri = Polygon::from_coords(&[(1.0, 2.0), (0.0, 0.0), (2.0, 0.0)]).unwrap();
        let rotated = Polygon::from_coords(&[(2.0, 0.0), (1.0, 2.0), (0.0, 0.0)]).unwrap();
        assert_eq!(
            sum(&unit_square(), &tri).unwrap(),
            sum(&unit_square(), &rotated).unwrap()
        );
    }

    #[test]
    fn test_rejects_non_convex() {
        let l_shape = Polygon::new(
            [
                (0.0, 0.0),
                (2.0, 0.0),
                (2.0, 1.0),
                (1.0, 1.0),
                (1.0, 2.0),
                (0.0, 2.0),
            ]
            .iter()
            .copied()
            .map(Point::from)
            .collect(),
        )
        .unwrap();
        assert!(matches!(
            sum(&unit_square(), &l_shape),
            Err(Error::NonConvexInput(_))
        ));
    }

    #[test]
    fn test_difference_contains_offsets_of_overlap() {
        let a = unit_square();
        let b = Polygon::aabb(0.0, 0.0, 1.0, 1.0).unwrap();
        let d = difference(&a, &b).unwrap();
        // a and b overlap, so the origin lies in a ⊕ (−b).
        assert!(d.contains_point(Point::origin(), 1e-9));
        assert_relative_eq!(d.area(), 4.0);
    }

    #[test]
    fn test_cmp_edge_angle() {
        let right = Vector2::new(1.0, 0.0);
        assert_eq!(cmp_edge_angle(&right, &Vector2::new(3.0, 0.0)), Ordering::Equal);
        assert_eq!(cmp_edge_angle(&right, &Vector2::new(0.0, 1.0)), Ordering::Less);
        assert_eq!(cmp_edge_angle(&Vector2::new(0.0, -1.0), &right), Ordering::Greater);
        assert_eq!(cmp_edge_angle(&right, &Vector2::new(-1.0, 0.0)), Ordering::Less);
        assert_eq!(
            cmp_edge_angle(&Vector2::new(1.0, 3.0), &Vector2::new(2.0, 6.0)),
            Ordering::Equal
        );
    }
}
