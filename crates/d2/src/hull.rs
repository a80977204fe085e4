//! Convex hull of a point set.
//!
//! Monotone-chain variant of the Graham scan: sort lexicographically, then
//! build the lower and upper hulls with a stack of left turns. O(n log n).

use crate::vector::Point;
use u_collide_core::robust::is_left_turn;

/// Computes the convex hull of `points` in counter-clockwise order.
///
/// The hull starts at the lexicographically smallest point. Points on a hull
/// edge are dropped. Fewer than three distinct points, or a collinear set,
/// yield an empty hull.
pub fn graham_scan(points: &[Point]) -> Vec<Point> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.cmp_lex_x(b));
    sorted.dedup();

    if sorted.len() < 3 {
        return Vec::new();
    }

    let mut lower = half_hull(sorted.iter());
    let mut upper = half_hull(sorted.iter().rev());

    // Each half ends where the other starts.
    lower.pop();
    upper.pop();
    lower.extend(upper);

    if lower.len() < 3 {
        return Vec::new();
    }
    lower
}

fn half_hull<'a>(points: impl Iterator<Item = &'a Point>) -> Vec<Point> {
    let mut hull: Vec<Point> = Vec::new();
    for &p in points {
        while hull.len() >= 2
            && !is_left_turn(
                hull[hull.len() - 2].as_tuple(),
                hull[hull.len() - 1].as_tuple(),
                p.as_tuple(),
            )
        {
            hull.pop();
        }
        hull.push(p);
    }
    hull
}

#[cfg(test)]
mod tests {
    use super::*;
    use u_collide_core::robust::is_strictly_convex_ccw;

    fn points(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn test_square_with_interior_points() {
        let input = points(&[
            (0.0, 0.0),
            (0.0, 4.0),
            (1.0, 2.0),
            (2.0, 3.0),
            (3.0, 1.0),
            (4.0, 0.0),
            (4.0, 4.0),
        ]);
        let hull = graham_scan(&input);
        assert_eq!(hull, points(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(graham_scan(&[]).is_empty());
        assert!(graham_scan(&points(&[(0.0, 0.0), (1.0, 1.0)])).is_empty());
        assert!(graham_scan(&points(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)])).is_empty());
        assert!(graham_scan(&points(&[(1.0, 1.0), (1.0, 1.0), (1.0, 1.0)])).is_empty());
    }

    #[test]
    fn test_collinear_boundary_points_dropped() {
        let input = points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
        let hull = graham_scan(&input);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&Point::new(1.0, 0.0)));
    }

    #[test]
    fn test_duplicates_ignored() {
        let input = points(&[
            (0.0, 0.0),
            (0.0, 0.0),
            (3.0, 0.0),
            (0.0, 3.0),
            (3.0, 0.0),
        ]);
        assert_eq!(graham_scan(&input), points(&[(0.0, 0.0), (3.0, 0.0), (0.0, 3.0)]));
    }

    #[test]
    fn test_output_is_strictly_convex_ccw() {
        let input: Vec<Point> = (0..40)
            .map(|i| {
                let t = i as f64 * 0.7;
                Point::new(t.cos() * (1.0 + (i % 3) as f64), t.sin() * (2.0 + (i % 5) as f64))
            })
            .collect();
        let hull = graham_scan(&input);
        let coords: Vec<_> = hull.iter().map(|p| p.as_tuple()).collect();
        assert!(is_strictly_convex_ccw(&coords));
        assert!(hull.iter().all(|p| input.contains(p)));
    }
}
