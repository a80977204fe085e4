//! Convex polygons.
//!
//! A [`Polygon`] is an ordered loop of at least three distinct vertices in
//! counter-clockwise order. Convexity is checked on demand with
//! [`Polygon::is_convex`], or up front by [`Polygon::convex`].
//!
//! ## Centre
//!
//! [`Polygon::center`] is the midpoint of the bounding box, not the centroid
//! of mass. SAT only needs a point that moves with the polygon.

use std::fmt;

use geo::Area;

use crate::hull::graham_scan;
use crate::line::{Line, Position};
use crate::vector::{Point, Vector2};
use u_collide_core::robust::{
    cmp_lex_x, is_ccw_robust, is_strictly_convex_ccw, signed_area_robust,
};
use u_collide_core::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A polygon given by its vertex loop.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Polygon {
    vertices: Vec<Point>,
    center: Point,
}

impl Polygon {
    /// Creates a polygon from its vertices, in order.
    ///
    /// Rejects fewer than three vertices, any vertex appearing twice and
    /// loops that enclose no area. Winding and convexity are not checked.
    pub fn new(vertices: Vec<Point>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(Error::DegenerateGeometry(format!(
                "polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }

        let coords: Vec<(f64, f64)> = vertices.iter().map(|p| p.as_tuple()).collect();

        // Equal vertices end up adjacent once sorted.
        let mut sorted = coords.clone();
        sorted.sort_by(|a, b| cmp_lex_x(*a, *b));
        if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(Error::DegenerateGeometry(format!(
                "repeated vertex {}",
                Point::from(pair[0])
            )));
        }

        if signed_area_robust(&coords) == 0.0 {
            return Err(Error::DegenerateGeometry(
                "polygon encloses no area".into(),
            ));
        }

        let center = bounding_box_center(&vertices);
        Ok(Self { vertices, center })
    }

    /// Creates a convex polygon, reversing clockwise input.
    pub fn convex(vertices: Vec<Point>) -> Result<Self> {
        let mut polygon = Self::new(vertices)?;
        if !is_ccw_robust(&polygon.to_tuples()) {
            polygon.vertices.reverse();
        }
        if !polygon.is_convex() {
            return Err(Error::NonConvexInput(format!(
                "vertices {:?} do not form a strictly convex loop",
                polygon.vertices
            )));
        }
        Ok(polygon)
    }

    /// Creates a polygon from coordinate pairs. See [`Polygon::convex`].
    pub fn from_coords(coords: &[(f64, f64)]) -> Result<Self> {
        Self::convex(coords.iter().copied().map(Point::from).collect())
    }

    /// Creates the convex hull of `points`.
    pub fn from_hull(points: &[Point]) -> Result<Self> {
        let hull = graham_scan(points);
        if hull.is_empty() {
            return Err(Error::DegenerateGeometry(format!(
                "{} points have no two-dimensional hull",
                points.len()
            )));
        }
        Self::new(hull)
    }

    /// Creates an axis-aligned rectangle centred at `(cx, cy)`.
    pub fn aabb(cx: f64, cy: f64, width: f64, height: f64) -> Result<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(Error::DegenerateGeometry(format!(
                "rectangle must have positive size, got {} x {}",
                width, height
            )));
        }
        let (hw, hh) = (width / 2.0, height / 2.0);
        Self::new(vec![
            Point::new(cx - hw, cy - hh),
            Point::new(cx + hw, cy - hh),
            Point::new(cx + hw, cy + hh),
            Point::new(cx - hw, cy + hh),
        ])
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false; a polygon has at least three vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex `i`, wrapping around the loop.
    #[inline]
    pub fn vertex(&self, i: usize) -> Point {
        self.vertices[i % self.vertices.len()]
    }

    /// Bounding-box midpoint.
    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Edge `i`, from vertex `i` to vertex `i + 1`, wrapping around.
    #[inline]
    pub fn edge(&self, i: usize) -> Vector2 {
        self.vertex(i + 1) - self.vertex(i)
    }

    /// All edge vectors, including the closing edge.
    pub fn edges(&self) -> Vec<Vector2> {
        (0..self.len()).map(|i| self.edge(i)).collect()
    }

    /// Index of the lowest vertex, the leftmost among ties.
    pub fn bottom_index(&self) -> usize {
        self.vertices
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.cmp_lex_y(b))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// Index of the highest vertex, the rightmost among ties.
    pub fn top_index(&self) -> usize {
        self.vertices
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.cmp_lex_y(b))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// `(min_x, min_y, max_x, max_y)`.
    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        bounding_box(&self.vertices)
    }

    // ------------------------------------------------------------------------
    // Predicates and measures
    // ------------------------------------------------------------------------

    /// True if every consecutive vertex triple turns strictly left.
    pub fn is_convex(&self) -> bool {
        is_strictly_convex_ccw(&self.to_tuples())
    }

    /// Shoelace area, positive for counter-clockwise loops.
    pub fn signed_area(&self) -> f64 {
        signed_area_robust(&self.to_tuples())
    }

    /// Unsigned area.
    pub fn area(&self) -> f64 {
        self.to_geo_polygon().unsigned_area()
    }

    /// True if `p` is inside or within `eps` of the boundary.
    ///
    /// Assumes a convex counter-clockwise polygon.
    pub fn contains_point(&self, p: Point, eps: f64) -> bool {
        (0..self.len()).all(|i| match Line::through(self.vertex(i), self.vertex(i + 1)) {
            Ok(edge) => edge.classify(p, eps) != Position::Right,
            Err(_) => true,
        })
    }

    // ------------------------------------------------------------------------
    // SAT support
    // ------------------------------------------------------------------------

    /// Outward unit normals of the edges, for separating-axis tests.
    ///
    /// Normals within `eps` of the X or Y axis collapse to a single
    /// [`Vector2::X_AXIS`] or [`Vector2::Y_AXIS`], whatever their sense.
    pub fn separating_axes(&self, eps: f64) -> Vec<Vector2> {
        let mut axes = Vec::with_capacity(self.len());
        let mut has_x = false;
        let mut has_y = false;

        for normal in self
            .edges()
            .iter()
            .filter_map(|e| e.right_normal().unit().ok())
        {
            if normal.vy().abs() <= eps {
                if !has_x {
                    axes.push(Vector2::X_AXIS);
                    has_x = true;
                }
            } else if normal.vx().abs() <= eps {
                if !has_y {
                    axes.push(Vector2::Y_AXIS);
                    has_y = true;
                }
            } else {
                axes.push(normal);
            }
        }

        axes
    }

    /// Interval `(min, max)` covered by the vertices projected onto `axis`.
    pub fn projection(&self, axis: &Vector2) -> (f64, f64) {
        self.vertices
            .iter()
            .map(|p| p.to_vector().dot(axis))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
                (lo.min(d), hi.max(d))
            })
    }

    // ------------------------------------------------------------------------
    // Transforms
    // ------------------------------------------------------------------------

    /// Shifts every vertex and the centre by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        for v in &mut self.vertices {
            *v = v.translate(dx, dy);
        }
        self.center = self.center.translate(dx, dy);
    }

    /// Returns a copy shifted by `offset`.
    pub fn translated(&self, offset: Vector2) -> Polygon {
        let mut moved = self.clone();
        moved.translate(offset.vx(), offset.vy());
        moved
    }

    /// Returns the polygon reflected through the origin.
    ///
    /// Point reflection is a half turn, so winding is preserved.
    pub fn negated(&self) -> Polygon {
        Polygon {
            vertices: self.vertices.iter().map(|p| p.negate()).collect(),
            center: self.center.negate(),
        }
    }

    /// Returns a copy whose first vertex is the lowest (then leftmost) one.
    pub fn normalize_vertex_order(&self) -> Polygon {
        let mut vertices = self.vertices.clone();
        vertices.rotate_left(self.bottom_index());
        Polygon {
            vertices,
            center: self.center,
        }
    }

    // ------------------------------------------------------------------------
    // Interop
    // ------------------------------------------------------------------------

    /// Vertices as coordinate pairs.
    pub fn to_tuples(&self) -> Vec<(f64, f64)> {
        self.vertices.iter().map(|p| p.as_tuple()).collect()
    }

    /// Converts to a closed `geo` polygon.
    pub fn to_geo_polygon(&self) -> geo::Polygon<f64> {
        let coords: Vec<geo::Coord<f64>> = self.vertices.iter().map(|&p| p.into()).collect();
        geo::Polygon::new(geo::LineString::from(coords), vec![])
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "]")
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn bounding_box(points: &[Point]) -> (f64, f64, f64, f64) {
    points.iter().fold(
        (
            f64::INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
        ),
        |(min_x, min_y, max_x, max_y), p| {
            (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
        },
    )
}

fn bounding_box_center(points: &[Point]) -> Point {
    let (min_x, min_y, max_x, max_y) = bounding_box(points);
    Point::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0)
}
