//! Polygon shadows.
//!
//! The *left shadow* of a convex polygon is the region swept when the polygon
//! slides to `x = −∞`. Its boundary is the polygon's right chain (the walk
//! from the lowest vertex to the highest one) plus two horizontal rays to
//! `x = −∞` at the chain's ends. The *inverted right shadow* is the left
//! shadow of the reflected polygon, so its chain is the polygon's left chain
//! negated.
//!
//! Shadows are never materialized as regions; a [`Chain`] stores the finite
//! part of the boundary and the caps stay implicit.
//!
//! ## Edge angles
//!
//! Every chain edge points up, or right along the bottom, so its angle lies
//! in `[0, π)` and angles never decrease along the chain. The penetration
//! search relies on this order to merge two chains without building their
//! sum.

use std::ops::Range;

use crate::polygon::Polygon;
use crate::vector::{Point, Vector2};
use u_collide_core::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rounding allowance when checking that `atan2` angles never decrease.
const ANGLE_SLACK: f64 = 1e-12;

/// An open convex chain with angles in `[0, π)` that never decrease.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Chain {
    vertices: Vec<Point>,
    edges: Vec<Vector2>,
    angles: Vec<f64>,
}

impl Chain {
    /// Builds a chain from its vertices, checking the angle order.
    ///
    /// # Errors
    ///
    /// [`Error::DegenerateGeometry`] for fewer than two vertices or a
    /// repeated vertex; [`Error::NonConvexInput`] when an edge angle leaves
    /// `[0, π)` or decreases.
    pub fn new(vertices: Vec<Point>) -> Result<Self> {
        if vertices.len() < 2 {
            return Err(Error::DegenerateGeometry(format!(
                "chain needs at least 2 vertices, got {}",
                vertices.len()
            )));
        }

        let edges: Vec<Vector2> = vertices.windows(2).map(|w| w[1] - w[0]).collect();
        if let Some(k) = edges.iter().position(|e| e.is_zero()) {
            return Err(Error::DegenerateGeometry(format!(
                "repeated chain vertex {} at index {}",
                vertices[k], k
            )));
        }

        let angles: Vec<f64> = edges.iter().map(|e| e.angle()).collect();
        let out_of_range = angles.iter().any(|&a| a >= std::f64::consts::PI);
        let decreasing = angles.windows(2).any(|w| w[1] < w[0] - ANGLE_SLACK);
        if out_of_range || decreasing {
            return Err(Error::NonConvexInput(format!(
                "chain angles {:?} are not a non-decreasing sequence in [0, π)",
                angles
            )));
        }

        Ok(Self {
            vertices,
            edges,
            angles,
        })
    }

    /// The right chain of `polygon`, bounding its left shadow.
    pub fn left_shadow(polygon: &Polygon) -> Result<Self> {
        let (bottom, top) = (polygon.bottom_index(), polygon.top_index());
        Self::new(walk(polygon, bottom, top).collect())
    }

    /// The left chain of `polygon`, negated: the boundary of its inverted
    /// right shadow.
    pub fn inverted_right_shadow(polygon: &Polygon) -> Result<Self> {
        let (bottom, top) = (polygon.bottom_index(), polygon.top_index());
        Self::new(walk(polygon, top, bottom).map(Point::negate).collect())
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    pub fn vertex(&self, i: usize) -> Point {
        self.vertices[i]
    }

    #[inline]
    pub fn edge(&self, i: usize) -> Vector2 {
        self.edges[i]
    }

    #[inline]
    pub fn angle(&self, i: usize) -> f64 {
        self.angles[i]
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The lowest vertex, where the bottom cap starts.
    #[inline]
    pub fn first(&self) -> Point {
        self.vertices[0]
    }

    /// The highest vertex, where the top cap starts.
    #[inline]
    pub fn last(&self) -> Point {
        self.vertices[self.vertices.len() - 1]
    }

    /// Number of edges whose angle is strictly less than `angle`.
    #[inline]
    pub fn count_below(&self, angle: f64) -> usize {
        self.angles.partition_point(|&a| a < angle)
    }

    /// Number of edges whose angle is at most `angle`.
    #[inline]
    pub fn count_up_to(&self, angle: f64) -> usize {
        self.angles.partition_point(|&a| a <= angle)
    }

    /// Copies the sub-chain made of the edges in `edges`.
    pub fn slice(&self, edges: Range<usize>) -> Result<Chain> {
        if edges.start >= edges.end || edges.end > self.edge_count() {
            return Err(Error::DegenerateGeometry(format!(
                "edge range {:?} is empty or outside 0..{}",
                edges,
                self.edge_count()
            )));
        }
        Ok(Chain {
            vertices: self.vertices[edges.start..=edges.end].to_vec(),
            edges: self.edges[edges.clone()].to_vec(),
            angles: self.angles[edges].to_vec(),
        })
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Vertices of `polygon` from index `from` to index `to` inclusive, walking
/// forward around the loop.
fn walk(polygon: &Polygon, from: usize, to: usize) -> impl Iterator<Item = Point> + '_ {
    let n = polygon.len();
    let count = (to + n - from) % n + 1;
    (0..count).map(move |k| polygon.vertex(from + k))
}
