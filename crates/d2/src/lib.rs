//! # U-Collide 2D
//!
//! Convex polygon collision kernel for the U-Collide geometry engine.
//!
//! This crate answers two questions about a pair of convex polygons: do they
//! overlap, and how far must one move along a chosen direction to clear the
//! other.
//!
//! ## Features
//!
//! - Points, vectors, lines, rays and segments with tolerance-aware predicates
//! - Graham-scan convex hull
//! - Minkowski sum and difference by edge merging
//! - Separating-axis overlap test with minimum translation vector
//! - Directional penetration depth by shadow convolution in O(log n · log m)
//! - Step callbacks and traces for visualizing the search
//!
//! ## Quick Start
//!
//! ```rust
//! use u_collide_d2::{Line, PenetrationSolver, Point, Polygon};
//!
//! // Two overlapping squares
//! let p = Polygon::aabb(0.5, 0.5, 1.0, 1.0).unwrap();
//! let q = Polygon::aabb(1.0, 0.5, 1.0, 1.0).unwrap();
//!
//! let solver = PenetrationSolver::default();
//!
//! // Minimum translation vector
//! let mtv = solver.overlap_test(&p, &q);
//! assert!((mtv.vx() + 0.5).abs() < 1e-9);
//!
//! // Shortest push along the vertical line, upward
//! let vertical = Line::through(Point::new(0.0, 0.0), Point::new(0.0, 1.0)).unwrap();
//! let v = solver.penetration_vector(&p, &q, &vertical, true).unwrap();
//! assert!((v.vy() - 1.0).abs() < 1e-9);
//! ```
//!
//! ## Hulls and Sums
//!
//! ```rust
//! use u_collide_d2::{graham_scan, minkowski, Point, Polygon};
//!
//! let points = [(0.0, 0.0), (2.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.0, 2.0)];
//! let hull = graham_scan(&points.map(Point::from));
//! assert_eq!(hull.len(), 4);
//!
//! let square = Polygon::from_hull(&hull).unwrap();
//! let grown = minkowski::sum(&square, &square).unwrap();
//! assert!((grown.area() - 16.0).abs() < 1e-9);
//! ```

pub mod hull;
pub mod line;
pub mod minkowski;
pub mod penetration;
pub mod polygon;
pub mod sat;
pub mod segment;
pub mod shadow;
pub mod trace;
pub mod vector;

// Re-exports
pub use hull::graham_scan;
pub use line::{Intersection, Line, LineKind, Position, Ray};
pub use penetration::{penetration_vector, PenetrationSolver, ShadowExit};
pub use polygon::Polygon;
pub use sat::{overlap_test, AxisOverlap};
pub use segment::Segment;
pub use shadow::Chain;
pub use trace::{Phase, Run, SolverStep, SolverTrace, StepCallback};
pub use u_collide_core::{Config, Error, Result};
pub use vector::{Point, Vector2};
