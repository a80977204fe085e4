//! Bounded segments.

use crate::line::{Intersection, Line, Position};
use crate::vector::{Point, Vector2};
use u_collide_core::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A segment from `p1` to `p2`, holding its supporting [`Line`].
///
/// "Above" and "below" follow the direction of travel from `p1` to `p2`, so
/// they keep their meaning however the endpoints are ordered in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment {
    line: Line,
    p1: Point,
    p2: Point,
    ascending: bool,
}

impl Segment {
    /// Creates the segment from `p1` to `p2`.
    pub fn new(p1: Point, p2: Point) -> Result<Self> {
        let line = Line::through(p1, p2).map_err(|_| {
            Error::DegenerateGeometry(format!("zero-length segment at {}", p1))
        })?;
        Ok(Self {
            line,
            p1,
            p2,
            ascending: p1.cmp_lex_x(&p2).is_lt(),
        })
    }

    #[inline]
    pub fn p1(&self) -> Point {
        self.p1
    }

    #[inline]
    pub fn p2(&self) -> Point {
        self.p2
    }

    /// The supporting line, directed from `p1` to `p2`.
    #[inline]
    pub fn line(&self) -> &Line {
        &self.line
    }

    /// True when `p1` is lexicographically smaller (by x, then y) than `p2`.
    #[inline]
    pub fn is_ascending(&self) -> bool {
        self.ascending
    }

    /// Endpoints ordered lexicographically by x, then y.
    pub fn lexicographic_endpoints(&self) -> (Point, Point) {
        if self.ascending {
            (self.p1, self.p2)
        } else {
            (self.p2, self.p1)
        }
    }

    /// Displacement from `p1` to `p2`.
    #[inline]
    pub fn vector(&self) -> Vector2 {
        self.p2 - self.p1
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.p1.distance(self.p2)
    }

    pub fn midpoint(&self) -> Point {
        Point::new((self.p1.x + self.p2.x) / 2.0, (self.p1.y + self.p2.y) / 2.0)
    }

    /// Classifies `p` against the segment.
    ///
    /// Off-line points are [`Position::Left`] or [`Position::Right`] of the
    /// supporting line. On-line points are [`Position::Collides`] between the
    /// endpoints, [`Position::CollinearBelow`] before `p1` and
    /// [`Position::CollinearAbove`] past `p2`.
    pub fn classify(&self, p: Point, eps: f64) -> Position {
        match self.line.classify(p, eps) {
            Position::Collides => {}
            side => return side,
        }

        let along = (p - self.p1).dot(&self.line.direction());
        if along < -eps {
            Position::CollinearBelow
        } else if along > self.length() + eps {
            Position::CollinearAbove
        } else {
            Position::Collides
        }
    }

    /// Point where `line` crosses the segment, if it does.
    ///
    /// A line containing the segment has no single crossing point and is
    /// reported as [`Error::NoUniqueIntersection`].
    pub fn intersect_line(&self, line: &Line, eps: f64) -> Result<Option<Point>> {
        match self.line.intersect(line, eps) {
            Intersection::Point(p) => Ok((self.classify(p, eps) == Position::Collides).then_some(p)),
            Intersection::Parallel => Ok(None),
            Intersection::Coincident { .. } => Err(Error::NoUniqueIntersection(format!(
                "line contains segment {} -> {}",
                self.p1, self.p2
            ))),
        }
    }
}
