//! Error types for the geometry kernel.

use thiserror::Error;

/// Errors raised by geometric construction and algorithms.
///
/// Construction-time checks fail fast with a typed variant. An
/// [`Error::InvariantViolation`] marks an algorithm state that the geometric
/// argument rules out; it is a defect, never a recoverable condition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Coincident points, zero-length vectors or segments, too few vertices.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// A polygon failed the convexity check where convexity is required.
    #[error("non-convex input: {0}")]
    NonConvexInput(String),

    /// Parallel or coincident lines, or an axis that is undefined for a line.
    #[error("no unique intersection: {0}")]
    NoUniqueIntersection(String),

    /// An algorithm branch reached a state that should be unreachable.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for kernel operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DegenerateGeometry("points coincide".into());
        assert_eq!(err.to_string(), "degenerate geometry: points coincide");

        let err = Error::InvariantViolation("chains exhausted".into());
        assert_eq!(err.to_string(), "invariant violation: chains exhausted");
    }
}
