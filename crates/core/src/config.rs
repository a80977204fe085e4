//! Tolerance configuration.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default distance tolerance for point-on-line and overlap tests.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Band around 1.0 within which a vector counts as unit length.
pub const UNIT_TOLERANCE: f64 = 0.01;

/// Kernel configuration.
///
/// One epsilon is shared by every geometric predicate: line and segment
/// classification, parallelism checks, SAT overlap and the penetration search.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Distance tolerance. Points closer than this to a line lie on it.
    pub epsilon: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the distance tolerance.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Checks that the tolerance is finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "epsilon must be finite and non-negative, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}
