//! # U-Collide Core
//!
//! Shared foundations for the U-Collide convex geometry kernel.
//!
//! This crate holds the pieces every geometry module depends on but that carry
//! no 2D types of their own.
//!
//! ## Core Components
//!
//! - **Errors**: [`Error`], [`Result`] - the kernel's error taxonomy
//! - **Configuration**: [`Config`] - tolerance settings threaded through predicates
//! - **Robust predicates**: [`robust`] - exact orientation tests and convexity checks
//!
//! ## Configuration
//!
//! ```rust
//! use u_collide_core::Config;
//!
//! let config = Config::new().with_epsilon(1e-6);
//!
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod config;
pub mod error;
pub mod robust;

// Re-exports
pub use config::{Config, DEFAULT_EPSILON, UNIT_TOLERANCE};
pub use error::{Error, Result};
pub use robust::Orientation;
