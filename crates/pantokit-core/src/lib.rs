//! # Pantokit Core
//!
//! Core types and utilities for pantokit.
//! Provides the shared data model, the pantograph mechanism
//! configuration, the circle-intersection geometry primitive, and the
//! error taxonomy used across all crates.

pub mod config;
pub mod error;
pub mod geometry;
pub mod types;

pub use config::MechanismConfig;
pub use error::{ConvergenceError, Error, FormatError, GeometryError, Result};
pub use geometry::intersect_circles;
pub use types::{AnglePair, PathDocument, PmdDocument, Point, Segment};
