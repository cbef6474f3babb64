//! Error handling for pantokit
//!
//! Provides error types for all layers of the converter:
//! - Format errors (malformed PMD or SVG input)
//! - Geometry errors (physically unreachable targets)
//! - Convergence errors (inverse kinematics failures)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Format error type
///
/// Represents errors caused by malformed binary or SVG input.
/// Always attributable to a specific input file.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// First byte of a PMD buffer is not the expected magic number
    #[error("Invalid PMD magic number: expected 1, found {found}")]
    BadMagic {
        /// The byte found where the magic number was expected.
        found: u8,
    },

    /// Buffer ended before a declared field could be read
    #[error("Truncated PMD data at offset {offset}: needed {needed} more bytes")]
    Truncated {
        /// The byte offset at which the read was attempted.
        offset: usize,
        /// The number of bytes the field required.
        needed: usize,
    },

    /// SVG path element has no nested title label
    #[error("SVG path element without a <title> label")]
    MissingLabel,

    /// SVG path data could not be tokenized into command triples
    #[error("Malformed SVG path data: {reason}")]
    MalformedPath {
        /// The reason the path data was rejected.
        reason: String,
    },

    /// Document is not an SVG or lacks the expected root element
    #[error("Not an SVG document: {reason}")]
    NotSvg {
        /// The reason the document was rejected.
        reason: String,
    },
}

/// Geometry error type
///
/// Represents angle pairs or targets that have no physically valid
/// realization on the pantograph.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// The two arm circles do not intersect
    #[error("No intersection between circles (distance {distance:.4}, radii {r1:.4} and {r2:.4})")]
    NoIntersection {
        /// The distance between the circle centers.
        distance: f64,
        /// The radius of the first circle.
        r1: f64,
        /// The radius of the second circle.
        r2: f64,
    },

    /// Neither intersection candidate lies on the drawing side of the pivots
    #[error("No valid target below the pivots")]
    NoValidTarget,
}

/// Convergence error for inverse kinematics
///
/// Produced when every solver strategy has been tried without reaching
/// the convergence tolerance. Carries the target point and the names of
/// the attempted strategies for diagnostics.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Inverse kinematics failed to converge for ({x:.4}, {y:.4}) after trying {strategies:?}")]
pub struct ConvergenceError {
    /// The x coordinate of the unreachable target.
    pub x: f64,
    /// The y coordinate of the unreachable target.
    pub y: f64,
    /// The solver strategies that were attempted, in order.
    pub strategies: Vec<&'static str>,
}

/// Main error type for pantokit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Format error
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Convergence error
    #[error(transparent)]
    Convergence(#[from] ConvergenceError),

    /// Mechanism configuration error
    #[error("Invalid mechanism configuration: {0}")]
    Config(String),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a format error
    pub fn is_format_error(&self) -> bool {
        matches!(self, Error::Format(_))
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is a convergence error
    pub fn is_convergence_error(&self) -> bool {
        matches!(self, Error::Convergence(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
