//! Error types for point validation.

use thiserror::Error;

use crate::point::Axis;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the public API.
///
/// Tree operations on well-formed points are total; the only failure is a
/// point that cannot be accepted in the first place.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// Coordinates that do not form a valid point.
    #[error("invalid point: {0}")]
    InvalidPoint(#[from] PointDefect),
}

/// Why a point was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum PointDefect {
    /// Wrong number of coordinates; carries the count that was found.
    #[error("expected 2 coordinates, found {0}")]
    Arity(usize),

    /// NaN or an infinity.
    #[error("{axis} coordinate is not finite ({value})")]
    NonFinite {
        /// Axis of the offending coordinate
        axis: Axis,
        /// The rejected value
        value: f64,
    },

    /// Text that is not a number; carries the offending token.
    #[error("cannot parse {0:?} as a coordinate")]
    Unparsable(String),
}
