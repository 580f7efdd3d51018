//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrimError {
    /// Quadrangle covering the whole sphere was requested. Such a region has no boundary and
    /// cannot be represented by a polygon.
    #[error("quadrangle covers the whole sphere and cannot be represented by a polygon")]
    WholeSphere,

    /// Clip region parameters are not valid.
    #[error("invalid clip limits: {0}")]
    InvalidLimits(String),

    /// Input coordinates are malformed.
    #[error("invalid input geometry: {0}")]
    InvalidInput(String),

    /// A ring visits a pole with more vertices than any known configuration.
    #[error("ring {ring} has {count} vertices at the pole, at most 3 are supported")]
    TooManyPolarVertices {
        /// Index of the ring in the ring set.
        ring: usize,
        /// Number of polar vertices found.
        count: usize,
    },

    /// A ring has two polar vertices which are not next to each other.
    #[error("ring {ring} has polar vertices which are not adjacent")]
    NonAdjacentPolarVertices {
        /// Index of the ring in the ring set.
        ring: usize,
    },

    /// More than two fragments meet at one boundary point and cannot be paired.
    #[error("fragments meet at boundary position {position} with no way to pair them")]
    AmbiguousJunction {
        /// Position of the junction along the boundary.
        position: f64,
    },

    /// Reconnection of trimmed fragments did not finish. Usually caused by self-crossing input.
    #[error("fragment tracing did not terminate after {steps} steps")]
    TracingDidNotTerminate {
        /// Number of steps made before giving up.
        steps: usize,
    },
}
