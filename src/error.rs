//! Error type shared by shape construction and world stepping.

use thiserror::Error;

/// Errors reported by the simulator.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhysicsError {
    /// A polygon could not be built from the given vertices.
    #[error("invalid shape: {reason}")]
    InvalidShape {
        /// What was wrong with the vertex list.
        reason: String,
    },

    /// `PhysicsWorld::step` was asked to run zero substeps.
    #[error("substep count must be at least 1")]
    ZeroSubsteps,

    /// `PhysicsWorld::step` was given a negative or non-finite duration.
    #[error("invalid time step: {0}")]
    InvalidTimeStep(f64),

    /// A shape handle did not belong to the body it was used with.
    #[error("no shape with index {0} on this body")]
    UnknownShape(usize),
}

impl PhysicsError {
    pub(crate) fn invalid_shape(reason: impl Into<String>) -> Self {
        Self::InvalidShape { reason: reason.into() }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PhysicsError>;
