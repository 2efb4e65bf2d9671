#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// World-wide settings for contact resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// Passes over a manifold's contacts when applying impulses. Zero skips
    /// the impulse solve, leaving only the positional correction.
    pub velocity_iterations: usize,
    /// Approach speed below which contacts are treated as perfectly inelastic.
    pub restitution_threshold: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            velocity_iterations: 10,
            restitution_threshold: 0.5,
        }
    }
}
