//! Surface properties used by the contact impulse solver.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Physical surface properties of a rigid body.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Material {
    /// Coefficient of restitution. Range [0, 1], 0 = no bounce.
    pub restitution: f64,
    /// Coulomb friction coefficient. Range [0, infinity).
    pub friction: f64,
}

impl Material {
    /// Creates a material, clamping both coefficients into their valid ranges.
    /// Non-finite inputs fall back to the defaults.
    pub fn new(restitution: f64, friction: f64) -> Self {
        let defaults = Self::default();
        Self {
            restitution: if restitution.is_finite() {
                restitution.clamp(0.0, 1.0)
            } else {
                defaults.restitution
            },
            friction: if friction.is_finite() { friction.max(0.0) } else { defaults.friction },
        }
    }

    /// Frictionless and perfectly inelastic.
    pub fn frictionless() -> Self {
        Self { restitution: 0.0, friction: 0.0 }
    }

    /// Restitution used for a contact between two materials: the less bouncy one wins.
    pub fn mix_restitution(&self, other: &Material) -> f64 {
        self.restitution.min(other.restitution)
    }

    /// Friction used for a contact between two materials: the geometric mean.
    pub fn mix_friction(&self, other: &Material) -> f64 {
        (self.friction * other.friction).sqrt()
    }
}

impl Default for Material {
    fn default() -> Self {
        Self { restitution: 0.2, friction: 0.5 }
    }
}
