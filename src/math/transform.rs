use super::vec2::Vec2;

/// A rigid pose: rotation followed by translation. The cosine and sine of the
/// angle are computed once so that a whole polygon can be transformed cheaply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub angle: f64,
    cos: f64,
    sin: f64,
}

impl Transform {
    pub fn new(position: Vec2, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { position, angle, cos, sin }
    }

    pub fn identity() -> Self {
        Self::new(Vec2::ZERO, 0.0)
    }

    /// Maps a body-local point into world space.
    pub fn apply(&self, local: Vec2) -> Vec2 {
        self.position + self.rotate(local)
    }

    /// Rotates a direction without translating it.
    pub fn rotate(&self, direction: Vec2) -> Vec2 {
        direction.rotate_by(self.cos, self.sin)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
