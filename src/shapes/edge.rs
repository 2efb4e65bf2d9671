use crate::math::vec2::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A polygon boundary line in plane form: points `p` with `n·p == d`.
///
/// `n` is the outward unit normal, so interior points satisfy `n·p - d <= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    pub n: Vec2,
    pub d: f64,
}

impl Edge {
    /// Builds the edge running from `a` to `b` on a counter-clockwise polygon.
    /// Returns `None` when the two points coincide.
    pub fn through(a: Vec2, b: Vec2) -> Option<Self> {
        let n = (b - a).perp_cw().try_normalize()?;
        Some(Self { n, d: n.dot(a) })
    }

    /// Signed distance from `p` to the edge line, positive on the outside.
    pub fn distance_to(&self, p: Vec2) -> f64 {
        self.n.dot(p) - self.d
    }
}
