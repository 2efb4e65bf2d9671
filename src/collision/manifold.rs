use crate::math::vec2::Vec2;

/// Which polygon of a tested pair supplies the penetrating vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Incident {
    /// The first polygon's vertices lie inside the second.
    First,
    /// The second polygon's vertices lie inside the first.
    Second,
}

/// Contact information for one overlapping polygon pair, taken along the
/// axis of least penetration.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactManifold {
    pub incident: Incident,
    /// Unit normal pointing from the incident body toward the reference body.
    pub normal: Vec2,
    /// Penetration depth along `normal`, never negative.
    pub depth: f64,
    /// Incident vertices contained in the reference polygon, in world space.
    pub points: Vec<Vec2>,
}
