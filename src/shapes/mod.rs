pub mod edge;
pub mod polygon;

pub use edge::Edge;
pub use polygon::{EdgeQuery, Polygon};

/// Stable handle to a polygon attached to a [`RigidBody`](crate::RigidBody).
///
/// Handles stay valid for the lifetime of the body since shapes are never detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub(crate) usize);

impl ShapeId {
    pub fn index(self) -> usize {
        self.0
    }
}
