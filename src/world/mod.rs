pub mod physics_world;

pub use physics_world::PhysicsWorld;

/// Handle to a body owned by a [`PhysicsWorld`], returned by `add_body`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub(crate) usize);

impl BodyId {
    pub fn index(self) -> usize {
        self.0
    }
}
