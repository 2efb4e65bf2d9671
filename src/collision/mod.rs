pub mod aabb;
pub mod contact;
pub mod detection;
pub mod manifold;

pub use aabb::Aabb;
pub use contact::Collision;
pub use detection::{contact_manifold, correct_positions, resolve};
pub use manifold::{ContactManifold, Incident};
