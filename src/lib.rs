//! A small 2D rigid-body simulator for convex polygons.
//!
//! Bodies own one or more convex polygons and live in a [`PhysicsWorld`],
//! which advances them with fixed substeps: semi-implicit Euler integration,
//! then an exhaustive pairwise separating-axis test. Overlaps are resolved
//! with positional correction followed by a contact impulse.
//!
//! ```
//! use polygon_physics::{PhysicsWorld, Polygon, RigidBody, Vec2};
//!
//! let mut world = PhysicsWorld::new(0.0);
//! world.gravity = Vec2::new(0.0, -10.0);
//!
//! let mut ground = RigidBody::new_static();
//! ground.add_shape(Polygon::rectangle(10.0, 1.0)?);
//! world.add_body(ground);
//!
//! let mut crate_body = RigidBody::new(1.0).with_position(Vec2::new(0.0, 3.0));
//! crate_body.add_polygon(vec![
//!     Vec2::new(-0.5, -0.5),
//!     Vec2::new(0.5, -0.5),
//!     Vec2::new(0.5, 0.5),
//!     Vec2::new(-0.5, 0.5),
//! ])?;
//! let id = world.add_body(crate_body);
//!
//! for _ in 0..60 {
//!     world.step(1.0 / 60.0, 8)?;
//! }
//! assert!(world.body(id).unwrap().position.y < 3.0);
//! # Ok::<(), polygon_physics::PhysicsError>(())
//! ```

pub mod collision;
pub mod common;
pub mod error;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

pub use collision::{Aabb, Collision, ContactManifold};
pub use common::{Material, SolverConfig};
pub use error::{PhysicsError, Result};
pub use math::{Transform, Vec2};
pub use objects::RigidBody;
pub use shapes::{Edge, Polygon, ShapeId};
pub use world::{BodyId, PhysicsWorld};
