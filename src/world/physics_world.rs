use tracing::{debug, trace, warn};

use super::BodyId;
use crate::common::SolverConfig;
use crate::error::{PhysicsError, Result};
use crate::integration::integrator;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

/// Owns every simulated body and advances them with fixed substeps.
///
/// Each substep integrates all bodies, then tests every unordered pair of
/// bodies (skipping static/static pairs) and resolves overlaps in place.
/// Pairs are visited in insertion order, and resolution order affects the
/// result when a body touches several others in the same substep.
#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    pub gravity: Vec2,
    pub solver: SolverConfig,
    depth: f64,
    bodies: Vec<RigidBody>,
}

impl PhysicsWorld {
    /// Creates an empty world with zero gravity. `depth` is stored for the
    /// host and has no effect on stepping.
    pub fn new(depth: f64) -> Self {
        Self {
            gravity: Vec2::ZERO,
            solver: SolverConfig::default(),
            depth,
            bodies: Vec::new(),
        }
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Moves `body` into the world and returns its handle. Bodies are simulated
    /// in the order they were added and are never removed.
    pub fn add_body(&mut self, mut body: RigidBody) -> BodyId {
        body.update_rotation();
        let id = BodyId(self.bodies.len());
        debug!(
            body = id.index(),
            shapes = body.shapes().len(),
            is_static = body.is_static(),
            "added body"
        );
        self.bodies.push(body);
        id
    }

    pub fn body(&self, id: BodyId) -> Option<&RigidBody> {
        self.bodies.get(id.0)
    }

    /// Mutable access for hosts that push bodies around between steps. The
    /// shapes follow on the next step; call [`RigidBody::update_rotation`] to
    /// refresh them immediately.
    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        self.bodies.get_mut(id.0)
    }

    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Sum of the linear momenta of all dynamic bodies.
    pub fn total_momentum(&self) -> Vec2 {
        self.bodies
            .iter()
            .fold(Vec2::ZERO, |sum, body| sum + body.momentum())
    }

    /// Advances the simulation by `total_time`, split into `substeps` equal steps.
    ///
    /// Fails without touching any body if `substeps` is zero or `total_time`
    /// is negative or not finite.
    pub fn step(&mut self, total_time: f64, substeps: usize) -> Result<()> {
        if substeps == 0 {
            warn!(total_time, "rejected step with zero substeps");
            return Err(PhysicsError::ZeroSubsteps);
        }
        if !total_time.is_finite() || total_time < 0.0 {
            warn!(total_time, "rejected step with invalid duration");
            return Err(PhysicsError::InvalidTimeStep(total_time));
        }

        let dt = total_time / substeps as f64;
        let gravity = self.gravity;
        for substep in 0..substeps {
            for body in &mut self.bodies {
                integrator::integrate(body, gravity, dt);
            }
            let contacts = self.resolve_collisions();
            trace!(substep, dt, contacts, "substep done");
        }
        Ok(())
    }

    /// Tests every unordered body pair once and resolves overlaps.
    /// Returns the number of overlapping pairs.
    fn resolve_collisions(&mut self) -> usize {
        let solver = self.solver;
        let mut overlapping = 0;
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let (a, b) = body_pair_mut(&mut self.bodies, i, j);
                if a.is_static() && b.is_static() {
                    continue;
                }
                if a.collides(b, &solver) {
                    overlapping += 1;
                }
            }
        }
        overlapping
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Two distinct mutable bodies out of one slice. Requires `i < j`.
fn body_pair_mut(bodies: &mut [RigidBody], i: usize, j: usize) -> (&mut RigidBody, &mut RigidBody) {
    debug_assert!(i < j);
    let (head, tail) = bodies.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Material;
    use crate::shapes::Polygon;
    const EPSILON: f64 = 1e-9;

    fn square(mass: f64, size: f64, position: Vec2) -> RigidBody {
        let mut body = RigidBody::new(mass).with_position(position);
        body.add_shape(Polygon::rectangle(size, size).unwrap());
        body
    }

    fn static_square(size: f64, position: Vec2) -> RigidBody {
        let mut body = RigidBody::new_static().with_position(position);
        body.add_shape(Polygon::rectangle(size, size).unwrap());
        body
    }

    #[test]
    fn test_world_new() {
        let world = PhysicsWorld::new(3.0);
        assert!(world.is_empty());
        assert_eq!(world.gravity, Vec2::ZERO);
        assert_eq!(world.depth(), 3.0);
        assert_eq!(world.solver, SolverConfig::default());
        assert_eq!(PhysicsWorld::default().depth(), 0.0);
    }

    #[test]
    fn test_add_body_returns_sequential_handles() {
        let mut world = PhysicsWorld::default();
        let a = world.add_body(square(1.0, 1.0, Vec2::ZERO));
        let b = world.add_body(static_square(1.0, Vec2::new(5.0, 0.0)));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(world.len(), 2);
        assert!(world.body(b).unwrap().is_static());
        assert!(world.body(BodyId(2)).is_none());
    }

    #[test]
    fn test_step_rejects_bad_arguments() {
        let mut world = PhysicsWorld::default();
        world.gravity = Vec2::new(0.0, -10.0);
        let id = world.add_body(square(1.0, 1.0, Vec2::ZERO));

        assert_eq!(world.step(1.0, 0), Err(PhysicsError::ZeroSubsteps));
        assert!(matches!(world.step(-1.0, 1), Err(PhysicsError::InvalidTimeStep(_))));
        assert!(matches!(world.step(f64::NAN, 1), Err(PhysicsError::InvalidTimeStep(_))));
        assert_eq!(world.body(id).unwrap().velocity, Vec2::ZERO);
    }

    #[test]
    fn test_step_free_fall_matches_semi_implicit_euler() {
        let mut world = PhysicsWorld::default();
        world.gravity = Vec2::new(0.0, -10.0);
        let id = world.add_body(square(1.0, 1.0, Vec2::ZERO));

        world.step(1.0, 10).unwrap();

        // v_k = -k, x = -0.1 * (1 + 2 + ... + 10)
        let body = world.body(id).unwrap();
        assert!(body.velocity.x.abs() < EPSILON);
        assert!((body.velocity.y + 10.0).abs() < EPSILON);
        assert!(body.position.x.abs() < EPSILON);
        assert!((body.position.y + 5.5).abs() < EPSILON);
        assert!((body.shapes()[0].vertices()[0].y + 6.0).abs() < EPSILON);
    }

    #[test]
    fn test_step_leaves_static_pairs_alone() {
        let mut world = PhysicsWorld::default();
        world.gravity = Vec2::new(0.0, -10.0);
        let a = world.add_body(static_square(1.0, Vec2::new(1.0, 1.0)));
        let b = world.add_body(static_square(1.0, Vec2::new(1.0, 1.0)));

        world.step(1.0, 4).unwrap();
        assert_eq!(world.body(a).unwrap().position, Vec2::new(1.0, 1.0));
        assert_eq!(world.body(b).unwrap().position, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_box_dropped_on_ground_comes_to_rest() {
        let mut world = PhysicsWorld::default();
        world.gravity = Vec2::new(0.0, -10.0);
        let ground = world.add_body(static_square(2.0, Vec2::ZERO));
        let boxed = world.add_body(
            square(1.0, 1.0, Vec2::new(0.0, 2.0)).with_material(Material::new(0.0, 0.5)),
        );

        for _ in 0..120 {
            world.step(1.0 / 60.0, 10).unwrap();
        }

        assert_eq!(world.body(ground).unwrap().position, Vec2::ZERO);
        let body = world.body(boxed).unwrap();
        assert!(body.velocity.y.abs() < 1e-3, "still moving: {:?}", body.velocity);
        assert!((body.position.y - 1.5).abs() < 1e-3, "rest height: {}", body.position.y);
        assert!(body.position.x.abs() < 1e-6);
        assert!(body.angle.abs() < 1e-6);

        let lowest = body.shapes()[0].aabb().y1;
        assert!(lowest > 1.0 - 1e-3, "box sank into the ground: {lowest}");
    }

    #[test]
    fn test_head_on_squares_conserve_momentum() {
        let mut world = PhysicsWorld::default();
        let a = world.add_body(square(1.0, 1.0, Vec2::new(-2.0, 0.0)).with_velocity(Vec2::new(2.0, 0.0)));
        let b = world.add_body(square(1.0, 1.0, Vec2::new(2.0, 0.0)).with_velocity(Vec2::new(-2.0, 0.0)));
        let before = world.total_momentum();

        world.step(1.0, 100).unwrap();

        let after = world.total_momentum();
        assert!((after - before).magnitude() < EPSILON);

        let (a, b) = (world.body(a).unwrap(), world.body(b).unwrap());
        assert!(a.velocity.x < 0.0);
        assert!(b.velocity.x > 0.0);
        assert!((a.position.x + b.position.x).abs() < 1e-6);
        assert!(b.position.x - a.position.x >= 1.0 - 1e-6);
    }

    #[test]
    fn test_body_mut_allows_host_updates() {
        let mut world = PhysicsWorld::default();
        let id = world.add_body(square(1.0, 1.0, Vec2::ZERO));
        if let Some(body) = world.body_mut(id) {
            body.velocity = Vec2::new(1.0, 0.0);
        }
        world.step(1.0, 2).unwrap();
        assert!((world.body(id).unwrap().position.x - 1.0).abs() < EPSILON);
    }
}
