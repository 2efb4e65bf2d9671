use tracing::debug;

use crate::collision::{detection, Aabb};
use crate::common::{Material, SolverConfig};
use crate::error::{PhysicsError, Result};
use crate::math::{Transform, Vec2};
use crate::shapes::{Polygon, ShapeId};

/// A rigid body made of zero or more convex polygons.
///
/// `position` is the body origin in world space; the attached polygons are
/// described relative to it and rotate about it. Mass is spread over the
/// polygons in proportion to their area.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    pub position: Vec2,
    /// Orientation in radians, counter-clockwise.
    pub angle: f64,
    pub velocity: Vec2,
    pub angular_velocity: f64,
    pub material: Material,

    shapes: Vec<Polygon>,
    is_static: bool,
    mass: f64,
    inv_mass: f64,
    inertia: f64,
    inv_inertia: f64,
}

impl RigidBody {
    /// Creates a dynamic body at the origin. A non-positive or non-finite
    /// mass yields a static body instead.
    pub fn new(mass: f64) -> Self {
        if !(mass > 0.0 && mass.is_finite()) {
            return Self::new_static();
        }
        Self {
            mass,
            inv_mass: 1.0 / mass,
            inertia: 0.0,
            is_static: false,
            ..Self::new_static()
        }
    }

    /// Creates a static body at the origin: infinite mass and inertia,
    /// never moved by gravity or contacts.
    pub fn new_static() -> Self {
        Self {
            position: Vec2::ZERO,
            angle: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            material: Material::default(),
            shapes: Vec::new(),
            is_static: true,
            mass: 0.0,
            inv_mass: 0.0,
            inertia: f64::INFINITY,
            inv_inertia: 0.0,
        }
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self.update_rotation();
        self
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self.update_rotation();
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: f64) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Builds a polygon from body-local vertices and attaches it.
    ///
    /// Every call attaches a new shape, even for identical vertices.
    pub fn add_polygon(&mut self, vertices: Vec<Vec2>) -> Result<ShapeId> {
        let polygon = Polygon::new(vertices)?;
        Ok(self.add_shape(polygon))
    }

    /// Attaches an already built polygon and brings it to the body's current pose.
    pub fn add_shape(&mut self, mut polygon: Polygon) -> ShapeId {
        polygon.update_rotation(&self.transform());
        let id = ShapeId(self.shapes.len());
        self.shapes.push(polygon);
        self.update_mass_properties();
        debug!(shape = id.index(), inertia = self.inertia, "attached polygon");
        id
    }

    pub fn shape(&self, id: ShapeId) -> Result<&Polygon> {
        self.shapes.get(id.0).ok_or(PhysicsError::UnknownShape(id.0))
    }

    pub fn shapes(&self) -> &[Polygon] {
        &self.shapes
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn inv_mass(&self) -> f64 {
        self.inv_mass
    }

    /// Moment of inertia about the body origin.
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    pub fn inv_inertia(&self) -> f64 {
        self.inv_inertia
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.angle)
    }

    /// Recomputes world geometry of every attached polygon from the current pose.
    pub fn update_rotation(&mut self) {
        let pose = self.transform();
        for shape in &mut self.shapes {
            shape.update_rotation(&pose);
        }
    }

    /// Bounding box around all attached polygons, or `None` for a body without shapes.
    pub fn aabb(&self) -> Option<Aabb> {
        let (first, rest) = self.shapes.split_first()?;
        let mut aabb = *first.aabb();
        for shape in rest {
            aabb.merge(shape.aabb());
        }
        Some(aabb)
    }

    /// Velocity of the material point at offset `r` from the body origin.
    pub fn velocity_at(&self, r: Vec2) -> Vec2 {
        self.velocity + Vec2::cross_scalar(self.angular_velocity, r)
    }

    /// Applies an instantaneous impulse at offset `r` from the body origin.
    /// Static bodies are unaffected.
    pub fn apply_impulse(&mut self, impulse: Vec2, r: Vec2) {
        self.velocity += impulse * self.inv_mass;
        self.angular_velocity += r.cross(impulse) * self.inv_inertia;
    }

    /// Linear momentum. Zero for static bodies.
    pub fn momentum(&self) -> Vec2 {
        self.velocity * self.mass
    }

    /// Tests every polygon of this body against every polygon of `other`,
    /// resolving each overlap found. Returns `true` if any pair overlapped.
    pub fn collides(&mut self, other: &mut RigidBody, solver: &SolverConfig) -> bool {
        let mut hit = false;
        for i in 0..self.shapes.len() {
            for j in 0..other.shapes.len() {
                let manifold = {
                    let (a, b) = (&self.shapes[i], &other.shapes[j]);
                    if !a.aabb().overlaps(b.aabb()) {
                        continue;
                    }
                    match detection::contact_manifold(a, b) {
                        Some(manifold) => manifold,
                        None => continue,
                    }
                };
                hit = true;
                detection::resolve(self, other, &manifold, solver);
            }
        }
        hit
    }

    fn update_mass_properties(&mut self) {
        if self.is_static {
            return;
        }
        let total_area: f64 = self.shapes.iter().map(Polygon::area).sum();
        self.inertia = if total_area > 0.0 {
            self.shapes
                .iter()
                .map(|s| s.moment_of_inertia(self.mass * s.area() / total_area))
                .sum()
        } else {
            0.0
        };
        self.inv_inertia = if self.inertia > 0.0 && self.inertia.is_finite() {
            1.0 / self.inertia
        } else {
            0.0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    const EPSILON: f64 = 1e-10;

    fn square_body(mass: f64, size: f64, position: Vec2) -> RigidBody {
        let mut body = RigidBody::new(mass).with_position(position);
        body.add_shape(Polygon::rectangle(size, size).unwrap());
        body
    }

    #[test]
    fn test_rigidbody_new_dynamic() {
        let body = RigidBody::new(2.0);
        assert!(!body.is_static());
        assert_eq!(body.mass(), 2.0);
        assert!((body.inv_mass() - 0.5).abs() < EPSILON);
        assert_eq!(body.inertia(), 0.0);
        assert_eq!(body.inv_inertia(), 0.0);
        assert_eq!(body.position, Vec2::ZERO);
        assert!(body.shapes().is_empty());
        assert_eq!(body.aabb(), None);
    }

    #[test]
    fn test_rigidbody_non_positive_mass_is_static() {
        for mass in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let body = RigidBody::new(mass);
            assert!(body.is_static());
            assert_eq!(body.inv_mass(), 0.0);
            assert_eq!(body.inv_inertia(), 0.0);
            assert!(body.inertia().is_infinite());
        }
    }

    #[test]
    fn test_add_polygon_appends_and_places_shape() {
        let mut body = RigidBody::new(1.0).with_position(Vec2::new(2.0, 3.0));
        let square = vec![
            Vec2::new(-0.5, -0.5),
            Vec2::new(0.5, -0.5),
            Vec2::new(0.5, 0.5),
            Vec2::new(-0.5, 0.5),
        ];
        let first = body.add_polygon(square.clone()).unwrap();
        let second = body.add_polygon(square).unwrap();
        assert_ne!(first, second);
        assert_eq!(body.shapes().len(), 2);

        let shape = body.shape(first).unwrap();
        assert!((shape.vertices()[0] - Vec2::new(1.5, 2.5)).magnitude() < EPSILON);
        assert!(matches!(body.shape(ShapeId(7)), Err(PhysicsError::UnknownShape(7))));
    }

    #[test]
    fn test_add_polygon_rejects_degenerate() {
        let mut body = RigidBody::new(1.0);
        let result = body.add_polygon(vec![Vec2::ZERO, Vec2::new(1.0, 0.0)]);
        assert!(matches!(result, Err(PhysicsError::InvalidShape { .. })));
        assert!(body.shapes().is_empty());
    }

    #[test]
    fn test_inertia_from_shapes() {
        let body = square_body(3.0, 2.0, Vec2::ZERO);
        // m * (w^2 + h^2) / 12
        assert!((body.inertia() - 2.0).abs() < EPSILON);
        assert!((body.inv_inertia() - 0.5).abs() < EPSILON);

        // two equal squares split the mass evenly
        let mut body = RigidBody::new(2.0);
        body.add_shape(Polygon::rectangle(1.0, 1.0).unwrap());
        body.add_shape(Polygon::rectangle(1.0, 1.0).unwrap());
        assert!((body.inertia() - 2.0 / 6.0).abs() < EPSILON);
    }

    #[test]
    fn test_static_body_keeps_infinite_inertia() {
        let mut body = RigidBody::new_static();
        body.add_shape(Polygon::rectangle(1.0, 1.0).unwrap());
        assert!(body.inertia().is_infinite());
        assert_eq!(body.inv_inertia(), 0.0);
    }

    #[test]
    fn test_update_rotation_follows_pose() {
        let mut body = square_body(1.0, 2.0, Vec2::ZERO);
        body.position = Vec2::new(5.0, 0.0);
        body.angle = PI / 4.0;
        body.update_rotation();

        let aabb = body.aabb().unwrap();
        let half_diagonal = 2.0f64.sqrt();
        assert!((aabb.x1 - (5.0 - half_diagonal)).abs() < EPSILON);
        assert!((aabb.x2 - (5.0 + half_diagonal)).abs() < EPSILON);
        assert!((aabb.y2 - half_diagonal).abs() < EPSILON);
    }

    #[test]
    fn test_apply_impulse() {
        let mut body = square_body(2.0, 1.0, Vec2::ZERO);
        // inertia = 2 * (1 + 1) / 12 = 1/3
        body.apply_impulse(Vec2::new(0.0, 4.0), Vec2::new(1.0, 0.0));
        assert!((body.velocity - Vec2::new(0.0, 2.0)).magnitude() < EPSILON);
        assert!((body.angular_velocity - 12.0).abs() < EPSILON);

        let mut ground = RigidBody::new_static();
        ground.add_shape(Polygon::rectangle(1.0, 1.0).unwrap());
        ground.apply_impulse(Vec2::new(10.0, 10.0), Vec2::new(1.0, 0.0));
        assert_eq!(ground.velocity, Vec2::ZERO);
        assert_eq!(ground.angular_velocity, 0.0);
    }

    #[test]
    fn test_velocity_at_and_momentum() {
        let body = RigidBody::new(3.0)
            .with_velocity(Vec2::new(1.0, 0.0))
            .with_angular_velocity(2.0);
        let v = body.velocity_at(Vec2::new(0.0, 1.0));
        assert!((v - Vec2::new(-1.0, 0.0)).magnitude() < EPSILON);
        assert_eq!(body.momentum(), Vec2::new(3.0, 0.0));
        assert_eq!(RigidBody::new_static().with_velocity(Vec2::new(1.0, 1.0)).momentum(), Vec2::ZERO);
    }

    #[test]
    fn test_collides_separated_leaves_state() {
        let solver = SolverConfig::default();
        let mut a = square_body(1.0, 1.0, Vec2::new(0.0, 0.0)).with_velocity(Vec2::new(1.0, 0.0));
        let mut b = square_body(1.0, 1.0, Vec2::new(3.0, 0.0)).with_velocity(Vec2::new(-1.0, 0.0));
        let (a0, b0) = (a.clone(), b.clone());

        assert!(!a.collides(&mut b, &solver));
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }
}
