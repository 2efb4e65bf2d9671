use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

/// Advances one body by `dt` with semi-implicit Euler: velocity first, then
/// pose from the new velocity, then the shapes are moved to the new pose.
///
/// Gravity only acts on dynamic bodies. Static bodies still follow whatever
/// velocity they were given, which makes them usable as kinematic platforms.
pub fn integrate(body: &mut RigidBody, gravity: Vec2, dt: f64) {
    if !body.is_static() {
        body.velocity += gravity * dt;
    }
    body.angle += body.angular_velocity * dt;
    body.position += body.velocity * dt;
    body.update_rotation();
}
