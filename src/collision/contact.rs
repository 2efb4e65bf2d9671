//! Single-point contact record and its velocity impulse.

use crate::common::SolverConfig;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

/// One penetrating vertex between two bodies.
///
/// Built and consumed inside a single contact resolution; never stored on a
/// body or in the world. Body `a` owns the penetrating vertex and `normal`
/// points from `a` toward `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// World-space contact point.
    pub position: Vec2,
    pub normal: Vec2,
    pub depth: f64,
    /// Contact point relative to body `a`'s origin.
    pub r1: Vec2,
    /// Contact point relative to body `b`'s origin.
    pub r2: Vec2,

    restitution_bias: f64,
    friction: f64,
    normal_inv_mass: f64,
    tangent_inv_mass: f64,
    normal_impulse: f64,
    tangent_impulse: f64,
}

impl Collision {
    /// Captures the contact geometry and the pre-impact approach speed, which
    /// fixes the bounce target for the whole solve.
    pub fn new(
        position: Vec2,
        normal: Vec2,
        depth: f64,
        a: &RigidBody,
        b: &RigidBody,
        solver: &SolverConfig,
    ) -> Self {
        let r1 = position - a.position;
        let r2 = position - b.position;
        let tangent = normal.perp_cw();

        let approach = (b.velocity_at(r2) - a.velocity_at(r1)).dot(normal);
        let restitution = a.material.mix_restitution(&b.material);
        let restitution_bias = if approach < -solver.restitution_threshold {
            -restitution * approach
        } else {
            0.0
        };

        Self {
            position,
            normal,
            depth: depth.abs(),
            r1,
            r2,
            restitution_bias,
            friction: a.material.mix_friction(&b.material),
            normal_inv_mass: inverse_effective_mass(a, b, r1, r2, normal),
            tangent_inv_mass: inverse_effective_mass(a, b, r1, r2, tangent),
            normal_impulse: 0.0,
            tangent_impulse: 0.0,
        }
    }

    /// Total impulse applied along the normal so far.
    pub fn normal_impulse(&self) -> f64 {
        self.normal_impulse
    }

    /// One pass of the impulse solve for a lone contact: friction first,
    /// then the normal impulse.
    pub fn solve(&mut self, a: &mut RigidBody, b: &mut RigidBody) {
        self.solve_friction(a, b);
        self.solve_normal(a, b);
    }

    /// Normal impulse for this contact alone. The accumulated impulse never
    /// goes negative, so contacts only push.
    pub fn solve_normal(&mut self, a: &mut RigidBody, b: &mut RigidBody) {
        if self.normal_inv_mass <= 0.0 {
            return;
        }
        let vn = self.relative_velocity(a, b).dot(self.normal);
        let delta = (self.restitution_bias - vn) / self.normal_inv_mass;
        let accumulated = (self.normal_impulse + delta).max(0.0);
        let applied = accumulated - self.normal_impulse;
        self.normal_impulse = accumulated;
        self.apply(a, b, self.normal * applied);
    }

    /// Friction impulse, clamped to the Coulomb cone `|jt| <= μ·jn` of the
    /// normal impulse accumulated so far.
    pub fn solve_friction(&mut self, a: &mut RigidBody, b: &mut RigidBody) {
        if self.tangent_inv_mass <= 0.0 || self.friction <= 0.0 {
            return;
        }
        let tangent = self.normal.perp_cw();
        let vt = self.relative_velocity(a, b).dot(tangent);
        let limit = self.friction * self.normal_impulse;
        let accumulated =
            (self.tangent_impulse - vt / self.tangent_inv_mass).clamp(-limit, limit);
        let applied = accumulated - self.tangent_impulse;
        self.tangent_impulse = accumulated;
        self.apply(a, b, tangent * applied);
    }

    /// Solves the normal impulses of two contacts sharing a normal together,
    /// as a 2x2 linear complementarity problem.
    ///
    /// Both contacts end up with the same treatment regardless of which one
    /// comes first. Falls back to one contact after the other when the pair
    /// is badly conditioned (e.g. both points on the same line of action).
    pub fn solve_normal_pair(
        first: &mut Collision,
        second: &mut Collision,
        a: &mut RigidBody,
        b: &mut RigidBody,
    ) {
        let normal = first.normal;
        let k11 = first.normal_inv_mass;
        let k22 = second.normal_inv_mass;
        let k12 = a.inv_mass()
            + b.inv_mass()
            + first.r1.cross(normal) * second.r1.cross(normal) * a.inv_inertia()
            + first.r2.cross(normal) * second.r2.cross(normal) * b.inv_inertia();
        let det = k11 * k22 - k12 * k12;
        if !(k11 * k11 < MAX_CONDITION_NUMBER * det) {
            first.solve_normal(a, b);
            second.solve_normal(a, b);
            return;
        }

        let (old1, old2) = (first.normal_impulse, second.normal_impulse);
        let vn1 = first.relative_velocity(a, b).dot(normal);
        let vn2 = second.relative_velocity(a, b).dot(normal);
        let b1 = vn1 - first.restitution_bias - (k11 * old1 + k12 * old2);
        let b2 = vn2 - second.restitution_bias - (k12 * old1 + k22 * old2);

        let Some((x1, x2)) = complementary_pair(k11, k12, k22, det, b1, b2) else {
            return;
        };
        first.normal_impulse = x1;
        second.normal_impulse = x2;
        first.apply(a, b, normal * (x1 - old1));
        second.apply(a, b, normal * (x2 - old2));
    }

    fn relative_velocity(&self, a: &RigidBody, b: &RigidBody) -> Vec2 {
        b.velocity_at(self.r2) - a.velocity_at(self.r1)
    }

    fn apply(&self, a: &mut RigidBody, b: &mut RigidBody, impulse: Vec2) {
        a.apply_impulse(-impulse, self.r1);
        b.apply_impulse(impulse, self.r2);
    }
}

/// Largest tolerated ratio between `k11²` and the determinant of the pair matrix.
const MAX_CONDITION_NUMBER: f64 = 1000.0;

/// Finds total impulses `x >= 0` with `vn = K·x + b >= 0` and `x_i·vn_i = 0`,
/// trying each pair of active contacts in turn. `None` if no case applies.
fn complementary_pair(k11: f64, k12: f64, k22: f64, det: f64, b1: f64, b2: f64) -> Option<(f64, f64)> {
    // both contacts pushing
    let x1 = -(k22 * b1 - k12 * b2) / det;
    let x2 = -(k11 * b2 - k12 * b1) / det;
    if x1 >= 0.0 && x2 >= 0.0 {
        return Some((x1, x2));
    }

    // only the first pushing
    let x1 = -b1 / k11;
    if x1 >= 0.0 && k12 * x1 + b2 >= 0.0 {
        return Some((x1, 0.0));
    }

    // only the second pushing
    let x2 = -b2 / k22;
    if x2 >= 0.0 && k12 * x2 + b1 >= 0.0 {
        return Some((0.0, x2));
    }

    // both separating
    if b1 >= 0.0 && b2 >= 0.0 {
        return Some((0.0, 0.0));
    }
    None
}

fn inverse_effective_mass(a: &RigidBody, b: &RigidBody, r1: Vec2, r2: Vec2, dir: Vec2) -> f64 {
    let r1n = r1.cross(dir);
    let r2n = r2.cross(dir);
    a.inv_mass() + b.inv_mass() + r1n * r1n * a.inv_inertia() + r2n * r2n * b.inv_inertia()
}
