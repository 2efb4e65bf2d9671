//! Narrow phase: separating-axis test between two convex polygons and the
//! resolution of the resulting contacts.

use tracing::debug;

use super::contact::Collision;
use super::manifold::{ContactManifold, Incident};
use crate::common::SolverConfig;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;
use crate::shapes::Polygon;

/// Runs the separating-axis test between `a` and `b`.
///
/// Returns `None` if either polygon has a separating edge. Otherwise the
/// axis with the larger (least negative) distance is used to build the
/// manifold; on a tie the second polygon supplies the incident vertices.
/// If the chosen axis yields no contained vertex the other axis is tried, so
/// aligned faces of different sizes still produce contacts. An overlap whose
/// contact set is empty on both axes is still reported, with no points.
pub fn contact_manifold(a: &Polygon, b: &Polygon) -> Option<ContactManifold> {
    let a_into_b = a.min_edge_distance_to(b)?;
    let b_into_a = b.min_edge_distance_to(a)?;

    let a_incident = Axis {
        incident: Incident::First,
        reference_normal: b.edges()[a_into_b.index].n,
        distance: a_into_b.distance,
    };
    let b_incident = Axis {
        incident: Incident::Second,
        reference_normal: a.edges()[b_into_a.index].n,
        distance: b_into_a.distance,
    };
    let (preferred, fallback) = if a_into_b.distance > b_into_a.distance {
        (a_incident, b_incident)
    } else {
        (b_incident, a_incident)
    };

    let manifold = preferred.manifold(a, b);
    if manifold.points.is_empty() {
        let alternative = fallback.manifold(a, b);
        if !alternative.points.is_empty() {
            return Some(alternative);
        }
    }
    Some(manifold)
}

/// Candidate contact axis: one polygon's edge penetrated by the other's vertices.
#[derive(Debug, Clone, Copy)]
struct Axis {
    incident: Incident,
    reference_normal: Vec2,
    distance: f64,
}

impl Axis {
    fn manifold(&self, a: &Polygon, b: &Polygon) -> ContactManifold {
        let points = match self.incident {
            Incident::First => a.vertices_inside(b),
            Incident::Second => b.vertices_inside(a),
        };
        ContactManifold {
            incident: self.incident,
            normal: -self.reference_normal,
            depth: self.distance.abs(),
            points,
        }
    }
}

/// Stiffness split of the positional correction: the share of the depth
/// taken by the incident body.
fn correction_share(incident: &RigidBody, reference: &RigidBody) -> f64 {
    if incident.is_static() {
        0.0
    } else if reference.is_static() {
        1.0
    } else {
        0.5
    }
}

/// Pushes the two bodies apart along `normal`, which points from `incident`
/// toward `reference`. Static bodies are never moved.
pub fn correct_positions(incident: &mut RigidBody, reference: &mut RigidBody, normal: Vec2, depth: f64) {
    let k = correction_share(incident, reference);
    if !incident.is_static() {
        incident.position -= normal * (k * depth);
    }
    if !reference.is_static() {
        reference.position += normal * ((1.0 - k) * depth);
    }
}

/// Resolves a manifold found between a polygon of `a` and a polygon of `b`:
/// one Collision per contact point, positional correction once for the
/// manifold, then `solver.velocity_iterations` impulse passes. Each pass
/// solves friction first, then the normal impulses; a two-point manifold has
/// its normal impulses solved together. Both bodies' shapes are refreshed
/// afterwards.
pub fn resolve(a: &mut RigidBody, b: &mut RigidBody, manifold: &ContactManifold, solver: &SolverConfig) {
    if manifold.points.is_empty() {
        return;
    }
    let (incident, reference) = match manifold.incident {
        Incident::First => (a, b),
        Incident::Second => (b, a),
    };

    let mut collisions: Vec<Collision> = manifold
        .points
        .iter()
        .map(|&p| Collision::new(p, manifold.normal, manifold.depth, incident, reference, solver))
        .collect();

    correct_positions(incident, reference, manifold.normal, manifold.depth);

    for _ in 0..solver.velocity_iterations {
        match collisions.as_mut_slice() {
            [lone] => lone.solve(incident, reference),
            [first, second] => {
                first.solve_friction(incident, reference);
                second.solve_friction(incident, reference);
                Collision::solve_normal_pair(first, second, incident, reference);
            }
            many => {
                for collision in many.iter_mut() {
                    collision.solve_friction(incident, reference);
                }
                for collision in many.iter_mut() {
                    collision.solve_normal(incident, reference);
                }
            }
        }
    }

    incident.update_rotation();
    reference.update_rotation();

    debug!(
        contacts = collisions.len(),
        depth = manifold.depth,
        normal_x = manifold.normal.x,
        normal_y = manifold.normal.y,
        "resolved contact manifold"
    );
}
