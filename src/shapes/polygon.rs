use crate::collision::aabb::Aabb;
use crate::error::{PhysicsError, Result};
use crate::math::{Transform, Vec2};

use super::edge::Edge;

/// Result of scanning another polygon's edges: the edge this polygon
/// penetrates least, and by how much (always negative).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeQuery {
    pub index: usize,
    pub distance: f64,
}

/// A convex polygon attached to a rigid body.
///
/// The polygon keeps two parallel copies of its geometry: the base copy in
/// body-local coordinates, fixed at construction, and the world copy that
/// [`Polygon::update_rotation`] rebuilds from the owning body's pose.
///
/// Vertices must be given counter-clockwise and describe a convex, simple
/// polygon. Convexity is a precondition and is not checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    base_vertices: Vec<Vec2>,
    base_edges: Vec<Edge>,
    vertices: Vec<Vec2>,
    edges: Vec<Edge>,
    aabb: Aabb,
}

impl Polygon {
    /// Builds a polygon from body-local vertices. World geometry starts out
    /// equal to the base geometry (identity pose).
    ///
    /// Fails for fewer than 3 vertices, non-finite coordinates, repeated
    /// consecutive vertices, or a non-positive (clockwise or collinear) area.
    pub fn new(vertices: Vec<Vec2>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(PhysicsError::invalid_shape(format!(
                "a polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        if let Some(i) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(PhysicsError::invalid_shape(format!("vertex {i} is not finite")));
        }

        let n = vertices.len();
        let mut base_edges = Vec::with_capacity(n);
        for i in 0..n {
            let edge = Edge::through(vertices[i], vertices[(i + 1) % n]).ok_or_else(|| {
                PhysicsError::invalid_shape(format!("edge {i} has zero length"))
            })?;
            base_edges.push(edge);
        }

        if signed_area(&vertices) <= 0.0 {
            return Err(PhysicsError::invalid_shape(
                "vertices must be counter-clockwise and enclose a non-zero area",
            ));
        }

        let aabb = Aabb::from_points(&vertices).unwrap_or_default();
        Ok(Self {
            edges: base_edges.clone(),
            base_edges,
            base_vertices: vertices.clone(),
            vertices,
            aabb,
        })
    }

    /// An axis-aligned `width × height` rectangle centered on the body origin.
    pub fn rectangle(width: f64, height: f64) -> Result<Self> {
        let hw = width / 2.0;
        let hh = height / 2.0;
        Self::new(vec![
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
        ])
    }

    /// A regular polygon with `sides` corners on a circle of `radius` around the body origin.
    pub fn regular(sides: usize, radius: f64) -> Result<Self> {
        let step = std::f64::consts::TAU / sides as f64;
        let vertices = (0..sides)
            .map(|k| Vec2::new(radius, 0.0).rotate(step * k as f64))
            .collect();
        Self::new(vertices)
    }

    /// Current world-space vertices.
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Current world-space edges, edge `i` running from vertex `i` to vertex `i + 1`.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// Rebuilds world vertices and edges from the base geometry and `pose`,
    /// then refreshes the bounding box. Must run after every pose change and
    /// before any collision query.
    pub fn update_rotation(&mut self, pose: &Transform) {
        for ((vertex, edge), (base_vertex, base_edge)) in self
            .vertices
            .iter_mut()
            .zip(self.edges.iter_mut())
            .zip(self.base_vertices.iter().zip(&self.base_edges))
        {
            *vertex = pose.apply(*base_vertex);
            edge.n = pose.rotate(base_edge.n);
            edge.d = base_edge.d + pose.position.dot(edge.n);
        }
        self.update_aabb();
    }

    pub fn update_aabb(&mut self) {
        self.aabb.recompute(&self.vertices);
    }

    /// Area from the shoelace formula.
    pub fn area(&self) -> f64 {
        signed_area(&self.base_vertices)
    }

    /// Area-weighted centroid in body-local coordinates.
    pub fn centroid(&self) -> Vec2 {
        let n = self.base_vertices.len();
        let mut sum = Vec2::ZERO;
        let mut twice_area = 0.0;
        for i in 0..n {
            let a = self.base_vertices[i];
            let b = self.base_vertices[(i + 1) % n];
            let cross = a.cross(b);
            twice_area += cross;
            sum += (a + b) * cross;
        }
        sum / (3.0 * twice_area)
    }

    /// Moment of inertia about the body origin for a uniform polygon of the given mass.
    pub fn moment_of_inertia(&self, mass: f64) -> f64 {
        let n = self.base_vertices.len();
        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for i in 0..n {
            let a = self.base_vertices[i];
            let b = self.base_vertices[(i + 1) % n];
            let cross = a.cross(b);
            numerator += cross * (a.dot(a) + a.dot(b) + b.dot(b));
            denominator += cross;
        }
        mass * numerator / (6.0 * denominator)
    }

    /// Smallest signed distance of any vertex to the edge line. Negative
    /// means every vertex lies on the inner side.
    pub fn edge_distance(&self, edge: &Edge) -> f64 {
        self.vertices
            .iter()
            .map(|v| edge.distance_to(*v))
            .fold(f64::INFINITY, f64::min)
    }

    /// Scans `other`'s edges for the one this polygon penetrates least.
    ///
    /// Returns `None` as soon as an edge with a non-negative distance is
    /// found: that edge is a separating axis.
    pub fn min_edge_distance_to(&self, other: &Polygon) -> Option<EdgeQuery> {
        let mut best: Option<EdgeQuery> = None;
        for (index, edge) in other.edges.iter().enumerate() {
            let distance = self.edge_distance(edge);
            if distance >= 0.0 {
                return None;
            }
            if best.map_or(true, |b| distance > b.distance) {
                best = Some(EdgeQuery { index, distance });
            }
        }
        best
    }

    /// Half-plane test against every edge. Boundary points count as inside.
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.edges.iter().all(|edge| edge.distance_to(point) <= 0.0)
    }

    /// World vertices of this polygon that lie inside `other`.
    pub fn vertices_inside(&self, other: &Polygon) -> Vec<Vec2> {
        self.vertices
            .iter()
            .copied()
            .filter(|v| other.contains_point(*v))
            .collect()
    }
}

fn signed_area(vertices: &[Vec2]) -> f64 {
    let n = vertices.len();
    (0..n)
        .map(|i| vertices[i].cross(vertices[(i + 1) % n]))
        .sum::<f64>()
        / 2.0
}
