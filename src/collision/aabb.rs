// Axis-aligned bounding box for a polygon's world vertices.

use crate::math::vec2::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned box spanning `[x1, x2] × [y1, y2]`, with `x1 <= x2` and `y1 <= y2`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Aabb {
    /// Creates a box from two opposite corners in any order.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            x1: a.x.min(b.x),
            y1: a.y.min(b.y),
            x2: a.x.max(b.x),
            y2: a.y.max(b.y),
        }
    }

    /// Smallest box containing every point, or `None` for an empty slice.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = Self::new(*first, *first);
        for p in rest {
            aabb.include(*p);
        }
        Some(aabb)
    }

    /// Recomputes the box in place from a non-empty point set. An empty set leaves it untouched.
    pub fn recompute(&mut self, points: &[Vec2]) {
        if let Some(aabb) = Self::from_points(points) {
            *self = aabb;
        }
    }

    /// Grows the box to contain `p`.
    pub fn include(&mut self, p: Vec2) {
        self.x1 = self.x1.min(p.x);
        self.y1 = self.y1.min(p.y);
        self.x2 = self.x2.max(p.x);
        self.y2 = self.y2.max(p.y);
    }

    /// Grows the box to contain `other`.
    pub fn merge(&mut self, other: &Aabb) {
        self.x1 = self.x1.min(other.x1);
        self.y1 = self.y1.min(other.y1);
        self.x2 = self.x2.max(other.x2);
        self.y2 = self.y2.max(other.y2);
    }

    /// Strict overlap test: boxes that only share a boundary do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x2 > other.x1 && self.x1 < other.x2 && self.y2 > other.y1 && self.y1 < other.y2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_new_orders_corners() {
        let aabb = Aabb::new(Vec2::new(3.0, -1.0), Vec2::new(1.0, 2.0));
        assert_eq!(aabb, Aabb { x1: 1.0, y1: -1.0, x2: 3.0, y2: 2.0 });
        assert!(aabb.x1 <= aabb.x2 && aabb.y1 <= aabb.y2);
    }

    #[test]
    fn test_aabb_from_points() {
        let points = [Vec2::new(0.0, 1.0), Vec2::new(-2.0, 4.0), Vec2::new(5.0, -3.0)];
        let aabb = Aabb::from_points(&points).unwrap();
        assert_eq!(aabb, Aabb { x1: -2.0, y1: -3.0, x2: 5.0, y2: 4.0 });
        assert_eq!(Aabb::from_points(&[]), None);
    }

    #[test]
    fn test_aabb_recompute_in_place() {
        let mut aabb = Aabb::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        aabb.recompute(&[Vec2::new(10.0, 10.0), Vec2::new(12.0, 11.0)]);
        assert_eq!(aabb, Aabb { x1: 10.0, y1: 10.0, x2: 12.0, y2: 11.0 });

        aabb.recompute(&[]);
        assert_eq!(aabb, Aabb { x1: 10.0, y1: 10.0, x2: 12.0, y2: 11.0 });
    }

    #[test]
    fn test_aabb_overlaps() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0));
        let b = Aabb::new(Vec2::new(1.0, 1.0), Vec2::new(3.0, 3.0));
        let touching = Aabb::new(Vec2::new(2.0, 0.0), Vec2::new(4.0, 2.0));
        let apart = Aabb::new(Vec2::new(5.0, 5.0), Vec2::new(6.0, 6.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&touching));
        assert!(!a.overlaps(&apart));
    }

    #[test]
    fn test_aabb_merge() {
        let mut a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        a.merge(&Aabb::new(Vec2::new(-1.0, 0.5), Vec2::new(0.5, 3.0)));
        assert_eq!(a, Aabb { x1: -1.0, y1: 0.0, x2: 1.0, y2: 3.0 });
    }
}
