use glam::Vec2;

use crate::{
    core::constraints::{DistanceConstraint, ParticleStore},
    utils::{allocator::ConstraintId, math::closest_point_on_segment},
};

/// Shortest distance from `point` to the segment `a`-`b`.
pub fn point_to_segment_distance(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    point.distance(closest_point_on_segment(point, a, b))
}

/// Constraint picked by a point query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintHit {
    pub constraint_id: ConstraintId,
    pub distance: f32,
    pub point: Vec2,
}

/// Point query with a pick radius, in pixels.
#[derive(Debug, Clone, Copy)]
pub struct NearestConstraintQuery {
    pub point: Vec2,
    pub tolerance: f32,
}

impl NearestConstraintQuery {
    pub fn new(point: Vec2, tolerance: f32) -> Self {
        Self { point, tolerance }
    }

    /// Finds the constraint segment closest to the query point.
    ///
    /// Inactive constraints are scanned as well. A hit requires a distance
    /// strictly below the tolerance; on equal distances the earliest
    /// constraint in container order wins.
    pub fn cast(
        &self,
        constraints: &[DistanceConstraint],
        particles: &ParticleStore,
    ) -> Option<ConstraintHit> {
        let mut nearest = None;
        let mut min_distance = self.tolerance;

        for (index, constraint) in constraints.iter().enumerate() {
            let (a, b) = constraint.endpoints();
            let (a, b) = match (particles.get(a), particles.get(b)) {
                (Some(a), Some(b)) => (a.position, b.position),
                _ => continue,
            };

            let point = closest_point_on_segment(self.point, a, b);
            let distance = self.point.distance(point);
            if distance < min_distance {
                min_distance = distance;
                nearest = Some(ConstraintHit {
                    constraint_id: ConstraintId::new(index),
                    distance,
                    point,
                });
            }
        }

        nearest
    }
}
