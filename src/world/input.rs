use glam::Vec2;

use crate::{
    collision::queries::{ConstraintHit, NearestConstraintQuery},
    core::constraints::{DistanceConstraint, ParticleStore},
    utils::allocator::{ConstraintId, Handle},
};

/// Input delivered by the windowing collaborator, in render-area pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PrimaryClick { x: f32, y: f32 },
    PointerMoved { x: f32, y: f32 },
    CloseRequested,
}

/// What the world did with an [`InputEvent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventOutcome {
    /// A click landed within tolerance of this constraint, which is now inactive.
    Cut(ConstraintId),
    /// A click found nothing within tolerance.
    Missed,
    /// The pointer moved; this is the new highlighted constraint.
    Highlighted(Option<ConstraintId>),
    /// The session should end.
    Close,
}

/// Stateless pointer interaction over explicit cloth collections.
pub struct InputHandler;

impl InputHandler {
    pub fn find_nearest_constraint(
        point: Vec2,
        tolerance: f32,
        constraints: &[DistanceConstraint],
        particles: &ParticleStore,
    ) -> Option<ConstraintHit> {
        NearestConstraintQuery::new(point, tolerance).cast(constraints, particles)
    }

    /// Deactivates the constraint nearest to `point`, if one is within
    /// tolerance. The nearest one may already be inactive, in which case the
    /// call changes nothing but still reports it.
    pub fn deactivate_nearest_constraint_at_point(
        point: Vec2,
        tolerance: f32,
        constraints: &mut [DistanceConstraint],
        particles: &ParticleStore,
    ) -> Option<ConstraintHit> {
        let hit = Self::find_nearest_constraint(point, tolerance, constraints, particles)?;
        if let Some(constraint) = constraints.get_mut(hit.constraint_id.index()) {
            constraint.deactivate();
        }
        Some(hit)
    }
}
