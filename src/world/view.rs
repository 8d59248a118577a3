use glam::Vec2;

use crate::utils::allocator::ConstraintId;

/// Read-only particle data for drawing a filled circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleView {
    pub position: Vec2,
    pub pinned: bool,
    pub radius: f32,
}

/// Read-only constraint data for drawing a line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintView {
    pub id: ConstraintId,
    pub a: Vec2,
    pub b: Vec2,
    pub active: bool,
    /// Set for the constraint currently under the pointer.
    pub highlighted: bool,
}
