use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::DampingMode;
use crate::utils::math::clamp_to_rect;

/// Unit-mass point with position history for Verlet integration.
///
/// Velocity is never stored; it is the difference between `position` and
/// `previous_position`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec2,
    pub previous_position: Vec2,
    /// Force accumulated since the last integration (mass is one).
    pub acceleration: Vec2,
    pinned: bool,
}

impl Particle {
    /// A free particle at rest.
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            previous_position: position,
            acceleration: Vec2::ZERO,
            pinned: false,
        }
    }

    /// An anchored particle that ignores forces and integration.
    pub fn pinned(position: Vec2) -> Self {
        Self {
            pinned: true,
            ..Self::new(position)
        }
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Implicit per-step velocity.
    pub fn velocity(&self) -> Vec2 {
        self.position - self.previous_position
    }

    pub fn apply_force(&mut self, force: Vec2) {
        if !self.pinned {
            self.acceleration += force;
        }
    }

    /// Störmer-Verlet step with no damping.
    pub fn integrate(&mut self, dt: f32) {
        self.integrate_damped(dt, 1.0, DampingMode::ScaleVelocity);
    }

    /// Verlet step applying `damping` according to `mode`.
    pub fn integrate_damped(&mut self, dt: f32, damping: f32, mode: DampingMode) {
        if self.pinned {
            return;
        }

        let velocity = self.velocity();
        self.previous_position = self.position;
        match mode {
            DampingMode::ScalePosition => {
                self.position += velocity + self.acceleration * dt * dt;
                self.position *= damping;
            }
            DampingMode::ScaleVelocity => {
                self.position += velocity * damping + self.acceleration * dt * dt;
            }
        }
        self.acceleration = Vec2::ZERO;
    }

    /// Clamps into the render area. Pinned particles are clamped too.
    pub fn clamp_to_bounds(&mut self, width: f32, height: f32) {
        self.position = clamp_to_rect(self.position, Vec2::new(width, height));
    }
}
