use glam::Vec2;

use crate::config::DampingMode;
use crate::core::constraints::ParticleStore;

/// Fixed-step Verlet integrator with damping and a bounds clamp.
#[derive(Debug, Clone)]
pub struct Integrator {
    pub dt: f32,
    pub damping: f32,
    pub damping_mode: DampingMode,
    pub bounds: Vec2,
}

impl Integrator {
    pub fn new(dt: f32, damping: f32, damping_mode: DampingMode, bounds: Vec2) -> Self {
        Self {
            dt,
            damping,
            damping_mode,
            bounds,
        }
    }

    /// Advances every free particle by one fixed step.
    pub fn integrate(&self, particles: &mut ParticleStore) {
        for particle in particles.iter_mut() {
            particle.integrate_damped(self.dt, self.damping, self.damping_mode);
        }
    }

    /// Clamps every particle, pinned or not, into the render area.
    pub fn clamp(&self, particles: &mut ParticleStore) {
        for particle in particles.iter_mut() {
            particle.clamp_to_bounds(self.bounds.x, self.bounds.y);
        }
    }
}
