use glam::Vec2;

use crate::core::constraints::ParticleStore;
use crate::core::particle::Particle;

/// External force applied to every particle before integration.
pub trait ForceGenerator {
    fn apply(&self, particle: &mut Particle, dt: f32);
}

/// Constant downward pull (screen space is Y-down).
pub struct GravityForce {
    pub gravity: Vec2,
}

impl GravityForce {
    pub fn new(gravity: Vec2) -> Self {
        Self { gravity }
    }

    /// Gravity of `magnitude` pointing down the screen.
    pub fn downward(magnitude: f32) -> Self {
        Self::new(Vec2::new(0.0, magnitude))
    }
}

impl ForceGenerator for GravityForce {
    fn apply(&self, particle: &mut Particle, _dt: f32) {
        particle.apply_force(self.gravity);
    }
}

/// Collection of forces that can be applied each frame.
pub struct ForceRegistry {
    forces: Vec<Box<dyn ForceGenerator>>,
}

impl Default for ForceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceRegistry {
    pub fn new() -> Self {
        Self { forces: Vec::new() }
    }

    pub fn add_force<F: ForceGenerator + 'static>(&mut self, force: F) {
        self.forces.push(Box::new(force));
    }

    pub fn len(&self) -> usize {
        self.forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    pub fn apply_all(&self, particles: &mut ParticleStore, dt: f32) {
        for particle in particles.iter_mut() {
            for force in &self.forces {
                force.apply(particle, dt);
            }
        }
    }
}
