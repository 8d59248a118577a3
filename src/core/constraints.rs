use serde::{Deserialize, Serialize};

use crate::core::particle::Particle;
use crate::error::{ClothError, Result};
use crate::utils::allocator::{FixedStore, Handle, ParticleId};

/// Particle storage shared by constraints, the solver, and queries.
pub type ParticleStore = FixedStore<Particle, ParticleId>;

/// Distance link between two distinct particles.
///
/// Endpoints are handles into the particle store, which owns the particles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceConstraint {
    a: ParticleId,
    b: ParticleId,
    rest_length: f32,
    active: bool,
}

impl DistanceConstraint {
    /// Links `a` and `b` with a rest length equal to their current distance.
    pub fn new(a: ParticleId, b: ParticleId, particles: &ParticleStore) -> Result<Self> {
        if a == b {
            return Err(ClothError::DegenerateConstraint { index: a.index() });
        }
        let (pa, pb) = match (particles.get(a), particles.get(b)) {
            (Some(pa), Some(pb)) => (pa, pb),
            (None, _) => return Err(out_of_bounds(a, particles)),
            (_, None) => return Err(out_of_bounds(b, particles)),
        };

        Ok(Self {
            a,
            b,
            rest_length: pa.position.distance(pb.position),
            active: true,
        })
    }

    pub fn endpoints(&self) -> (ParticleId, ParticleId) {
        (self.a, self.b)
    }

    pub fn rest_length(&self) -> f32 {
        self.rest_length
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Permanently removes the link from relaxation and rendering.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Current distance between the endpoints.
    pub fn current_length(&self, particles: &ParticleStore) -> f32 {
        match (particles.get(self.a), particles.get(self.b)) {
            (Some(pa), Some(pb)) => pa.position.distance(pb.position),
            _ => 0.0,
        }
    }

    /// Moves the free endpoints toward the rest length and returns the
    /// absolute stretch that was corrected.
    ///
    /// Each free endpoint takes half the correction; a lone free endpoint
    /// takes all of it. Inactive links and coincident endpoints are left
    /// untouched.
    pub fn satisfy(&self, particles: &mut ParticleStore) -> f32 {
        if !self.active {
            return 0.0;
        }
        let Some((pa, pb)) = particles.get2_mut(self.a, self.b) else {
            return 0.0;
        };

        let delta = pb.position - pa.position;
        let distance = delta.length();
        if distance == 0.0 {
            return 0.0;
        }

        let stretch = distance - self.rest_length;
        let correction = delta * (stretch / distance);
        match (pa.is_pinned(), pb.is_pinned()) {
            (false, false) => {
                pa.position += correction * 0.5;
                pb.position -= correction * 0.5;
            }
            (false, true) => pa.position += correction,
            (true, false) => pb.position -= correction,
            (true, true) => return 0.0,
        }
        stretch.abs()
    }
}

fn out_of_bounds(id: ParticleId, particles: &ParticleStore) -> ClothError {
    ClothError::ParticleOutOfBounds {
        index: id.index(),
        count: particles.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn store(particles: Vec<Particle>) -> ParticleStore {
        FixedStore::from_vec(particles)
    }

    #[test]
    fn rest_length_is_distance_at_creation() {
        let particles = store(vec![
            Particle::new(Vec2::ZERO),
            Particle::new(Vec2::new(3.0, 4.0)),
        ]);
        let c = DistanceConstraint::new(ParticleId::new(0), ParticleId::new(1), &particles)
            .expect("valid endpoints");
        assert_eq!(c.rest_length(), 5.0);
        assert!(c.is_active());
    }

    #[test]
    fn rejects_self_link_and_missing_particle() {
        let particles = store(vec![Particle::new(Vec2::ZERO)]);
        assert_eq!(
            DistanceConstraint::new(ParticleId::new(0), ParticleId::new(0), &particles),
            Err(ClothError::DegenerateConstraint { index: 0 })
        );
        assert_eq!(
            DistanceConstraint::new(ParticleId::new(0), ParticleId::new(3), &particles),
            Err(ClothError::ParticleOutOfBounds { index: 3, count: 1 })
        );
    }

    #[test]
    fn free_endpoints_share_the_correction() {
        let mut particles = store(vec![
            Particle::new(Vec2::ZERO),
            Particle::new(Vec2::new(10.0, 0.0)),
        ]);
        let c = DistanceConstraint::new(ParticleId::new(0), ParticleId::new(1), &particles)
            .expect("valid endpoints");
        particles.get_mut(ParticleId::new(1)).unwrap().position = Vec2::new(14.0, 0.0);

        let stretch = c.satisfy(&mut particles);
        assert_eq!(stretch, 4.0);
        assert_eq!(particles.as_slice()[0].position, Vec2::new(2.0, 0.0));
        assert_eq!(particles.as_slice()[1].position, Vec2::new(12.0, 0.0));
    }

    #[test]
    fn coincident_endpoints_are_left_alone() {
        let mut particles = store(vec![
            Particle::new(Vec2::ZERO),
            Particle::new(Vec2::new(1.0, 0.0)),
        ]);
        let c = DistanceConstraint::new(ParticleId::new(0), ParticleId::new(1), &particles)
            .expect("valid endpoints");
        particles.get_mut(ParticleId::new(1)).unwrap().position = Vec2::ZERO;

        assert_eq!(c.satisfy(&mut particles), 0.0);
        for p in particles.iter() {
            assert!(p.position.is_finite());
            assert_eq!(p.position, Vec2::ZERO);
        }
    }

    #[test]
    fn both_pinned_is_inert() {
        let mut particles = store(vec![
            Particle::pinned(Vec2::ZERO),
            Particle::pinned(Vec2::new(1.0, 0.0)),
        ]);
        let mut c = DistanceConstraint::new(ParticleId::new(0), ParticleId::new(1), &particles)
            .expect("valid endpoints");
        c.rest_length = 5.0;
        c.satisfy(&mut particles);
        assert_eq!(particles.as_slice()[1].position, Vec2::new(1.0, 0.0));
    }
}
