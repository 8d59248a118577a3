//! Cloth Sim – a 2-D Verlet cloth for interactive use.
//!
//! A grid of unit-mass particles is joined by distance constraints, stepped
//! with fixed-step Verlet integration, and relaxed with several Gauss-Seidel
//! passes per frame. A nearest-segment query lets a pointer highlight and cut
//! individual strands. Windowing and drawing are left to the caller, which
//! feeds [`InputEvent`]s in and reads particle and constraint views out.

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod utils;
pub mod world;

pub use glam::Vec2;

pub use collision::queries::{point_to_segment_distance, ConstraintHit, NearestConstraintQuery};
pub use config::{ClothConfig, DampingMode};
pub use crate::core::{
    constraints::{DistanceConstraint, ParticleStore},
    mesh::ClothMesh,
    particle::Particle,
};
pub use dynamics::{
    forces::{ForceGenerator, ForceRegistry, GravityForce},
    integrator::Integrator,
    solver::{RelaxationSolver, SolverStepMetrics},
};
pub use error::{ClothError, Result};
pub use utils::allocator::{ConstraintId, FixedStore, Handle, ParticleId};
pub use world::{
    input::{EventOutcome, InputEvent, InputHandler},
    view::{ConstraintView, ParticleView},
    ClothWorld,
};

/// Frame loop wrapper that owns a [`ClothWorld`].
///
/// Each frame drains the pending input events, then advances the physics by
/// one fixed step unless a close was requested.
pub struct ClothSession {
    world: ClothWorld,
    running: bool,
}

impl ClothSession {
    pub fn new(config: ClothConfig) -> Result<Self> {
        Ok(Self {
            world: ClothWorld::new(config)?,
            running: true,
        })
    }

    /// Runs one frame. Returns the outcome of every event handled and
    /// whether the session is still running.
    pub fn frame<I>(&mut self, events: I) -> (Vec<EventOutcome>, bool)
    where
        I: IntoIterator<Item = InputEvent>,
    {
        if !self.running {
            return (Vec::new(), false);
        }

        let mut outcomes = Vec::new();
        for event in events {
            let outcome = self.world.handle_event(event);
            if outcome == EventOutcome::Close {
                self.running = false;
            }
            outcomes.push(outcome);
        }

        if self.running {
            self.world.step();
        }
        (outcomes, self.running)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn world(&self) -> &ClothWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut ClothWorld {
        &mut self.world
    }
}
