//! Core simulation data: particles, distance constraints, and the cloth mesh.

pub mod constraints;
pub mod mesh;
pub mod particle;

pub use constraints::{DistanceConstraint, ParticleStore};
pub use mesh::ClothMesh;
pub use particle::Particle;
