//! Simulation dynamics: external forces, Verlet integration, and constraint relaxation.

pub mod forces;
pub mod integrator;
pub mod solver;

pub use forces::{ForceGenerator, ForceRegistry, GravityForce};
pub use integrator::Integrator;
pub use solver::{RelaxationSolver, SolverStepMetrics};
