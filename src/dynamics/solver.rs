use crate::core::constraints::{DistanceConstraint, ParticleStore};

/// Counters gathered while relaxing constraints for one step.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SolverStepMetrics {
    pub passes: u32,
    /// Active constraints visited, summed over all passes.
    pub constraints_relaxed: usize,
    /// Largest stretch corrected during the final pass.
    pub max_residual: f32,
}

/// Gauss-Seidel relaxation of distance constraints.
///
/// Every pass walks the constraints in container order and corrects each
/// active one in place, so later links see the positions earlier ones moved.
#[derive(Debug, Clone)]
pub struct RelaxationSolver {
    pub iterations: u32,
}

impl RelaxationSolver {
    pub fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    pub fn solve(
        &self,
        particles: &mut ParticleStore,
        constraints: &[DistanceConstraint],
    ) -> SolverStepMetrics {
        let mut metrics = SolverStepMetrics::default();
        for _ in 0..self.iterations {
            metrics.max_residual = 0.0;
            for constraint in constraints.iter().filter(|c| c.is_active()) {
                let stretch = constraint.satisfy(particles);
                metrics.max_residual = metrics.max_residual.max(stretch);
                metrics.constraints_relaxed += 1;
            }
            metrics.passes += 1;
        }
        metrics
    }
}
