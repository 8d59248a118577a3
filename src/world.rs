pub mod input;
pub mod view;

use glam::Vec2;
use log::{debug, info, trace};

use crate::{
    collision::queries::{ConstraintHit, NearestConstraintQuery},
    config::ClothConfig,
    core::{
        constraints::{DistanceConstraint, ParticleStore},
        mesh::ClothMesh,
        particle::Particle,
    },
    dynamics::{
        forces::{ForceRegistry, GravityForce},
        integrator::Integrator,
        solver::{RelaxationSolver, SolverStepMetrics},
    },
    error::Result,
    utils::{
        allocator::{ConstraintId, Handle, ParticleId},
        logging::{warn_if_frame_budget_exceeded, ScopedTimer},
        profiling::{PhaseTimer, StepProfiler},
    },
};

use self::input::{EventOutcome, InputEvent, InputHandler};
use self::view::{ConstraintView, ParticleView};

/// Single-threaded owner of all cloth state.
///
/// Neither the particle store nor the constraint list changes size after
/// construction; constraints are only ever deactivated.
pub struct ClothWorld {
    particles: ParticleStore,
    constraints: Box<[DistanceConstraint]>,
    rows: usize,
    cols: usize,
    config: ClothConfig,
    pub integrator: Integrator,
    pub solver: RelaxationSolver,
    pub force_registry: ForceRegistry,
    highlighted: Option<ConstraintId>,
    frame_count: u64,
    last_metrics: SolverStepMetrics,
    profiler: StepProfiler,
}

impl ClothWorld {
    /// Builds the default grid cloth described by `config`.
    pub fn new(config: ClothConfig) -> Result<Self> {
        let mesh = ClothMesh::grid(&config)?;
        Self::from_mesh(mesh, config)
    }

    /// Wraps an already assembled mesh. Gravity from `config` is registered
    /// as the first force.
    pub fn from_mesh(mesh: ClothMesh, config: ClothConfig) -> Result<Self> {
        config.validate()?;
        mesh.check_shape()?;

        let integrator = Integrator::new(
            config.time_step,
            config.damping,
            config.damping_mode,
            config.bounds,
        );
        let solver = RelaxationSolver::new(config.constraint_iterations);
        let mut force_registry = ForceRegistry::new();
        force_registry.add_force(GravityForce::downward(config.gravity));

        info!(
            "cloth world: {}x{} grid, {} particles, {} constraints",
            mesh.rows(),
            mesh.cols(),
            mesh.particles.len(),
            mesh.constraints.len()
        );

        Ok(Self {
            rows: mesh.rows(),
            cols: mesh.cols(),
            particles: mesh.particles,
            constraints: mesh.constraints.into_boxed_slice(),
            config,
            integrator,
            solver,
            force_registry,
            highlighted: None,
            frame_count: 0,
            last_metrics: SolverStepMetrics::default(),
            profiler: StepProfiler::default(),
        })
    }

    /// Advances the cloth by one fixed step: forces, integration, bounds
    /// clamp, then constraint relaxation.
    pub fn step(&mut self) -> SolverStepMetrics {
        self.profiler.reset();
        let frame_timer = ScopedTimer::new("cloth::step");
        let dt = self.integrator.dt;

        {
            let _trace = ScopedTimer::new("forces");
            let _timer = PhaseTimer::new(&mut self.profiler.force_time);
            self.force_registry.apply_all(&mut self.particles, dt);
        }
        {
            let _trace = ScopedTimer::new("integrator");
            let _timer = PhaseTimer::new(&mut self.profiler.integrator_time);
            self.integrator.integrate(&mut self.particles);
        }
        {
            let _trace = ScopedTimer::new("bounds");
            let _timer = PhaseTimer::new(&mut self.profiler.bounds_time);
            self.integrator.clamp(&mut self.particles);
        }
        let metrics = {
            let _trace = ScopedTimer::new("solver");
            let _timer = PhaseTimer::new(&mut self.profiler.solver_time);
            self.solver.solve(&mut self.particles, &self.constraints)
        };

        self.frame_count += 1;
        self.last_metrics = metrics;
        self.profiler.total_frame_time = frame_timer.elapsed();
        self.profiler.particle_count = self.particles.len();
        self.profiler.active_constraint_count = self.active_constraint_count();
        warn_if_frame_budget_exceeded(self.profiler.total_frame_time, self.config.frame_budget_ms);

        metrics
    }

    pub fn step_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            self.step();
        }
    }

    /// Dispatches one input event.
    pub fn handle_event(&mut self, event: InputEvent) -> EventOutcome {
        match event {
            InputEvent::PrimaryClick { x, y } => match self.primary_click(Vec2::new(x, y)) {
                Some(hit) => EventOutcome::Cut(hit.constraint_id),
                None => EventOutcome::Missed,
            },
            InputEvent::PointerMoved { x, y } => {
                EventOutcome::Highlighted(self.pointer_moved(Vec2::new(x, y)))
            }
            InputEvent::CloseRequested => EventOutcome::Close,
        }
    }

    /// Cuts the strand nearest to `point`, if any lies within tolerance.
    pub fn primary_click(&mut self, point: Vec2) -> Option<ConstraintHit> {
        let hit = InputHandler::deactivate_nearest_constraint_at_point(
            point,
            self.config.click_tolerance,
            &mut self.constraints,
            &self.particles,
        );
        match hit {
            Some(hit) => debug!(
                "cut constraint {} at ({:.1}, {:.1}), distance {:.2}",
                hit.constraint_id.index(),
                point.x,
                point.y,
                hit.distance
            ),
            None => trace!("click at ({:.1}, {:.1}) missed", point.x, point.y),
        }
        hit
    }

    /// Updates the highlighted constraint. Simulation state is untouched.
    pub fn pointer_moved(&mut self, point: Vec2) -> Option<ConstraintId> {
        self.highlighted = self.nearest_constraint(point).map(|hit| hit.constraint_id);
        self.highlighted
    }

    pub fn nearest_constraint(&self, point: Vec2) -> Option<ConstraintHit> {
        NearestConstraintQuery::new(point, self.config.click_tolerance)
            .cast(&self.constraints, &self.particles)
    }

    /// Deactivates a constraint directly. Returns false for an unknown id.
    pub fn deactivate(&mut self, id: ConstraintId) -> bool {
        match self.constraints.get_mut(id.index()) {
            Some(constraint) => {
                constraint.deactivate();
                true
            }
            None => false,
        }
    }

    /// Particles in store order, for drawing.
    pub fn particle_views(&self) -> impl Iterator<Item = ParticleView> + '_ {
        let radius = self.config.particle_radius;
        self.particles.iter().map(move |p| ParticleView {
            position: p.position,
            pinned: p.is_pinned(),
            radius,
        })
    }

    /// Every constraint in traversal order, active or not.
    pub fn constraint_views(&self) -> impl Iterator<Item = ConstraintView> + '_ {
        self.constraints
            .iter()
            .enumerate()
            .filter_map(move |(index, constraint)| {
                let (a, b) = constraint.endpoints();
                let a = self.particles.get(a)?.position;
                let b = self.particles.get(b)?.position;
                let id = ConstraintId::new(index);
                Some(ConstraintView {
                    id,
                    a,
                    b,
                    active: constraint.is_active(),
                    highlighted: self.highlighted == Some(id),
                })
            })
    }

    /// Constraints a renderer should draw: the active ones.
    pub fn visible_segments(&self) -> impl Iterator<Item = ConstraintView> + '_ {
        self.constraint_views().filter(|view| view.active)
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.particles
    }

    pub fn constraints(&self) -> &[DistanceConstraint] {
        &self.constraints
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id)
    }

    pub fn particle_at(&self, col: usize, row: usize) -> Option<&Particle> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.particles.get(ParticleId::new(row * self.cols + col))
    }

    pub fn constraint(&self, id: ConstraintId) -> Option<&DistanceConstraint> {
        self.constraints.get(id.index())
    }

    pub fn active_constraint_count(&self) -> usize {
        self.constraints.iter().filter(|c| c.is_active()).count()
    }

    pub fn highlighted(&self) -> Option<ConstraintId> {
        self.highlighted
    }

    pub fn config(&self) -> &ClothConfig {
        &self.config
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn last_metrics(&self) -> SolverStepMetrics {
        self.last_metrics
    }

    pub fn profiler(&self) -> &StepProfiler {
        &self.profiler
    }
}
