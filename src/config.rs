//! Simulation constants and the startup configuration built from them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{ClothError, Result};

/// Width of the render area in pixels.
pub const DEFAULT_WIDTH: f32 = 1080.0;

/// Height of the render area in pixels.
pub const DEFAULT_HEIGHT: f32 = 640.0;

/// Radius used by renderers when drawing a particle.
pub const DEFAULT_PARTICLE_RADIUS: f32 = 10.0;

/// Magnitude of the downward gravity force (screen space, Y-down).
pub const DEFAULT_GRAVITY: f32 = 10.0;

/// Fixed integration timestep (in seconds), roughly one 60 Hz frame.
pub const DEFAULT_TIME_STEP: f32 = 0.016;

/// Factor applied to particle state each step to bleed energy.
pub const DEFAULT_DAMPING: f32 = 0.99;

/// Number of particle rows in the cloth grid.
pub const DEFAULT_ROWS: usize = 10;

/// Number of particle columns in the cloth grid.
pub const DEFAULT_COLS: usize = 10;

/// Distance between neighbouring particles at setup.
pub const DEFAULT_REST_DISTANCE: f32 = 30.0;

/// Maximum pointer distance (pixels) at which a strand can be picked.
pub const DEFAULT_CLICK_TOLERANCE: f32 = 5.0;

/// Number of relaxation passes over all constraints per step.
pub const DEFAULT_CONSTRAINT_ITERATIONS: u32 = 5;

/// How the damping factor is applied during integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DampingMode {
    /// Scale the whole position after integrating. Free particles are pulled
    /// toward the world origin while anchors stay put, so a hanging cloth
    /// folds up past its pinned row.
    ScalePosition,
    /// Scale only the implicit velocity term before it is added.
    #[default]
    ScaleVelocity,
}

/// Startup configuration for a cloth world. Immutable once the world is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothConfig {
    pub rows: usize,
    pub cols: usize,
    pub rest_distance: f32,
    /// Top-left particle position. `None` places the grid at one third of the
    /// render area.
    pub origin: Option<Vec2>,
    pub bounds: Vec2,
    pub gravity: f32,
    pub time_step: f32,
    pub damping: f32,
    pub damping_mode: DampingMode,
    pub click_tolerance: f32,
    pub constraint_iterations: u32,
    pub particle_radius: f32,
    /// Steps slower than this (milliseconds) are reported with `warn!`.
    pub frame_budget_ms: f32,
}

impl Default for ClothConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            rest_distance: DEFAULT_REST_DISTANCE,
            origin: None,
            bounds: Vec2::new(DEFAULT_WIDTH, DEFAULT_HEIGHT),
            gravity: DEFAULT_GRAVITY,
            time_step: DEFAULT_TIME_STEP,
            damping: DEFAULT_DAMPING,
            damping_mode: DampingMode::default(),
            click_tolerance: DEFAULT_CLICK_TOLERANCE,
            constraint_iterations: DEFAULT_CONSTRAINT_ITERATIONS,
            particle_radius: DEFAULT_PARTICLE_RADIUS,
            frame_budget_ms: 1000.0 / 60.0,
        }
    }
}

impl ClothConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn with_rest_distance(mut self, rest_distance: f32) -> Self {
        self.rest_distance = rest_distance;
        self
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_bounds(mut self, width: f32, height: f32) -> Self {
        self.bounds = Vec2::new(width, height);
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_time_step(mut self, time_step: f32) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_damping(mut self, damping: f32, mode: DampingMode) -> Self {
        self.damping = damping;
        self.damping_mode = mode;
        self
    }

    pub fn with_click_tolerance(mut self, tolerance: f32) -> Self {
        self.click_tolerance = tolerance;
        self
    }

    pub fn with_constraint_iterations(mut self, iterations: u32) -> Self {
        self.constraint_iterations = iterations;
        self
    }

    /// Top-left particle position actually used by the mesh builder.
    pub fn resolved_origin(&self) -> Vec2 {
        self.origin.unwrap_or(self.bounds / 3.0)
    }

    /// Checks every constant before a world is built from it.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ClothError::InvalidGridDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }

        positive("rest_distance", self.rest_distance)?;
        positive("bounds.x", self.bounds.x)?;
        positive("bounds.y", self.bounds.y)?;
        finite("gravity", self.gravity)?;
        positive("time_step", self.time_step)?;
        positive("click_tolerance", self.click_tolerance)?;
        finite("particle_radius", self.particle_radius)?;
        positive("frame_budget_ms", self.frame_budget_ms)?;

        if !self.damping.is_finite() || self.damping <= 0.0 || self.damping > 1.0 {
            return Err(ClothError::InvalidParameter {
                name: "damping",
                value: self.damping,
            });
        }
        if self.constraint_iterations == 0 {
            return Err(ClothError::InvalidParameter {
                name: "constraint_iterations",
                value: 0.0,
            });
        }
        if let Some(origin) = self.origin {
            finite("origin.x", origin.x)?;
            finite("origin.y", origin.y)?;
        }
        Ok(())
    }
}

fn finite(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ClothError::InvalidParameter { name, value })
    }
}

fn positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ClothError::InvalidParameter { name, value })
    }
}
