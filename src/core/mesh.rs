use glam::Vec2;

use crate::config::ClothConfig;
use crate::core::constraints::{DistanceConstraint, ParticleStore};
use crate::core::particle::Particle;
use crate::error::{ClothError, Result};
use crate::utils::allocator::{FixedStore, ParticleId};

/// Rectangular cloth: a row-major particle grid with structural links.
#[derive(Debug, Clone)]
pub struct ClothMesh {
    pub particles: ParticleStore,
    pub constraints: Vec<DistanceConstraint>,
    rows: usize,
    cols: usize,
}

impl ClothMesh {
    /// Builds the grid described by `config`.
    ///
    /// Particle (col, row) sits at `origin + (col, row) * rest_distance` and
    /// row 0 is pinned. Links are emitted per particle in row-major order,
    /// the right neighbour first and then the one below.
    pub fn grid(config: &ClothConfig) -> Result<Self> {
        config.validate()?;

        let (rows, cols) = (config.rows, config.cols);
        let origin = config.resolved_origin();
        let mut particles = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let position = origin + Vec2::new(col as f32, row as f32) * config.rest_distance;
                particles.push(if row == 0 {
                    Particle::pinned(position)
                } else {
                    Particle::new(position)
                });
            }
        }
        let particles = FixedStore::from_vec(particles);

        let mut links = Vec::with_capacity(Self::link_count(rows, cols));
        for row in 0..rows {
            for col in 0..cols {
                let here = ParticleId::new(row * cols + col);
                if col + 1 < cols {
                    links.push((here, ParticleId::new(row * cols + col + 1)));
                }
                if row + 1 < rows {
                    links.push((here, ParticleId::new((row + 1) * cols + col)));
                }
            }
        }

        Self::from_parts(particles, &links, rows, cols)
    }

    /// Assembles a mesh from explicit particles and links. Rest lengths are
    /// taken from the particle positions.
    ///
    /// `particles` must be laid out row-major with exactly `rows * cols`
    /// entries.
    pub fn from_parts(
        particles: ParticleStore,
        links: &[(ParticleId, ParticleId)],
        rows: usize,
        cols: usize,
    ) -> Result<Self> {
        check_shape(rows, cols, particles.len())?;
        let constraints = links
            .iter()
            .map(|&(a, b)| DistanceConstraint::new(a, b, &particles))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            particles,
            constraints,
            rows,
            cols,
        })
    }

    /// Number of structural links in a `rows` x `cols` grid.
    pub fn link_count(rows: usize, cols: usize) -> usize {
        rows * cols.saturating_sub(1) + rows.saturating_sub(1) * cols
    }

    pub fn index(&self, col: usize, row: usize) -> ParticleId {
        ParticleId::new(row * self.cols + col)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Fails if the particle store no longer matches the grid shape.
    pub fn check_shape(&self) -> Result<()> {
        check_shape(self.rows, self.cols, self.particles.len())
    }
}

fn check_shape(rows: usize, cols: usize, particles: usize) -> Result<()> {
    if rows.checked_mul(cols) == Some(particles) {
        Ok(())
    } else {
        Err(ClothError::GridSizeMismatch {
            rows,
            cols,
            particles,
        })
    }
}
