//! Error types for cloth construction.
//!
//! Stepping and querying a built cloth never fail; only building one from a
//! configuration or from explicit constraint lists can.

use std::fmt;

/// Errors raised while validating a configuration or assembling a mesh.
#[derive(Debug, Clone, PartialEq)]
pub enum ClothError {
    /// The grid must have at least one row and one column.
    InvalidGridDimensions { rows: usize, cols: usize },
    /// A numeric constant is non-finite or outside its allowed range.
    InvalidParameter { name: &'static str, value: f32 },
    /// A mesh's `rows * cols` does not match the number of particles it holds.
    GridSizeMismatch {
        rows: usize,
        cols: usize,
        particles: usize,
    },
    /// A constraint would join a particle to itself.
    DegenerateConstraint { index: usize },
    /// A constraint names a particle that is not in the store.
    ParticleOutOfBounds { index: usize, count: usize },
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidGridDimensions { rows, cols } => {
                write!(f, "grid must be at least 1x1, got {rows}x{cols}")
            }
            Self::InvalidParameter { name, value } => {
                write!(f, "invalid value for {name}: {value}")
            }
            Self::GridSizeMismatch {
                rows,
                cols,
                particles,
            } => write!(f, "{rows}x{cols} grid cannot hold {particles} particles"),
            Self::DegenerateConstraint { index } => {
                write!(f, "constraint joins particle {index} to itself")
            }
            Self::ParticleOutOfBounds { index, count } => {
                write!(f, "particle index {index} out of bounds (count: {count})")
            }
        }
    }
}

impl std::error::Error for ClothError {}

/// Convenient Result type alias for cloth construction.
pub type Result<T> = std::result::Result<T, ClothError>;
