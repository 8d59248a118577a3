//! Pointer queries against the constraint segments of the cloth.

pub mod queries;

pub use queries::{point_to_segment_distance, ConstraintHit, NearestConstraintQuery};
