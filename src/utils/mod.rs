//! Utility helpers: fixed-size handle stores, math extensions, logging, and profiling.

pub mod allocator;
pub mod logging;
pub mod math;
pub mod profiling;

pub use allocator::{ConstraintId, FixedStore, Handle, ParticleId};
pub use math::*;
pub use profiling::StepProfiler;
