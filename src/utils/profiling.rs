use std::time::{Duration, Instant};

/// Per-phase timing of the most recent cloth step.
#[derive(Debug, Default, Clone, Copy)]
pub struct StepProfiler {
    pub force_time: Duration,
    pub integrator_time: Duration,
    pub bounds_time: Duration,
    pub solver_time: Duration,
    pub total_frame_time: Duration,

    pub particle_count: usize,
    pub active_constraint_count: usize,
}

impl StepProfiler {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn report(&self) {
        let total_us = self.total_frame_time.as_micros() as f32;
        if total_us < 1.0 {
            return;
        }

        log::info!(
            "cloth step: {:.3} ms, {} particles, {} active constraints",
            self.total_frame_time.as_secs_f32() * 1000.0,
            self.particle_count,
            self.active_constraint_count
        );
        for (label, time) in [
            ("forces", self.force_time),
            ("integrator", self.integrator_time),
            ("bounds", self.bounds_time),
            ("solver", self.solver_time),
        ] {
            log::info!(
                "  {:<10} {:.3} ms ({:.1}%)",
                label,
                time.as_secs_f32() * 1000.0,
                (time.as_micros() as f32 / total_us) * 100.0
            );
        }
    }
}

/// Adds the lifetime of the guard to a duration slot.
pub struct PhaseTimer<'a> {
    start: Instant,
    output: &'a mut Duration,
}

impl<'a> PhaseTimer<'a> {
    pub fn new(output: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            output,
        }
    }
}

impl<'a> Drop for PhaseTimer<'a> {
    fn drop(&mut self) {
        *self.output += self.start.elapsed();
    }
}
