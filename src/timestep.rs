//! Fixed-rate tick scheduling for hosts
//!
//! Accumulates wall-clock frame time and reports how many reference ticks to
//! run this frame. A single frame is clamped to [`MAX_FRAME_TIME`] and at most
//! `max_substeps` ticks are released, so a stalled host cannot spiral.

use crate::consts::{MAX_FRAME_TIME, MAX_SUBSTEPS};

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    max_substeps: u32,
}

impl FixedTimestep {
    pub fn new(tick_rate: f32) -> Self {
        Self {
            dt: 1.0 / tick_rate,
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Add a frame's elapsed time; returns the number of ticks to run
    pub fn push(&mut self, frame_time: f32) -> u32 {
        if !(self.dt > 0.0) {
            return 0;
        }
        self.accumulator += frame_time.clamp(0.0, MAX_FRAME_TIME);

        let mut ticks = 0;
        while self.accumulator >= self.dt && ticks < self.max_substeps {
            self.accumulator -= self.dt;
            ticks += 1;
        }
        // Time we refused to simulate is dropped, not banked
        if ticks == self.max_substeps {
            self.accumulator = self.accumulator.min(self.dt);
        }
        ticks
    }

    /// Fraction of a tick left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        if self.dt > 0.0 {
            (self.accumulator / self.dt).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Drop accumulated time, e.g. after the host was paused
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_partial_frames() {
        let mut timestep = FixedTimestep::new(30.0);
        assert_eq!(timestep.push(0.02), 0);
        assert_eq!(timestep.push(0.02), 1);
        assert!(timestep.alpha() > 0.0 && timestep.alpha() < 1.0);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        // 10 s of stall counts as 0.1 s: two ticks at 20 Hz
        let mut timestep = FixedTimestep::new(20.0);
        assert_eq!(timestep.push(10.0), 2);
    }

    #[test]
    fn test_substeps_are_capped() {
        let mut timestep = FixedTimestep::new(240.0);
        assert_eq!(timestep.push(0.1), MAX_SUBSTEPS);
        assert!(timestep.alpha() <= 1.0);
    }

    #[test]
    fn test_negative_frame_time_runs_nothing() {
        let mut timestep = FixedTimestep::new(60.0);
        assert_eq!(timestep.push(-1.0), 0);
        assert_eq!(timestep.alpha(), 0.0);
    }

    #[test]
    fn test_reset_clears_accumulator() {
        let mut timestep = FixedTimestep::new(30.0);
        timestep.push(0.03);
        timestep.reset();
        assert_eq!(timestep.alpha(), 0.0);
        assert_eq!(timestep.push(0.01), 0);
    }
}
