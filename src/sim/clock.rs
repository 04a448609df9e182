//! Frame pacing for the real-time loop
//!
//! The simulation itself only sees `dt`; this clock measures it against the
//! wall clock and sleeps off whatever is left of each frame.

use std::time::{Duration, Instant};

use crate::consts::MAX_FRAME_DT;

/// Fixed-rate frame clock
#[derive(Debug)]
pub struct FrameClock {
    frame: Duration,
    last: Instant,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            last: Instant::now(),
        }
    }

    /// Nominal frame length in seconds
    pub fn frame_dt(&self) -> f32 {
        self.frame.as_secs_f32()
    }

    /// Sleep until the next frame is due and return the elapsed dt.
    ///
    /// A long stall (e.g. a slow oracle call) is clamped to `MAX_FRAME_DT`
    /// rather than integrated in one huge step.
    pub fn tick(&mut self) -> f32 {
        let elapsed = self.last.elapsed();
        if elapsed < self.frame {
            std::thread::sleep(self.frame - elapsed);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        clamp_dt(dt)
    }
}

/// Clamp a measured frame time into the range the integrator accepts
#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    dt.clamp(0.0, MAX_FRAME_DT)
}
