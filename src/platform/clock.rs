//! Fixed-rate frame pacing

use std::thread;
use std::time::{Duration, Instant};

/// Longest frame step handed to the simulation (seconds)
const MAX_FRAME_DT: f32 = 0.1;

/// Sleeps out the remainder of each frame and reports elapsed time
#[derive(Debug)]
pub struct FrameClock {
    frame: Duration,
    last: Instant,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
            last: Instant::now(),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Wait for the next frame boundary; returns seconds since the last call
    pub fn tick(&mut self) -> f32 {
        let elapsed = self.last.elapsed();
        if elapsed < self.frame {
            thread::sleep(self.frame - elapsed);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt.min(MAX_FRAME_DT)
    }
}
