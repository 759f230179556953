use std::time::Instant;

use foundation::time::Millis;

/// Per-display-refresh frame metadata.
///
/// `elapsed` is wall-clock time since the clock started; animation that must
/// oscillate continuously reads it instead of counting frames.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    pub elapsed: Millis,
}

impl Frame {
    pub fn new(index: u64, elapsed: Millis) -> Self {
        Self { index, elapsed }
    }

    /// Next frame `dt_ms` later. Used by replayable tests and fixed-step drivers.
    pub fn advance(self, dt_ms: f64) -> Self {
        Self::new(self.index + 1, Millis(self.elapsed.0 + dt_ms))
    }
}

/// Produces frames stamped from a monotonic clock.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    next_index: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            next_index: 0,
        }
    }

    pub fn tick(&mut self) -> Frame {
        let elapsed = self.start.elapsed().as_secs_f64() * 1000.0;
        let frame = Frame::new(self.next_index, Millis(elapsed));
        self.next_index += 1;
        frame
    }
}
