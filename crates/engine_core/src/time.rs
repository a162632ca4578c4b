//! Time management for the shell loop.

use std::time::{Duration, Instant};

/// Tracks frame timing and delta time for the event-driven update loop.
#[derive(Debug)]
pub struct Time {
    /// Time when the application started.
    start_time: Instant,
    /// Time of the last frame.
    last_frame: Instant,
    /// Duration of the last frame.
    delta: Duration,
    /// Total elapsed time since start.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_frame: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    /// Update timing at the start of a new frame.
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_frame;
        self.last_frame = now;
        self.elapsed = now - self.start_time;
        self.frame_count += 1;
    }

    /// Delta time of the last frame in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Delta time of the last frame as a Duration.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Total elapsed time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Frames since start.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
