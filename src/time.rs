//! Time facilities for the reveal animation.
//!
//! Simulation time is not wall-clock time: [`FrameClock`] advances by a
//! fixed nominal frame duration on every tick, so motion is identical no
//! matter how fast frames are delivered and tests can step it exactly.
//! [`FpsMeter`] measures real frame rate for host diagnostics only.
//!
//! # Example
//!
//! ```ignore
//! use metaball_reveal::time::FrameClock;
//!
//! let mut clock = FrameClock::new(0.016);
//! clock.advance();
//! assert_eq!(clock.frame(), 1);
//! assert!((clock.time() - 0.016).abs() < 1e-6);
//! ```

use std::time::{Duration, Instant};

/// Fixed-step simulation clock.
///
/// Time is derived from the integer frame count rather than accumulated,
/// so every frame adds exactly one step no matter how long the clock runs.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Seconds added per frame.
    step: f32,
    /// Frames advanced since creation.
    frame_count: u64,
}

impl FrameClock {
    /// Create a clock at `t = 0` advancing by `step` seconds per frame.
    pub fn new(step: f32) -> Self {
        Self {
            step,
            frame_count: 0,
        }
    }

    /// Advance one frame. Returns the new simulation time.
    pub fn advance(&mut self) -> f64 {
        self.frame_count += 1;
        self.time()
    }

    /// Simulation time in seconds.
    #[inline]
    pub fn time(&self) -> f64 {
        self.frame_count as f64 * self.step as f64
    }

    /// Seconds per frame.
    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Frames advanced since creation.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }
}

/// Measures delivered frames per second.
#[derive(Debug)]
pub struct FpsMeter {
    frames: u64,
    window_start: Instant,
    interval: Duration,
    fps: f32,
}

impl FpsMeter {
    /// Create a meter that refreshes its estimate every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            frames: 0,
            window_start: Instant::now(),
            interval,
            fps: 0.0,
        }
    }

    /// Record a delivered frame. Returns the new estimate when one was computed.
    pub fn frame(&mut self) -> Option<f32> {
        self.frames += 1;
        let elapsed = self.window_start.elapsed();
        if elapsed < self.interval {
            return None;
        }
        self.fps = self.frames as f32 / elapsed.as_secs_f32();
        self.frames = 0;
        self.window_start = Instant::now();
        Some(self.fps)
    }

    /// Last computed estimate.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FpsMeter {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}
