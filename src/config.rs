//! Tunable constants of the reveal effect.
//!
//! Every number that shapes the motion or the silhouette lives in
//! [`RevealConfig`]. The defaults reproduce the hero section of the tribute
//! site; builder methods adjust individual values.
//!
//! ```ignore
//! use metaball_reveal::prelude::*;
//!
//! let config = RevealConfig::default()
//!     .with_orbiter_count(7)
//!     .with_threshold(160)
//!     .with_accumulation(Accumulation::Additive);
//! config.validate()?;
//! ```

use std::f32::consts::SQRT_2;
use std::ops::Range;

use glam::Vec2;

use crate::error::ConfigError;

/// How overlapping blob falloffs combine in the scratch bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accumulation {
    /// Canvas-style "source over" compositing: `a = s + d * (1 - s)`.
    #[default]
    SourceOver,
    /// Plain sum, saturating at 1.
    Additive,
}

/// How orbiter phases are chosen at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseLayout {
    /// Uniformly sampled in `[0, 2π)`.
    #[default]
    Random,
    /// Evenly spaced around the circle, `2πi / n`.
    Even,
}

/// A sinusoid term `amplitude * sin(frequency * t + phase)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub amplitude: f32,
    pub frequency: f32,
}

impl Wave {
    pub const fn new(amplitude: f32, frequency: f32) -> Self {
        Self { amplitude, frequency }
    }

    /// Evaluate with a phase offset.
    ///
    /// The argument is formed in f64 so long-running clocks keep their
    /// resolution; only the result is narrowed.
    #[inline]
    pub fn sin(&self, t: f64, phase: f32) -> f32 {
        (self.amplitude as f64 * (self.frequency as f64 * t + phase as f64).sin()) as f32
    }

    /// Evaluate the cosine form with a phase offset.
    #[inline]
    pub fn cos(&self, t: f64, phase: f32) -> f32 {
        (self.amplitude as f64 * (self.frequency as f64 * t + phase as f64).cos()) as f32
    }
}

/// Configuration for a metaball field and its rasterizer.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealConfig {
    /// Where the target and all blobs start before any pointer activity.
    pub sentinel: Vec2,
    /// Radius the main blob pulses around.
    pub main_radius: f32,
    /// The two pulsation terms of the main blob's radius.
    pub main_pulse: [Wave; 2],
    /// Fraction of the remaining distance the main blob covers per frame.
    pub main_smoothing: f32,
    /// Number of orbiting blobs.
    pub orbiter_count: usize,
    /// Range orbiter angular speeds are drawn from (rad/s).
    pub angular_speed: Range<f32>,
    /// Range orbiter base orbit radii are drawn from (px).
    pub orbit_radius: Range<f32>,
    /// Range the (immediately overwritten) initial orbiter radius is drawn from.
    pub initial_orbiter_radius: Range<f32>,
    /// Orbit radius pulsation; phase offset is `orbit_pulse_phase * i`.
    pub orbit_pulse: Wave,
    pub orbit_pulse_phase: f32,
    /// Per-axis wobble; x uses `sin`, y uses `cos`.
    pub wobble: [Wave; 2],
    /// Per-axis wobble phase step per orbiter index.
    pub wobble_phase: [f32; 2],
    /// Fraction of the remaining distance an orbiter covers per frame.
    pub orbit_smoothing: f32,
    /// Orbiter radius baseline for index 0, and its increase per index.
    pub orbiter_radius: f32,
    pub orbiter_radius_step: f32,
    /// Orbiter radius pulsation; phase offset is `orbiter_pulse_phase * i`.
    pub orbiter_pulse: Wave,
    pub orbiter_pulse_phase: f32,
    /// Fixed simulation time added per frame (seconds).
    pub time_step: f32,
    /// Falloff reaches zero at `falloff_extent * radius`.
    pub falloff_extent: f32,
    /// 8-bit alpha at or above which a pixel becomes part of the silhouette.
    pub threshold: u8,
    pub accumulation: Accumulation,
    pub phase_layout: PhaseLayout,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            sentinel: Vec2::new(-200.0, -200.0),
            main_radius: 100.0,
            main_pulse: [Wave::new(15.0, 2.0), Wave::new(10.0, 3.7)],
            main_smoothing: 0.1,
            orbiter_count: 5,
            angular_speed: 0.4..0.8,
            orbit_radius: 80.0..120.0,
            initial_orbiter_radius: 30.0..55.0,
            orbit_pulse: Wave::new(20.0, 1.5),
            orbit_pulse_phase: 0.8,
            wobble: [Wave::new(15.0, 2.5), Wave::new(15.0, 2.1)],
            wobble_phase: [1.2, 0.9],
            orbit_smoothing: 0.08,
            orbiter_radius: 30.0,
            orbiter_radius_step: 5.0,
            orbiter_pulse: Wave::new(12.0, 3.0),
            orbiter_pulse_phase: 0.7,
            time_step: 0.016,
            falloff_extent: 1.5,
            threshold: 180,
            accumulation: Accumulation::SourceOver,
            phase_layout: PhaseLayout::Random,
        }
    }
}

impl RevealConfig {
    pub fn with_sentinel(mut self, sentinel: Vec2) -> Self {
        self.sentinel = sentinel;
        self
    }

    pub fn with_main_radius(mut self, radius: f32) -> Self {
        self.main_radius = radius;
        self
    }

    pub fn with_main_smoothing(mut self, factor: f32) -> Self {
        self.main_smoothing = factor;
        self
    }

    pub fn with_orbit_smoothing(mut self, factor: f32) -> Self {
        self.orbit_smoothing = factor;
        self
    }

    pub fn with_orbiter_count(mut self, count: usize) -> Self {
        self.orbiter_count = count;
        self
    }

    pub fn with_angular_speed(mut self, range: Range<f32>) -> Self {
        self.angular_speed = range;
        self
    }

    pub fn with_orbit_radius(mut self, range: Range<f32>) -> Self {
        self.orbit_radius = range;
        self
    }

    pub fn with_time_step(mut self, step: f32) -> Self {
        self.time_step = step;
        self
    }

    pub fn with_falloff_extent(mut self, extent: f32) -> Self {
        self.falloff_extent = extent;
        self
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_accumulation(mut self, accumulation: Accumulation) -> Self {
        self.accumulation = accumulation;
        self
    }

    pub fn with_phase_layout(mut self, layout: PhaseLayout) -> Self {
        self.phase_layout = layout;
        self
    }

    /// Threshold as a fraction of full opacity.
    #[inline]
    pub fn threshold_fraction(&self) -> f32 {
        self.threshold as f32 / 255.0
    }

    /// Sum of the main blob's pulsation amplitudes.
    pub fn main_amplitude(&self) -> f32 {
        self.main_pulse.iter().map(|w| w.amplitude.abs()).sum()
    }

    /// Closed interval the main blob's radius stays within.
    pub fn main_radius_band(&self) -> (f32, f32) {
        let amp = self.main_amplitude();
        (self.main_radius - amp, self.main_radius + amp)
    }

    /// Radius baseline of orbiter `index`.
    pub fn orbiter_baseline(&self, index: usize) -> f32 {
        self.orbiter_radius + self.orbiter_radius_step * index as f32
    }

    /// Closed interval the radius of orbiter `index` stays within.
    pub fn orbiter_radius_band(&self, index: usize) -> (f32, f32) {
        let base = self.orbiter_baseline(index);
        let amp = self.orbiter_pulse.amplitude.abs();
        (base - amp, base + amp)
    }

    /// Largest distance the wobble offset moves an orbit target.
    ///
    /// The two axes are independent sinusoids, so the offset's magnitude
    /// reaches the diagonal when both peak together.
    pub fn wobble_reach(&self) -> f32 {
        let [x, y] = self.wobble;
        if (x.amplitude.abs() - y.amplitude.abs()).abs() < f32::EPSILON {
            x.amplitude.abs() * SQRT_2
        } else {
            x.amplitude.hypot(y.amplitude)
        }
    }

    /// Interval of target distances from the main blob for an orbiter with
    /// the given base orbit radius.
    pub fn orbit_band(&self, base_orbit_radius: f32) -> (f32, f32) {
        let spread = self.orbit_pulse.amplitude.abs() + self.wobble_reach();
        (base_orbit_radius - spread, base_orbit_radius + spread)
    }

    /// Check every invariant the field relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("main_smoothing", self.main_smoothing),
            ("orbit_smoothing", self.orbit_smoothing),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::SmoothingOutOfRange { name, value });
            }
        }

        let (main_min, _) = self.main_radius_band();
        if main_min <= 0.0 {
            return Err(ConfigError::RadiusBand {
                name: "main_radius",
                min: main_min,
            });
        }

        // Baselines grow with the index, so index 0 has the lowest band.
        let (orbiter_min, _) = self.orbiter_radius_band(0);
        if orbiter_min <= 0.0 || self.orbiter_radius_step < 0.0 {
            return Err(ConfigError::RadiusBand {
                name: "orbiter_radius",
                min: orbiter_min,
            });
        }

        for (name, range) in [
            ("angular_speed", &self.angular_speed),
            ("orbit_radius", &self.orbit_radius),
            ("initial_orbiter_radius", &self.initial_orbiter_radius),
        ] {
            if range.is_empty() || range.start < 0.0 {
                return Err(ConfigError::EmptyRange { name });
            }
        }

        if !(self.time_step > 0.0) {
            return Err(ConfigError::TimeStep(self.time_step));
        }
        if !(self.falloff_extent > 0.0) {
            return Err(ConfigError::FalloffExtent(self.falloff_extent));
        }
        if self.threshold == 0 {
            return Err(ConfigError::ZeroThreshold);
        }

        Ok(())
    }
}
