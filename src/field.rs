//! The metaball field: simulation state and its per-frame update.
//!
//! A [`Field`] holds one main blob that eases toward the pointer target and
//! a fixed set of orbiting blobs that circle it. All motion is driven by
//! the fixed-step [`FrameClock`], so a field stepped `n` times always ends
//! in the same state for the same seed.
//!
//! # Update order
//!
//! Each [`Field::step`]:
//! 1. advances the clock by one nominal frame,
//! 2. eases the main blob toward the target and recomputes its radius,
//! 3. moves every orbiter toward its wobbling orbit point and recomputes
//!    its radius.

use glam::Vec2;
use rand::Rng;

use crate::blob::{spawn_orbiters, Blob, OrbitingBlob};
use crate::config::RevealConfig;
use crate::time::FrameClock;

/// Full simulation state of the reveal effect.
#[derive(Debug, Clone)]
pub struct Field {
    config: RevealConfig,
    target: Vec2,
    main: Blob,
    orbiters: Vec<OrbitingBlob>,
    clock: FrameClock,
    active: bool,
}

impl Field {
    /// Create a field with randomized orbiters.
    ///
    /// All blobs and the target start at the configured sentinel, outside
    /// any visible area, and the field starts inactive.
    pub fn new<R: Rng>(config: RevealConfig, rng: &mut R) -> Self {
        let orbiters = spawn_orbiters(&config, rng);
        Self {
            target: config.sentinel,
            main: Blob::new(config.sentinel, config.main_radius),
            orbiters,
            clock: FrameClock::new(config.time_step),
            active: false,
            config,
        }
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Latest pointer position in container coordinates.
    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Replace the target. Blobs react on the next [`step`](Self::step).
    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    pub fn main(&self) -> &Blob {
        &self.main
    }

    pub fn orbiters(&self) -> &[OrbitingBlob] {
        &self.orbiters
    }

    /// Main blob followed by every orbiter, in rasterization order.
    pub fn blobs(&self) -> impl Iterator<Item = &Blob> {
        std::iter::once(&self.main).chain(self.orbiters.iter().map(|o| &o.blob))
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Simulation time in seconds.
    pub fn time(&self) -> f64 {
        self.clock.time()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Advance the simulation by one frame.
    pub fn step(&mut self) {
        let t = self.clock.advance();
        update_main(&mut self.main, self.target, t, &self.config);
        let center = self.main.position;
        for orbiter in &mut self.orbiters {
            update_orbiter(orbiter, center, t, &self.config);
        }
    }
}

/// Radius of the main blob at time `t`.
pub fn main_radius_at(t: f64, config: &RevealConfig) -> f32 {
    let [a, b] = config.main_pulse;
    config.main_radius + a.sin(t, 0.0) + b.sin(t, 0.0)
}

/// Radius of orbiter `index` at time `t`.
pub fn orbiter_radius_at(index: usize, t: f64, config: &RevealConfig) -> f32 {
    let i = index as f32;
    config.orbiter_baseline(index) + config.orbiter_pulse.sin(t, config.orbiter_pulse_phase * i)
}

/// Point orbiter `orbiter` is drawn toward at time `t`, around `center`.
pub fn orbit_point(orbiter: &OrbitingBlob, center: Vec2, t: f64, config: &RevealConfig) -> Vec2 {
    let params = orbiter.params();
    let i = params.index() as f32;
    let angle = params.angle_at(t);
    let orbit = params.base_orbit_radius() + config.orbit_pulse.sin(t, config.orbit_pulse_phase * i);
    let raw = center + Vec2::new(angle.cos() as f32, angle.sin() as f32) * orbit;

    let [wx, wy] = config.wobble;
    let [px, py] = config.wobble_phase;
    let wobble = Vec2::new(wx.sin(t, px * i), wy.cos(t, py * i));

    raw + wobble
}

fn update_main(main: &mut Blob, target: Vec2, t: f64, config: &RevealConfig) {
    main.position = main.position.lerp(target, config.main_smoothing);
    main.radius = main_radius_at(t, config);
}

fn update_orbiter(orbiter: &mut OrbitingBlob, center: Vec2, t: f64, config: &RevealConfig) {
    let goal = orbit_point(orbiter, center, t, config);
    let index = orbiter.params().index();
    orbiter.blob.position = orbiter.blob.position.lerp(goal, config.orbit_smoothing);
    orbiter.blob.radius = orbiter_radius_at(index, t, config);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_field() -> Field {
        Field::new(RevealConfig::default(), &mut StdRng::seed_from_u64(11))
    }

    #[test]
    fn test_new_field_starts_at_sentinel() {
        let field = seeded_field();
        let sentinel = field.config().sentinel;

        assert_eq!(field.target(), sentinel);
        assert_eq!(field.main().position, sentinel);
        assert!(field.orbiters().iter().all(|o| o.blob.position == sentinel));
        assert_eq!(field.time(), 0.0);
        assert!(!field.is_active());
        assert_eq!(field.blobs().count(), 6);
    }

    #[test]
    fn test_main_moves_fixed_fraction() {
        let mut field = seeded_field();
        field.set_target(Vec2::new(0.0, 0.0));
        let before = field.main().position;
        field.step();

        // 10% of the remaining distance
        let expected = before + (Vec2::ZERO - before) * 0.1;
        assert!(field.main().position.distance(expected) < 1e-4);
    }

    #[test]
    fn test_main_radius_formula() {
        let mut field = seeded_field();
        field.step();
        let t = field.time();
        let expected = 100.0 + (2.0 * t).sin() * 15.0 + (3.7 * t).sin() * 10.0;
        assert!((field.main().radius as f64 - expected).abs() < 1e-4);
    }

    #[test]
    fn test_orbiter_moves_toward_orbit_point() {
        let mut field = seeded_field();
        field.set_target(Vec2::new(400.0, 300.0));
        for _ in 0..50 {
            field.step();
        }

        let config = field.config().clone();
        let center = field.main().position;
        let before: Vec<Vec2> = field.orbiters().iter().map(|o| o.blob.position).collect();
        field.step();
        let t = field.time();
        let center_after = field.main().position;

        for (orbiter, prev) in field.orbiters().iter().zip(before) {
            let goal = orbit_point(orbiter, center_after, t, &config);
            let expected = prev.lerp(goal, 0.08);
            assert!(orbiter.blob.position.distance(expected) < 1e-3);
        }
        assert_ne!(center, center_after);
    }

    #[test]
    fn test_orbiter_radius_formula() {
        let config = RevealConfig::default();
        let t = 1.25;
        for i in 0..5 {
            let expected = (30.0 + i as f64 * 5.0) + (t * 3.0 + i as f64 * 0.7).sin() * 12.0;
            assert!((orbiter_radius_at(i, t, &config) as f64 - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn test_step_advances_fixed_increment() {
        let mut field = seeded_field();
        for _ in 0..10 {
            field.step();
        }
        assert_eq!(field.clock().frame(), 10);
        assert!((field.time() - 0.16).abs() < 1e-5);
    }

    #[test]
    fn test_orbit_params_survive_steps() {
        let mut field = seeded_field();
        let params: Vec<_> = field.orbiters().iter().map(|o| *o.params()).collect();
        field.set_target(Vec2::new(10.0, 10.0));
        for _ in 0..100 {
            field.step();
        }
        let after: Vec<_> = field.orbiters().iter().map(|o| *o.params()).collect();
        assert_eq!(params, after);
    }
}
