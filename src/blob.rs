//! Blobs: the circular influence regions the field is made of.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::config::{PhaseLayout, RevealConfig};

/// A circle with soft radial falloff, in container coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blob {
    pub position: Vec2,
    pub radius: f32,
}

impl Blob {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self { position, radius }
    }
}

/// Orbit parameters fixed when an orbiter is spawned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitParams {
    index: usize,
    phase: f32,
    angular_speed: f32,
    base_orbit_radius: f32,
}

impl OrbitParams {
    /// Position in the orbiter sequence.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Initial angular offset in radians.
    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Radians per second of simulation time.
    #[inline]
    pub fn angular_speed(&self) -> f32 {
        self.angular_speed
    }

    /// Orbit radius before pulsation and wobble.
    #[inline]
    pub fn base_orbit_radius(&self) -> f32 {
        self.base_orbit_radius
    }

    /// Angle around the main blob at simulation time `t`.
    #[inline]
    pub fn angle_at(&self, t: f64) -> f64 {
        self.phase as f64 + t * self.angular_speed as f64
    }
}

/// A secondary blob circling the main blob.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitingBlob {
    pub blob: Blob,
    params: OrbitParams,
}

impl OrbitingBlob {
    #[inline]
    pub fn params(&self) -> &OrbitParams {
        &self.params
    }
}

/// Create the orbiting blobs of a new field.
///
/// This is the only place randomness enters the simulation; pass a seeded
/// generator for reproducible motion.
pub fn spawn_orbiters<R: Rng>(config: &RevealConfig, rng: &mut R) -> Vec<OrbitingBlob> {
    let count = config.orbiter_count;
    (0..count)
        .map(|index| {
            let phase = match config.phase_layout {
                PhaseLayout::Random => rng.gen_range(0.0..TAU),
                PhaseLayout::Even => TAU * index as f32 / count as f32,
            };
            let params = OrbitParams {
                index,
                phase,
                angular_speed: rng.gen_range(config.angular_speed.clone()),
                base_orbit_radius: rng.gen_range(config.orbit_radius.clone()),
            };
            let radius = rng.gen_range(config.initial_orbiter_radius.clone());
            OrbitingBlob {
                blob: Blob::new(config.sentinel, radius),
                params,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_count_and_ranges() {
        let config = RevealConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let orbiters = spawn_orbiters(&config, &mut rng);

        assert_eq!(orbiters.len(), 5);
        for (i, orbiter) in orbiters.iter().enumerate() {
            let p = orbiter.params();
            assert_eq!(p.index(), i);
            assert!((0.0..TAU).contains(&p.phase()));
            assert!(config.angular_speed.contains(&p.angular_speed()));
            assert!(config.orbit_radius.contains(&p.base_orbit_radius()));
            assert_eq!(orbiter.blob.position, config.sentinel);
            assert!(orbiter.blob.radius > 0.0);
        }
    }

    #[test]
    fn test_spawn_is_reproducible_with_seed() {
        let config = RevealConfig::default();
        let a = spawn_orbiters(&config, &mut StdRng::seed_from_u64(42));
        let b = spawn_orbiters(&config, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_even_phase_layout() {
        let config = RevealConfig::default()
            .with_orbiter_count(4)
            .with_phase_layout(PhaseLayout::Even);
        let orbiters = spawn_orbiters(&config, &mut StdRng::seed_from_u64(1));

        let phases: Vec<f32> = orbiters.iter().map(|o| o.params().phase()).collect();
        let expected = [0.0, TAU / 4.0, TAU / 2.0, 3.0 * TAU / 4.0];
        for (p, e) in phases.iter().zip(expected) {
            assert!((p - e).abs() < 1e-5);
        }
    }

    #[test]
    fn test_angle_at() {
        let config = RevealConfig::default();
        let orbiters = spawn_orbiters(&config, &mut StdRng::seed_from_u64(3));
        let p = orbiters[0].params();
        assert_eq!(p.angle_at(0.0), p.phase() as f64);
        let expected = p.phase() as f64 + 2.0 * p.angular_speed() as f64;
        assert!((p.angle_at(2.0) - expected).abs() < 1e-9);
    }
}
