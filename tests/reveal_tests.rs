//! Integration tests for the reveal effect.
//!
//! These drive the public API end to end: a seeded field, the rasterizer,
//! and a full animator over a `MemoryLayer` with a hand-stepped scheduler.

use metaball_reveal::components;
use metaball_reveal::raster::{core_radius, fusion_distance};
use metaball_reveal::{
    Accumulation, Animator, Blob, ContainerRect, Field, LoopState, ManualScheduler, MemoryLayer,
    PhaseLayout, Rasterizer, RevealConfig, Vec2,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_field(config: RevealConfig, seed: u64) -> Field {
    let mut field = Field::new(config, &mut StdRng::seed_from_u64(seed));
    field.set_active(true);
    field
}

fn mounted(width: u32, height: u32) -> Animator<MemoryLayer, ManualScheduler> {
    Animator::new(
        RevealConfig::default(),
        ContainerRect::from_size(width, height),
        MemoryLayer::new(),
        ManualScheduler::new(),
        &mut StdRng::seed_from_u64(2024),
    )
    .expect("default config is valid")
}

/// Render two equal blobs on a horizontal line, `distance` apart, centered
/// on a pixel center, and count the shapes.
fn count_pair(radius: f32, distance: f32, config: &RevealConfig) -> usize {
    let mut raster = Rasterizer::new(512, 256);
    let mid = Vec2::new(256.5, 128.5);
    let offset = Vec2::new(distance * 0.5, 0.0);
    let a = Blob::new(mid - offset, radius);
    let b = Blob::new(mid + offset, radius);
    let mask = raster.render([&a, &b], config).expect("non-empty raster");
    components::label(mask).count()
}

/// Amplitude gain of the per-frame smoothing `p += a * (goal - p)` for a
/// goal rotating at `angular_speed` rad/s, sampled every `step` seconds.
fn tracking_gain(smoothing: f32, angular_speed: f32, step: f32) -> f32 {
    let (a, theta) = (smoothing as f64, angular_speed as f64 * step as f64);
    let keep = 1.0 - a;
    (a / (1.0 - 2.0 * keep * theta.cos() + keep * keep).sqrt()) as f32
}

// ============================================================================
// Field motion
// ============================================================================

#[test]
fn test_main_blob_converges_to_held_target() {
    let mut field = seeded_field(RevealConfig::default(), 1);
    let target = Vec2::new(300.0, 150.0);
    field.set_target(target);

    for _ in 0..300 {
        field.step();
    }
    assert!(field.main().position.distance(target) < 1e-3);
}

#[test]
fn test_main_radius_stays_in_band() {
    let mut field = seeded_field(RevealConfig::default(), 2);
    let (lo, hi) = field.config().main_radius_band();
    assert_eq!((lo, hi), (75.0, 125.0));

    for _ in 0..5000 {
        field.step();
        let r = field.main().radius;
        assert!(r >= lo - 1e-3 && r <= hi + 1e-3, "main radius {} outside band", r);
    }
}

#[test]
fn test_orbiter_radii_stay_in_band() {
    let mut field = seeded_field(RevealConfig::default(), 3);
    for _ in 0..3000 {
        field.step();
        for orbiter in field.orbiters() {
            let index = orbiter.params().index();
            let (lo, hi) = field.config().orbiter_radius_band(index);
            let r = orbiter.blob.radius;
            assert!(r >= lo - 1e-3 && r <= hi + 1e-3, "orbiter {} radius {}", index, r);
            assert!(r > 0.0);
        }
    }
}

#[test]
fn test_orbiters_stay_in_orbit_band() {
    let mut field = seeded_field(RevealConfig::default(), 4);
    field.set_target(Vec2::new(400.0, 300.0));

    // Let the main blob settle and the start-up transient decay
    for _ in 0..400 {
        field.step();
    }

    let config = field.config().clone();
    let spread = config.orbit_pulse.amplitude + config.wobble_reach();

    for _ in 0..600 {
        field.step();
        let center = field.main().position;
        for orbiter in field.orbiters() {
            let params = orbiter.params();
            let (_, hi) = config.orbit_band(params.base_orbit_radius());
            // The smoothing is a linear filter: the base rotation comes through
            // scaled by its gain, pulse and wobble are never amplified.
            let gain = tracking_gain(config.orbit_smoothing, params.angular_speed(), config.time_step);
            let lo = gain * params.base_orbit_radius() - spread;

            let d = orbiter.blob.position.distance(center);
            assert!(d >= lo - 1e-2, "orbiter distance {} below {}", d, lo);
            assert!(d <= hi + 1e-2, "orbiter distance {} above {}", d, hi);
        }
    }
}

#[test]
fn test_tracking_gain_bounds() {
    // A still goal is reached exactly; a moving one is followed with lag
    assert!((tracking_gain(0.08, 0.0, 0.016) - 1.0).abs() < 1e-6);
    let gain = tracking_gain(0.08, 0.8, 0.016);
    assert!(gain < 1.0 && gain > 0.98);
}

#[test]
fn test_even_phase_layout() {
    let config = RevealConfig::default().with_phase_layout(PhaseLayout::Even);
    let field = seeded_field(config, 5);
    let step = std::f32::consts::TAU / 5.0;
    for (i, orbiter) in field.orbiters().iter().enumerate() {
        assert!((orbiter.params().phase() - step * i as f32).abs() < 1e-5);
    }
}

#[test]
fn test_same_seed_same_motion() {
    let mut a = seeded_field(RevealConfig::default(), 77);
    let mut b = seeded_field(RevealConfig::default(), 77);
    for field in [&mut a, &mut b] {
        field.set_target(Vec2::new(120.0, 80.0));
        for _ in 0..100 {
            field.step();
        }
    }
    let pa: Vec<Vec2> = a.blobs().map(|b| b.position).collect();
    let pb: Vec<Vec2> = b.blobs().map(|b| b.position).collect();
    assert_eq!(pa, pb);
}

// ============================================================================
// Fusion
// ============================================================================

#[test]
fn test_far_blobs_stay_separate() {
    let config = RevealConfig::default();
    assert_eq!(count_pair(40.0, 120.0, &config), 2);
}

#[test]
fn test_close_blobs_fuse() {
    let config = RevealConfig::default();
    assert_eq!(count_pair(40.0, 20.0, &config), 1);
}

#[test]
fn test_fusion_at_intermediate_distance_matches_derived_value() {
    let config = RevealConfig::default();
    let radius = 40.0;
    let d = 1.2 * radius;
    let expected = if d < fusion_distance(radius, &config) { 1 } else { 2 };
    assert_eq!(count_pair(radius, d, &config), expected);
}

#[test]
fn test_fusion_boundary() {
    let config = RevealConfig::default();
    let radius = 40.0;
    let fuse = fusion_distance(radius, &config);
    // A lone blob's silhouette is narrower than its falloff
    assert!(2.0 * core_radius(radius, &config) < fuse);

    assert_eq!(count_pair(radius, fuse - 5.0, &config), 1);
    assert_eq!(count_pair(radius, fuse + 5.0, &config), 2);
}

#[test]
fn test_additive_fuses_earlier() {
    let over = RevealConfig::default();
    let additive = RevealConfig::default().with_accumulation(Accumulation::Additive);
    let radius = 40.0;
    assert!(fusion_distance(radius, &additive) > fusion_distance(radius, &over));

    let d = fusion_distance(radius, &additive) - 5.0;
    assert_eq!(count_pair(radius, d, &additive), 1);
}

// ============================================================================
// Animator lifecycle
// ============================================================================

#[test]
fn test_hover_reveals_around_pointer() {
    let mut animator = mounted(640, 360);
    animator.set_hovering(true);
    animator.pointer_moved(Vec2::new(320.0, 180.0));
    animator.advance(120);

    let mask = animator.layer().mask().expect("mask applied");
    assert_eq!(mask.dimensions(), (640, 360));
    assert!(mask.is_covered(320, 180));
    assert!(!mask.is_covered(0, 0));
}

#[test]
fn test_deactivation_clears_within_one_frame() {
    let mut animator = mounted(320, 240);
    animator.set_hovering(true);
    animator.pointer_moved(Vec2::new(160.0, 120.0));
    animator.advance(60);
    assert!(animator.layer().is_revealing());

    animator.set_hovering(false);
    assert!(!animator.layer().is_revealing());
    assert_eq!(animator.state(), LoopState::Idle);

    // Hover again: one frame brings the mask back
    animator.set_hovering(true);
    assert_eq!(animator.advance(1), 1);
    assert!(animator.layer().is_revealing());
}

#[test]
fn test_no_updates_after_stop_or_unmount() {
    let mut animator = mounted(200, 200);
    animator.start();
    animator.pointer_moved(Vec2::new(100.0, 100.0));
    animator.advance(20);

    animator.stop();
    let updates = animator.layer().updates();
    assert!(!animator.tick());
    assert_eq!(animator.advance(50), 0);
    assert_eq!(animator.layer().updates(), updates);

    animator.start();
    animator.advance(5);
    let updates = animator.layer().updates();
    let layer = animator.unmount();
    assert_eq!(layer.updates(), updates);
    assert!(!layer.is_revealing());
}

#[test]
fn test_resize_keeps_blobs_and_clock() {
    let mut animator = mounted(320, 240);
    animator.start();
    animator.pointer_moved(Vec2::new(100.0, 100.0));
    animator.advance(40);

    let time = animator.field().time();
    let main = animator.field().main().position;
    let step = animator.field().clock().step();

    animator.resize(ContainerRect::from_size(200, 100));
    animator.advance(1);

    let mask = animator.layer().mask().expect("mask applied");
    assert_eq!(mask.dimensions(), (200, 100));
    assert!((animator.field().time() - (time + step as f64)).abs() < 1e-6);
    // One more smoothing step from where it was, not a restart at the sentinel
    let moved = animator.field().main().position.distance(main);
    assert!(moved < main.distance(Vec2::new(100.0, 100.0)) * 0.2 + 1e-3);
}

#[test]
fn test_resize_while_idle_applies_on_start() {
    let mut animator = mounted(320, 240);
    animator.resize(ContainerRect::from_size(160, 120));
    assert_eq!(animator.rasterizer().size(), (320, 240));

    animator.start();
    assert_eq!(animator.rasterizer().size(), (160, 120));
}

#[test]
fn test_container_offset_translates_pointer() {
    let mut animator = Animator::new(
        RevealConfig::default(),
        ContainerRect::new(Vec2::new(50.0, 400.0), 300, 200),
        MemoryLayer::new(),
        ManualScheduler::new(),
        &mut StdRng::seed_from_u64(9),
    )
    .expect("default config is valid");

    animator.start();
    animator.pointer_moved(Vec2::new(200.0, 500.0));
    assert_eq!(animator.field().target(), Vec2::new(150.0, 100.0));
}
