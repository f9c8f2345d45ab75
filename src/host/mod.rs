//! Native stand-in for the hero section.
//!
//! [`run_window`] opens a window and composites the two hero images
//! through the GPU, using the animator's mask as the reveal layer.
//! [`run_snapshot`] drives the same animator headlessly and writes the
//! final mask as a PNG.

mod app;
mod compositor;
mod images;
mod shader;

use std::path::Path;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::event_loop::{ControlFlow, EventLoop};

pub use app::{HeroApp, WindowScheduler};
pub use compositor::Compositor;
pub use images::HeroImages;
pub use shader::{ComposeParams, COMPOSE_SOURCE};

use crate::animator::{Animator, ManualScheduler};
use crate::config::RevealConfig;
use crate::error::{HostError, RevealError};
use crate::input::ContainerRect;
use crate::mask::MemoryLayer;

/// Size of the hero window and of headless snapshots.
pub const HERO_SIZE: (u32, u32) = (1280, 720);
/// Frames run by [`run_snapshot`] when none are given.
pub const DEFAULT_SNAPSHOT_FRAMES: usize = 120;

/// Open the hero window and run until it is closed.
pub fn run_window(images: HeroImages, config: RevealConfig) -> Result<(), HostError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = HeroApp::new(images, config);
    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Run `frames` frames with the pointer parked at the container center
/// and write the resulting mask to `out` as PNG.
pub fn run_snapshot<P: AsRef<Path>>(
    out: P,
    frames: usize,
    config: RevealConfig,
) -> Result<(), HostError> {
    let (width, height) = HERO_SIZE;
    let mut animator = Animator::new(
        config,
        ContainerRect::from_size(width, height),
        MemoryLayer::new(),
        ManualScheduler::new(),
        &mut StdRng::from_entropy(),
    )?;

    animator.start();
    animator.pointer_moved(Vec2::new(width as f32 * 0.5, height as f32 * 0.5));
    let ran = animator.advance(frames);

    let mask = animator
        .layer()
        .mask()
        .ok_or(RevealError::LayerUnavailable)?;
    let components = mask.components();
    log::info!(
        "Snapshot after {} frames: {} covered pixels in {} component(s)",
        ran,
        mask.coverage(),
        components.count()
    );

    std::fs::write(out.as_ref(), mask.to_png()?)?;
    log::info!("Wrote {}", out.as_ref().display());

    animator.unmount();
    Ok(())
}
