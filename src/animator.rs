//! The animation loop: a two-state machine driven by a frame scheduler.
//!
//! [`Animator`] ties together the field, the pointer tracker, the
//! rasterizer and the mask exporter. The host tells it when hovering
//! starts and stops, forwards pointer moves and resizes, and calls
//! [`Animator::tick`] whenever the [`FrameScheduler`] delivers a requested
//! frame. A running animator requests exactly one frame per tick, so at
//! most one frame is ever pending.
//!
//! ```ignore
//! let mut animator = Animator::new(
//!     RevealConfig::default(),
//!     ContainerRect::from_size(1280, 720),
//!     MemoryLayer::new(),
//!     ManualScheduler::new(),
//!     &mut rand::thread_rng(),
//! )?;
//! animator.start();
//! animator.pointer_moved(Vec2::new(640.0, 360.0));
//! animator.advance(60);
//! assert!(animator.layer().is_revealing());
//! ```

use glam::Vec2;
use rand::Rng;

use crate::config::RevealConfig;
use crate::error::{ConfigError, RevealError};
use crate::field::Field;
use crate::input::{ContainerRect, PointerEvent, PointerTracker};
use crate::mask::{MaskExporter, RevealLayer};
use crate::raster::Rasterizer;

/// Whether frames are being scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// Not scheduled.
    #[default]
    Idle,
    /// Scheduled every display refresh.
    Running,
}

/// Source of frame callbacks, usually the display refresh.
pub trait FrameScheduler {
    /// Ask for one call to [`Animator::tick`] on the next frame.
    fn request_frame(&mut self);

    /// Drop a pending request, if any.
    fn cancel_frame(&mut self);
}

/// Scheduler stepped by hand, for tests and headless rendering.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: bool,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Consume the pending request. Returns whether there was one.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Total frames requested.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total cancellations that dropped a pending frame.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.pending = true;
        self.requested += 1;
    }

    fn cancel_frame(&mut self) {
        if self.take_pending() {
            self.cancelled += 1;
        }
    }
}

/// Drives the metaball field and applies its mask to a reveal layer.
#[derive(Debug)]
pub struct Animator<L: RevealLayer, S: FrameScheduler> {
    field: Field,
    tracker: PointerTracker,
    rasterizer: Rasterizer,
    exporter: MaskExporter,
    layer: L,
    scheduler: S,
    state: LoopState,
    ticks: u64,
}

impl<L: RevealLayer, S: FrameScheduler> Animator<L, S> {
    /// Mount an animator over `container`. It starts [`LoopState::Idle`].
    pub fn new<R: Rng>(
        config: RevealConfig,
        container: ContainerRect,
        layer: L,
        scheduler: S,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let field = Field::new(config, rng);
        Ok(Self {
            field,
            tracker: PointerTracker::new(container),
            rasterizer: Rasterizer::new(container.width(), container.height()),
            exporter: MaskExporter::new(),
            layer,
            scheduler,
            state: LoopState::Idle,
            ticks: 0,
        })
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    pub fn rasterizer(&self) -> &Rasterizer {
        &self.rasterizer
    }

    pub fn exporter(&self) -> &MaskExporter {
        &self.exporter
    }

    pub fn layer(&self) -> &L {
        &self.layer
    }

    pub fn layer_mut(&mut self) -> &mut L {
        &mut self.layer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Frames run since mounting.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Hovering began: `Idle → Running`.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.tracker.attach();
        // Re-measure; resizes while idle were only recorded.
        let container = self.tracker.container();
        self.rasterizer.resize(container.width(), container.height());
        self.field.set_active(true);
        self.state = LoopState::Running;
        self.scheduler.request_frame();
        log::debug!("Reveal loop started");
    }

    /// Hovering ended: `Running → Idle`, and the mask is cleared.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.tracker.detach();
        self.scheduler.cancel_frame();
        self.field.set_active(false);
        self.state = LoopState::Idle;
        self.rasterizer.clear();
        self.exporter.clear(&mut self.layer);
        log::debug!("Reveal loop stopped after {} frames", self.ticks);
    }

    /// Follow the host's hover flag.
    pub fn set_hovering(&mut self, hovering: bool) {
        if hovering {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Record a pointer move in absolute coordinates.
    pub fn pointer_moved(&mut self, absolute: Vec2) {
        if let Some(local) = self.tracker.pointer_moved(absolute) {
            self.field.set_target(local);
        }
    }

    /// Route a translated pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Moved(position) => self.pointer_moved(position),
            PointerEvent::Entered => self.start(),
            PointerEvent::Left => self.stop(),
        }
    }

    /// The container's box changed. Blob state and clock are kept.
    pub fn resize(&mut self, container: ContainerRect) {
        self.tracker.set_container(container);
        if self.is_running() {
            self.rasterizer.resize(container.width(), container.height());
        }
    }

    /// Run one frame. Returns `false` when idle.
    pub fn tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }

        self.field.step();
        self.ticks += 1;

        if let Err(e) = self.render_and_export() {
            log::trace!("Frame {} skipped: {}", self.ticks, e);
        }

        self.scheduler.request_frame();
        true
    }

    fn render_and_export(&mut self) -> Result<(), RevealError> {
        if !self.tracker.container().is_measurable() {
            return Err(RevealError::EmptyContainer);
        }
        let mask = self.rasterizer.render_field(&self.field)?;
        self.exporter.export(&mut self.layer, mask);
        Ok(())
    }

    /// Stop, cancel any pending frame, and hand back the layer.
    ///
    /// The animator is consumed, so no tick can run afterward.
    pub fn unmount(mut self) -> L {
        self.stop();
        self.scheduler.cancel_frame();
        log::debug!("Reveal animator unmounted");
        self.layer
    }
}

impl<L: RevealLayer> Animator<L, ManualScheduler> {
    /// Deliver up to `frames` frames, each only if one is pending.
    ///
    /// Returns the number of ticks that ran.
    pub fn advance(&mut self, frames: usize) -> usize {
        let mut ran = 0;
        for _ in 0..frames {
            if !self.scheduler.take_pending() {
                break;
            }
            if self.tick() {
                ran += 1;
            }
        }
        ran
    }
}
