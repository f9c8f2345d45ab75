//! # metaball-reveal
//!
//! A cursor-following metaball field that reveals a hidden image.
//!
//! While the pointer hovers a container, a main blob eases toward it and a
//! few satellite blobs orbit the main blob with pulsing radii and wobble.
//! Every frame the blobs are rasterized into a soft field, thresholded into
//! a binary [`Mask`], and handed to a [`RevealLayer`] that shows the hidden
//! image wherever the mask is set. Overlapping blobs fuse into one region.
//!
//! ## Quick Start
//!
//! ```ignore
//! use metaball_reveal::prelude::*;
//!
//! let mut animator = Animator::new(
//!     RevealConfig::default(),
//!     ContainerRect::from_size(1280, 720),
//!     MemoryLayer::new(),
//!     ManualScheduler::new(),
//!     &mut rand::thread_rng(),
//! )?;
//!
//! animator.set_hovering(true);
//! animator.pointer_moved(Vec2::new(640.0, 360.0));
//! animator.advance(60);
//!
//! let mask = animator.layer().mask().unwrap();
//! println!("{} regions", mask.components().count());
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Type |
//! |-------|------|
//! | Pointer → container coordinates | [`PointerTracker`] |
//! | Blob motion | [`Field`] |
//! | Soft field + threshold | [`Rasterizer`] |
//! | Output | [`MaskExporter`] → [`RevealLayer`] |
//! | Frame loop | [`Animator`] + [`FrameScheduler`] |
//!
//! The [`host`] module contains the `hero` binary's windowed compositor.

pub mod animator;
pub mod blob;
pub mod components;
pub mod config;
pub mod error;
pub mod field;
pub mod host;
pub mod input;
pub mod mask;
pub mod raster;
pub mod time;

pub use animator::{Animator, FrameScheduler, LoopState, ManualScheduler};
pub use blob::{Blob, OrbitParams, OrbitingBlob};
pub use components::Components;
pub use config::{Accumulation, PhaseLayout, RevealConfig, Wave};
pub use error::{ConfigError, GpuError, HostError, RevealError};
pub use field::Field;
pub use glam::Vec2;
pub use input::{ContainerRect, PointerEvent, PointerTracker};
pub use mask::{Mask, MaskExporter, MemoryLayer, RevealLayer, COVERED};
pub use raster::Rasterizer;
pub use time::{FpsMeter, FrameClock};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use metaball_reveal::prelude::*;
/// ```
pub mod prelude {
    pub use crate::animator::{Animator, FrameScheduler, LoopState, ManualScheduler};
    pub use crate::config::{Accumulation, PhaseLayout, RevealConfig};
    pub use crate::input::{ContainerRect, PointerEvent};
    pub use crate::mask::{Mask, MemoryLayer, RevealLayer};
    pub use crate::Vec2;
}
