//! Windowed host: a winit application that plays the hero section.

use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use super::compositor::Compositor;
use super::images::HeroImages;
use crate::animator::{Animator, FrameScheduler};
use crate::config::RevealConfig;
use crate::error::HostError;
use crate::input::{ContainerRect, PointerTracker};
use crate::time::FpsMeter;

/// Frame scheduler backed by the window's redraw requests.
pub struct WindowScheduler {
    window: Arc<Window>,
    pending: bool,
}

impl WindowScheduler {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            pending: false,
        }
    }

    /// Consume the pending request. Returns whether there was one.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for WindowScheduler {
    fn request_frame(&mut self) {
        self.pending = true;
        self.window.request_redraw();
    }

    fn cancel_frame(&mut self) {
        // A redraw already queued by winit still arrives; it just won't tick.
        self.pending = false;
    }
}

type HeroAnimator = Animator<Compositor, WindowScheduler>;

pub struct HeroApp {
    images: HeroImages,
    config: RevealConfig,
    window: Option<Arc<Window>>,
    animator: Option<HeroAnimator>,
    fps: FpsMeter,
    error: Option<HostError>,
}

impl HeroApp {
    pub fn new(images: HeroImages, config: RevealConfig) -> Self {
        Self {
            images,
            config,
            window: None,
            animator: None,
            fps: FpsMeter::new(Duration::from_secs(2)),
            error: None,
        }
    }

    /// The fatal error that ended the event loop, if any.
    pub fn take_error(&mut self) -> Option<HostError> {
        self.error.take()
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), HostError> {
        let window_attrs = Window::default_attributes()
            .with_title("Vegas Born, Toronto Made")
            .with_inner_size(PhysicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let compositor = pollster::block_on(Compositor::new(window.clone(), &self.images))?;
        let (width, height) = compositor.size();

        let animator = Animator::new(
            self.config.clone(),
            ContainerRect::from_size(width, height),
            compositor,
            WindowScheduler::new(window.clone()),
            &mut rand::rngs::StdRng::from_entropy(),
        )?;

        log::info!("Hero window {}x{} ready", width, height);
        window.request_redraw();
        self.window = Some(window);
        self.animator = Some(animator);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(animator) = &mut self.animator else {
            return;
        };

        if animator.scheduler_mut().take_pending() {
            animator.tick();
        }

        match animator.layer_mut().render() {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                animator.layer_mut().reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Surface out of memory, exiting");
                self.shutdown(event_loop);
                return;
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }

        if let Some(fps) = self.fps.frame() {
            log::info!("{:.1} fps", fps);
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(animator) = self.animator.take() {
            let _compositor = animator.unmount();
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for HeroApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(pointer) = PointerTracker::handle_event(&event) {
            if let Some(animator) = &mut self.animator {
                animator.handle_pointer(pointer);
            }
            if let Some(window) = &self.window {
                window.request_redraw();
            }
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::Resized(size) => {
                if let Some(animator) = &mut self.animator {
                    animator.layer_mut().resize(size.width, size.height);
                    animator.resize(ContainerRect::from_size(size.width, size.height));
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
