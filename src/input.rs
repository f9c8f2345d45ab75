//! Pointer tracking for the reveal container.
//!
//! The tracker converts absolute pointer positions into coordinates
//! relative to the container's top-left corner, which is the space the
//! field and the mask live in. It never drives rendering itself; the
//! animator polls the latest target each frame.
//!
//! # Usage
//!
//! ```ignore
//! let mut tracker = PointerTracker::new(ContainerRect::new(Vec2::new(0.0, 80.0), 1280, 640));
//! tracker.attach();
//! assert_eq!(tracker.pointer_moved(Vec2::new(100.0, 100.0)), Some(Vec2::new(100.0, 20.0)));
//! ```

use glam::{UVec2, Vec2};
use winit::event::WindowEvent;

/// Bounding box of the container in the pointer's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerRect {
    /// Top-left corner, already including scroll/layout offsets.
    pub origin: Vec2,
    pub size: UVec2,
}

impl ContainerRect {
    pub fn new(origin: Vec2, width: u32, height: u32) -> Self {
        Self {
            origin,
            size: UVec2::new(width, height),
        }
    }

    /// A container filling a window of the given size.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(Vec2::ZERO, width, height)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.size.y
    }

    /// Whether the container has a measurable area.
    pub fn is_measurable(&self) -> bool {
        self.size.x > 0 && self.size.y > 0
    }
}

/// Pointer activity relevant to the reveal effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved; absolute position.
    Moved(Vec2),
    /// Pointer entered the container.
    Entered,
    /// Pointer left the container.
    Left,
}

/// Converts absolute pointer positions into container coordinates.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    container: ContainerRect,
    attached: bool,
}

impl PointerTracker {
    /// Create a detached tracker for `container`.
    pub fn new(container: ContainerRect) -> Self {
        Self {
            container,
            attached: false,
        }
    }

    pub fn container(&self) -> ContainerRect {
        self.container
    }

    /// Update the container box after a layout change.
    pub fn set_container(&mut self, container: ContainerRect) {
        self.container = container;
    }

    /// Start listening for pointer moves.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Stop listening; later moves are ignored.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Container-local coordinates of an absolute point.
    #[inline]
    pub fn to_local(&self, absolute: Vec2) -> Vec2 {
        absolute - self.container.origin
    }

    /// Handle a pointer move. Returns the new target while attached.
    pub fn pointer_moved(&mut self, absolute: Vec2) -> Option<Vec2> {
        if !self.attached {
            return None;
        }
        Some(self.to_local(absolute))
    }

    /// Translate a winit window event.
    pub fn handle_event(event: &WindowEvent) -> Option<PointerEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => Some(PointerEvent::Moved(Vec2::new(
                position.x as f32,
                position.y as f32,
            ))),
            WindowEvent::CursorEntered { .. } => Some(PointerEvent::Entered),
            WindowEvent::CursorLeft { .. } => Some(PointerEvent::Left),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_coordinates() {
        let rect = ContainerRect::new(Vec2::new(40.0, 120.0), 800, 600);
        let mut tracker = PointerTracker::new(rect);
        tracker.attach();

        let local = tracker.pointer_moved(Vec2::new(440.0, 420.0));
        assert_eq!(local, Some(Vec2::new(400.0, 300.0)));
    }

    #[test]
    fn test_no_clamping() {
        let mut tracker = PointerTracker::new(ContainerRect::from_size(100, 100));
        tracker.attach();
        assert_eq!(
            tracker.pointer_moved(Vec2::new(-10.0, 250.0)),
            Some(Vec2::new(-10.0, 250.0))
        );
    }

    #[test]
    fn test_detached_ignores_moves() {
        let mut tracker = PointerTracker::new(ContainerRect::from_size(100, 100));
        assert_eq!(tracker.pointer_moved(Vec2::new(5.0, 5.0)), None);

        tracker.attach();
        tracker.pointer_moved(Vec2::new(5.0, 5.0));
        tracker.detach();
        assert_eq!(tracker.pointer_moved(Vec2::new(50.0, 50.0)), None);
    }

    #[test]
    fn test_container_measurable() {
        assert!(ContainerRect::new(Vec2::new(10.0, 10.0), 20, 20).is_measurable());
        assert!(!ContainerRect::from_size(0, 10).is_measurable());
        assert!(!ContainerRect::from_size(10, 0).is_measurable());
    }
}
