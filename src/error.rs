//! Error types for metaball-reveal.
//!
//! Core errors ([`RevealError`]) describe environmental conditions that
//! skip a single frame; the animation loop logs and swallows them. Host
//! errors ([`HostError`]) are fatal start-up failures of the `hero` binary.

use std::fmt;

/// Conditions that make a frame's rasterize/export step impossible.
#[derive(Debug)]
pub enum RevealError {
    /// The container has zero width or height.
    EmptyContainer,
    /// The reveal layer is not available (not created yet, or gone).
    LayerUnavailable,
    /// The mask could not be encoded as an image resource.
    Encode(image::ImageError),
}

impl fmt::Display for RevealError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevealError::EmptyContainer => write!(f, "Container has no measurable area"),
            RevealError::LayerUnavailable => write!(f, "Reveal layer is not available"),
            RevealError::Encode(e) => write!(f, "Failed to encode mask: {}", e),
        }
    }
}

impl std::error::Error for RevealError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RevealError::Encode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for RevealError {
    fn from(e: image::ImageError) -> Self {
        RevealError::Encode(e)
    }
}

/// A [`RevealConfig`](crate::RevealConfig) value that would break a field invariant.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A smoothing factor is outside `(0, 1]`.
    SmoothingOutOfRange { name: &'static str, value: f32 },
    /// A radius band can reach zero or below.
    RadiusBand { name: &'static str, min: f32 },
    /// A sampling range is empty or negative.
    EmptyRange { name: &'static str },
    /// The per-frame time step is not positive.
    TimeStep(f32),
    /// The falloff extent is not positive.
    FalloffExtent(f32),
    /// A threshold of zero would reveal the whole container.
    ZeroThreshold,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::SmoothingOutOfRange { name, value } => {
                write!(f, "Smoothing factor '{}' must be in (0, 1], got {}", name, value)
            }
            ConfigError::RadiusBand { name, min } => {
                write!(f, "Radius band '{}' reaches {} (must stay above 0)", name, min)
            }
            ConfigError::EmptyRange { name } => write!(f, "Sampling range '{}' is empty", name),
            ConfigError::TimeStep(step) => write!(f, "Time step must be positive, got {}", step),
            ConfigError::FalloffExtent(k) => {
                write!(f, "Falloff extent must be positive, got {}", k)
            }
            ConfigError::ZeroThreshold => write!(f, "Threshold must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// The surface reports no usable format or alpha mode.
    UnsupportedSurface,
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
            GpuError::UnsupportedSurface => write!(f, "Surface offers no usable format or alpha mode"),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter | GpuError::UnsupportedSurface => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that stop the `hero` host from starting or finishing.
#[derive(Debug)]
pub enum HostError {
    /// Failed to create or run the event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create the window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// A hero image could not be loaded.
    Image(image::ImageError),
    /// Writing an output file failed.
    Io(std::io::Error),
    /// The animator rejected its configuration.
    Config(ConfigError),
    /// Producing a snapshot mask failed.
    Reveal(RevealError),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            HostError::Window(e) => write!(f, "Failed to create window: {}", e),
            HostError::Gpu(e) => write!(f, "GPU error: {}", e),
            HostError::Image(e) => write!(f, "Failed to load image: {}", e),
            HostError::Io(e) => write!(f, "I/O error: {}", e),
            HostError::Config(e) => write!(f, "Invalid configuration: {}", e),
            HostError::Reveal(e) => write!(f, "Reveal error: {}", e),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HostError::EventLoop(e) => Some(e),
            HostError::Window(e) => Some(e),
            HostError::Gpu(e) => Some(e),
            HostError::Image(e) => Some(e),
            HostError::Io(e) => Some(e),
            HostError::Config(e) => Some(e),
            HostError::Reveal(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for HostError {
    fn from(e: winit::error::EventLoopError) -> Self {
        HostError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for HostError {
    fn from(e: winit::error::OsError) -> Self {
        HostError::Window(e)
    }
}

impl From<GpuError> for HostError {
    fn from(e: GpuError) -> Self {
        HostError::Gpu(e)
    }
}

impl From<image::ImageError> for HostError {
    fn from(e: image::ImageError) -> Self {
        HostError::Image(e)
    }
}

impl From<std::io::Error> for HostError {
    fn from(e: std::io::Error) -> Self {
        HostError::Io(e)
    }
}

impl From<ConfigError> for HostError {
    fn from(e: ConfigError) -> Self {
        HostError::Config(e)
    }
}

impl From<RevealError> for HostError {
    fn from(e: RevealError) -> Self {
        HostError::Reveal(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_error_keeps_source() {
        use std::error::Error;

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = RevealError::from(image::ImageError::IoError(io));
        assert!(err.to_string().starts_with("Failed to encode mask"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_host_error_source_chain() {
        use std::error::Error;

        let err = HostError::from(RevealError::EmptyContainer);
        let source = err.source().expect("reveal errors carry a source");
        assert_eq!(source.to_string(), "Container has no measurable area");
    }
}
