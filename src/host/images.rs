//! The two hero images: the one shown by default and the one revealed.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::error::HostError;

/// Vegas gold, the base layer's accent.
const GOLD: [f32; 3] = [185.0, 151.0, 91.0];
/// Toronto blue, `hsl(220 100% 45%)`.
const BLUE: [f32; 3] = [0.0, 77.0, 230.0];

/// Base and hidden image of the hero section.
#[derive(Debug, Clone)]
pub struct HeroImages {
    pub base: RgbaImage,
    pub reveal: RgbaImage,
}

impl HeroImages {
    /// Load both images from disk.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(base: P, reveal: Q) -> Result<Self, HostError> {
        let base = image::open(base.as_ref())?.into_rgba8();
        let reveal = image::open(reveal.as_ref())?.into_rgba8();
        log::info!(
            "Loaded hero images {}x{} and {}x{}",
            base.width(),
            base.height(),
            reveal.width(),
            reveal.height()
        );
        Ok(Self { base, reveal })
    }

    /// Generate stand-in images in the site's palette.
    pub fn procedural(width: u32, height: u32) -> Self {
        Self {
            base: gradient(width, height, GOLD, 0.9),
            reveal: gradient(width, height, BLUE, 1.4),
        }
    }
}

/// Radial glow of `color` fading to near-black, with faint diagonal bands
/// so motion of the mask edge is easy to see.
fn gradient(width: u32, height: u32, color: [f32; 3], band_freq: f32) -> RgbaImage {
    let (w, h) = (width.max(1) as f32, height.max(1) as f32);
    let diag = (w * w + h * h).sqrt();
    RgbaImage::from_fn(width, height, |x, y| {
        let (fx, fy) = (x as f32 - w * 0.5, y as f32 - h * 0.4);
        let glow = (1.0 - (fx * fx + fy * fy).sqrt() / (diag * 0.6)).clamp(0.08, 1.0);
        let band = 0.9 + 0.1 * ((x + y) as f32 * band_freq * 0.02).sin();
        let shade = glow * band;
        Rgba([
            (color[0] * shade) as u8,
            (color[1] * shade) as u8,
            (color[2] * shade) as u8,
            255,
        ])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_procedural_sizes_and_palettes() {
        let images = HeroImages::procedural(64, 32);
        assert_eq!(images.base.dimensions(), (64, 32));
        assert_eq!(images.reveal.dimensions(), (64, 32));

        let base = images.base.get_pixel(32, 13);
        let reveal = images.reveal.get_pixel(32, 13);
        // Gold is warm, blue is cool
        assert!(base[0] > base[2]);
        assert!(reveal[2] > reveal[0]);
        assert_eq!(base[3], 255);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = HeroImages::load("does/not/exist.png", "nor/this.jpg");
        assert!(matches!(result, Err(HostError::Image(_))));
    }
}
