//! Rasterizer and threshold fuser.
//!
//! Every blob is painted as a linear radial falloff into a floating-point
//! scratch bitmap: fully opaque at the center, transparent at
//! `falloff_extent * radius`. Overlapping falloffs accumulate, and the
//! accumulated alpha is then clipped at a fixed threshold. Where two blobs
//! are close enough, their summed falloff in the gap crosses the threshold
//! and the silhouettes fuse into one shape.
//!
//! The fusion point is a closed-form function of the constants, see
//! [`fusion_distance`].

use image::{ImageBuffer, Luma};

use crate::blob::Blob;
use crate::config::{Accumulation, RevealConfig};
use crate::error::RevealError;
use crate::field::Field;
use crate::mask::{Mask, COVERED};

/// Floating-point alpha accumulation buffer.
pub type Scratch = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Renders blobs into a binary [`Mask`] the size of the container.
#[derive(Debug)]
pub struct Rasterizer {
    scratch: Scratch,
    mask: Mask,
}

impl Rasterizer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            scratch: Scratch::new(width, height),
            mask: Mask::empty(width, height),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.mask.dimensions()
    }

    /// Reallocate the bitmaps for a new container size. Same-size calls
    /// keep the existing buffers.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.size() == (width, height) {
            return;
        }
        log::debug!("Rasterizer resized to {}x{}", width, height);
        self.scratch = Scratch::new(width, height);
        self.mask = Mask::empty(width, height);
    }

    /// Last rendered mask.
    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Scratch buffer of the last render, before thresholding.
    pub fn scratch(&self) -> &Scratch {
        &self.scratch
    }

    /// Reset the mask to fully hidden.
    pub fn clear(&mut self) {
        self.mask.image_mut().fill(0);
    }

    /// Render every blob of `field`.
    pub fn render_field(&mut self, field: &Field) -> Result<&Mask, RevealError> {
        self.render(field.blobs(), field.config())
    }

    /// Paint `blobs`, threshold, and return the resulting mask.
    pub fn render<'a, I>(&mut self, blobs: I, config: &RevealConfig) -> Result<&Mask, RevealError>
    where
        I: IntoIterator<Item = &'a Blob>,
    {
        let (width, height) = self.size();
        if width == 0 || height == 0 {
            return Err(RevealError::EmptyContainer);
        }

        self.scratch.fill(0.0);
        for blob in blobs {
            paint(&mut self.scratch, blob, config);
        }
        threshold(&self.scratch, &mut self.mask, config.threshold);

        Ok(&self.mask)
    }
}

/// Falloff value at `distance` from the center of a blob whose falloff
/// ends at `extent`.
#[inline]
pub fn falloff(distance: f32, extent: f32) -> f32 {
    if distance >= extent {
        0.0
    } else {
        1.0 - distance / extent
    }
}

#[inline]
fn accumulate(dst: f32, src: f32, mode: Accumulation) -> f32 {
    match mode {
        Accumulation::SourceOver => src + dst * (1.0 - src),
        Accumulation::Additive => (src + dst).min(1.0),
    }
}

fn paint(scratch: &mut Scratch, blob: &Blob, config: &RevealConfig) {
    let extent = blob.radius * config.falloff_extent;
    if !(extent > 0.0) {
        return;
    }

    let (width, height) = scratch.dimensions();
    let c = blob.position;
    let x0 = (c.x - extent).floor().max(0.0);
    let y0 = (c.y - extent).floor().max(0.0);
    let x1 = (c.x + extent).ceil().min(width as f32);
    let y1 = (c.y + extent).ceil().min(height as f32);
    // Blob entirely outside the bitmap
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for y in y0 as u32..y1 as u32 {
        let dy = y as f32 + 0.5 - c.y;
        for x in x0 as u32..x1 as u32 {
            let dx = x as f32 + 0.5 - c.x;
            let src = falloff((dx * dx + dy * dy).sqrt(), extent);
            if src > 0.0 {
                let px = scratch.get_pixel_mut(x, y);
                px[0] = accumulate(px[0], src, config.accumulation);
            }
        }
    }
}

fn threshold(scratch: &Scratch, mask: &mut Mask, cutoff: u8) {
    for (dst, &alpha) in mask.image_mut().iter_mut().zip(scratch.as_raw()) {
        let alpha = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        *dst = if alpha >= cutoff { COVERED } else { 0 };
    }
}

/// Radius of the silhouette of a lone blob.
pub fn core_radius(radius: f32, config: &RevealConfig) -> f32 {
    config.falloff_extent * radius * (1.0 - config.threshold_fraction())
}

/// Center distance below which two blobs of equal `radius` fuse.
///
/// Along the segment between the centers the accumulated alpha is lowest
/// at the midpoint, so the blobs fuse exactly when the midpoint reaches the
/// threshold. With `k` the falloff extent and `τ` the threshold fraction:
///
/// - source-over: `(1 - a)² = 1 - τ` with `a = 1 - d / (2kR)`, giving
///   `d = 2kR·√(1 - τ)`
/// - additive: `2a = τ`, giving `d = kR·(2 - τ)`
pub fn fusion_distance(radius: f32, config: &RevealConfig) -> f32 {
    let k = config.falloff_extent;
    let tau = config.threshold_fraction();
    match config.accumulation {
        Accumulation::SourceOver => 2.0 * k * radius * (1.0 - tau).sqrt(),
        Accumulation::Additive => k * radius * (2.0 - tau),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_falloff_shape() {
        assert_eq!(falloff(0.0, 10.0), 1.0);
        assert!((falloff(5.0, 10.0) - 0.5).abs() < 1e-6);
        assert_eq!(falloff(10.0, 10.0), 0.0);
        assert_eq!(falloff(12.0, 10.0), 0.0);
    }

    #[test]
    fn test_zero_size_is_error() {
        let mut raster = Rasterizer::new(0, 100);
        let blob = Blob::new(Vec2::ZERO, 10.0);
        let result = raster.render([&blob], &RevealConfig::default());
        assert!(matches!(result, Err(RevealError::EmptyContainer)));
    }

    #[test]
    fn test_mask_is_binary() {
        let mut raster = Rasterizer::new(64, 64);
        let blob = Blob::new(Vec2::new(32.0, 32.0), 20.0);
        let mask = raster.render([&blob], &RevealConfig::default()).unwrap();
        assert!(mask.as_bytes().iter().all(|&v| v == 0 || v == COVERED));
        assert!(mask.is_covered(32, 32));
        assert!(!mask.is_covered(0, 0));
    }

    #[test]
    fn test_single_blob_core_radius() {
        let config = RevealConfig::default();
        let mut raster = Rasterizer::new(200, 200);
        let blob = Blob::new(Vec2::new(100.0, 100.0), 60.0);
        let mask = raster.render([&blob], &config).unwrap();

        let core = core_radius(60.0, &config);
        // Well inside and well outside the derived edge
        assert!(mask.is_covered(100 + (core * 0.8) as u32, 100));
        assert!(!mask.is_covered(100 + (core * 1.2) as u32, 100));
    }

    #[test]
    fn test_offscreen_blob_paints_nothing() {
        let mut raster = Rasterizer::new(50, 50);
        let blob = Blob::new(Vec2::new(-200.0, -200.0), 100.0);
        let mask = raster.render([&blob], &RevealConfig::default()).unwrap();
        assert!(mask.is_empty());
    }

    #[test]
    fn test_source_over_accumulation() {
        // Two half-opaque layers composite to 0.75
        assert!((accumulate(accumulate(0.0, 0.5, Accumulation::SourceOver), 0.5, Accumulation::SourceOver) - 0.75).abs() < 1e-6);
        assert_eq!(accumulate(0.7, 0.6, Accumulation::Additive), 1.0);
    }

    #[test]
    fn test_fusion_distance_defaults() {
        let config = RevealConfig::default();
        let d = fusion_distance(1.0, &config);
        // 3 * sqrt(75 / 255)
        assert!((d - 3.0 * (75.0f32 / 255.0).sqrt()).abs() < 1e-5);

        let additive = config.with_accumulation(Accumulation::Additive);
        let d = fusion_distance(1.0, &additive);
        assert!((d - 1.5 * (2.0 - 180.0 / 255.0)).abs() < 1e-5);
    }

    #[test]
    fn test_clear_and_resize() {
        let mut raster = Rasterizer::new(40, 40);
        let blob = Blob::new(Vec2::new(20.0, 20.0), 15.0);
        raster.render([&blob], &RevealConfig::default()).unwrap();
        assert!(!raster.mask().is_empty());

        raster.clear();
        assert!(raster.mask().is_empty());

        raster.resize(80, 30);
        assert_eq!(raster.size(), (80, 30));
        assert_eq!(raster.scratch().dimensions(), (80, 30));
    }
}
