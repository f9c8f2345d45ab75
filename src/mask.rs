//! Mask export: the binary silhouette and the layer it is applied to.
//!
//! The rasterizer produces a [`Mask`] sized to the container. Once per
//! frame the [`MaskExporter`] hands it to a [`RevealLayer`], the thing that
//! shows the hidden image wherever the mask is set. A browser host would
//! implement the layer by setting a CSS mask image; the `hero` binary
//! uploads it to a GPU texture; tests use [`MemoryLayer`].

use image::codecs::png::PngEncoder;
use image::{GrayImage, ImageEncoder, Luma, Rgba, RgbaImage};

use crate::components::{self, Components};
use crate::error::RevealError;

/// Coverage value of a revealed pixel.
pub const COVERED: u8 = 255;

/// Binary silhouette: every pixel is either fully covered or empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    coverage: GrayImage,
}

impl Mask {
    /// An empty (fully hidden) mask.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            coverage: GrayImage::new(width, height),
        }
    }

    /// Wrap a coverage image, snapping every nonzero pixel to covered.
    pub fn from_coverage(mut coverage: GrayImage) -> Self {
        for Luma([v]) in coverage.pixels_mut() {
            if *v != 0 {
                *v = COVERED;
            }
        }
        Self { coverage }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.coverage.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.coverage.height()
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.coverage.dimensions()
    }

    /// Whether the pixel at `(x, y)` reveals the hidden image.
    ///
    /// Out-of-bounds coordinates are never covered.
    #[inline]
    pub fn is_covered(&self, x: u32, y: u32) -> bool {
        x < self.width() && y < self.height() && self.coverage.get_pixel(x, y)[0] == COVERED
    }

    /// Number of covered pixels.
    pub fn coverage(&self) -> usize {
        self.coverage.as_raw().iter().filter(|&&v| v == COVERED).count()
    }

    pub fn is_empty(&self) -> bool {
        self.coverage.as_raw().iter().all(|&v| v == 0)
    }

    /// One byte per pixel, row-major, 0 or 255.
    pub fn as_bytes(&self) -> &[u8] {
        self.coverage.as_raw()
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.coverage
    }

    pub(crate) fn image_mut(&mut self) -> &mut GrayImage {
        &mut self.coverage
    }

    /// White image whose alpha channel is the coverage, the usual format of
    /// an image used as a mask source.
    pub fn to_rgba(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            let a = self.coverage.get_pixel(x, y)[0];
            Rgba([255, 255, 255, a])
        })
    }

    /// Encode [`to_rgba`](Self::to_rgba) as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, RevealError> {
        let rgba = self.to_rgba();
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes).write_image(
            rgba.as_raw(),
            rgba.width(),
            rgba.height(),
            image::ExtendedColorType::Rgba8,
        )?;
        Ok(bytes)
    }

    /// Connected regions of covered pixels.
    pub fn components(&self) -> Components {
        components::label(self)
    }
}

/// Something that shows the hidden image through a mask.
pub trait RevealLayer {
    /// Show the hidden image wherever `mask` is covered, stretched 1:1 over
    /// the layer's box.
    fn apply_mask(&mut self, mask: &Mask) -> Result<(), RevealError>;

    /// Remove the mask so none of the hidden image shows.
    fn clear_mask(&mut self);
}

impl<L: RevealLayer + ?Sized> RevealLayer for Box<L> {
    fn apply_mask(&mut self, mask: &Mask) -> Result<(), RevealError> {
        (**self).apply_mask(mask)
    }

    fn clear_mask(&mut self) {
        (**self).clear_mask()
    }
}

/// Reveal layer that keeps the last mask in memory.
#[derive(Debug, Default)]
pub struct MemoryLayer {
    mask: Option<Mask>,
    updates: u64,
    clears: u64,
}

impl MemoryLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently applied mask, `None` when cleared or never set.
    pub fn mask(&self) -> Option<&Mask> {
        self.mask.as_ref()
    }

    /// Whether any pixel of the hidden image is currently shown.
    pub fn is_revealing(&self) -> bool {
        self.mask.as_ref().is_some_and(|m| !m.is_empty())
    }

    /// Number of masks applied so far.
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Number of times the mask was cleared.
    pub fn clears(&self) -> u64 {
        self.clears
    }
}

impl RevealLayer for MemoryLayer {
    fn apply_mask(&mut self, mask: &Mask) -> Result<(), RevealError> {
        match &mut self.mask {
            Some(current) if current.dimensions() == mask.dimensions() => {
                current.image_mut().copy_from_slice(mask.as_bytes());
            }
            slot => *slot = Some(mask.clone()),
        }
        self.updates += 1;
        Ok(())
    }

    fn clear_mask(&mut self) {
        self.mask = None;
        self.clears += 1;
    }
}

/// Applies masks to a layer once per frame.
#[derive(Debug, Default)]
pub struct MaskExporter {
    exported: u64,
    failed: u64,
}

impl MaskExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `mask` to `layer`. Layer errors are logged and the frame is
    /// dropped; the next frame tries again.
    pub fn export<L: RevealLayer + ?Sized>(&mut self, layer: &mut L, mask: &Mask) -> bool {
        match layer.apply_mask(mask) {
            Ok(()) => {
                self.exported += 1;
                true
            }
            Err(e) => {
                self.failed += 1;
                log::debug!("Skipping mask export: {}", e);
                false
            }
        }
    }

    /// Revert `layer` to showing none of the hidden image.
    pub fn clear<L: RevealLayer + ?Sized>(&mut self, layer: &mut L) {
        layer.clear_mask();
    }

    /// Masks successfully applied.
    pub fn exported(&self) -> u64 {
        self.exported
    }

    /// Frames whose export the layer rejected.
    pub fn failed(&self) -> u64 {
        self.failed
    }
}
