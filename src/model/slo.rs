//! SLO overview image entity.

use image::GrayImage;

use super::coord::{CoordPx, CoordTransform, ScaleFactor};

/// The en-face overview (SLO) image of a series.
///
/// An 8-bit grayscale buffer plus the geometry needed to relate SLO pixels to
/// physical millimeters: per-axis scale factor, pixel-space shift, and the
/// affine pixel↔mm transform. Owned exclusively by its series.
#[derive(Debug)]
pub struct SloImage {
    image: GrayImage,
    scale_factor: ScaleFactor,
    shift: CoordPx,
    transform: CoordTransform,
    image_quality: u32,
    num_average: u32,
}

impl SloImage {
    /// Wrap a decoded pixel buffer with default geometry.
    pub fn new(image: GrayImage) -> Self {
        SloImage {
            image,
            scale_factor: ScaleFactor::default(),
            shift: CoordPx::default(),
            transform: CoordTransform::identity(),
            image_quality: 0,
            num_average: 0,
        }
    }

    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Physical size of one SLO pixel in millimeters.
    pub fn scale_factor(&self) -> ScaleFactor {
        self.scale_factor
    }

    pub fn set_scale_factor(&mut self, factor: ScaleFactor) {
        self.scale_factor = factor;
    }

    /// Pixel-space shift of the image center.
    pub fn shift(&self) -> CoordPx {
        self.shift
    }

    pub fn set_shift(&mut self, shift: CoordPx) {
        self.shift = shift;
    }

    /// Affine transform between SLO pixel space and millimeter space.
    pub fn transform(&self) -> CoordTransform {
        self.transform
    }

    pub fn set_transform(&mut self, transform: CoordTransform) {
        self.transform = transform;
    }

    pub fn image_quality(&self) -> u32 {
        self.image_quality
    }

    pub fn set_image_quality(&mut self, quality: u32) {
        self.image_quality = quality;
    }

    /// Number of frames averaged into this image.
    pub fn num_average(&self) -> u32 {
        self.num_average
    }

    pub fn set_num_average(&mut self, num_average: u32) {
        self.num_average = num_average;
    }
}

// =============================================================================
// Tests
// =============================================================================
