//! B-scan entity and segmentation-line kinds.

use image::{GrayImage, ImageBuffer, Luma};

use super::coord::{CoordMm, ScaleFactor};

/// Raw (pre-transform) B-scan pixel buffer: one f32 per pixel.
pub type RawImage = ImageBuffer<Luma<f32>, Vec<f32>>;

// =============================================================================
// SegmentlineKind
// =============================================================================

/// Anatomical boundary kinds carried as per-column segmentation curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentlineKind {
    /// Inner limiting membrane
    Ilm,
    /// Bruch's membrane
    Bm,
}

impl SegmentlineKind {
    /// Number of recognized kinds (the fixed size of the per-scan map).
    pub const COUNT: usize = 2;

    /// All kinds, in map-index order.
    pub const ALL: [SegmentlineKind; Self::COUNT] = [SegmentlineKind::Ilm, SegmentlineKind::Bm];

    /// Index of this kind in the fixed-size segmentation map.
    pub const fn index(&self) -> usize {
        match self {
            SegmentlineKind::Ilm => 0,
            SegmentlineKind::Bm => 1,
        }
    }

    /// Short human-readable name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SegmentlineKind::Ilm => "ILM",
            SegmentlineKind::Bm => "BM",
        }
    }
}

// =============================================================================
// BScan
// =============================================================================

/// Scalar attributes and segmentation curves of one B-scan.
///
/// Assembled by a decoder before the pixel buffer is attached. The
/// segmentation map is fixed-size; an empty vector means the curve is absent.
#[derive(Debug, Clone, Default)]
pub struct BScanData {
    /// Start of the scan line's projection in physical SLO space (mm)
    pub start: CoordMm,
    /// End of the scan line's projection in physical SLO space (mm)
    pub end: CoordMm,
    /// Physical size of one pixel per axis
    pub scale_factor: ScaleFactor,
    /// Vendor acquisition-quality figure
    pub image_quality: f32,
    /// Per-kind segmentation curves, one height per image column
    pub segment_lines: [Vec<f64>; SegmentlineKind::COUNT],
}

/// One cross-sectional scan within a series.
///
/// Holds the display-oriented 8-bit buffer, optionally the raw float buffer
/// it was derived from, and the scan's physical geometry and segmentation
/// curves. Owned exclusively by its series.
#[derive(Debug)]
pub struct BScan {
    image: GrayImage,
    raw_image: Option<RawImage>,
    data: BScanData,
}

impl BScan {
    pub fn new(image: GrayImage, data: BScanData) -> Self {
        BScan {
            image,
            raw_image: None,
            data,
        }
    }

    /// Display-oriented 8-bit pixel buffer.
    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    /// Raw pre-transform pixel buffer, if kept.
    pub fn raw_image(&self) -> Option<&RawImage> {
        self.raw_image.as_ref()
    }

    pub fn set_raw_image(&mut self, raw: RawImage) {
        self.raw_image = Some(raw);
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Start of the scan line in physical SLO space (mm).
    pub fn start(&self) -> CoordMm {
        self.data.start
    }

    /// End of the scan line in physical SLO space (mm).
    pub fn end(&self) -> CoordMm {
        self.data.end
    }

    pub fn scale_factor(&self) -> ScaleFactor {
        self.data.scale_factor
    }

    pub fn image_quality(&self) -> f32 {
        self.data.image_quality
    }

    /// Segmentation curve for a kind; empty when absent.
    pub fn segment_line(&self, kind: SegmentlineKind) -> &[f64] {
        &self.data.segment_lines[kind.index()]
    }

    pub fn set_segment_line(&mut self, kind: SegmentlineKind, curve: Vec<f64>) {
        self.data.segment_lines[kind.index()] = curve;
    }
}

// =============================================================================
// Tests
// =============================================================================
