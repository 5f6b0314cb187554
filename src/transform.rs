//! Display transform for raw B-scan pixel buffers.
//!
//! Raw B-scan pixels are linear floats, nominally in `[0, 1]`, with empty
//! (never-scanned) pixels encoded as large sentinel values. Turning them into
//! a display-oriented 8-bit buffer is policy, not format: the transform is a
//! parameter of the decode, never hard-coded into byte extraction.
//!
//! The pipeline, in order:
//!
//! 1. Optionally clamp values at or above 1.0 down to 1.0 ("fill empty
//!    pixels white"). The clamp is applied to the raw buffer itself, so a
//!    kept raw image reflects it.
//! 2. Apply a power/gamma curve (default exponent 0.25).
//! 3. Rescale linearly to the 8-bit display range, saturating.

use image::GrayImage;

use crate::model::RawImage;

/// Default gamma exponent for the display curve.
pub const DEFAULT_GAMMA: f64 = 0.25;

/// Parameterized raw-to-display pixel transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayTransform {
    /// Clamp raw values ≥ 1.0 before the gamma curve, so empty pixels render
    /// white instead of saturating arbitrarily.
    pub clamp_high: bool,

    /// Exponent of the power curve applied to the clamped value.
    pub gamma: f64,
}

impl Default for DisplayTransform {
    fn default() -> Self {
        DisplayTransform {
            clamp_high: true,
            gamma: DEFAULT_GAMMA,
        }
    }
}

impl DisplayTransform {
    /// Apply the transform, producing the 8-bit display buffer.
    ///
    /// When clamping is enabled the raw buffer is modified in place first;
    /// the returned image is derived from the (possibly clamped) raw values.
    pub fn apply(&self, raw: &mut RawImage) -> GrayImage {
        if self.clamp_high {
            clamp_saturated(raw);
        }
        self.to_display(raw)
    }

    /// Gamma curve plus saturating 8-bit rescale, leaving the raw buffer
    /// untouched.
    pub fn to_display(&self, raw: &RawImage) -> GrayImage {
        let gamma = self.gamma;
        GrayImage::from_fn(raw.width(), raw.height(), |x, y| {
            let value = f64::from(raw.get_pixel(x, y).0[0]);
            image::Luma([display_level(value, gamma)])
        })
    }
}

/// Clamp every value at or above 1.0 down to 1.0.
fn clamp_saturated(raw: &mut RawImage) {
    for pixel in raw.pixels_mut() {
        if pixel.0[0] >= 1.0 {
            pixel.0[0] = 1.0;
        }
    }
}

/// Map one linear value through the gamma curve into a display level.
fn display_level(value: f64, gamma: f64) -> u8 {
    let value = value.max(0.0).powf(gamma) * 255.0;
    value.round().clamp(0.0, 255.0) as u8
}

// =============================================================================
// Tests
// =============================================================================
