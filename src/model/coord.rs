//! Coordinate and scaling primitives shared by SLO images and B-scans.
//!
//! Two coordinate spaces exist side by side: SLO pixel space (image row and
//! column, as floats) and physical SLO space (millimeters on the retina).
//! B-scan start/end positions are expressed in physical space; the SLO image
//! carries the affine transform between the two.

/// Physical size of one pixel, per axis, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactor {
    pub x: f64,
    pub y: f64,
}

impl ScaleFactor {
    pub fn new(x: f64, y: f64) -> Self {
        ScaleFactor { x, y }
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        ScaleFactor { x: 1.0, y: 1.0 }
    }
}

/// A position in SLO pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoordPx {
    pub x: f64,
    pub y: f64,
}

impl CoordPx {
    pub fn new(x: f64, y: f64) -> Self {
        CoordPx { x, y }
    }
}

/// A position in physical SLO space, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoordMm {
    pub x: f64,
    pub y: f64,
}

impl CoordMm {
    pub fn new(x: f64, y: f64) -> Self {
        CoordMm { x, y }
    }
}

/// Affine transform between SLO pixel space and physical millimeter space.
///
/// Row-major 2×2 linear part plus a translation. Defaults to the identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordTransform {
    pub a11: f64,
    pub a12: f64,
    pub a21: f64,
    pub a22: f64,
    pub tx: f64,
    pub ty: f64,
}

impl CoordTransform {
    pub fn new(a11: f64, a12: f64, a21: f64, a22: f64, tx: f64, ty: f64) -> Self {
        CoordTransform {
            a11,
            a12,
            a21,
            a22,
            tx,
            ty,
        }
    }

    /// The identity transform.
    pub fn identity() -> Self {
        CoordTransform::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Map a pixel-space position into millimeter space.
    pub fn apply(&self, p: CoordPx) -> CoordMm {
        CoordMm {
            x: self.a11 * p.x + self.a12 * p.y + self.tx,
            y: self.a21 * p.x + self.a22 * p.y + self.ty,
        }
    }
}

impl Default for CoordTransform {
    fn default() -> Self {
        CoordTransform::identity()
    }
}

// =============================================================================
// Tests
// =============================================================================
