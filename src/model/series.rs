//! Series entity and its acquisition enums.

use crate::timestamp::Timestamp;

use super::bscan::BScan;
use super::slo::SloImage;

// =============================================================================
// Laterality
// =============================================================================

/// Which eye a series was acquired from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Laterality {
    /// Not recorded or not recognized
    #[default]
    Undefined,
    /// Right eye (vendor code "OD", oculus dexter)
    RightEye,
    /// Left eye (vendor code "OS", oculus sinister)
    LeftEye,
}

impl Laterality {
    /// Map a vendor scan-position string. Anything but `"OD"`/`"OS"` is
    /// `Undefined` — not an error.
    pub fn from_scan_position(position: &str) -> Self {
        match position {
            "OD" => Laterality::RightEye,
            "OS" => Laterality::LeftEye,
            _ => Laterality::Undefined,
        }
    }

    /// Short human-readable name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Laterality::Undefined => "undefined",
            Laterality::RightEye => "OD",
            Laterality::LeftEye => "OS",
        }
    }
}

// =============================================================================
// ScanPattern
// =============================================================================

/// Spatial acquisition geometry of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanPattern {
    /// Not recorded or unrecognized vendor code
    #[default]
    Unknown,
    SingleLine,
    Circular,
    Volume,
    FastVolume,
    Radial,
}

impl ScanPattern {
    /// Map a vendor scan-pattern code. Codes 1..=5 are defined; any other
    /// value degrades to `Unknown` — not an error.
    pub fn from_vendor_code(code: u32) -> Self {
        match code {
            1 => ScanPattern::SingleLine,
            2 => ScanPattern::Circular,
            3 => ScanPattern::Volume,
            4 => ScanPattern::FastVolume,
            5 => ScanPattern::Radial,
            _ => ScanPattern::Unknown,
        }
    }

    /// Short human-readable name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ScanPattern::Unknown => "unknown",
            ScanPattern::SingleLine => "single line",
            ScanPattern::Circular => "circular",
            ScanPattern::Volume => "volume",
            ScanPattern::FastVolume => "fast volume",
            ScanPattern::Radial => "radial",
        }
    }
}

// =============================================================================
// Series
// =============================================================================

/// One scan series within a study.
///
/// Owns at most one SLO overview image and the ordered list of B-scans, in
/// decode order (not necessarily spatial order). Both are transferred in by
/// move; transferring a second SLO image drops the one it replaces.
#[derive(Debug)]
pub struct Series {
    id: u32,
    laterality: Laterality,
    scan_pattern: ScanPattern,
    scan_date: Timestamp,
    scan_focus: f64,
    series_uid: String,
    ref_series_uid: String,
    slo_image: Option<SloImage>,
    bscans: Vec<BScan>,
}

impl Series {
    pub(crate) fn new(id: u32) -> Self {
        Series {
            id,
            laterality: Laterality::Undefined,
            scan_pattern: ScanPattern::Unknown,
            scan_date: Timestamp::undecoded(),
            scan_focus: 0.0,
            series_uid: String::new(),
            ref_series_uid: String::new(),
            slo_image: None,
            bscans: Vec::new(),
        }
    }

    /// Series id, unique within the owning study.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn laterality(&self) -> Laterality {
        self.laterality
    }

    pub fn set_laterality(&mut self, laterality: Laterality) {
        self.laterality = laterality;
    }

    pub fn scan_pattern(&self) -> ScanPattern {
        self.scan_pattern
    }

    pub fn set_scan_pattern(&mut self, pattern: ScanPattern) {
        self.scan_pattern = pattern;
    }

    /// Acquisition date of the series; may be undecoded.
    pub fn scan_date(&self) -> &Timestamp {
        &self.scan_date
    }

    pub fn set_scan_date(&mut self, date: Timestamp) {
        self.scan_date = date;
    }

    /// Scan focus in diopters.
    pub fn scan_focus(&self) -> f64 {
        self.scan_focus
    }

    pub fn set_scan_focus(&mut self, focus: f64) {
        self.scan_focus = focus;
    }

    pub fn series_uid(&self) -> &str {
        &self.series_uid
    }

    pub fn set_series_uid(&mut self, uid: impl Into<String>) {
        self.series_uid = uid.into();
    }

    /// Identifier of the series this one references (e.g. a follow-up's
    /// baseline).
    pub fn ref_series_uid(&self) -> &str {
        &self.ref_series_uid
    }

    pub fn set_ref_series_uid(&mut self, uid: impl Into<String>) {
        self.ref_series_uid = uid.into();
    }

    /// The SLO overview image, if one has been transferred in.
    pub fn slo_image(&self) -> Option<&SloImage> {
        self.slo_image.as_ref()
    }

    /// Transfer ownership of an SLO image into this series.
    ///
    /// A prior image, if any, is replaced and dropped.
    pub fn take_slo_image(&mut self, slo: SloImage) {
        self.slo_image = Some(slo);
    }

    /// Transfer ownership of a B-scan into this series, appending in call
    /// order. Never replaces.
    pub fn take_bscan(&mut self, bscan: BScan) {
        self.bscans.push(bscan);
    }

    /// All B-scans in decode order.
    pub fn bscans(&self) -> &[BScan] {
        &self.bscans
    }

    pub fn bscan(&self, pos: usize) -> Option<&BScan> {
        self.bscans.get(pos)
    }

    pub fn bscan_count(&self) -> usize {
        self.bscans.len()
    }
}

// =============================================================================
// Tests
// =============================================================================
