//! Model population from an externally decoded container tree.
//!
//! The secondary vendor container is a nested, directory-style archive
//! decoded by a separate library. That library is a black box here: all it
//! owes us is a tree of typed nodes — patients, studies, series, and scan
//! records, each iterable by integer id. These traits describe that tree,
//! and [`populate_tree`] walks it through exactly the same get-or-create
//! accessors and setters the byte-level decoder uses.
//!
//! Node accessors return `Option`: the archive populates entities
//! incrementally across its member files, and an absent attribute simply
//! leaves the model value untouched.
//!
//! Record coordinates are expected in millimeters in SLO space. Unit
//! conversion from whatever the external library reports is the adapter's
//! responsibility, not part of this contract.

use image::GrayImage;

use crate::model::{BScan, BScanData, CoordMm, Laterality, Oct, SegmentlineKind, SloImage};
use crate::timestamp::Timestamp;

// =============================================================================
// Node Traits
// =============================================================================

/// Root of an externally decoded container tree.
pub trait TreeSource {
    /// Iterate patients as (vendor patient id, node) pairs.
    fn patients(&self) -> Box<dyn Iterator<Item = (u32, &dyn PatientNode)> + '_>;
}

/// Patient-level node.
pub trait PatientNode {
    fn forename(&self) -> Option<String>;
    fn surname(&self) -> Option<String>;
    fn title(&self) -> Option<String>;
    fn external_id(&self) -> Option<String>;
    fn birthdate(&self) -> Option<Timestamp>;

    /// Iterate studies as (study id, node) pairs.
    fn studies(&self) -> Box<dyn Iterator<Item = (u32, &dyn StudyNode)> + '_>;
}

/// Study-level node.
pub trait StudyNode {
    fn study_date(&self) -> Option<Timestamp>;

    /// Iterate series as (series id, node) pairs.
    fn series(&self) -> Box<dyn Iterator<Item = (u32, &dyn SeriesNode)> + '_>;
}

/// Series-level node.
pub trait SeriesNode {
    fn laterality(&self) -> Option<Laterality>;
    fn scan_date(&self) -> Option<Timestamp>;

    /// The series' SLO overview image, if the archive carries one.
    fn slo_image(&self) -> Option<SloImage>;

    /// Iterate scan records as (record id, node) pairs.
    fn records(&self) -> Box<dyn Iterator<Item = (u32, &dyn RecordNode)> + '_>;
}

/// Scan-record node.
pub trait RecordNode {
    /// Display-ready pixel buffer. A record without image data is skipped.
    fn image(&self) -> Option<GrayImage>;

    /// Scan-line start in physical SLO space (mm).
    fn start(&self) -> Option<CoordMm>;

    /// Scan-line end in physical SLO space (mm).
    fn end(&self) -> Option<CoordMm>;

    fn quality(&self) -> Option<f32>;

    /// Segmentation curve for a kind, if present.
    fn segment_curve(&self, kind: SegmentlineKind) -> Option<Vec<f64>>;
}

// =============================================================================
// Population
// =============================================================================

/// Populate the model from an externally decoded tree.
///
/// Walks patients, studies, series, and records in tree order, resolving
/// each entity by id (get-or-create) and committing whatever attributes the
/// node exposes. Records without image data are skipped; everything else is
/// total.
pub fn populate_tree(oct: &mut Oct, tree: &dyn TreeSource) {
    for (patient_id, patient_node) in tree.patients() {
        let patient = oct.patient_mut(patient_id);
        if let Some(forename) = patient_node.forename() {
            patient.set_forename(forename);
        }
        if let Some(surname) = patient_node.surname() {
            patient.set_surname(surname);
        }
        if let Some(title) = patient_node.title() {
            patient.set_title(title);
        }
        if let Some(external_id) = patient_node.external_id() {
            patient.set_external_id(external_id);
        }
        if let Some(birthdate) = patient_node.birthdate() {
            patient.set_birthdate(birthdate);
        }

        for (study_id, study_node) in patient_node.studies() {
            let study = patient.study_mut(study_id);
            if let Some(date) = study_node.study_date() {
                study.set_study_date(date);
            }

            for (series_id, series_node) in study_node.series() {
                let series = study.series_mut(series_id);
                if let Some(laterality) = series_node.laterality() {
                    series.set_laterality(laterality);
                }
                if let Some(date) = series_node.scan_date() {
                    series.set_scan_date(date);
                }
                if let Some(slo) = series_node.slo_image() {
                    series.take_slo_image(slo);
                }

                for (_, record_node) in series_node.records() {
                    let image = match record_node.image() {
                        Some(image) => image,
                        None => continue,
                    };

                    let mut data = BScanData::default();
                    if let Some(start) = record_node.start() {
                        data.start = start;
                    }
                    if let Some(end) = record_node.end() {
                        data.end = end;
                    }
                    if let Some(quality) = record_node.quality() {
                        data.image_quality = quality;
                    }
                    for kind in SegmentlineKind::ALL {
                        if let Some(curve) = record_node.segment_curve(kind) {
                            data.segment_lines[kind.index()] = curve;
                        }
                    }

                    series.take_bscan(BScan::new(image, data));
                }
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
