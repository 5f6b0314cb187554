//! Raw OCT container decoder.
//!
//! Decodes one `.vol` scan file per invocation into the data model:
//!
//! 1. Validate the 8-byte magic (mismatch declines the file — no byte past
//!    the magic is read).
//! 2. Decode the fixed file header.
//! 3. Resolve the patient, study, and series the file is about and commit
//!    the header-derived metadata.
//! 4. Extract the SLO overview image.
//! 5. Iterate the B-scan records: sub-header, pixel buffer, display
//!    transform, segmentation curves, append to the series.
//!
//! The decode fails closed: any truncation or failed seek aborts the file
//! with the error surfaced. Metadata committed in earlier steps stays in the
//! model — a failure at record `i` keeps records `0..i` — but no further
//! extraction happens.

mod header;
mod payload;

pub use header::{
    BScanRecordHeader, Field, FieldKind, VolHeader, BSCAN_FIELDS, BSCAN_HEADER_SPAN,
    HEADER_BLOCK_LEN, HEADER_FIELDS, HEADER_LEN, MAGIC, MAGIC_LEN,
};

use std::io::{Read, Seek};
use std::path::Path;

use tracing::debug;

use crate::config::ReadOptions;
use crate::error::FormatError;
use crate::io::FileCursor;
use crate::model::{
    BScan, BScanData, CoordMm, Laterality, Oct, ScaleFactor, ScanPattern, Series, SloImage,
};
use crate::timestamp::Timestamp;
use crate::transform::DisplayTransform;

/// Filename extension accepted for this container.
pub const EXTENSION: &str = "vol";

/// A `.vol` container carries exactly one series and no series-id field;
/// it is registered under this fixed id within its study.
const SERIES_ID: u32 = 1;

// =============================================================================
// Entry Points
// =============================================================================

/// Decode one container file into the model.
///
/// Declines (`FormatError::Unrecognized`) when the filename extension or the
/// magic does not match; any byte-level failure after that aborts the file
/// with the error surfaced.
pub fn read_file(path: &Path, oct: &mut Oct, options: &ReadOptions) -> Result<(), FormatError> {
    if !has_extension(path) {
        return Err(FormatError::unrecognized(format!(
            "'{}' does not carry the .{} extension",
            path.display(),
            EXTENSION
        )));
    }

    let mut cursor = FileCursor::open(path)?;
    read_stream(&mut cursor, oct, options)
}

/// Decode one container from an already-open byte source.
///
/// The cursor must be positioned at the start of the file.
pub fn read_stream<R: Read + Seek>(
    cursor: &mut FileCursor<R>,
    oct: &mut Oct,
    options: &ReadOptions,
) -> Result<(), FormatError> {
    // Magic first; nothing past it is touched unless it matches.
    let magic = cursor
        .read_exact(MAGIC_LEN)
        .map_err(|_| FormatError::unrecognized("file shorter than the format magic"))?;
    if magic.as_ref() != MAGIC.as_slice() {
        return Err(FormatError::unrecognized("magic bytes do not match"));
    }

    let block = cursor.read_exact(HEADER_BLOCK_LEN)?;
    let header = VolHeader::decode(&block);
    debug!(
        version = %header.version,
        num_bscans = header.num_bscans,
        size_x = header.size_x,
        size_z = header.size_z,
        pid = header.pid,
        vid = header.vid,
        "decoded container header"
    );

    let series = resolve_and_commit_metadata(oct, &header);

    // SLO overview
    let mut slo = SloImage::new(payload::read_slo(cursor, &header)?);
    slo.set_scale_factor(ScaleFactor::new(header.scale_x_slo, header.scale_y_slo));
    series.take_slo_image(slo);

    // B-scan records
    let transform = DisplayTransform {
        clamp_high: options.fill_empty_pixels_white,
        gamma: options.display_gamma,
    };
    for index in 0..header.num_bscans {
        let bscan = read_record(cursor, &header, index, &transform)?;
        series.take_bscan(bscan);
    }

    debug!(
        bscans = header.num_bscans,
        "container decoded"
    );
    Ok(())
}

/// Decode only the file header and render its raw fields, for inspection.
pub fn dump_header(path: &Path) -> Result<(VolHeader, Vec<String>), FormatError> {
    let mut cursor = FileCursor::open(path)?;

    let magic = cursor
        .read_exact(MAGIC_LEN)
        .map_err(|_| FormatError::unrecognized("file shorter than the format magic"))?;
    if magic.as_ref() != MAGIC.as_slice() {
        return Err(FormatError::unrecognized("magic bytes do not match"));
    }

    let block = cursor.read_exact(HEADER_BLOCK_LEN)?;
    let lines = header::render_fields(HEADER_FIELDS, &block);
    Ok((VolHeader::decode(&block), lines))
}

// =============================================================================
// Decode Steps
// =============================================================================

/// Whether the path carries this format's extension (case-insensitive).
fn has_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(EXTENSION))
}

/// Resolve the patient/study/series rows the file is about and commit the
/// header-derived metadata. Runs before any payload extraction so the model
/// rows exist even if a later record fails.
fn resolve_and_commit_metadata<'a>(oct: &'a mut Oct, header: &VolHeader) -> &'a mut Series {
    let patient = oct.patient_mut(header.pid);
    patient.set_external_id(header.patient_id.as_str());
    patient.set_birthdate(Timestamp::from_spreadsheet_days(header.dob));

    let study = patient.study_mut(header.vid);
    study.set_study_date(Timestamp::from_ticks(header.exam_time));

    let series = study.series_mut(SERIES_ID);
    series.set_laterality(Laterality::from_scan_position(&header.scan_position));
    series.set_scan_pattern(ScanPattern::from_vendor_code(header.scan_pattern));
    series.set_scan_date(Timestamp::from_spreadsheet_days(header.visit_date));
    series.set_scan_focus(header.scan_focus);
    series.set_series_uid(header.id.as_str());
    series.set_ref_series_uid(header.reference_id.as_str());
    series
}

/// Extract one B-scan record: sub-header, pixels, display transform,
/// segmentation curves.
fn read_record<R: Read + Seek>(
    cursor: &mut FileCursor<R>,
    header: &VolHeader,
    index: u32,
    transform: &DisplayTransform,
) -> Result<BScan, FormatError> {
    let record_offset = header.record_offset(index);
    let record = payload::read_record_header(cursor, record_offset)?;

    let mut raw = payload::read_bscan_pixels(cursor, header, record_offset)?;
    let display = transform.apply(&mut raw);

    let segment_lines = payload::read_segment_curves(cursor, header, &record, record_offset)?;

    let data = BScanData {
        start: CoordMm::new(record.start_x, record.start_y),
        end: CoordMm::new(record.end_x, record.end_y),
        scale_factor: ScaleFactor::new(header.scale_x, header.scale_z),
        image_quality: record.quality,
        segment_lines,
    };

    let mut bscan = BScan::new(display, data);
    bscan.set_raw_image(raw);
    Ok(bscan)
}

// =============================================================================
// Tests
// =============================================================================
