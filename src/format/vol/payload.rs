//! Payload extraction: SLO buffer, B-scan pixel buffers, segmentation curves.
//!
//! All offsets are derived from the decoded file header (§ record geometry on
//! [`VolHeader`]); nothing here assumes a fixed stride. Extraction is plain
//! byte movement — the display transform applied afterwards is policy and
//! lives in [`crate::transform`].

use image::GrayImage;
use std::io::{Read, Seek};

use crate::error::CursorError;
use crate::io::FileCursor;
use crate::model::{RawImage, SegmentlineKind};

use super::header::{BScanRecordHeader, VolHeader, BSCAN_HEADER_SPAN, HEADER_LEN};

/// Read and decode the fixed sub-header of the record at `record_offset`.
pub fn read_record_header<R: Read + Seek>(
    cursor: &mut FileCursor<R>,
    record_offset: u64,
) -> Result<BScanRecordHeader, CursorError> {
    cursor.seek_to(record_offset)?;
    let block = cursor.read_exact(BSCAN_HEADER_SPAN)?;
    Ok(BScanRecordHeader::decode(&block))
}

/// Extract the SLO overview buffer (one byte per pixel, immediately after
/// the fixed file header).
pub fn read_slo<R: Read + Seek>(
    cursor: &mut FileCursor<R>,
    header: &VolHeader,
) -> Result<GrayImage, CursorError> {
    cursor.seek_to(HEADER_LEN as u64)?;
    let bytes = cursor.read_exact(header.slo_len() as usize)?;
    GrayImage::from_raw(header.size_x_slo, header.size_y_slo, bytes.to_vec())
        .ok_or_else(|| buffer_mismatch("SLO"))
}

/// Extract the raw pixel buffer of the record at `record_offset` (f32 per
/// pixel, after the record's sub-header region).
pub fn read_bscan_pixels<R: Read + Seek>(
    cursor: &mut FileCursor<R>,
    header: &VolHeader,
    record_offset: u64,
) -> Result<RawImage, CursorError> {
    cursor.seek_to(record_offset + u64::from(header.bscan_hdr_size))?;
    let bytes = cursor.read_exact(header.bscan_pixel_len() as usize)?;

    let values: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    RawImage::from_raw(header.size_x, header.size_z, values)
        .ok_or_else(|| buffer_mismatch("B-scan"))
}

/// Extract the record's segmentation curves.
///
/// The record declares `numSeg` consecutive curves of `sizeX` f32 values
/// each, starting at its declared segmentation offset. Curve index 0 is the
/// inner limiting membrane and index 1 is Bruch's membrane; any further
/// curves are read through (keeping the cursor aligned) but discarded.
/// Absent curves leave their map entry empty.
pub fn read_segment_curves<R: Read + Seek>(
    cursor: &mut FileCursor<R>,
    header: &VolHeader,
    record: &BScanRecordHeader,
    record_offset: u64,
) -> Result<[Vec<f64>; SegmentlineKind::COUNT], CursorError> {
    let mut curves: [Vec<f64>; SegmentlineKind::COUNT] = Default::default();
    if record.curve_count() == 0 {
        return Ok(curves);
    }

    cursor.seek_to(record_offset + record.segment_offset())?;

    let width = header.size_x as usize;
    for index in 0..record.curve_count() {
        let bytes = cursor.read_exact(width * 4)?;
        if (index as usize) < curves.len() {
            curves[index as usize] = bytes
                .chunks_exact(4)
                .map(|c| f64::from(f32::from_le_bytes([c[0], c[1], c[2], c[3]])))
                .collect();
        }
    }

    Ok(curves)
}

fn buffer_mismatch(what: &str) -> CursorError {
    CursorError::Io(format!("{} buffer does not match declared dimensions", what))
}

// =============================================================================
// Tests
// =============================================================================
