//! Fixed-layout header decoding for the raw OCT container.
//!
//! The format has no self-describing schema. The file opens with an 8-byte
//! magic literal, followed by a fixed header region padded to 2048 bytes from
//! file start; each B-scan record then opens with its own fixed sub-header.
//! Every field sits at a contract-fixed byte offset, little-endian, with
//! NUL-padded character fields.
//!
//! The layouts are expressed as explicit field tables (name, offset, width,
//! type) rather than packed structs: the format contract is ordinary data
//! that unit tests validate for contiguity and that the header dump walks to
//! render a file's raw fields.
//!
//! # File layout
//!
//! ```text
//! 0            8                2048        2048+sloLen
//! ┌── magic ──┬── file header ──┬── SLO ──┬── record 0 ──┬── record 1 ──┬ …
//! ```
//!
//! Each record is `bScanHdrSize + sizeX·sizeZ·4` bytes: the sub-header
//! (including its segmentation region) followed by the pixel buffer.

use crate::io::{fixed_str, read_f32_le, read_f64_le, read_i32_le, read_u32_le, read_u64_le};

// =============================================================================
// Constants
// =============================================================================

/// Magic literal identifying the raw OCT container.
pub const MAGIC: &[u8; 8] = b"HSF-OCT-";

/// Bytes occupied by the magic literal.
pub const MAGIC_LEN: usize = 8;

/// Total size of the fixed file header, magic included. The SLO buffer
/// starts at this offset.
pub const HEADER_LEN: usize = 2048;

/// Size of the decoded header region following the magic.
pub const HEADER_BLOCK_LEN: usize = HEADER_LEN - MAGIC_LEN;

/// Fixed span of one B-scan record sub-header (reserved prefix included).
pub const BSCAN_HEADER_SPAN: usize = 64;

/// Reserved bytes at the start of each record (record version marker).
const BSCAN_RESERVED_PREFIX: usize = 16;

// =============================================================================
// Field Tables
// =============================================================================

/// Decoded type of one fixed-layout field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    U32,
    I32,
    U64,
    F32,
    F64,
    /// NUL-padded character field
    Chars,
}

impl FieldKind {
    /// Render a field of this kind out of its bytes, for the header dump.
    fn render(&self, bytes: &[u8]) -> String {
        match self {
            FieldKind::U32 => read_u32_le(bytes).to_string(),
            FieldKind::I32 => read_i32_le(bytes).to_string(),
            FieldKind::U64 => read_u64_le(bytes).to_string(),
            FieldKind::F32 => read_f32_le(bytes).to_string(),
            FieldKind::F64 => read_f64_le(bytes).to_string(),
            FieldKind::Chars => fixed_str(bytes),
        }
    }
}

/// One entry of a fixed-layout decode table.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// Vendor-documented field name
    pub name: &'static str,
    /// Byte offset within the decoded region
    pub offset: usize,
    /// Width in bytes
    pub width: usize,
    pub kind: FieldKind,
}

/// Byte offsets of the file-header fields, relative to the end of the magic.
mod layout {
    pub const VERSION: usize = 0;
    pub const SIZE_X: usize = 4;
    pub const NUM_BSCANS: usize = 8;
    pub const SIZE_Z: usize = 12;
    pub const SCALE_X: usize = 16;
    pub const DISTANCE: usize = 24;
    pub const SCALE_Z: usize = 32;
    pub const SIZE_X_SLO: usize = 40;
    pub const SIZE_Y_SLO: usize = 44;
    pub const SCALE_X_SLO: usize = 48;
    pub const SCALE_Y_SLO: usize = 56;
    pub const FIELD_SIZE_SLO: usize = 64;
    pub const SCAN_FOCUS: usize = 68;
    pub const SCAN_POSITION: usize = 76;
    pub const EXAM_TIME: usize = 80;
    pub const SCAN_PATTERN: usize = 88;
    pub const BSCAN_HDR_SIZE: usize = 92;
    pub const ID: usize = 96;
    pub const REFERENCE_ID: usize = 112;
    pub const PID: usize = 128;
    pub const PATIENT_ID: usize = 132;
    pub const PADDING: usize = 153;
    pub const DOB: usize = 156;
    pub const VID: usize = 164;
    pub const VISIT_ID: usize = 168;
    pub const VISIT_DATE: usize = 192;
    pub const GRID_TYPE: usize = 200;
    pub const GRID_OFFSET: usize = 204;
    pub const SPARE: usize = 208;
    pub const PROG_ID: usize = 216;
    /// End of the defined fields; the rest of the region is padding.
    pub const END: usize = 248;
}

/// The file-header decode table, in on-disk order.
pub const HEADER_FIELDS: &[Field] = &[
    Field { name: "version", offset: layout::VERSION, width: 4, kind: FieldKind::Chars },
    Field { name: "sizeX", offset: layout::SIZE_X, width: 4, kind: FieldKind::U32 },
    Field { name: "numBScans", offset: layout::NUM_BSCANS, width: 4, kind: FieldKind::U32 },
    Field { name: "sizeZ", offset: layout::SIZE_Z, width: 4, kind: FieldKind::U32 },
    Field { name: "scaleX", offset: layout::SCALE_X, width: 8, kind: FieldKind::F64 },
    Field { name: "distance", offset: layout::DISTANCE, width: 8, kind: FieldKind::F64 },
    Field { name: "scaleZ", offset: layout::SCALE_Z, width: 8, kind: FieldKind::F64 },
    Field { name: "sizeXSlo", offset: layout::SIZE_X_SLO, width: 4, kind: FieldKind::U32 },
    Field { name: "sizeYSlo", offset: layout::SIZE_Y_SLO, width: 4, kind: FieldKind::U32 },
    Field { name: "scaleXSlo", offset: layout::SCALE_X_SLO, width: 8, kind: FieldKind::F64 },
    Field { name: "scaleYSlo", offset: layout::SCALE_Y_SLO, width: 8, kind: FieldKind::F64 },
    Field { name: "fieldSizeSlo", offset: layout::FIELD_SIZE_SLO, width: 4, kind: FieldKind::U32 },
    Field { name: "scanFocus", offset: layout::SCAN_FOCUS, width: 8, kind: FieldKind::F64 },
    Field { name: "scanPosition", offset: layout::SCAN_POSITION, width: 4, kind: FieldKind::Chars },
    Field { name: "examTime", offset: layout::EXAM_TIME, width: 8, kind: FieldKind::U64 },
    Field { name: "scanPattern", offset: layout::SCAN_PATTERN, width: 4, kind: FieldKind::U32 },
    Field { name: "bScanHdrSize", offset: layout::BSCAN_HDR_SIZE, width: 4, kind: FieldKind::U32 },
    Field { name: "id", offset: layout::ID, width: 16, kind: FieldKind::Chars },
    Field { name: "referenceID", offset: layout::REFERENCE_ID, width: 16, kind: FieldKind::Chars },
    Field { name: "pid", offset: layout::PID, width: 4, kind: FieldKind::U32 },
    Field { name: "patientID", offset: layout::PATIENT_ID, width: 21, kind: FieldKind::Chars },
    Field { name: "padding", offset: layout::PADDING, width: 3, kind: FieldKind::Chars },
    Field { name: "dob", offset: layout::DOB, width: 8, kind: FieldKind::F64 },
    Field { name: "vid", offset: layout::VID, width: 4, kind: FieldKind::U32 },
    Field { name: "visitID", offset: layout::VISIT_ID, width: 24, kind: FieldKind::Chars },
    Field { name: "visitDate", offset: layout::VISIT_DATE, width: 8, kind: FieldKind::F64 },
    Field { name: "gridType", offset: layout::GRID_TYPE, width: 4, kind: FieldKind::I32 },
    Field { name: "gridOffset", offset: layout::GRID_OFFSET, width: 4, kind: FieldKind::I32 },
    Field { name: "spare", offset: layout::SPARE, width: 8, kind: FieldKind::Chars },
    Field { name: "progID", offset: layout::PROG_ID, width: 32, kind: FieldKind::Chars },
];

/// Byte offsets of the B-scan sub-header fields, relative to record start.
mod bscan_layout {
    pub const START_X: usize = 16;
    pub const START_Y: usize = 24;
    pub const END_X: usize = 32;
    pub const END_Y: usize = 40;
    pub const NUM_SEG: usize = 48;
    pub const OFF_SEG: usize = 52;
    pub const QUALITY: usize = 56;
    pub const SHIFT: usize = 60;
    pub const END: usize = 64;
}

/// The B-scan sub-header decode table (past the reserved record prefix).
pub const BSCAN_FIELDS: &[Field] = &[
    Field { name: "startX", offset: bscan_layout::START_X, width: 8, kind: FieldKind::F64 },
    Field { name: "startY", offset: bscan_layout::START_Y, width: 8, kind: FieldKind::F64 },
    Field { name: "endX", offset: bscan_layout::END_X, width: 8, kind: FieldKind::F64 },
    Field { name: "endY", offset: bscan_layout::END_Y, width: 8, kind: FieldKind::F64 },
    Field { name: "numSeg", offset: bscan_layout::NUM_SEG, width: 4, kind: FieldKind::I32 },
    Field { name: "offSeg", offset: bscan_layout::OFF_SEG, width: 4, kind: FieldKind::I32 },
    Field { name: "quality", offset: bscan_layout::QUALITY, width: 4, kind: FieldKind::F32 },
    Field { name: "shift", offset: bscan_layout::SHIFT, width: 4, kind: FieldKind::I32 },
];

/// Render a decoded region field by field, one `name: value` line per table
/// entry.
pub fn render_fields(fields: &[Field], block: &[u8]) -> Vec<String> {
    fields
        .iter()
        .map(|f| {
            let bytes = &block[f.offset..f.offset + f.width];
            format!("{:<12} : {}", f.name, f.kind.render(bytes))
        })
        .collect()
}

// =============================================================================
// VolHeader
// =============================================================================

/// Decoded file header of the raw OCT container.
///
/// Field names follow the vendor documentation. All record geometry (SLO
/// size, pixel-buffer size, record stride) is derived from these fields —
/// the stride varies across format minor versions, so nothing here is a
/// constant beyond the fixed header span itself.
#[derive(Debug, Clone)]
pub struct VolHeader {
    /// Format version string
    pub version: String,
    /// B-scan width in pixels (A-scans per B-scan)
    pub size_x: u32,
    /// Number of B-scan records in the file
    pub num_bscans: u32,
    /// B-scan depth in pixels
    pub size_z: u32,
    /// Physical width of one B-scan pixel, mm
    pub scale_x: f64,
    /// Distance between adjacent B-scans, mm
    pub distance: f64,
    /// Physical depth of one B-scan pixel, mm
    pub scale_z: f64,
    /// SLO image width in pixels
    pub size_x_slo: u32,
    /// SLO image height in pixels
    pub size_y_slo: u32,
    /// Physical width of one SLO pixel, mm
    pub scale_x_slo: f64,
    /// Physical height of one SLO pixel, mm
    pub scale_y_slo: f64,
    /// SLO field of view, degrees
    pub field_size_slo: u32,
    /// Scan focus, diopters
    pub scan_focus: f64,
    /// Scan position code ("OD"/"OS")
    pub scan_position: String,
    /// Acquisition time in the tick epoch
    pub exam_time: u64,
    /// Scan pattern vendor code
    pub scan_pattern: u32,
    /// Size of each B-scan record sub-header in bytes
    pub bscan_hdr_size: u32,
    /// Series identifier
    pub id: String,
    /// Referenced-series identifier
    pub reference_id: String,
    /// Vendor-assigned patient id
    pub pid: u32,
    /// External patient identifier string
    pub patient_id: String,
    /// Patient date of birth in the spreadsheet epoch
    pub dob: f64,
    /// Vendor-assigned visit id
    pub vid: u32,
    /// Visit identifier string
    pub visit_id: String,
    /// Visit date in the spreadsheet epoch
    pub visit_date: f64,
    pub grid_type: i32,
    pub grid_offset: i32,
    /// Acquiring-software identifier
    pub prog_id: String,
}

impl VolHeader {
    /// Decode the fixed header region (the [`HEADER_BLOCK_LEN`] bytes
    /// following the magic).
    pub fn decode(block: &[u8]) -> Self {
        debug_assert!(block.len() >= layout::END);

        let str_field = |offset: usize, width: usize| fixed_str(&block[offset..offset + width]);

        VolHeader {
            version: str_field(layout::VERSION, 4),
            size_x: read_u32_le(&block[layout::SIZE_X..]),
            num_bscans: read_u32_le(&block[layout::NUM_BSCANS..]),
            size_z: read_u32_le(&block[layout::SIZE_Z..]),
            scale_x: read_f64_le(&block[layout::SCALE_X..]),
            distance: read_f64_le(&block[layout::DISTANCE..]),
            scale_z: read_f64_le(&block[layout::SCALE_Z..]),
            size_x_slo: read_u32_le(&block[layout::SIZE_X_SLO..]),
            size_y_slo: read_u32_le(&block[layout::SIZE_Y_SLO..]),
            scale_x_slo: read_f64_le(&block[layout::SCALE_X_SLO..]),
            scale_y_slo: read_f64_le(&block[layout::SCALE_Y_SLO..]),
            field_size_slo: read_u32_le(&block[layout::FIELD_SIZE_SLO..]),
            scan_focus: read_f64_le(&block[layout::SCAN_FOCUS..]),
            scan_position: str_field(layout::SCAN_POSITION, 4),
            exam_time: read_u64_le(&block[layout::EXAM_TIME..]),
            scan_pattern: read_u32_le(&block[layout::SCAN_PATTERN..]),
            bscan_hdr_size: read_u32_le(&block[layout::BSCAN_HDR_SIZE..]),
            id: str_field(layout::ID, 16),
            reference_id: str_field(layout::REFERENCE_ID, 16),
            pid: read_u32_le(&block[layout::PID..]),
            patient_id: str_field(layout::PATIENT_ID, 21),
            dob: read_f64_le(&block[layout::DOB..]),
            vid: read_u32_le(&block[layout::VID..]),
            visit_id: str_field(layout::VISIT_ID, 24),
            visit_date: read_f64_le(&block[layout::VISIT_DATE..]),
            grid_type: read_i32_le(&block[layout::GRID_TYPE..]),
            grid_offset: read_i32_le(&block[layout::GRID_OFFSET..]),
            prog_id: str_field(layout::PROG_ID, 32),
        }
    }

    /// Size of the SLO pixel region in bytes (one byte per pixel).
    pub fn slo_len(&self) -> u64 {
        u64::from(self.size_x_slo) * u64::from(self.size_y_slo)
    }

    /// Size of one B-scan pixel buffer in bytes (four bytes per pixel).
    pub fn bscan_pixel_len(&self) -> u64 {
        u64::from(self.size_x) * u64::from(self.size_z) * 4
    }

    /// Stride between consecutive B-scan records in bytes.
    pub fn record_stride(&self) -> u64 {
        u64::from(self.bscan_hdr_size) + self.bscan_pixel_len()
    }

    /// Absolute file offset of record `index`.
    pub fn record_offset(&self, index: u32) -> u64 {
        HEADER_LEN as u64 + self.slo_len() + u64::from(index) * self.record_stride()
    }
}

// =============================================================================
// BScanRecordHeader
// =============================================================================

/// Decoded sub-header of one B-scan record.
#[derive(Debug, Clone, Copy)]
pub struct BScanRecordHeader {
    /// Scan-line start in physical SLO space, mm
    pub start_x: f64,
    pub start_y: f64,
    /// Scan-line end in physical SLO space, mm
    pub end_x: f64,
    pub end_y: f64,
    /// Number of segmentation curves stored in the record
    pub num_seg: i32,
    /// Byte offset of the segmentation region, relative to record start
    pub off_seg: i32,
    /// Vendor acquisition-quality figure
    pub quality: f32,
    /// Pixel-space shift applied at acquisition
    pub shift: i32,
}

impl BScanRecordHeader {
    /// Decode the fixed sub-header from the first [`BSCAN_HEADER_SPAN`]
    /// bytes of a record.
    pub fn decode(block: &[u8]) -> Self {
        debug_assert!(block.len() >= bscan_layout::END);

        BScanRecordHeader {
            start_x: read_f64_le(&block[bscan_layout::START_X..]),
            start_y: read_f64_le(&block[bscan_layout::START_Y..]),
            end_x: read_f64_le(&block[bscan_layout::END_X..]),
            end_y: read_f64_le(&block[bscan_layout::END_Y..]),
            num_seg: read_i32_le(&block[bscan_layout::NUM_SEG..]),
            off_seg: read_i32_le(&block[bscan_layout::OFF_SEG..]),
            quality: read_f32_le(&block[bscan_layout::QUALITY..]),
            shift: read_i32_le(&block[bscan_layout::SHIFT..]),
        }
    }

    /// Segmentation curve count, clamped at zero (a negative count means no
    /// curves, not an error).
    pub fn curve_count(&self) -> u32 {
        self.num_seg.max(0) as u32
    }

    /// Segmentation region offset, clamped at zero.
    pub fn segment_offset(&self) -> u64 {
        self.off_seg.max(0) as u64
    }
}

// =============================================================================
// Tests
// =============================================================================
