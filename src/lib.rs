//! # OCT Importer
//!
//! A decoder for ophthalmic OCT raw scan containers.
//!
//! Vendor scan files are proprietary binary containers with fixed-offset
//! packed headers, per-record sub-headers, and trailing pixel and
//! segmentation payloads — no self-describing schema anywhere. This library
//! decodes them byte-exactly into a normalized clinical hierarchy:
//! patient → study → series → B-scan / SLO image.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`io`] - length-aware binary cursor with typed little-endian reads
//! - [`timestamp`] - dual-epoch acquisition timestamp decoding
//! - [`model`] - the identity-keyed patient/study/series aggregate
//! - [`mod@format`] - container formats, header/payload decoding, dispatch
//! - [`transform`] - raw-to-display pixel transform (policy, pluggable)
//! - [`config`] - decode options and CLI types
//!
//! ## Example
//!
//! ```rust,no_run
//! use oct_importer::{FormatRegistry, ReadOptions};
//!
//! let registry = FormatRegistry::default();
//! let oct = registry
//!     .open_file("scan.vol".as_ref(), &ReadOptions::default())
//!     .expect("decode failed");
//!
//! for patient in oct.patients() {
//!     println!("patient {}: {}", patient.id(), patient.birthdate().date_str('-'));
//!     for study in patient.studies() {
//!         for series in study.all_series() {
//!             println!(
//!                 "  series {}: {} B-scans, {}",
//!                 series.id(),
//!                 series.bscan_count(),
//!                 series.laterality().as_str()
//!             );
//!         }
//!     }
//! }
//! ```
//!
//! Files populate a session's model incrementally: decoding several files
//! into one [`Oct`] merges by patient, study, and series id. A decode either
//! completes, declines the file (not this format), or fails with a typed
//! error — committed entities are never left half-initialized.

pub mod config;
pub mod error;
pub mod format;
pub mod io;
pub mod model;
pub mod timestamp;
pub mod transform;

// Re-export commonly used types
pub use config::ReadOptions;
pub use error::{CursorError, FormatError};
pub use format::vol::{BScanRecordHeader, VolHeader};
pub use format::{ContainerFormat, FormatExtension, FormatRegistry};
pub use io::FileCursor;
pub use model::{
    BScan, BScanData, CoordMm, CoordPx, CoordTransform, Laterality, Oct, Patient, RawImage,
    ScaleFactor, ScanPattern, SegmentlineKind, Series, SloImage, Study,
};
pub use timestamp::Timestamp;
pub use transform::{DisplayTransform, DEFAULT_GAMMA};
