//! Container formats and reader-chain dispatch.
//!
//! The set of supported container formats is closed and small: formats are
//! variants of [`ContainerFormat`], and adding one is a deliberate code
//! change, not runtime plugin loading. Dispatch is owned by a
//! [`FormatRegistry`] the host application constructs and passes around —
//! there is no process-wide registration singleton.
//!
//! A format *declines* a file (wrong extension, wrong magic) with
//! [`FormatError::Unrecognized`]; the registry then tries the next candidate.
//! Any other error is a real decode failure and aborts the file.

pub mod tree;
pub mod vol;

use std::path::Path;

use tracing::debug;

use crate::config::ReadOptions;
use crate::error::FormatError;
use crate::model::Oct;

// =============================================================================
// ContainerFormat
// =============================================================================

/// Filename extension and display name of a container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatExtension {
    /// Extension without the leading dot
    pub extension: &'static str,
    /// Human-readable format name
    pub name: &'static str,
}

/// A supported container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    /// Single-file raw OCT scan container (`.vol`)
    RawVol,
}

impl ContainerFormat {
    /// All supported formats, in dispatch order.
    pub const ALL: [ContainerFormat; 1] = [ContainerFormat::RawVol];

    /// This format's extension and display name.
    pub const fn extension(&self) -> FormatExtension {
        match self {
            ContainerFormat::RawVol => FormatExtension {
                extension: vol::EXTENSION,
                name: "OCT Raw Scan File",
            },
        }
    }

    /// Whether the path carries this format's extension (case-insensitive).
    pub fn matches_path(&self, path: &Path) -> bool {
        let ext = self.extension().extension;
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(ext))
    }

    /// Decode a file of this format into the model.
    pub fn read_into(
        &self,
        path: &Path,
        oct: &mut Oct,
        options: &ReadOptions,
    ) -> Result<(), FormatError> {
        match self {
            ContainerFormat::RawVol => vol::read_file(path, oct, options),
        }
    }
}

// =============================================================================
// FormatRegistry
// =============================================================================

/// The reader chain: formats tried in order until one accepts the file.
///
/// Constructed by the host and passed by reference to whatever needs
/// dispatch. [`FormatRegistry::default`] registers every built-in format.
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    formats: Vec<ContainerFormat>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        FormatRegistry {
            formats: ContainerFormat::ALL.to_vec(),
        }
    }
}

impl FormatRegistry {
    /// A registry with an explicit format list, in dispatch order.
    pub fn with_formats(formats: Vec<ContainerFormat>) -> Self {
        FormatRegistry { formats }
    }

    /// The registered formats, in dispatch order.
    pub fn formats(&self) -> &[ContainerFormat] {
        &self.formats
    }

    /// Extensions and display names of all registered formats.
    pub fn supported_extensions(&self) -> Vec<FormatExtension> {
        self.formats.iter().map(|f| f.extension()).collect()
    }

    /// Decode a file into a caller-owned model.
    ///
    /// Formats whose extension matches are tried in order; a decline moves to
    /// the next candidate, any other error aborts. On error the model keeps
    /// whatever earlier files (and this file's already-committed header
    /// metadata) put there — callers tracking per-file success should treat
    /// the file as not imported.
    pub fn read_into(
        &self,
        path: &Path,
        oct: &mut Oct,
        options: &ReadOptions,
    ) -> Result<(), FormatError> {
        for format in self.formats.iter().filter(|f| f.matches_path(path)) {
            match format.read_into(path, oct, options) {
                Err(err) if err.is_decline() => {
                    debug!(
                        format = format.extension().name,
                        file = %path.display(),
                        reason = %err,
                        "format declined file"
                    );
                }
                other => return other,
            }
        }
        Err(FormatError::unrecognized(format!(
            "no registered format accepts '{}'",
            path.display()
        )))
    }

    /// Decode a file into a fresh model.
    ///
    /// On error nothing is returned for the file — the partially populated
    /// model is dropped.
    pub fn open_file(&self, path: &Path, options: &ReadOptions) -> Result<Oct, FormatError> {
        let mut oct = Oct::new();
        self.read_into(path, &mut oct, options)?;
        Ok(oct)
    }
}

// =============================================================================
// Tests
// =============================================================================
