//! Decode options and CLI configuration.
//!
//! [`ReadOptions`] carries the decode policy recognized by every container
//! format; the clap types below drive the `oct-importer` binary.
//!
//! # Environment Variables
//!
//! CLI options can also be set with the `OCT_` prefix:
//!
//! - `OCT_EXPORT_DIR` - Output directory for the `export` command
//! - `OCT_GAMMA` - Display gamma exponent for the `export` command

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::transform::DEFAULT_GAMMA;

// =============================================================================
// ReadOptions
// =============================================================================

/// Decode policy recognized by the container readers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadOptions {
    /// Clamp raw B-scan values at or above 1.0 before the display curve, so
    /// empty pixels render white.
    pub fill_empty_pixels_white: bool,

    /// Run the spatial B-scan registration pass after decoding. The pass
    /// itself is a downstream collaborator; decoders only carry the flag.
    pub register_bscans: bool,

    /// Gamma exponent of the raw-to-display curve.
    pub display_gamma: f64,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            fill_empty_pixels_white: true,
            register_bscans: true,
            display_gamma: DEFAULT_GAMMA,
        }
    }
}

// =============================================================================
// CLI
// =============================================================================

/// OCT Importer - decode vendor OCT scan containers.
///
/// Imports raw scan files into a patient/study/series model and inspects or
/// exports their contents.
#[derive(Parser, Debug)]
#[command(name = "oct-importer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a scan file and print the resulting model tree.
    Info(InfoConfig),

    /// Dump the raw header fields of a scan file.
    Header(HeaderConfig),

    /// Decode a scan file and export its images as PNG files.
    Export(ExportConfig),
}

/// Options for the `info` command.
#[derive(Args, Debug)]
pub struct InfoConfig {
    /// Scan file to decode.
    pub file: PathBuf,

    /// Emit the summary as JSON instead of text.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Do not clamp saturated raw pixels before the display curve.
    #[arg(long, default_value_t = false)]
    pub no_fill_white: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Options for the `header` command.
#[derive(Args, Debug)]
pub struct HeaderConfig {
    /// Scan file to inspect.
    pub file: PathBuf,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Options for the `export` command.
#[derive(Args, Debug)]
pub struct ExportConfig {
    /// Scan file to decode.
    pub file: PathBuf,

    /// Output directory for the exported PNG files.
    #[arg(long, default_value = "oct-export", env = "OCT_EXPORT_DIR")]
    pub out: PathBuf,

    /// Gamma exponent for the raw-to-display curve.
    #[arg(long, default_value_t = DEFAULT_GAMMA, env = "OCT_GAMMA")]
    pub gamma: f64,

    /// Do not clamp saturated raw pixels before the display curve.
    #[arg(long, default_value_t = false)]
    pub no_fill_white: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl ExportConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(format!(
                "gamma must be a positive finite number, got {}",
                self.gamma
            ));
        }
        Ok(())
    }

    /// Decode options implied by the flags.
    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            fill_empty_pixels_white: !self.no_fill_white,
            display_gamma: self.gamma,
            ..Default::default()
        }
    }
}

impl InfoConfig {
    /// Decode options implied by the flags.
    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            fill_empty_pixels_white: !self.no_fill_white,
            ..Default::default()
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
