//! Command-line configuration for exif-probe.
//!
//! Options can be given as flags or through environment variables with the
//! `EXIF_PROBE_` prefix:
//!
//! - `EXIF_PROBE_FORMAT` - Output format, `json` or `summary` (default: json)
//! - `EXIF_PROBE_MAX_FILE_SIZE` - Largest file to load, in bytes (default: 64MB)
//!
//! # Example
//!
//! ```ignore
//! use clap::Parser;
//! use exif_probe::config::Config;
//!
//! let config = Config::parse();
//! println!("Reading {}", config.path.display());
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::io::DEFAULT_MAX_FILE_SIZE;

// =============================================================================
// Output Format
// =============================================================================

/// How extracted metadata is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// All tags as a JSON object
    #[default]
    Json,

    /// Aligned table of the headline properties
    Summary,
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// exif-probe - Print the EXIF metadata embedded in a JPEG or TIFF file.
#[derive(Parser, Debug, Clone)]
#[command(name = "exif-probe")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Image file to inspect.
    pub path: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json, env = "EXIF_PROBE_FORMAT")]
    pub format: OutputFormat,

    /// Print JSON on a single line.
    #[arg(long, default_value_t = false)]
    pub compact: bool,

    /// Refuse files larger than this many bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_FILE_SIZE, env = "EXIF_PROBE_MAX_FILE_SIZE")]
    pub max_file_size: u64,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.path.as_os_str().is_empty() {
            return Err("An image path is required".to_string());
        }

        if self.max_file_size == 0 {
            return Err("max_file_size must be greater than 0".to_string());
        }

        if self.compact && self.format != OutputFormat::Json {
            return Err("--compact only applies to JSON output".to_string());
        }

        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
