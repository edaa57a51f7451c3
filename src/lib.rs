//! # exif-probe
//!
//! Extract EXIF metadata from JPEG and TIFF images held in memory.
//!
//! The parser walks the TIFF structure embedded in a JPEG APP1 segment (or a
//! bare TIFF file), decodes the primary directory, follows the Exif and GPS
//! pointers, and returns named tags. Every offset is checked against the
//! buffer: malformed metadata degrades to missing or `null` values, never to
//! a panic or an out-of-bounds read.
//!
//! ## Architecture
//!
//! - [`io`] - Bounds-checked slice access and file loading
//! - [`mod@format`] - JPEG segment scanning, container detection, TIFF directories
//! - [`exif`] - Tag naming, pointer resolution, GPS conversion, display helpers
//! - [`config`] - CLI configuration of the `exif-probe` binary
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use exif_probe::{extract_exif, load_file, DEFAULT_MAX_FILE_SIZE};
//!
//! let bytes = load_file(Path::new("photo.jpg"), DEFAULT_MAX_FILE_SIZE).unwrap();
//! if let Some(exif) = extract_exif(&bytes).unwrap() {
//!     println!("{}", serde_json::to_string_pretty(&exif).unwrap());
//! }
//! ```

pub mod config;
pub mod error;
pub mod exif;
pub mod format;
pub mod io;

// Re-export commonly used types
pub use config::{Config, OutputFormat};
pub use error::{ExifError, IoError, TiffError};
pub use exif::{
    extract_exif, format_bytes, format_exposure_time, format_number, interpret_flash,
    to_decimal_degrees, ExifData, ExifSummary, GeoCoordinate, GpsData, TagDirectory, TagMap,
    PLACEHOLDER,
};
pub use format::tiff::{
    read_directory, ByteOrder, Directory, FieldType, IfdEntry, TagValue, TiffHeader,
    ValueReader, TIFF_HEADER_SIZE,
};
pub use format::{
    find_exif_segment, is_jpeg, is_tiff_header, locate_metadata, ContainerFormat,
    MetadataLocation,
};
pub use io::{load_file, SliceReader, DEFAULT_MAX_FILE_SIZE};
