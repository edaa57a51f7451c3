//! EXIF extraction.
//!
//! This module turns an image buffer into named tags:
//!
//! ```text
//! bytes ──► locate_metadata ──► IFD0 ──► rename
//!                                 │
//!                                 ├──► Exif IFD ──► rename, merged flat
//!                                 │
//!                                 └──► GPS IFD ──► rename, nested under "GPS"
//!                                                    │
//!                                                    └──► GeoCoordinate
//! ```
//!
//! # Components
//!
//! - [`extract_exif`]: the single entry point
//! - [`ExifData`]: named tags plus the optional GPS block, serializable as-is
//! - [`tags`]: tag name tables for the three directory kinds
//! - [`gps`]: degree/minute/second conversion
//! - [`display`]: value formatting helpers
//! - [`ExifSummary`]: compact human-readable overview
//!
//! # Example
//!
//! ```
//! use exif_probe::extract_exif;
//!
//! // A JPEG without an APP1 segment has no metadata; that is not an error.
//! let jpeg = [0xFF, 0xD8, 0xFF, 0xD9];
//! assert!(extract_exif(&jpeg).unwrap().is_none());
//! ```

pub mod display;
pub mod gps;
pub mod resolve;
pub mod summary;
pub mod tags;

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::error::ExifError;
use crate::format::locate_metadata;
use crate::format::tiff::TagValue;

pub use display::{
    format_bytes, format_exposure_time, format_number, interpret_flash, PLACEHOLDER,
};
pub use gps::{to_decimal_degrees, GeoCoordinate};
pub use summary::ExifSummary;
pub use tags::TagDirectory;

/// Tag name to decoded value.
pub type TagMap = BTreeMap<String, TagValue>;

// =============================================================================
// GpsData
// =============================================================================

/// Renamed tags of the GPS directory and the coordinate derived from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpsData {
    /// Raw GPS tags, always kept even when no coordinate could be derived
    #[serde(flatten)]
    pub tags: TagMap,

    /// Decimal coordinate, present only when both axes are complete
    #[serde(flatten)]
    pub coordinate: Option<GeoCoordinate>,
}

impl GpsData {
    /// Wrap renamed GPS tags, deriving the coordinate when possible.
    pub fn new(tags: TagMap) -> Self {
        let coordinate = GeoCoordinate::from_gps(&tags);
        Self { tags, coordinate }
    }
}

// =============================================================================
// ExifData
// =============================================================================

/// Everything extracted from one image.
///
/// Serializes as a flat JSON object of tag names, with GPS tags nested under
/// `"GPS"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExifData {
    /// IFD0 tags with Exif IFD tags merged in
    #[serde(flatten)]
    pub tags: TagMap,

    /// GPS directory, when IFD0 links to one
    #[serde(rename = "GPS", skip_serializing_if = "Option::is_none")]
    pub gps: Option<GpsData>,
}

impl ExifData {
    /// Look up a tag of the flat map by name.
    pub fn get(&self, name: &str) -> Option<&TagValue> {
        self.tags.get(name)
    }

    /// Look up a text tag, ignoring empty strings.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(TagValue::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Decimal GPS coordinate, if one could be derived.
    pub fn coordinate(&self) -> Option<GeoCoordinate> {
        self.gps.as_ref().and_then(|gps| gps.coordinate)
    }

    /// Total number of tags, GPS tags included.
    pub fn len(&self) -> usize {
        self.tags.len() + self.gps.as_ref().map_or(0, |gps| gps.tags.len())
    }

    /// Whether no tag at all was decoded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Extraction
// =============================================================================

/// Extract EXIF metadata from an image held in memory.
///
/// # Returns
/// * `Ok(Some(data))` - Metadata was found; malformed entries are `Null`
/// * `Ok(None)` - The image carries no EXIF metadata
/// * `Err(ExifError::InvalidInput)` - The buffer is empty
///
/// Malformed metadata never produces an error: offsets, counts and values
/// are checked and a bad entry only affects its own value.
pub fn extract_exif(data: &[u8]) -> Result<Option<ExifData>, ExifError> {
    if data.is_empty() {
        return Err(ExifError::InvalidInput("image buffer is empty".to_string()));
    }

    let Some(location) = locate_metadata(data) else {
        debug!(size = data.len(), "No EXIF metadata found");
        return Ok(None);
    };

    let exif = resolve::resolve(data, &location);
    debug!(
        tags = exif.len(),
        has_gps = exif.gps.is_some(),
        has_coordinate = exif.coordinate().is_some(),
        "Extracted EXIF metadata"
    );

    Ok(Some(exif))
}
