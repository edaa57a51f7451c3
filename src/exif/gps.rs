//! Degree/minute/second to decimal degree conversion.

use serde::Serialize;

use crate::format::tiff::TagValue;

use super::TagMap;

/// Signed decimal coordinate derived from the GPS directory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeoCoordinate {
    /// Degrees north (positive) or south (negative)
    pub latitude: f64,

    /// Degrees east (positive) or west (negative)
    pub longitude: f64,
}

impl GeoCoordinate {
    /// Derive a coordinate from renamed GPS tags.
    ///
    /// Both axes need a triplet and a hemisphere reference; partial data
    /// yields no coordinate at all rather than a half-filled one.
    pub fn from_gps(tags: &TagMap) -> Option<Self> {
        let axis = |value: &str, reference: &str| {
            to_decimal_degrees(tags.get(value)?, tags.get(reference)?)
        };

        Some(GeoCoordinate {
            latitude: axis("GPSLatitude", "GPSLatitudeRef")?,
            longitude: axis("GPSLongitude", "GPSLongitudeRef")?,
        })
    }
}

/// Convert a degree/minute/second value and its hemisphere reference.
///
/// `dms` is usually a three-element sequence; missing minutes and seconds
/// count as 0. A reference starting with `S` or `W` negates the result.
///
/// Returns `None` when there is no degree value or the reference is not
/// text.
pub fn to_decimal_degrees(dms: &TagValue, reference: &TagValue) -> Option<f64> {
    let parts = dms.to_numbers()?;
    let degrees = *parts.first()?;
    let minutes = parts.get(1).copied().unwrap_or(0.0);
    let seconds = parts.get(2).copied().unwrap_or(0.0);
    let reference = reference.as_str()?;

    let decimal = degrees + minutes / 60.0 + seconds / 3600.0;
    if is_negative_hemisphere(reference) {
        Some(-decimal)
    } else {
        Some(decimal)
    }
}

fn is_negative_hemisphere(reference: &str) -> bool {
    matches!(
        reference.trim_start().chars().next(),
        Some('S' | 'W' | 's' | 'w')
    )
}
