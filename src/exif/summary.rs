//! At-a-glance overview of the most commonly wanted tags.

use std::fmt;

use serde::Serialize;

use crate::format::tiff::TagValue;

use super::display::{
    format_bytes, format_exposure_time, format_number, interpret_flash, PLACEHOLDER,
};
use super::ExifData;

/// Display strings for the headline properties of a photo.
///
/// Every field is always filled; absent tags render as `"N/A"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ExifSummary {
    pub camera: String,
    pub lens: String,
    pub exposure: String,
    pub aperture: String,
    pub iso: String,
    pub focal_length: String,
    pub flash: String,
    pub dimensions: String,
    pub taken_at: String,
    pub file_size: String,
    pub location: String,
}

impl ExifSummary {
    /// Build the overview from extracted tags and the size of the source file.
    pub fn from_exif(exif: &ExifData, file_size: u64) -> Self {
        let number = |name: &str| exif.get(name).and_then(first_number);

        let exposure = match exif.get("ExposureTime") {
            Some(value) if !value.is_null() => format!("{} s", format_exposure_time(value)),
            _ => placeholder(),
        };

        let aperture = number("FNumber")
            .map(|f| format!("f/{}", format_number(Some(f))))
            .unwrap_or_else(placeholder);

        let focal_length = number("FocalLength")
            .map(|mm| format!("{} mm", format_number(Some(mm))))
            .unwrap_or_else(placeholder);

        let iso = number("ISOSpeedRatings")
            .map(|iso| format_number(Some(iso)))
            .unwrap_or_else(placeholder);

        let dimensions = match (number("PixelXDimension"), number("PixelYDimension")) {
            (Some(width), Some(height)) => format!("{} x {}", width, height),
            _ => placeholder(),
        };

        let location = exif
            .coordinate()
            .map(|c| format!("{:.6}, {:.6}", c.latitude, c.longitude))
            .unwrap_or_else(placeholder);

        Self {
            camera: camera(exif.get_str("Make"), exif.get_str("Model")),
            lens: exif
                .get_str("LensModel")
                .or_else(|| exif.get_str("LensMake"))
                .map(str::to_string)
                .unwrap_or_else(placeholder),
            exposure,
            aperture,
            iso,
            focal_length,
            flash: exif
                .get("Flash")
                .map(interpret_flash)
                .unwrap_or_else(placeholder),
            dimensions,
            taken_at: exif
                .get_str("DateTimeOriginal")
                .or_else(|| exif.get_str("DateTime"))
                .map(str::to_string)
                .unwrap_or_else(placeholder),
            file_size: format_bytes(file_size),
            location,
        }
    }

    /// Label/value pairs in display order.
    pub fn rows(&self) -> [(&'static str, &str); 11] {
        [
            ("Camera", self.camera.as_str()),
            ("Lens", self.lens.as_str()),
            ("Exposure", self.exposure.as_str()),
            ("Aperture", self.aperture.as_str()),
            ("ISO", self.iso.as_str()),
            ("Focal length", self.focal_length.as_str()),
            ("Flash", self.flash.as_str()),
            ("Dimensions", self.dimensions.as_str()),
            ("Taken", self.taken_at.as_str()),
            ("File size", self.file_size.as_str()),
            ("Location", self.location.as_str()),
        ]
    }
}

impl fmt::Display for ExifSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.rows();
        let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

        for (label, value) in rows {
            writeln!(f, "{:<width$}  {}", label, value, width = width)?;
        }
        Ok(())
    }
}

fn placeholder() -> String {
    PLACEHOLDER.to_string()
}

/// First element of a numeric value; ISO is often stored as a list.
fn first_number(value: &TagValue) -> Option<f64> {
    value
        .to_numbers()
        .and_then(|values| values.first().copied())
        .filter(|n| n.is_finite())
}

/// Combine make and model, skipping the make when the model repeats it.
fn camera(make: Option<&str>, model: Option<&str>) -> String {
    match (make, model) {
        (Some(make), Some(model)) if model.starts_with(make) => model.to_string(),
        (Some(make), Some(model)) => format!("{} {}", make, model),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => placeholder(),
    }
}
