//! Display helpers for tag values.
//!
//! Every helper is total: absent or malformed input renders a placeholder
//! or the raw value instead of failing.

use crate::format::tiff::TagValue;

/// Rendered for values that are absent or unusable.
pub const PLACEHOLDER: &str = "N/A";

/// Round half towards positive infinity, as a JavaScript UI would.
#[inline]
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to one decimal place; `2.0` renders as `"2"`.
pub fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            let rounded = round_half_up(v * 10.0) / 10.0;
            // avoid "-0"
            let rounded = if rounded == 0.0 { 0.0 } else { rounded };
            rounded.to_string()
        }
        _ => PLACEHOLDER.to_string(),
    }
}

/// Render an exposure time in seconds.
///
/// One second and longer renders as the plain number, shorter exposures as
/// the customary `1/N` fraction. Zero, negative and non-numeric values fall
/// back to the raw value.
pub fn format_exposure_time(value: &TagValue) -> String {
    match value.as_f64() {
        Some(seconds) if seconds >= 1.0 => seconds.to_string(),
        Some(seconds) if seconds > 0.0 => format!("1/{}", round_half_up(1.0 / seconds)),
        _ => value.to_string(),
    }
}

/// Decode the EXIF Flash bit field.
///
/// Bit 0 tells whether the flash fired. Of the mode bits (mask `0x18`),
/// `0x10` reads as "Auto" and `0x08` as "On".
pub fn interpret_flash(value: &TagValue) -> String {
    let Some(raw) = value.as_f64().filter(|v| v.is_finite() && *v >= 0.0) else {
        return PLACEHOLDER.to_string();
    };
    let bits = raw as u32;

    let fired = if bits & 0x01 != 0 {
        "Fired"
    } else {
        "Did not fire"
    };

    let mode = if bits & 0x10 != 0 {
        "Auto"
    } else if bits & 0x08 != 0 {
        "On"
    } else {
        "Unknown"
    };

    format!("{}, {}", mode, fired)
}

/// Human-readable byte size using 1024-based units.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{:.1} {}", size, UNITS[unit])
}
