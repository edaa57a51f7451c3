//! Tag name tables.
//!
//! Each directory kind has its own vocabulary: the same numeric id means
//! different things in IFD0, the Exif IFD and the GPS IFD. Ids missing from a
//! table get a synthetic `Unknown_0xNNNN` name.

use std::borrow::Cow;

/// IFD0 tag pointing at the Exif (capability) IFD
pub const EXIF_IFD_POINTER: u16 = 0x8769;

/// IFD0 tag pointing at the GPS (location) IFD
pub const GPS_IFD_POINTER: u16 = 0x8825;

/// Which directory a tag id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagDirectory {
    /// IFD0, the primary image directory
    Primary,

    /// Exif IFD: exposure and camera settings
    Exif,

    /// GPS IFD: location tags
    Gps,
}

impl TagDirectory {
    /// Get a human-readable name for the directory.
    pub const fn name(&self) -> &'static str {
        match self {
            TagDirectory::Primary => "IFD0",
            TagDirectory::Exif => "Exif",
            TagDirectory::Gps => "GPS",
        }
    }

    /// Human-readable name of a tag in this directory.
    pub fn tag_name(self, tag_id: u16) -> Cow<'static, str> {
        let known = match self {
            TagDirectory::Primary => primary_tag_name(tag_id),
            TagDirectory::Exif => exif_tag_name(tag_id),
            TagDirectory::Gps => gps_tag_name(tag_id),
        };

        match known {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(unknown_tag_name(tag_id)),
        }
    }
}

/// Synthetic name for an id no table knows.
pub fn unknown_tag_name(tag_id: u16) -> String {
    format!("Unknown_0x{:04X}", tag_id)
}

fn primary_tag_name(tag_id: u16) -> Option<&'static str> {
    let name = match tag_id {
        0x010E => "ImageDescription",
        0x010F => "Make",
        0x0110 => "Model",
        0x0112 => "Orientation",
        0x011A => "XResolution",
        0x011B => "YResolution",
        0x0128 => "ResolutionUnit",
        0x0131 => "Software",
        0x0132 => "DateTime",
        0x013B => "Artist",
        0x0213 => "YCbCrPositioning",
        0x8298 => "Copyright",
        EXIF_IFD_POINTER => "ExifIFDPointer",
        GPS_IFD_POINTER => "GPSInfoIFDPointer",
        _ => return None,
    };
    Some(name)
}

fn exif_tag_name(tag_id: u16) -> Option<&'static str> {
    let name = match tag_id {
        0x829A => "ExposureTime",
        0x829D => "FNumber",
        0x8822 => "ExposureProgram",
        0x8827 => "ISOSpeedRatings",
        0x9000 => "ExifVersion",
        0x9003 => "DateTimeOriginal",
        0x9004 => "DateTimeDigitized",
        0x9201 => "ShutterSpeedValue",
        0x9202 => "ApertureValue",
        0x9204 => "ExposureBiasValue",
        0x9205 => "MaxApertureValue",
        0x9207 => "MeteringMode",
        0x9208 => "LightSource",
        0x9209 => "Flash",
        0x920A => "FocalLength",
        0xA001 => "ColorSpace",
        0xA002 => "PixelXDimension",
        0xA003 => "PixelYDimension",
        0xA402 => "ExposureMode",
        0xA403 => "WhiteBalance",
        0xA404 => "DigitalZoomRatio",
        0xA405 => "FocalLengthIn35mmFilm",
        0xA406 => "SceneCaptureType",
        0xA433 => "LensMake",
        0xA434 => "LensModel",
        _ => return None,
    };
    Some(name)
}

fn gps_tag_name(tag_id: u16) -> Option<&'static str> {
    let name = match tag_id {
        0x0000 => "GPSVersionID",
        0x0001 => "GPSLatitudeRef",
        0x0002 => "GPSLatitude",
        0x0003 => "GPSLongitudeRef",
        0x0004 => "GPSLongitude",
        0x0005 => "GPSAltitudeRef",
        0x0006 => "GPSAltitude",
        0x0007 => "GPSTimeStamp",
        0x000C => "GPSSpeedRef",
        0x000D => "GPSSpeed",
        0x0010 => "GPSImgDirectionRef",
        0x0011 => "GPSImgDirection",
        0x001D => "GPSDateStamp",
        _ => return None,
    };
    Some(name)
}
