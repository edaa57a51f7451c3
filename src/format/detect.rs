//! Locating the EXIF block inside an image buffer.
//!
//! Three containers are recognised:
//!
//! - **JPEG**: the EXIF block sits in an APP1 segment (see [`super::jpeg`])
//! - **TIFF**: the whole file is the TIFF stream, base offset 0
//! - **EXIF payload**: a bare APP1 payload starting with `Exif\0\0`, as
//!   extracted by other tools or embedded in other containers
//!
//! Anything else is scanned as JPEG, which tolerates leading garbage.

use tracing::{debug, warn};

use crate::io::SliceReader;

use super::jpeg::{find_exif_segment, is_jpeg, EXIF_SIGNATURE};
use super::tiff::{ByteOrder, TiffHeader, TIFF_HEADER_SIZE};

// =============================================================================
// ContainerFormat
// =============================================================================

/// Container the EXIF block was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    /// JPEG stream with an APP1 EXIF segment
    Jpeg,

    /// Plain TIFF stream (TIFF files and TIFF-based raw formats)
    Tiff,

    /// Bare EXIF payload (`Exif\0\0` followed by TIFF)
    ExifPayload,
}

impl ContainerFormat {
    /// Get a human-readable name for the container.
    pub const fn name(&self) -> &'static str {
        match self {
            ContainerFormat::Jpeg => "JPEG",
            ContainerFormat::Tiff => "TIFF",
            ContainerFormat::ExifPayload => "EXIF payload",
        }
    }
}

// =============================================================================
// MetadataLocation
// =============================================================================

/// Where the EXIF block of a buffer lives and how to read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataLocation {
    /// Container the block was found in
    pub container: ContainerFormat,

    /// Absolute offset of the TIFF header; all block offsets are relative to it
    pub base_offset: u64,

    /// Parsed TIFF header of the block
    pub header: TiffHeader,
}

impl MetadataLocation {
    /// Byte order of the block.
    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.header.byte_order
    }
}

/// Check if data starts with a classic TIFF header (`II*\0` or `MM\0*`).
pub fn is_tiff_header(data: &[u8]) -> bool {
    data.starts_with(b"II\x2A\x00") || data.starts_with(b"MM\x00\x2A")
}

/// Locate the EXIF block of an image buffer.
///
/// # Returns
/// * `Some(location)` - An EXIF block with a valid TIFF header was found
/// * `None` - The buffer carries no (usable) EXIF metadata
pub fn locate_metadata(data: &[u8]) -> Option<MetadataLocation> {
    let (container, base_offset) = if is_tiff_header(data) {
        (ContainerFormat::Tiff, 0)
    } else if data.starts_with(&EXIF_SIGNATURE) {
        (ContainerFormat::ExifPayload, EXIF_SIGNATURE.len() as u64)
    } else {
        if !is_jpeg(data) {
            debug!("Buffer does not start with a JPEG SOI marker, scanning anyway");
        }
        (ContainerFormat::Jpeg, find_exif_segment(data)?)
    };

    let reader = SliceReader::new(data);
    let header_bytes = match reader.read_exact_at(base_offset, TIFF_HEADER_SIZE) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(base_offset, "EXIF block too short for a TIFF header: {}", e);
            return None;
        }
    };

    let block_size = reader.size() - base_offset;
    match TiffHeader::parse(header_bytes, block_size) {
        Ok(header) => {
            debug!(
                container = container.name(),
                base_offset,
                byte_order = ?header.byte_order,
                first_ifd = header.first_ifd_offset,
                "Located EXIF block"
            );
            Some(MetadataLocation {
                container,
                base_offset,
                header,
            })
        }
        Err(e) => {
            warn!(base_offset, "Invalid TIFF header in EXIF block: {}", e);
            None
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
