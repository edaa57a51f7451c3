//! JPEG segment scanning.
//!
//! A JPEG file is a sequence of marker segments. EXIF metadata lives in an
//! APP1 segment whose payload starts with the signature `Exif\0\0`, followed
//! by a TIFF stream.
//!
//! # Segment Layout
//!
//! ```text
//! FF E1          APP1 marker
//! LL LL          Big-endian segment length (includes these two bytes)
//! 45 78 69 66 00 00   "Exif\0\0"
//! ...            TIFF header + IFDs  <- base offset
//! ```
//!
//! Scanning stops at Start Of Scan: everything after it is entropy-coded
//! image data, and metadata segments never follow it.

use tracing::{debug, trace};

use crate::io::{read_u16_be, SliceReader};

// =============================================================================
// JPEG Markers
// =============================================================================

/// Start Of Image marker
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// End Of Image marker
pub const EOI: [u8; 2] = [0xFF, 0xD9];

/// Start Of Scan marker
pub const SOS: [u8; 2] = [0xFF, 0xDA];

/// Application segment 1 (EXIF, XMP) marker
pub const APP1: [u8; 2] = [0xFF, 0xE1];

/// Signature opening the payload of an EXIF APP1 segment
pub const EXIF_SIGNATURE: [u8; 6] = *b"Exif\0\0";

/// Bytes between the APP1 marker and the TIFF header: marker, length, signature
const EXIF_HEADER_SIZE: u64 = 2 + 2 + EXIF_SIGNATURE.len() as u64;

// =============================================================================
// Segment Scanning
// =============================================================================

/// Check if data starts with a JPEG Start Of Image marker.
pub fn is_jpeg(data: &[u8]) -> bool {
    data.len() >= 2 && data[0..2] == SOI
}

/// Whether a marker type stands alone, without a length field.
#[inline]
fn is_standalone_marker(marker: u8) -> bool {
    // SOI, TEM, RST0-RST7
    matches!(marker, 0xD8 | 0x01 | 0xD0..=0xD7)
}

/// Find the EXIF segment of a JPEG stream.
///
/// Walks the marker segments from offset 0. An APP1 segment carrying the
/// `Exif\0\0` signature ends the search; any other segment is skipped by its
/// declared length. Bytes that are not a valid marker (a lone `0xFF` before
/// `0x00` or `0xFF` padding, or stray non-marker bytes) advance the scan by
/// one byte.
///
/// # Returns
/// The absolute offset of the TIFF header inside the EXIF segment, or
/// `None` if Start Of Scan, End Of Image or the end of the buffer is
/// reached first.
pub fn find_exif_segment(data: &[u8]) -> Option<u64> {
    let reader = SliceReader::new(data);
    let mut pos: u64 = 0;

    loop {
        let Ok(pair) = reader.read_exact_at(pos, 2) else {
            trace!(pos, "Reached end of buffer while scanning for EXIF");
            return None;
        };

        if pair[0] != 0xFF {
            pos += 1;
            continue;
        }

        let marker = pair[1];
        match marker {
            // Byte stuffing or fill bytes: not a marker
            0x00 | 0xFF => {
                pos += 1;
                continue;
            }
            m if is_standalone_marker(m) => {
                pos += 2;
                continue;
            }
            m if m == SOS[1] || m == EOI[1] => {
                debug!(pos, marker = m, "No EXIF segment before image data");
                return None;
            }
            _ => {}
        }

        let Ok(length_bytes) = reader.read_exact_at(pos + 2, 2) else {
            trace!(pos, "Truncated segment header");
            return None;
        };
        let length = u64::from(read_u16_be(length_bytes));

        if marker == APP1[1] {
            let is_exif = reader
                .read_exact_at(pos + 4, EXIF_SIGNATURE.len())
                .is_ok_and(|signature| signature == EXIF_SIGNATURE);

            if is_exif {
                debug!(pos, length, "Found EXIF segment");
                return Some(pos + EXIF_HEADER_SIZE);
            }
            trace!(pos, "Skipping non-EXIF APP1 segment");
        }

        pos += 2 + length;
    }
}

// =============================================================================
// Tests
// =============================================================================
