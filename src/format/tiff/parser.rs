//! TIFF header and directory parsing.
//!
//! The body of an EXIF block is a little TIFF file: an 8-byte header
//! followed by Image File Directories (IFDs). Every offset inside the block
//! is relative to the first byte of that header, the "base offset".
//!
//! # TIFF Header Structure
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Version (42 = 0x002A)
//! Bytes 4-7: Offset to first IFD (4 bytes, relative to the header)
//! ```
//!
//! # IFD Structure
//! ```text
//! Bytes 0-1:        Entry count N
//! Bytes 2..2+12N:   N entries (2 tag + 2 type + 4 count + 4 value/offset)
//! Next 4 bytes:     Offset to the next IFD (0 if none)
//! ```

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::error::TiffError;
use crate::io::{read_u16_be, read_u16_le, read_u32_be, read_u32_le, SliceReader};

use super::tags::FieldType;
use super::values::{TagValue, ValueReader};

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Magic bytes indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// Version number for classic TIFF
const VERSION_TIFF: u16 = 42;

/// Size of the TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

/// Size of one IFD entry in bytes
pub const IFD_ENTRY_SIZE: usize = 12;

/// Size of the entry count field at the start of an IFD
const IFD_COUNT_SIZE: usize = 2;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of an EXIF block.
///
/// Declared once by the first two bytes of the TIFF header. Every multi-byte
/// value in the block is read with this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Read a u16 from a byte slice using this byte order.
    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        match self {
            ByteOrder::LittleEndian => read_u16_le(bytes),
            ByteOrder::BigEndian => read_u16_be(bytes),
        }
    }

    /// Read a u32 from a byte slice using this byte order.
    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        match self {
            ByteOrder::LittleEndian => read_u32_le(bytes),
            ByteOrder::BigEndian => read_u32_be(bytes),
        }
    }

    /// Detect the byte order from the first two bytes of a TIFF header.
    pub fn from_marker(bytes: &[u8]) -> Option<Self> {
        let marker = u16::from_le_bytes([*bytes.first()?, *bytes.get(1)?]);
        match marker {
            BYTE_ORDER_LITTLE_ENDIAN => Some(ByteOrder::LittleEndian),
            BYTE_ORDER_BIG_ENDIAN => Some(ByteOrder::BigEndian),
            _ => None,
        }
    }
}

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF header of an EXIF block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values in the block
    pub byte_order: ByteOrder,

    /// Offset to IFD0, relative to the start of the header
    pub first_ifd_offset: u32,
}

impl TiffHeader {
    /// Parse a TIFF header from raw bytes.
    ///
    /// # Arguments
    /// * `bytes` - Bytes starting at the header (at least 8)
    /// * `block_size` - Bytes available from the header to the end of the buffer
    ///
    /// # Errors
    /// - `FileTooSmall` if there aren't enough bytes for the header
    /// - `InvalidMagic` if byte order bytes are not II or MM
    /// - `InvalidVersion` if version is not 42
    /// - `InvalidIfdOffset` if the first IFD offset is outside the block
    pub fn parse(bytes: &[u8], block_size: u64) -> Result<Self, TiffError> {
        if bytes.len() < TIFF_HEADER_SIZE {
            return Err(TiffError::FileTooSmall {
                required: TIFF_HEADER_SIZE as u64,
                actual: bytes.len() as u64,
            });
        }

        let byte_order = ByteOrder::from_marker(bytes)
            .ok_or_else(|| TiffError::InvalidMagic(u16::from_le_bytes([bytes[0], bytes[1]])))?;

        let version = byte_order.read_u16(&bytes[2..4]);
        if version != VERSION_TIFF {
            return Err(TiffError::InvalidVersion(version));
        }

        let first_ifd_offset = byte_order.read_u32(&bytes[4..8]);
        if u64::from(first_ifd_offset) >= block_size {
            return Err(TiffError::InvalidIfdOffset(u64::from(first_ifd_offset)));
        }

        Ok(TiffHeader {
            byte_order,
            first_ifd_offset,
        })
    }
}

// =============================================================================
// IfdEntry
// =============================================================================

/// A single 12-byte directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfdEntry {
    /// Tag identifier
    pub tag_id: u16,

    /// Field type, `None` for types this parser does not know
    pub field_type: Option<FieldType>,

    /// Raw field type value, kept for diagnostics
    pub field_type_raw: u16,

    /// Number of values of `field_type`
    pub count: u32,

    /// The last 4 bytes of the entry: the value itself or its offset
    pub value_offset_bytes: [u8; 4],

    /// Whether the value is stored inline in `value_offset_bytes`
    pub is_inline: bool,
}

impl IfdEntry {
    /// Parse an entry from its 12 raw bytes.
    ///
    /// # Panics
    /// Panics if `bytes` holds fewer than 12 bytes.
    pub fn parse(bytes: &[u8], byte_order: ByteOrder) -> Self {
        let tag_id = byte_order.read_u16(&bytes[0..2]);
        let field_type_raw = byte_order.read_u16(&bytes[2..4]);
        let count = byte_order.read_u32(&bytes[4..8]);
        let value_offset_bytes = [bytes[8], bytes[9], bytes[10], bytes[11]];

        let mut entry = IfdEntry {
            tag_id,
            field_type: FieldType::from_u16(field_type_raw),
            field_type_raw,
            count,
            value_offset_bytes,
            is_inline: false,
        };
        entry.is_inline = entry.value_byte_size() <= FieldType::INLINE_THRESHOLD;
        entry
    }

    /// Size of a single element in bytes, 1 for unknown types.
    #[inline]
    pub fn element_size(&self) -> usize {
        FieldType::element_size(self.field_type_raw)
    }

    /// Total size of the value in bytes.
    ///
    /// Computed in 64 bits; `count * element size` may exceed `u32::MAX`.
    #[inline]
    pub fn value_byte_size(&self) -> u64 {
        u64::from(self.count) * self.element_size() as u64
    }

    /// Interpret the value/offset field as an offset.
    #[inline]
    pub fn value_offset(&self, byte_order: ByteOrder) -> u32 {
        byte_order.read_u32(&self.value_offset_bytes)
    }
}

// =============================================================================
// Directory
// =============================================================================

/// Decoded contents of one IFD, keyed by numeric tag id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directory {
    /// Decoded value for every entry that could be located
    pub entries: BTreeMap<u16, TagValue>,

    /// Offset of the next IFD in the chain, when one is linked and readable
    pub next_ifd_offset: Option<u32>,
}

impl Directory {
    /// Look up the value of a tag.
    pub fn get(&self, tag_id: u16) -> Option<&TagValue> {
        self.entries.get(&tag_id)
    }

    /// Number of decoded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the directory decoded no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read one IFD from an EXIF block.
///
/// # Arguments
/// * `data` - The whole image buffer
/// * `base_offset` - Absolute position of the TIFF header in `data`
/// * `ifd_offset` - Offset of the IFD, relative to `base_offset`
/// * `byte_order` - Byte order declared by the TIFF header
///
/// Failures are local: an entry whose value cannot be decoded is recorded as
/// [`TagValue::Null`], and an unreadable entry count yields an empty
/// directory. Nothing is ever read past the end of `data`.
pub fn read_directory(
    data: &[u8],
    base_offset: u64,
    ifd_offset: u32,
    byte_order: ByteOrder,
) -> Directory {
    let reader = SliceReader::new(data);
    let values = ValueReader::new(reader, base_offset, byte_order);
    let mut directory = Directory::default();

    let ifd_start = base_offset + u64::from(ifd_offset);
    let entry_count = match reader.read_exact_at(ifd_start, IFD_COUNT_SIZE) {
        Ok(bytes) => byte_order.read_u16(bytes),
        Err(e) => {
            debug!(ifd_offset, "Cannot read IFD entry count: {}", e);
            return directory;
        }
    };
    trace!(ifd_offset, entry_count, "Reading IFD");

    let entries_start = ifd_start + IFD_COUNT_SIZE as u64;
    for index in 0..u64::from(entry_count) {
        let entry_offset = entries_start + index * IFD_ENTRY_SIZE as u64;

        let entry = match reader.read_exact_at(entry_offset, IFD_ENTRY_SIZE) {
            Ok(bytes) => IfdEntry::parse(bytes, byte_order),
            Err(e) => {
                // A partially present entry still names its tag
                if let Ok(tag_bytes) = reader.read_exact_at(entry_offset, 2) {
                    let tag_id = byte_order.read_u16(tag_bytes);
                    debug!("Truncated IFD entry for tag {:#06X}: {}", tag_id, e);
                    directory.entries.insert(tag_id, TagValue::Null);
                }
                debug!(
                    ifd_offset,
                    decoded = directory.entries.len(),
                    expected = entry_count,
                    "IFD truncated"
                );
                return directory;
            }
        };

        let value = values.decode(&entry).unwrap_or_else(|e| {
            debug!(
                field_type = entry.field_type_raw,
                count = entry.count,
                "Failed to decode IFD entry for tag {:#06X}: {}",
                entry.tag_id,
                e
            );
            TagValue::Null
        });
        directory.entries.insert(entry.tag_id, value);
    }

    let next_offset_pos = entries_start + u64::from(entry_count) * IFD_ENTRY_SIZE as u64;
    directory.next_ifd_offset = reader
        .read_exact_at(next_offset_pos, 4)
        .ok()
        .map(|bytes| byte_order.read_u32(bytes))
        .filter(|&offset| offset != 0);

    directory
}

// =============================================================================
// Tests
// =============================================================================
