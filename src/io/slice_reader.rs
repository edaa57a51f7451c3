use crate::error::IoError;

/// Bounds-checked random access over an in-memory image buffer.
///
/// Every offset inside an EXIF block comes from the file itself, so the
/// parsers never index the underlying slice directly. All reads go through
/// [`SliceReader::read_exact_at`], which refuses ranges that are not fully
/// inside the buffer.
#[derive(Debug, Clone, Copy)]
pub struct SliceReader<'a> {
    data: &'a [u8],
}

impl<'a> SliceReader<'a> {
    /// Wrap a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Read exactly `len` bytes starting at `offset`.
    ///
    /// Returns `RangeOutOfBounds` if any byte of the range lies past the end
    /// of the buffer, including when `offset + len` overflows.
    pub fn read_exact_at(&self, offset: u64, len: usize) -> Result<&'a [u8], IoError> {
        let out_of_bounds = || IoError::RangeOutOfBounds {
            offset,
            requested: len as u64,
            size: self.size(),
        };

        let start = usize::try_from(offset).map_err(|_| out_of_bounds())?;
        let end = start.checked_add(len).ok_or_else(out_of_bounds)?;
        self.data.get(start..end).ok_or_else(out_of_bounds)
    }

    /// Total size of the buffer in bytes.
    #[inline]
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

// =============================================================================
// Endian Helper Functions
// =============================================================================
//
// EXIF blocks can be either little-endian or big-endian, and JPEG segment
// lengths are always big-endian. Callers obtain the slice from
// `SliceReader::read_exact_at` first, so the length precondition holds.

/// Read a little-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_le(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

/// Read a big-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_be(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

/// Read a little-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a big-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_be(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
