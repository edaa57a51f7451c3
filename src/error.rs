use thiserror::Error;

/// I/O errors that can occur when reading image bytes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IoError {
    /// Requested range exceeds buffer bounds
    #[error("Range out of bounds: requested {requested} bytes at offset {offset}, size is {size}")]
    RangeOutOfBounds {
        offset: u64,
        requested: u64,
        size: u64,
    },

    /// File not found on disk
    #[error("File not found: {0}")]
    NotFound(String),

    /// Any other failure while reading a file
    #[error("Read error: {0}")]
    Read(String),

    /// File exceeds the configured size limit
    #[error("File too large: {size} bytes exceeds the limit of {limit} bytes")]
    TooLarge { size: u64, limit: u64 },
}

/// Errors that can occur when parsing the TIFF structure inside an EXIF block
///
/// Apart from header errors, these never escape [`crate::extract_exif`]: a
/// failing entry is recorded as [`crate::TagValue::Null`] and parsing goes on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TiffError {
    /// Bounds violation while reading a value
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// Invalid TIFF magic bytes (not II or MM)
    #[error("Invalid TIFF magic bytes: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    InvalidMagic(u16),

    /// Invalid TIFF version number
    #[error("Invalid TIFF version: expected 42, got {0}")]
    InvalidVersion(u16),

    /// Block is too small to contain a valid TIFF header
    #[error("Block too small: need at least {required} bytes, got {actual}")]
    FileTooSmall { required: u64, actual: u64 },

    /// IFD offset points outside the buffer
    #[error("Invalid IFD offset: {0}")]
    InvalidIfdOffset(u64),

    /// Rational value with a zero denominator
    #[error("Rational value has a zero denominator")]
    ZeroDenominator,
}

/// Errors returned to callers of the extraction API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExifError {
    /// The input cannot be an image at all
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The image could not be loaded
    #[error("I/O error: {0}")]
    Io(#[from] IoError),
}
