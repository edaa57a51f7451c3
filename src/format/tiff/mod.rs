//! TIFF structure parsing for EXIF blocks.
//!
//! An EXIF block is a small TIFF stream. This module reads its header and
//! directories and decodes entry values.
//!
//! # Key Concepts
//!
//! - **Byte order**: the block declares its endianness (II = little-endian,
//!   MM = big-endian) in the header. All multi-byte values must be read
//!   respecting this order.
//!
//! - **Base offset**: every offset inside the block is relative to the first
//!   byte of the TIFF header, not to the start of the file.
//!
//! - **Inline vs offset values**: values of at most 4 bytes are stored inline
//!   in the IFD entry, larger values are stored at an offset.
//!
//! - **Local failures**: a corrupt entry becomes [`TagValue::Null`]; it never
//!   aborts the rest of the directory.

mod parser;
mod tags;
mod values;

pub use parser::{
    read_directory, ByteOrder, Directory, IfdEntry, TiffHeader, IFD_ENTRY_SIZE, TIFF_HEADER_SIZE,
};
pub use tags::FieldType;
pub use values::{rational, TagValue, ValueReader, MAX_RAW_VALUE_BYTES};
