//! Container and TIFF parsing for EXIF metadata.
//!
//! This module finds the EXIF block inside an image buffer and reads its
//! TIFF directories.
//!
//! # Format Detection
//!
//! Use [`detect::locate_metadata`] to find the EXIF block of a buffer.
//! Supported containers:
//!
//! - **JPEG**: APP1 segment carrying `Exif\0\0`
//! - **TIFF**: the file itself is the TIFF stream
//! - **EXIF payload**: a bare APP1 payload

pub mod detect;
pub mod jpeg;
pub mod tiff;

pub use detect::{is_tiff_header, locate_metadata, ContainerFormat, MetadataLocation};
pub use jpeg::{find_exif_segment, is_jpeg};
