use std::fs;
use std::path::Path;

use bytes::Bytes;
use tracing::debug;

use crate::error::IoError;

/// Default upper bound on the size of a file loaded into memory: 64MB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Load a whole image file into memory.
///
/// The extractor works on a resident buffer, so the file is read in one go.
/// Files larger than `max_size` are rejected before their contents are read.
pub fn load_file(path: &Path, max_size: u64) -> Result<Bytes, IoError> {
    let shown = path.display().to_string();

    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => IoError::NotFound(shown.clone()),
        _ => IoError::Read(format!("{}: {}", shown, e)),
    })?;

    if !metadata.is_file() {
        return Err(IoError::Read(format!("{}: not a regular file", shown)));
    }

    if metadata.len() > max_size {
        return Err(IoError::TooLarge {
            size: metadata.len(),
            limit: max_size,
        });
    }

    let data = fs::read(path).map_err(|e| IoError::Read(format!("{}: {}", shown, e)))?;
    debug!(path = %shown, size = data.len(), "Loaded image file");

    Ok(Bytes::from(data))
}
