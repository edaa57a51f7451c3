//! Directory resolution: numeric ids to names, pointer tags to directories.

use tracing::debug;

use crate::format::tiff::{read_directory, Directory, TagValue};
use crate::format::MetadataLocation;

use super::tags::{TagDirectory, EXIF_IFD_POINTER, GPS_IFD_POINTER};
use super::{ExifData, GpsData, TagMap};

/// Rename the entries of a directory using the table of `kind`.
pub fn rename_entries(directory: &Directory, kind: TagDirectory) -> TagMap {
    directory
        .entries
        .iter()
        .map(|(&tag_id, value)| (kind.tag_name(tag_id).into_owned(), value.clone()))
        .collect()
}

/// Read the directory a pointer tag refers to.
///
/// Returns `None` when the pointer is absent or does not coerce to a
/// positive offset; no read is attempted in that case.
pub fn follow_pointer(
    data: &[u8],
    location: &MetadataLocation,
    pointer: Option<&TagValue>,
    kind: TagDirectory,
) -> Option<Directory> {
    let pointer = pointer?;
    let Some(offset) = pointer.as_offset() else {
        debug!(directory = kind.name(), value = %pointer, "Ignoring unusable IFD pointer");
        return None;
    };

    let directory = read_directory(data, location.base_offset, offset, location.byte_order());
    debug!(
        directory = kind.name(),
        offset,
        entries = directory.len(),
        "Read linked IFD"
    );
    Some(directory)
}

/// Read IFD0 and the directories it links to, producing named tags.
///
/// Exif tags are merged into the same flat map as IFD0 tags; on a name
/// collision the Exif value wins. GPS tags are kept apart.
pub fn resolve(data: &[u8], location: &MetadataLocation) -> ExifData {
    let primary = read_directory(
        data,
        location.base_offset,
        location.header.first_ifd_offset,
        location.byte_order(),
    );
    debug!(entries = primary.len(), "Read IFD0");

    let mut tags = rename_entries(&primary, TagDirectory::Primary);

    if let Some(exif) = follow_pointer(
        data,
        location,
        primary.get(EXIF_IFD_POINTER),
        TagDirectory::Exif,
    ) {
        tags.extend(rename_entries(&exif, TagDirectory::Exif));
    }

    let gps = follow_pointer(
        data,
        location,
        primary.get(GPS_IFD_POINTER),
        TagDirectory::Gps,
    )
    .map(|directory| GpsData::new(rename_entries(&directory, TagDirectory::Gps)));

    ExifData { tags, gps }
}
