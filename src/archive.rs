use crate::error::ArchiveError;
use std::io::{Cursor, Read};
use std::sync::Arc;

/// One named blob out of a photo archive.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub name: String,
    pub is_directory: bool,
    pub data: Arc<[u8]>,
}

impl ArchiveEntry {
    pub fn file(name: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            is_directory: false,
            data: data.into(),
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_directory: true,
            data: Arc::from(Vec::new()),
        }
    }
}

/// Reads every entry of a zip archive into memory.
///
/// # Errors
///
/// Returns [`ArchiveError::Open`] when `bytes` is not a readable zip container, and
/// [`ArchiveError::Entry`] or [`ArchiveError::Read`] when one of its entries cannot be
/// decompressed. Nothing is returned in that case, so a broken archive never yields a partial
/// batch.
pub fn read_zip(bytes: &[u8]) -> Result<Vec<ArchiveEntry>, ArchiveError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(ArchiveError::Open)?;
    let mut entries = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        let mut file = archive
            .by_index(index)
            .map_err(|source| ArchiveError::Entry { index, source })?;
        let name = file.name().to_string();

        if file.is_dir() {
            entries.push(ArchiveEntry::directory(name));
            continue;
        }

        let mut data = Vec::with_capacity(usize::try_from(file.size()).unwrap_or_default());
        file.read_to_end(&mut data)
            .map_err(|source| ArchiveError::Read {
                name: name.clone(),
                source,
            })?;
        entries.push(ArchiveEntry::file(name, data));
    }

    tracing::debug!(entries = entries.len(), "Read zip archive");
    Ok(entries)
}
