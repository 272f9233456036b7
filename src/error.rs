use thiserror::Error;

/// The primary error type for the geoscene crate.
///
/// Only load-level failures end up here. Problems with a single archive entry are absorbed by
/// the extractor and never surface as an error.
#[derive(Error, Debug)]
pub enum GeoSceneError {
    #[error("Exiftool failed to start")]
    Exiftool(#[from] exiftool::ExifToolError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive could not be read: {0}")]
    Archive(#[from] ArchiveError),

    #[error("Scene frame could not be built: {0}")]
    Frame(#[from] crate::scene::error::FrameError),

    #[error("Invalid projection settings: {0}")]
    Projection(#[from] crate::projection::error::ProjectionError),

    #[error("Another archive is still loading")]
    LoadInProgress,
}

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Not a readable zip archive: {0}")]
    Open(#[source] zip::result::ZipError),

    #[error("Entry #{index} could not be opened: {source}")]
    Entry {
        index: usize,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Entry '{name}' could not be decompressed: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
