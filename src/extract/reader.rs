use crate::GeoSceneError;
use crate::gps::structs::RawTagSet;
use bon::bon;
use exiftool::ExifTool;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard, oneshot};

#[derive(Error, Debug)]
pub enum TagReadError {
    #[error("Tags could not be parsed from '{0}'")]
    Unsupported(String),

    #[error("Exiftool failed to process the image")]
    Exiftool(#[from] exiftool::ExifToolError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tag reader backend failed: {0}")]
    Backend(String),
}

/// Source of raw GPS tags for an image blob.
///
/// A read happens in two steps. [`TagReader::acquire`] waits until the backend can take the
/// read, then [`TagReader::read_tags`] performs it. The extractor only bounds the second step
/// with its timeout, so a backend that handles one image at a time does not starve the entries
/// queued behind a slow one.
pub trait TagReader {
    /// Exclusive use of the backend for a single read.
    type Lease;

    /// Waits for the backend. Must resolve once the reads holding earlier leases have settled.
    fn acquire(&self) -> impl Future<Output = Result<Self::Lease, TagReadError>>;

    /// Reads one blob. Implementations do not need their own timeout. A future dropped before
    /// it resolves was abandoned by the extractor.
    fn read_tags(
        &self,
        lease: Self::Lease,
        name: &str,
        data: Arc<[u8]>,
    ) -> impl Future<Output = Result<RawTagSet, TagReadError>>;
}

type ProcessSlot = Option<Arc<ExifTool>>;

/// [`TagReader`] backed by a long-running `exiftool` process.
///
/// Blobs are spilled to a content-addressed file in `scratch_dir` because exiftool reads from
/// paths. The process answers one request at a time, so leases are handed out in order. When a
/// read is abandoned mid-response the process is given up and the next lease starts a new one.
pub struct ExifToolReader {
    executable: PathBuf,
    process: Arc<Mutex<ProcessSlot>>,
    scratch_dir: PathBuf,
}

/// Lease on the [`ExifToolReader`] process.
pub struct ProcessLease {
    slot: OwnedMutexGuard<ProcessSlot>,
    exiftool: Arc<ExifTool>,
    completed: bool,
}

impl Drop for ProcessLease {
    fn drop(&mut self) {
        if !self.completed {
            tracing::warn!("Read abandoned, discarding the exiftool process");
            *self.slot = None;
        }
    }
}

#[bon]
impl ExifToolReader {
    /// Starts the exiftool process.
    ///
    /// # Builder Arguments
    ///
    /// * `exiftool_path: Option<PathBuf>` - A specific `exiftool` executable. If `None`, `exiftool` is searched for in the system's PATH.
    /// * `scratch_dir: Option<PathBuf>` - Where blobs are written while exiftool reads them. Defaults to the OS temp directory.
    ///
    /// # Errors
    ///
    /// Fails when the `exiftool` executable cannot be found or fails to start.
    #[builder]
    pub fn new(
        exiftool_path: Option<PathBuf>,
        scratch_dir: Option<PathBuf>,
    ) -> Result<Self, GeoSceneError> {
        let executable = exiftool_path.unwrap_or_else(|| PathBuf::from("exiftool"));
        let exiftool = ExifTool::with_executable(&executable)?;
        Ok(Self {
            executable,
            process: Arc::new(Mutex::new(Some(Arc::new(exiftool)))),
            scratch_dir: scratch_dir.unwrap_or_else(std::env::temp_dir),
        })
    }
}

impl TagReader for ExifToolReader {
    type Lease = ProcessLease;

    async fn acquire(&self) -> Result<ProcessLease, TagReadError> {
        let mut slot = Arc::clone(&self.process).lock_owned().await;
        let exiftool = match (*slot).clone() {
            Some(exiftool) => exiftool,
            None => {
                tracing::info!(executable = %self.executable.display(), "Restarting exiftool");
                let exiftool = Arc::new(ExifTool::with_executable(&self.executable)?);
                *slot = Some(Arc::clone(&exiftool));
                exiftool
            }
        };
        Ok(ProcessLease {
            slot,
            exiftool,
            completed: false,
        })
    }

    async fn read_tags(
        &self,
        mut lease: ProcessLease,
        name: &str,
        data: Arc<[u8]>,
    ) -> Result<RawTagSet, TagReadError> {
        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("img")
            .to_ascii_lowercase();
        let path = self.scratch_dir.join(format!(
            "geoscene-{}.{extension}",
            blake3::hash(&data).to_hex()
        ));
        let exiftool = Arc::clone(&lease.exiftool);

        // A detached thread, so a stuck process never holds up runtime shutdown.
        let (sender, receiver) = oneshot::channel();
        std::thread::Builder::new()
            .name("geoscene-exiftool".to_string())
            .spawn(move || {
                let _ = sender.send(read_blob(&exiftool, &path, &data));
            })?;
        let result = receiver
            .await
            .map_err(|_| TagReadError::Backend("exiftool thread exited early".to_string()))?;

        lease.completed = true;
        result
    }
}

fn read_blob(exiftool: &ExifTool, path: &Path, data: &[u8]) -> Result<RawTagSet, TagReadError> {
    std::fs::write(path, data)?;
    let exif = exiftool.json(path, &["-n", "-GPS:all"]);
    if let Err(error) = std::fs::remove_file(path) {
        tracing::debug!(path = %path.display(), %error, "Could not remove scratch file");
    }
    Ok(RawTagSet::from_numeric_exif(&exif?))
}
