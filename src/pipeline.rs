use crate::GeoSceneError;
use crate::archive::{ArchiveEntry, read_zip};
use crate::extract::batch::run_batch;
use crate::extract::reader::TagReader;
use crate::gps::structs::ImageRecord;
use crate::projection::{MAX_ZOOM, ProjectionError};
use crate::scene::error::FrameError;
use crate::scene::frame::build_frame;
use crate::scene::structs::{
    LocalPosition, MAX_CAMERA_DISTANCE, MIN_CAMERA_DISTANCE, SceneFrame,
};
use crate::scene::tiles::{DEFAULT_TILE_URL_TEMPLATE, TileConfig, TileFootprint, resolve_tiles};
use bon::bon;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// How long a tag reader may take on a single image before it is given up on.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(2);

/// Everything a renderer needs for one loaded archive.
///
/// A session is never modified after it is built. Loading another archive produces a new one.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Records with a position in `frame`, sorted by name.
    pub records: Vec<ImageRecord>,
    pub frame: SceneFrame,
    pub tiles: Vec<TileFootprint>,
    pub total_candidates: usize,
    pub tile_url_template: String,
}

impl Session {
    pub fn position_of(&self, name: &str) -> Option<LocalPosition> {
        self.frame.positions.get(name).copied()
    }

    pub fn tile_urls(&self) -> Vec<String> {
        self.tiles
            .iter()
            .map(|tile| tile.url(&self.tile_url_template))
            .collect()
    }

    /// Distance at which a camera sees every point, within sane limits.
    pub fn camera_distance(&self) -> f64 {
        self.frame
            .bounds
            .camera_distance(MIN_CAMERA_DISTANCE, MAX_CAMERA_DISTANCE)
    }
}

/// Result of processing one archive.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Loaded(Arc<Session>),
    /// The archive contained no photos.
    NoCandidates,
    /// The archive contained photos, but none with usable GPS data.
    NoGps { candidates: usize },
}

/// Turns photo archives into [`Session`]s.
///
/// ```rust,no_run
/// # use geoscene::{GeoPipeline, GeoSceneError, extract::ExifToolReader, pipeline::LoadOutcome};
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), GeoSceneError> {
/// let pipeline = GeoPipeline::builder()
///     .reader(ExifToolReader::builder().build()?)
///     .zoom(18)
///     .build()?;
/// let bytes = std::fs::read("assets/trip.zip")?;
/// if let LoadOutcome::Loaded(session) = pipeline.load_archive(&bytes).await? {
///     println!("{} photos placed", session.records.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct GeoPipeline<R> {
    reader: R,
    read_timeout: Duration,
    tiles: TileConfig,
    tile_url_template: String,
}

#[bon]
impl<R: TagReader> GeoPipeline<R> {
    /// Constructs a `GeoPipeline` via a builder pattern.
    ///
    /// # Builder Arguments
    ///
    /// * `reader: R` - The [`TagReader`] used for every image.
    /// * `read_timeout: Duration` - (Default: 2 seconds) How long reading a single image may take before it is skipped. Waiting for a busy reader does not count.
    /// * `zoom: u8` - (Default: `19`) Slippy-map zoom level of the ground tiles.
    /// * `tile_radius: u32` - (Default: `2`) Tiles on each side of the center tile.
    /// * `tile_url_template: String` - (Default: OpenStreetMap) URL with `{z}`, `{x}` and `{y}` placeholders.
    ///
    /// # Errors
    ///
    /// Returns [`GeoSceneError::Projection`] when `zoom` exceeds [`MAX_ZOOM`].
    #[builder]
    pub fn new(
        reader: R,
        #[builder(default = DEFAULT_READ_TIMEOUT)] read_timeout: Duration,
        #[builder(default = 19)] zoom: u8,
        #[builder(default = 2)] tile_radius: u32,
        #[builder(into, default = DEFAULT_TILE_URL_TEMPLATE.to_string())] tile_url_template: String,
    ) -> Result<Self, GeoSceneError> {
        if zoom > MAX_ZOOM {
            return Err(ProjectionError::ZoomOutOfRange(zoom).into());
        }
        Ok(Self {
            reader,
            read_timeout,
            tiles: TileConfig {
                zoom,
                radius: tile_radius,
            },
            tile_url_template,
        })
    }

    pub fn tile_config(&self) -> TileConfig {
        self.tiles
    }

    /// Reads a zip archive and processes its entries.
    ///
    /// # Errors
    ///
    /// Returns [`GeoSceneError::Archive`] when the archive cannot be opened or decompressed.
    /// Unreadable or GPS-less photos are not errors.
    pub async fn load_archive(&self, bytes: &[u8]) -> Result<LoadOutcome, GeoSceneError> {
        let entries = read_zip(bytes)?;
        self.process(&entries).await
    }

    /// Extracts, projects and tiles a set of archive entries.
    pub async fn process(&self, entries: &[ArchiveEntry]) -> Result<LoadOutcome, GeoSceneError> {
        let batch = run_batch(entries, &self.reader, self.read_timeout).await;
        if batch.has_no_candidates() {
            return Ok(LoadOutcome::NoCandidates);
        }
        if batch.has_no_gps() {
            return Ok(LoadOutcome::NoGps {
                candidates: batch.total_candidates,
            });
        }

        let frame = match build_frame(&batch.records) {
            Ok(frame) => frame,
            Err(FrameError::NoProjectableRecords(_)) => {
                return Ok(LoadOutcome::NoGps {
                    candidates: batch.total_candidates,
                });
            }
            Err(error) => return Err(error.into()),
        };
        let tiles = resolve_tiles(&frame.origin, self.tiles.zoom, self.tiles.radius)?;

        let mut records: Vec<ImageRecord> = batch
            .records
            .into_iter()
            .filter(|record| frame.positions.contains_key(record.name()))
            .collect();
        records.sort_by(|a, b| a.name().cmp(b.name()));

        Ok(LoadOutcome::Loaded(Arc::new(Session {
            records,
            frame,
            tiles,
            total_candidates: batch.total_candidates,
            tile_url_template: self.tile_url_template.clone(),
        })))
    }
}
