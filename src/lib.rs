//! # Geoscene
//!
//! Turn an archive of geotagged photos into a locally-consistent 3D scene.
//!
//! This crate reads the GPS tags of every photo in a zip archive, projects them with Web
//! Mercator into meters around the center of the shoot, and lays out the slippy-map tiles
//! underneath in that same frame, so a renderer can draw points and ground imagery without any
//! calibration step.
//!
//! ## Key Features
//!
//! - **Batch Extraction**: Reads tags from all photos concurrently, with a timeout per photo. Corrupt or GPS-less photos are skipped, never fatal.
//! - **Metadata Normalization**: Converts degree/minute/second tags and hemisphere letters into signed decimal degrees, signed altitude and heading.
//! - **Local Frame**: Projects every photo to `(east, up, south)` meters around the dataset center and computes the bounding volume.
//! - **Map Tiles**: Computes which tiles to fetch and where each one sits in the scene.
//! - **Sessions**: Publishes the result of each load as one immutable value, with a status channel for UIs.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use geoscene::extract::ExifToolReader;
//! use geoscene::{GeoPipeline, LoadStatus, SessionStore};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> color_eyre::Result<()> {
//!     let pipeline = GeoPipeline::builder()
//!         .reader(ExifToolReader::builder().build()?)
//!         .build()?;
//!     let store = SessionStore::new();
//!
//!     let bytes = std::fs::read("assets/trip.zip")?;
//!     if let LoadStatus::Loaded { .. } = store.load(&pipeline, &bytes).await? {
//!         let session = store.current().expect("loaded");
//!         println!("Origin: {:?}", session.frame.origin);
//!         println!("Tiles: {:?}", session.tile_urls());
//!     }
//!     Ok(())
//! }
//! ```

pub mod archive;
mod error;
pub mod extract;
pub mod gps;
pub mod pipeline;
pub mod projection;
pub mod scene;
pub mod session;

pub use error::{ArchiveError, GeoSceneError};
pub use pipeline::{GeoPipeline, LoadOutcome, Session};
pub use session::{LoadStatus, SessionStore};
