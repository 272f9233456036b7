//! Local scene frame and map tile placement for a loaded batch.
pub mod error;
pub mod frame;
pub mod structs;
pub mod tiles;

pub use error::FrameError;
pub use frame::{build_frame, centroid};
pub use tiles::{DEFAULT_TILE_URL_TEMPLATE, TileConfig, TileFootprint, resolve_tiles};
