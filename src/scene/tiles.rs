use crate::projection::mercator::offset_from_origin;
use crate::projection::{
    ProjectionError, lat_to_tile_y, lon_to_tile_x, tile_edge_meters, tile_footprint_center,
};
use crate::scene::structs::{LocalPosition, ProjectionOrigin};
use serde::{Deserialize, Serialize};

/// OpenStreetMap's raster tile server.
pub const DEFAULT_TILE_URL_TEMPLATE: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Which tiles to lay under a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct TileConfig {
    pub zoom: u8,
    /// Tiles on each side of the center tile; the grid is `2 * radius + 1` tiles wide.
    pub radius: u32,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self { zoom: 19, radius: 2 }
    }
}

/// A map tile and where it sits in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileFootprint {
    pub tile_x: u32,
    pub tile_y: u32,
    pub zoom: u8,
    /// Center of the tile on the ground plane (`y == 0`).
    pub center: LocalPosition,
    pub edge_meters: f64,
}

impl TileFootprint {
    /// Fills `{z}`, `{x}` and `{y}` in a tile server URL template.
    pub fn url(&self, template: &str) -> String {
        template
            .replace("{z}", &self.zoom.to_string())
            .replace("{x}", &self.tile_x.to_string())
            .replace("{y}", &self.tile_y.to_string())
    }
}

/// Lays out the square of tiles around `origin`, in the same local frame as the photos.
///
/// The grid is `(2 * radius + 1)²` tiles, minus any that would fall off the edge of the world.
///
/// # Errors
///
/// Fails when the origin lies outside the Mercator domain or `zoom` is too large.
pub fn resolve_tiles(
    origin: &ProjectionOrigin,
    zoom: u8,
    radius: u32,
) -> Result<Vec<TileFootprint>, ProjectionError> {
    let center_x = i64::from(lon_to_tile_x(origin.longitude, zoom)?);
    let center_y = i64::from(lat_to_tile_y(origin.latitude, zoom)?);
    let grid = 1_i64 << zoom;
    let radius = i64::from(radius);
    let edge_meters = tile_edge_meters(zoom);

    let mut footprints = Vec::new();
    for tile_x in (center_x - radius)..=(center_x + radius) {
        for tile_y in (center_y - radius)..=(center_y + radius) {
            let (Ok(tile_x), Ok(tile_y)) = (u32::try_from(tile_x), u32::try_from(tile_y)) else {
                continue;
            };
            if i64::from(tile_x) >= grid || i64::from(tile_y) >= grid {
                continue;
            }
            let (merc_x, merc_y) = tile_footprint_center(tile_x, tile_y, zoom);
            let (x, z) = offset_from_origin(merc_x, merc_y, origin);
            footprints.push(TileFootprint {
                tile_x,
                tile_y,
                zoom,
                center: LocalPosition { x, y: 0.0, z },
                edge_meters,
            });
        }
    }
    Ok(footprints)
}
