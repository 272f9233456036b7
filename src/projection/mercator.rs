use crate::projection::error::ProjectionError;
use crate::scene::structs::{LocalPosition, ProjectionOrigin};
use std::f64::consts::{FRAC_PI_4, PI};

/// WGS84 semi-major axis in meters, used as the radius of the spherical Web Mercator earth.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Equatorial circumference of the spherical earth. Also the width of the Mercator plane.
pub const EARTH_CIRCUMFERENCE: f64 = 2.0 * PI * EARTH_RADIUS;

/// Highest zoom level for which tile indices still fit comfortably in a `u32`.
pub const MAX_ZOOM: u8 = 30;

fn check_domain(latitude: f64, longitude: f64) -> Result<(), ProjectionError> {
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(ProjectionError::NonFinite {
            latitude,
            longitude,
        });
    }
    if latitude.abs() >= 90.0 {
        return Err(ProjectionError::LatitudeOutOfRange(latitude));
    }
    Ok(())
}

fn check_zoom(zoom: u8) -> Result<f64, ProjectionError> {
    if zoom > MAX_ZOOM {
        return Err(ProjectionError::ZoomOutOfRange(zoom));
    }
    Ok(2f64.powi(i32::from(zoom)))
}

/// Projects a geodetic coordinate onto the Web Mercator plane, in meters.
///
/// # Errors
///
/// Returns [`ProjectionError::LatitudeOutOfRange`] when `|latitude| >= 90`, where the tangent in
/// the projection is undefined, and [`ProjectionError::NonFinite`] for NaN or infinite input.
pub fn geodetic_to_mercator(latitude: f64, longitude: f64) -> Result<(f64, f64), ProjectionError> {
    check_domain(latitude, longitude)?;
    let x = EARTH_RADIUS * longitude.to_radians();
    let y = EARTH_RADIUS * (FRAC_PI_4 + latitude.to_radians() / 2.0).tan().ln();
    Ok((x, y))
}

/// Expresses a Mercator-plane point relative to `origin` as `(east, south)` offsets.
///
/// Mercator y grows north while the scene's depth axis grows south, so the north offset is
/// negated. Points and tile centers must both go through here.
pub(crate) fn offset_from_origin(
    merc_x: f64,
    merc_y: f64,
    origin: &ProjectionOrigin,
) -> (f64, f64) {
    let x = merc_x - origin.merc_x;
    let z = origin.merc_y - merc_y;
    (x, z)
}

/// Converts a geodetic coordinate plus altitude into meters relative to `origin`.
///
/// `x` points east, `y` is the altitude as-is and `z` points south.
pub fn local_position(
    latitude: f64,
    longitude: f64,
    altitude: f64,
    origin: &ProjectionOrigin,
) -> Result<LocalPosition, ProjectionError> {
    let (merc_x, merc_y) = geodetic_to_mercator(latitude, longitude)?;
    let (x, z) = offset_from_origin(merc_x, merc_y, origin);
    Ok(LocalPosition { x, y: altitude, z })
}

/// Slippy-map column containing `longitude` at `zoom`, clamped into the tile grid.
pub fn lon_to_tile_x(longitude: f64, zoom: u8) -> Result<u32, ProjectionError> {
    check_domain(0.0, longitude)?;
    let n = check_zoom(zoom)?;
    let x = ((longitude + 180.0) / 360.0 * n).floor();
    Ok(clamp_to_grid(x, n))
}

/// Slippy-map row containing `latitude` at `zoom`, clamped into the tile grid.
///
/// Rows beyond roughly ±85.05° fall outside the square Mercator plane and are clamped to the
/// first or last row.
pub fn lat_to_tile_y(latitude: f64, zoom: u8) -> Result<u32, ProjectionError> {
    check_domain(latitude, 0.0)?;
    let n = check_zoom(zoom)?;
    let lat_rad = latitude.to_radians();
    let y = ((1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * n).floor();
    Ok(clamp_to_grid(y, n))
}

fn clamp_to_grid(index: f64, n: f64) -> u32 {
    // n <= 2^30, so the cast is lossless once clamped
    index.clamp(0.0, n - 1.0) as u32
}

/// Mercator-plane center of tile `(tile_x, tile_y)` at `zoom`.
pub fn tile_footprint_center(tile_x: u32, tile_y: u32, zoom: u8) -> (f64, f64) {
    let n = 2f64.powi(i32::from(zoom));
    let half = EARTH_CIRCUMFERENCE / 2.0;
    let merc_x = (f64::from(tile_x) + 0.5) / n * EARTH_CIRCUMFERENCE - half;
    let merc_y = half - (f64::from(tile_y) + 0.5) / n * EARTH_CIRCUMFERENCE;
    (merc_x, merc_y)
}

/// Edge length in meters of a tile at `zoom`, measured at the equator.
///
/// Real ground distance shrinks with `cos(latitude)`; tiles and points share the same plane so
/// the distortion cancels out for alignment purposes.
pub fn tile_edge_meters(zoom: u8) -> f64 {
    EARTH_CIRCUMFERENCE / 2f64.powi(i32::from(zoom))
}
