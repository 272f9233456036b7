//! Geodetic, Web-Mercator and slippy-map tile conversions.
//!
//! Everything in here is pure math. Positions and tile footprints are both derived from
//! [`geodetic_to_mercator`] against the same [`ProjectionOrigin`](crate::scene::structs::ProjectionOrigin),
//! which keeps points and tiles aligned without a calibration step.
pub mod error;
pub mod mercator;

pub use error::ProjectionError;
pub use mercator::{
    EARTH_CIRCUMFERENCE, EARTH_RADIUS, MAX_ZOOM, geodetic_to_mercator, lat_to_tile_y,
    local_position, lon_to_tile_x, tile_edge_meters, tile_footprint_center,
};
