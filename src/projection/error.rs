use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("Latitude {0} is outside the Web Mercator domain (|lat| < 90)")]
    LatitudeOutOfRange(f64),

    #[error("Coordinate is not a finite number: ({latitude}, {longitude})")]
    NonFinite { latitude: f64, longitude: f64 },

    #[error("Zoom level {0} is not supported (max {max})", max = crate::projection::MAX_ZOOM)]
    ZoomOutOfRange(u8),
}
