use crate::projection::{ProjectionError, geodetic_to_mercator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default lower bound for a framing camera distance, in meters.
pub const MIN_CAMERA_DISTANCE: f64 = 1.0;
/// Default upper bound for a framing camera distance, in meters.
pub const MAX_CAMERA_DISTANCE: f64 = 5000.0;

/// The reference point every local coordinate of a session is expressed against.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionOrigin {
    pub latitude: f64,
    pub longitude: f64,
    pub merc_x: f64,
    pub merc_y: f64,
}

impl ProjectionOrigin {
    /// Builds an origin at `(latitude, longitude)`, projecting it onto the Mercator plane.
    ///
    /// # Errors
    ///
    /// Fails with the same domain errors as [`geodetic_to_mercator`].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ProjectionError> {
        let (merc_x, merc_y) = geodetic_to_mercator(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
            merc_x,
            merc_y,
        })
    }
}

/// Scene coordinates in meters: `x` east, `y` up, `z` south.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct LocalPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Axis-aligned box around every position of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct BoundingVolume {
    pub min: LocalPosition,
    pub max: LocalPosition,
}

impl BoundingVolume {
    /// Zero-extent volume around a single point.
    pub fn around(point: LocalPosition) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Grows the volume to include `point`.
    pub fn include(&mut self, point: LocalPosition) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    pub fn center(&self) -> LocalPosition {
        LocalPosition {
            x: (self.min.x + self.max.x) / 2.0,
            y: (self.min.y + self.max.y) / 2.0,
            z: (self.min.z + self.max.z) / 2.0,
        }
    }

    pub fn size(&self) -> LocalPosition {
        LocalPosition {
            x: self.max.x - self.min.x,
            y: self.max.y - self.min.y,
            z: self.max.z - self.min.z,
        }
    }

    /// Length of the volume's diagonal.
    pub fn diagonal(&self) -> f64 {
        let size = self.size();
        (size.x * size.x + size.y * size.y + size.z * size.z).sqrt()
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Camera distance that keeps the whole volume in view, clamped to `[floor, ceiling]`.
    ///
    /// A single-point volume has no extent, so the floor is what keeps the camera off the point.
    pub fn camera_distance(&self, floor: f64, ceiling: f64) -> f64 {
        self.diagonal().clamp(floor, ceiling)
    }
}

/// Local frame of a loaded batch: the origin, every projected position, and their bounds.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneFrame {
    pub origin: ProjectionOrigin,
    /// Positions keyed by the source entry name.
    pub positions: BTreeMap<String, LocalPosition>,
    pub bounds: BoundingVolume,
    /// Entries dropped because their coordinates could not be projected.
    pub rejected: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: f64, y: f64, z: f64) -> LocalPosition {
        LocalPosition { x, y, z }
    }

    #[test]
    fn test_bounding_volume_grows_with_points() {
        let mut bounds = BoundingVolume::around(pos(1.0, 2.0, 3.0));
        assert!(bounds.is_degenerate());

        bounds.include(pos(-4.0, 10.0, 3.0));
        bounds.include(pos(2.0, 0.0, -1.0));

        assert_eq!(bounds.min, pos(-4.0, 0.0, -1.0));
        assert_eq!(bounds.max, pos(2.0, 10.0, 3.0));
        assert_eq!(bounds.center(), pos(-1.0, 5.0, 1.0));
        assert_eq!(bounds.size(), pos(6.0, 10.0, 4.0));
        assert!(!bounds.is_degenerate());
    }

    #[test]
    fn test_camera_distance_is_clamped() {
        let single = BoundingVolume::around(pos(5.0, 5.0, 5.0));
        assert_eq!(
            single.camera_distance(MIN_CAMERA_DISTANCE, MAX_CAMERA_DISTANCE),
            MIN_CAMERA_DISTANCE
        );

        let mut wide = BoundingVolume::around(pos(0.0, 0.0, 0.0));
        wide.include(pos(30_000.0, 0.0, 40_000.0));
        assert_eq!(
            wide.camera_distance(MIN_CAMERA_DISTANCE, MAX_CAMERA_DISTANCE),
            MAX_CAMERA_DISTANCE
        );

        let mut medium = BoundingVolume::around(pos(0.0, 0.0, 0.0));
        medium.include(pos(30.0, 0.0, 40.0));
        assert_eq!(medium.camera_distance(1.0, 5000.0), 50.0);
    }

    #[test]
    fn test_origin_rejects_pole() {
        assert!(ProjectionOrigin::new(90.0, 0.0).is_err());
        let origin = ProjectionOrigin::new(0.0, 0.0).unwrap();
        assert_eq!(origin.merc_x, 0.0);
    }
}
