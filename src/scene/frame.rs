use crate::gps::structs::{GeoTag, ImageRecord};
use crate::projection::{geodetic_to_mercator, local_position};
use crate::scene::error::FrameError;
use crate::scene::structs::{BoundingVolume, LocalPosition, ProjectionOrigin, SceneFrame};
use std::collections::BTreeMap;

/// Midpoint of the latitude/longitude bounding box of `tags`, or `None` when empty.
///
/// This is not a true geographic centroid. At the scale of a photo shoot the difference is
/// negligible; across continents it is not, and it ignores the antimeridian.
pub fn centroid<'a>(tags: impl IntoIterator<Item = &'a GeoTag>) -> Option<(f64, f64)> {
    let mut tags = tags.into_iter();
    let first = tags.next()?;
    let (mut min_lat, mut max_lat) = (first.latitude, first.latitude);
    let (mut min_lon, mut max_lon) = (first.longitude, first.longitude);
    for tag in tags {
        min_lat = min_lat.min(tag.latitude);
        max_lat = max_lat.max(tag.latitude);
        min_lon = min_lon.min(tag.longitude);
        max_lon = max_lon.max(tag.longitude);
    }
    Some(((min_lat + max_lat) / 2.0, (min_lon + max_lon) / 2.0))
}

/// Builds the local frame for a batch: origin, per-record positions and their bounds.
///
/// Records whose coordinates cannot be projected (latitude at or beyond the poles, non-finite
/// values) are left out of the centroid, the positions and the bounds, and listed in
/// [`SceneFrame::rejected`].
///
/// # Errors
///
/// [`FrameError::NoRecords`] for an empty slice and [`FrameError::NoProjectableRecords`] when
/// every record was rejected.
pub fn build_frame(records: &[ImageRecord]) -> Result<SceneFrame, FrameError> {
    if records.is_empty() {
        return Err(FrameError::NoRecords);
    }

    let mut rejected = Vec::new();
    let projectable: Vec<&GeoTag> = records
        .iter()
        .map(|record| &record.tag)
        .filter(|tag| match geodetic_to_mercator(tag.latitude, tag.longitude) {
            Ok(_) => true,
            Err(error) => {
                tracing::debug!(entry = %tag.source_name, %error, "Dropping unprojectable record");
                rejected.push(tag.source_name.clone());
                false
            }
        })
        .collect();
    rejected.sort();

    let (latitude, longitude) = centroid(projectable.iter().copied())
        .ok_or(FrameError::NoProjectableRecords(records.len()))?;
    let origin = ProjectionOrigin::new(latitude, longitude)?;

    let mut positions = BTreeMap::new();
    let mut bounds: Option<BoundingVolume> = None;
    for tag in projectable {
        let position: LocalPosition =
            local_position(tag.latitude, tag.longitude, tag.altitude_meters, &origin)?;
        match bounds.as_mut() {
            Some(bounds) => bounds.include(position),
            None => bounds = Some(BoundingVolume::around(position)),
        }
        positions.insert(tag.source_name.clone(), position);
    }
    let bounds = bounds.ok_or(FrameError::NoProjectableRecords(records.len()))?;

    Ok(SceneFrame {
        origin,
        positions,
        bounds,
        rejected,
    })
}
