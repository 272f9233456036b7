use crate::gps::structs::{DirectionRef, Dms, GeoTag, RawTagSet};

fn is_negative_hemisphere(reference: &str) -> bool {
    matches!(reference.trim(), "S" | "s" | "W" | "w")
}

/// Signed decimal degrees for `dms`, negated for the southern and western hemispheres.
pub fn decimal_degrees(dms: &Dms, reference: &str) -> f64 {
    let value = dms.to_decimal();
    if is_negative_hemisphere(reference) {
        -value
    } else {
        value
    }
}

/// Turns raw GPS tags into a [`GeoTag`].
///
/// Returns `None` unless latitude, longitude and both hemisphere references are present. Values
/// are passed through without range checks; projection rejects the ones it cannot handle.
pub fn normalize(source_name: &str, raw: &RawTagSet) -> Option<GeoTag> {
    let (Some(latitude), Some(latitude_ref), Some(longitude), Some(longitude_ref)) = (
        raw.latitude.as_ref(),
        raw.latitude_ref.as_deref(),
        raw.longitude.as_ref(),
        raw.longitude_ref.as_deref(),
    ) else {
        return None;
    };

    let altitude_meters = match (raw.altitude, raw.altitude_ref) {
        (Some(altitude), Some(1)) => -altitude,
        (Some(altitude), _) => altitude,
        (None, _) => 0.0,
    };

    let heading_degrees = raw
        .image_direction
        .filter(|heading| heading.is_finite())
        .map(|heading| match heading.rem_euclid(360.0) {
            // Tiny negative headings round up to a full turn.
            wrapped if wrapped >= 360.0 => 0.0,
            wrapped => wrapped,
        });
    let heading_ref = raw
        .image_direction_ref
        .as_deref()
        .and_then(DirectionRef::from_letter);

    Some(GeoTag {
        source_name: source_name.to_string(),
        latitude: decimal_degrees(latitude, latitude_ref),
        longitude: decimal_degrees(longitude, longitude_ref),
        altitude_meters,
        heading_degrees,
        heading_ref,
    })
}
