use crate::gps::structs::{Dms, RawTagSet};
use serde_json::Value;

/// Reads an angle either as a plain number or as a `[degrees, minutes, seconds]` array.
fn get_dms(exif: &Value, key: &str) -> Option<Dms> {
    let value = exif.get(key)?;
    if let Some(decimal) = value.as_f64() {
        return Some(Dms::from_decimal(decimal.abs()));
    }
    match value.as_array()?.as_slice() {
        [d, m, s] => Some(Dms::new(d.as_f64()?, m.as_f64()?, s.as_f64()?)),
        _ => None,
    }
}

fn get_str(exif: &Value, key: &str) -> Option<String> {
    exif.get(key).and_then(Value::as_str).map(String::from)
}

impl RawTagSet {
    /// Maps the GPS group of a numeric (`-n`) exiftool JSON object.
    ///
    /// Angles may also be `[d, m, s]` arrays, which is how browser-side EXIF readers hand
    /// them out. Unknown or mistyped fields are left empty.
    pub fn from_numeric_exif(exif: &Value) -> Self {
        let altitude_ref = exif.get("GPSAltitudeRef").and_then(|value| {
            value
                .as_u64()
                .and_then(|flag| u8::try_from(flag).ok())
                .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        });

        Self {
            latitude: get_dms(exif, "GPSLatitude"),
            latitude_ref: get_str(exif, "GPSLatitudeRef"),
            longitude: get_dms(exif, "GPSLongitude"),
            longitude_ref: get_str(exif, "GPSLongitudeRef"),
            altitude: exif.get("GPSAltitude").and_then(Value::as_f64),
            altitude_ref,
            image_direction: exif.get("GPSImgDirection").and_then(Value::as_f64),
            image_direction_ref: get_str(exif, "GPSImgDirectionRef"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gps::normalize::normalize;
    use serde_json::json;

    #[test]
    fn test_maps_numeric_exiftool_output() {
        let exif = json!({
            "GPSLatitude": 52.379_189,
            "GPSLatitudeRef": "N",
            "GPSLongitude": 4.899_431,
            "GPSLongitudeRef": "E",
            "GPSAltitude": 10.5,
            "GPSAltitudeRef": 1,
            "GPSImgDirection": 123.45,
            "GPSImgDirectionRef": "T"
        });

        let raw = RawTagSet::from_numeric_exif(&exif);
        assert_eq!(raw.latitude_ref.as_deref(), Some("N"));
        assert_eq!(raw.altitude, Some(10.5));
        assert_eq!(raw.altitude_ref, Some(1));
        assert_eq!(raw.image_direction, Some(123.45));

        let tag = normalize("amsterdam.jpg", &raw).unwrap();
        assert!((tag.latitude - 52.379_189).abs() < 1e-9);
        assert!((tag.longitude - 4.899_431).abs() < 1e-9);
        assert_eq!(tag.altitude_meters, -10.5);
    }

    #[test]
    fn test_maps_dms_arrays() {
        let exif = json!({
            "GPSLatitude": [48, 51, 24.0],
            "GPSLatitudeRef": "N",
            "GPSLongitude": [2, 17, 35.0],
            "GPSLongitudeRef": "E",
            "GPSAltitudeRef": "0"
        });

        let raw = RawTagSet::from_numeric_exif(&exif);
        assert_eq!(raw.latitude, Some(Dms::new(48.0, 51.0, 24.0)));
        assert_eq!(raw.longitude, Some(Dms::new(2.0, 17.0, 35.0)));
        assert_eq!(raw.altitude_ref, Some(0));
        assert_eq!(raw.altitude, None);
    }

    #[test]
    fn test_ignores_malformed_fields() {
        let exif = json!({
            "GPSLatitude": [48, 51],
            "GPSLatitudeRef": 7,
            "GPSLongitude": "somewhere",
            "GPSAltitude": "high"
        });

        let raw = RawTagSet::from_numeric_exif(&exif);
        assert_eq!(raw, RawTagSet::default());
    }

    #[test]
    fn test_empty_exif_has_no_gps() {
        let raw = RawTagSet::from_numeric_exif(&json!({}));
        assert!(normalize("a.jpg", &raw).is_none());
    }
}
