use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An angle split into degrees, minutes and seconds, as stored in EXIF GPS tags.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct Dms {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl Dms {
    pub const fn new(degrees: f64, minutes: f64, seconds: f64) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
        }
    }

    /// Unsigned decimal degrees. The hemisphere is applied separately.
    pub fn to_decimal(&self) -> f64 {
        self.degrees + self.minutes / 60.0 + self.seconds / 3600.0
    }

    /// Splits an unsigned decimal angle back into whole degrees, whole minutes and seconds.
    pub fn from_decimal(value: f64) -> Self {
        let degrees = value.trunc();
        let minutes_full = (value - degrees) * 60.0;
        let minutes = minutes_full.trunc();
        let seconds = (minutes_full - minutes) * 60.0;
        Self {
            degrees,
            minutes,
            seconds,
        }
    }
}

impl From<[f64; 3]> for Dms {
    fn from([degrees, minutes, seconds]: [f64; 3]) -> Self {
        Self::new(degrees, minutes, seconds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum DirectionRef {
    TrueNorth,
    MagneticNorth,
}

impl DirectionRef {
    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter.trim() {
            "T" | "t" => Some(Self::TrueNorth),
            "M" | "m" => Some(Self::MagneticNorth),
            _ => None,
        }
    }
}

/// GPS fields as handed over by a tag reader, before any validation.
///
/// Every field is optional; [`normalize`](crate::gps::normalize::normalize) is the only place
/// that looks at which ones are present.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTagSet {
    pub latitude: Option<Dms>,
    /// Hemisphere letter, `N` or `S`.
    pub latitude_ref: Option<String>,
    pub longitude: Option<Dms>,
    /// Hemisphere letter, `E` or `W`.
    pub longitude_ref: Option<String>,
    /// Unsigned altitude in meters.
    pub altitude: Option<f64>,
    /// `0` above sea level, `1` below.
    pub altitude_ref: Option<u8>,
    /// Heading in degrees clockwise from north.
    pub image_direction: Option<f64>,
    /// `T` for true north, `M` for magnetic north.
    pub image_direction_ref: Option<String>,
}

/// A validated capture location for one archive entry.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoTag {
    pub source_name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Signed altitude, `0.0` when the image carries none.
    pub altitude_meters: f64,
    /// Heading in `[0, 360)`, uncorrected for magnetic declination.
    pub heading_degrees: Option<f64>,
    /// Which north `heading_degrees` is measured from, when the image says.
    pub heading_ref: Option<DirectionRef>,
}

/// A geotagged image together with the bytes it was read from.
///
/// The bytes are shared with the archive entry, not copied.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub tag: GeoTag,
    #[serde(skip)]
    pub data: Arc<[u8]>,
}

impl ImageRecord {
    pub fn new(tag: GeoTag, data: Arc<[u8]>) -> Self {
        Self { tag, data }
    }

    pub fn name(&self) -> &str {
        &self.tag.source_name
    }

    /// File name without directories or extension, for labels.
    pub fn display_name(&self) -> &str {
        let base = self
            .tag
            .source_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default();
        base.split('.').next().unwrap_or(base)
    }
}
