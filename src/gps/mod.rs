//! GPS tag model and the normalization from raw EXIF values to validated [`GeoTag`]s.
pub mod exif;
pub mod normalize;
pub mod structs;

pub use normalize::{decimal_degrees, normalize};
pub use structs::{DirectionRef, Dms, GeoTag, ImageRecord, RawTagSet};
