use crate::extract::reader::{TagReadError, TagReader};
use crate::gps::structs::{Dms, RawTagSet};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// What the scripted reader does for one entry name.
#[derive(Debug, Clone)]
pub(crate) enum Behavior {
    Tags(RawTagSet),
    Fail,
    Hang,
    Panic,
    Delay(Duration, RawTagSet),
}

/// In-memory [`TagReader`] driven by a per-name script. Unknown names fail.
///
/// Reads run concurrently unless the reader is [`ScriptedReader::serialized`], in which case
/// they take turns like a single exiftool process.
#[derive(Debug, Default)]
pub(crate) struct ScriptedReader {
    script: HashMap<String, Behavior>,
    turn: Option<Arc<Mutex<()>>>,
}

impl ScriptedReader {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with(mut self, name: &str, behavior: Behavior) -> Self {
        self.script.insert(name.to_string(), behavior);
        self
    }

    pub(crate) fn serialized(mut self) -> Self {
        self.turn = Some(Arc::new(Mutex::new(())));
        self
    }
}

impl TagReader for ScriptedReader {
    type Lease = Option<OwnedMutexGuard<()>>;

    async fn acquire(&self) -> Result<Self::Lease, TagReadError> {
        match &self.turn {
            Some(turn) => Ok(Some(Arc::clone(turn).lock_owned().await)),
            None => Ok(None),
        }
    }

    async fn read_tags(
        &self,
        _lease: Self::Lease,
        name: &str,
        _data: Arc<[u8]>,
    ) -> Result<RawTagSet, TagReadError> {
        match self.script.get(name) {
            Some(Behavior::Tags(raw)) => Ok(raw.clone()),
            Some(Behavior::Fail) | None => Err(TagReadError::Unsupported(name.to_string())),
            Some(Behavior::Hang) => std::future::pending().await,
            Some(Behavior::Panic) => panic!("tag reader choked on {name}"),
            Some(Behavior::Delay(delay, raw)) => {
                tokio::time::sleep(*delay).await;
                Ok(raw.clone())
            }
        }
    }
}

/// Raw tags for a signed decimal position.
pub(crate) fn raw_at(latitude: f64, longitude: f64, altitude: f64) -> RawTagSet {
    RawTagSet {
        latitude: Some(Dms::from_decimal(latitude.abs())),
        latitude_ref: Some(if latitude < 0.0 { "S" } else { "N" }.to_string()),
        longitude: Some(Dms::from_decimal(longitude.abs())),
        longitude_ref: Some(if longitude < 0.0 { "W" } else { "E" }.to_string()),
        altitude: Some(altitude.abs()),
        altitude_ref: Some(u8::from(altitude < 0.0)),
        ..RawTagSet::default()
    }
}

/// Raw tags given as degrees, minutes and seconds in the northern/eastern hemispheres.
pub(crate) fn raw_dms(latitude: [f64; 3], longitude: [f64; 3], altitude: f64) -> RawTagSet {
    RawTagSet {
        latitude: Some(Dms::from(latitude)),
        latitude_ref: Some("N".to_string()),
        longitude: Some(Dms::from(longitude)),
        longitude_ref: Some("E".to_string()),
        altitude: Some(altitude),
        altitude_ref: Some(0),
        ..RawTagSet::default()
    }
}
