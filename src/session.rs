use crate::GeoSceneError;
use crate::extract::reader::TagReader;
use crate::pipeline::{GeoPipeline, LoadOutcome, Session};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

/// What a UI should show about the most recent load.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum LoadStatus {
    Idle,
    InProgress,
    Loaded { count: usize },
    EmptyNoCandidates,
    EmptyNoGps,
    Failed { message: String },
}

impl LoadStatus {
    /// A short human-readable line for a status bar.
    pub fn message(&self) -> String {
        match self {
            Self::Idle => "Choose an archive of photos to begin.".to_string(),
            Self::InProgress => "Processing archive...".to_string(),
            Self::Loaded { count } => format!("Placed {count} photos on the map."),
            Self::EmptyNoCandidates => "The archive contains no photos.".to_string(),
            Self::EmptyNoGps => "No photos with GPS data found.".to_string(),
            Self::Failed { message } => format!("Error processing archive: {message}"),
        }
    }
}

/// Holds the current [`Session`] and publishes load progress.
///
/// Only one load runs at a time. The current session is swapped in one step when a load
/// succeeds, and left alone when a load fails or finds nothing to show.
pub struct SessionStore {
    current: watch::Sender<Option<Arc<Session>>>,
    status: watch::Sender<LoadStatus>,
    loading: Mutex<()>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            current: watch::Sender::new(None),
            status: watch::Sender::new(LoadStatus::Idle),
            loading: Mutex::new(()),
        }
    }

    pub fn current(&self) -> Option<Arc<Session>> {
        self.current.borrow().clone()
    }

    pub fn status(&self) -> LoadStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<LoadStatus> {
        self.status.subscribe()
    }

    pub fn subscribe_session(&self) -> watch::Receiver<Option<Arc<Session>>> {
        self.current.subscribe()
    }

    /// Loads a zip archive through `pipeline` and publishes the result.
    ///
    /// # Errors
    ///
    /// [`GeoSceneError::LoadInProgress`] when another load has not finished yet; otherwise the
    /// pipeline's error, after publishing [`LoadStatus::Failed`].
    pub async fn load<R: TagReader>(
        &self,
        pipeline: &GeoPipeline<R>,
        bytes: &[u8],
    ) -> Result<LoadStatus, GeoSceneError> {
        let _guard = self
            .loading
            .try_lock()
            .map_err(|_| GeoSceneError::LoadInProgress)?;
        self.status.send_replace(LoadStatus::InProgress);

        let status = match pipeline.load_archive(bytes).await {
            Ok(LoadOutcome::Loaded(session)) => {
                let count = session.records.len();
                self.current.send_replace(Some(session));
                tracing::info!(count, "Session replaced");
                LoadStatus::Loaded { count }
            }
            Ok(LoadOutcome::NoCandidates) => LoadStatus::EmptyNoCandidates,
            Ok(LoadOutcome::NoGps { candidates }) => {
                tracing::info!(candidates, "No photo in the archive has GPS data");
                LoadStatus::EmptyNoGps
            }
            Err(error) => {
                tracing::error!(%error, "Archive load failed");
                self.status.send_replace(LoadStatus::Failed {
                    message: error.to_string(),
                });
                return Err(error);
            }
        };

        self.status.send_replace(status.clone());
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::tests::build_zip;
    use crate::extract::testing::{Behavior, ScriptedReader, raw_at};
    use std::time::Duration;

    fn reader() -> ScriptedReader {
        ScriptedReader::new()
            .with("a.jpg", Behavior::Tags(raw_at(51.5, -0.12, 11.0)))
            .with("b.jpg", Behavior::Tags(raw_at(51.6, -0.13, 15.0)))
            .with("plain.jpg", Behavior::Tags(Default::default()))
            .with(
                "slow.jpg",
                Behavior::Delay(Duration::from_millis(500), raw_at(1.0, 1.0, 0.0)),
            )
    }

    fn pipeline() -> GeoPipeline<ScriptedReader> {
        GeoPipeline::builder().reader(reader()).build().unwrap()
    }

    #[tokio::test]
    async fn test_successful_load_replaces_session() {
        let store = SessionStore::new();
        assert_eq!(store.status(), LoadStatus::Idle);
        assert!(store.current().is_none());

        let status = store
            .load(&pipeline(), &build_zip(&[("a.jpg", "1"), ("b.jpg", "2")]))
            .await
            .unwrap();
        assert_eq!(status, LoadStatus::Loaded { count: 2 });
        assert_eq!(store.status(), status);
        let first = store.current().expect("Session should be published");
        assert_eq!(first.records.len(), 2);

        store
            .load(&pipeline(), &build_zip(&[("a.jpg", "1")]))
            .await
            .unwrap();
        let second = store.current().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.records.len(), 1);
        assert_eq!(first.records.len(), 2, "Old session must stay intact");
    }

    #[tokio::test]
    async fn test_failed_and_empty_loads_keep_previous_session() {
        let store = SessionStore::new();
        store
            .load(&pipeline(), &build_zip(&[("a.jpg", "1")]))
            .await
            .unwrap();
        let loaded = store.current().unwrap();

        let error = store.load(&pipeline(), b"garbage").await.unwrap_err();
        assert!(matches!(error, GeoSceneError::Archive(_)));
        assert!(matches!(store.status(), LoadStatus::Failed { .. }));
        assert!(Arc::ptr_eq(&loaded, &store.current().unwrap()));

        let status = store
            .load(&pipeline(), &build_zip(&[("plain.jpg", "x")]))
            .await
            .unwrap();
        assert_eq!(status, LoadStatus::EmptyNoGps);
        assert!(Arc::ptr_eq(&loaded, &store.current().unwrap()));

        let status = store
            .load(&pipeline(), &build_zip(&[("readme.txt", "x")]))
            .await
            .unwrap();
        assert_eq!(status, LoadStatus::EmptyNoCandidates);
        assert!(Arc::ptr_eq(&loaded, &store.current().unwrap()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_load_is_refused() {
        let store = SessionStore::new();
        let pipeline = pipeline();
        let slow = build_zip(&[("slow.jpg", "1")]);
        let fast = build_zip(&[("a.jpg", "1")]);

        let (first, second) = tokio::join!(store.load(&pipeline, &slow), store.load(&pipeline, &fast));

        assert_eq!(first.unwrap(), LoadStatus::Loaded { count: 1 });
        assert!(matches!(second, Err(GeoSceneError::LoadInProgress)));
        assert_eq!(store.current().unwrap().records[0].name(), "slow.jpg");
    }

    #[tokio::test]
    async fn test_status_is_broadcast() {
        let store = SessionStore::new();
        let mut statuses = store.subscribe_status();
        let mut sessions = store.subscribe_session();

        store
            .load(&pipeline(), &build_zip(&[("a.jpg", "1")]))
            .await
            .unwrap();

        assert!(statuses.has_changed().unwrap());
        assert_eq!(*statuses.borrow_and_update(), LoadStatus::Loaded { count: 1 });
        assert!(sessions.has_changed().unwrap());
        assert!(sessions.borrow_and_update().is_some());
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(
            LoadStatus::Loaded { count: 3 }.message(),
            "Placed 3 photos on the map."
        );
        assert_eq!(
            LoadStatus::EmptyNoGps.message(),
            "No photos with GPS data found."
        );
        assert!(
            LoadStatus::Failed {
                message: "boom".to_string()
            }
            .message()
            .ends_with("boom")
        );
    }
}
