use crate::archive::ArchiveEntry;
use crate::extract::classify::is_candidate;
use crate::extract::extractor::extract;
use crate::extract::reader::TagReader;
use crate::gps::structs::ImageRecord;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Everything a batch run produced.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Entries with valid GPS tags, in no particular order.
    pub records: Vec<ImageRecord>,
    /// Number of entries that looked like photos, with or without GPS data.
    pub total_candidates: usize,
}

impl BatchOutcome {
    /// True when the archive held no photos at all.
    pub fn has_no_candidates(&self) -> bool {
        self.total_candidates == 0
    }

    /// True when the archive held photos but none of them carried usable GPS tags.
    pub fn has_no_gps(&self) -> bool {
        self.total_candidates > 0 && self.records.is_empty()
    }
}

/// Extracts GPS tags from every photo in `entries` concurrently.
///
/// All extractions are polled together on the current task and the function returns once every
/// one of them has settled. Each read is bounded by `timeout` from the moment the reader takes
/// it, so a stalled read delays the batch by at most `timeout` and never costs the entries
/// queued behind it.
pub async fn run_batch<R: TagReader>(
    entries: &[ArchiveEntry],
    reader: &R,
    timeout: Duration,
) -> BatchOutcome {
    let started = Instant::now();
    let candidates: Vec<&ArchiveEntry> = entries
        .iter()
        .filter(|entry| is_candidate(&entry.name, entry.is_directory))
        .collect();

    let extractions = candidates.iter().map(|entry| async move {
        extract(entry, reader, timeout)
            .await
            .map(|tag| ImageRecord::new(tag, Arc::clone(&entry.data)))
    });
    let records: Vec<ImageRecord> = join_all(extractions).await.into_iter().flatten().collect();

    tracing::info!(
        entries = entries.len(),
        candidates = candidates.len(),
        records = records.len(),
        elapsed_ms = started.elapsed().as_millis(),
        "Batch extraction finished"
    );

    BatchOutcome {
        records,
        total_candidates: candidates.len(),
    }
}
