use crate::archive::ArchiveEntry;
use crate::extract::classify::is_candidate;
use crate::extract::reader::{TagReadError, TagReader};
use crate::gps::normalize::normalize;
use crate::gps::structs::{GeoTag, RawTagSet};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

enum ReadFailure {
    Reader(TagReadError),
    Panicked,
    TimedOut,
}

/// Waits for the reader, then reads with `timeout` counted from the moment the read starts.
async fn read_within<R: TagReader>(
    entry: &ArchiveEntry,
    reader: &R,
    timeout: Duration,
) -> Result<RawTagSet, ReadFailure> {
    let lease = AssertUnwindSafe(reader.acquire())
        .catch_unwind()
        .await
        .map_err(|_| ReadFailure::Panicked)?
        .map_err(ReadFailure::Reader)?;

    let read = AssertUnwindSafe(reader.read_tags(lease, &entry.name, Arc::clone(&entry.data)));
    match tokio::time::timeout(timeout, read.catch_unwind()).await {
        Ok(Ok(result)) => result.map_err(ReadFailure::Reader),
        Ok(Err(_)) => Err(ReadFailure::Panicked),
        Err(_) => Err(ReadFailure::TimedOut),
    }
}

/// Reads and validates the GPS tags of a single archive entry.
///
/// Never fails: entries that are not photos, have no GPS data, make the reader error or panic,
/// or take longer than `timeout` to read all resolve to `None`. Time spent waiting for a busy
/// reader is not part of the timeout.
pub async fn extract<R: TagReader>(
    entry: &ArchiveEntry,
    reader: &R,
    timeout: Duration,
) -> Option<GeoTag> {
    if !is_candidate(&entry.name, entry.is_directory) {
        return None;
    }

    let raw = match read_within(entry, reader, timeout).await {
        Ok(raw) => raw,
        Err(ReadFailure::Reader(error)) => {
            tracing::debug!(entry = %entry.name, %error, "Tag reader could not read entry");
            return None;
        }
        Err(ReadFailure::Panicked) => {
            tracing::warn!(entry = %entry.name, "Tag reader panicked");
            return None;
        }
        Err(ReadFailure::TimedOut) => {
            tracing::warn!(
                entry = %entry.name,
                timeout_ms = timeout.as_millis(),
                "Tag reader timed out"
            );
            return None;
        }
    };

    let tag = normalize(&entry.name, &raw);
    if tag.is_none() {
        tracing::debug!(entry = %entry.name, "No GPS data");
    }
    tag
}
