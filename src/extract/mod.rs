//! Per-entry GPS extraction and the concurrent batch run over a whole archive.
pub mod batch;
pub mod classify;
pub mod extractor;
pub mod reader;
#[cfg(test)]
pub(crate) mod testing;

pub use batch::{BatchOutcome, run_batch};
pub use classify::{SUPPORTED_EXTENSIONS, is_candidate};
pub use extractor::extract;
pub use reader::{ExifToolReader, ProcessLease, TagReadError, TagReader};
