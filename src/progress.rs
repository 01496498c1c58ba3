//! Watched flags per episode index.
//!
//! Progress is stored as a flat JSON object of stringified episode index to
//! boolean, e.g. `{"0": true, "1": false}`. Entries are only ever added by
//! [`reconcile`]; stale indices past the current link count are kept.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, Result};

pub type Progress = BTreeMap<String, bool>;

/// Ensures every index in `0..link_count` has an entry, defaulting to `false`.
///
/// Existing keys are never removed or overwritten.
pub fn reconcile(link_count: usize, mut existing: Progress) -> Progress {
    for index in 0..link_count {
        existing.entry(index.to_string()).or_insert(false);
    }
    existing
}

/// Parses the on-disk representation.
pub fn parse(path: &Path, bytes: &[u8]) -> Result<Progress> {
    serde_json::from_slice(bytes).map_err(|err| Error::MalformedProgress {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Reads the progress file, treating a missing file as empty.
///
/// A file that exists but does not parse is recovered as empty and logged, so
/// a corrupted file can be told apart from a collection with no progress yet.
pub fn read(path: &Path) -> Result<Progress> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Progress::new()),
        Err(err) => return Err(Error::io("read progress", path, err)),
    };
    match parse(path, &bytes) {
        Ok(progress) => Ok(progress),
        Err(err) => {
            tracing::warn!(%err, "progress file is malformed; recovering as empty");
            Ok(Progress::new())
        }
    }
}

/// Overwrites the progress file with exactly `progress`.
pub fn replace(path: &Path, progress: &Progress) -> Result<()> {
    let data = serde_json::to_vec_pretty(progress).map_err(|err| {
        Error::io(
            "serialize progress",
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidData, err),
        )
    })?;
    crate::store::write_atomic(path, &data)
}
