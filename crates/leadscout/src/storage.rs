use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::pipeline::candidate::{Candidate, CandidateRow};

/// Header written when the output file is first created. Must stay in sync
/// with the field order of [`CandidateRow`].
const COLUMNS: [&str; 8] = [
    "name",
    "address",
    "phone",
    "official_site",
    "facebook",
    "instagram",
    "linkedin",
    "lookup_handle",
];

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not prepare the output file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode a csv row: {0}")]
    Csv(#[from] csv::Error),
}

/// Writes candidate batches to a CSV destination with full-overwrite
/// semantics. Failures here are the one error class that aborts a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvStore;

impl CsvStore {
    /// Create the destination with its header if absent, including parent
    /// directories. Calling this twice leaves the file untouched.
    pub fn ensure_exists(&self, path: &Path) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        if path.exists() {
            return Ok(());
        }

        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(COLUMNS)?;
        writer.flush()?;
        info!(file = %path.display(), "output file created");
        Ok(())
    }

    /// Overwrite the destination with header plus one row per candidate, in
    /// input order. An empty batch only guarantees the headers exist.
    pub fn write(&self, path: &Path, candidates: &[Candidate]) -> Result<usize, StorageError> {
        self.ensure_exists(path)?;

        if candidates.is_empty() {
            debug!(file = %path.display(), "empty batch, leaving headers only");
            return Ok(0);
        }

        let mut writer = csv::Writer::from_path(path)?;
        for candidate in candidates {
            writer.serialize(CandidateRow::from(candidate))?;
        }
        writer.flush()?;

        Ok(candidates.len())
    }
}
