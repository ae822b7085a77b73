//! Session handles over individual log files

use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{IdeEvent, KindTally};

use super::config::LogStoreResult;
use super::reader;

/// Handle over one on-disk session log
///
/// Immutable once created: a rescan of the log directory produces fresh
/// handles. Content is only read on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLog {
    session_id: String,
    path: PathBuf,
}

impl SessionLog {
    pub(crate) fn new(session_id: String, path: PathBuf) -> Self {
        Self { session_id, path }
    }

    /// UUID of the IDE session this log belongs to
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the log into its ordered event sequence
    ///
    /// Safe to call while the producing IDE is still appending; only
    /// lines complete at open time are returned.
    pub fn read_events(&self) -> LogStoreResult<Vec<IdeEvent>> {
        reader::read_events(&self.path)
    }

    /// Per-kind event counts, for session listings
    pub fn tally(&self) -> LogStoreResult<KindTally> {
        let mut tally = KindTally::new();
        for event in self.read_events()? {
            event.accept(&mut tally);
        }
        Ok(tally)
    }

    /// Size of the backing file in bytes
    pub fn approximate_size(&self) -> LogStoreResult<u64> {
        Ok(fs::metadata(&self.path)?.len())
    }

    /// Delete the backing file; the session ceases to exist
    pub fn delete(self) -> LogStoreResult<()> {
        fs::remove_file(&self.path)?;
        Ok(())
    }
}
