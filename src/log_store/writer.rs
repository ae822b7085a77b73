//! Append-only session log writer
//!
//! One writer exclusively owns the open output stream of one session's
//! log file. Every event becomes a single JSON line followed by a
//! newline, flushed immediately, so a reader opening the file while the
//! IDE is still running only ever observes whole lines — even if the
//! process dies right after a flush. Single-writer-per-file is enforced
//! by session-scoped ownership, not OS locking: the embedding plugin
//! creates exactly one writer per running session.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::bus::{MessageBus, Subscription};
use crate::types::IdeEvent;

use super::config::{LogStoreConfig, LogStoreResult};

pub struct LogWriter {
    path: PathBuf,
    stream: BufWriter<File>,
}

impl LogWriter {
    /// Open (or create) the log for `session_id` under `config` in
    /// append mode
    pub fn create(config: &LogStoreConfig, session_id: &str) -> LogStoreResult<Self> {
        fs::create_dir_all(&config.log_dir)?;
        Self::open(config.log_path(session_id))
    }

    /// Open (or create) the log at `path` in append mode
    pub fn open(path: impl Into<PathBuf>) -> LogStoreResult<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            stream: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one event as a complete JSON line and flush
    ///
    /// A serialization failure is reported for this record only; nothing
    /// reaches the file and the stream stays usable for later records.
    pub fn append(&mut self, event: &IdeEvent) -> LogStoreResult<()> {
        let mut line = event.to_json_line()?;
        line.push('\n');

        self.stream.write_all(line.as_bytes())?;
        self.stream.flush()?;
        Ok(())
    }

    /// Turn this writer into a bus subscriber persisting every published
    /// [`IdeEvent`]
    ///
    /// Events land in the file in the order this subscriber observes
    /// them, which is publish order per publisher. Append failures are
    /// logged and swallowed; a full disk must not take down dispatch to
    /// other subscribers.
    pub fn subscribe_to(self, bus: &MessageBus) -> Subscription {
        let writer = Mutex::new(self);
        bus.subscribe(move |event: IdeEvent| {
            let mut writer = writer.lock();
            if let Err(error) = writer.append(&event) {
                log::warn!(
                    "failed to append event to {}: {}",
                    writer.path().display(),
                    error
                );
            }
        })
    }
}
