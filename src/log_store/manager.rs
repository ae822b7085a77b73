//! Log directory management: session enumeration, refresh
//! notifications, deletion, and re-submission

use std::fs;

use tokio::sync::broadcast;

use crate::bus::MessageBus;
use crate::utils::cleanup_temp_files;

use super::config::{LogStoreConfig, LogStoreResult};
use super::session::SessionLog;
use super::writer::LogWriter;

/// Change notification emitted by [`LogFileManager`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDirChange {
    /// The directory was rescanned; `sessions` is the current count
    Refreshed { sessions: usize },
    /// One session's log file was deleted
    Deleted { session_id: String },
}

/// Enumerates existing session logs and hands out writers for new ones
///
/// Bound UIs subscribe to [`LogFileManager::subscribe_changes`] and
/// rescan when notified, the same pattern the pipeline uses for events
/// themselves.
pub struct LogFileManager {
    config: LogStoreConfig,
    changes: broadcast::Sender<LogDirChange>,
}

impl LogFileManager {
    /// Create a manager over `config`, creating the log directory and
    /// sweeping temp-file leftovers of interrupted exports
    pub fn new(config: LogStoreConfig) -> LogStoreResult<Self> {
        fs::create_dir_all(&config.log_dir)?;
        let swept = cleanup_temp_files(&config.log_dir)?;
        if swept > 0 {
            log::debug!("removed {} stale temp file(s) from log directory", swept);
        }

        let (changes, _) = broadcast::channel(16);
        Ok(Self { config, changes })
    }

    pub fn config(&self) -> &LogStoreConfig {
        &self.config
    }

    /// One [`SessionLog`] per file matching the configured extension,
    /// sorted by file name
    pub fn sessions(&self) -> LogStoreResult<Vec<SessionLog>> {
        let mut sessions = Vec::new();

        for entry in fs::read_dir(&self.config.log_dir)? {
            let path = entry?.path();
            if let Some(session_id) = self.config.session_id_of(&path) {
                sessions.push(SessionLog::new(session_id, path));
            }
        }

        sessions.sort_by(|a, b| a.path().file_name().cmp(&b.path().file_name()));
        Ok(sessions)
    }

    /// Rescan the directory and notify change subscribers
    ///
    /// Idempotent: the result always reflects the current file set.
    pub fn refresh(&self) -> LogStoreResult<Vec<SessionLog>> {
        let sessions = self.sessions()?;
        let _ = self.changes.send(LogDirChange::Refreshed {
            sessions: sessions.len(),
        });
        Ok(sessions)
    }

    /// Receive future [`LogDirChange`] notifications
    pub fn subscribe_changes(&self) -> broadcast::Receiver<LogDirChange> {
        self.changes.subscribe()
    }

    /// Open the append-mode writer for `session_id`
    pub fn writer_for(&self, session_id: &str) -> LogStoreResult<LogWriter> {
        LogWriter::create(&self.config, session_id)
    }

    /// Delete one session's log file and notify subscribers
    pub fn delete(&self, session: SessionLog) -> LogStoreResult<()> {
        let session_id = session.session_id().to_string();
        session.delete()?;
        let _ = self.changes.send(LogDirChange::Deleted { session_id });
        Ok(())
    }

    /// Delete every known session log; returns how many were removed
    pub fn delete_all(&self) -> LogStoreResult<usize> {
        let sessions = self.sessions()?;
        let mut deleted = 0;
        for session in sessions {
            self.delete(session)?;
            deleted += 1;
        }
        Ok(deleted)
    }

    /// Combined size of all session logs in bytes
    pub fn total_size(&self) -> LogStoreResult<u64> {
        let mut total = 0;
        for session in self.sessions()? {
            total += session.approximate_size()?;
        }
        Ok(total)
    }
}

/// Republish every event from every known log onto `bus`
///
/// Events flow in session order, each session's events in log order.
/// Returns the number of events republished. Used to feed historical
/// data into a new consumer pipeline without re-instrumenting the IDE.
pub fn resubmit_all(manager: &LogFileManager, bus: &MessageBus) -> LogStoreResult<usize> {
    let mut count = 0;

    for session in manager.sessions()? {
        for event in session.read_events()? {
            bus.publish(event);
            count += 1;
        }
    }

    Ok(count)
}
