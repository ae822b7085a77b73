//! Configuration and errors for the session log store

use std::path::{Path, PathBuf};

/// Where session logs live and how their files are named
///
/// Both values are injected by the surrounding plugin's settings layer;
/// the store itself owns neither.
#[derive(Debug, Clone)]
pub struct LogStoreConfig {
    /// Directory holding one log file per IDE session
    pub log_dir: PathBuf,
    /// File suffix used both for writing new logs and filtering scans
    pub extension: String,
}

impl Default for LogStoreConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            extension: "log".to_string(),
        }
    }
}

impl LogStoreConfig {
    /// Config with a custom log directory and the default extension
    pub fn new<P: AsRef<Path>>(log_dir: P) -> Self {
        Self {
            log_dir: log_dir.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Replace the file extension (without a leading dot)
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Path of the log file for `session_id`
    pub fn log_path(&self, session_id: &str) -> PathBuf {
        self.log_dir
            .join(format!("{}.{}", session_id, self.extension))
    }

    /// The session id encoded in `path`, if it is a log of this store
    pub fn session_id_of(&self, path: &Path) -> Option<String> {
        if path.extension().and_then(|ext| ext.to_str()) != Some(self.extension.as_str()) {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        if stem.is_empty() {
            return None;
        }
        Some(stem.to_string())
    }

    /// Whether `path` matches this store's naming convention
    pub fn is_log_path(&self, path: &Path) -> bool {
        self.session_id_of(path).is_some()
    }
}

/// Result type for log store operations
pub type LogStoreResult<T> = Result<T, LogStoreError>;

/// Errors that can occur in log store operations
#[derive(Debug)]
pub enum LogStoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for LogStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogStoreError::Io(e) => write!(f, "IO error: {}", e),
            LogStoreError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for LogStoreError {}

impl From<std::io::Error> for LogStoreError {
    fn from(e: std::io::Error) -> Self {
        LogStoreError::Io(e)
    }
}

impl From<serde_json::Error> for LogStoreError {
    fn from(e: serde_json::Error) -> Self {
        LogStoreError::Json(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_path_encodes_session_and_extension() {
        let config = LogStoreConfig::new("/var/feedback").with_extension("log");
        let path = config.log_path("3b4a");
        assert_eq!(path, PathBuf::from("/var/feedback/3b4a.log"));
    }

    #[test]
    fn test_session_id_round_trip() {
        let config = LogStoreConfig::new("logs");
        let path = config.log_path("deadbeef");
        assert_eq!(config.session_id_of(&path).as_deref(), Some("deadbeef"));
    }

    #[test]
    fn test_foreign_extension_rejected() {
        let config = LogStoreConfig::new("logs");
        assert!(!config.is_log_path(Path::new("logs/notes.txt")));
        assert!(!config.is_log_path(Path::new("logs/abc")));
        assert!(config.is_log_path(Path::new("logs/abc.log")));
    }

    #[test]
    fn test_custom_extension_filters_scans() {
        let config = LogStoreConfig::new("logs").with_extension("events");
        assert!(config.is_log_path(Path::new("logs/abc.events")));
        assert!(!config.is_log_path(Path::new("logs/abc.log")));
    }
}
