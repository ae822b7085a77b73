//! Session log reader
//!
//! Reads a log file back into typed events. The reader is built to
//! coexist with a live writer: it parses whole lines in order and stops
//! at the first line that does not parse — which is exactly what a
//! torn final line of an in-progress (or crashed) write looks like.
//! Everything before that line is returned; nothing ever panics across
//! the reader boundary.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::types::IdeEvent;

use super::config::LogStoreResult;

/// Read all complete, well-formed events from the log at `path`
///
/// Open and read errors surface to the caller; a malformed or truncated
/// line ends the read early with the events parsed so far.
pub fn read_events(path: &Path) -> LogStoreResult<Vec<IdeEvent>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut events = Vec::new();

    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match IdeEvent::from_json_line(&line) {
            Ok(event) => events.push(event),
            Err(error) => {
                log::warn!(
                    "stopping read of {} at line {}: {}",
                    path.display(),
                    line_number + 1,
                    error
                );
                break;
            }
        }
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log_store::{LogStoreConfig, LogStoreError, LogWriter};
    use crate::types::{
        DocumentAction, DocumentData, DocumentName, EventPayload, WindowAction, WindowData,
        WindowName,
    };
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    fn sample_events() -> Vec<IdeEvent> {
        vec![
            IdeEvent::new(
                "session",
                EventPayload::Document(DocumentData {
                    action: DocumentAction::Opened,
                    document: DocumentName::new("Foo.cs"),
                }),
            ),
            IdeEvent::new(
                "session",
                EventPayload::Window(WindowData {
                    action: WindowAction::Activate,
                    window: WindowName::new("Editor"),
                }),
            ),
        ]
    }

    fn write_log(dir: &Path, events: &[IdeEvent]) -> std::path::PathBuf {
        let config = LogStoreConfig::new(dir);
        let mut writer = LogWriter::create(&config, "s1").unwrap();
        for event in events {
            writer.append(event).unwrap();
        }
        config.log_path("s1")
    }

    #[test]
    fn test_round_trip_preserves_order_and_subtypes() {
        let temp_dir = TempDir::new().unwrap();
        let events = sample_events();
        let path = write_log(temp_dir.path(), &events);

        let loaded = read_events(&path).unwrap();
        assert_eq!(loaded, events);
    }

    #[test]
    fn test_truncated_last_line_yields_earlier_events() {
        let temp_dir = TempDir::new().unwrap();
        let events = sample_events();
        let path = write_log(temp_dir.path(), &events);

        // Chop the file in the middle of the final record.
        let content = fs::read_to_string(&path).unwrap();
        let truncated = &content[..content.len() - 20];
        fs::write(&path, truncated).unwrap();

        let loaded = read_events(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0], events[0]);
    }

    #[test]
    fn test_malformed_line_stops_the_read() {
        let temp_dir = TempDir::new().unwrap();
        let events = sample_events();
        let path = write_log(temp_dir.path(), &events[..1]);

        let mut file = fs::OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "{{ not json").unwrap();
        drop(file);

        // A valid line after the garbage is unreachable by design.
        let mut writer = LogWriter::open(&path).unwrap();
        writer.append(&events[1]).unwrap();

        let loaded = read_events(&path).unwrap();
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn test_empty_lines_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let events = sample_events();
        let path = write_log(temp_dir.path(), &events[..1]);

        let mut file = fs::OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file).unwrap();
        drop(file);
        let mut writer = LogWriter::open(&path).unwrap();
        writer.append(&events[1]).unwrap();

        let loaded = read_events(&path).unwrap();
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn test_missing_file_surfaces_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("gone.log");

        match read_events(&missing) {
            Err(LogStoreError::Io(_)) => {}
            other => panic!("expected IO error, got {:?}", other.map(|v| v.len())),
        }
    }
}
