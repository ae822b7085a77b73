//! Event anonymization for review and upload
//!
//! Developers inspect their sessions before submitting them, and may
//! strip identifying detail first. Anonymization mutates events in
//! place and runs strictly before export — a published or logged event
//! is never rewritten retroactively. Names are replaced by fixed-width
//! hashes: irreversible, but equal names stay equal, so interaction
//! patterns survive the scrubbing.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::Write;
use std::path::Path;

use crate::types::{DocumentName, EventPayload, IdeEvent, WindowName};
use crate::utils::atomic_write_with;

use super::config::LogStoreResult;
use super::session::SessionLog;

/// Which fields to strip before export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnonymizerSettings {
    /// Replace window and document names with irreversible hashes
    pub hide_names: bool,
    /// Remove all recorded durations
    pub hide_durations: bool,
    /// Blank the session identifier
    pub hide_session_id: bool,
}

impl AnonymizerSettings {
    /// Strip everything that can be stripped
    pub fn all() -> Self {
        Self {
            hide_names: true,
            hide_durations: true,
            hide_session_id: true,
        }
    }
}

/// Hash a name into a fixed-width, irreversible token
///
/// Stable for equal inputs within one release; cross-version stability
/// is not required since anonymization happens immediately before an
/// export.
pub fn hash_name(name: &str) -> String {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

/// Strip the configured fields from `event`, in place
pub fn anonymize(event: &mut IdeEvent, settings: &AnonymizerSettings) {
    if settings.hide_session_id {
        event.session_id.clear();
    }

    if settings.hide_durations {
        event.clear_duration();
    }

    if settings.hide_names {
        event.active_window = event
            .active_window
            .take()
            .map(|name| WindowName::new(hash_name(name.as_str())));
        event.active_document = event
            .active_document
            .take()
            .map(|name| DocumentName::new(hash_name(name.as_str())));

        match &mut event.payload {
            EventPayload::Document(data) => {
                data.document = DocumentName::new(hash_name(data.document.as_str()));
            }
            EventPayload::Window(data) => {
                data.window = WindowName::new(hash_name(data.window.as_str()));
            }
            EventPayload::StartupState(data) => {
                data.open_windows = data
                    .open_windows
                    .iter()
                    .map(|name| WindowName::new(hash_name(name.as_str())))
                    .collect();
                data.open_documents = data
                    .open_documents
                    .iter()
                    .map(|name| DocumentName::new(hash_name(name.as_str())))
                    .collect();
            }
            _ => {}
        }
    }
}

/// Write an anonymized copy of `session` to `dest` and return the
/// event count
///
/// The destination is written atomically so a crashed export never
/// leaves a half-scrubbed file behind.
pub fn export_anonymized(
    session: &SessionLog,
    settings: &AnonymizerSettings,
    dest: &Path,
) -> LogStoreResult<usize> {
    let mut events = session.read_events()?;
    for event in &mut events {
        anonymize(event, settings);
    }

    let mut content = String::new();
    for event in &events {
        content.push_str(&event.to_json_line()?);
        content.push('\n');
    }

    atomic_write_with(dest, |file| file.write_all(content.as_bytes()))?;
    Ok(events.len())
}
