//! The uniform event model for developer interactions
//!
//! Every generator produces an [`IdeEvent`]: a common envelope (session,
//! trigger time and source, derived duration, IDE state at capture time)
//! wrapped around one typed payload. Payloads are serialized with an
//! embedded `eventKind` discriminator so that a log line deserializes
//! back into the correct concrete variant.

use std::hash::{Hash, Hasher};

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::name::{DocumentName, WindowName};

/// What caused an interaction to start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EventTrigger {
    /// Trigger source could not be determined
    #[default]
    Unknown,
    /// A mouse click, e.g., on a menu item or tool window button
    Click,
    /// A keyboard shortcut
    Shortcut,
    /// Regular typing in the editor
    Typing,
    /// Fired by the IDE itself without direct user interaction
    Automatic,
}

/// Lifecycle stage of a document interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentAction {
    Opened,
    Saved,
    Closing,
}

/// Lifecycle stage of a window interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowAction {
    Create,
    Activate,
    Move,
    Close,
    Deactivate,
}

/// Coarse classification of what the developer is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activity {
    Active,
    Idle,
    Typing,
}

/// Payload of a document event
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentData {
    pub action: DocumentAction,
    pub document: DocumentName,
}

/// Payload of a window event
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowData {
    pub action: WindowAction,
    pub window: WindowName,
}

/// Payload of an action or bulb-action event: the command that ran
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionData {
    pub action_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Payload of a find event
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindData {
    pub cancelled: bool,
}

/// Payload of the one-shot startup snapshot: what was open when the IDE
/// finished loading
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupStateData {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub open_windows: Vec<WindowName>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub open_documents: Vec<DocumentName>,
}

/// Payload of an error report
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stack_trace: Vec<String>,
}

/// Payload marking that collected events were exported/uploaded
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub exported_events: u64,
}

/// Payload of an activity classification event
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityData {
    pub activity: Activity,
}

/// Typed payload, discriminated by the stable `eventKind` tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "eventKind")]
pub enum EventPayload {
    #[serde(rename = "DocumentEvent")]
    Document(DocumentData),
    #[serde(rename = "WindowEvent")]
    Window(WindowData),
    #[serde(rename = "ActionEvent")]
    Action(ActionData),
    #[serde(rename = "BulbActionEvent")]
    BulbAction(ActionData),
    #[serde(rename = "FindEvent")]
    Find(FindData),
    #[serde(rename = "IDEStartupStateEvent")]
    StartupState(StartupStateData),
    #[serde(rename = "ErrorEvent")]
    Error(ErrorData),
    #[serde(rename = "ExportEvent")]
    Export(ExportData),
    #[serde(rename = "ActivityEvent")]
    Activity(ActivityData),
}

impl EventPayload {
    /// The discriminator of this payload
    pub fn kind(&self) -> EventKind {
        match self {
            EventPayload::Document(_) => EventKind::Document,
            EventPayload::Window(_) => EventKind::Window,
            EventPayload::Action(_) => EventKind::Action,
            EventPayload::BulbAction(_) => EventKind::BulbAction,
            EventPayload::Find(_) => EventKind::Find,
            EventPayload::StartupState(_) => EventKind::StartupState,
            EventPayload::Error(_) => EventKind::Error,
            EventPayload::Export(_) => EventKind::Export,
            EventPayload::Activity(_) => EventKind::Activity,
        }
    }
}

/// Fieldless discriminator, one per payload variant
///
/// [`EventKind::as_str`] yields the exact tag string embedded in
/// serialized events, so kind-based routing and the JSON format cannot
/// drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    Document,
    Window,
    Action,
    BulbAction,
    Find,
    StartupState,
    Error,
    Export,
    Activity,
}

impl EventKind {
    /// The stable discriminator string used for JSON tagging
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Document => "DocumentEvent",
            EventKind::Window => "WindowEvent",
            EventKind::Action => "ActionEvent",
            EventKind::BulbAction => "BulbActionEvent",
            EventKind::Find => "FindEvent",
            EventKind::StartupState => "IDEStartupStateEvent",
            EventKind::Error => "ErrorEvent",
            EventKind::Export => "ExportEvent",
            EventKind::Activity => "ActivityEvent",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable record of a developer interaction
///
/// The envelope carries timing with a derived relationship between
/// duration and termination time: `triggered_at` and `duration` are the
/// backing fields, `terminated_at` is always computed as their sum.
/// Setting a termination time stores the difference instead. Both
/// accessors return `None` whenever `triggered_at` is unset, so an
/// event can never claim an end without a beginning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeEvent {
    /// Identifier of the IDE session that produced the event
    #[serde(rename = "sessionId", default, skip_serializing_if = "String::is_empty")]
    pub session_id: String,

    /// When the underlying interaction began
    #[serde(rename = "triggeredAt", default, skip_serializing_if = "Option::is_none")]
    pub triggered_at: Option<DateTime<Utc>>,

    /// What started the interaction
    #[serde(rename = "triggeredBy", default)]
    pub triggered_by: EventTrigger,

    // Backing field of the duration/terminated-at duality; only
    // meaningful while triggered_at is set.
    #[serde(
        rename = "durationMs",
        default,
        with = "duration_millis",
        skip_serializing_if = "Option::is_none"
    )]
    duration: Option<TimeDelta>,

    /// Name of the active window at capture time
    #[serde(rename = "activeWindow", default, skip_serializing_if = "Option::is_none")]
    pub active_window: Option<WindowName>,

    /// Name of the active document at capture time
    #[serde(rename = "activeDocument", default, skip_serializing_if = "Option::is_none")]
    pub active_document: Option<DocumentName>,

    /// The typed payload, tagged with `eventKind` in JSON
    #[serde(flatten)]
    pub payload: EventPayload,
}

impl IdeEvent {
    /// Create an event triggered "now" with an unknown trigger source
    pub fn new(session_id: impl Into<String>, payload: EventPayload) -> Self {
        Self {
            session_id: session_id.into(),
            triggered_at: Some(Utc::now()),
            triggered_by: EventTrigger::Unknown,
            duration: None,
            active_window: None,
            active_document: None,
            payload,
        }
    }

    /// The discriminator of this event's payload
    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    /// Elapsed time of the interaction, if both endpoints are known
    pub fn duration(&self) -> Option<TimeDelta> {
        self.triggered_at.and(self.duration)
    }

    /// End of the interaction, derived as `triggered_at + duration`
    pub fn terminated_at(&self) -> Option<DateTime<Utc>> {
        match (self.triggered_at, self.duration) {
            (Some(start), Some(duration)) => Some(start + duration),
            _ => None,
        }
    }

    /// Record the elapsed time of the interaction
    ///
    /// Without a trigger time the duration cannot be anchored to an end
    /// time, so the value is dropped.
    pub fn set_duration(&mut self, duration: TimeDelta) {
        if self.triggered_at.is_some() {
            self.duration = Some(duration);
        } else {
            log::debug!("dropping duration on event without trigger time");
        }
    }

    /// Record the end of the interaction; stores the difference to the
    /// trigger time, dropped when no trigger time is set
    pub fn set_terminated_at(&mut self, terminated_at: DateTime<Utc>) {
        match self.triggered_at {
            Some(start) => self.duration = Some(terminated_at - start),
            None => log::debug!("dropping termination time on event without trigger time"),
        }
    }

    /// Remove any recorded duration
    pub fn clear_duration(&mut self) {
        self.duration = None;
    }

    /// Serialize the event to a single JSON line (no embedded newlines)
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize an event from a JSON line
    pub fn from_json_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

impl Hash for IdeEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.session_id.hash(state);
        self.triggered_at.hash(state);
        self.triggered_by.hash(state);
        self.duration.map(|d| d.num_milliseconds()).hash(state);
        self.active_window.hash(state);
        self.active_document.hash(state);
        self.payload.hash(state);
    }
}

mod duration_millis {
    //! Durations serialize as integer milliseconds to keep log lines
    //! compact and language-neutral.

    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<TimeDelta>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(duration) => serializer.serialize_some(&duration.num_milliseconds()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<TimeDelta>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = Option::<i64>::deserialize(deserializer)?;
        Ok(millis.map(TimeDelta::milliseconds))
    }
}
