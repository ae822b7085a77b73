//! Visitor dispatch over the event model
//!
//! Processing that spans all event variants (statistics, anonymization,
//! presentation) implements [`EventVisitor`] instead of matching on
//! [`EventPayload`] everywhere, so new processing needs no change to the
//! event types themselves. All hooks default to no-ops; implementors
//! override only the variants they care about.

use std::collections::BTreeMap;

use super::event::{
    ActionData, ActivityData, DocumentData, ErrorData, EventKind, EventPayload, ExportData,
    FindData, IdeEvent, StartupStateData, WindowData,
};

/// Per-variant processing hooks for a stream of events
#[allow(unused_variables)]
pub trait EventVisitor {
    /// Called for every event before its variant hook
    fn visit_any(&mut self, event: &IdeEvent) {}

    fn visit_document(&mut self, event: &IdeEvent, data: &DocumentData) {}
    fn visit_window(&mut self, event: &IdeEvent, data: &WindowData) {}
    fn visit_action(&mut self, event: &IdeEvent, data: &ActionData) {}
    fn visit_bulb_action(&mut self, event: &IdeEvent, data: &ActionData) {}
    fn visit_find(&mut self, event: &IdeEvent, data: &FindData) {}
    fn visit_startup_state(&mut self, event: &IdeEvent, data: &StartupStateData) {}
    fn visit_error(&mut self, event: &IdeEvent, data: &ErrorData) {}
    fn visit_export(&mut self, event: &IdeEvent, data: &ExportData) {}
    fn visit_activity(&mut self, event: &IdeEvent, data: &ActivityData) {}
}

impl IdeEvent {
    /// Dispatch this event to the matching visitor hook
    pub fn accept(&self, visitor: &mut dyn EventVisitor) {
        visitor.visit_any(self);
        match &self.payload {
            EventPayload::Document(data) => visitor.visit_document(self, data),
            EventPayload::Window(data) => visitor.visit_window(self, data),
            EventPayload::Action(data) => visitor.visit_action(self, data),
            EventPayload::BulbAction(data) => visitor.visit_bulb_action(self, data),
            EventPayload::Find(data) => visitor.visit_find(self, data),
            EventPayload::StartupState(data) => visitor.visit_startup_state(self, data),
            EventPayload::Error(data) => visitor.visit_error(self, data),
            EventPayload::Export(data) => visitor.visit_export(self, data),
            EventPayload::Activity(data) => visitor.visit_activity(self, data),
        }
    }
}

/// Counts events per [`EventKind`]; used to summarize a session log
/// for listing UIs without materializing anything beyond the counts
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KindTally {
    counts: BTreeMap<EventKind, usize>,
}

impl KindTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events seen for `kind`
    pub fn count(&self, kind: EventKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Total number of events seen
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterate non-zero counts in kind order
    pub fn iter(&self) -> impl Iterator<Item = (EventKind, usize)> + '_ {
        self.counts.iter().map(|(kind, count)| (*kind, *count))
    }
}

impl EventVisitor for KindTally {
    fn visit_any(&mut self, event: &IdeEvent) {
        *self.counts.entry(event.kind()).or_insert(0) += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::event::{DocumentAction, WindowAction};
    use crate::types::name::{DocumentName, WindowName};

    fn events() -> Vec<IdeEvent> {
        vec![
            IdeEvent::new(
                "s",
                EventPayload::Document(DocumentData {
                    action: DocumentAction::Opened,
                    document: DocumentName::new("A.cs"),
                }),
            ),
            IdeEvent::new(
                "s",
                EventPayload::Document(DocumentData {
                    action: DocumentAction::Saved,
                    document: DocumentName::new("A.cs"),
                }),
            ),
            IdeEvent::new(
                "s",
                EventPayload::Window(WindowData {
                    action: WindowAction::Activate,
                    window: WindowName::new("Editor"),
                }),
            ),
        ]
    }

    #[test]
    fn test_tally_counts_per_kind() {
        let mut tally = KindTally::new();
        for event in events() {
            event.accept(&mut tally);
        }

        assert_eq!(tally.count(EventKind::Document), 2);
        assert_eq!(tally.count(EventKind::Window), 1);
        assert_eq!(tally.count(EventKind::Find), 0);
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn test_accept_dispatches_to_variant_hook() {
        struct DocumentNames(Vec<String>);
        impl EventVisitor for DocumentNames {
            fn visit_document(&mut self, _event: &IdeEvent, data: &DocumentData) {
                self.0.push(data.document.to_string());
            }
        }

        let mut visitor = DocumentNames(Vec::new());
        for event in events() {
            event.accept(&mut visitor);
        }

        assert_eq!(visitor.0, vec!["A.cs", "A.cs"]);
    }
}
