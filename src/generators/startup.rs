//! Startup state generator
//!
//! Fires exactly one snapshot of the open windows and documents per
//! generator. Capture is deferred to `on_ide_ready` so that a snapshot
//! taken while the host is still restoring its session does not report
//! a half-loaded IDE; hosts without a readiness signal call
//! `capture_now` at whatever point they consider loaded.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::types::{EventPayload, EventTrigger, StartupStateData};

use super::GeneratorContext;

pub struct StartupStateGenerator {
    context: GeneratorContext,
    fired: AtomicBool,
}

impl StartupStateGenerator {
    pub fn new(context: GeneratorContext) -> Self {
        Self {
            context,
            fired: AtomicBool::new(false),
        }
    }

    /// The host finished restoring its session; capture once
    pub fn on_ide_ready(&self) {
        self.capture();
    }

    /// Capture immediately, for hosts with no readiness signal
    pub fn capture_now(&self) {
        self.capture();
    }

    fn capture(&self) {
        if self.fired.swap(true, Ordering::AcqRel) {
            return;
        }

        let probe = self.context.probe();
        let mut event = self.context.create_event(EventPayload::StartupState(StartupStateData {
            open_windows: probe.open_windows(),
            open_documents: probe.open_documents(),
        }));
        event.triggered_by = EventTrigger::Automatic;
        self.context.fire(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::{capturing_context, wait_for};
    use crate::types::EventKind;
    use std::time::Duration;

    #[tokio::test]
    async fn test_ready_signal_fires_once() {
        let (context, captured, _sub) = capturing_context();
        let generator = StartupStateGenerator::new(context);

        generator.on_ide_ready();
        generator.on_ide_ready();
        generator.capture_now();

        wait_for(&captured, 1).await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        let events = captured.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), EventKind::StartupState);
        assert_eq!(events[0].triggered_by, EventTrigger::Automatic);
    }

    #[tokio::test]
    async fn test_snapshot_mirrors_probe_state() {
        let (context, captured, _sub) = capturing_context();
        let generator = StartupStateGenerator::new(context);

        generator.on_ide_ready();

        wait_for(&captured, 1).await;
        let events = captured.lock().unwrap();
        let EventPayload::StartupState(data) = &events[0].payload else {
            panic!("expected startup payload");
        };
        assert_eq!(data.open_windows.len(), 1);
        assert_eq!(data.open_windows[0].as_str(), "Editor");
        assert_eq!(data.open_documents[0].as_str(), "Foo.cs");
    }

    #[tokio::test]
    async fn test_no_event_before_ready() {
        let (context, captured, _sub) = capturing_context();
        let _generator = StartupStateGenerator::new(context);

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(captured.lock().unwrap().is_empty());
    }
}
