//! Event generators: host notifications in, typed events out
//!
//! One generator per class of host notification. Each translates
//! host-specific callback arguments into exactly one [`IdeEvent`] per
//! logical interaction and fires it onto the bus. Generators share a
//! [`GeneratorContext`] that stamps every event with the session id and
//! the IDE state captured at trigger time; all collaborators arrive
//! through the constructor, never through ambient lookup.

mod action;
mod document;
mod find;
mod startup;
mod window;

use std::sync::Arc;

use crate::bus::MessageBus;
use crate::host::IdeStateProbe;
use crate::types::{ErrorData, EventPayload, IdeEvent};

pub use action::{ActionEventGenerator, BulbActionEventGenerator};
pub use document::DocumentEventGenerator;
pub use find::FindEventGenerator;
pub use startup::StartupStateGenerator;
pub use window::{WindowBounds, WindowEventGenerator};

/// Shared collaborators and event construction helpers for generators
#[derive(Clone)]
pub struct GeneratorContext {
    session_id: String,
    bus: MessageBus,
    probe: Arc<dyn IdeStateProbe>,
}

impl GeneratorContext {
    pub fn new(
        session_id: impl Into<String>,
        bus: MessageBus,
        probe: Arc<dyn IdeStateProbe>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            bus,
            probe,
        }
    }

    /// Context with a freshly generated session UUID
    pub fn with_random_session(bus: MessageBus, probe: Arc<dyn IdeStateProbe>) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), bus, probe)
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn bus(&self) -> &MessageBus {
        &self.bus
    }

    pub(crate) fn probe(&self) -> &Arc<dyn IdeStateProbe> {
        &self.probe
    }

    /// Build an event triggered "now", stamped with the session id and
    /// the currently active window and document
    pub fn create_event(&self, payload: EventPayload) -> IdeEvent {
        let mut event = IdeEvent::new(&self.session_id, payload);
        event.active_window = self.probe.active_window();
        event.active_document = self.probe.active_document();
        event
    }

    /// Publish a finished event
    pub fn fire(&self, event: IdeEvent) {
        self.bus.publish(event);
    }

    /// Build and immediately publish an event for `payload`
    pub fn fire_now(&self, payload: EventPayload) {
        self.fire(self.create_event(payload));
    }

    /// Publish an [`ErrorData`] event, e.g., for a failure caught at a
    /// host callback boundary
    pub fn report_error(&self, content: impl Into<String>, stack_trace: Vec<String>) {
        self.fire_now(EventPayload::Error(ErrorData {
            content: Some(content.into()),
            stack_trace,
        }));
    }
}
