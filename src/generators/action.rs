//! Action and bulb-action event generators
//!
//! Host integrations route command execution through `wrap`: describe
//! the command, run it, record the outcome. The generator stays out of
//! the invocation itself — the closure's return value passes through
//! untouched and telemetry is emitted as a side effect, with the
//! measured execution time as the event duration. Hosts that only
//! notify after a command already ran use `report` instead.

use chrono::TimeDelta;

use crate::types::{ActionData, EventPayload, EventTrigger};

use super::GeneratorContext;

/// Generator for regular IDE commands (menu items, toolbar buttons,
/// keyboard-bound actions)
pub struct ActionEventGenerator {
    context: GeneratorContext,
}

impl ActionEventGenerator {
    pub fn new(context: GeneratorContext) -> Self {
        Self { context }
    }

    /// Execute `action` and fire one event describing the run
    pub fn wrap<R>(
        &self,
        action_id: &str,
        text: Option<&str>,
        trigger: EventTrigger,
        action: impl FnOnce() -> R,
    ) -> R {
        execute_and_fire(
            &self.context,
            EventPayload::Action(action_data(action_id, text)),
            trigger,
            action,
        )
    }

    /// Fire an event for a command that already ran
    pub fn report(&self, action_id: &str, text: Option<&str>, trigger: EventTrigger) {
        let mut event = self
            .context
            .create_event(EventPayload::Action(action_data(action_id, text)));
        event.triggered_by = trigger;
        self.context.fire(event);
    }
}

/// Generator for ReSharper-style bulb (quick-fix) actions
pub struct BulbActionEventGenerator {
    context: GeneratorContext,
}

impl BulbActionEventGenerator {
    pub fn new(context: GeneratorContext) -> Self {
        Self { context }
    }

    /// Execute the quick fix and fire one event describing the run
    pub fn wrap<R>(
        &self,
        action_id: &str,
        text: Option<&str>,
        action: impl FnOnce() -> R,
    ) -> R {
        // Bulb actions are picked from a popup menu.
        execute_and_fire(
            &self.context,
            EventPayload::BulbAction(action_data(action_id, text)),
            EventTrigger::Click,
            action,
        )
    }
}

fn action_data(action_id: &str, text: Option<&str>) -> ActionData {
    ActionData {
        action_id: action_id.to_string(),
        text: text.map(str::to_string),
    }
}

// The shared two-phase contract: describe, execute, record.
fn execute_and_fire<R>(
    context: &GeneratorContext,
    payload: EventPayload,
    trigger: EventTrigger,
    action: impl FnOnce() -> R,
) -> R {
    let mut event = context.create_event(payload);
    event.triggered_by = trigger;

    let started = std::time::Instant::now();
    let result = action();
    let elapsed = TimeDelta::from_std(started.elapsed()).unwrap_or(TimeDelta::zero());

    event.set_duration(elapsed);
    context.fire(event);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::{capturing_context, wait_for};
    use crate::types::EventKind;

    #[tokio::test]
    async fn test_wrap_returns_result_and_fires_one_event() {
        let (context, captured, _sub) = capturing_context();
        let generator = ActionEventGenerator::new(context);

        let result = generator.wrap("Edit.Undo", Some("Undo"), EventTrigger::Shortcut, || 41 + 1);
        assert_eq!(result, 42);

        wait_for(&captured, 1).await;
        let events = captured.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), EventKind::Action);
        assert_eq!(events[0].triggered_by, EventTrigger::Shortcut);
        assert!(events[0].duration().is_some());

        let EventPayload::Action(data) = &events[0].payload else {
            panic!("expected action payload");
        };
        assert_eq!(data.action_id, "Edit.Undo");
        assert_eq!(data.text.as_deref(), Some("Undo"));
    }

    #[tokio::test]
    async fn test_wrap_measures_execution_time() {
        let (context, captured, _sub) = capturing_context();
        let generator = ActionEventGenerator::new(context);

        generator.wrap("Build.BuildSolution", None, EventTrigger::Click, || {
            std::thread::sleep(std::time::Duration::from_millis(20));
        });

        wait_for(&captured, 1).await;
        let events = captured.lock().unwrap();
        let duration = events[0].duration().expect("duration must be recorded");
        assert!(duration >= TimeDelta::milliseconds(20));
    }

    #[tokio::test]
    async fn test_report_fires_without_duration() {
        let (context, captured, _sub) = capturing_context();
        let generator = ActionEventGenerator::new(context);

        generator.report("View.Output", None, EventTrigger::Click);

        wait_for(&captured, 1).await;
        let events = captured.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].duration(), None);
    }

    #[tokio::test]
    async fn test_bulb_action_is_click_triggered() {
        let (context, captured, _sub) = capturing_context();
        let generator = BulbActionEventGenerator::new(context);

        generator.wrap("QuickFix.AddUsing", Some("Add using"), || ());

        wait_for(&captured, 1).await;
        let events = captured.lock().unwrap();
        assert_eq!(events[0].kind(), EventKind::BulbAction);
        assert_eq!(events[0].triggered_by, EventTrigger::Click);
    }
}
