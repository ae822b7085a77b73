//! Window event generator
//!
//! Create/activate/close callbacks fire directly. Move callbacks are
//! noisy: rerendering produces streams of tiny position deltas, and one
//! real drag produces dozens of significant ones. Insignificant deltas
//! (under 10 px) are discarded outright; significant ones are merged
//! into a single pending Move event that fires after the window has
//! held still for a quiet period, its duration spanning the first to
//! the last observed delta.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;

use crate::types::{EventPayload, IdeEvent, WindowAction, WindowData, WindowName};

use super::GeneratorContext;

const SIGNIFICANT_MOVE_LOWER_BOUND: i32 = 10;
const WINDOW_MOVE_QUIET_PERIOD: Duration = Duration::from_millis(150);

/// Position and size of a window as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub top: i32,
    pub left: i32,
    pub width: i32,
    pub height: i32,
}

impl WindowBounds {
    fn moved_significantly(&self, other: &WindowBounds) -> bool {
        (self.top - other.top).abs() >= SIGNIFICANT_MOVE_LOWER_BOUND
            || (self.left - other.left).abs() >= SIGNIFICANT_MOVE_LOWER_BOUND
    }

    fn resized_significantly(&self, other: &WindowBounds) -> bool {
        (self.width - other.width).abs() >= SIGNIFICANT_MOVE_LOWER_BOUND
            || (self.height - other.height).abs() >= SIGNIFICANT_MOVE_LOWER_BOUND
    }
}

struct PendingMove {
    event: IdeEvent,
    // Bumped on every merged delta; the delayed fire task only publishes
    // when its generation is still current, i.e., the window held still
    // for the whole quiet period.
    generation: u64,
}

#[derive(Default)]
struct MoveState {
    known: HashMap<WindowName, WindowBounds>,
    pending: HashMap<WindowName, PendingMove>,
    next_generation: u64,
}

pub struct WindowEventGenerator {
    context: GeneratorContext,
    handle: tokio::runtime::Handle,
    quiet_period: Duration,
    state: Arc<Mutex<MoveState>>,
}

impl WindowEventGenerator {
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime; see
    /// [`WindowEventGenerator::with_handle`].
    pub fn new(context: GeneratorContext) -> Self {
        Self::with_handle(context, tokio::runtime::Handle::current())
    }

    pub fn with_handle(context: GeneratorContext, handle: tokio::runtime::Handle) -> Self {
        Self {
            context,
            handle,
            quiet_period: WINDOW_MOVE_QUIET_PERIOD,
            state: Arc::new(Mutex::new(MoveState::default())),
        }
    }

    /// Override the move quiet period; tests shorten it
    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    pub fn on_created(&self, window: WindowName, bounds: WindowBounds) {
        self.state.lock().known.insert(window.clone(), bounds);
        self.fire(window, WindowAction::Create);
    }

    pub fn on_activated(&self, window: WindowName, bounds: WindowBounds) {
        self.state.lock().known.insert(window.clone(), bounds);
        self.fire(window, WindowAction::Activate);
        // No Deactivate is fired for the window losing focus: every
        // event already stamps the active window, so the handover is
        // visible in the stream anyway.
    }

    pub fn on_closed(&self, window: WindowName) {
        let mut state = self.state.lock();
        state.known.remove(&window);
        state.pending.remove(&window);
        drop(state);
        self.fire(window, WindowAction::Close);
    }

    /// Host move/resize callback; debounced as described in the module
    /// docs
    pub fn on_moved(&self, window: WindowName, bounds: WindowBounds) {
        let mut state = self.state.lock();

        let Some(previous) = state.known.get(&window).copied() else {
            // An unknown window gives no delta to judge significance by;
            // remember it and judge the next callback.
            state.known.insert(window, bounds);
            return;
        };

        if !previous.moved_significantly(&bounds) && !previous.resized_significantly(&bounds) {
            return;
        }

        state.known.insert(window.clone(), bounds);
        state.next_generation += 1;
        let generation = state.next_generation;

        match state.pending.get_mut(&window) {
            Some(pending) => {
                pending.event.set_terminated_at(Utc::now());
                pending.generation = generation;
            }
            None => {
                let event = self.context.create_event(EventPayload::Window(WindowData {
                    action: WindowAction::Move,
                    window: window.clone(),
                }));
                state.pending.insert(window.clone(), PendingMove { event, generation });
            }
        }
        drop(state);

        let context = self.context.clone();
        let shared = Arc::clone(&self.state);
        let quiet_period = self.quiet_period;
        self.handle.spawn(async move {
            tokio::time::sleep(quiet_period).await;

            let ready = {
                let mut state = shared.lock();
                match state.pending.get(&window) {
                    Some(pending) if pending.generation == generation => {
                        state.pending.remove(&window).map(|pending| pending.event)
                    }
                    _ => None,
                }
            };
            if let Some(event) = ready {
                context.fire(event);
            }
        });
    }

    fn fire(&self, window: WindowName, action: WindowAction) {
        self.context
            .fire_now(EventPayload::Window(WindowData { action, window }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::{capturing_context, wait_for};
    use crate::types::EventKind;

    const QUIET: Duration = Duration::from_millis(40);

    fn bounds(top: i32, left: i32) -> WindowBounds {
        WindowBounds {
            top,
            left,
            width: 800,
            height: 600,
        }
    }

    fn generator(context: GeneratorContext) -> WindowEventGenerator {
        WindowEventGenerator::new(context).with_quiet_period(QUIET)
    }

    fn move_events(captured: &crate::generators::test_support::Captured) -> Vec<IdeEvent> {
        captured
            .lock()
            .unwrap()
            .iter()
            .filter(|event| {
                matches!(
                    &event.payload,
                    EventPayload::Window(data) if data.action == WindowAction::Move
                )
            })
            .cloned()
            .collect()
    }

    #[tokio::test]
    async fn test_create_activate_close_fire_directly() {
        let (context, captured, _sub) = capturing_context();
        let generator = generator(context);
        let window = WindowName::new("Output");

        generator.on_created(window.clone(), bounds(0, 0));
        generator.on_activated(window.clone(), bounds(0, 0));
        generator.on_closed(window);

        wait_for(&captured, 3).await;
        let events = captured.lock().unwrap();
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|event| event.kind() == EventKind::Window));
    }

    #[tokio::test]
    async fn test_unknown_window_move_is_only_remembered() {
        let (context, captured, _sub) = capturing_context();
        let generator = generator(context);

        generator.on_moved(WindowName::new("Floating"), bounds(0, 0));

        tokio::time::sleep(QUIET * 3).await;
        assert!(move_events(&captured).is_empty());
    }

    #[tokio::test]
    async fn test_insignificant_move_is_discarded() {
        let (context, captured, _sub) = capturing_context();
        let generator = generator(context);
        let window = WindowName::new("Editor");

        generator.on_created(window.clone(), bounds(0, 0));
        generator.on_moved(window, bounds(3, 4));

        tokio::time::sleep(QUIET * 3).await;
        assert!(move_events(&captured).is_empty());
    }

    #[tokio::test]
    async fn test_move_burst_merges_into_one_event() {
        let (context, captured, _sub) = capturing_context();
        let generator = generator(context);
        let window = WindowName::new("Editor");

        generator.on_created(window.clone(), bounds(0, 0));
        generator.on_moved(window.clone(), bounds(20, 0));
        tokio::time::sleep(Duration::from_millis(10)).await;
        generator.on_moved(window.clone(), bounds(40, 0));
        tokio::time::sleep(Duration::from_millis(10)).await;
        generator.on_moved(window, bounds(60, 0));

        tokio::time::sleep(QUIET * 4).await;
        let moves = move_events(&captured);
        assert_eq!(moves.len(), 1);
        // The merged event spans first to last delta.
        assert!(moves[0].duration().is_some());
    }

    #[tokio::test]
    async fn test_separate_bursts_fire_separately() {
        let (context, captured, _sub) = capturing_context();
        let generator = generator(context);
        let window = WindowName::new("Editor");

        generator.on_created(window.clone(), bounds(0, 0));
        generator.on_moved(window.clone(), bounds(20, 0));
        tokio::time::sleep(QUIET * 3).await;
        generator.on_moved(window, bounds(40, 0));
        tokio::time::sleep(QUIET * 3).await;

        assert_eq!(move_events(&captured).len(), 2);
    }

    #[tokio::test]
    async fn test_significant_resize_counts_as_move() {
        let (context, captured, _sub) = capturing_context();
        let generator = generator(context);
        let window = WindowName::new("Editor");

        generator.on_created(window.clone(), bounds(0, 0));
        generator.on_moved(
            window,
            WindowBounds {
                top: 0,
                left: 0,
                width: 900,
                height: 600,
            },
        );

        tokio::time::sleep(QUIET * 3).await;
        assert_eq!(move_events(&captured).len(), 1);
    }
}
