//! Find event generator
//!
//! The host fires its "find done" notification more than once for a
//! single user-initiated search. A latch collapses the duplicates: the
//! first completion while armed fires the event and disarms, duplicates
//! are swallowed, and observing the next search re-arms via `reset`.
//! The contract is "at most one event per logical search"; the host
//! offers no operation id that would allow correlating more robustly.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::types::{EventPayload, FindData};

use super::GeneratorContext;

pub struct FindEventGenerator {
    context: GeneratorContext,
    armed: AtomicBool,
}

impl FindEventGenerator {
    pub fn new(context: GeneratorContext) -> Self {
        Self {
            context,
            armed: AtomicBool::new(true),
        }
    }

    /// Host completion callback; fires once per armed period
    pub fn on_find_completed(&self, cancelled: bool) {
        if self.armed.swap(false, Ordering::AcqRel) {
            self.context
                .fire_now(EventPayload::Find(FindData { cancelled }));
        }
    }

    /// A new search was observed; the next completion fires again
    pub fn reset(&self) {
        self.armed.store(true, Ordering::Release);
    }
}
