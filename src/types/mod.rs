//! Data types for the IDE telemetry pipeline
//!
//! This module contains the event model shared by generators, the bus,
//! and the session log store.

mod event;
mod name;
mod visitor;

pub use event::{
    ActionData, Activity, ActivityData, DocumentAction, DocumentData, ErrorData, EventKind,
    EventPayload, EventTrigger, ExportData, FindData, IdeEvent, StartupStateData, WindowAction,
    WindowData,
};
pub use name::{DocumentName, NameInterner, WindowName};
pub use visitor::{EventVisitor, KindTally};
