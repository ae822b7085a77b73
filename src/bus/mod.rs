//! Message Bus Module
//!
//! The in-process publish/subscribe hub decoupling event generators
//! from consumers:
//! - `MessageBus`: typed publish/subscribe with publish-time filters
//! - `Subscription`: RAII registration handle (drop = unsubscribe)
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐ publish ┌──────────────┐ queue  ┌──────────────┐
//! │ Generators │────────►│ MessageBus   │───────►│ drain task   │──► handler
//! │ (UI thread)│         │ per-type     │  (one  │ (per sub-    │
//! └────────────┘         │ registry     │  mpsc  │  scription)  │
//!                        └──────────────┘  each) └──────────────┘
//! ```
//!
//! `publish` never blocks and never fails; handler faults stay inside
//! the owning drain task.

mod hub;

pub use hub::{Message, MessageBus, Subscription};
