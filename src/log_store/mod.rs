//! Session Log Store
//!
//! Durable, human-inspectable persistence of the event stream:
//! - `LogWriter`: append-only JSON-lines writer, one per live session
//! - `read_events` / `SessionLog`: tolerant read-back of typed events
//! - `LogFileManager`: session enumeration, refresh notifications,
//!   deletion, and re-submission
//! - `anonymize` / `export_anonymized`: scrub events before upload
//!
//! # Architecture
//!
//! ```text
//! Write path:
//! ┌───────────┐ publish ┌────────────┐ append ┌──────────────────┐
//! │ Generator │────────►│ MessageBus │───────►│ <session-uuid>.log│
//! └───────────┘         └────────────┘ (sub-  │ one JSON per line │
//!                                      scriber)└──────────────────┘
//!
//! Read path (offline):
//! ┌───────────────┐ scan ┌────────────┐ read ┌─────────────────────┐
//! │ LogFileManager│─────►│ SessionLog │─────►│ listing / resubmit /│
//! └───────────────┘      └────────────┘      │ anonymized export   │
//!                                            └─────────────────────┘
//! ```

mod anonymize;
mod config;
mod manager;
mod reader;
mod session;
mod writer;

pub use anonymize::{anonymize, export_anonymized, hash_name, AnonymizerSettings};
pub use config::{LogStoreConfig, LogStoreError, LogStoreResult};
pub use manager::{resubmit_all, LogDirChange, LogFileManager};
pub use reader::read_events;
pub use session::SessionLog;
pub use writer::LogWriter;
