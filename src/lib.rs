//! IDE Interaction Telemetry Pipeline
//!
//! Observes developer interactions inside a host IDE, converts them
//! into structured event records, broadcasts them through an in-process
//! publish/subscribe bus, and appends them as newline-delimited JSON to
//! per-session log files for later review, anonymization, and upload.
//!
//! # Features
//!
//! - **Uniform event model**: one envelope, nine typed payloads, stable
//!   `eventKind` discriminators, derived duration/termination timing
//! - **Typed message bus**: non-blocking publish, per-subscriber
//!   ordering, fault isolation, RAII subscriptions
//! - **Per-source generators**: documents, windows (with move
//!   debouncing), find de-duplication, wrapped command execution,
//!   one-shot startup snapshots
//! - **Durable session logs**: flush-per-line JSONL safe for concurrent
//!   readers, tolerant read-back, session enumeration, re-submission
//! - **Bounded retry**: background polling for host data that races
//!   its own callback
//!
//! # Modules
//!
//! - `types`: event model (envelope, payloads, names, visitor)
//! - `bus`: typed publish/subscribe hub
//! - `generators`: host-notification-to-event adapters
//! - `host`: the host IDE collaborator surface
//! - `log_store`: session log persistence and management
//! - `utils`: retry runner, atomic file rewrite
//!
//! # Example
//!
//! ```no_run
//! use ide_telemetry::bus::MessageBus;
//! use ide_telemetry::generators::{DocumentEventGenerator, GeneratorContext};
//! use ide_telemetry::host::StaticStateProbe;
//! use ide_telemetry::log_store::{LogFileManager, LogStoreConfig};
//! use ide_telemetry::types::DocumentName;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bus = MessageBus::new();
//!     let manager = LogFileManager::new(LogStoreConfig::new("logs"))?;
//!
//!     let context = GeneratorContext::with_random_session(bus.clone(), StaticStateProbe::empty());
//!     let _log_subscription = manager.writer_for(context.session_id())?.subscribe_to(&bus);
//!
//!     let documents = DocumentEventGenerator::new(context);
//!     documents.on_opened(DocumentName::new("Program.cs"));
//!     Ok(())
//! }
//! ```

pub mod bus;
pub mod generators;
pub mod host;
pub mod log_store;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use bus::{MessageBus, Subscription};
pub use generators::GeneratorContext;
pub use host::{IdeStateProbe, StaticStateProbe};
pub use log_store::{LogFileManager, LogStoreConfig, LogWriter, SessionLog};
pub use types::{EventKind, EventPayload, EventTrigger, IdeEvent};
pub use utils::RetryRunner;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
