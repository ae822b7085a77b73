//! Utility components
//!
//! Background retry for racing host callbacks and atomic file rewrites
//! for the export path.

pub mod atomic;
pub mod retry;

pub use atomic::{atomic_write_with, cleanup_temp_files};
pub use retry::{RetryRunner, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_INTERVAL};
