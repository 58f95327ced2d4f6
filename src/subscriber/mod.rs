//! The `subscriber` module turns inbound sensor messages into log records.
//!
//! It provides the `LogEntry` record and the `MessageLogger` handler that
//! writes each entry to a shared log file, a per-topic log file, the tracing
//! stream and stdout.

pub mod log_entry;
pub mod logger;

pub use log_entry::{LogEntry, LogPayload, topic_log_name};
pub use logger::MessageLogger;
