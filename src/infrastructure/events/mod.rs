//! Event Sink Implementations
//!
//! Provides concrete implementations of DeployEventSink:
//! - ConsoleEventSink: Human-readable progress
//! - JsonEventSink: NDJSON output for CI/automation
//! - LogFileSink: Timestamped per-session deployment log
//! - FanoutEventSink: Broadcast to several of the above

mod console;
mod fanout;
mod json;
mod log_file;

pub use console::ConsoleEventSink;
pub use fanout::FanoutEventSink;
pub use json::{event_to_json, JsonEventSink};
pub use log_file::{describe, LogFileSink};
