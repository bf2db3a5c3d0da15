//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system
//! - `backup/` - tar.gz backup archiver
//! - `events/` - Console, NDJSON, log file, and fan-out event sinks
//! - `process/` - Host restart and git committer
//! - `decision/` - Interactive and preset decision providers
//! - `lock` - Per-unit lock files

pub mod backup;
pub mod decision;
pub mod events;
pub mod fs;
pub mod lock;
pub mod process;

// Re-export for convenience
pub use backup::TarGzArchiver;
pub use decision::{InteractiveDecisions, PresetDecisions};
pub use events::{ConsoleEventSink, FanoutEventSink, JsonEventSink, LogFileSink};
pub use fs::LocalFs;
pub use lock::FileUnitLocker;
pub use process::{GitCommitter, ProcessRestarter};
