//! Deploy Event Port
//!
//! The logging sink passed into every component. There is no global logger:
//! whoever builds a component decides where its events go (console, NDJSON,
//! log file, or several at once).

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::value_objects::Stage;

/// Severity for free-form messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Success,
    Warning,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Success => "SUCCESS",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// Event emitted during a deployment session
#[derive(Debug, Clone)]
pub enum DeployEvent {
    /// Session started
    SessionStarted {
        source_root: PathBuf,
        target_root: PathBuf,
        unit_count: usize,
    },

    /// A unit's pipeline started
    UnitStarted {
        unit: String,
        from_version: String,
        to_version: String,
    },

    /// A unit reached a stage
    StageReached { unit: String, stage: Stage },

    /// Backup archive written
    BackupCreated { unit: String, path: PathBuf },

    /// No prior deployment, no archive written
    BackupSkipped { unit: String },

    /// A mode change after replace failed (non-fatal)
    PermissionWarning {
        unit: String,
        path: PathBuf,
        message: String,
    },

    /// Unit deployed and verified
    UnitCompleted { unit: String, version: String },

    /// Unit pipeline stopped
    UnitFailed {
        unit: String,
        stage: Stage,
        kind: String,
        message: String,
    },

    /// Unit never started (session interrupted)
    UnitSkipped { unit: String, reason: String },

    /// Session completed
    SessionCompleted {
        succeeded: usize,
        failed: usize,
        skipped: usize,
    },

    /// Host restart attempted
    RestartFinished { success: bool, message: String },

    /// Version control commit attempted
    CommitFinished { committed: bool, message: String },

    /// Free-form log line
    Message { level: LogLevel, message: String },
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - ConsoleEventSink: styled progress lines in the terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - LogFileSink: plain timestamped deployment log
/// - NoopEventSink: Silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);

    /// Log a free-form message
    fn log(&self, level: LogLevel, message: &str) {
        self.on_event(DeployEvent::Message {
            level,
            message: message.to_string(),
        });
    }

    /// Check if this sink wants detailed events (e.g., per-stage)
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {
        // Do nothing
    }

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
