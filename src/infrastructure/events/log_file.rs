//! Log File Sink
//!
//! Appends one timestamped line per event to
//! `<log_dir>/deployment_<YYYYMMDD_HHMMSS>.log`. Stage transitions are
//! always recorded here, whatever the console verbosity.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Local};

use crate::domain::ports::{DeployEvent, DeployEventSink, LogLevel};

pub struct LogFileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl LogFileSink {
    /// Start a new log file for a session beginning at `started`
    pub fn create(log_dir: &Path, started: DateTime<Local>) -> io::Result<Self> {
        fs::create_dir_all(log_dir)?;
        let path = log_dir.join(format!(
            "deployment_{}.log",
            started.format("%Y%m%d_%H%M%S")
        ));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Level and plain-text message for an event
pub fn describe(event: &DeployEvent) -> (LogLevel, String) {
    match event {
        DeployEvent::SessionStarted {
            source_root,
            target_root,
            unit_count,
        } => (
            LogLevel::Info,
            format!(
                "Starting deployment of {} app(s) from {} to {}",
                unit_count,
                source_root.display(),
                target_root.display()
            ),
        ),
        DeployEvent::UnitStarted {
            unit,
            from_version,
            to_version,
        } => (
            LogLevel::Info,
            format!("Deploying {unit} ({from_version} -> {to_version})"),
        ),
        DeployEvent::StageReached { unit, stage } => {
            (LogLevel::Debug, format!("{unit}: reached {stage}"))
        }
        DeployEvent::BackupCreated { unit, path } => (
            LogLevel::Success,
            format!("Backed up {unit} to {}", path.display()),
        ),
        DeployEvent::BackupSkipped { unit } => (
            LogLevel::Info,
            format!("No existing deployment of {unit}, skipping backup"),
        ),
        DeployEvent::PermissionWarning {
            unit,
            path,
            message,
        } => (
            LogLevel::Warning,
            format!("{unit}: could not set permissions on {}: {message}", path.display()),
        ),
        DeployEvent::UnitCompleted { unit, version } => (
            LogLevel::Success,
            format!("Successfully deployed {unit} version {version}"),
        ),
        DeployEvent::UnitFailed {
            unit,
            stage,
            kind,
            message,
        } => (
            LogLevel::Error,
            format!(
                "{unit} failed at {} [{kind}]: {message}",
                stage.transition_label()
            ),
        ),
        DeployEvent::UnitSkipped { unit, reason } => {
            (LogLevel::Warning, format!("Skipped {unit}: {reason}"))
        }
        DeployEvent::SessionCompleted {
            succeeded,
            failed,
            skipped,
        } => {
            let level = if *failed == 0 && *skipped == 0 {
                LogLevel::Success
            } else {
                LogLevel::Warning
            };
            (
                level,
                format!(
                    "Deployment finished: {succeeded} deployed, {failed} failed, {skipped} skipped"
                ),
            )
        }
        DeployEvent::RestartFinished { success, message } => {
            let level = if *success {
                LogLevel::Success
            } else {
                LogLevel::Error
            };
            (level, message.clone())
        }
        DeployEvent::CommitFinished { committed, message } => {
            let level = if *committed {
                LogLevel::Success
            } else {
                LogLevel::Warning
            };
            (level, message.clone())
        }
        DeployEvent::Message { level, message } => (*level, message.clone()),
    }
}

impl DeployEventSink for LogFileSink {
    fn on_event(&self, event: DeployEvent) {
        let (level, message) = describe(&event);
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{stamp} - {level} - {message}");
        }
    }
}
