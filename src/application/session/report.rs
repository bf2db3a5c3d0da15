//! Session report - everything the summary, exit status and commit need

use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::domain::entities::{BackupArtifact, DeploymentResult};

/// Result of an advisory step (restart, commit)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvisoryOutcome {
    pub success: bool,
    pub message: String,
}

impl AdvisoryOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Aggregate outcome of one deployment session
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub started_at: DateTime<Local>,
    pub source_root: PathBuf,
    pub target_root: PathBuf,
    pub backup_dir: PathBuf,
    /// One entry per unit that entered the pipeline, in plan order
    pub results: Vec<DeploymentResult>,
    /// Units never started because the session was interrupted
    pub skipped: Vec<String>,
    pub interrupted: bool,
    pub restart: Option<AdvisoryOutcome>,
    pub commit: Option<AdvisoryOutcome>,
    pub log_file: Option<PathBuf>,
}

impl SessionReport {
    pub fn new(
        source_root: impl Into<PathBuf>,
        target_root: impl Into<PathBuf>,
        backup_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            started_at: Local::now(),
            source_root: source_root.into(),
            target_root: target_root.into(),
            backup_dir: backup_dir.into(),
            results: Vec::new(),
            skipped: Vec::new(),
            interrupted: false,
            restart: None,
            commit: None,
            log_file: None,
        }
    }

    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    pub fn deployed(&self) -> Vec<&DeploymentResult> {
        self.results.iter().filter(|r| r.is_success()).collect()
    }

    pub fn failed(&self) -> Vec<&DeploymentResult> {
        self.results.iter().filter(|r| !r.is_success()).collect()
    }

    pub fn backups(&self) -> Vec<&BackupArtifact> {
        self.results.iter().filter_map(|r| r.backup.as_ref()).collect()
    }

    /// Every attempted unit reached VERIFIED and nothing was cut short
    pub fn is_success(&self) -> bool {
        !self.interrupted && self.skipped.is_empty() && self.results.iter().all(|r| r.is_success())
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    /// Subject line for committing the deployed sources
    pub fn commit_subject(&self) -> String {
        let names: Vec<&str> = self.deployed().iter().map(|r| r.unit.as_str()).collect();
        format!("Deploy apps: {}", names.join(", "))
    }
}
