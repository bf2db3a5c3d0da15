//! Per-unit deployment outcome and backup artifact

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::domain::value_objects::Stage;
use crate::error::AppDeployError;

/// Compressed snapshot of a unit's previously deployed tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupArtifact {
    pub unit: String,
    pub path: PathBuf,
    pub created_at: DateTime<Local>,
}

impl BackupArtifact {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Result of the backup step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    Created(BackupArtifact),
    /// Nothing deployed at the target, nothing to protect
    NothingToBackUp,
}

impl BackupOutcome {
    pub fn artifact(&self) -> Option<&BackupArtifact> {
        match self {
            BackupOutcome::Created(artifact) => Some(artifact),
            BackupOutcome::NothingToBackUp => None,
        }
    }
}

/// Why and where a unit's pipeline stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureDetail {
    /// Stage whose transition failed
    pub stage: Stage,
    /// Taxonomy label (`ValidationError`, `BackupError`, ...)
    pub kind: String,
    pub message: String,
}

impl FailureDetail {
    pub fn from_error(stage: Stage, error: &AppDeployError) -> Self {
        Self {
            stage,
            kind: error.error_kind().to_string(),
            message: error.to_string(),
        }
    }
}

/// Per-unit outcome produced by the executor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentResult {
    pub unit: String,
    /// Version resolved for this deployment
    pub version: String,
    /// Last stage successfully reached
    pub stage: Stage,
    pub success: bool,
    pub error: Option<FailureDetail>,
    pub backup: Option<BackupArtifact>,
    pub source_path: PathBuf,
    pub target_path: PathBuf,
}

impl DeploymentResult {
    pub fn pending(
        unit: impl Into<String>,
        version: impl Into<String>,
        source_path: impl Into<PathBuf>,
        target_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            unit: unit.into(),
            version: version.into(),
            stage: Stage::Pending,
            success: false,
            error: None,
            backup: None,
            source_path: source_path.into(),
            target_path: target_path.into(),
        }
    }

    pub(crate) fn reach(&mut self, stage: Stage) {
        debug_assert_eq!(self.stage.next(), Some(stage), "stage skipped");
        self.stage = stage;
        self.success = stage.is_terminal();
    }

    pub(crate) fn fail(&mut self, stage: Stage, error: &AppDeployError) {
        self.success = false;
        self.error = Some(FailureDetail::from_error(stage, error));
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Stage at which the unit failed, if it did
    pub fn failed_stage(&self) -> Option<Stage> {
        self.error.as_ref().map(|e| e.stage)
    }

    /// Failed after the replace step: files moved but state is suspect
    pub fn needs_attention(&self) -> bool {
        !self.success && self.stage >= Stage::MetadataUpdated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaching_verified_marks_success() {
        let mut result = DeploymentResult::pending("a", "1.0.0", "/src/a", "/dst/a");
        for stage in &Stage::ALL[1..] {
            result.reach(*stage);
        }
        assert!(result.is_success());
        assert_eq!(result.stage, Stage::Verified);
        assert!(result.failed_stage().is_none());
    }

    #[test]
    fn failure_records_stage_and_kind() {
        let mut result = DeploymentResult::pending("a", "1.0.0", "/src/a", "/dst/a");
        let err = AppDeployError::Validation {
            path: PathBuf::from("/src/a/metadata"),
            kind: crate::error::PathKind::Directory,
        };
        result.fail(Stage::Validated, &err);
        assert!(!result.is_success());
        assert_eq!(result.stage, Stage::Pending);
        let detail = result.error.as_ref().unwrap();
        assert_eq!(detail.stage, Stage::Validated);
        assert_eq!(detail.kind, "ValidationError");
        assert!(detail.message.contains("metadata"));
        assert!(!result.needs_attention());
    }
}
