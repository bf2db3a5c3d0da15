//! Error types for appdeploy
//!
//! Uses `thiserror` for library errors. Every pipeline failure carries the
//! unit it belongs to so the session report can attribute it.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::FsError;
use crate::domain::value_objects::Stage;

/// Result type alias for appdeploy operations
pub type AppDeployResult<T> = Result<T, AppDeployError>;

/// What kind of path the structure check expected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Directory,
    File,
}

impl std::fmt::Display for PathKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathKind::Directory => write!(f, "directory"),
            PathKind::File => write!(f, "file"),
        }
    }
}

/// Main error type for appdeploy operations
#[derive(Error, Debug)]
pub enum AppDeployError {
    /// A required directory or file is missing from a unit
    #[error("missing required {kind}: {}", path.display())]
    Validation { path: PathBuf, kind: PathKind },

    /// The descriptor could not be parsed or written back
    #[error("failed to update descriptor {}: {message}", path.display())]
    MetadataWrite { path: PathBuf, message: String },

    /// Archiving the previously deployed unit failed
    #[error("backup of '{unit}' failed: {message}")]
    Backup { unit: String, message: String },

    /// Delete or copy into the target root failed partway
    #[error("replacing '{unit}' at target failed: {message}")]
    Replace { unit: String, message: String },

    /// Files were copied but the deployed unit fails the structure check
    #[error("post-deploy verification of '{unit}' failed: missing {}", path.display())]
    PostVerify { unit: String, path: PathBuf },

    /// Another pipeline holds the lock for this unit
    #[error("unit '{unit}' is being deployed by another process")]
    UnitLocked { unit: String },

    /// Operator interrupt observed at a stage boundary
    #[error("deployment of '{unit}' interrupted before {stage}")]
    Interrupted { unit: String, stage: Stage },

    /// The same unit was added to a plan twice
    #[error("unit '{unit}' appears more than once in the deployment plan")]
    DuplicateUnit { unit: String },

    /// Source root missing
    #[error("source directory not found: {}", path.display())]
    SourceRootNotFound { path: PathBuf },

    /// Target home or target root missing
    #[error("target directory not found: {}", path.display())]
    TargetNotFound { path: PathBuf },

    /// Selection named a unit that does not exist in the source root
    #[error("unknown app '{name}' (not found in {})", source_root.display())]
    UnknownUnit { name: String, source_root: PathBuf },

    /// Source root has no deployable units
    #[error("no apps found in {}", path.display())]
    NoUnitsFound { path: PathBuf },

    /// Selection resolved to nothing
    #[error("no valid apps selected")]
    NoUnitsSelected,

    /// `--app-version` argument not in NAME=VERSION form
    #[error("invalid app version '{value}' - expected NAME=X.Y.Z")]
    InvalidAppVersion { value: String },

    /// Config file could not be parsed
    #[error("invalid config in {}: {message}", file.display())]
    Config { file: PathBuf, message: String },

    /// Service restart failed (advisory)
    #[error("restart failed: {message}")]
    Restart { message: String },

    /// Version control commit failed (advisory)
    #[error("version control error: {message}")]
    VersionControl { message: String },

    /// Deployment cancelled by the operator before it started
    #[error("deployment cancelled")]
    Cancelled,

    /// Error reported by the file system port
    #[error("file system error: {0}")]
    FileSystem(#[from] FsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppDeployError {
    /// Taxonomy label used in reports and JSON events
    pub fn error_kind(&self) -> &'static str {
        match self {
            AppDeployError::Validation { .. } => "ValidationError",
            AppDeployError::MetadataWrite { .. } => "MetadataWriteError",
            AppDeployError::Backup { .. } => "BackupError",
            AppDeployError::Replace { .. } => "ReplaceError",
            AppDeployError::PostVerify { .. } => "PostVerifyError",
            AppDeployError::UnitLocked { .. } => "UnitLockedError",
            AppDeployError::Interrupted { .. } => "InterruptedError",
            AppDeployError::DuplicateUnit { .. } => "PlanError",
            AppDeployError::SourceRootNotFound { .. }
            | AppDeployError::TargetNotFound { .. }
            | AppDeployError::UnknownUnit { .. }
            | AppDeployError::NoUnitsFound { .. }
            | AppDeployError::NoUnitsSelected
            | AppDeployError::InvalidAppVersion { .. } => "SelectionError",
            AppDeployError::Config { .. } => "ConfigError",
            AppDeployError::Restart { .. } => "RestartError",
            AppDeployError::VersionControl { .. } => "VersionControlError",
            AppDeployError::Cancelled => "Cancelled",
            AppDeployError::FileSystem(_) | AppDeployError::Io(_) => "IoError",
        }
    }
}
