//! Session collaborators that run after the per-unit pipelines
//!
//! Both are advisory: their failures are reported but never change a
//! unit's deployment outcome.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::AppDeployResult;

/// Restarts the application host
pub trait RestartInvoker {
    /// Restart the host under `target_home`, waiting at most `timeout`
    fn restart(&self, target_home: &Path, timeout: Duration) -> AppDeployResult<()>;
}

/// Outcome of a commit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed { summary: String },
    NothingToCommit,
    /// Version control tool not installed or not a repository
    Unavailable,
}

/// Records deployed sources in version control
pub trait VersionControl {
    /// Stage `paths` and commit them under `subject`
    fn commit(&self, paths: &[PathBuf], subject: &str) -> AppDeployResult<CommitOutcome>;
}
