//! Backup Archiver Port
//!
//! Archives a deployed unit before it is overwritten and restores archives
//! back into a target root.

use std::path::{Path, PathBuf};

use crate::domain::entities::BackupOutcome;
use crate::error::AppDeployResult;

pub trait BackupArchiver: Send + Sync {
    /// Archive `existing` (a deployed unit directory) into `backup_root`.
    ///
    /// Returns `NothingToBackUp` when `existing` does not exist. Any other
    /// failure is an `AppDeployError::Backup` and must stop the unit.
    fn backup(
        &self,
        existing: &Path,
        backup_root: &Path,
        unit: &str,
    ) -> AppDeployResult<BackupOutcome>;

    /// Extract `archive` into `target_root`; returns the restored unit path
    fn restore(&self, archive: &Path, target_root: &Path) -> AppDeployResult<PathBuf>;
}
