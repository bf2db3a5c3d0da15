//! File-based unit locks
//!
//! One lock file per unit under `<backup_dir>/.locks/`, held with an
//! advisory exclusive lock so two deployers on the same host never run the
//! same unit's pipeline at once.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::domain::ports::{UnitLease, UnitLocker};
use crate::error::{AppDeployError, AppDeployResult};

pub struct FileUnitLocker {
    lock_dir: PathBuf,
}

impl FileUnitLocker {
    pub fn new(lock_dir: impl Into<PathBuf>) -> Self {
        Self {
            lock_dir: lock_dir.into(),
        }
    }

    /// Conventional lock directory inside a backup directory
    pub fn in_backup_dir(backup_dir: &Path) -> Self {
        Self::new(backup_dir.join(".locks"))
    }

    pub fn lock_path(&self, unit: &str) -> PathBuf {
        self.lock_dir.join(format!("{unit}.lock"))
    }
}

struct FileLease {
    file: File,
}

impl UnitLease for FileLease {}

impl Drop for FileLease {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

impl UnitLocker for FileUnitLocker {
    fn acquire(&self, unit: &str) -> AppDeployResult<Box<dyn UnitLease>> {
        fs::create_dir_all(&self.lock_dir)?;
        let file = File::create(self.lock_path(unit))?;
        file.try_lock_exclusive()
            .map_err(|_| AppDeployError::UnitLocked {
                unit: unit.to_string(),
            })?;
        Ok(Box::new(FileLease { file }))
    }
}
