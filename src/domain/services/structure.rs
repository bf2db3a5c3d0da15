//! Structure validator - checks the minimum on-disk shape of a unit
//!
//! Used twice per deployment: against the source unit before anything is
//! touched, and against the deployed copy afterwards.

use std::path::Path;

use crate::domain::entities::{DESCRIPTOR_PATH, MANIFEST_PATH};
use crate::domain::ports::{DeployEventSink, FileSystem, LogLevel};
use crate::error::{AppDeployError, AppDeployResult, PathKind};

/// Directories that must exist directly under a unit root
pub const REQUIRED_DIRS: [&str; 2] = ["default", "metadata"];

/// Files that must exist, relative to the unit root
pub const REQUIRED_FILES: [&str; 2] = [DESCRIPTOR_PATH, MANIFEST_PATH];

pub struct StructureValidator<'a, FS: FileSystem + ?Sized> {
    fs: &'a FS,
    events: &'a dyn DeployEventSink,
}

impl<'a, FS: FileSystem + ?Sized> StructureValidator<'a, FS> {
    pub fn new(fs: &'a FS, events: &'a dyn DeployEventSink) -> Self {
        Self { fs, events }
    }

    /// Fail on the first missing element, naming its full path.
    pub fn validate(&self, unit_path: &Path) -> AppDeployResult<()> {
        if !self.fs.is_dir(unit_path) {
            return Err(self.missing(unit_path, PathKind::Directory));
        }

        for dir in REQUIRED_DIRS {
            let path = unit_path.join(dir);
            if !self.fs.is_dir(&path) {
                return Err(self.missing(&path, PathKind::Directory));
            }
        }

        for file in REQUIRED_FILES {
            let path = unit_path.join(file);
            if !self.fs.is_file(&path) {
                return Err(self.missing(&path, PathKind::File));
            }
        }

        Ok(())
    }

    pub fn is_valid(&self, unit_path: &Path) -> bool {
        self.validate(unit_path).is_ok()
    }

    fn missing(&self, path: &Path, kind: PathKind) -> AppDeployError {
        self.events.log(
            LogLevel::Debug,
            &format!("structure check: missing {kind} {}", path.display()),
        );
        AppDeployError::Validation {
            path: path.to_path_buf(),
            kind,
        }
    }
}
