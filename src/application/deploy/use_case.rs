//! Deploy Use Case
//!
//! Runs one unit through the pipeline:
//! 1. Validate the source unit's structure
//! 2. Back up the currently deployed copy (if any)
//! 3. Stamp the target version into the source descriptor
//! 4. Replace the deployed copy (delete, copy, normalize permissions)
//! 5. Verify the deployed copy's structure
//!
//! No stage is skipped. The first failing transition ends the unit and is
//! recorded in its `DeploymentResult`; nothing is rolled back.

use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::{BackupOutcome, DeploymentResult, DeploymentUnit};
use crate::domain::ports::{
    BackupArchiver, DeployEvent, DeployEventSink, FileSystem, LogLevel, NoopEventSink,
    NoopLocker, UnitLocker,
};
use crate::domain::services::{MetadataAccessor, StructureValidator};
use crate::domain::value_objects::Stage;
use crate::error::{AppDeployError, AppDeployResult};

use super::options::DeployOptions;

const DIR_MODE: u32 = 0o755;
const EXEC_MODE: u32 = 0o755;
const FILE_MODE: u32 = 0o644;

/// A failed transition: the stage it was heading for and why
type StageFailure = (Stage, AppDeployError);

/// Deploy use case - the per-unit executor
///
/// Parameterized by its ports so tests can swap in an in-memory file system
/// and a recording archiver.
pub struct DeployUseCase<FS, B>
where
    FS: FileSystem,
    B: BackupArchiver,
{
    file_system: FS,
    archiver: B,
    locker: Box<dyn UnitLocker>,
    events: Arc<dyn DeployEventSink>,
}

impl<FS, B> DeployUseCase<FS, B>
where
    FS: FileSystem,
    B: BackupArchiver,
{
    pub fn new(file_system: FS, archiver: B) -> Self {
        Self {
            file_system,
            archiver,
            locker: Box::new(NoopLocker),
            events: Arc::new(NoopEventSink),
        }
    }

    pub fn with_locker(mut self, locker: Box<dyn UnitLocker>) -> Self {
        self.locker = locker;
        self
    }

    pub fn with_events(mut self, events: Arc<dyn DeployEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn file_system(&self) -> &FS {
        &self.file_system
    }

    pub fn archiver(&self) -> &B {
        &self.archiver
    }

    pub fn events(&self) -> &Arc<dyn DeployEventSink> {
        &self.events
    }

    /// Deploy `unit` at `target_version`.
    ///
    /// On success the unit's current version becomes `target_version`.
    pub fn execute(
        &self,
        unit: &mut DeploymentUnit,
        target_version: &str,
        options: &DeployOptions,
    ) -> DeploymentResult {
        let target = unit.target_path(&options.target_root);
        let mut result =
            DeploymentResult::pending(unit.name(), target_version, unit.source_path(), &target);

        self.events.on_event(DeployEvent::UnitStarted {
            unit: unit.name().to_string(),
            from_version: unit.current_version().to_string(),
            to_version: target_version.to_string(),
        });

        match self.run(unit, target_version, &target, options, &mut result) {
            Ok(()) => {
                self.events.on_event(DeployEvent::UnitCompleted {
                    unit: unit.name().to_string(),
                    version: target_version.to_string(),
                });
            }
            Err((stage, err)) => {
                result.fail(stage, &err);
                self.events.on_event(DeployEvent::UnitFailed {
                    unit: unit.name().to_string(),
                    stage,
                    kind: err.error_kind().to_string(),
                    message: err.to_string(),
                });
            }
        }

        result
    }

    fn run(
        &self,
        unit: &mut DeploymentUnit,
        target_version: &str,
        target: &Path,
        options: &DeployOptions,
        result: &mut DeploymentResult,
    ) -> Result<(), StageFailure> {
        let _lease = self
            .locker
            .acquire(unit.name())
            .map_err(|e| (Stage::Validated, e))?;

        let events = self.events.as_ref();
        let validator = StructureValidator::new(&self.file_system, events);

        // PENDING -> VALIDATED
        self.checkpoint(unit, Stage::Validated, options)?;
        validator
            .validate(unit.source_path())
            .map_err(|e| (Stage::Validated, e))?;
        self.advance(result, Stage::Validated);

        // VALIDATED -> BACKED_UP
        self.checkpoint(unit, Stage::BackedUp, options)?;
        let outcome = self
            .archiver
            .backup(target, &options.backup_dir, unit.name())
            .map_err(|e| (Stage::BackedUp, e))?;
        match &outcome {
            BackupOutcome::Created(artifact) => self.events.on_event(DeployEvent::BackupCreated {
                unit: unit.name().to_string(),
                path: artifact.path.clone(),
            }),
            BackupOutcome::NothingToBackUp => self.events.on_event(DeployEvent::BackupSkipped {
                unit: unit.name().to_string(),
            }),
        }
        result.backup = outcome.artifact().cloned();
        self.advance(result, Stage::BackedUp);

        // BACKED_UP -> METADATA_UPDATED
        self.checkpoint(unit, Stage::MetadataUpdated, options)?;
        MetadataAccessor::new(&self.file_system, events)
            .write_version(unit.source_path(), target_version)
            .map_err(|e| (Stage::MetadataUpdated, e))?;
        unit.set_current_version(target_version);
        self.advance(result, Stage::MetadataUpdated);

        // METADATA_UPDATED -> REPLACED
        self.checkpoint(unit, Stage::Replaced, options)?;
        self.replace(unit, target).map_err(|e| (Stage::Replaced, e))?;
        if options.normalize_permissions {
            self.normalize_permissions(unit.name(), target, options);
        }
        self.advance(result, Stage::Replaced);

        // REPLACED -> VERIFIED; files already moved, so no interrupt check
        validator.validate(target).map_err(|e| {
            let err = match e {
                AppDeployError::Validation { path, .. } => AppDeployError::PostVerify {
                    unit: unit.name().to_string(),
                    path,
                },
                other => other,
            };
            (Stage::Verified, err)
        })?;
        self.advance(result, Stage::Verified);

        Ok(())
    }

    /// Stop before entering `next` when an interrupt was requested
    fn checkpoint(
        &self,
        unit: &DeploymentUnit,
        next: Stage,
        options: &DeployOptions,
    ) -> Result<(), StageFailure> {
        if options.is_interrupted() {
            return Err((
                next,
                AppDeployError::Interrupted {
                    unit: unit.name().to_string(),
                    stage: next,
                },
            ));
        }
        Ok(())
    }

    fn advance(&self, result: &mut DeploymentResult, stage: Stage) {
        result.reach(stage);
        if self.events.wants_detailed_events() {
            self.events.on_event(DeployEvent::StageReached {
                unit: result.unit.clone(),
                stage,
            });
        }
    }

    /// Delete-then-copy. A failure between the two leaves the unit absent
    /// at the target; the backup from the previous stage is the way back.
    fn replace(&self, unit: &DeploymentUnit, target: &Path) -> AppDeployResult<()> {
        let replace_error = |message: String| AppDeployError::Replace {
            unit: unit.name().to_string(),
            message,
        };

        if self.file_system.exists(target) {
            self.file_system
                .remove_dir_all(target)
                .map_err(|e| replace_error(format!("removing old copy: {e}")))?;
        }

        let copied = self
            .file_system
            .copy_tree(unit.source_path(), target)
            .map_err(|e| replace_error(format!("copying: {e}")))?;

        self.events.log(
            LogLevel::Debug,
            &format!("copied {copied} file(s) to {}", target.display()),
        );
        Ok(())
    }

    /// 755 for directories and scripts, 644 for everything else.
    /// Failures are warnings; they never fail the stage.
    fn normalize_permissions(&self, unit: &str, target: &Path, options: &DeployOptions) {
        let warn = |path: &Path, message: String| {
            self.events.on_event(DeployEvent::PermissionWarning {
                unit: unit.to_string(),
                path: path.to_path_buf(),
                message,
            });
        };

        if let Err(e) = self.file_system.set_mode(target, DIR_MODE) {
            warn(target, e.to_string());
        }

        let entries = match self.file_system.walk(target) {
            Ok(entries) => entries,
            Err(e) => {
                warn(target, e.to_string());
                return;
            }
        };

        for entry in entries {
            let mode = if entry.is_dir {
                DIR_MODE
            } else {
                let name = entry
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy())
                    .unwrap_or_default();
                if options.is_executable_name(&name) {
                    EXEC_MODE
                } else {
                    FILE_MODE
                }
            };
            if let Err(e) = self.file_system.set_mode(&entry.path, mode) {
                warn(&entry.path, e.to_string());
            }
        }
    }
}
