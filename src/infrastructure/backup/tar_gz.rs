//! Gzipped tar backups
//!
//! Archives are named `{unit}_backup_{YYYYMMDD_HHMMSS}.tar.gz` and hold the
//! unit tree rooted at the unit name, so extracting into the apps directory
//! puts it straight back where it was.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter};
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Local};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tar::{Archive, Builder};
use walkdir::WalkDir;

use crate::domain::entities::{is_valid_unit_name, BackupArtifact, BackupOutcome};
use crate::domain::ports::BackupArchiver;
use crate::error::{AppDeployError, AppDeployResult};

pub const ARCHIVE_EXTENSION: &str = "tar.gz";

/// Suffixes tried before giving up on a free archive name
const MAX_NAME_ATTEMPTS: u32 = 1000;

#[derive(Debug, Default, Clone, Copy)]
pub struct TarGzArchiver;

impl TarGzArchiver {
    pub fn new() -> Self {
        Self
    }

    /// Archive name for `unit` at `at`; `attempt > 0` appends `_{attempt}`
    pub fn archive_name(unit: &str, at: &DateTime<Local>, attempt: u32) -> String {
        let stamp = at.format("%Y%m%d_%H%M%S");
        if attempt == 0 {
            format!("{unit}_backup_{stamp}.{ARCHIVE_EXTENSION}")
        } else {
            format!("{unit}_backup_{stamp}_{attempt}.{ARCHIVE_EXTENSION}")
        }
    }

    /// Backup with an explicit timestamp
    pub fn backup_at(
        &self,
        existing: &Path,
        backup_root: &Path,
        unit: &str,
        at: DateTime<Local>,
    ) -> AppDeployResult<BackupOutcome> {
        if !existing.exists() {
            return Ok(BackupOutcome::NothingToBackUp);
        }

        let fail = |message: String| AppDeployError::Backup {
            unit: unit.to_string(),
            message,
        };

        fs::create_dir_all(backup_root)
            .map_err(|e| fail(format!("cannot create {}: {e}", backup_root.display())))?;

        let (path, file) = Self::claim_archive(backup_root, unit, &at).map_err(&fail)?;

        if let Err(message) = Self::write_archive(file, existing, unit) {
            let _ = fs::remove_file(&path);
            return Err(fail(message));
        }

        Ok(BackupOutcome::Created(BackupArtifact {
            unit: unit.to_string(),
            path,
            created_at: at,
        }))
    }

    /// Create the archive file, never reusing an existing name
    fn claim_archive(
        backup_root: &Path,
        unit: &str,
        at: &DateTime<Local>,
    ) -> Result<(PathBuf, File), String> {
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let path = backup_root.join(Self::archive_name(unit, at, attempt));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(format!("cannot create {}: {e}", path.display())),
            }
        }
        Err(format!(
            "no free archive name for '{unit}' in {}",
            backup_root.display()
        ))
    }

    fn write_archive(file: File, existing: &Path, unit: &str) -> Result<(), String> {
        let encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        let mut builder = Builder::new(encoder);
        builder.follow_symlinks(false);

        for entry in WalkDir::new(existing).follow_links(false) {
            let entry = entry.map_err(|e| format!("walking {}: {e}", existing.display()))?;
            let relative = entry
                .path()
                .strip_prefix(existing)
                .map_err(|e| e.to_string())?;
            let name = Path::new(unit).join(relative);

            let appended = if entry.file_type().is_dir() {
                builder.append_dir(&name, entry.path())
            } else {
                builder.append_path_with_name(entry.path(), &name)
            };
            appended.map_err(|e| format!("adding {}: {e}", entry.path().display()))?;
        }

        let encoder = builder
            .into_inner()
            .map_err(|e| format!("finishing archive: {e}"))?;
        let mut writer = encoder
            .finish()
            .map_err(|e| format!("compressing archive: {e}"))?;
        io::Write::flush(&mut writer).map_err(|e| format!("flushing archive: {e}"))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| format!("syncing archive: {e}"))
    }

    /// Name of the single top-level directory the archive holds
    fn archive_root(archive: &Path) -> Result<String, String> {
        let file = File::open(archive).map_err(|e| e.to_string())?;
        let mut reader = Archive::new(GzDecoder::new(file));
        let mut root: Option<String> = None;

        for entry in reader.entries().map_err(|e| e.to_string())? {
            let entry = entry.map_err(|e| e.to_string())?;
            let path = entry.path().map_err(|e| e.to_string())?;
            let first = match path.components().next() {
                Some(Component::Normal(first)) => first.to_string_lossy().into_owned(),
                _ => return Err(format!("unexpected entry {}", path.display())),
            };
            match &root {
                None => root = Some(first),
                Some(existing) if *existing == first => {}
                Some(existing) => {
                    return Err(format!(
                        "archive holds more than one unit ('{existing}' and '{first}')"
                    ))
                }
            }
        }

        match root {
            Some(name) if is_valid_unit_name(&name) => Ok(name),
            Some(name) => Err(format!("archive root '{name}' is not a valid app name")),
            None => Err("archive is empty".to_string()),
        }
    }

    fn unit_from_archive_name(archive: &Path) -> String {
        archive
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .and_then(|n| n.split("_backup_").next().map(str::to_string))
            .unwrap_or_default()
    }
}

impl BackupArchiver for TarGzArchiver {
    fn backup(
        &self,
        existing: &Path,
        backup_root: &Path,
        unit: &str,
    ) -> AppDeployResult<BackupOutcome> {
        self.backup_at(existing, backup_root, unit, Local::now())
    }

    fn restore(&self, archive: &Path, target_root: &Path) -> AppDeployResult<PathBuf> {
        let fail = |message: String| AppDeployError::Backup {
            unit: Self::unit_from_archive_name(archive),
            message,
        };

        if !target_root.is_dir() {
            return Err(AppDeployError::TargetNotFound {
                path: target_root.to_path_buf(),
            });
        }

        let root = Self::archive_root(archive)
            .map_err(|e| fail(format!("cannot read {}: {e}", archive.display())))?;
        let restored = target_root.join(&root);

        if restored.exists() {
            fs::remove_dir_all(&restored)
                .map_err(|e| fail(format!("cannot remove {}: {e}", restored.display())))?;
        }

        let file = File::open(archive)
            .map_err(|e| fail(format!("cannot open {}: {e}", archive.display())))?;
        Archive::new(GzDecoder::new(file))
            .unpack(target_root)
            .map_err(|e| fail(format!("cannot extract {}: {e}", archive.display())))?;

        Ok(restored)
    }
}
