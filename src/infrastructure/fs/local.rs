//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult, TreeEntry};

/// Local file system implementation
///
/// Writes go to a temp file in the destination directory and are renamed
/// into place, so readers never see a partial file.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

fn walk_error(err: walkdir::Error) -> FsError {
    let path = err.path().map(Path::to_path_buf);
    match (err.into_io_error(), path) {
        (Some(io), Some(path)) => FsError::at(&path, io),
        (Some(io), None) => FsError::Io(io),
        (None, _) => FsError::Other("filesystem loop while walking tree".to_string()),
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        fs::read_to_string(path).map_err(|e| FsError::at(path, e))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| FsError::at(parent, e))?;

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| FsError::at(parent, e))?;
        temp.write_all(content.as_bytes())
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| FsError::at(temp.path(), e))?;

        // Keep the mode of the file being replaced
        if let Ok(meta) = fs::metadata(path) {
            let _ = fs::set_permissions(temp.path(), meta.permissions());
        }

        temp.persist(path)
            .map_err(|e| FsError::at(path, e.error))?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn list_dirs(&self, path: &Path) -> FsResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| FsError::at(path, e))? {
            let entry = entry.map_err(|e| FsError::at(path, e))?;
            if !entry.path().is_dir() {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        Ok(names)
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        fs::create_dir_all(path).map_err(|e| FsError::at(path, e))
    }

    fn remove_dir_all(&self, path: &Path) -> FsResult<()> {
        fs::remove_dir_all(path).map_err(|e| FsError::at(path, e))
    }

    fn copy_tree(&self, from: &Path, to: &Path) -> FsResult<u64> {
        let mut copied = 0;
        for entry in WalkDir::new(from).follow_links(true) {
            let entry = entry.map_err(walk_error)?;
            let relative = entry
                .path()
                .strip_prefix(from)
                .map_err(|e| FsError::Other(e.to_string()))?;
            let dest = to.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&dest).map_err(|e| FsError::at(&dest, e))?;
            } else {
                fs::copy(entry.path(), &dest).map_err(|e| FsError::at(entry.path(), e))?;
                copied += 1;
            }
        }
        Ok(copied)
    }

    fn walk(&self, root: &Path) -> FsResult<Vec<TreeEntry>> {
        WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .map(|entry| {
                let entry = entry.map_err(walk_error)?;
                Ok(TreeEntry {
                    is_dir: entry.file_type().is_dir(),
                    path: entry.into_path(),
                })
            })
            .collect()
    }

    #[cfg(unix)]
    fn set_mode(&self, path: &Path, mode: u32) -> FsResult<()> {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(|e| FsError::at(path, e))
    }

    #[cfg(not(unix))]
    fn set_mode(&self, _path: &Path, _mode: u32) -> FsResult<()> {
        Ok(())
    }
}
