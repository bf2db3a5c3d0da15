//! Unit catalog - enumerates deployable units in a source root
//!
//! A unit is any immediate subdirectory carrying `default/app.conf`.
//! Listings are sorted so numbered menus and tests are reproducible.

use std::path::{Path, PathBuf};

use crate::domain::entities::{DeploymentUnit, DESCRIPTOR_PATH};
use crate::domain::ports::{DeployEventSink, FileSystem};
use crate::domain::services::MetadataAccessor;
use crate::error::{AppDeployError, AppDeployResult};

pub struct UnitCatalog<'a, FS: FileSystem + ?Sized> {
    fs: &'a FS,
    events: &'a dyn DeployEventSink,
    source_root: PathBuf,
}

impl<'a, FS: FileSystem + ?Sized> UnitCatalog<'a, FS> {
    pub fn new(fs: &'a FS, events: &'a dyn DeployEventSink, source_root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            events,
            source_root: source_root.into(),
        }
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Sorted names of every unit; empty when the source root is missing
    pub fn list_units(&self) -> AppDeployResult<Vec<String>> {
        if !self.fs.is_dir(&self.source_root) {
            return Ok(Vec::new());
        }

        let mut names: Vec<String> = self
            .fs
            .list_dirs(&self.source_root)?
            .into_iter()
            .filter(|name| {
                self.fs
                    .is_file(&self.source_root.join(name).join(DESCRIPTOR_PATH))
            })
            .collect();
        names.sort();
        Ok(names)
    }

    /// Every unit with its current version, in listing order
    pub fn discover(&self) -> AppDeployResult<Vec<DeploymentUnit>> {
        Ok(self
            .list_units()?
            .into_iter()
            .map(|name| self.load(&name))
            .collect())
    }

    /// Look up one unit by name
    pub fn find(&self, name: &str) -> AppDeployResult<DeploymentUnit> {
        if self.list_units()?.iter().any(|n| n == name) {
            Ok(self.load(name))
        } else {
            Err(AppDeployError::UnknownUnit {
                name: name.to_string(),
                source_root: self.source_root.clone(),
            })
        }
    }

    fn load(&self, name: &str) -> DeploymentUnit {
        let path = self.source_root.join(name);
        let version = MetadataAccessor::new(self.fs, self.events).read_version(&path);
        DeploymentUnit::new(name, path).with_version(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{FsError, FsResult, NoopEventSink, TreeEntry};
    use crate::infrastructure::fs::LocalFs;
    use std::fs;
    use tempfile::tempdir;

    /// Source root that exists but cannot be listed
    struct UnlistableFs(LocalFs);

    impl FileSystem for UnlistableFs {
        fn read(&self, path: &Path) -> FsResult<String> {
            self.0.read(path)
        }
        fn write(&self, path: &Path, content: &str) -> FsResult<()> {
            self.0.write(path, content)
        }
        fn exists(&self, path: &Path) -> bool {
            self.0.exists(path)
        }
        fn is_dir(&self, path: &Path) -> bool {
            self.0.is_dir(path)
        }
        fn is_file(&self, path: &Path) -> bool {
            self.0.is_file(path)
        }
        fn list_dirs(&self, path: &Path) -> FsResult<Vec<String>> {
            Err(FsError::PermissionDenied(path.to_path_buf()))
        }
        fn create_dir_all(&self, path: &Path) -> FsResult<()> {
            self.0.create_dir_all(path)
        }
        fn remove_dir_all(&self, path: &Path) -> FsResult<()> {
            self.0.remove_dir_all(path)
        }
        fn copy_tree(&self, from: &Path, to: &Path) -> FsResult<u64> {
            self.0.copy_tree(from, to)
        }
        fn walk(&self, root: &Path) -> FsResult<Vec<TreeEntry>> {
            self.0.walk(root)
        }
        fn set_mode(&self, path: &Path, mode: u32) -> FsResult<()> {
            self.0.set_mode(path, mode)
        }
    }

    fn unit_with_conf(root: &Path, name: &str, conf: &str) {
        fs::create_dir_all(root.join(name).join("default")).unwrap();
        fs::write(root.join(name).join(DESCRIPTOR_PATH), conf).unwrap();
    }

    #[test]
    fn lists_only_dirs_with_descriptor_sorted() {
        let dir = tempdir().unwrap();
        unit_with_conf(dir.path(), "zeta", "[launcher]\n");
        unit_with_conf(dir.path(), "alpha", "[launcher]\n");
        fs::create_dir_all(dir.path().join("no_conf/default")).unwrap();
        fs::write(dir.path().join("loose_file.conf"), "x").unwrap();

        let fs_impl = LocalFs::new();
        let catalog = UnitCatalog::new(&fs_impl, &NoopEventSink, dir.path());
        assert_eq!(catalog.list_units().unwrap(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn missing_root_lists_nothing() {
        let dir = tempdir().unwrap();
        let fs_impl = LocalFs::new();
        let catalog = UnitCatalog::new(&fs_impl, &NoopEventSink, dir.path().join("nope"));
        assert!(catalog.list_units().unwrap().is_empty());
    }

    #[test]
    fn discover_reads_versions() {
        let dir = tempdir().unwrap();
        unit_with_conf(dir.path(), "a", "[launcher]\nversion = 2.3.4\n");
        unit_with_conf(dir.path(), "b", "[ui]\n");

        let fs_impl = LocalFs::new();
        let catalog = UnitCatalog::new(&fs_impl, &NoopEventSink, dir.path());
        let units = catalog.discover().unwrap();
        assert_eq!(units[0].current_version(), "2.3.4");
        assert_eq!(units[1].current_version(), "1.0.0");
        assert_eq!(units[1].source_path(), dir.path().join("b"));
    }

    #[test]
    fn find_unknown_unit_errors() {
        let dir = tempdir().unwrap();
        let fs_impl = LocalFs::new();
        let catalog = UnitCatalog::new(&fs_impl, &NoopEventSink, dir.path());
        assert!(matches!(
            catalog.find("ghost"),
            Err(AppDeployError::UnknownUnit { .. })
        ));
    }

    #[test]
    fn unlistable_root_keeps_fs_error() {
        let dir = tempdir().unwrap();
        let fs_impl = UnlistableFs(LocalFs::new());
        let catalog = UnitCatalog::new(&fs_impl, &NoopEventSink, dir.path());

        let err = catalog.list_units().unwrap_err();
        assert!(matches!(
            err,
            AppDeployError::FileSystem(FsError::PermissionDenied(ref p)) if p == dir.path()
        ));
    }
}
