//! Metadata accessor - reads and stamps the version fields of a unit's descriptor
//!
//! Reads degrade to `1.0.0` on any problem. Writes fail loudly and go
//! through the file system port's atomic write, so a failed update never
//! leaves a half-written descriptor behind.

use std::path::Path;

use chrono::{DateTime, Local};

use crate::domain::entities::{Descriptor, DESCRIPTOR_PATH};
use crate::domain::ports::{DeployEventSink, FileSystem, LogLevel};
use crate::domain::value_objects::{relabel, BuildStamp, DEFAULT_VERSION};
use crate::error::{AppDeployError, AppDeployResult};

const LAUNCHER: &str = "launcher";
const INSTALL: &str = "install";

/// Sections searched for `version`, highest priority first
const VERSION_SECTIONS: [&str; 2] = [LAUNCHER, INSTALL];

pub struct MetadataAccessor<'a, FS: FileSystem + ?Sized> {
    fs: &'a FS,
    events: &'a dyn DeployEventSink,
}

impl<'a, FS: FileSystem + ?Sized> MetadataAccessor<'a, FS> {
    pub fn new(fs: &'a FS, events: &'a dyn DeployEventSink) -> Self {
        Self { fs, events }
    }

    /// Current version of the unit at `unit_path`; never fails.
    pub fn read_version(&self, unit_path: &Path) -> String {
        let path = unit_path.join(DESCRIPTOR_PATH);
        let Ok(content) = self.fs.read(&path) else {
            return DEFAULT_VERSION.to_string();
        };
        let Ok(descriptor) = Descriptor::parse(&content) else {
            self.events.log(
                LogLevel::Debug,
                &format!("unparseable descriptor {}, assuming {DEFAULT_VERSION}", path.display()),
            );
            return DEFAULT_VERSION.to_string();
        };
        version_of(&descriptor).unwrap_or_else(|| DEFAULT_VERSION.to_string())
    }

    /// Stamp `version` into the unit's descriptor using the current time.
    pub fn write_version(&self, unit_path: &Path, version: &str) -> AppDeployResult<()> {
        self.write_version_at(unit_path, version, Local::now())
    }

    /// Stamp `version` into the unit's descriptor.
    ///
    /// Sets `launcher.version`, refreshes `install.build` and rewrites an
    /// existing `launcher.label` to end in ` v<version>`. Everything else in
    /// the file is preserved.
    pub fn write_version_at(
        &self,
        unit_path: &Path,
        version: &str,
        now: DateTime<Local>,
    ) -> AppDeployResult<()> {
        let path = unit_path.join(DESCRIPTOR_PATH);
        let write_error = |message: String| AppDeployError::MetadataWrite {
            path: path.clone(),
            message,
        };

        let content = self.fs.read(&path).map_err(|e| write_error(e.to_string()))?;
        let mut descriptor =
            Descriptor::parse(&content).map_err(|e| write_error(e.to_string()))?;

        descriptor.set(LAUNCHER, "version", version);

        let build = BuildStamp::next_after(&now, descriptor.get(INSTALL, "build"));
        descriptor.set(INSTALL, "build", &build.to_string());

        if let Some(label) = descriptor.get(LAUNCHER, "label").map(str::to_string) {
            descriptor.set(LAUNCHER, "label", &relabel(&label, version));
        }

        self.fs
            .write(&path, &descriptor.render())
            .map_err(|e| write_error(e.to_string()))?;

        self.events.log(
            LogLevel::Debug,
            &format!("{} stamped v{version} build {build}", path.display()),
        );
        Ok(())
    }
}

/// `version` from the first section that has one, surrounding quotes removed
pub fn version_of(descriptor: &Descriptor) -> Option<String> {
    VERSION_SECTIONS
        .iter()
        .filter_map(|section| descriptor.get(section, "version"))
        .map(|v| v.trim_matches('"').trim().to_string())
        .find(|v| !v.is_empty())
}
