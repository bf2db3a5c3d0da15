//! DeploymentUnit entity - a deployable app directory in the source root

use std::path::{Path, PathBuf};

use crate::domain::value_objects::DEFAULT_VERSION;

/// Relative path of the descriptor inside a unit
pub const DESCRIPTOR_PATH: &str = "default/app.conf";

/// Relative path of the manifest inside a unit
pub const MANIFEST_PATH: &str = "metadata/default.meta";

/// A deployable package discovered in the source root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentUnit {
    name: String,
    source_path: PathBuf,
    current_version: String,
}

impl DeploymentUnit {
    pub fn new(name: impl Into<String>, source_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source_path: source_path.into(),
            current_version: DEFAULT_VERSION.to_string(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.current_version = version.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn current_version(&self) -> &str {
        &self.current_version
    }

    /// Where this unit lives under a target root
    pub fn target_path(&self, target_root: &Path) -> PathBuf {
        target_root.join(&self.name)
    }

    pub fn descriptor_path(&self) -> PathBuf {
        self.source_path.join(DESCRIPTOR_PATH)
    }

    /// Record the version stamped by the metadata update
    pub(crate) fn set_current_version(&mut self, version: &str) {
        self.current_version = version.to_string();
    }
}

/// Whether a name is safe to use as a single directory component
pub fn is_valid_unit_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.chars().any(char::is_control)
}
