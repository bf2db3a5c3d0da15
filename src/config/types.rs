//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::application::DEFAULT_EXECUTABLE_EXTENSIONS;
use crate::domain::value_objects::PlatformProfile;
use crate::error::AppDeployResult;
use crate::ui::terminal::ColorChoice;

use super::loader::{self, ConfigWarning};

/// Where things live
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PathsConfig {
    /// Source root holding the units to deploy
    #[serde(default = "default_source")]
    pub source: PathBuf,

    /// Application host home; platform default when unset
    #[serde(default)]
    pub target_home: Option<PathBuf>,

    /// Target root; `<target_home>/etc/apps` when unset
    #[serde(default)]
    pub target_apps: Option<PathBuf>,

    #[serde(default = "default_backup_dir")]
    pub backup_dir: PathBuf,

    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            target_home: None,
            target_apps: None,
            backup_dir: default_backup_dir(),
            log_dir: default_log_dir(),
        }
    }
}

fn default_source() -> PathBuf {
    PathBuf::from("apps")
}

fn default_backup_dir() -> PathBuf {
    PathBuf::from("backups")
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

/// Pipeline behavior
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DeployConfig {
    /// Extensions that get mode 755 after replace
    #[serde(default = "default_executable_extensions")]
    pub executable_extensions: Vec<String>,

    #[serde(default = "default_restart_timeout")]
    pub restart_timeout_secs: u64,

    /// Restart without asking once something was deployed
    #[serde(default)]
    pub auto_restart: bool,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            executable_extensions: default_executable_extensions(),
            restart_timeout_secs: default_restart_timeout(),
            auto_restart: false,
        }
    }
}

fn default_executable_extensions() -> Vec<String> {
    DEFAULT_EXECUTABLE_EXTENSIONS
        .iter()
        .map(|e| e.to_string())
        .collect()
}

fn default_restart_timeout() -> u64 {
    300
}

/// Version control integration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GitConfig {
    /// Offer to commit deployed sources
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorChoice,
}

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct AppDeployConfig {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub deploy: DeployConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl AppDeployConfig {
    /// Load configuration from a TOML file, ignoring unknown-key warnings
    pub fn load(path: &Path) -> AppDeployResult<Self> {
        Ok(loader::load_with_warnings(path)?.0)
    }

    /// Load configuration from a TOML file and return non-fatal warnings
    pub fn load_with_warnings(path: &Path) -> AppDeployResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Configured host home, or the platform default
    pub fn target_home(&self, profile: &PlatformProfile) -> PathBuf {
        self.paths
            .target_home
            .clone()
            .unwrap_or_else(|| profile.default_target_home.clone())
    }

    /// Configured target root, or `<target_home>/etc/apps`
    pub fn target_apps(&self, profile: &PlatformProfile) -> PathBuf {
        self.paths
            .target_apps
            .clone()
            .unwrap_or_else(|| PlatformProfile::target_apps_dir(&self.target_home(profile)))
    }

    pub fn restart_timeout(&self) -> Duration {
        Duration::from_secs(self.deploy.restart_timeout_secs)
    }
}
