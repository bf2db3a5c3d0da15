//! Platform capability table
//!
//! Resolved once at startup and passed down as configuration. Nothing else
//! in the crate branches on the operating system.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Operating system family the deployer runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
    Unknown,
}

impl Platform {
    /// Detect the platform of the running process
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &str) -> Self {
        match os {
            "linux" => Platform::Linux,
            "macos" => Platform::MacOs,
            "windows" => Platform::Windows,
            _ => Platform::Unknown,
        }
    }

    /// Capability row for this platform
    pub fn profile(self) -> PlatformProfile {
        match self {
            Platform::Linux | Platform::Unknown => PlatformProfile {
                platform: self,
                default_target_home: PathBuf::from("/opt/splunk"),
                executable_name: "splunk".to_string(),
                fallback_executable: None,
                normalize_permissions: true,
            },
            Platform::MacOs => PlatformProfile {
                platform: self,
                default_target_home: PathBuf::from("/Applications/Splunk"),
                executable_name: "splunk".to_string(),
                fallback_executable: None,
                normalize_permissions: true,
            },
            Platform::Windows => PlatformProfile {
                platform: self,
                default_target_home: PathBuf::from("C:/Program Files/Splunk"),
                executable_name: "splunk.exe".to_string(),
                fallback_executable: Some("splunk".to_string()),
                normalize_permissions: false,
            },
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Linux => write!(f, "Linux"),
            Platform::MacOs => write!(f, "macOS"),
            Platform::Windows => write!(f, "Windows"),
            Platform::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Platform defaults consumed by the executor and the restart invoker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformProfile {
    pub platform: Platform,
    /// Default application-host home directory
    pub default_target_home: PathBuf,
    /// Service executable under `<home>/bin`
    pub executable_name: String,
    /// Tried when `executable_name` is absent
    pub fallback_executable: Option<String>,
    /// Whether deployed trees get 755/644 modes
    pub normalize_permissions: bool,
}

impl PlatformProfile {
    /// Target root for a given host home (`<home>/etc/apps`)
    pub fn target_apps_dir(home: &std::path::Path) -> PathBuf {
        home.join("etc").join("apps")
    }

    /// Executables to try, in order, under `<home>/bin`
    pub fn executable_candidates(&self, home: &std::path::Path) -> Vec<PathBuf> {
        let bin = home.join("bin");
        let mut candidates = vec![bin.join(&self.executable_name)];
        if let Some(fallback) = &self.fallback_executable {
            candidates.push(bin.join(fallback));
        }
        candidates
    }
}
