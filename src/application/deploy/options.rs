//! Deploy Options
//!
//! Configuration types for the per-unit executor.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::value_objects::PlatformProfile;

/// File extensions that get the executable mode after replace
pub const DEFAULT_EXECUTABLE_EXTENSIONS: [&str; 2] = ["py", "sh"];

/// Options for the deploy use case
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Directory holding deployed units (`<home>/etc/apps`)
    pub target_root: PathBuf,
    /// Where backup archives are written
    pub backup_dir: PathBuf,
    /// Apply 755/644 modes after replace
    pub normalize_permissions: bool,
    /// Extensions (without dot) treated as executable
    pub executable_extensions: Vec<String>,
    /// Set by the interrupt handler; checked at stage boundaries
    pub interrupt: Option<Arc<AtomicBool>>,
}

impl DeployOptions {
    pub fn new(target_root: impl Into<PathBuf>, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_root: target_root.into(),
            backup_dir: backup_dir.into(),
            normalize_permissions: cfg!(unix),
            executable_extensions: DEFAULT_EXECUTABLE_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            interrupt: None,
        }
    }

    /// Take permission handling from the platform capability table
    pub fn with_platform(mut self, profile: &PlatformProfile) -> Self {
        self.normalize_permissions = profile.normalize_permissions;
        self
    }

    pub fn with_normalize_permissions(mut self, enabled: bool) -> Self {
        self.normalize_permissions = enabled;
        self
    }

    pub fn with_executable_extensions(mut self, extensions: Vec<String>) -> Self {
        self.executable_extensions = extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupt
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Whether a file name carries one of the executable extensions
    pub fn is_executable_name(&self, file_name: &str) -> bool {
        file_name
            .rsplit_once('.')
            .map(|(_, ext)| {
                let ext = ext.to_ascii_lowercase();
                self.executable_extensions.iter().any(|e| *e == ext)
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Platform;

    #[test]
    fn executable_names() {
        let options = DeployOptions::new("/opt/splunk/etc/apps", "backups");
        assert!(options.is_executable_name("collect.py"));
        assert!(options.is_executable_name("RUN.SH"));
        assert!(!options.is_executable_name("app.conf"));
        assert!(!options.is_executable_name("py"));
    }

    #[test]
    fn custom_extensions_drop_leading_dot() {
        let options = DeployOptions::new("t", "b").with_executable_extensions(vec![".PL".into()]);
        assert!(options.is_executable_name("tool.pl"));
        assert!(!options.is_executable_name("tool.py"));
    }

    #[test]
    fn windows_profile_disables_permissions() {
        let options = DeployOptions::new("t", "b").with_platform(&Platform::Windows.profile());
        assert!(!options.normalize_permissions);
    }

    #[test]
    fn interrupt_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let options = DeployOptions::new("t", "b").with_interrupt(flag.clone());
        assert!(!options.is_interrupted());
        flag.store(true, Ordering::SeqCst);
        assert!(options.is_interrupted());
    }
}
