//! Configuration discovery and loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppDeployError, AppDeployResult};

use super::types::AppDeployConfig;

/// Per-directory config file name
pub const LOCAL_CONFIG_FILE: &str = "appdeploy.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{suggestion}'?)")?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> AppDeployResult<(AppDeployConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| AppDeployError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: AppDeployConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| AppDeployError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
                key,
                file: path.to_path_buf(),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Pick the config file to read.
///
/// An explicit path is returned as-is, even when missing, so the caller can
/// report it. Otherwise the first existing of `./appdeploy.toml` and
/// `<config_dir>/appdeploy/config.toml`.
pub fn resolve_config_path(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let local = cwd.join(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("appdeploy").join("config.toml"))
        .filter(|p| p.is_file())
}

/// Resolve, load and apply environment overrides
pub fn load(
    explicit: Option<&Path>,
    cwd: &Path,
) -> AppDeployResult<(AppDeployConfig, Vec<ConfigWarning>)> {
    let (config, warnings) = match resolve_config_path(explicit, cwd) {
        Some(path) => load_with_warnings(&path)?,
        None => (AppDeployConfig::default(), Vec::new()),
    };
    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (APPDEPLOY_* prefix)
pub fn with_env_overrides(config: AppDeployConfig) -> AppDeployConfig {
    with_env_overrides_from(config, |key| std::env::var(key).ok())
}

pub fn with_env_overrides_from(
    mut config: AppDeployConfig,
    get_env: impl Fn(&str) -> Option<String>,
) -> AppDeployConfig {
    let non_empty = |key: &str| get_env(key).filter(|v| !v.trim().is_empty());

    if let Some(source) = non_empty("APPDEPLOY_SOURCE") {
        config.paths.source = PathBuf::from(source);
    }
    if let Some(home) = non_empty("APPDEPLOY_TARGET_HOME") {
        config.paths.target_home = Some(PathBuf::from(home));
    }
    if let Some(apps) = non_empty("APPDEPLOY_TARGET_APPS") {
        config.paths.target_apps = Some(PathBuf::from(apps));
    }
    if let Some(dir) = non_empty("APPDEPLOY_BACKUP_DIR") {
        config.paths.backup_dir = PathBuf::from(dir);
    }
    if let Some(dir) = non_empty("APPDEPLOY_LOG_DIR") {
        config.paths.log_dir = PathBuf::from(dir);
    }
    // unparseable values are ignored
    if let Some(secs) = non_empty("APPDEPLOY_RESTART_TIMEOUT").and_then(|v| v.trim().parse().ok())
    {
        config.deploy.restart_timeout_secs = secs;
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "paths",
        "source",
        "target_home",
        "target_apps",
        "backup_dir",
        "log_dir",
        "deploy",
        "executable_extensions",
        "restart_timeout_secs",
        "auto_restart",
        "git",
        "enabled",
        "output",
        "color",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            Some((_, best_dist)) if dist >= best_dist => best,
            _ => Some((candidate, dist)),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
