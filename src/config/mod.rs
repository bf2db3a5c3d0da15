//! Configuration module for appdeploy
//!
//! Resolution order, highest priority first:
//! 1. CLI flags
//! 2. Environment variables (`APPDEPLOY_*`)
//! 3. `--config <file>`, else `./appdeploy.toml`, else `<config_dir>/appdeploy/config.toml`
//! 4. Built-in defaults

mod loader;
mod types;

pub use loader::{
    load, load_with_warnings, resolve_config_path, with_env_overrides, with_env_overrides_from,
    ConfigWarning, LOCAL_CONFIG_FILE,
};
pub use types::{AppDeployConfig, DeployConfig, GitConfig, OutputConfig, PathsConfig};
