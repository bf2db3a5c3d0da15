//! Command handlers for the appdeploy binary

mod deploy;
mod list;
mod restore;
mod validate;

pub use deploy::{cmd_deploy, DeployArgs};
pub use list::cmd_list;
pub use restore::cmd_restore;
pub use validate::cmd_validate;

use std::sync::Arc;

use anyhow::{Context, Result};

use appdeploy::config::{self, AppDeployConfig, ConfigWarning};
use appdeploy::domain::ports::DeployEventSink;
use appdeploy::domain::value_objects::{Platform, PlatformProfile};
use appdeploy::presentation::factory::{self, ResolvedPaths};
use appdeploy::presentation::Cli;
use appdeploy::ui::terminal::{capabilities_for, TerminalCapabilities};

/// Everything a command needs after flags, config and environment are merged
pub struct CommandContext {
    pub config: AppDeployConfig,
    pub paths: ResolvedPaths,
    pub profile: PlatformProfile,
    pub caps: TerminalCapabilities,
    pub json: bool,
    pub verbose: u8,
}

impl CommandContext {
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("cannot determine current directory")?;
        let (config, warnings) = config::load(cli.config.as_deref(), &cwd)?;

        let caps = capabilities_for(cli.color.unwrap_or(config.output.color));
        let profile = Platform::current().profile();
        let paths = factory::resolve_paths(&config, cli.command.paths(), &profile);

        print_config_warnings(&warnings, cli.json);

        Ok(Self {
            config,
            paths,
            profile,
            caps,
            json: cli.json,
            verbose: cli.verbose,
        })
    }

    /// Sink that renders events on the terminal (or as NDJSON)
    pub fn output_sink(&self) -> Arc<dyn DeployEventSink> {
        factory::create_output_sink(self.json, self.verbose, &self.caps)
    }
}

fn print_config_warnings(warnings: &[ConfigWarning], json: bool) {
    for warning in warnings {
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "event": "config_warning",
                    "key": warning.key,
                    "file": warning.file.display().to_string(),
                    "line": warning.line,
                    "suggestion": warning.suggestion,
                })
            );
        } else {
            eprintln!("Warning: {warning}");
        }
    }
}
