//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --color, --verbose, --config) are inherited by all subcommands
//! - Path flags left unset fall back to config, environment, then platform defaults

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::ui::terminal::ColorChoice;

/// appdeploy - deploy versioned app packages with backup-before-overwrite
#[derive(Parser, Debug)]
#[command(name = "appdeploy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events instead of styled output
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: ./appdeploy.toml, then the user config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Path overrides shared by every subcommand that touches the source tree
#[derive(clap::Args, Debug, Clone, Default)]
pub struct PathArgs {
    /// Directory holding the apps to deploy
    #[arg(short, long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Application host home (e.g. /opt/splunk)
    #[arg(long, value_name = "DIR")]
    pub target_home: Option<PathBuf>,

    /// Deployed apps directory (default: <target-home>/etc/apps)
    #[arg(long, value_name = "DIR")]
    pub target_apps: Option<PathBuf>,

    /// Where backup archives are written
    #[arg(long, value_name = "DIR")]
    pub backup_dir: Option<PathBuf>,

    /// Where the deployment log is written
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy apps (names, 1-based numbers from `list`, or `all`)
    Deploy {
        /// Apps to deploy; prompts when omitted on a terminal
        #[arg(value_name = "APP")]
        apps: Vec<String>,

        #[command(flatten)]
        paths: PathArgs,

        /// Version for one app, NAME=X.Y.Z (repeatable)
        #[arg(long = "app-version", value_name = "NAME=X.Y.Z")]
        app_versions: Vec<String>,

        /// Skip confirmation prompts
        #[arg(short, long)]
        yes: bool,

        /// Restart the host after a successful deployment
        #[arg(long, conflicts_with = "no_restart")]
        restart: bool,

        /// Never restart the host
        #[arg(long)]
        no_restart: bool,

        /// Commit deployed app sources with git
        #[arg(long)]
        commit: bool,
    },

    /// List deployable apps with their current versions
    List {
        #[command(flatten)]
        paths: PathArgs,
    },

    /// Check app structure without deploying
    Validate {
        /// Apps to check (default: all)
        #[arg(value_name = "APP")]
        apps: Vec<String>,

        #[command(flatten)]
        paths: PathArgs,
    },

    /// Extract a backup archive back into the deployed apps directory
    Restore {
        /// Archive written by `deploy`
        #[arg(value_name = "ARCHIVE")]
        archive: PathBuf,

        #[command(flatten)]
        paths: PathArgs,
    },
}

impl Commands {
    pub fn paths(&self) -> &PathArgs {
        match self {
            Commands::Deploy { paths, .. }
            | Commands::List { paths }
            | Commands::Validate { paths, .. }
            | Commands::Restore { paths, .. } => paths,
        }
    }
}
