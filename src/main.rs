//! appdeploy CLI
//!
//! Usage: appdeploy <COMMAND>
//!
//! Commands:
//!   deploy    Deploy apps with backup-before-overwrite
//!   list      List deployable apps
//!   validate  Check app structure without deploying
//!   restore   Extract a backup archive into the deployed apps directory

mod commands;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use appdeploy::error::AppDeployError;
use appdeploy::presentation::{Cli, Commands};

use commands::{CommandContext, DeployArgs};

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    let interrupt = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupt);
    if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
        eprintln!("Warning: cannot install interrupt handler: {e}");
    }

    let code = match run(cli, interrupt) {
        Ok(code) => code,
        Err(err) => {
            report_error(&err, json);
            1
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli, interrupt: Arc<AtomicBool>) -> Result<i32> {
    let ctx = CommandContext::load(&cli)?;

    match cli.command {
        Commands::Deploy {
            apps,
            app_versions,
            yes,
            restart,
            no_restart,
            commit,
            ..
        } => {
            let restart = match (restart, no_restart) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let args = DeployArgs {
                apps,
                app_versions,
                yes,
                restart,
                commit,
            };
            commands::cmd_deploy(&ctx, args, interrupt)
        }
        Commands::List { .. } => commands::cmd_list(&ctx),
        Commands::Validate { apps, .. } => commands::cmd_validate(&ctx, &apps),
        Commands::Restore { archive, .. } => commands::cmd_restore(&ctx, &archive),
    }
}

fn report_error(err: &anyhow::Error, json: bool) {
    let kind = err
        .downcast_ref::<AppDeployError>()
        .map_or("Error", AppDeployError::error_kind);
    if json {
        println!(
            "{}",
            serde_json::json!({
                "event": "error",
                "kind": kind,
                "message": format!("{err:#}"),
            })
        );
    } else {
        eprintln!("Error: {err:#}");
    }
}
