//! `appdeploy deploy`: select, confirm, run the pipeline, then restart and commit

use std::fs;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Local;
use is_terminal::IsTerminal;

use appdeploy::domain::ports::{DecisionProvider, DeployEventSink};
use appdeploy::error::AppDeployError;
use appdeploy::infrastructure::decision::parse_app_version;
use appdeploy::infrastructure::{
    GitCommitter, InteractiveDecisions, LogFileSink, PresetDecisions, ProcessRestarter,
};
use appdeploy::presentation::factory;
use appdeploy::ui::summary::{render_session_summary, session_summary_json, SummaryContext};

use super::CommandContext;

/// Flags specific to `deploy`
#[derive(Debug, Clone, Default)]
pub struct DeployArgs {
    pub apps: Vec<String>,
    pub app_versions: Vec<String>,
    pub yes: bool,
    /// `Some(true)` for `--restart`, `Some(false)` for `--no-restart`
    pub restart: Option<bool>,
    pub commit: bool,
}

pub fn cmd_deploy(
    ctx: &CommandContext,
    args: DeployArgs,
    interrupt: Arc<AtomicBool>,
) -> Result<i32> {
    let versions = args
        .app_versions
        .iter()
        .map(|v| parse_app_version(v))
        .collect::<Result<Vec<_>, _>>()?;

    let interactive =
        args.apps.is_empty() && !ctx.json && ctx.caps.is_tty && std::io::stdin().is_terminal();
    if args.apps.is_empty() && !interactive {
        bail!("explicit selection required: pass app names, list numbers or `all`");
    }

    let paths = &ctx.paths;
    fs::create_dir_all(&paths.target_apps).with_context(|| {
        format!(
            "cannot create target apps directory {}",
            paths.target_apps.display()
        )
    })?;

    let log_sink = Arc::new(
        LogFileSink::create(&paths.log_dir, Local::now()).with_context(|| {
            format!("cannot create deployment log in {}", paths.log_dir.display())
        })?,
    );
    let log_path = log_sink.path().to_path_buf();
    let events = factory::create_event_sink(
        ctx.output_sink(),
        vec![log_sink as Arc<dyn DeployEventSink>],
    );

    let session = factory::create_session_use_case(events, &paths.backup_dir);
    let available = session.discover(&paths.source)?;

    let restart = args
        .restart
        .or_else(|| ctx.config.deploy.auto_restart.then_some(true));
    let preset = PresetDecisions::new(args.apps)
        .with_versions(versions)
        .with_restart(restart)
        .with_commit(args.commit);
    let decisions: Box<dyn DecisionProvider> = if interactive {
        Box::new(
            InteractiveDecisions::new(preset, ctx.caps.supports_unicode)
                .with_assume_yes(args.yes),
        )
    } else {
        Box::new(preset)
    };

    let plan = session.plan(&available, decisions.as_ref())?;
    match session.confirm(&plan, decisions.as_ref()) {
        Ok(()) => {}
        Err(AppDeployError::Cancelled) => {
            if ctx.json {
                println!("{}", serde_json::json!({ "event": "cancelled" }));
            } else {
                println!("Deployment cancelled");
            }
            return Ok(0);
        }
        Err(e) => return Err(e.into()),
    }

    let options = factory::create_deploy_options(paths, &ctx.config, &ctx.profile, interrupt);
    let mut report = session
        .run(plan, &paths.source, &options)
        .with_log_file(Some(log_path));

    session.restart_host(
        &mut report,
        &ProcessRestarter::new(ctx.profile.clone()),
        decisions.as_ref(),
        &paths.target_home,
        ctx.config.restart_timeout(),
    );
    if ctx.config.git.enabled {
        session.commit_sources(
            &mut report,
            &GitCommitter::new(&paths.source),
            decisions.as_ref(),
        );
    }

    if ctx.json {
        println!("{}", session_summary_json(&report));
    } else {
        let summary = SummaryContext {
            target_home: &paths.target_home,
            profile: &ctx.profile,
            supports_color: ctx.caps.supports_color,
            supports_unicode: ctx.caps.supports_unicode,
        };
        print!("{}", render_session_summary(&report, &summary));
    }

    Ok(report.exit_code())
}
