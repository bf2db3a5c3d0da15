//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::application::{DeployOptions, DeployUseCase, SessionUseCase};
use crate::config::AppDeployConfig;
use crate::domain::ports::DeployEventSink;
use crate::domain::value_objects::PlatformProfile;
use crate::infrastructure::{
    ConsoleEventSink, FanoutEventSink, FileUnitLocker, JsonEventSink, LocalFs, TarGzArchiver,
};
use crate::ui::terminal::TerminalCapabilities;

use super::cli::PathArgs;

/// Type alias for the concrete DeployUseCase with all dependencies
pub type ConcreteDeployUseCase = DeployUseCase<LocalFs, TarGzArchiver>;

/// Type alias for the concrete SessionUseCase with all dependencies
pub type ConcreteSessionUseCase = SessionUseCase<LocalFs, TarGzArchiver>;

/// Paths after CLI flags, config, environment and platform defaults are applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub source: PathBuf,
    pub target_home: PathBuf,
    pub target_apps: PathBuf,
    pub backup_dir: PathBuf,
    pub log_dir: PathBuf,
}

/// CLI flags win; an explicit `--target-home` also moves the default apps dir
pub fn resolve_paths(
    config: &AppDeployConfig,
    args: &PathArgs,
    profile: &PlatformProfile,
) -> ResolvedPaths {
    let target_home = args
        .target_home
        .clone()
        .unwrap_or_else(|| config.target_home(profile));
    let target_apps = match (&args.target_apps, &args.target_home) {
        (Some(apps), _) => apps.clone(),
        (None, Some(home)) => PlatformProfile::target_apps_dir(home),
        (None, None) => config.target_apps(profile),
    };

    ResolvedPaths {
        source: args.source.clone().unwrap_or_else(|| config.paths.source.clone()),
        target_home,
        target_apps,
        backup_dir: args
            .backup_dir
            .clone()
            .unwrap_or_else(|| config.paths.backup_dir.clone()),
        log_dir: args
            .log_dir
            .clone()
            .unwrap_or_else(|| config.paths.log_dir.clone()),
    }
}

/// Terminal-facing sink: NDJSON in `--json` mode, styled lines otherwise
pub fn create_output_sink(
    json: bool,
    verbose: u8,
    caps: &TerminalCapabilities,
) -> Arc<dyn DeployEventSink> {
    if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(
            ConsoleEventSink::stdout(caps.supports_color, caps.supports_unicode)
                .with_verbosity(verbose),
        )
    }
}

/// Broadcast to the terminal sink plus any extra sinks (e.g. the log file)
pub fn create_event_sink(
    output: Arc<dyn DeployEventSink>,
    extra: Vec<Arc<dyn DeployEventSink>>,
) -> Arc<dyn DeployEventSink> {
    let fanout = extra
        .into_iter()
        .fold(FanoutEventSink::new().with(output), FanoutEventSink::with);
    Arc::new(fanout)
}

/// Create a per-unit executor with all dependencies wired up
pub fn create_deploy_use_case(
    events: Arc<dyn DeployEventSink>,
    backup_dir: &Path,
) -> ConcreteDeployUseCase {
    DeployUseCase::new(LocalFs::new(), TarGzArchiver::new())
        .with_locker(Box::new(FileUnitLocker::in_backup_dir(backup_dir)))
        .with_events(events)
}

/// Create a session use case with all dependencies wired up
pub fn create_session_use_case(
    events: Arc<dyn DeployEventSink>,
    backup_dir: &Path,
) -> ConcreteSessionUseCase {
    SessionUseCase::new(create_deploy_use_case(events, backup_dir))
}

pub fn create_deploy_options(
    paths: &ResolvedPaths,
    config: &AppDeployConfig,
    profile: &PlatformProfile,
    interrupt: Arc<AtomicBool>,
) -> DeployOptions {
    DeployOptions::new(&paths.target_apps, &paths.backup_dir)
        .with_platform(profile)
        .with_executable_extensions(config.deploy.executable_extensions.clone())
        .with_interrupt(interrupt)
}
