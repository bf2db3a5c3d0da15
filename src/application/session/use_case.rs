//! Session Use Case
//!
//! Drives a whole operator session:
//! discover units, build the plan from the decision provider, run each unit
//! through the executor, then the advisory restart and commit steps.
//!
//! A unit's failure never stops the session. An interrupt stops new units
//! from starting; the unit in flight stops at its next stage boundary.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::application::deploy::{DeployOptions, DeployUseCase};
use crate::domain::entities::{DeploymentPlan, DeploymentUnit};
use crate::domain::ports::{
    BackupArchiver, CommitOutcome, DecisionProvider, DeployEvent, DeployEventSink, FileSystem,
    LogLevel, Question, RestartInvoker, VersionControl,
};
use crate::domain::services::UnitCatalog;
use crate::domain::value_objects::Version;
use crate::error::{AppDeployError, AppDeployResult};

use super::report::{AdvisoryOutcome, SessionReport};

pub struct SessionUseCase<FS, B>
where
    FS: FileSystem,
    B: BackupArchiver,
{
    executor: DeployUseCase<FS, B>,
    events: Arc<dyn DeployEventSink>,
}

impl<FS, B> SessionUseCase<FS, B>
where
    FS: FileSystem,
    B: BackupArchiver,
{
    /// Wrap an executor; session events go to the executor's sink
    pub fn new(executor: DeployUseCase<FS, B>) -> Self {
        let events = executor.events().clone();
        Self { executor, events }
    }

    pub fn executor(&self) -> &DeployUseCase<FS, B> {
        &self.executor
    }

    /// Every deployable unit under `source_root`, sorted by name
    pub fn discover(&self, source_root: &Path) -> AppDeployResult<Vec<DeploymentUnit>> {
        let fs = self.executor.file_system();
        if !fs.is_dir(source_root) {
            return Err(AppDeployError::SourceRootNotFound {
                path: source_root.to_path_buf(),
            });
        }

        let units = UnitCatalog::new(fs, self.events.as_ref(), source_root).discover()?;
        if units.is_empty() {
            return Err(AppDeployError::NoUnitsFound {
                path: source_root.to_path_buf(),
            });
        }
        Ok(units)
    }

    /// Turn the provider's selection and version answers into a plan.
    ///
    /// Unknown selection entries and malformed versions are warned about
    /// and skipped; only an empty selection is an error.
    pub fn plan(
        &self,
        available: &[DeploymentUnit],
        decisions: &dyn DecisionProvider,
    ) -> AppDeployResult<DeploymentPlan> {
        let selection = decisions.select_units(available);
        for token in &selection.rejected {
            self.events.log(
                LogLevel::Warning,
                &format!("Invalid selection '{token}', skipping"),
            );
        }
        if selection.is_empty() {
            return Err(AppDeployError::NoUnitsSelected);
        }

        let mut plan = DeploymentPlan::new();
        for name in &selection.units {
            let Some(unit) = available.iter().find(|u| u.name() == name) else {
                continue;
            };
            let requested = decisions.request_version(unit);
            if let Some(version) = requested.as_deref() {
                if Version::parse(version).is_none() {
                    self.events.log(
                        LogLevel::Warning,
                        &format!(
                            "Invalid version format '{version}' for {name}, keeping {}",
                            unit.current_version()
                        ),
                    );
                }
            }
            plan.push(unit.clone(), requested.as_deref())?;
        }
        Ok(plan)
    }

    /// Ask the provider whether to go ahead with `plan`
    pub fn confirm(
        &self,
        plan: &DeploymentPlan,
        decisions: &dyn DecisionProvider,
    ) -> AppDeployResult<()> {
        let answer = decisions.decide(Question::ProceedWithDeployment {
            unit_count: plan.len(),
        });
        if answer.is_yes() {
            Ok(())
        } else {
            Err(AppDeployError::Cancelled)
        }
    }

    /// Deploy every planned unit in order
    pub fn run(
        &self,
        plan: DeploymentPlan,
        source_root: &Path,
        options: &DeployOptions,
    ) -> SessionReport {
        let mut report =
            SessionReport::new(source_root, &options.target_root, &options.backup_dir);

        self.events.on_event(DeployEvent::SessionStarted {
            source_root: source_root.to_path_buf(),
            target_root: options.target_root.clone(),
            unit_count: plan.len(),
        });

        for planned in plan {
            if options.is_interrupted() {
                report.interrupted = true;
                self.events.on_event(DeployEvent::UnitSkipped {
                    unit: planned.unit.name().to_string(),
                    reason: "session interrupted".to_string(),
                });
                report.skipped.push(planned.unit.name().to_string());
                continue;
            }

            let mut unit = planned.unit;
            let result = self
                .executor
                .execute(&mut unit, &planned.target_version, options);
            report.results.push(result);
        }

        if options.is_interrupted() {
            report.interrupted = true;
        }

        self.events.on_event(DeployEvent::SessionCompleted {
            succeeded: report.deployed().len(),
            failed: report.failed().len(),
            skipped: report.skipped.len(),
        });

        report
    }

    /// Offer a host restart when anything was deployed; never changes unit outcomes
    pub fn restart_host(
        &self,
        report: &mut SessionReport,
        restarter: &dyn RestartInvoker,
        decisions: &dyn DecisionProvider,
        target_home: &Path,
        timeout: Duration,
    ) {
        let deployed_count = report.deployed().len();
        if deployed_count == 0 || report.interrupted {
            return;
        }
        if !decisions
            .decide(Question::RestartNow { deployed_count })
            .is_yes()
        {
            self.events
                .log(LogLevel::Info, "Skipping restart; restart the host to apply changes");
            return;
        }

        let outcome = match restarter.restart(target_home, timeout) {
            Ok(()) => AdvisoryOutcome::ok("host restarted"),
            Err(e) => AdvisoryOutcome::failed(e.to_string()),
        };
        self.events.on_event(DeployEvent::RestartFinished {
            success: outcome.success,
            message: outcome.message.clone(),
        });
        report.restart = Some(outcome);
    }

    /// Offer to commit the deployed units' sources; never changes unit outcomes
    pub fn commit_sources(
        &self,
        report: &mut SessionReport,
        vcs: &dyn VersionControl,
        decisions: &dyn DecisionProvider,
    ) {
        let paths: Vec<PathBuf> = report
            .deployed()
            .iter()
            .map(|r| r.source_path.clone())
            .collect();
        if paths.is_empty() {
            return;
        }
        if !decisions
            .decide(Question::CommitChanges {
                deployed_count: paths.len(),
            })
            .is_yes()
        {
            return;
        }

        let outcome = match vcs.commit(&paths, &report.commit_subject()) {
            Ok(CommitOutcome::Committed { summary }) => {
                AdvisoryOutcome::ok(format!("committed: {}", summary_tail(&summary)))
            }
            Ok(CommitOutcome::NothingToCommit) => AdvisoryOutcome::ok("no changes to commit"),
            Ok(CommitOutcome::Unavailable) => {
                AdvisoryOutcome::failed("git is not available or not a repository")
            }
            Err(e) => AdvisoryOutcome::failed(e.to_string()),
        };
        self.events.on_event(DeployEvent::CommitFinished {
            committed: outcome.success,
            message: outcome.message.clone(),
        });
        report.commit = Some(outcome);
    }
}

/// Last line of `git diff --stat` ("N files changed, ...")
fn summary_tail(summary: &str) -> &str {
    summary.lines().last().map(str::trim).unwrap_or(summary)
}
