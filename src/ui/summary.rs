//! End-of-session rendering: the console summary and its JSON twin

use std::fmt::Write as _;
use std::path::Path;

use serde_json::{json, Value};

use crate::application::SessionReport;
use crate::domain::value_objects::PlatformProfile;
use crate::ui::theme::{self, colors, Icon};

/// Everything the summary needs besides the report
pub struct SummaryContext<'a> {
    pub target_home: &'a Path,
    pub profile: &'a PlatformProfile,
    pub supports_color: bool,
    pub supports_unicode: bool,
}

impl SummaryContext<'_> {
    fn icon(&self, icon: Icon) -> String {
        icon.colored(self.supports_color, self.supports_unicode)
    }

    fn heading(&self, text: &str) -> String {
        theme::paint(&format!("=== {text} ==="), colors::INFO, self.supports_color)
    }

    fn restart_command(&self) -> String {
        self.profile
            .executable_candidates(self.target_home)
            .first()
            .map(|p| format!("{} restart", p.display()))
            .unwrap_or_default()
    }
}

pub fn render_session_summary(report: &SessionReport, ctx: &SummaryContext<'_>) -> String {
    let mut out = String::new();
    let deployed = report.deployed();
    let failed = report.failed();

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", ctx.heading("Deployment Summary"));
    if report.is_success() {
        let _ = writeln!(
            out,
            "{} {}",
            ctx.icon(Icon::Success),
            theme::paint("Deployment completed successfully!", colors::SUCCESS, ctx.supports_color)
        );
    } else {
        let _ = writeln!(
            out,
            "{} {}",
            ctx.icon(Icon::Warning),
            theme::paint(
                &format!(
                    "Deployment finished with problems: {} deployed, {} failed, {} skipped",
                    deployed.len(),
                    failed.len(),
                    report.skipped.len()
                ),
                colors::WARNING,
                ctx.supports_color
            )
        );
    }

    if !deployed.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Deployed Apps:");
        for result in &deployed {
            let _ = writeln!(
                out,
                "  {} {} {}",
                ctx.icon(Icon::Success),
                theme::paint(&result.unit, colors::INFO, ctx.supports_color),
                theme::paint(&format!("v{}", result.version), colors::WARNING, ctx.supports_color)
            );
        }
    }

    if !failed.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Failed Apps:");
        for result in &failed {
            let Some(error) = &result.error else {
                continue;
            };
            let _ = writeln!(
                out,
                "  {} {} at {} ({}): {}",
                ctx.icon(Icon::Error),
                theme::paint(&result.unit, colors::INFO, ctx.supports_color),
                error.stage.transition_label(),
                error.kind,
                error.message
            );
            if result.needs_attention() {
                if let Some(backup) = &result.backup {
                    let _ = writeln!(
                        out,
                        "    {} previous version saved in {}",
                        ctx.icon(Icon::Arrow),
                        backup.path.display()
                    );
                }
            }
        }
    }

    if !report.skipped.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Not started (interrupted): {}", report.skipped.join(", "));
    }

    if let Some(restart) = &report.restart {
        let icon = if restart.success { Icon::Success } else { Icon::Warning };
        let _ = writeln!(out);
        let _ = writeln!(out, "{} Restart: {}", ctx.icon(icon), restart.message);
    }
    if let Some(commit) = &report.commit {
        let icon = if commit.success { Icon::Success } else { Icon::Warning };
        let _ = writeln!(out, "{} Git: {}", ctx.icon(icon), commit.message);
    }

    if !deployed.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", ctx.heading("Post-Deployment Instructions"));
        let restarted = report.restart.as_ref().is_some_and(|r| r.success);
        if !restarted {
            let _ = writeln!(out, "1. Restart the host: {}", ctx.restart_command());
        } else {
            let _ = writeln!(out, "1. Host already restarted");
        }
        let _ = writeln!(out, "2. Open the web interface and confirm the apps are loaded");
        let _ = writeln!(out, "3. Check app versions under Manage Apps");
        let _ = writeln!(out, "4. Exercise the deployed functionality");

        let _ = writeln!(out);
        let _ = writeln!(out, "{}", ctx.heading("App Locations"));
        for result in &deployed {
            let _ = writeln!(out, "  {}: {}", result.unit, result.target_path.display());
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", ctx.heading("Logs and Backups"));
    if let Some(log) = &report.log_file {
        let _ = writeln!(out, "Deployment log: {}", log.display());
    }
    let _ = writeln!(out, "Backup directory: {}", report.backup_dir.display());

    out
}

/// Final NDJSON line for `--json` sessions
pub fn session_summary_json(report: &SessionReport) -> Value {
    let units: Vec<Value> = report
        .results
        .iter()
        .map(|r| {
            json!({
                "unit": r.unit,
                "version": r.version,
                "stage": r.stage,
                "success": r.success,
                "error": r.error,
                "backup": r.backup.as_ref().map(|b| b.path.display().to_string()),
                "target": r.target_path.display().to_string(),
            })
        })
        .collect();

    json!({
        "event": "summary",
        "status": if report.is_success() { "success" } else { "partial" },
        "exit_code": report.exit_code(),
        "units": units,
        "skipped": report.skipped,
        "interrupted": report.interrupted,
        "restart": report.restart,
        "commit": report.commit,
        "log_file": report.log_file.as_ref().map(|p| p.display().to_string()),
        "backup_dir": report.backup_dir.display().to_string(),
    })
}
