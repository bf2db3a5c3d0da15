//! Git committer for deployed unit sources

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use chrono::{DateTime, Local};

use crate::domain::ports::{CommitOutcome, VersionControl};
use crate::error::{AppDeployError, AppDeployResult};

/// Full commit message: subject, staged change summary, timestamp
pub fn commit_message(subject: &str, stat: &str, at: &DateTime<Local>) -> String {
    format!(
        "{subject}\n\nSummary of changes:\n{stat}\n\nDeployed at: {}",
        at.format("%Y-%m-%d %H:%M:%S")
    )
}

pub struct GitCommitter {
    repo_dir: PathBuf,
}

impl GitCommitter {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }

    /// Check if git is installed
    pub fn has_git() -> bool {
        Command::new("git")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn is_work_tree(&self) -> bool {
        self.git(&["rev-parse", "--is-inside-work-tree"])
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn git(&self, args: &[&str]) -> std::io::Result<Output> {
        Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .stdin(Stdio::null())
            .output()
    }

    fn checked(&self, args: &[&str]) -> AppDeployResult<Output> {
        let output = self.git(args).map_err(|e| AppDeployError::VersionControl {
            message: format!("cannot run git {}: {e}", args.join(" ")),
        })?;
        if !output.status.success() {
            return Err(AppDeployError::VersionControl {
                message: format!(
                    "git {} failed: {}",
                    args.first().copied().unwrap_or_default(),
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }
        Ok(output)
    }

    fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(&self.repo_dir).unwrap_or(path)
    }
}

impl VersionControl for GitCommitter {
    fn commit(&self, paths: &[PathBuf], subject: &str) -> AppDeployResult<CommitOutcome> {
        if !Self::has_git() || !self.is_work_tree() {
            return Ok(CommitOutcome::Unavailable);
        }

        let rendered: Vec<String> = paths
            .iter()
            .map(|p| self.relative(p).to_string_lossy().into_owned())
            .collect();
        let mut add = vec!["add", "--"];
        add.extend(rendered.iter().map(String::as_str));
        self.checked(&add)?;

        // exit 0 means nothing staged
        let staged = self
            .git(&["diff", "--cached", "--quiet"])
            .map_err(|e| AppDeployError::VersionControl {
                message: format!("cannot run git diff: {e}"),
            })?;
        if staged.status.success() {
            return Ok(CommitOutcome::NothingToCommit);
        }

        let stat = self.checked(&["diff", "--cached", "--stat"])?;
        let summary = String::from_utf8_lossy(&stat.stdout).trim().to_string();
        let message = commit_message(subject, &summary, &Local::now());
        self.checked(&["commit", "-m", &message])?;

        Ok(CommitOutcome::Committed { summary })
    }
}
