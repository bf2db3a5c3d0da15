//! Isolated environment for running the appdeploy binary.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Result of running an appdeploy CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON, skipping blank lines
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).unwrap_or_else(|e| panic!("bad NDJSON {l:?}: {e}")))
            .collect()
    }
}

/// Temp directory laid out like a deployment workstation:
/// `apps/` (sources), `splunk/etc/apps/` (target), `backups/`, `logs/`.
pub struct TestEnv {
    pub root: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let env = Self {
            root: tempfile::tempdir().expect("create temp dir"),
        };
        fs::create_dir_all(env.source()).expect("create source root");
        fs::create_dir_all(env.target_apps()).expect("create target root");
        fs::create_dir_all(env.home()).expect("create home");
        env
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn source(&self) -> PathBuf {
        self.path("apps")
    }

    pub fn target_home(&self) -> PathBuf {
        self.path("splunk")
    }

    pub fn target_apps(&self) -> PathBuf {
        self.path("splunk/etc/apps")
    }

    pub fn backups(&self) -> PathBuf {
        self.path("backups")
    }

    pub fn logs(&self) -> PathBuf {
        self.path("logs")
    }

    fn home(&self) -> PathBuf {
        self.path("home")
    }

    /// Backup archives for `unit`, sorted by name
    pub fn archives_for(&self, unit: &str) -> Vec<PathBuf> {
        let prefix = format!("{unit}_backup_");
        let mut found: Vec<PathBuf> = fs::read_dir(self.backups())
            .map(|entries| {
                entries
                    .flatten()
                    .map(|e| e.path())
                    .filter(|p| {
                        p.file_name()
                            .and_then(|n| n.to_str())
                            .is_some_and(|n| n.starts_with(&prefix) && n.ends_with(".tar.gz"))
                    })
                    .collect()
            })
            .unwrap_or_default();
        found.sort();
        found
    }

    pub fn log_files(&self) -> Vec<PathBuf> {
        fs::read_dir(self.logs())
            .map(|entries| entries.flatten().map(|e| e.path()).collect())
            .unwrap_or_default()
    }

    /// Run a subcommand with every path flag pointed into this environment
    pub fn run(&self, subcommand: &str, args: &[&str]) -> TestResult {
        let source = self.source();
        let home = self.target_home();
        let apps = self.target_apps();
        let backups = self.backups();
        let logs = self.logs();

        let mut full: Vec<&str> = vec![subcommand];
        full.extend_from_slice(args);
        full.extend_from_slice(&[
            "--source",
            path_str(&source),
            "--target-home",
            path_str(&home),
            "--target-apps",
            path_str(&apps),
            "--backup-dir",
            path_str(&backups),
            "--log-dir",
            path_str(&logs),
        ]);
        self.run_raw(&full)
    }

    /// Run with exactly the given arguments
    pub fn run_raw(&self, args: &[&str]) -> TestResult {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_appdeploy"));
        cmd.current_dir(self.root.path())
            .args(args)
            .env("HOME", self.home())
            .env("XDG_CONFIG_HOME", self.home().join(".config"))
            .env("NO_COLOR", "1")
            .env("TERM", "dumb");
        for key in [
            "APPDEPLOY_SOURCE",
            "APPDEPLOY_TARGET_HOME",
            "APPDEPLOY_TARGET_APPS",
            "APPDEPLOY_BACKUP_DIR",
            "APPDEPLOY_LOG_DIR",
            "APPDEPLOY_RESTART_TIMEOUT",
        ] {
            cmd.env_remove(key);
        }

        to_result(cmd.output().expect("failed to execute appdeploy"))
    }
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
