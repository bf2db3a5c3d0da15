//! Host restart via `<home>/bin/<executable> restart`

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStderr, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

use crate::domain::ports::RestartInvoker;
use crate::domain::value_objects::PlatformProfile;
use crate::error::{AppDeployError, AppDeployResult};

pub const DEFAULT_RESTART_TIMEOUT: Duration = Duration::from_secs(300);

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// How long to wait for stderr to drain after a failed restart exits
const STDERR_GRACE: Duration = Duration::from_secs(2);

/// Reads stderr on its own thread. The reader is never joined: daemons
/// forked by the restart may hold the pipe open.
fn collect_stderr(stderr: Option<ChildStderr>) -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    if let Some(mut stderr) = stderr {
        thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = stderr.read_to_end(&mut buf);
            let _ = tx.send(String::from_utf8_lossy(&buf).trim().to_string());
        });
    }
    rx
}

pub struct ProcessRestarter {
    profile: PlatformProfile,
    poll_interval: Duration,
}

impl ProcessRestarter {
    pub fn new(profile: PlatformProfile) -> Self {
        Self {
            profile,
            poll_interval: POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// First candidate executable that exists under `<home>/bin`
    pub fn locate(&self, target_home: &Path) -> Option<PathBuf> {
        self.profile
            .executable_candidates(target_home)
            .into_iter()
            .find(|p| p.is_file())
    }

    fn wait_bounded(&self, child: &mut Child, timeout: Duration) -> AppDeployResult<ExitStatus> {
        let deadline = Instant::now() + timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(AppDeployError::Restart {
                        message: format!("restart timed out after {} seconds", timeout.as_secs()),
                    });
                }
                Ok(None) => thread::sleep(self.poll_interval),
                Err(e) => {
                    return Err(AppDeployError::Restart {
                        message: format!("waiting for restart failed: {e}"),
                    })
                }
            }
        }
    }
}

impl RestartInvoker for ProcessRestarter {
    fn restart(&self, target_home: &Path, timeout: Duration) -> AppDeployResult<()> {
        let executable = self.locate(target_home).ok_or_else(|| AppDeployError::Restart {
            message: format!(
                "no {} executable under {}",
                self.profile.executable_name,
                target_home.join("bin").display()
            ),
        })?;

        let mut child = Command::new(&executable)
            .arg("restart")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| AppDeployError::Restart {
                message: format!("cannot run {}: {e}", executable.display()),
            })?;

        let stderr = collect_stderr(child.stderr.take());
        let status = self.wait_bounded(&mut child, timeout)?;
        if status.success() {
            return Ok(());
        }

        let mut message = format!("{} restart exited with {status}", executable.display());
        if let Ok(output) = stderr.recv_timeout(STDERR_GRACE) {
            if !output.is_empty() {
                message = format!("{message}: {output}");
            }
        }
        Err(AppDeployError::Restart { message })
    }
}
