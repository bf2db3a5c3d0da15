//! Console Event Sink
//!
//! Human-readable progress lines for an operator watching the terminal.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{DeployEvent, DeployEventSink, LogLevel};
use crate::ui::theme::{self, colors, Icon};

pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    supports_color: bool,
    supports_unicode: bool,
    verbose: u8,
}

impl ConsoleEventSink {
    pub fn stdout(supports_color: bool, supports_unicode: bool) -> Self {
        Self::with_writer(io::stdout(), supports_color, supports_unicode)
    }

    pub fn with_writer<W: Write + Send + 'static>(
        writer: W,
        supports_color: bool,
        supports_unicode: bool,
    ) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            supports_color,
            supports_unicode,
            verbose: 0,
        }
    }

    /// Per-stage lines and debug messages show from `-v` up
    pub fn with_verbosity(mut self, verbose: u8) -> Self {
        self.verbose = verbose;
        self
    }

    fn icon(&self, icon: Icon) -> String {
        icon.colored(self.supports_color, self.supports_unicode)
    }

    fn dim(&self, text: &str) -> String {
        theme::paint(text, colors::DIM, self.supports_color)
    }

    /// One line per event; `None` for events this sink hides
    fn format(&self, event: &DeployEvent) -> Option<String> {
        let line = match event {
            DeployEvent::SessionStarted {
                source_root,
                target_root,
                unit_count,
            } => format!(
                "{} Deploying {} app(s) from {} to {}",
                self.icon(Icon::Deploy),
                unit_count,
                source_root.display(),
                target_root.display()
            ),
            DeployEvent::UnitStarted {
                unit,
                from_version,
                to_version,
            } => format!(
                "{} {} {}",
                self.icon(Icon::Progress),
                theme::paint(unit, colors::INFO, self.supports_color),
                self.dim(&format!("({from_version} -> {to_version})"))
            ),
            DeployEvent::StageReached { stage, .. } => {
                if self.verbose == 0 {
                    return None;
                }
                format!("  {} {}", self.icon(Icon::Arrow), self.dim(stage.as_str()))
            }
            DeployEvent::BackupCreated { path, .. } => format!(
                "  {} backup: {}",
                self.icon(Icon::Arrow),
                path.display()
            ),
            DeployEvent::BackupSkipped { .. } => format!(
                "  {} {}",
                self.icon(Icon::Arrow),
                self.dim("no previous deployment, nothing to back up")
            ),
            DeployEvent::PermissionWarning { path, message, .. } => format!(
                "  {} could not set permissions on {}: {}",
                self.icon(Icon::Warning),
                path.display(),
                message
            ),
            DeployEvent::UnitCompleted { unit, version } => format!(
                "{} {} deployed (v{})",
                self.icon(Icon::Success),
                unit,
                version
            ),
            DeployEvent::UnitFailed {
                unit,
                stage,
                message,
                ..
            } => format!(
                "{} {} failed at {}: {}",
                self.icon(Icon::Error),
                unit,
                stage.transition_label(),
                message
            ),
            DeployEvent::UnitSkipped { unit, reason } => format!(
                "{} {} skipped: {}",
                self.icon(Icon::Pending),
                unit,
                reason
            ),
            // The summary block reports totals
            DeployEvent::SessionCompleted { .. } => return None,
            DeployEvent::RestartFinished { success, message }
            | DeployEvent::CommitFinished {
                committed: success,
                message,
            } => {
                let icon = if *success { Icon::Success } else { Icon::Warning };
                format!("{} {}", self.icon(icon), message)
            }
            DeployEvent::Message { level, message } => {
                let icon = match level {
                    LogLevel::Debug if self.verbose == 0 => return None,
                    LogLevel::Debug => return Some(format!("  {}", self.dim(message))),
                    LogLevel::Info => Icon::Arrow,
                    LogLevel::Success => Icon::Success,
                    LogLevel::Warning => Icon::Warning,
                    LogLevel::Error => Icon::Error,
                };
                format!("{} {}", self.icon(icon), message)
            }
        };
        Some(line)
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        let Some(line) = self.format(&event) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.verbose > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Stage;
    use std::path::PathBuf;
    use std::sync::Arc;

    #[derive(Clone)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn sink(verbose: u8) -> (ConsoleEventSink, Arc<Mutex<Vec<u8>>>) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let sink = ConsoleEventSink::with_writer(SharedBuffer(buffer.clone()), false, false)
            .with_verbosity(verbose);
        (sink, buffer)
    }

    fn output(buffer: &Arc<Mutex<Vec<u8>>>) -> String {
        String::from_utf8(buffer.lock().unwrap().clone()).unwrap()
    }

    #[test]
    fn failure_line_names_transition() {
        let (sink, buffer) = sink(0);
        sink.on_event(DeployEvent::UnitFailed {
            unit: "appA".to_string(),
            stage: Stage::Verified,
            kind: "PostVerifyError".to_string(),
            message: "missing metadata".to_string(),
        });
        assert_eq!(
            output(&buffer),
            "[FAIL] appA failed at post-deploy verification: missing metadata\n"
        );
    }

    #[test]
    fn stage_lines_need_verbosity() {
        let (quiet, quiet_buf) = sink(0);
        let (loud, loud_buf) = sink(1);
        let event = DeployEvent::StageReached {
            unit: "appA".to_string(),
            stage: Stage::BackedUp,
        };

        quiet.on_event(event.clone());
        loud.on_event(event);

        assert!(output(&quiet_buf).is_empty());
        assert!(output(&loud_buf).contains("backed-up"));
    }

    #[test]
    fn backup_line_shows_archive() {
        let (sink, buffer) = sink(0);
        sink.on_event(DeployEvent::BackupCreated {
            unit: "appA".to_string(),
            path: PathBuf::from("backups/appA_backup_20261019_143005.tar.gz"),
        });
        assert!(output(&buffer).contains("appA_backup_20261019_143005.tar.gz"));
    }

    #[test]
    fn debug_messages_hidden_by_default() {
        let (sink, buffer) = sink(0);
        sink.log(LogLevel::Debug, "reading descriptor");
        sink.log(LogLevel::Warning, "label missing");
        assert_eq!(output(&buffer), "[WARN] label missing\n");
    }
}
