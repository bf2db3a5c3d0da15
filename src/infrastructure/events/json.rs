//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for CI/automation consumption.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// Render one event as a JSON object
pub fn event_to_json(event: &DeployEvent) -> serde_json::Value {
    match event {
        DeployEvent::SessionStarted {
            source_root,
            target_root,
            unit_count,
        } => serde_json::json!({
            "event": "start",
            "command": "deploy",
            "source": source_root.display().to_string(),
            "target": target_root.display().to_string(),
            "unit_count": unit_count,
        }),

        DeployEvent::UnitStarted {
            unit,
            from_version,
            to_version,
        } => serde_json::json!({
            "event": "unit_start",
            "unit": unit,
            "from_version": from_version,
            "to_version": to_version,
        }),

        DeployEvent::StageReached { unit, stage } => serde_json::json!({
            "event": "stage",
            "unit": unit,
            "stage": stage.as_str(),
        }),

        DeployEvent::BackupCreated { unit, path } => serde_json::json!({
            "event": "backup_created",
            "unit": unit,
            "path": path.display().to_string(),
        }),

        DeployEvent::BackupSkipped { unit } => serde_json::json!({
            "event": "backup_skipped",
            "unit": unit,
        }),

        DeployEvent::PermissionWarning {
            unit,
            path,
            message,
        } => serde_json::json!({
            "event": "permission_warning",
            "unit": unit,
            "path": path.display().to_string(),
            "message": message,
        }),

        DeployEvent::UnitCompleted { unit, version } => serde_json::json!({
            "event": "unit_complete",
            "unit": unit,
            "version": version,
        }),

        DeployEvent::UnitFailed {
            unit,
            stage,
            kind,
            message,
        } => serde_json::json!({
            "event": "unit_error",
            "unit": unit,
            "stage": stage.as_str(),
            "kind": kind,
            "error": message,
        }),

        DeployEvent::UnitSkipped { unit, reason } => serde_json::json!({
            "event": "unit_skipped",
            "unit": unit,
            "reason": reason,
        }),

        DeployEvent::SessionCompleted {
            succeeded,
            failed,
            skipped,
        } => {
            let status = if *failed == 0 && *skipped == 0 {
                "success"
            } else {
                "partial"
            };
            serde_json::json!({
                "event": "complete",
                "command": "deploy",
                "status": status,
                "deployed": succeeded,
                "failed": failed,
                "skipped": skipped,
            })
        }

        DeployEvent::RestartFinished { success, message } => serde_json::json!({
            "event": "restart",
            "success": success,
            "message": message,
        }),

        DeployEvent::CommitFinished { committed, message } => serde_json::json!({
            "event": "commit",
            "committed": committed,
            "message": message,
        }),

        DeployEvent::Message { level, message } => serde_json::json!({
            "event": "log",
            "level": level,
            "message": message,
        }),
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        self.write_event(event_to_json(&event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::LogLevel;
    use crate::domain::value_objects::Stage;
    use std::path::PathBuf;
    use std::sync::Arc;

    /// Shared buffer writer for testing
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

    fn lines(buffer: &Arc<Mutex<Vec<u8>>>) -> Vec<serde_json::Value> {
        let output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        output
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn json_sink_outputs_start_event() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let sink = JsonEventSink::with_writer(SharedBuffer(buffer.clone()));

        sink.on_event(DeployEvent::SessionStarted {
            source_root: PathBuf::from("apps"),
            target_root: PathBuf::from("/opt/splunk/etc/apps"),
            unit_count: 2,
        });

        let events = lines(&buffer);
        assert_eq!(events[0]["event"], "start");
        assert_eq!(events[0]["unit_count"], 2);
        assert_eq!(events[0]["target"], "/opt/splunk/etc/apps");
    }

    #[test]
    fn json_sink_unit_failure_carries_stage_and_kind() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let sink = JsonEventSink::with_writer(SharedBuffer(buffer.clone()));

        sink.on_event(DeployEvent::UnitFailed {
            unit: "appB".to_string(),
            stage: Stage::Validated,
            kind: "ValidationError".to_string(),
            message: "missing required directory: apps/appB/metadata".to_string(),
        });

        let events = lines(&buffer);
        assert_eq!(events[0]["event"], "unit_error");
        assert_eq!(events[0]["stage"], "validated");
        assert_eq!(events[0]["kind"], "ValidationError");
    }

    #[test]
    fn json_sink_complete_status() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let sink = JsonEventSink::with_writer(SharedBuffer(buffer.clone()));

        sink.on_event(DeployEvent::SessionCompleted {
            succeeded: 1,
            failed: 1,
            skipped: 0,
        });
        sink.log(LogLevel::Warning, "careful");

        let events = lines(&buffer);
        assert_eq!(events[0]["status"], "partial");
        assert_eq!(events[1]["level"], "warning");
    }
}
