//! JSON Event Sink
//!
//! Outputs pipeline events as NDJSON for CI/automation consumption.

use std::io::{self, Write};
use std::sync::Mutex;

use serde_json::json;

use crate::domain::ports::{PipelineEvent, PipelineEventSink};

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    command: &'static str,
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout(command: &'static str) -> Self {
        Self::with_writer(command, io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(command: &'static str, writer: W) -> Self {
        Self {
            command,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, mut event: serde_json::Value) {
        if let Some(obj) = event.as_object_mut() {
            obj.insert("command".to_string(), json!(self.command));
        }
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl PipelineEventSink for JsonEventSink {
    fn on_event(&self, event: PipelineEvent) {
        let json = match event {
            PipelineEvent::StageStarted { stage } => json!({
                "event": "stage_start",
                "stage": stage.as_str(),
            }),

            PipelineEvent::ToolInvoked { tool, command } => json!({
                "event": "tool",
                "tool": tool.key(),
                "command_line": command,
            }),

            PipelineEvent::ToolFailed {
                tool,
                exit_code,
                stderr,
            } => json!({
                "event": "tool_failed",
                "tool": tool.key(),
                "exit_code": exit_code,
                "stderr": stderr,
            }),

            PipelineEvent::EnvironmentReady { dir, created } => json!({
                "event": "environment_ready",
                "path": dir.display().to_string(),
                "created": created,
            }),

            PipelineEvent::GroupCompiled { group, outputs } => json!({
                "event": "group_compiled",
                "group": group,
                "outputs": outputs,
            }),

            PipelineEvent::GroupSkipped { group } => json!({
                "event": "group_skipped",
                "group": group,
                "reason": "up_to_date",
            }),

            PipelineEvent::GroupEmpty { group } => json!({
                "event": "group_skipped",
                "group": group,
                "reason": "empty",
            }),

            PipelineEvent::ManifestWritten { path, entries } => json!({
                "event": "manifest_written",
                "path": path.display().to_string(),
                "entries": entries,
            }),

            PipelineEvent::ArchiveWritten { path } => json!({
                "event": "archive_written",
                "path": path.display().to_string(),
            }),

            PipelineEvent::SchemaCompiled {
                path,
                substitutions,
            } => json!({
                "event": "schema_compiled",
                "path": path.display().to_string(),
                "substitutions": substitutions,
            }),

            PipelineEvent::FileGenerated { path } => json!({
                "event": "file_generated",
                "path": path.display().to_string(),
            }),

            PipelineEvent::Warning { message } => json!({
                "event": "warning",
                "message": message,
            }),

            PipelineEvent::Launching { bootstrap } => json!({
                "event": "launch",
                "bootstrap": bootstrap.display().to_string(),
            }),

            PipelineEvent::Exited { exit_code } => json!({
                "event": "exited",
                "exit_code": exit_code,
            }),
        };

        self.write_event(json);
    }
}
