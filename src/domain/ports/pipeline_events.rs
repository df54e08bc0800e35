//! Pipeline Event Port
//!
//! Observable interface for the build pipeline. Progress, tool invocations
//! and warnings flow through here to the console, an NDJSON stream, or
//! nowhere.

use std::path::PathBuf;

use crate::domain::value_objects::Tool;

/// Pipeline stage, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Environment,
    Compile,
    Bundle,
    Schema,
    Runtime,
    Launch,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Environment => "environment",
            Stage::Compile => "compile",
            Stage::Bundle => "bundle",
            Stage::Schema => "schema",
            Stage::Runtime => "runtime",
            Stage::Launch => "launch",
        }
    }

    /// Progressive verb for console output
    pub fn title(&self) -> &'static str {
        match self {
            Stage::Environment => "Preparing environment",
            Stage::Compile => "Compiling UI",
            Stage::Bundle => "Bundling resources",
            Stage::Schema => "Compiling settings schema",
            Stage::Runtime => "Writing launcher",
            Stage::Launch => "Launching",
        }
    }
}

/// Event emitted during a pipeline run
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// A stage began
    StageStarted { stage: Stage },

    /// An external tool is about to run
    ToolInvoked { tool: Tool, command: String },

    /// An external tool exited non-zero
    ToolFailed {
        tool: Tool,
        exit_code: Option<i32>,
        stderr: String,
    },

    /// Isolated environment is ready
    EnvironmentReady { dir: PathBuf, created: bool },

    /// A group compiled
    GroupCompiled { group: String, outputs: usize },

    /// A group was up to date and skipped
    GroupSkipped { group: String },

    /// A group declares no sources
    GroupEmpty { group: String },

    /// Manifest descriptor written
    ManifestWritten { path: PathBuf, entries: usize },

    /// Resource archive replaced
    ArchiveWritten { path: PathBuf },

    /// Schema derived and compiled
    SchemaCompiled { path: PathBuf, substitutions: usize },

    /// Generated file written (runtime module, bootstrap)
    FileGenerated { path: PathBuf },

    /// Non-fatal problem
    Warning { message: String },

    /// Application process about to start
    Launching { bootstrap: PathBuf },

    /// Application process exited
    Exited { exit_code: i32 },
}

/// Trait for receiving pipeline events
///
/// Implementations:
/// - ConsoleEventSink: progress display in terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: silent operation
pub trait PipelineEventSink: Send + Sync {
    /// Handle a pipeline event
    fn on_event(&self, event: PipelineEvent);

    /// Check if this sink wants per-tool events
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl PipelineEventSink for NoopEventSink {
    fn on_event(&self, _event: PipelineEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}

/// Records events in memory; used by tests across the crate.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingEventSink {
    events: std::sync::Mutex<Vec<PipelineEvent>>,
}

#[cfg(test)]
impl RecordingEventSink {
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                PipelineEvent::Warning { message } => Some(message),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl PipelineEventSink for RecordingEventSink {
    fn on_event(&self, event: PipelineEvent) {
        self.events.lock().unwrap().push(event);
    }
}
