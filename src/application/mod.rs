//! Application Layer
//!
//! Use cases that orchestrate the build flow.
//! This layer:
//! - Depends on Domain layer (entities, ports, value objects)
//! - Does NOT spawn processes or touch disk directly (that is Infrastructure)
//! - Publishes progress as `PipelineEvent`s
//!
//! ## Use Cases
//!
//! - `ProvisionUseCase` - Creates the isolated environment and installs dependencies
//! - `CompileUseCase` - Batch-compiles each source group
//! - `BundleUseCase` - Stages stylesheets, writes the manifest, bundles and derives the schema
//! - `LaunchUseCase` - Generates the bootstrap and runtime module, launches the app
//! - `BuildPipeline` - Runs the stages in order (`build`, `run`, `quick`)
//! - `CleanUseCase` - Removes generated output
//! - `DoctorUseCase` - Reports tools and artifacts

pub mod bundle;
pub mod clean;
pub mod compile;
pub mod doctor;
pub mod launch;
pub mod pipeline;
pub mod preflight;
pub mod project;
pub mod provision;

#[cfg(test)]
pub mod testing;

use std::sync::Arc;

use crate::domain::ports::{PipelineEvent, PipelineEventSink, ToolInvocation, ToolOutput, ToolRunner};
use crate::domain::value_objects::Tool;
use crate::error::HatchResult;

pub use bundle::BundleUseCase;
pub use clean::{CleanOptions, CleanResult, CleanUseCase};
pub use compile::{CompileOptions, CompileReport, CompileUseCase};
pub use doctor::{ArtifactStatus, ConfigStatus, DoctorReport, DoctorUseCase};
pub use launch::LaunchUseCase;
pub use pipeline::{BuildPipeline, BuildReport};
pub use preflight::{require_tools, tool_report, ToolStatus};
pub use project::{GroupSpec, Project};
pub use provision::{EnvironmentHandle, ProvisionUseCase};

/// Run a tool, publishing the invocation and any failure.
///
/// A non-zero exit is returned as output, not as an error; each stage maps
/// it to its own error variant.
pub(crate) fn run_tool<TR: ToolRunner>(
    runner: &TR,
    tool: Tool,
    invocation: &ToolInvocation,
    events: &Arc<dyn PipelineEventSink>,
) -> HatchResult<ToolOutput> {
    if events.wants_detailed_events() {
        events.on_event(PipelineEvent::ToolInvoked {
            tool,
            command: invocation.to_string(),
        });
    }

    let output = runner.run(invocation)?;
    if !output.succeeded() {
        events.on_event(PipelineEvent::ToolFailed {
            tool,
            exit_code: output.exit_code,
            stderr: output.stderr.clone(),
        });
    }
    Ok(output)
}
