//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod build_state_repository;
pub mod file_system;
pub mod pipeline_events;
pub mod tool_locator;
pub mod tool_runner;

pub use build_state_repository::BuildStateRepository;
pub use file_system::{FileSystem, FsError, FsResult};
#[cfg(test)]
pub use pipeline_events::RecordingEventSink;
pub use pipeline_events::{NoopEventSink, PipelineEvent, PipelineEventSink, Stage};
pub use tool_locator::ToolLocator;
pub use tool_runner::{ToolInvocation, ToolOutput, ToolRunner};
