//! Error types for Hatch
//!
//! Uses `thiserror` for library errors. Every variant knows which pipeline
//! stage it belongs to and which process exit code it maps to.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::FsError;
use crate::domain::value_objects::Tool;

/// Result type alias for Hatch operations
pub type HatchResult<T> = Result<T, HatchError>;

/// Main error type for Hatch operations
#[derive(Error, Debug)]
pub enum HatchError {
    /// One or more required external executables are not on the search path
    #[error("missing required tools: {}", tool_names(.tools))]
    ToolMissing { tools: Vec<Tool> },

    /// Creating the isolated environment or installing dependencies failed
    #[error("environment provisioning failed: {step} exited with {}", exit_label(.exit_code))]
    Provision {
        step: String,
        exit_code: Option<i32>,
    },

    /// The UI compiler returned non-zero for a group
    #[error("UI compilation failed for group '{group}' (exit {})", exit_label(.exit_code))]
    Compilation {
        group: String,
        exit_code: Option<i32>,
    },

    /// The UI compiler succeeded but an expected output was not produced
    #[error("UI compiler did not produce {path} for group '{group}'")]
    CompiledOutputMissing { group: String, path: PathBuf },

    /// A file referenced by the resource manifest is absent
    #[error("resource manifest references missing file {path}")]
    BundleMissingFile { path: PathBuf },

    /// The resource bundler returned non-zero
    #[error("resource bundling failed (exit {})", exit_label(.exit_code))]
    Bundle { exit_code: Option<i32> },

    /// Reading the schema template or compiling the schema failed
    #[error("settings schema compilation failed: {message}")]
    SchemaCompilation {
        message: String,
        exit_code: Option<i32>,
    },

    /// Fast-path launch without a prior full build
    #[error("no previous build found: {missing} does not exist")]
    MissingBuild { missing: PathBuf },

    /// The resource archive is absent at launch time
    #[error("resource archive not found at {path}")]
    ResourceLoad { path: PathBuf },

    /// Invalid or unreadable project configuration
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Project configuration file not found
    #[error("no hatch.toml found in {dir}")]
    ConfigNotFound { dir: PathBuf },

    /// A declared source or stylesheet does not exist
    #[error("source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Spawning an external process failed
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Incremental build state could not be read or written
    #[error("build state at {path} is unusable: {message}")]
    BuildState { path: PathBuf, message: String },

    /// File system operation failed
    #[error(transparent)]
    Fs(#[from] FsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HatchError {
    /// Process exit code for this error.
    ///
    /// Failures of external tools propagate the tool's own exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            HatchError::Provision { exit_code, .. }
            | HatchError::Compilation { exit_code, .. }
            | HatchError::Bundle { exit_code }
            | HatchError::SchemaCompilation { exit_code, .. } => nonzero_or_one(*exit_code),
            _ => 1,
        }
    }

    /// Short label of the stage that failed, used in diagnostics.
    pub fn stage(&self) -> &'static str {
        match self {
            HatchError::ToolMissing { .. } | HatchError::Provision { .. } => "environment",
            HatchError::Compilation { .. }
            | HatchError::CompiledOutputMissing { .. }
            | HatchError::SourceNotFound { .. }
            | HatchError::BuildState { .. } => "compile",
            HatchError::BundleMissingFile { .. } | HatchError::Bundle { .. } => "bundle",
            HatchError::SchemaCompilation { .. } => "schema",
            HatchError::MissingBuild { .. } | HatchError::ResourceLoad { .. } => "launch",
            HatchError::Config { .. } | HatchError::ConfigNotFound { .. } => "config",
            HatchError::Spawn { .. } | HatchError::Fs(_) | HatchError::Io(_) => "io",
        }
    }

    /// Stable machine-readable code for JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            HatchError::ToolMissing { .. } => "tool_missing",
            HatchError::Provision { .. } => "provision",
            HatchError::Compilation { .. } => "compilation",
            HatchError::CompiledOutputMissing { .. } => "compiled_output_missing",
            HatchError::BundleMissingFile { .. } | HatchError::Bundle { .. } => "bundle",
            HatchError::SchemaCompilation { .. } => "schema_compilation",
            HatchError::MissingBuild { .. } => "missing_build",
            HatchError::ResourceLoad { .. } => "resource_load",
            HatchError::Config { .. } | HatchError::ConfigNotFound { .. } => "config",
            HatchError::SourceNotFound { .. } => "source_not_found",
            HatchError::Spawn { .. } => "spawn",
            HatchError::BuildState { .. } => "build_state",
            HatchError::Fs(_) | HatchError::Io(_) => "io",
        }
    }
}

fn nonzero_or_one(code: Option<i32>) -> i32 {
    match code {
        Some(c) if c != 0 => c,
        _ => 1,
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => "signal".to_string(),
    }
}

fn tool_names(tools: &[Tool]) -> String {
    tools
        .iter()
        .map(|t| t.label())
        .collect::<Vec<_>>()
        .join(", ")
}
