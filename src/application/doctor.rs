//! Environment diagnostics
//!
//! Reports tool availability, the configuration file and which build
//! artifacts are present. Never fails; the caller decides the exit code.

use std::path::PathBuf;

use crate::domain::ports::{FileSystem, ToolLocator};

use super::preflight::{tool_report, ToolStatus};
use super::project::Project;

/// Presence of one build artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactStatus {
    pub label: &'static str,
    pub path: PathBuf,
    pub present: bool,
}

/// Where the configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigStatus {
    Loaded { path: PathBuf, warnings: usize },
    /// No project file; defaults were used
    Missing { expected: PathBuf },
}

#[derive(Debug, Clone)]
pub struct DoctorReport {
    pub tools: Vec<ToolStatus>,
    pub config: ConfigStatus,
    pub artifacts: Vec<ArtifactStatus>,
}

impl DoctorReport {
    pub fn missing_tools(&self) -> Vec<&ToolStatus> {
        self.tools.iter().filter(|t| !t.found()).collect()
    }

    pub fn is_healthy(&self) -> bool {
        self.tools.iter().all(ToolStatus::found)
    }

    /// Whether `hatch quick` would find a previous build
    pub fn quick_ready(&self) -> bool {
        self.artifacts
            .iter()
            .filter(|a| matches!(a.label, "build dir" | "environment" | "bootstrap"))
            .all(|a| a.present)
    }
}

pub struct DoctorUseCase<TL, FS>
where
    TL: ToolLocator,
    FS: FileSystem,
{
    locator: TL,
    fs: FS,
}

impl<TL, FS> DoctorUseCase<TL, FS>
where
    TL: ToolLocator,
    FS: FileSystem,
{
    pub fn new(locator: TL, fs: FS) -> Self {
        Self { locator, fs }
    }

    pub fn diagnose(&self, project: &Project, config: ConfigStatus) -> DoctorReport {
        let layout = &project.layout;
        let artifacts = [
            ("environment", layout.venv_dir().to_path_buf()),
            ("build dir", layout.build_dir().to_path_buf()),
            ("resource archive", layout.archive_path()),
            ("compiled schemas", layout.schemas_dir().join("gschemas.compiled")),
            ("bootstrap", layout.bootstrap_path()),
        ]
        .into_iter()
        .map(|(label, path)| ArtifactStatus {
            label,
            present: self.fs.exists(&path),
            path,
        })
        .collect();

        DoctorReport {
            tools: tool_report(project, &self.locator),
            config,
            artifacts,
        }
    }
}
