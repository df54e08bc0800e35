//! Environment provisioning
//!
//! Creates the isolated interpreter environment once and installs the
//! dependency list into it. An existing environment is reused as-is.

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::ports::{
    FileSystem, PipelineEvent, PipelineEventSink, Stage, ToolInvocation, ToolRunner,
};
use crate::domain::value_objects::Tool;
use crate::error::{HatchError, HatchResult};

use super::project::Project;
use super::run_tool;

/// The ready environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentHandle {
    pub dir: PathBuf,
    pub bin_dir: PathBuf,
    pub python: PathBuf,
    /// Created during this run
    pub created: bool,
}

/// Provision use case
pub struct ProvisionUseCase<TR, FS>
where
    TR: ToolRunner,
    FS: FileSystem,
{
    runner: TR,
    fs: FS,
}

impl<TR, FS> ProvisionUseCase<TR, FS>
where
    TR: ToolRunner,
    FS: FileSystem,
{
    pub fn new(runner: TR, fs: FS) -> Self {
        Self { runner, fs }
    }

    /// Ensure the environment exists.
    ///
    /// Tool availability is checked by the caller before this runs.
    pub fn ensure_environment(
        &self,
        project: &Project,
        events: &Arc<dyn PipelineEventSink>,
    ) -> HatchResult<EnvironmentHandle> {
        events.on_event(PipelineEvent::StageStarted {
            stage: Stage::Environment,
        });

        let layout = &project.layout;
        let mut handle = EnvironmentHandle {
            dir: layout.venv_dir().to_path_buf(),
            bin_dir: layout.venv_bin_dir(),
            python: layout.venv_python(),
            created: false,
        };

        if !self.fs.exists(layout.venv_dir()) {
            self.create(project, events)?;
            self.install_requirements(project, &handle, events)?;
            handle.created = true;
        }

        events.on_event(PipelineEvent::EnvironmentReady {
            dir: handle.dir.clone(),
            created: handle.created,
        });
        Ok(handle)
    }

    fn create(&self, project: &Project, events: &Arc<dyn PipelineEventSink>) -> HatchResult<()> {
        let mut invocation = ToolInvocation::new(project.program(Tool::Interpreter))
            .arg("-m")
            .arg("venv");
        if project.system_site_packages {
            invocation = invocation.arg("--system-site-packages");
        }
        let invocation = invocation
            .path_arg(project.layout.venv_dir())
            .current_dir(project.root());

        let output = run_tool(&self.runner, Tool::Interpreter, &invocation, events)?;
        if !output.succeeded() {
            return Err(HatchError::Provision {
                step: "creating the virtual environment".to_string(),
                exit_code: output.exit_code,
            });
        }
        Ok(())
    }

    fn install_requirements(
        &self,
        project: &Project,
        handle: &EnvironmentHandle,
        events: &Arc<dyn PipelineEventSink>,
    ) -> HatchResult<()> {
        if !self.fs.is_file(&project.requirements) {
            return Ok(());
        }

        let invocation = ToolInvocation::new(&handle.python)
            .args(["-m", "pip", "install", "-r"])
            .path_arg(&project.requirements)
            .current_dir(project.root());

        let output = run_tool(&self.runner, Tool::Interpreter, &invocation, events)?;
        if !output.succeeded() {
            return Err(HatchError::Provision {
                step: "installing dependencies".to_string(),
                exit_code: output.exit_code,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::FakeToolRunner;
    use crate::config::Config;
    use crate::domain::ports::{NoopEventSink, ToolOutput};
    use crate::infrastructure::LocalFs;
    use std::fs;
    use tempfile::tempdir;

    fn project(root: &std::path::Path) -> Project {
        let config: Config = toml::from_str("[app]\nid = \"org.example.App\"\n").unwrap();
        Project::from_config(&config, root).unwrap()
    }

    fn sink() -> Arc<dyn PipelineEventSink> {
        Arc::new(NoopEventSink)
    }

    #[test]
    fn creates_environment_and_installs_requirements() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("requirements.txt"), "requests\n").unwrap();
        let runner = FakeToolRunner::emulating();
        let project = project(dir.path());

        let handle = ProvisionUseCase::new(&runner, LocalFs::new())
            .ensure_environment(&project, &sink())
            .unwrap();

        assert!(handle.created);
        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0].get_args()[..3],
            ["-m".to_string(), "venv".to_string(), "--system-site-packages".to_string()]
        );
        assert_eq!(calls[1].program(), project.layout.venv_python());
        assert_eq!(calls[1].get_args()[..4], ["-m", "pip", "install", "-r"]);
    }

    #[test]
    fn skips_install_without_requirements_file() {
        let dir = tempdir().unwrap();
        let runner = FakeToolRunner::emulating();

        ProvisionUseCase::new(&runner, LocalFs::new())
            .ensure_environment(&project(dir.path()), &sink())
            .unwrap();

        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn existing_environment_invokes_nothing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("requirements.txt"), "requests\n").unwrap();
        fs::create_dir_all(dir.path().join("_venv")).unwrap();
        let runner = FakeToolRunner::emulating();

        let handle = ProvisionUseCase::new(&runner, LocalFs::new())
            .ensure_environment(&project(dir.path()), &sink())
            .unwrap();

        assert!(!handle.created);
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn install_failure_propagates_exit_code() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("requirements.txt"), "nope\n").unwrap();
        let runner = FakeToolRunner::with(|inv| {
            if inv.get_args().iter().any(|a| a == "pip") {
                ToolOutput::failure(2, "no matching distribution")
            } else {
                crate::application::testing::emulate(inv)
            }
        });

        let err = ProvisionUseCase::new(&runner, LocalFs::new())
            .ensure_environment(&project(dir.path()), &sink())
            .unwrap_err();

        assert!(matches!(err, HatchError::Provision { exit_code: Some(2), .. }));
        assert_eq!(err.exit_code(), 2);
    }
}
