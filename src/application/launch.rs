//! Launching the application
//!
//! A full build writes the runtime-configuration module and the bootstrap
//! unit; launching runs the bootstrap with the environment's interpreter.
//! The fast path only launches, and refuses to when a previous build is
//! incomplete.

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::entities::{
    render_bootstrap, BootstrapSpec, LaunchEnvironment, LaunchPlan, RuntimeConfig,
};
use crate::domain::ports::{
    FileSystem, PipelineEvent, PipelineEventSink, Stage, ToolInvocation, ToolRunner,
};
use crate::error::{HatchError, HatchResult};

use super::project::Project;

/// Launch use case
pub struct LaunchUseCase<TR, FS>
where
    TR: ToolRunner,
    FS: FileSystem,
{
    runner: TR,
    fs: FS,
    app_stdout_to_stderr: bool,
}

impl<TR, FS> LaunchUseCase<TR, FS>
where
    TR: ToolRunner,
    FS: FileSystem,
{
    pub fn new(runner: TR, fs: FS) -> Self {
        Self {
            runner,
            fs,
            app_stdout_to_stderr: false,
        }
    }

    /// Route the application's stdout to stderr, keeping stdout for events.
    pub fn with_app_stdout_to_stderr(mut self, redirect: bool) -> Self {
        self.app_stdout_to_stderr = redirect;
        self
    }

    /// Render `<build>/runtime/<module>.py`.
    pub fn write_runtime_config(
        &self,
        project: &Project,
        events: &Arc<dyn PipelineEventSink>,
    ) -> HatchResult<PathBuf> {
        let config = RuntimeConfig {
            app_id: project.app_id.clone(),
            app_name: project.app_name.clone(),
            version: project.version.clone(),
            prefix: project.prefix.clone(),
            build_dir: project.layout.build_dir().to_string_lossy().into_owned(),
        };

        let content = match &project.runtime_template {
            Some(template) => {
                let text = self.fs.read(template).map_err(|_| HatchError::SourceNotFound {
                    path: template.clone(),
                })?;
                config.render_template(&text)
            }
            None => config.render_default(),
        };

        let path = project
            .layout
            .runtime_dir()
            .join(format!("{}.py", project.runtime_module));
        self.fs.write(&path, &content)?;
        events.on_event(PipelineEvent::FileGenerated { path: path.clone() });
        Ok(path)
    }

    /// Render `<build>/launcher.py`.
    pub fn write_bootstrap(
        &self,
        project: &Project,
        events: &Arc<dyn PipelineEventSink>,
    ) -> HatchResult<PathBuf> {
        events.on_event(PipelineEvent::StageStarted {
            stage: Stage::Runtime,
        });

        let env = self.app_environment(project);
        let runtime_dir = project.layout.runtime_dir();
        let archive = project.layout.archive_path();
        let script = render_bootstrap(&BootstrapSpec {
            project_root: project.root(),
            runtime_dir: &runtime_dir,
            archive: &archive,
            entry: &project.entry,
            runtime_module: &project.runtime_module,
            env: &env,
        });

        let path = project.layout.bootstrap_path();
        self.fs.write(&path, &script)?;
        events.on_event(PipelineEvent::FileGenerated { path: path.clone() });
        Ok(path)
    }

    /// Variables the application itself needs: schema dir, then extras.
    pub fn app_environment(&self, project: &Project) -> LaunchEnvironment {
        let mut env = LaunchEnvironment::new();
        env.set(
            &project.schema_dir_var,
            project.layout.schemas_dir().to_string_lossy(),
        );
        for (name, value) in &project.extra_env {
            env.set(name, value);
        }
        env
    }

    /// Full launch environment with the isolated environment activated.
    ///
    /// `current_path` is the caller's `PATH`.
    pub fn launch_environment(
        &self,
        project: &Project,
        current_path: Option<OsString>,
    ) -> LaunchEnvironment {
        let mut env = self.app_environment(project);
        let layout = &project.layout;
        env.set("VIRTUAL_ENV", layout.venv_dir().to_string_lossy());

        let mut paths = vec![layout.venv_bin_dir()];
        if let Some(current) = current_path {
            paths.extend(std::env::split_paths(&current));
        }
        let joined = std::env::join_paths(paths)
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|_| layout.venv_bin_dir().to_string_lossy().into_owned());
        env.set("PATH", joined);
        env
    }

    pub fn plan(&self, project: &Project) -> LaunchPlan {
        LaunchPlan {
            interpreter: project.layout.venv_python(),
            bootstrap: project.layout.bootstrap_path(),
            working_dir: project.root().to_path_buf(),
            env: self.launch_environment(project, std::env::var_os("PATH")),
        }
    }

    /// Run the bootstrap and return the application's exit code.
    pub fn launch(
        &self,
        project: &Project,
        events: &Arc<dyn PipelineEventSink>,
    ) -> HatchResult<i32> {
        events.on_event(PipelineEvent::StageStarted {
            stage: Stage::Launch,
        });

        let archive = project.layout.archive_path();
        if !self.fs.is_file(&archive) {
            return Err(HatchError::ResourceLoad { path: archive });
        }

        let plan = self.plan(project);
        let mut invocation = ToolInvocation::new(&plan.interpreter)
            .path_arg(&plan.bootstrap)
            .current_dir(&plan.working_dir)
            .stdout_to_stderr(self.app_stdout_to_stderr);
        for (name, value) in plan.env.vars() {
            invocation = invocation.env(name, value);
        }

        if let Err(message) = self.runner.forward_interrupts() {
            events.on_event(PipelineEvent::Warning {
                message: format!("{message}; Ctrl+C will stop hatch as well as the application"),
            });
        }

        events.on_event(PipelineEvent::Launching {
            bootstrap: plan.bootstrap.clone(),
        });
        let exit_code = self.runner.run_interactive(&invocation)?;
        events.on_event(PipelineEvent::Exited { exit_code });
        Ok(exit_code)
    }

    /// Relaunch a previous build without building anything.
    ///
    /// Nothing is written when the build is incomplete.
    pub fn quick_launch(
        &self,
        project: &Project,
        events: &Arc<dyn PipelineEventSink>,
    ) -> HatchResult<i32> {
        let layout = &project.layout;
        for required in [
            layout.build_dir().to_path_buf(),
            layout.venv_dir().to_path_buf(),
            layout.bootstrap_path(),
        ] {
            if !self.fs.exists(&required) {
                return Err(HatchError::MissingBuild { missing: required });
            }
        }
        self.launch(project, events)
    }
}
