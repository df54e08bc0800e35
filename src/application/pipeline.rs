//! Build pipeline
//!
//! Runs the stages in dependency order: tool check, environment, compile,
//! bundle, schema, runtime module and bootstrap. Any failure aborts the run.

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::entities::SchemaArtifact;
use crate::domain::ports::{
    BuildStateRepository, FileSystem, PipelineEventSink, ToolLocator, ToolRunner,
};
use crate::domain::value_objects::Tool;
use crate::error::HatchResult;

use super::bundle::BundleUseCase;
use super::compile::{CompileOptions, CompileReport, CompileUseCase};
use super::launch::LaunchUseCase;
use super::preflight::require_tools;
use super::project::Project;
use super::provision::{EnvironmentHandle, ProvisionUseCase};

/// Everything a full build produced
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub environment: EnvironmentHandle,
    pub compile: CompileReport,
    pub manifest_entries: usize,
    pub archive: PathBuf,
    pub schema: SchemaArtifact,
    pub runtime_module: PathBuf,
    pub bootstrap: PathBuf,
}

/// Build pipeline over shared ports
pub struct BuildPipeline<TR, TL, FS, SR>
where
    TR: ToolRunner,
    TL: ToolLocator,
    FS: FileSystem,
    SR: BuildStateRepository,
{
    runner: TR,
    locator: TL,
    fs: FS,
    state_repo: SR,
    app_stdout_to_stderr: bool,
}

impl<TR, TL, FS, SR> BuildPipeline<TR, TL, FS, SR>
where
    TR: ToolRunner,
    TL: ToolLocator,
    FS: FileSystem,
    SR: BuildStateRepository,
{
    pub fn new(runner: TR, locator: TL, fs: FS, state_repo: SR) -> Self {
        Self {
            runner,
            locator,
            fs,
            state_repo,
            app_stdout_to_stderr: false,
        }
    }

    /// Launch the application with its stdout sent to stderr.
    pub fn with_app_stdout_to_stderr(mut self, redirect: bool) -> Self {
        self.app_stdout_to_stderr = redirect;
        self
    }

    fn launcher(&self) -> LaunchUseCase<&TR, &FS> {
        LaunchUseCase::new(&self.runner, &self.fs).with_app_stdout_to_stderr(self.app_stdout_to_stderr)
    }

    /// Stages 1 to 3 plus the generated launch files.
    pub fn build(
        &self,
        project: &Project,
        events: &Arc<dyn PipelineEventSink>,
    ) -> HatchResult<BuildReport> {
        require_tools(project, &self.locator)?;

        let environment = ProvisionUseCase::new(&self.runner, &self.fs)
            .ensure_environment(project, events)?;

        let groups = project.source_groups(&self.fs)?;
        let compile = CompileUseCase::new(&self.runner, &self.fs, &self.state_repo).compile_groups(
            &groups,
            &project.layout,
            &CompileOptions {
                compiler: project.program(Tool::BlueprintCompiler).to_string(),
                incremental: project.incremental,
            },
            events,
        )?;

        let bundler = BundleUseCase::new(&self.runner, &self.fs);
        let styles = bundler.stage_styles(&project.styles, &project.layout)?;
        let manifest =
            bundler.build_manifest(&project.prefix, &compile.assets, &styles, &project.layout);
        let archive = bundler.bundle(
            &manifest,
            &project.layout,
            project.program(Tool::ResourceCompiler),
            events,
        )?;
        let schema = bundler.derive_schema(
            &project.schema_template,
            &project.app_id,
            &project.prefix,
            &project.layout,
            project.program(Tool::SchemaCompiler),
            events,
        )?;

        let launcher = LaunchUseCase::new(&self.runner, &self.fs);
        let bootstrap = launcher.write_bootstrap(project, events)?;
        let runtime_module = launcher.write_runtime_config(project, events)?;

        Ok(BuildReport {
            environment,
            compile,
            manifest_entries: manifest.len(),
            archive,
            schema,
            runtime_module,
            bootstrap,
        })
    }

    /// Full build, then launch. Returns the application's exit code.
    pub fn run(
        &self,
        project: &Project,
        events: &Arc<dyn PipelineEventSink>,
    ) -> HatchResult<(BuildReport, i32)> {
        let report = self.build(project, events)?;
        let exit_code = self.launcher().launch(project, events)?;
        Ok((report, exit_code))
    }

    /// Launch a previous build.
    pub fn quick(
        &self,
        project: &Project,
        events: &Arc<dyn PipelineEventSink>,
    ) -> HatchResult<i32> {
        self.launcher().quick_launch(project, events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{program_name, FakeLocator, FakeToolRunner};
    use crate::config::Config;
    use crate::domain::ports::NoopEventSink;
    use crate::error::HatchError;
    use crate::infrastructure::{LocalFs, TomlBuildStateRepository};
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn scaffold(root: &Path) -> Project {
        write(&root.join("src/ui/widgets/a.blp"), "a");
        write(&root.join("src/ui/widgets/b.blp"), "b");
        write(&root.join("src/ui/widgets/c.blp"), "c");
        write(&root.join("src/ui/dialogs/d.blp"), "d");
        write(&root.join("src/ui/dialogs/e.blp"), "e");
        write(&root.join("data/style.css"), "window {}");
        write(
            &root.join("data/org.example.App.gschema.xml.in"),
            r#"<schema id="@app_id@" path="@prefix@/"/>"#,
        );
        write(&root.join("requirements.txt"), "requests\n");

        let config: Config = toml::from_str(
            r#"
[app]
id = "org.example.App"

[[groups]]
name = "widgets"

[[groups]]
name = "dialogs"

[resources]
styles = ["data/style.css"]
"#,
        )
        .unwrap();
        Project::from_config(&config, root).unwrap()
    }

    fn noop() -> Arc<dyn PipelineEventSink> {
        Arc::new(NoopEventSink)
    }

    fn pipeline<'a>(
        runner: &'a FakeToolRunner,
        locator: &'a FakeLocator,
    ) -> BuildPipeline<&'a FakeToolRunner, &'a FakeLocator, LocalFs, TomlBuildStateRepository> {
        BuildPipeline::new(runner, locator, LocalFs::new(), TomlBuildStateRepository::new())
    }

    #[test]
    fn full_build_produces_every_artifact() {
        let dir = tempdir().unwrap();
        let project = scaffold(dir.path());
        let runner = FakeToolRunner::emulating();
        let locator = FakeLocator::all();

        let report = pipeline(&runner, &locator).build(&project, &noop()).unwrap();

        assert!(report.environment.created);
        assert_eq!(report.compile.assets.len(), 5);
        assert_eq!(report.manifest_entries, 6);
        assert!(report.archive.is_file());
        assert!(report.schema.path.is_file());
        assert!(report.bootstrap.is_file());
        assert!(report.runtime_module.is_file());

        let order: Vec<String> = runner.calls().iter().map(program_name).collect();
        assert_eq!(
            order,
            vec![
                "python3",
                "python3",
                "blueprint-compiler",
                "blueprint-compiler",
                "glib-compile-resources",
                "glib-compile-schemas",
            ]
        );
    }

    #[test]
    fn second_build_reuses_environment_and_is_byte_identical() {
        let dir = tempdir().unwrap();
        let project = scaffold(dir.path());
        let runner = FakeToolRunner::emulating();
        let locator = FakeLocator::all();
        let pipeline = pipeline(&runner, &locator);

        let first = pipeline.build(&project, &noop()).unwrap();
        let first_archive = fs::read(&first.archive).unwrap();
        let installs_before = runner
            .calls()
            .iter()
            .filter(|c| c.get_args().iter().any(|a| a == "pip"))
            .count();

        let second = pipeline.build(&project, &noop()).unwrap();
        let installs_after = runner
            .calls()
            .iter()
            .filter(|c| c.get_args().iter().any(|a| a == "pip"))
            .count();

        assert!(!second.environment.created);
        assert_eq!(installs_before, installs_after);
        assert_eq!(fs::read(&second.archive).unwrap(), first_archive);
    }

    #[test]
    fn missing_tools_fail_before_any_write() {
        let dir = tempdir().unwrap();
        let project = scaffold(dir.path());
        let runner = FakeToolRunner::emulating();
        let locator = FakeLocator::with(&["python3"]);

        let err = pipeline(&runner, &locator)
            .build(&project, &noop())
            .unwrap_err();

        match err {
            HatchError::ToolMissing { tools } => assert_eq!(tools.len(), 3),
            other => panic!("unexpected error: {other}"),
        }
        assert!(runner.calls().is_empty());
        assert!(!dir.path().join("_build").exists());
        assert!(!dir.path().join("_venv").exists());
    }

    #[test]
    fn run_launches_after_build() {
        let dir = tempdir().unwrap();
        let project = scaffold(dir.path());
        let runner = FakeToolRunner::emulating();
        let locator = FakeLocator::all();

        let (_report, code) = pipeline(&runner, &locator).run(&project, &noop()).unwrap();

        assert_eq!(code, 0);
        let last = runner.calls().last().cloned().unwrap();
        assert_eq!(last.program(), project.layout.venv_python());
    }
}
