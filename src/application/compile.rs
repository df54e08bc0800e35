//! UI compilation
//!
//! One batch compiler invocation per source group. Each group's output
//! directory is emptied first, so after a successful run it holds exactly
//! one compiled file per source.

use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::{BuildState, CompiledAsset, SourceGroup};
use crate::domain::ports::{
    BuildStateRepository, FileSystem, PipelineEvent, PipelineEventSink, Stage, ToolInvocation,
    ToolRunner,
};
use crate::domain::value_objects::{BuildLayout, ContentHash, Tool};
use crate::error::{HatchError, HatchResult};

use super::run_tool;

/// Compile options
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Blueprint compiler program
    pub compiler: String,
    /// Skip groups whose fingerprint is unchanged
    pub incremental: bool,
}

/// Outcome of compiling all groups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileReport {
    /// Every compiled asset, group order then source order
    pub assets: Vec<CompiledAsset>,
    pub compiled: Vec<String>,
    pub skipped: Vec<String>,
}

/// Compile use case
pub struct CompileUseCase<TR, FS, SR>
where
    TR: ToolRunner,
    FS: FileSystem,
    SR: BuildStateRepository,
{
    runner: TR,
    fs: FS,
    state_repo: SR,
}

impl<TR, FS, SR> CompileUseCase<TR, FS, SR>
where
    TR: ToolRunner,
    FS: FileSystem,
    SR: BuildStateRepository,
{
    pub fn new(runner: TR, fs: FS, state_repo: SR) -> Self {
        Self {
            runner,
            fs,
            state_repo,
        }
    }

    /// Compile every group in order, stopping at the first failure.
    pub fn compile_groups(
        &self,
        groups: &[SourceGroup],
        layout: &BuildLayout,
        options: &CompileOptions,
        events: &Arc<dyn PipelineEventSink>,
    ) -> HatchResult<CompileReport> {
        events.on_event(PipelineEvent::StageStarted {
            stage: Stage::Compile,
        });

        let state_path = layout.state_path();
        let mut state = self.state_repo.load_or_new(&state_path);
        state.retain_groups(groups.iter().map(SourceGroup::name));

        let mut report = CompileReport::default();
        for group in groups {
            let expected = group.expected_assets();

            if group.is_empty() {
                self.fs.reset_dir(group.output_dir())?;
                state.forget(group.name());
                events.on_event(PipelineEvent::GroupEmpty {
                    group: group.name().to_string(),
                });
                continue;
            }

            let fingerprint = self.fingerprint(group, &options.compiler)?;

            if options.incremental
                && state.is_fresh(group.name(), &fingerprint)
                && self.outputs_intact(group, &expected)
            {
                events.on_event(PipelineEvent::GroupSkipped {
                    group: group.name().to_string(),
                });
                report.skipped.push(group.name().to_string());
                report.assets.extend(expected);
                continue;
            }

            state.forget(group.name());
            if let Err(e) = self.compile_group(group, &expected, &options.compiler, events) {
                self.save_state(&state, &state_path);
                return Err(e);
            }

            let outputs = expected
                .iter()
                .filter_map(|a| layout.relative_to_build(a.path()))
                .collect();
            state.record(group.name(), &fingerprint, outputs);

            events.on_event(PipelineEvent::GroupCompiled {
                group: group.name().to_string(),
                outputs: expected.len(),
            });
            report.compiled.push(group.name().to_string());
            report.assets.extend(expected);
        }

        self.save_state(&state, &state_path);
        Ok(report)
    }

    fn compile_group(
        &self,
        group: &SourceGroup,
        expected: &[CompiledAsset],
        compiler: &str,
        events: &Arc<dyn PipelineEventSink>,
    ) -> HatchResult<()> {
        self.fs.reset_dir(group.output_dir())?;

        let mut invocation = ToolInvocation::new(compiler)
            .arg("batch-compile")
            .path_arg(group.output_dir())
            .path_arg(group.input_dir());
        for source in group.sources() {
            invocation = invocation.path_arg(source);
        }

        let output = run_tool(&self.runner, Tool::BlueprintCompiler, &invocation, events)?;
        if !output.succeeded() {
            return Err(HatchError::Compilation {
                group: group.name().to_string(),
                exit_code: output.exit_code,
            });
        }

        if let Some(missing) = expected.iter().find(|a| !self.fs.is_file(a.path())) {
            return Err(HatchError::CompiledOutputMissing {
                group: group.name().to_string(),
                path: missing.path().to_path_buf(),
            });
        }
        Ok(())
    }

    /// SHA-256 over compiler identity, source paths and source contents.
    fn fingerprint(&self, group: &SourceGroup, compiler: &str) -> HatchResult<ContentHash> {
        let mut parts: Vec<Vec<u8>> = vec![compiler.as_bytes().to_vec()];
        for source in group.sources() {
            parts.push(source.to_string_lossy().as_bytes().to_vec());
            let content = self.fs.read_bytes(source).map_err(|_| HatchError::SourceNotFound {
                path: source.clone(),
            })?;
            parts.push(content);
        }
        Ok(ContentHash::from_parts(parts.iter().map(Vec::as_slice)))
    }

    fn outputs_intact(&self, group: &SourceGroup, expected: &[CompiledAsset]) -> bool {
        self.fs.exists(group.output_dir()) && expected.iter().all(|a| self.fs.is_file(a.path()))
    }

    fn save_state(&self, state: &BuildState, path: &Path) {
        // Best effort: a lost state file only forces a full rebuild.
        let _ = self.state_repo.save(state, path);
    }
}
