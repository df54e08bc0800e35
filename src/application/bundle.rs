//! Resource bundling and schema derivation

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::entities::{
    derive_schema, schema_file_name, CompiledAsset, ResourceManifest, SchemaArtifact,
};
use crate::domain::ports::{
    FileSystem, PipelineEvent, PipelineEventSink, Stage, ToolInvocation, ToolRunner,
};
use crate::domain::value_objects::{BuildLayout, Tool};
use crate::error::{HatchError, HatchResult};

use super::run_tool;

/// Bundle use case
pub struct BundleUseCase<TR, FS>
where
    TR: ToolRunner,
    FS: FileSystem,
{
    runner: TR,
    fs: FS,
}

impl<TR, FS> BundleUseCase<TR, FS>
where
    TR: ToolRunner,
    FS: FileSystem,
{
    pub fn new(runner: TR, fs: FS) -> Self {
        Self { runner, fs }
    }

    /// Copy stylesheets into `<build>/css`.
    ///
    /// Returns `(logical name, path relative to the build dir)` pairs in
    /// declared order.
    pub fn stage_styles(
        &self,
        styles: &[PathBuf],
        layout: &BuildLayout,
    ) -> HatchResult<Vec<(String, String)>> {
        let css_dir = layout.css_dir();
        self.fs.reset_dir(&css_dir)?;

        let mut staged = Vec::with_capacity(styles.len());
        for style in styles {
            if !self.fs.is_file(style) {
                return Err(HatchError::BundleMissingFile {
                    path: style.clone(),
                });
            }
            let name = style
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            self.fs.copy(style, &css_dir.join(&name))?;
            staged.push((name.clone(), format!("css/{name}")));
        }
        Ok(staged)
    }

    /// Derive the manifest from compiled assets and staged stylesheets.
    pub fn build_manifest(
        &self,
        prefix: &str,
        assets: &[CompiledAsset],
        styles: &[(String, String)],
        layout: &BuildLayout,
    ) -> ResourceManifest {
        ResourceManifest::from_assets(prefix, assets, styles, |asset| {
            layout
                .relative_to_build(asset.path())
                .unwrap_or_else(|| asset.path().to_string_lossy().into_owned())
        })
    }

    /// Write the manifest and compile it into the archive.
    ///
    /// Every referenced file is checked first; on any failure the previous
    /// archive is left untouched.
    pub fn bundle(
        &self,
        manifest: &ResourceManifest,
        layout: &BuildLayout,
        compiler: &str,
        events: &Arc<dyn PipelineEventSink>,
    ) -> HatchResult<PathBuf> {
        events.on_event(PipelineEvent::StageStarted {
            stage: Stage::Bundle,
        });

        for entry in manifest.entries() {
            let path = layout.build_dir().join(entry.file());
            if !self.fs.is_file(&path) {
                return Err(HatchError::BundleMissingFile { path });
            }
        }

        let manifest_path = layout.manifest_path();
        self.fs.write(&manifest_path, &manifest.to_xml())?;
        events.on_event(PipelineEvent::ManifestWritten {
            path: manifest_path.clone(),
            entries: manifest.len(),
        });

        let tmp = layout.archive_tmp_path();
        self.fs.remove_file(&tmp)?;

        let invocation = ToolInvocation::new(compiler)
            .arg(format!("--sourcedir={}", layout.build_dir().display()))
            .arg(format!("--target={}", tmp.display()))
            .path_arg(&manifest_path)
            .current_dir(layout.build_dir());

        let output = run_tool(&self.runner, Tool::ResourceCompiler, &invocation, events)?;
        if !output.succeeded() {
            self.fs.remove_file(&tmp)?;
            return Err(HatchError::Bundle {
                exit_code: output.exit_code,
            });
        }

        let archive = layout.archive_path();
        self.fs.rename(&tmp, &archive)?;
        events.on_event(PipelineEvent::ArchiveWritten {
            path: archive.clone(),
        });
        Ok(archive)
    }

    /// Substitute the template, write it under `<build>/schemas` and
    /// compile the directory.
    pub fn derive_schema(
        &self,
        template: &Path,
        app_id: &str,
        prefix: &str,
        layout: &BuildLayout,
        compiler: &str,
        events: &Arc<dyn PipelineEventSink>,
    ) -> HatchResult<SchemaArtifact> {
        events.on_event(PipelineEvent::StageStarted {
            stage: Stage::Schema,
        });

        let content = self
            .fs
            .read(template)
            .map_err(|e| HatchError::SchemaCompilation {
                message: format!("cannot read template: {e}"),
                exit_code: None,
            })?;

        let derived = derive_schema(&content, app_id, prefix);
        if derived.is_verbatim() {
            events.on_event(PipelineEvent::Warning {
                message: format!(
                    "schema template {} contains no placeholders",
                    template.display()
                ),
            });
        }

        let dir = layout.schemas_dir();
        self.fs.reset_dir(&dir)?;
        let path = dir.join(schema_file_name(template));
        self.fs.write(&path, derived.content())?;

        let invocation = ToolInvocation::new(compiler)
            .path_arg(&dir)
            .current_dir(layout.build_dir());
        let output = run_tool(&self.runner, Tool::SchemaCompiler, &invocation, events)?;
        if !output.succeeded() {
            let detail = output.stderr.lines().next().unwrap_or("").trim().to_string();
            let message = if detail.is_empty() {
                format!("{compiler} failed")
            } else {
                format!("{compiler} failed: {detail}")
            };
            return Err(HatchError::SchemaCompilation {
                message,
                exit_code: output.exit_code,
            });
        }

        events.on_event(PipelineEvent::SchemaCompiled {
            path: path.clone(),
            substitutions: derived.substitutions(),
        });

        Ok(SchemaArtifact {
            path,
            dir,
            substitutions: derived.substitutions(),
        })
    }
}
