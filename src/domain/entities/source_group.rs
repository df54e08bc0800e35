//! Source groups and compiled assets
//!
//! A source group is a named bucket of declarative UI files that is compiled
//! in one batch. Its output directory is a pure function of its name.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use crate::domain::value_objects::BuildLayout;

/// Extension of compiled UI definitions
pub const COMPILED_EXTENSION: &str = "ui";

/// Extension of declarative UI sources
pub const SOURCE_EXTENSION: &str = "blp";

/// Check that a group name is usable as a single path segment.
pub fn validate_group_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("group name must not be empty".to_string());
    }
    if name == "." || name == ".." {
        return Err(format!("group name '{name}' is reserved"));
    }
    if name.contains(['/', '\\']) {
        return Err(format!("group name '{name}' must not contain path separators"));
    }
    Ok(())
}

/// Output file name for a source: same base name, compiled extension.
///
/// `window.blp` -> `window.ui`, `about.dialog.blp` -> `about.dialog.ui`
pub fn compiled_file_name(source: &Path) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{stem}.{COMPILED_EXTENSION}")
}

/// Compiled output of a source, relative to the group output dir.
///
/// The batch compiler mirrors the source's position below the input dir:
/// `dialogs/sub/x.blp` with input `dialogs` compiles to `sub/x.ui`.
pub fn compiled_relative_path(relative_source: &Path) -> PathBuf {
    relative_source.with_file_name(compiled_file_name(relative_source))
}

fn relative_source<'a>(input_dir: &Path, source: &'a Path) -> Result<&'a Path, String> {
    let outside = || {
        format!(
            "source '{}' is not inside '{}'",
            source.display(),
            input_dir.display()
        )
    };
    let relative = source.strip_prefix(input_dir).map_err(|_| outside())?;
    if relative.as_os_str().is_empty()
        || !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
    {
        return Err(outside());
    }
    Ok(relative)
}

/// A named, ordered set of UI sources compiled together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceGroup {
    name: String,
    input_dir: PathBuf,
    sources: Vec<PathBuf>,
    /// Per source, relative to `output_dir`
    compiled: Vec<PathBuf>,
    output_dir: PathBuf,
}

impl SourceGroup {
    /// Create a group. `sources` keep the given order.
    ///
    /// Every source must live below `input_dir`, and no two sources may
    /// compile to the same output.
    pub fn new(
        name: impl Into<String>,
        input_dir: impl Into<PathBuf>,
        sources: Vec<PathBuf>,
        layout: &BuildLayout,
    ) -> Result<Self, String> {
        let name = name.into();
        validate_group_name(&name)?;
        let input_dir = input_dir.into();

        let mut seen = HashSet::new();
        let mut compiled = Vec::with_capacity(sources.len());
        for source in &sources {
            let output = compiled_relative_path(relative_source(&input_dir, source)?);
            if !seen.insert(output.clone()) {
                return Err(format!(
                    "group '{name}': more than one source compiles to '{}'",
                    output.display()
                ));
            }
            compiled.push(output);
        }

        let output_dir = layout.group_output_dir(&name);
        Ok(Self {
            name,
            input_dir,
            sources,
            compiled,
            output_dir,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base directory passed to the compiler for resolving sources
    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Expected compiled output for every source, in source order.
    pub fn expected_assets(&self) -> Vec<CompiledAsset> {
        self.sources
            .iter()
            .zip(&self.compiled)
            .map(|(source, compiled)| {
                let logical: Vec<_> = compiled
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect();
                CompiledAsset {
                    group: self.name.clone(),
                    source: source.clone(),
                    path: self.output_dir.join(compiled),
                    logical_path: format!("ui/{}/{}", self.name, logical.join("/")),
                }
            })
            .collect()
    }
}

/// One compiled UI file, one-to-one with a source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledAsset {
    group: String,
    source: PathBuf,
    path: PathBuf,
    logical_path: String,
}

impl CompiledAsset {
    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Location on disk under the build dir
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path inside the resource namespace, relative to the prefix
    pub fn logical_path(&self) -> &str {
        &self.logical_path
    }
}
