//! Project resolution
//!
//! Turns a validated `Config` and a project root into everything the
//! pipeline needs: the build layout, tool programs, group specs and the
//! paths of optional inputs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::domain::entities::{SourceGroup, SOURCE_EXTENSION};
use crate::domain::ports::{FileSystem, FsError};
use crate::domain::value_objects::{BuildLayout, EntryPoint, Tool};
use crate::error::{HatchError, HatchResult};

/// A group as declared (or discovered) before its sources are listed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSpec {
    pub name: String,
    pub dir: PathBuf,
    pub sources: Option<Vec<PathBuf>>,
}

/// Resolved project settings
#[derive(Debug, Clone)]
pub struct Project {
    pub app_id: String,
    pub app_name: String,
    pub version: String,
    pub prefix: String,
    pub entry: EntryPoint,
    pub layout: BuildLayout,
    pub ui_dir: PathBuf,
    /// Declared groups; empty means every subdirectory of `ui_dir`
    pub groups: Vec<GroupSpec>,
    pub styles: Vec<PathBuf>,
    pub requirements: PathBuf,
    pub schema_template: PathBuf,
    pub runtime_template: Option<PathBuf>,
    pub runtime_module: String,
    pub programs: BTreeMap<Tool, String>,
    pub system_site_packages: bool,
    pub schema_dir_var: String,
    pub extra_env: BTreeMap<String, String>,
    pub incremental: bool,
}

impl Project {
    /// Resolve against `root`. Does not touch the file system.
    ///
    /// Fails when a generated directory overlaps the project or its inputs.
    pub fn from_config(config: &Config, root: &Path) -> HatchResult<Self> {
        crate::config::validate_paths(config).map_err(|message| HatchError::Config {
            file: root.join(crate::config::CONFIG_FILE),
            message,
        })?;

        let entry = config
            .app
            .entry
            .parse::<EntryPoint>()
            .map_err(|message| HatchError::Config {
                file: root.join(crate::config::CONFIG_FILE),
                message,
            })?;

        let layout = BuildLayout::new(
            root,
            &config.paths.build,
            &config.paths.venv,
            config.app.bundle_name(),
        );
        let ui_dir = root.join(&config.paths.ui);

        let groups = config
            .groups
            .iter()
            .map(|g| GroupSpec {
                name: g.name.clone(),
                dir: root.join(g.dir.clone().unwrap_or_else(|| config.paths.ui.join(&g.name))),
                sources: g.sources.clone(),
            })
            .collect();

        let programs = Tool::ALL
            .iter()
            .map(|tool| (*tool, config.tools.program(*tool)))
            .collect();

        Ok(Self {
            app_id: config.app.id.clone(),
            app_name: config.app.display_name(),
            version: config.app.version.clone(),
            prefix: config.app.resource_prefix(),
            entry,
            layout,
            ui_dir,
            groups,
            styles: config.resources.styles.iter().map(|s| root.join(s)).collect(),
            requirements: root.join(&config.paths.requirements),
            schema_template: root.join(config.paths.schema_template_for(&config.app.id)),
            runtime_template: config.paths.runtime_template.as_ref().map(|p| root.join(p)),
            runtime_module: config.paths.runtime_module.clone(),
            programs,
            system_site_packages: config.environment.system_site_packages,
            schema_dir_var: config.launch.schema_dir_var.clone(),
            extra_env: config.launch.env.clone(),
            incremental: config.build.incremental,
        })
    }

    pub fn root(&self) -> &Path {
        self.layout.project_root()
    }

    /// Program configured for a tool
    pub fn program(&self, tool: Tool) -> &str {
        self.programs
            .get(&tool)
            .map(String::as_str)
            .unwrap_or_else(|| tool.default_program())
    }

    /// Build the source groups, listing sources where none are declared.
    ///
    /// Group order is declaration order, or directory name order when
    /// groups are discovered. Discovered sources are in file name order.
    pub fn source_groups<FS: FileSystem>(&self, fs: &FS) -> HatchResult<Vec<SourceGroup>> {
        let specs = if self.groups.is_empty() {
            self.discover_group_specs(fs)?
        } else {
            self.groups.clone()
        };

        specs
            .into_iter()
            .map(|spec| self.resolve_group(spec, fs))
            .collect()
    }

    fn discover_group_specs<FS: FileSystem>(&self, fs: &FS) -> HatchResult<Vec<GroupSpec>> {
        let dirs = match fs.list_dirs(&self.ui_dir) {
            Ok(dirs) => dirs,
            Err(FsError::NotFound(_)) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(dirs
            .into_iter()
            .filter_map(|dir| {
                let name = dir.file_name()?.to_string_lossy().into_owned();
                Some(GroupSpec {
                    name,
                    dir,
                    sources: None,
                })
            })
            .collect())
    }

    fn resolve_group<FS: FileSystem>(&self, spec: GroupSpec, fs: &FS) -> HatchResult<SourceGroup> {
        let sources = match &spec.sources {
            Some(explicit) => {
                let sources: Vec<PathBuf> = explicit.iter().map(|s| spec.dir.join(s)).collect();
                if let Some(missing) = sources.iter().find(|s| !fs.is_file(s)) {
                    return Err(HatchError::SourceNotFound {
                        path: missing.clone(),
                    });
                }
                sources
            }
            None => match fs.list_files(&spec.dir, SOURCE_EXTENSION) {
                Ok(files) => files,
                Err(FsError::NotFound(path)) => return Err(HatchError::SourceNotFound { path }),
                Err(e) => return Err(e.into()),
            },
        };

        SourceGroup::new(&spec.name, &spec.dir, sources, &self.layout).map_err(|message| {
            HatchError::Config {
                file: self.root().join(crate::config::CONFIG_FILE),
                message,
            }
        })
    }
}
