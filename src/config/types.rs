//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::DEFAULT_SCHEMA_DIR_VAR;
use crate::domain::value_objects::Tool;
use crate::error::HatchResult;

use super::loader::{self, ConfigWarning};

/// Application identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Reverse-DNS application id, e.g. `org.example.App`
    #[serde(default)]
    pub id: String,

    /// Display name; defaults to the last id segment
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default = "default_version")]
    pub version: String,

    /// Resource namespace prefix; defaults to `/` + id with dots as slashes
    #[serde(default)]
    pub prefix: Option<String>,

    /// Entry point as `package.module:function`
    #[serde(default = "default_entry")]
    pub entry: String,

    /// Base name of the manifest and archive files
    #[serde(default)]
    pub bundle: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: None,
            version: default_version(),
            prefix: None,
            entry: default_entry(),
            bundle: None,
        }
    }
}

impl AppConfig {
    fn last_segment(&self) -> &str {
        self.id.rsplit('.').next().unwrap_or(&self.id)
    }

    /// `org.example.App` -> `/org/example/App`
    pub fn resource_prefix(&self) -> String {
        match &self.prefix {
            Some(prefix) => prefix.trim_end_matches('/').to_string(),
            None => format!("/{}", self.id.replace('.', "/")),
        }
    }

    /// `org.example.App` -> `app`
    pub fn bundle_name(&self) -> String {
        match &self.bundle {
            Some(bundle) => bundle.clone(),
            None => self.last_segment().to_lowercase(),
        }
    }

    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.last_segment().to_string(),
        }
    }
}

fn default_version() -> String {
    "0.0.0".to_string()
}

fn default_entry() -> String {
    "src.main:main".to_string()
}

/// Filesystem locations, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_build_dir")]
    pub build: PathBuf,

    #[serde(default = "default_venv_dir")]
    pub venv: PathBuf,

    /// Parent of the group directories
    #[serde(default = "default_ui_dir")]
    pub ui: PathBuf,

    #[serde(default = "default_requirements")]
    pub requirements: PathBuf,

    /// Defaults to `data/<app id>.gschema.xml.in`
    #[serde(default)]
    pub schema_template: Option<PathBuf>,

    /// Optional template for the runtime-configuration module
    #[serde(default)]
    pub runtime_template: Option<PathBuf>,

    /// Module name of the generated runtime configuration
    #[serde(default = "default_runtime_module")]
    pub runtime_module: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            build: default_build_dir(),
            venv: default_venv_dir(),
            ui: default_ui_dir(),
            requirements: default_requirements(),
            schema_template: None,
            runtime_template: None,
            runtime_module: default_runtime_module(),
        }
    }
}

impl PathsConfig {
    pub fn schema_template_for(&self, app_id: &str) -> PathBuf {
        match &self.schema_template {
            Some(path) => path.clone(),
            None => Path::new("data").join(format!("{app_id}.gschema.xml.in")),
        }
    }
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("_build")
}

fn default_venv_dir() -> PathBuf {
    PathBuf::from("_venv")
}

fn default_ui_dir() -> PathBuf {
    PathBuf::from("src/ui")
}

fn default_requirements() -> PathBuf {
    PathBuf::from("requirements.txt")
}

fn default_runtime_module() -> String {
    "shared".to_string()
}

/// One declared source group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupConfig {
    pub name: String,

    /// Source directory; defaults to `<paths.ui>/<name>`
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Explicit sources relative to `dir`; discovered when absent
    #[serde(default)]
    pub sources: Option<Vec<PathBuf>>,
}

/// Static resources bundled next to compiled UI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResourcesConfig {
    /// Stylesheets, relative to the project root
    #[serde(default)]
    pub styles: Vec<PathBuf>,
}

/// Program overrides for external tools
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolsConfig {
    #[serde(default)]
    pub python: Option<String>,

    #[serde(default)]
    pub blueprint_compiler: Option<String>,

    #[serde(default)]
    pub resource_compiler: Option<String>,

    #[serde(default)]
    pub schema_compiler: Option<String>,
}

impl ToolsConfig {
    /// Configured program for a tool, or its default name
    pub fn program(&self, tool: Tool) -> String {
        let configured = match tool {
            Tool::Interpreter => &self.python,
            Tool::BlueprintCompiler => &self.blueprint_compiler,
            Tool::ResourceCompiler => &self.resource_compiler,
            Tool::SchemaCompiler => &self.schema_compiler,
        };
        configured
            .clone()
            .unwrap_or_else(|| tool.default_program().to_string())
    }

    fn slot_mut(&mut self, tool: Tool) -> &mut Option<String> {
        match tool {
            Tool::Interpreter => &mut self.python,
            Tool::BlueprintCompiler => &mut self.blueprint_compiler,
            Tool::ResourceCompiler => &mut self.resource_compiler,
            Tool::SchemaCompiler => &mut self.schema_compiler,
        }
    }

    pub fn set(&mut self, tool: Tool, program: impl Into<String>) {
        *self.slot_mut(tool) = Some(program.into());
    }
}

/// Isolated environment settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Let the environment see system packages (toolkit bindings)
    #[serde(default = "default_true")]
    pub system_site_packages: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            system_site_packages: true,
        }
    }
}

/// Launch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// Variable naming the compiled schema directory
    #[serde(default = "default_schema_dir_var")]
    pub schema_dir_var: String,

    /// Extra variables exported to the application
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            schema_dir_var: default_schema_dir_var(),
            env: BTreeMap::new(),
        }
    }
}

fn default_schema_dir_var() -> String {
    DEFAULT_SCHEMA_DIR_VAR.to_string()
}

/// Build behaviour
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BuildConfig {
    /// Skip groups whose sources did not change
    #[serde(default)]
    pub incremental: bool,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,

    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

fn default_true() -> bool {
    true
}

/// Main configuration structure (`hatch.toml`)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub groups: Vec<GroupConfig>,

    #[serde(default)]
    pub resources: ResourcesConfig,

    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub environment: EnvironmentConfig,

    #[serde(default)]
    pub launch: LaunchConfig,

    #[serde(default)]
    pub build: BuildConfig,

    /// `None` when the project file has no `[output]` table, so user
    /// preferences can fill it in
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

/// User-level preferences (`<config dir>/hatch/config.toml`)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> HatchResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> HatchResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (HATCH_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self, |key| std::env::var(key).ok())
    }

    /// Effective output settings
    pub fn output(&self) -> OutputConfig {
        self.output.clone().unwrap_or_default()
    }

    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self, file: &Path) -> HatchResult<()> {
        loader::validate(self, file)
    }
}
