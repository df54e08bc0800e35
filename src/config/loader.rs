//! Configuration loading, layering and validation

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::domain::entities::validate_group_name;
use crate::domain::value_objects::{EntryPoint, Tool};
use crate::error::{HatchError, HatchResult};

use super::types::{Config, OutputConfig, UserConfig};

/// Project configuration file name
pub const CONFIG_FILE: &str = "hatch.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// A project configuration with everything layered in
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub path: PathBuf,
    pub warnings: Vec<ConfigWarning>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> HatchResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| HatchError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| HatchError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load `hatch.toml` from `root`, layer user output preferences and
/// environment overrides, and validate the result.
pub fn load_project(root: &Path) -> HatchResult<LoadedConfig> {
    let path = root.join(CONFIG_FILE);
    if !path.is_file() {
        return Err(HatchError::ConfigNotFound {
            dir: root.to_path_buf(),
        });
    }

    let (mut config, mut warnings) = load_with_warnings(&path)?;

    if config.output.is_none() {
        if let Some(user_path) = user_config_path().filter(|p| p.is_file()) {
            let (output, user_warnings) = load_user_output(&user_path)?;
            config.output = Some(output);
            warnings.extend(user_warnings);
        }
    }

    let config = with_env_overrides(config, |key| std::env::var(key).ok());
    validate(&config, &path)?;

    Ok(LoadedConfig {
        config,
        path,
        warnings,
    })
}

/// `<config dir>/hatch/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hatch").join("config.toml"))
}

/// Load only the `[output]` preferences of a user config file.
pub fn load_user_output(path: &Path) -> HatchResult<(OutputConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| HatchError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut unknown: Vec<String> = Vec::new();
    let user: UserConfig =
        serde_ignored::deserialize(toml::de::Deserializer::new(&content), |p| {
            unknown.push(p.to_string());
        })
        .map_err(|e| HatchError::Config {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let warnings = unknown
        .into_iter()
        .map(|key| ConfigWarning {
            line: find_line_number(&content, &key),
            suggestion: suggest_key(&key),
            key,
            file: path.to_path_buf(),
        })
        .collect();

    Ok((user.output, warnings))
}

/// Apply environment variable overrides (HATCH_* prefix)
///
/// `lookup` returns the value of a variable, if set.
pub fn with_env_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(dir) = lookup("HATCH_BUILD_DIR").filter(|v| !v.is_empty()) {
        config.paths.build = PathBuf::from(dir);
    }

    if let Some(dir) = lookup("HATCH_VENV_DIR").filter(|v| !v.is_empty()) {
        config.paths.venv = PathBuf::from(dir);
    }

    if let Some(val) = lookup("HATCH_INCREMENTAL") {
        config.build.incremental = is_truthy(&val);
    }

    for (var, tool) in [
        ("HATCH_PYTHON", Tool::Interpreter),
        ("HATCH_BLUEPRINT_COMPILER", Tool::BlueprintCompiler),
        ("HATCH_RESOURCE_COMPILER", Tool::ResourceCompiler),
        ("HATCH_SCHEMA_COMPILER", Tool::SchemaCompiler),
    ] {
        if let Some(program) = lookup(var).filter(|v| !v.is_empty()) {
            config.tools.set(tool, program);
        }
    }

    if lookup("HATCH_NO_COLOR").is_some_and(|v| is_truthy(&v)) {
        let mut output = config.output();
        output.color = super::ColorMode::Never;
        config.output = Some(output);
    }

    config
}

fn is_truthy(val: &str) -> bool {
    let val = val.trim().to_lowercase();
    !(val.is_empty() || val == "0" || val == "false" || val == "no" || val == "off")
}

/// Reject configurations the pipeline cannot run with.
pub fn validate(config: &Config, file: &Path) -> HatchResult<()> {
    let fail = |message: String| HatchError::Config {
        file: file.to_path_buf(),
        message,
    };

    let id = config.app.id.trim();
    if id.is_empty() {
        return Err(fail("[app] id must be set".to_string()));
    }
    if id.split('.').any(str::is_empty) || id.contains(['/', '\\', ' ']) {
        return Err(fail(format!("[app] id '{id}' is not a dotted identifier")));
    }

    config
        .app
        .entry
        .parse::<EntryPoint>()
        .map_err(|e| fail(format!("[app] {e}")))?;

    if let Some(prefix) = &config.app.prefix {
        if !prefix.starts_with('/') {
            return Err(fail(format!("[app] prefix '{prefix}' must start with '/'")));
        }
    }

    let bundle = config.app.bundle_name();
    if bundle.is_empty() || bundle.contains(['/', '\\']) {
        return Err(fail(format!("[app] bundle name '{bundle}' is not a file name")));
    }

    if config.paths.runtime_module.is_empty()
        || !config
            .paths
            .runtime_module
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(fail(format!(
            "[paths] runtime_module '{}' is not an identifier",
            config.paths.runtime_module
        )));
    }

    let mut seen = HashSet::new();
    for group in &config.groups {
        validate_group_name(&group.name).map_err(|e| fail(format!("[[groups]] {e}")))?;
        if !seen.insert(group.name.as_str()) {
            return Err(fail(format!(
                "[[groups]] group '{}' is declared twice",
                group.name
            )));
        }
    }

    validate_paths(config).map_err(fail)?;

    let mut style_names = HashSet::new();
    for style in &config.resources.styles {
        let name = style
            .file_name()
            .ok_or_else(|| fail(format!("[resources] style '{}' is not a file", style.display())))?;
        if !style_names.insert(name.to_os_string()) {
            return Err(fail(format!(
                "[resources] more than one style is named '{}'",
                name.to_string_lossy()
            )));
        }
    }

    if config.launch.schema_dir_var.is_empty() {
        return Err(fail("[launch] schema_dir_var must not be empty".to_string()));
    }

    Ok(())
}

/// Generated directories must be strictly inside the project and must not
/// overlap each other or any input: `clean` and group resets delete them.
pub fn validate_paths(config: &Config) -> Result<(), String> {
    let build = output_dir("build", &config.paths.build)?;
    let venv = output_dir("venv", &config.paths.venv)?;
    if overlaps(&build, &venv) {
        return Err(format!(
            "[paths] build '{}' and venv '{}' must not overlap",
            build.display(),
            venv.display()
        ));
    }

    let ui = lexical(&config.paths.ui);
    let mut input_dirs = vec![("[paths] ui".to_string(), ui.clone())];
    for group in &config.groups {
        let dir = match &group.dir {
            Some(dir) => lexical(dir),
            None => ui.join(&group.name),
        };
        input_dirs.push((format!("[[groups]] '{}' dir", group.name), dir));
    }

    let mut input_files = vec![
        ("[paths] requirements".to_string(), lexical(&config.paths.requirements)),
        (
            "[paths] schema_template".to_string(),
            lexical(&config.paths.schema_template_for(&config.app.id)),
        ),
        (CONFIG_FILE.to_string(), PathBuf::from(CONFIG_FILE)),
    ];
    if let Some(template) = &config.paths.runtime_template {
        input_files.push(("[paths] runtime_template".to_string(), lexical(template)));
    }
    for style in &config.resources.styles {
        input_files.push(("[resources] styles".to_string(), lexical(style)));
    }

    for (key, out) in [("build", &build), ("venv", &venv)] {
        // Discovered groups are every subdirectory of the ui dir.
        if config.groups.is_empty() && out.starts_with(&ui) {
            return Err(format!(
                "[paths] {key} '{}' is inside [paths] ui '{}' and would be discovered as a group",
                out.display(),
                ui.display()
            ));
        }
        for (label, dir) in &input_dirs {
            if dir.starts_with(out) {
                return Err(format!(
                    "[paths] {key} '{}' overlaps {label} '{}'",
                    out.display(),
                    dir.display()
                ));
            }
        }
        for (label, file) in &input_files {
            if file.starts_with(out) {
                return Err(format!(
                    "[paths] {key} '{}' contains {label} '{}'",
                    out.display(),
                    file.display()
                ));
            }
        }
    }
    Ok(())
}

/// A generated directory: relative, non-empty, no `..`, not the root itself.
fn output_dir(key: &str, path: &Path) -> Result<PathBuf, String> {
    if path.as_os_str().is_empty() {
        return Err(format!("[paths] {key} must not be empty"));
    }
    if path.has_root() || path.is_absolute() {
        return Err(format!(
            "[paths] {key} '{}' must be relative to the project root",
            path.display()
        ));
    }
    if path
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
    {
        return Err(format!(
            "[paths] {key} '{}' must stay inside the project",
            path.display()
        ));
    }
    let normalized = lexical(path);
    if normalized.as_os_str().is_empty() {
        return Err(format!("[paths] {key} must not be the project root"));
    }
    Ok(normalized)
}

/// `path` with `.` components dropped
fn lexical(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn overlaps(a: &Path, b: &Path) -> bool {
    a.starts_with(b) || b.starts_with(a)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "app",
        "id",
        "name",
        "version",
        "prefix",
        "entry",
        "bundle",
        "paths",
        "build",
        "venv",
        "ui",
        "requirements",
        "schema_template",
        "runtime_template",
        "runtime_module",
        "groups",
        "dir",
        "sources",
        "resources",
        "styles",
        "tools",
        "python",
        "blueprint_compiler",
        "resource_compiler",
        "schema_compiler",
        "environment",
        "system_site_packages",
        "launch",
        "schema_dir_var",
        "env",
        "incremental",
        "output",
        "verbosity",
        "color",
        "unicode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
