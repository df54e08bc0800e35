//! Configuration module for Hatch
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (HATCH_*)
//! 3. Project config (hatch.toml)
//! 4. User config (~/.config/hatch/config.toml, `[output]` only)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    load_project, load_user_output, user_config_path, validate_paths, with_env_overrides,
    ConfigWarning, LoadedConfig, CONFIG_FILE,
};
pub use types::{
    AppConfig, BuildConfig, ColorMode, Config, EnvironmentConfig, GroupConfig, LaunchConfig,
    OutputConfig, PathsConfig, ResourcesConfig, ToolsConfig, UserConfig, Verbosity,
};
