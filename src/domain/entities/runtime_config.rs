//! Runtime configuration module
//!
//! The application reads its id, version, resource prefix, settings and
//! user directories from a small generated module. It lives under the build dir and is put on the import
//! path by the bootstrap unit, never written into the source tree.

use super::launch::python_string;
use super::schema::substitute;

const DEFAULT_DIRS_AND_SETTINGS: &str = r#"
data_dir = Path(GLib.get_user_data_dir()) / APP_ID
cache_dir = Path(GLib.get_user_cache_dir()) / APP_ID
data_dir.mkdir(parents=True, exist_ok=True)
cache_dir.mkdir(parents=True, exist_ok=True)

_schemas = Gio.SettingsSchemaSource.get_default()
schema = (
    Gio.Settings.new(APP_ID)
    if _schemas is not None and _schemas.lookup(APP_ID, True) is not None
    else None
)
"#;

/// Values exposed to the application at runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub app_id: String,
    pub app_name: String,
    pub version: String,
    pub prefix: String,
    pub build_dir: String,
}

impl RuntimeConfig {
    /// Placeholder/value pairs for template rendering
    fn pairs(&self) -> [(&'static str, &str); 5] {
        [
            ("@APP_ID@", self.app_id.as_str()),
            ("@APP_NAME@", self.app_name.as_str()),
            ("@VERSION@", self.version.as_str()),
            ("@PREFIX@", self.prefix.as_str()),
            ("@BUILD_DIR@", self.build_dir.as_str()),
        ]
    }

    /// Render a user-supplied template.
    pub fn render_template(&self, template: &str) -> String {
        substitute(template, &self.pairs()).0
    }

    /// Render the built-in module.
    ///
    /// Besides the constants it exports `data_dir` and `cache_dir` (per-app
    /// directories under the user's XDG dirs, created on import) and
    /// `schema`, the application's `Gio.Settings`, or `None` when no schema
    /// with the app id is installed.
    pub fn render_default(&self) -> String {
        let mut out = String::from("# Generated by hatch. Do not edit.\n\n");
        out.push_str("from pathlib import Path\n\nfrom gi.repository import Gio, GLib\n\n");
        for (name, value) in [
            ("APP_ID", &self.app_id),
            ("APP_NAME", &self.app_name),
            ("VERSION", &self.version),
            ("PREFIX", &self.prefix),
            ("BUILD_DIR", &self.build_dir),
        ] {
            out.push_str(name);
            out.push_str(" = ");
            out.push_str(&python_string(value));
            out.push('\n');
        }
        out.push_str(DEFAULT_DIRS_AND_SETTINGS);
        out
    }
}
