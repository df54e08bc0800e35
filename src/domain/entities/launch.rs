//! Launch environment and bootstrap unit
//!
//! The bootstrap unit is a generated Python script. It prepares the process
//! (schema dir, import path, signal handling, resource registration) and then
//! hands control to the application entry point.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::EntryPoint;

/// Default environment variable naming the compiled schema directory
pub const DEFAULT_SCHEMA_DIR_VAR: &str = "GSETTINGS_SCHEMA_DIR";

/// Ordered environment for the launched process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchEnvironment {
    vars: Vec<(String, String)>,
}

impl LaunchEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable. Re-setting keeps the original position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.vars.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.vars.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn vars(&self) -> &[(String, String)] {
        &self.vars
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// A fully resolved launch: interpreter, script, environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub interpreter: PathBuf,
    pub bootstrap: PathBuf,
    pub working_dir: PathBuf,
    pub env: LaunchEnvironment,
}

/// Inputs to bootstrap rendering
#[derive(Debug, Clone)]
pub struct BootstrapSpec<'a> {
    pub project_root: &'a Path,
    pub runtime_dir: &'a Path,
    pub archive: &'a Path,
    pub entry: &'a EntryPoint,
    /// Generated runtime-configuration module, importable from `runtime_dir`
    pub runtime_module: &'a str,
    /// Exported before anything else runs; the schema dir comes first
    pub env: &'a LaunchEnvironment,
}

/// Render the bootstrap script.
///
/// Paths and values are emitted as Python string literals; the entry point
/// is validated as dotted identifiers before it gets here.
pub fn render_bootstrap(spec: &BootstrapSpec<'_>) -> String {
    let mut out = String::new();
    out.push_str("# Generated by hatch. Do not edit.\n");
    out.push_str("import importlib\nimport os\nimport signal\nimport sys\n\n");

    let _ = writeln!(
        out,
        "RESOURCE_FILE = {}",
        python_string(&spec.archive.to_string_lossy())
    );
    out.push('\n');

    for (name, value) in spec.env.vars() {
        let _ = writeln!(
            out,
            "os.environ[{}] = {}",
            python_string(name),
            python_string(value)
        );
    }
    let _ = writeln!(
        out,
        "sys.path.insert(0, {})",
        python_string(&spec.project_root.to_string_lossy())
    );
    let _ = writeln!(
        out,
        "sys.path.insert(0, {})",
        python_string(&spec.runtime_dir.to_string_lossy())
    );
    out.push('\n');

    out.push_str("signal.signal(signal.SIGINT, signal.SIG_DFL)\n\n");

    out.push_str("if not os.path.isfile(RESOURCE_FILE):\n");
    out.push_str(
        "    sys.stderr.write('resource archive not found: %s\\n' \
         'run `hatch run` to build it\\n' % RESOURCE_FILE)\n",
    );
    out.push_str("    sys.exit(1)\n\n");

    out.push_str("from gi.repository import Gio\n\n");
    out.push_str("Gio.Resource.load(RESOURCE_FILE)._register()\n\n");

    let _ = writeln!(
        out,
        "runtime = importlib.import_module({})",
        python_string(spec.runtime_module)
    );
    // Also reachable as `from <package> import <module>` and relative imports.
    if let Some(package) = spec.entry.package() {
        let _ = writeln!(
            out,
            "package = importlib.import_module({})",
            python_string(package)
        );
        let _ = writeln!(
            out,
            "sys.modules[{}] = runtime",
            python_string(&format!("{package}.{}", spec.runtime_module))
        );
        let _ = writeln!(
            out,
            "setattr(package, {}, runtime)",
            python_string(spec.runtime_module)
        );
    }
    out.push('\n');

    let _ = writeln!(
        out,
        "entry = importlib.import_module({})",
        python_string(spec.entry.module())
    );
    let _ = writeln!(out, "sys.exit(entry.{}())", spec.entry.function());
    out
}

/// Quote a value as a single-quoted Python string literal.
pub fn python_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_keeps_first_position() {
        let mut env = LaunchEnvironment::new();
        env.set("A", "1");
        env.set("B", "2");
        env.set("A", "3");
        assert_eq!(
            env.vars(),
            &[("A".to_string(), "3".to_string()), ("B".to_string(), "2".to_string())]
        );
        assert_eq!(env.get("A"), Some("3"));
    }

    #[test]
    fn python_string_escapes_quotes_and_controls() {
        assert_eq!(python_string("plain"), "'plain'");
        assert_eq!(python_string(r"C:\dir"), r"'C:\\dir'");
        assert_eq!(python_string("it's"), r"'it\'s'");
        assert_eq!(python_string("a\nb\u{1}"), r"'a\nb\x01'");
    }

    #[test]
    fn bootstrap_registers_archive_and_calls_entry() {
        let entry: EntryPoint = "src.main:main".parse().unwrap();
        let mut env = LaunchEnvironment::new();
        env.set(DEFAULT_SCHEMA_DIR_VAR, "/p/_build/schemas");

        let script = render_bootstrap(&BootstrapSpec {
            project_root: Path::new("/p"),
            runtime_dir: Path::new("/p/_build/runtime"),
            archive: Path::new("/p/_build/app.resource"),
            entry: &entry,
            runtime_module: "shared",
            env: &env,
        });

        assert!(script.contains("RESOURCE_FILE = '/p/_build/app.resource'"));
        assert!(script.contains("os.environ['GSETTINGS_SCHEMA_DIR'] = '/p/_build/schemas'"));
        assert!(script.contains("sys.path.insert(0, '/p/_build/runtime')"));
        assert!(script.contains("signal.signal(signal.SIGINT, signal.SIG_DFL)"));
        assert!(script.contains("Gio.Resource.load(RESOURCE_FILE)._register()"));
        assert!(script.contains("entry = importlib.import_module('src.main')"));
        assert!(script.ends_with("sys.exit(entry.main())\n"));

        let check = script.find("os.path.isfile").unwrap();
        let register = script.find("_register").unwrap();
        assert!(check < register);
    }

    #[test]
    fn bootstrap_registers_runtime_module_in_entry_package() {
        let env = LaunchEnvironment::new();
        let render = |entry: &EntryPoint| {
            render_bootstrap(&BootstrapSpec {
                project_root: Path::new("/p"),
                runtime_dir: Path::new("/p/_build/runtime"),
                archive: Path::new("/p/_build/app.resource"),
                entry,
                runtime_module: "shared",
                env: &env,
            })
        };

        let script = render(&"src.main:main".parse().unwrap());
        assert!(script.contains("runtime = importlib.import_module('shared')"));
        assert!(script.contains("package = importlib.import_module('src')"));
        assert!(script.contains("sys.modules['src.shared'] = runtime"));
        assert!(script.contains("setattr(package, 'shared', runtime)"));
        let registered = script.find("setattr(package").unwrap();
        assert!(registered < script.find("import_module('src.main')").unwrap());

        let flat = render(&"main:main".parse().unwrap());
        assert!(flat.contains("runtime = importlib.import_module('shared')"));
        assert!(!flat.contains("package ="));
    }
}
