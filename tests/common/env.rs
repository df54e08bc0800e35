//! Test environment builder for isolated Hatch testing.
//!
//! Provides `TestEnv` - a temp project directory, an isolated home and a
//! private tool directory that replaces `PATH`, plus helpers to run the
//! `hatch` binary inside it.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

use super::fixtures;

/// Result of running a Hatch CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON, one value per non-empty line
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l)
                    .unwrap_or_else(|e| panic!("stdout line is not JSON ({e}): {l}"))
            })
            .collect()
    }
}

/// Isolated test environment.
///
/// `PATH` for every run is exactly `tools_dir`, so only the tools a test
/// installs are visible to `hatch`.
pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
    pub tools_dir: TempDir,
    hatch_bin: PathBuf,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// File recording what the fake tools were asked to do
    pub fn tool_log_path(&self) -> PathBuf {
        self.home_dir.path().join("tools.log")
    }

    pub fn tool_log(&self) -> String {
        std::fs::read_to_string(self.tool_log_path()).unwrap_or_default()
    }

    /// Run hatch from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from_with_env(self.project_root.path(), args, &[])
    }

    /// Run hatch from the project root with extra env vars
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_from_with_env(self.project_root.path(), args, env_vars)
    }

    /// Run hatch from a specific directory
    pub fn run_from(&self, cwd: &Path, args: &[&str]) -> TestResult {
        self.run_from_with_env(cwd, args, &[])
    }

    pub fn run_from_with_env(
        &self,
        cwd: &Path,
        args: &[&str],
        env_vars: &[(&str, &str)],
    ) -> TestResult {
        let mut cmd = Command::new(&self.hatch_bin);
        cmd.current_dir(cwd)
            .args(args)
            .env_clear()
            .env("PATH", self.tools_dir.path())
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env("NO_COLOR", "1")
            .env("TERM", "dumb")
            .env("HATCH_TEST_LOG", self.tool_log_path());

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute hatch");
        output_to_result(output)
    }

    /// Write a file to the project directory
    pub fn write_project_file(&self, relative_path: &str, content: &str) {
        let full_path = self.project_path(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    /// Read a generated file from the project directory
    pub fn read_project_file(&self, relative_path: &str) -> String {
        std::fs::read_to_string(self.project_path(relative_path))
            .unwrap_or_else(|e| panic!("Failed to read {relative_path}: {e}"))
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Builder for TestEnv with fluent API
pub struct TestEnvBuilder {
    config: Option<String>,
    files: Vec<(String, String)>,
    tools: Vec<(&'static str, &'static str)>,
}

impl TestEnvBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            files: Vec::new(),
            tools: Vec::new(),
        }
    }

    /// Set hatch.toml content
    pub fn with_config(mut self, toml: &str) -> Self {
        self.config = Some(toml.to_string());
        self
    }

    /// Add a file to the project
    pub fn with_file(mut self, relative_path: &str, content: &str) -> Self {
        self.files
            .push((relative_path.to_string(), content.to_string()));
        self
    }

    /// A small two-group application with a stylesheet, schema template and
    /// requirements file
    pub fn with_demo_project(self) -> Self {
        self.with_config(fixtures::DEMO_CONFIG)
            .with_file("src/ui/widgets/button.blp", fixtures::BLUEPRINT)
            .with_file("src/ui/widgets/header.blp", fixtures::BLUEPRINT)
            .with_file("src/ui/dialogs/about.blp", fixtures::BLUEPRINT)
            .with_file("data/style.css", fixtures::STYLESHEET)
            .with_file("data/org.example.Demo.gschema.xml.in", fixtures::SCHEMA_TEMPLATE)
            .with_file("requirements.txt", "requests\n")
    }

    /// Install a fake tool script under its program name
    pub fn with_tool(mut self, name: &'static str, script: &'static str) -> Self {
        self.tools.retain(|(existing, _)| *existing != name);
        self.tools.push((name, script));
        self
    }

    /// Install fake versions of every required tool
    pub fn with_fake_tools(self) -> Self {
        self.with_tool("python3", fixtures::FAKE_PYTHON)
            .with_tool("blueprint-compiler", fixtures::FAKE_BLUEPRINT_COMPILER)
            .with_tool("glib-compile-resources", fixtures::FAKE_RESOURCE_COMPILER)
            .with_tool("glib-compile-schemas", fixtures::FAKE_SCHEMA_COMPILER)
    }

    pub fn build(self) -> TestEnv {
        let project_root = TempDir::new().expect("Failed to create temp project dir");
        let home_dir = TempDir::new().expect("Failed to create temp home dir");
        let tools_dir = TempDir::new().expect("Failed to create temp tools dir");

        let env = TestEnv {
            project_root,
            home_dir,
            tools_dir,
            hatch_bin: PathBuf::from(env!("CARGO_BIN_EXE_hatch")),
        };

        if let Some(config) = &self.config {
            env.write_project_file("hatch.toml", config);
        }
        for (path, content) in &self.files {
            env.write_project_file(path, content);
        }
        for (name, script) in &self.tools {
            install_tool(env.tools_dir.path(), name, script);
        }

        env
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(unix)]
fn install_tool(dir: &Path, name: &str, script: &str) {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, script).expect("Failed to write fake tool");
    let mut perms = std::fs::metadata(&path)
        .expect("Failed to stat fake tool")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("Failed to mark fake tool executable");
}

#[cfg(not(unix))]
fn install_tool(_dir: &Path, _name: &str, _script: &str) {}
