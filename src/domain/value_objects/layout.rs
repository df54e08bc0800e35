//! Build directory layout
//!
//! Every artifact path the pipeline reads or writes is derived here, so the
//! stages agree on locations without passing paths between each other.

use std::path::{Path, PathBuf};

/// File name of the generated bootstrap unit
pub const BOOTSTRAP_FILE: &str = "launcher.py";

/// File name of the incremental build state
pub const STATE_FILE: &str = ".hatch-state.toml";

/// Deterministic artifact locations rooted at the project directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
    project_root: PathBuf,
    build_dir: PathBuf,
    venv_dir: PathBuf,
    bundle_name: String,
}

impl BuildLayout {
    /// `build_dir` and `venv_dir` may be relative to `project_root`.
    pub fn new(
        project_root: impl Into<PathBuf>,
        build_dir: impl AsRef<Path>,
        venv_dir: impl AsRef<Path>,
        bundle_name: impl Into<String>,
    ) -> Self {
        let project_root = project_root.into();
        Self {
            build_dir: project_root.join(build_dir.as_ref()),
            venv_dir: project_root.join(venv_dir.as_ref()),
            project_root,
            bundle_name: bundle_name.into(),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    pub fn venv_dir(&self) -> &Path {
        &self.venv_dir
    }

    pub fn bundle_name(&self) -> &str {
        &self.bundle_name
    }

    /// Root of all compiled UI output
    pub fn ui_dir(&self) -> PathBuf {
        self.build_dir.join("ui")
    }

    /// Output directory of one source group: `<build>/ui/<group>`
    pub fn group_output_dir(&self, group: &str) -> PathBuf {
        self.ui_dir().join(group)
    }

    /// Where static stylesheets are copied
    pub fn css_dir(&self) -> PathBuf {
        self.build_dir.join("css")
    }

    /// Generated manifest descriptor
    pub fn manifest_path(&self) -> PathBuf {
        self.build_dir
            .join(format!("{}.resource.xml", self.bundle_name))
    }

    /// Compiled binary resource archive
    pub fn archive_path(&self) -> PathBuf {
        self.build_dir.join(format!("{}.resource", self.bundle_name))
    }

    /// Temporary archive target; renamed over the real archive on success
    pub fn archive_tmp_path(&self) -> PathBuf {
        self.build_dir
            .join(format!("{}.resource.tmp", self.bundle_name))
    }

    /// Derived and compiled settings schema
    pub fn schemas_dir(&self) -> PathBuf {
        self.build_dir.join("schemas")
    }

    /// Generated runtime-configuration module directory
    pub fn runtime_dir(&self) -> PathBuf {
        self.build_dir.join("runtime")
    }

    /// Generated bootstrap unit
    pub fn bootstrap_path(&self) -> PathBuf {
        self.build_dir.join(BOOTSTRAP_FILE)
    }

    /// Incremental build state
    pub fn state_path(&self) -> PathBuf {
        self.build_dir.join(STATE_FILE)
    }

    /// Executables directory inside the isolated environment
    pub fn venv_bin_dir(&self) -> PathBuf {
        if cfg!(windows) {
            self.venv_dir.join("Scripts")
        } else {
            self.venv_dir.join("bin")
        }
    }

    /// Interpreter inside the isolated environment
    pub fn venv_python(&self) -> PathBuf {
        if cfg!(windows) {
            self.venv_bin_dir().join("python.exe")
        } else {
            self.venv_bin_dir().join("python3")
        }
    }

    /// Path relative to the build dir, with forward slashes.
    ///
    /// Returns `None` when `path` is outside the build dir.
    pub fn relative_to_build(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.build_dir).ok()?;
        let parts: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}
