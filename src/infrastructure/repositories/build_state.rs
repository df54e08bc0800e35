//! TOML Build State Repository
//!
//! Implements the BuildStateRepository port using TOML format.

use std::path::Path;

use crate::domain::entities::{BuildState, STATE_VERSION};
use crate::domain::ports::{BuildStateRepository, FileSystem, FsError};
use crate::error::{HatchError, HatchResult};
use crate::infrastructure::fs::LocalFs;

/// TOML-based build state repository
///
/// Stores `.hatch-state.toml` under the build dir.
pub struct TomlBuildStateRepository<FS: FileSystem = LocalFs> {
    fs: FS,
}

impl TomlBuildStateRepository<LocalFs> {
    /// Create a new repository with the default file system
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl Default for TomlBuildStateRepository<LocalFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<FS: FileSystem> TomlBuildStateRepository<FS> {
    /// Create with a custom file system
    pub fn with_fs(fs: FS) -> Self {
        Self { fs }
    }
}

impl<FS: FileSystem> BuildStateRepository for TomlBuildStateRepository<FS> {
    fn load_or_new(&self, path: &Path) -> BuildState {
        self.load(path).unwrap_or_default()
    }

    fn load(&self, path: &Path) -> HatchResult<BuildState> {
        let content = match self.fs.read(path) {
            Ok(content) => content,
            Err(FsError::NotFound(_)) => return Ok(BuildState::default()),
            Err(e) => return Err(e.into()),
        };

        let state: BuildState = toml::from_str(&content).map_err(|e| HatchError::BuildState {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if state.version != STATE_VERSION {
            return Err(HatchError::BuildState {
                path: path.to_path_buf(),
                message: format!("unsupported version {}", state.version),
            });
        }

        Ok(state)
    }

    fn save(&self, state: &BuildState, path: &Path) -> HatchResult<()> {
        let content = toml::to_string_pretty(state).map_err(|e| HatchError::BuildState {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        self.fs.write(path, &content)?;
        Ok(())
    }
}
