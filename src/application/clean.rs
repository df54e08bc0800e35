//! Clean Use Case
//!
//! Removes generated output. The environment is kept unless `all` is set.

use std::path::PathBuf;

use crate::domain::ports::FileSystem;
use crate::domain::value_objects::BuildLayout;
use crate::error::HatchResult;

/// Options for clean
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanOptions {
    /// Also remove the environment dir
    pub all: bool,
    /// Report only, delete nothing
    pub dry_run: bool,
}

/// Result of a clean operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanResult {
    /// Directories that were deleted (or would be in dry run)
    pub removed: Vec<PathBuf>,
    /// Directories that did not exist
    pub absent: Vec<PathBuf>,
}

impl CleanResult {
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty()
    }
}

/// Clean use case
pub struct CleanUseCase<FS: FileSystem> {
    fs: FS,
}

impl<FS: FileSystem> CleanUseCase<FS> {
    pub fn new(fs: FS) -> Self {
        Self { fs }
    }

    pub fn execute(&self, layout: &BuildLayout, options: &CleanOptions) -> HatchResult<CleanResult> {
        let mut targets = vec![layout.build_dir().to_path_buf()];
        if options.all {
            targets.push(layout.venv_dir().to_path_buf());
        }

        let mut result = CleanResult::default();
        for dir in targets {
            if !self.fs.exists(&dir) {
                result.absent.push(dir);
                continue;
            }
            if !options.dry_run {
                self.fs.remove_dir_all(&dir)?;
            }
            result.removed.push(dir);
        }
        Ok(result)
    }
}
