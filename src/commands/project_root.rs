use std::path::{Path, PathBuf};

use hatch::config::CONFIG_FILE;

/// Discover the project root from the invocation directory.
///
/// Walks upward from `start` to the nearest directory holding `hatch.toml`,
/// so commands work from any subdirectory of a checkout. Falls back to
/// `start` when no ancestor has one.
pub(crate) fn discover_project_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join(CONFIG_FILE).is_file())
        .unwrap_or(start)
        .to_path_buf()
}

/// `--project` relative to the working directory, or the discovered root
pub(crate) fn resolve_project_root(explicit: Option<&Path>) -> std::io::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(match explicit {
        Some(dir) => cwd.join(dir),
        None => discover_project_root(&cwd),
    })
}
