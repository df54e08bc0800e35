//! FileSystem port - abstraction over file I/O operations
//!
//! Use cases touch the disk only through this trait, so they can run
//! against a temp dir in tests and the real file system in production.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug, Error)]
pub enum FsError {
    /// File not found
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Permission denied
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),
    /// Any other I/O failure
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    /// Attach the path an I/O error happened at.
    pub fn at(path: impl Into<PathBuf>, err: io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::NotFound => FsError::NotFound(path),
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path),
            _ => FsError::Io { path, source: err },
        }
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O with atomic writes
pub trait FileSystem {
    /// Read file content as string
    fn read(&self, path: &Path) -> FsResult<String>;

    /// Read raw bytes
    fn read_bytes(&self, path: &Path) -> FsResult<Vec<u8>>;

    /// Write content atomically, creating parent directories
    fn write(&self, path: &Path, content: &str) -> FsResult<()>;

    /// Check if a file or directory exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path is an existing file
    fn is_file(&self, path: &Path) -> bool;

    /// Create directory and parents
    fn create_dir_all(&self, path: &Path) -> FsResult<()>;

    /// Remove a directory tree; absent directories are not an error
    fn remove_dir_all(&self, path: &Path) -> FsResult<()>;

    /// Remove a file; absent files are not an error
    fn remove_file(&self, path: &Path) -> FsResult<()>;

    /// Replace a directory with an empty one
    fn reset_dir(&self, path: &Path) -> FsResult<()> {
        self.remove_dir_all(path)?;
        self.create_dir_all(path)
    }

    /// Copy a file, creating parent directories of the target
    fn copy(&self, from: &Path, to: &Path) -> FsResult<()>;

    /// Rename, replacing the target
    fn rename(&self, from: &Path, to: &Path) -> FsResult<()>;

    /// Files with `extension` directly inside `dir`, sorted by name
    fn list_files(&self, dir: &Path, extension: &str) -> FsResult<Vec<PathBuf>>;

    /// Subdirectories directly inside `dir`, sorted by name
    fn list_dirs(&self, dir: &Path) -> FsResult<Vec<PathBuf>>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn read(&self, path: &Path) -> FsResult<String> {
        (**self).read(path)
    }

    fn read_bytes(&self, path: &Path) -> FsResult<Vec<u8>> {
        (**self).read_bytes(path)
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        (**self).write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        (**self).create_dir_all(path)
    }

    fn remove_dir_all(&self, path: &Path) -> FsResult<()> {
        (**self).remove_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> FsResult<()> {
        (**self).remove_file(path)
    }

    fn reset_dir(&self, path: &Path) -> FsResult<()> {
        (**self).reset_dir(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        (**self).copy(from, to)
    }

    fn rename(&self, from: &Path, to: &Path) -> FsResult<()> {
        (**self).rename(from, to)
    }

    fn list_files(&self, dir: &Path, extension: &str) -> FsResult<Vec<PathBuf>> {
        (**self).list_files(dir, extension)
    }

    fn list_dirs(&self, dir: &Path) -> FsResult<Vec<PathBuf>> {
        (**self).list_dirs(dir)
    }
}
