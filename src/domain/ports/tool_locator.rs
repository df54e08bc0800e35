//! ToolLocator port - finding executables on the search path

use std::path::PathBuf;

/// Resolves a program name (or explicit path) to an executable
pub trait ToolLocator {
    fn locate(&self, program: &str) -> Option<PathBuf>;
}

impl<T: ToolLocator + ?Sized> ToolLocator for &T {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        (**self).locate(program)
    }
}
