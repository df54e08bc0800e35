//! ToolRunner port - invoking external executables
//!
//! Every external collaborator (compilers, bundler, interpreter) is reached
//! through this trait. Invocations are plain data so tests can record them.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::HatchResult;

/// One command line to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    program: PathBuf,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    env: Vec<(String, String)>,
    stdout_to_stderr: bool,
}

impl ToolInvocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            env: Vec::new(),
            stdout_to_stderr: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a path argument
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy().into_owned())
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((name.into(), value.into()));
        self
    }

    /// Send the child's stdout to our stderr (interactive runs only)
    pub fn stdout_to_stderr(mut self, redirect: bool) -> Self {
        self.stdout_to_stderr = redirect;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn get_current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    pub fn get_env(&self) -> &[(String, String)] {
        &self.env
    }

    pub fn redirects_stdout(&self) -> bool {
        self.stdout_to_stderr
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Captured result of a finished tool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success() -> Self {
        Self {
            exit_code: Some(0),
            ..Self::default()
        }
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs external executables
pub trait ToolRunner {
    /// Run to completion with captured output.
    ///
    /// A non-zero exit is reported in `ToolOutput`, not as an error; only a
    /// failure to start the process is an error.
    fn run(&self, invocation: &ToolInvocation) -> HatchResult<ToolOutput>;

    /// Run with inherited stdio and return the exit code.
    ///
    /// Signal deaths map to `128 + signal`.
    fn run_interactive(&self, invocation: &ToolInvocation) -> HatchResult<i32>;

    /// Let Ctrl+C reach an interactive child instead of stopping us.
    ///
    /// Returns why that could not be arranged; the child still runs.
    fn forward_interrupts(&self) -> Result<(), String> {
        Ok(())
    }
}

impl<T: ToolRunner + ?Sized> ToolRunner for &T {
    fn run(&self, invocation: &ToolInvocation) -> HatchResult<ToolOutput> {
        (**self).run(invocation)
    }

    fn forward_interrupts(&self) -> Result<(), String> {
        (**self).forward_interrupts()
    }

    fn run_interactive(&self, invocation: &ToolInvocation) -> HatchResult<i32> {
        (**self).run_interactive(invocation)
    }
}
