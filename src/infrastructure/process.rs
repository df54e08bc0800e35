//! External process execution
//!
//! `SystemToolRunner` implements the ToolRunner port with `std::process`,
//! `WhichLocator` implements ToolLocator with the `which` crate.

use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::OnceLock;

use crate::domain::ports::{ToolInvocation, ToolLocator, ToolOutput, ToolRunner};
use crate::error::{HatchError, HatchResult};

/// Runs tools as child processes of the current process
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemToolRunner;

impl SystemToolRunner {
    pub fn new() -> Self {
        Self
    }

    fn command(invocation: &ToolInvocation) -> Command {
        let mut cmd = Command::new(invocation.program());
        cmd.args(invocation.get_args());
        if let Some(dir) = invocation.get_current_dir() {
            cmd.current_dir(dir);
        }
        for (name, value) in invocation.get_env() {
            cmd.env(name, value);
        }
        cmd
    }

    fn spawn_error(invocation: &ToolInvocation, source: std::io::Error) -> HatchError {
        HatchError::Spawn {
            program: invocation.program().display().to_string(),
            source,
        }
    }
}

impl ToolRunner for SystemToolRunner {
    fn run(&self, invocation: &ToolInvocation) -> HatchResult<ToolOutput> {
        let output = Self::command(invocation)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Self::spawn_error(invocation, e))?;

        Ok(ToolOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn run_interactive(&self, invocation: &ToolInvocation) -> HatchResult<i32> {
        let mut cmd = Self::command(invocation);
        if invocation.redirects_stdout() {
            cmd.stdout(Stdio::from(std::io::stderr()));
        }

        let status = cmd.status().map_err(|e| Self::spawn_error(invocation, e))?;

        Ok(exit_code_of(status))
    }

    fn forward_interrupts(&self) -> Result<(), String> {
        ignore_interrupts()
    }
}

/// Keep Ctrl+C from killing us while the child handles it.
///
/// The terminal delivers SIGINT to the whole foreground process group; the
/// child decides what to do with it and we report its exit status. The
/// handler can only be installed once per process, so the outcome is kept.
fn ignore_interrupts() -> Result<(), String> {
    static INSTALLED: OnceLock<Result<(), String>> = OnceLock::new();
    INSTALLED
        .get_or_init(|| {
            ctrlc::set_handler(|| {})
                .map_err(|e| format!("could not install Ctrl+C handler: {e}"))
        })
        .clone()
}

/// Exit code of a finished child; signal deaths map to `128 + signal`.
pub fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

/// Finds executables on `PATH` (or validates explicit paths)
#[derive(Debug, Clone, Copy, Default)]
pub struct WhichLocator;

impl WhichLocator {
    pub fn new() -> Self {
        Self
    }
}

impl ToolLocator for WhichLocator {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn run_captures_output_and_exit_code() {
        let inv = ToolInvocation::new("sh")
            .arg("-c")
            .arg("echo out; echo err >&2; exit 3");
        let output = SystemToolRunner::new().run(&inv).unwrap();

        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[test]
    fn run_passes_env_and_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let inv = ToolInvocation::new("sh")
            .arg("-c")
            .arg("printf '%s %s' \"$HATCH_MARKER\" \"$(pwd)\"")
            .env("HATCH_MARKER", "yes")
            .current_dir(dir.path());
        let output = SystemToolRunner::new().run(&inv).unwrap();

        assert!(output.succeeded());
        assert!(output.stdout.starts_with("yes "));
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let inv = ToolInvocation::new("hatch-definitely-not-a-real-program");
        let err = SystemToolRunner::new().run(&inv).unwrap_err();
        assert!(matches!(err, HatchError::Spawn { .. }));
    }

    #[test]
    fn interactive_returns_exit_code() {
        let inv = ToolInvocation::new("sh").arg("-c").arg("exit 7");
        assert_eq!(SystemToolRunner::new().run_interactive(&inv).unwrap(), 7);
    }

    #[test]
    fn signal_death_maps_to_128_plus_signal() {
        let inv = ToolInvocation::new("sh").arg("-c").arg("kill -TERM $$");
        assert_eq!(SystemToolRunner::new().run_interactive(&inv).unwrap(), 128 + 15);
    }

    #[test]
    fn interrupt_handler_is_installed_once() {
        let runner = SystemToolRunner::new();
        assert_eq!(runner.forward_interrupts(), Ok(()));
        assert_eq!(runner.forward_interrupts(), Ok(()));
    }

    #[test]
    fn which_locator_finds_sh() {
        assert!(WhichLocator::new().locate("sh").is_some());
        assert!(WhichLocator::new()
            .locate("hatch-definitely-not-a-real-program")
            .is_none());
    }
}
