//! Test doubles shared by the use case tests

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::ports::{ToolInvocation, ToolLocator, ToolOutput, ToolRunner};
use crate::error::HatchResult;

type Handler = Box<dyn Fn(&ToolInvocation) -> ToolOutput + Send + Sync>;

/// Records every invocation and answers with a handler
pub struct FakeToolRunner {
    calls: Mutex<Vec<ToolInvocation>>,
    handler: Handler,
    interrupt_error: Option<String>,
}

impl FakeToolRunner {
    /// Emulates each tool's side effects on disk and succeeds.
    pub fn emulating() -> Self {
        Self::with(emulate)
    }

    pub fn with(handler: impl Fn(&ToolInvocation) -> ToolOutput + Send + Sync + 'static) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            handler: Box::new(handler),
            interrupt_error: None,
        }
    }

    /// Fail `forward_interrupts` with `reason`
    pub fn refusing_interrupts(mut self, reason: &str) -> Self {
        self.interrupt_error = Some(reason.to_string());
        self
    }

    pub fn calls(&self) -> Vec<ToolInvocation> {
        self.calls.lock().unwrap().clone()
    }

    /// Invocations whose program file name is `name`
    pub fn calls_to(&self, name: &str) -> Vec<ToolInvocation> {
        self.calls()
            .into_iter()
            .filter(|c| program_name(c) == name)
            .collect()
    }
}

impl ToolRunner for FakeToolRunner {
    fn run(&self, invocation: &ToolInvocation) -> HatchResult<ToolOutput> {
        self.calls.lock().unwrap().push(invocation.clone());
        Ok((self.handler)(invocation))
    }

    fn run_interactive(&self, invocation: &ToolInvocation) -> HatchResult<i32> {
        self.calls.lock().unwrap().push(invocation.clone());
        Ok((self.handler)(invocation).exit_code.unwrap_or(1))
    }

    fn forward_interrupts(&self) -> Result<(), String> {
        match &self.interrupt_error {
            Some(reason) => Err(reason.clone()),
            None => Ok(()),
        }
    }
}

/// Finds only the listed programs
pub struct FakeLocator {
    available: Vec<String>,
}

impl FakeLocator {
    pub fn with(programs: &[&str]) -> Self {
        Self {
            available: programs.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn all() -> Self {
        Self::with(&[
            "python3",
            "glib-compile-schemas",
            "blueprint-compiler",
            "glib-compile-resources",
        ])
    }
}

impl ToolLocator for FakeLocator {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        self.available
            .iter()
            .any(|p| p == program)
            .then(|| PathBuf::from("/usr/bin").join(program))
    }
}

pub fn program_name(invocation: &ToolInvocation) -> String {
    invocation
        .program()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Side effects of the real tools, good enough for the pipeline to proceed.
pub fn emulate(invocation: &ToolInvocation) -> ToolOutput {
    let args = invocation.get_args();
    match program_name(invocation).as_str() {
        "blueprint-compiler" => {
            let out = Path::new(&args[1]);
            let input = Path::new(&args[2]);
            for source in &args[3..] {
                let relative = Path::new(source).strip_prefix(input).unwrap();
                let target = out.join(relative).with_extension("ui");
                std::fs::create_dir_all(target.parent().unwrap()).unwrap();
                std::fs::write(target, "<interface/>\n").unwrap();
            }
        }
        "glib-compile-resources" => {
            let target = args
                .iter()
                .find_map(|a| a.strip_prefix("--target="))
                .unwrap();
            let manifest = args.last().unwrap();
            let bytes = std::fs::read(manifest).unwrap();
            std::fs::write(target, bytes).unwrap();
        }
        "glib-compile-schemas" => {
            let dir = Path::new(args.last().unwrap());
            std::fs::write(dir.join("gschemas.compiled"), "compiled").unwrap();
        }
        "python3" if args.iter().any(|a| a == "venv") => {
            let dir = Path::new(args.last().unwrap());
            std::fs::create_dir_all(dir.join("bin")).unwrap();
            std::fs::write(dir.join("bin").join("python3"), "").unwrap();
        }
        _ => {}
    }
    ToolOutput::success()
}
