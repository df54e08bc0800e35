//! Console event sink
//!
//! Renders pipeline events as one line each on stderr, so the launched
//! application keeps stdout to itself.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use hatch::domain::ports::{PipelineEvent, PipelineEventSink};

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::{paint, paint_bold, Tone};

pub struct ConsoleEventSink {
    ui: UiContext,
    root: PathBuf,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEventSink {
    pub fn stderr(ui: UiContext, root: &Path) -> Self {
        Self::with_writer(ui, root, io::stderr())
    }

    pub fn with_writer<W: Write + Send + 'static>(ui: UiContext, root: &Path, writer: W) -> Self {
        Self {
            ui,
            root: root.to_path_buf(),
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn line(&self, text: String) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{text}");
        }
    }

    fn done(&self, text: String) {
        if !self.ui.quiet {
            self.line(format!("  {} {text}", self.icon(Icon::Success)));
        }
    }

    fn skipped(&self, text: String) {
        if !self.ui.quiet {
            self.line(format!("  {} {text}", self.icon(Icon::Skipped)));
        }
    }

    fn icon(&self, icon: Icon) -> String {
        icon.colored(self.ui.color, self.ui.unicode)
    }

    fn show(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

impl PipelineEventSink for ConsoleEventSink {
    fn on_event(&self, event: PipelineEvent) {
        match event {
            PipelineEvent::StageStarted { stage } => {
                if !self.ui.quiet {
                    self.line(format!(
                        "{} {}",
                        self.icon(Icon::Stage),
                        paint_bold(stage.title(), Tone::Info, self.ui.color)
                    ));
                }
            }
            PipelineEvent::ToolInvoked { command, .. } => {
                if self.ui.verbose {
                    self.line(format!("    {}", paint(&format!("$ {command}"), Tone::Dim, self.ui.color)));
                }
            }
            PipelineEvent::ToolFailed {
                tool,
                exit_code,
                stderr,
            } => {
                let code = exit_code.map_or_else(|| "a signal".to_string(), |c| c.to_string());
                self.line(format!(
                    "  {} {}",
                    self.icon(Icon::Error),
                    paint(&format!("{tool} exited with {code}"), Tone::Error, self.ui.color)
                ));
                for line in stderr.lines() {
                    self.line(format!("    {line}"));
                }
            }
            PipelineEvent::EnvironmentReady { dir, created } => {
                if created {
                    self.done(format!("environment created at {}", self.show(&dir)));
                } else {
                    self.skipped(format!("reusing environment at {}", self.show(&dir)));
                }
            }
            PipelineEvent::GroupCompiled { group, outputs } => {
                let noun = if outputs == 1 { "file" } else { "files" };
                self.done(format!("{group} ({outputs} {noun})"));
            }
            PipelineEvent::GroupSkipped { group } => self.skipped(format!("{group} up to date")),
            PipelineEvent::GroupEmpty { group } => self.skipped(format!("{group} has no sources")),
            PipelineEvent::ManifestWritten { path, entries } => {
                self.done(format!("{} ({entries} entries)", self.show(&path)));
            }
            PipelineEvent::ArchiveWritten { path } => self.done(self.show(&path)),
            PipelineEvent::SchemaCompiled {
                path,
                substitutions,
            } => {
                self.done(format!(
                    "{} ({substitutions} substitutions)",
                    self.show(&path)
                ));
            }
            PipelineEvent::FileGenerated { path } => self.done(self.show(&path)),
            PipelineEvent::Warning { message } => {
                self.line(format!("  {} {message}", self.icon(Icon::Warning)));
            }
            PipelineEvent::Launching { bootstrap } => {
                if !self.ui.quiet {
                    self.line(format!(
                        "{} {} {}",
                        self.icon(Icon::Run),
                        paint_bold("Launching", Tone::Info, self.ui.color),
                        paint(&self.show(&bootstrap), Tone::Dim, self.ui.color)
                    ));
                }
            }
            PipelineEvent::Exited { exit_code } => {
                if self.ui.verbose {
                    self.line(format!("  application exited with {exit_code}"));
                }
            }
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.ui.verbose
    }
}
