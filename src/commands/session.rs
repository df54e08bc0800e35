//! Shared command setup: project root, configuration, UI context and sink

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use hatch::application::Project;
use hatch::config::{load_project, LoadedConfig};
use hatch::domain::ports::PipelineEventSink;
use hatch::infrastructure::JsonEventSink;
use hatch::presentation::Cli;

use crate::commands::project_root::resolve_project_root;
use crate::ui::context::UiContext;
use crate::ui::output::print_config_warnings;
use crate::ui::progress::ConsoleEventSink;

pub(crate) struct Session {
    pub project: Project,
    pub ui: UiContext,
}

impl Session {
    /// Load `hatch.toml`, report unknown keys and resolve the project.
    pub fn open(cli: &Cli, incremental: bool) -> Result<Self> {
        let root = resolve_project_root(cli.project.as_deref())?;
        let LoadedConfig {
            config, warnings, ..
        } = load_project(&root)?;

        let ui = UiContext::new(cli.json, cli.verbose, cli.color, &config.output());
        print_config_warnings(&warnings, &ui);

        let mut project = Project::from_config(&config, &root)?;
        project.incremental |= incremental;

        Ok(Self { project, ui })
    }

    pub fn root(&self) -> &Path {
        self.project.root()
    }

    pub fn events(&self, command: &'static str) -> Arc<dyn PipelineEventSink> {
        if self.ui.json {
            Arc::new(JsonEventSink::stdout(command))
        } else {
            Arc::new(ConsoleEventSink::stderr(self.ui, self.root()))
        }
    }
}
