//! `hatch doctor`
//!
//! Works without `hatch.toml`: tools are then checked under their default
//! program names and artifacts under the default layout.

use anyhow::Result;

use hatch::application::{ConfigStatus, Project};
use hatch::config::{load_project, with_env_overrides, Config, CONFIG_FILE};
use hatch::presentation::{factory, Cli};
use hatch::HatchError;

use crate::commands::project_root::resolve_project_root;
use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::context::UiContext;
use crate::ui::json::{complete, emit, start};
use crate::ui::output::print_config_warnings;
use crate::ui::primitives::icon::Icon;
use crate::ui::views::doctor::{doctor_json, render_doctor};

pub fn cmd_doctor(cli: &Cli) -> Result<i32> {
    let root = resolve_project_root(cli.project.as_deref())?;

    let (config, status, warnings) = match load_project(&root) {
        Ok(loaded) => {
            let status = ConfigStatus::Loaded {
                path: loaded.path,
                warnings: loaded.warnings.len(),
            };
            (loaded.config, status, loaded.warnings)
        }
        Err(HatchError::ConfigNotFound { .. }) => (
            with_env_overrides(Config::default(), |key| std::env::var(key).ok()),
            ConfigStatus::Missing {
                expected: root.join(CONFIG_FILE),
            },
            Vec::new(),
        ),
        Err(e) => return Err(e.into()),
    };

    let ui = UiContext::new(cli.json, cli.verbose, cli.color, &config.output());
    print_config_warnings(&warnings, &ui);
    let project = Project::from_config(&config, &root)?;
    let report = factory::create_doctor_use_case().diagnose(&project, status);

    if ui.json {
        emit(start("doctor"))?;
        let mut event = complete("doctor", doctor_json(&report));
        event["success"] = report.is_healthy().into();
        emit(event)?;
    } else {
        let mut header = CommandHeader::new(Icon::Doctor, "Hatch Doctor");
        header.add("Project", root.display().to_string());
        print!("{}", header.render(ui.color, ui.unicode));
        print!("{}", render_doctor(&report, &root, ui.color, ui.unicode));

        let summary = if report.is_healthy() {
            let mut s = ResultSummary::success("All tools found");
            if !report.quick_ready() {
                s.with_next_step("`hatch run` builds and launches the app");
            }
            s
        } else {
            let mut s = ResultSummary::failure("Missing tools");
            for status in report.missing_tools() {
                s.add_warning(format!("{} not found on PATH", status.program));
            }
            s.with_next_step("install the missing tools with the commands above");
            s
        };
        print!("{}", summary.render(ui.color, ui.unicode));
    }

    Ok(if report.is_healthy() { 0 } else { 1 })
}
