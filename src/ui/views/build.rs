//! Build, run and quick command views

use std::path::Path;

use hatch::application::{BuildReport, Project};

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;

pub fn render_header(
    icon: Icon,
    action: &str,
    project: &Project,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(icon, format!("Hatch {action}"));
    header.add("App", format!("{} {}", project.app_id, project.version));
    header.add("Project", project.root().display().to_string());
    if project.incremental {
        header.add("Mode", "incremental");
    }
    header.render(supports_color, supports_unicode)
}

fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

pub fn render_build_summary(
    report: &BuildReport,
    project: &Project,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let root = project.root();
    let mut summary = ResultSummary::success("Build Complete");

    summary.add_row("Groups compiled", report.compile.compiled.len());
    if !report.compile.skipped.is_empty() {
        summary.add_row("Groups up to date", report.compile.skipped.len());
    }
    summary.add_row("UI files", report.compile.assets.len());
    summary.add_row("Resources", report.manifest_entries);
    summary.add_row("Archive", relative(&report.archive, root));
    summary.add_row("Schema", relative(&report.schema.path, root));
    summary.add_row("Launcher", relative(&report.bootstrap, root));

    if report.schema.substitutions == 0 {
        summary.add_warning("schema template has no @app_id@ or @prefix@ placeholders");
    }
    summary.with_next_step("`hatch quick` relaunches without rebuilding");
    summary.render(supports_color, supports_unicode)
}

pub fn build_json(report: &BuildReport) -> serde_json::Value {
    serde_json::json!({
        "groups_compiled": report.compile.compiled,
        "groups_skipped": report.compile.skipped,
        "ui_files": report.compile.assets.len(),
        "resources": report.manifest_entries,
        "archive": report.archive.display().to_string(),
        "schema": report.schema.path.display().to_string(),
        "bootstrap": report.bootstrap.display().to_string(),
        "runtime_module": report.runtime_module.display().to_string(),
        "environment_created": report.environment.created,
    })
}
