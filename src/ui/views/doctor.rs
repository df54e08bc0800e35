//! Doctor view
//!
//! One box per section: tools with install hints for the missing ones,
//! then the configuration file and build artifacts.

use std::path::Path;

use hatch::application::{ConfigStatus, DoctorReport};

use crate::ui::error::install_hints;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::{paint, Tone};
use crate::ui::widgets::r#box::{Box, BoxStyle};

pub fn render_doctor(
    report: &DoctorReport,
    root: &Path,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let ok = Icon::Success.colored(supports_color, supports_unicode);
    let fail = Icon::Error.colored(supports_color, supports_unicode);
    let absent = Icon::Skipped.colored(supports_color, supports_unicode);
    let show = |p: &Path| p.strip_prefix(root).unwrap_or(p).display().to_string();

    let tool_style = if report.is_healthy() {
        BoxStyle::Success
    } else {
        BoxStyle::Error
    };
    let mut tools = Box::with_title("Tools").style(tool_style);
    for status in &report.tools {
        match &status.path {
            Some(path) => tools.add_line(format!(
                "{ok} {} {}",
                status.program,
                paint(&path.display().to_string(), Tone::Dim, supports_color)
            )),
            None => {
                tools.add_line(format!(
                    "{fail} {} {}",
                    status.program,
                    paint("not found", Tone::Error, supports_color)
                ));
                for hint in install_hints(status.tool) {
                    tools.add_line(format!("    {hint}"));
                }
            }
        }
    }

    let mut project = Box::with_title("Project");
    match &report.config {
        ConfigStatus::Loaded { path, warnings: 0 } => {
            project.add_line(format!("{ok} {}", show(path)));
        }
        ConfigStatus::Loaded { path, warnings } => project.add_line(format!(
            "{} {} ({warnings} unknown keys)",
            Icon::Warning.colored(supports_color, supports_unicode),
            show(path)
        )),
        ConfigStatus::Missing { expected } => project.add_line(format!(
            "{fail} {} {}",
            show(expected),
            paint("missing", Tone::Error, supports_color)
        )),
    }
    project.add_empty();
    for artifact in &report.artifacts {
        let icon = if artifact.present { &ok } else { &absent };
        project.add_line(format!("{icon} {:<17} {}", artifact.label, show(&artifact.path)));
    }

    format!(
        "{}{}",
        tools.render(supports_color, supports_unicode),
        project.render(supports_color, supports_unicode)
    )
}

pub fn doctor_json(report: &DoctorReport) -> serde_json::Value {
    let tools: Vec<serde_json::Value> = report
        .tools
        .iter()
        .map(|t| {
            serde_json::json!({
                "tool": t.tool.key(),
                "program": t.program,
                "path": t.path.as_ref().map(|p| p.display().to_string()),
                "found": t.found(),
            })
        })
        .collect();
    let artifacts: Vec<serde_json::Value> = report
        .artifacts
        .iter()
        .map(|a| {
            serde_json::json!({
                "artifact": a.label,
                "path": a.path.display().to_string(),
                "present": a.present,
            })
        })
        .collect();
    let config = match &report.config {
        ConfigStatus::Loaded { path, warnings } => serde_json::json!({
            "path": path.display().to_string(),
            "found": true,
            "warnings": warnings,
        }),
        ConfigStatus::Missing { expected } => serde_json::json!({
            "path": expected.display().to_string(),
            "found": false,
        }),
    };

    serde_json::json!({
        "healthy": report.is_healthy(),
        "quick_ready": report.quick_ready(),
        "tools": tools,
        "config": config,
        "artifacts": artifacts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hatch::application::{ArtifactStatus, ToolStatus};
    use hatch::domain::value_objects::Tool;
    use std::path::PathBuf;

    fn report() -> DoctorReport {
        DoctorReport {
            tools: vec![
                ToolStatus {
                    tool: Tool::Interpreter,
                    program: "python3".to_string(),
                    path: Some(PathBuf::from("/usr/bin/python3")),
                },
                ToolStatus {
                    tool: Tool::ResourceCompiler,
                    program: "glib-compile-resources".to_string(),
                    path: None,
                },
            ],
            config: ConfigStatus::Loaded {
                path: PathBuf::from("/p/hatch.toml"),
                warnings: 0,
            },
            artifacts: vec![ArtifactStatus {
                label: "build dir",
                path: PathBuf::from("/p/_build"),
                present: false,
            }],
        }
    }

    #[test]
    fn missing_tool_shows_install_hints() {
        let rendered = render_doctor(&report(), Path::new("/p"), false, false);

        assert!(rendered.contains("[OK] python3 /usr/bin/python3"));
        assert!(rendered.contains("[FAIL] glib-compile-resources not found"));
        assert!(rendered.contains("Debian/Ubuntu: sudo apt install libglib2.0-dev-bin"));
        assert!(rendered.contains("[OK] hatch.toml"));
        assert!(rendered.contains("[--] build dir"));
    }

    #[test]
    fn json_reports_health() {
        let json = doctor_json(&report());
        assert_eq!(json["healthy"], false);
        assert_eq!(json["tools"][1]["found"], false);
        assert_eq!(json["config"]["found"], true);
    }
}
