//! Error rendering for the terminal and for `--json`

use hatch::domain::value_objects::{Platform, Tool};
use hatch::HatchError;

use crate::ui::blocks::error::ErrorBlock;
use crate::ui::context::UiContext;

/// Exit code for a top-level error
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<HatchError>()
        .map(HatchError::exit_code)
        .unwrap_or(1)
}

/// `Label: command` lines for every platform that packages the tool
pub fn install_hints(tool: Tool) -> Vec<String> {
    let mut hints: Vec<String> = Platform::ALL
        .iter()
        .filter_map(|p| tool.install_hint(*p).map(|hint| format!("{}: {hint}", p.label())))
        .collect();
    if let Some(source) = tool.source_hint() {
        hints.push(source.to_string());
    }
    hints
}

pub fn error_block(err: &HatchError) -> ErrorBlock {
    let block = ErrorBlock::new(err.stage(), err.to_string());
    match err {
        HatchError::ToolMissing { tools } => tools.iter().fold(block, |block, tool| {
            install_hints(*tool).into_iter().fold(
                block.with_detail(format!("{} ({})", tool.default_program(), tool.label())),
                |block, hint| block.with_detail(format!("  {hint}")),
            )
        })
        .with_fix("install the tools above, or point [tools] in hatch.toml at them"),
        HatchError::MissingBuild { .. } => {
            block.with_fix("run `hatch run` once to build before using `hatch quick`")
        }
        HatchError::ResourceLoad { .. } => {
            block.with_fix("run `hatch build` to regenerate the resource archive")
        }
        HatchError::Compilation { .. } => {
            block.with_fix("fix the blueprint errors reported above and re-run")
        }
        HatchError::CompiledOutputMissing { .. } => block
            .with_fix("check that every source compiles to a file of the same name"),
        HatchError::BundleMissingFile { .. } => {
            block.with_fix("check [resources] styles and the group sources in hatch.toml")
        }
        HatchError::SchemaCompilation { .. } => block.with_fix(
            "check the schema template; it should use @app_id@ and @prefix@ placeholders",
        ),
        HatchError::Provision { .. } => block.with_fix(
            "remove the environment with `hatch clean --all` and re-run to recreate it",
        ),
        HatchError::ConfigNotFound { .. } => {
            block.with_fix("create hatch.toml with at least [app] id = \"org.example.App\"")
        }
        HatchError::BuildState { .. } => {
            block.with_fix("run `hatch clean` to discard the incremental build state")
        }
        _ => block,
    }
}

pub fn format_error(err: &anyhow::Error, ui: &UiContext) -> String {
    match err.downcast_ref::<HatchError>() {
        Some(hatch) => error_block(hatch).render(ui.color, ui.unicode),
        None => ErrorBlock::new("hatch", format!("{err:#}")).render(ui.color, ui.unicode),
    }
}

pub fn error_json(err: &anyhow::Error, command: &str) -> serde_json::Value {
    let hatch = err.downcast_ref::<HatchError>();
    serde_json::json!({
        "event": "error",
        "command": command,
        "stage": hatch.map(HatchError::stage).unwrap_or("hatch"),
        "code": hatch.map(HatchError::code).unwrap_or("internal"),
        "message": format!("{err:#}"),
        "exit_code": exit_code(err),
    })
}

pub fn print_error(err: &anyhow::Error, command: &str, ui: &UiContext) {
    if ui.json {
        let _ = crate::ui::json::emit(error_json(err, command));
        return;
    }

    if ui.caps.is_ci && std::env::var_os("GITHUB_ACTIONS").is_some() {
        println!("{}", github_annotation(&format!("{err:#}")));
    }
    eprint!("{}", format_error(err, ui));
}

/// `::error title=hatch::<message>` with workflow-command escaping
fn github_annotation(message: &str) -> String {
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::error title=hatch::{escaped}")
}
