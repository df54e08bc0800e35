//! `hatch clean`

use anyhow::Result;

use hatch::application::CleanOptions;
use hatch::presentation::{factory, Cli};

use crate::commands::session::Session;
use crate::ui::json::{complete, emit, start};
use crate::ui::views::clean::render_clean_result;

pub fn cmd_clean(cli: &Cli, all: bool, dry_run: bool) -> Result<i32> {
    let session = Session::open(cli, false)?;
    let ui = session.ui;

    if ui.json {
        emit(start("clean"))?;
    }

    let result = factory::create_clean_use_case()
        .execute(&session.project.layout, &CleanOptions { all, dry_run })?;

    if ui.json {
        let removed: Vec<String> = result
            .removed
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        emit(complete(
            "clean",
            serde_json::json!({ "removed": removed, "dry_run": dry_run }),
        ))?;
    } else {
        print!(
            "{}",
            render_clean_result(&result, session.root(), dry_run, ui.color, ui.unicode)
        );
    }
    Ok(0)
}
