//! `hatch build` and `hatch run`

use anyhow::Result;

use hatch::presentation::{factory, Cli};

use crate::commands::session::Session;
use crate::ui::json::{complete, emit, start};
use crate::ui::primitives::icon::Icon;
use crate::ui::views::build::{build_json, render_build_summary, render_header};

pub fn cmd_build(cli: &Cli, incremental: bool) -> Result<i32> {
    let session = Session::open(cli, incremental)?;
    let ui = session.ui;

    if ui.json {
        emit(start("build"))?;
    } else if !ui.quiet {
        eprint!(
            "{}",
            render_header(Icon::Build, "Build", &session.project, ui.color, ui.unicode)
        );
    }

    let report = factory::create_build_pipeline().build(&session.project, &session.events("build"))?;

    if ui.json {
        emit(complete("build", build_json(&report)))?;
    } else {
        print!(
            "{}",
            render_build_summary(&report, &session.project, ui.color, ui.unicode)
        );
    }
    Ok(0)
}

/// Build, then hand the terminal to the application until it exits.
pub fn cmd_run(cli: &Cli, incremental: bool) -> Result<i32> {
    let session = Session::open(cli, incremental)?;
    let ui = session.ui;

    if ui.json {
        emit(start("run"))?;
    } else if !ui.quiet {
        eprint!(
            "{}",
            render_header(Icon::Run, "Run", &session.project, ui.color, ui.unicode)
        );
    }

    let (report, exit_code) =
        factory::create_build_pipeline()
            .with_app_stdout_to_stderr(ui.json)
            .run(&session.project, &session.events("run"))?;

    if ui.json {
        let mut extra = build_json(&report);
        extra["exit_code"] = exit_code.into();
        emit(complete("run", extra))?;
    }
    Ok(exit_code)
}

/// Relaunch the previous build.
pub fn cmd_quick(cli: &Cli) -> Result<i32> {
    let session = Session::open(cli, false)?;

    if session.ui.json {
        emit(start("quick"))?;
    }

    let exit_code = factory::create_build_pipeline()
        .with_app_stdout_to_stderr(session.ui.json)
        .quick(&session.project, &session.events("quick"))?;

    if session.ui.json {
        emit(complete("quick", serde_json::json!({ "exit_code": exit_code })))?;
    }
    Ok(exit_code)
}
