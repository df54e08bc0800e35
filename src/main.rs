//! Hatch CLI - build and launch a GTK application from its source checkout
//!
//! Usage: hatch [COMMAND]
//!
//! Commands:
//!   run     Full build, then launch (default)
//!   quick   Launch the previous build
//!   build   Full build without launching
//!   doctor  Report tools, configuration and artifacts
//!   clean   Remove generated output

mod commands;
mod ui;

use clap::Parser;

use hatch::config::{with_env_overrides, Config};
use hatch::presentation::Cli;

use crate::ui::context::UiContext;

fn main() {
    let cli = Cli::parse();
    let command = cli.command_or_default();

    let code = match commands::dispatch(&cli, &command) {
        Ok(code) => code,
        Err(err) => {
            // The project config may be what failed; only env overrides apply.
            let output =
                with_env_overrides(Config::default(), |key| std::env::var(key).ok()).output();
            let ui = UiContext::new(cli.json, cli.verbose, cli.color, &output);
            ui::error::print_error(&err, command.name(), &ui);
            ui::error::exit_code(&err)
        }
    };

    std::process::exit(code);
}
