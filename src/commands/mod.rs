//! Command handlers
//!
//! Each handler returns the process exit code; errors are rendered by
//! `main`.

pub mod build;
pub mod clean;
pub mod doctor;
pub(crate) mod project_root;
pub(crate) mod session;

use anyhow::Result;

use hatch::presentation::{Cli, Commands};

pub fn dispatch(cli: &Cli, command: &Commands) -> Result<i32> {
    match command {
        Commands::Run { incremental } => build::cmd_run(cli, *incremental),
        Commands::Quick => build::cmd_quick(cli),
        Commands::Build { incremental } => build::cmd_build(cli, *incremental),
        Commands::Doctor => doctor::cmd_doctor(cli),
        Commands::Clean { all, dry_run } => clean::cmd_clean(cli, *all, *dry_run),
    }
}
