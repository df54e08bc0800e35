//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --color, --verbose, --project) are inherited by all subcommands
//! - Running `hatch` with no subcommand is the same as `hatch run`

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Hatch - build and launch a GTK application from its source checkout
#[derive(Parser, Debug)]
#[command(name = "hatch")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run 'hatch' without arguments to build and launch.")]
pub struct Cli {
    /// Emit NDJSON events instead of terminal output
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v shows every tool invocation)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Project root containing hatch.toml
    #[arg(long, global = true, value_name = "DIR")]
    pub project: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Full build, then launch the application
    Run {
        /// Skip groups whose sources have not changed
        #[arg(long)]
        incremental: bool,
    },

    /// Launch the previous build without rebuilding
    Quick,

    /// Full build without launching
    Build {
        /// Skip groups whose sources have not changed
        #[arg(long)]
        incremental: bool,
    },

    /// Report required tools, configuration and build artifacts
    Doctor,

    /// Remove generated output
    Clean {
        /// Also remove the isolated environment
        #[arg(long)]
        all: bool,

        /// Show what would be removed
        #[arg(long)]
        dry_run: bool,
    },
}

impl Cli {
    /// The subcommand, defaulting to `run`
    pub fn command_or_default(&self) -> Commands {
        match &self.command {
            Some(Commands::Run { incremental }) => Commands::Run {
                incremental: *incremental,
            },
            Some(Commands::Quick) => Commands::Quick,
            Some(Commands::Build { incremental }) => Commands::Build {
                incremental: *incremental,
            },
            Some(Commands::Doctor) => Commands::Doctor,
            Some(Commands::Clean { all, dry_run }) => Commands::Clean {
                all: *all,
                dry_run: *dry_run,
            },
            None => Commands::Run { incremental: false },
        }
    }
}

impl Commands {
    /// Name used in JSON events
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Run { .. } => "run",
            Commands::Quick => "quick",
            Commands::Build { .. } => "build",
            Commands::Doctor => "doctor",
            Commands::Clean { .. } => "clean",
        }
    }
}
