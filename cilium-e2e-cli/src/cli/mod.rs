pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cilium-e2e",
    version = cilium_e2e_core::VERSION,
    about = "Install and tear down cilium for end-to-end test clusters",
    long_about = "Finds the cilium CLI, confirms it responds to `version`, and drives \
                  `cilium install` with deployment options taken from the configuration \
                  file and the command line."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to $CILIUM_E2E_CONFIG, then ~/.cilium-e2e.toml)
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Locate the cilium CLI and report its version
    Check(commands::check::CheckArgs),

    /// Install cilium into the current cluster
    Install(commands::install::InstallArgs),

    /// Tear cilium down
    Uninstall(commands::uninstall::UninstallArgs),
}
