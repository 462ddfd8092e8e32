use clap::Parser;
use colored::*;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;

use crate::cli::{Cli, Commands};
use cilium_e2e_core::CoreError;

/// Environment variable holding the default log filter
const LOG_ENV_VAR: &str = "CILIUM_E2E_LOG";

fn main() {
    let cli = Cli::parse();

    let log_level = log_filter(cli.verbose, std::env::var(LOG_ENV_VAR).ok());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        let exit_code = match e.downcast_ref::<CoreError>() {
            Some(CoreError::Configuration(_)) => 2,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Check(args) => crate::cli::commands::check::run(args, config),
        Commands::Install(args) => crate::cli::commands::install::run(args, config),
        Commands::Uninstall(args) => crate::cli::commands::uninstall::run(args, config),
    }
}

/// Filter used when RUST_LOG is unset: `-v` wins over the environment
fn log_filter(verbose: u8, from_env: Option<String>) -> String {
    match verbose {
        0 => from_env.unwrap_or_else(|| "warn".to_string()),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter() {
        assert_eq!(log_filter(0, None), "warn");
        assert_eq!(
            log_filter(0, Some("cilium_e2e_tools=debug".into())),
            "cilium_e2e_tools=debug"
        );
        assert_eq!(log_filter(1, Some("error".into())), "info");
        assert_eq!(log_filter(2, None), "debug");
        assert_eq!(log_filter(5, None), "trace");
    }
}
