use crate::cli::output::*;
use cilium_e2e_core::{Config, ExecutionContext};
use cilium_e2e_tools::DeploymentOptions;
use clap::Args;
use std::path::Path;
use std::time::Duration;

#[derive(Args)]
pub struct InstallArgs {
    /// Deployment option for the installer (can be repeated, overrides the config file)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = DeploymentOptions::parse_pair)]
    pub set: Vec<(String, String)>,

    /// Stop the installer after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

pub fn run(args: InstallArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let (config, cli) = super::load_cli(config_path)?;
    let options = merged_options(&config, &args.set);

    let mut ctx = ExecutionContext::background();
    if let Some(secs) = args.timeout {
        ctx = ctx.with_timeout(Duration::from_secs(secs));
    }

    section_header("Installing cilium");
    if options.is_empty() {
        info("Using the installer's default options");
    } else {
        for (i, (key, value)) in options.iter().enumerate() {
            tree_item(i == options.len() - 1, key, Some(value));
        }
    }

    action(&format!("Running {} install", cli.tool().name()));
    let (_, result) = cli.install(ctx, Some(&options));
    result?;

    success("Install finished");
    Ok(())
}

/// Options from `[install.options]` with command-line pairs applied on top
pub fn merged_options(config: &Config, overrides: &[(String, String)]) -> DeploymentOptions {
    let mut options = DeploymentOptions::from(config.install.options.clone());
    options.merge(&overrides.iter().cloned().collect());
    options
}
