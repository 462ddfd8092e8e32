use crate::cli::output::*;
use cilium_e2e_core::ExecutionContext;
use clap::Args;
use std::path::Path;

#[derive(Args)]
pub struct UninstallArgs {}

pub fn run(_args: UninstallArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let (_, cli) = super::load_cli(config_path)?;

    let (_, result) = cli.uninstall(ExecutionContext::background());
    result?;

    success(&format!("{} CLI is available for teardown", cli.tool().name()));
    warning("cilium uninstall is not run yet; the cluster is left as it is");
    Ok(())
}
