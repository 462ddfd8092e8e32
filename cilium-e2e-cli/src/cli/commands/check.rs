use crate::cli::output::*;
use cilium_e2e_core::ExecutionContext;
use clap::Args;
use std::path::Path;

#[derive(Args)]
pub struct CheckArgs {
    /// Print the located tool as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: CheckArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let (_, cli) = super::load_cli(config_path)?;
    let located = cli.locate(&ExecutionContext::background())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&located)?);
        return Ok(());
    }

    success(&format!("{} CLI is available", cli.tool().name()));
    tree_item(false, "Path", Some(&located.path.display().to_string()));
    let version = located.version.as_deref().unwrap_or("unknown");
    tree_item(true, "Version", Some(version));
    Ok(())
}
