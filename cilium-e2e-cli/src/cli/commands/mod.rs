pub mod check;
pub mod install;
pub mod uninstall;

use cilium_e2e_core::{load_effective_config, Config};
use cilium_e2e_tools::{CiliumCli, SystemRunner};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Load the effective configuration and build the CLI driver from it
pub fn load_cli(config_path: Option<&Path>) -> anyhow::Result<(Config, CiliumCli)> {
    let config = load_effective_config(config_path)?;
    let cli = CiliumCli::from_config(&config.cilium, Arc::new(SystemRunner::new()))?;
    debug!(
        "Using {} CLI with flag syntax {:?}",
        config.cilium.binary,
        cli.flag_syntax()
    );
    Ok((config, cli))
}
