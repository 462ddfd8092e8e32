//! Stage functions wrapping the cilium CLI lifecycle

use cilium_e2e_core::ExecutionContext;
use cilium_e2e_tools::{CiliumCli, ContextOutcome, DeploymentOptions};
use std::sync::Arc;

use crate::config::EnvConfig;
use crate::error::BoxError;

/// The caller's context handed back with the stage result
pub type StageOutcome = (ExecutionContext, Result<(), BoxError>);

/// A setup or finish stage
pub type EnvFunc = Arc<dyn Fn(ExecutionContext, &EnvConfig) -> StageOutcome + Send + Sync>;

/// Install cilium with the given options using the `cilium` CLI on PATH
///
/// The returned function locates the CLI and runs `cilium install` each time
/// it is called. The environment argument is not consulted.
pub fn install_cilium_with_opts(options: Option<DeploymentOptions>) -> EnvFunc {
    Arc::new(move |ctx: ExecutionContext, _env: &EnvConfig| {
        boxed(CiliumCli::new().install(ctx, options.as_ref()))
    })
}

/// Install cilium with the CLI's default options
pub fn install_cilium() -> EnvFunc {
    install_cilium_with_opts(None)
}

/// Confirm the cilium CLI is available on PATH for teardown
pub fn uninstall_cilium() -> EnvFunc {
    Arc::new(|ctx: ExecutionContext, _env: &EnvConfig| boxed(CiliumCli::new().uninstall(ctx)))
}

/// Like [`install_cilium_with_opts`], driving the given CLI instead
pub fn install_cilium_using(cli: CiliumCli, options: Option<DeploymentOptions>) -> EnvFunc {
    Arc::new(move |ctx: ExecutionContext, _env: &EnvConfig| {
        boxed(cli.install(ctx, options.as_ref()))
    })
}

/// Like [`uninstall_cilium`], driving the given CLI instead
pub fn uninstall_cilium_using(cli: CiliumCli) -> EnvFunc {
    Arc::new(move |ctx: ExecutionContext, _env: &EnvConfig| boxed(cli.uninstall(ctx)))
}

fn boxed((ctx, result): ContextOutcome) -> StageOutcome {
    (ctx, result.map_err(BoxError::from))
}
