//! Install and uninstall driven through the cilium CLI

use cilium_e2e_core::config::CiliumConfig;
use cilium_e2e_core::{CoreError, ExecutionContext};
use std::sync::Arc;

use crate::error::CiliumCliError;
use crate::locator::{ExternalTool, LocatedTool};
use crate::options::{DeploymentOptions, FlagSyntax};
use crate::runner::{CommandRunner, Invocation, SystemRunner};
use crate::search::SearchPath;

/// Executable name of the cilium CLI
pub const DEFAULT_BINARY: &str = "cilium";

/// The caller's context handed back with the result of a lifecycle operation
pub type ContextOutcome = (ExecutionContext, Result<(), CiliumCliError>);

/// Lifecycle driver for the cilium CLI
///
/// Every operation locates the tool first and only then runs a subcommand.
/// The context goes back to the caller untouched, on success and on failure.
#[derive(Debug, Clone)]
pub struct CiliumCli {
    tool: ExternalTool,
    flags: FlagSyntax,
}

impl Default for CiliumCli {
    fn default() -> Self {
        Self::new()
    }
}

impl CiliumCli {
    /// `cilium` on PATH, run as a real process, options as `--set key=value`
    pub fn new() -> Self {
        Self::with_runner(Arc::new(SystemRunner::new()))
    }

    pub fn with_runner(runner: Arc<dyn CommandRunner>) -> Self {
        Self::with_tool(ExternalTool::new(DEFAULT_BINARY, runner))
    }

    pub fn with_tool(tool: ExternalTool) -> Self {
        Self {
            tool,
            flags: FlagSyntax::default(),
        }
    }

    pub fn with_flag_syntax(mut self, flags: FlagSyntax) -> Self {
        self.flags = flags;
        self
    }

    /// Build from the `[cilium]` configuration section
    pub fn from_config(
        config: &CiliumConfig,
        runner: Arc<dyn CommandRunner>,
    ) -> Result<Self, CoreError> {
        let flags = FlagSyntax::from_config(&config.flag_syntax, &config.set_flag)?;
        let tool = ExternalTool::new(config.binary.clone(), runner)
            .with_search_path(SearchPath::from_config(&config.search_path));
        Ok(Self::with_tool(tool).with_flag_syntax(flags))
    }

    pub fn tool(&self) -> &ExternalTool {
        &self.tool
    }

    pub fn flag_syntax(&self) -> &FlagSyntax {
        &self.flags
    }

    pub fn locate(&self, ctx: &ExecutionContext) -> Result<LocatedTool, CiliumCliError> {
        self.tool.locate(ctx)
    }

    /// Arguments passed to the tool for `install`
    pub fn install_args(&self, options: Option<&DeploymentOptions>) -> Vec<String> {
        let mut args = vec!["install".to_string()];
        if let Some(options) = options {
            args.extend(self.flags.render(options));
        }
        args
    }

    /// Install the networking layer with the given options
    ///
    /// `None` or empty options leave everything to the tool's defaults. The
    /// install subcommand never runs unless locate succeeded first.
    pub fn install(
        &self,
        ctx: ExecutionContext,
        options: Option<&DeploymentOptions>,
    ) -> ContextOutcome {
        let located = match self.tool.locate(&ctx) {
            Ok(located) => located,
            Err(err) => return (ctx, Err(err)),
        };

        let invocation = Invocation::new(located.path).args(self.install_args(options));
        let result = self
            .tool
            .run(&ctx, &invocation)
            .map(|_| ())
            .map_err(|failure| CiliumCliError::SubcommandFailed {
                tool: self.tool.name().to_string(),
                subcommand: "install".to_string(),
                stderr: failure.stderr,
                source: failure.error,
            });
        (ctx, result)
    }

    /// Confirm the tool is available for teardown
    pub fn uninstall(&self, ctx: ExecutionContext) -> ContextOutcome {
        if let Err(err) = self.tool.locate(&ctx) {
            return (ctx, Err(err));
        }

        // TODO: run `cilium uninstall` here so teardown mirrors install
        (ctx, Ok(()))
    }
}
