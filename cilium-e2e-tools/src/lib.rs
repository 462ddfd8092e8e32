//! Lifecycle management for the cilium CLI
//!
//! This crate finds the external `cilium` executable, confirms it responds to
//! `version`, and drives its `install` subcommand with deployment options.
//! Process execution goes through the [`CommandRunner`] trait so the same
//! logic runs against real processes or a [`RecordingRunner`] in tests.

// Modules
pub mod cilium;
pub mod error;
pub mod locator;
pub mod options;
pub mod runner;
pub mod search;
pub mod testing;

// Re-exports for convenience
pub use cilium::{CiliumCli, ContextOutcome, DEFAULT_BINARY};
pub use error::{CiliumCliError, RunError, Stage};
pub use locator::{ExternalTool, LocatedTool};
pub use options::{DeploymentOptions, FlagSyntax};
pub use runner::{CommandOutput, CommandRunner, Invocation, SystemRunner};
pub use search::SearchPath;
pub use testing::RecordingRunner;
