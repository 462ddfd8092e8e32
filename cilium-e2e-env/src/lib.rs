//! Environment stages for cilium end-to-end suites
//!
//! Stage functions have the shape `(ctx, env) -> (ctx, result)` so they can be
//! chained by a test framework. [`install_cilium`] and [`uninstall_cilium`]
//! wrap the CLI lifecycle from `cilium-e2e-tools`; [`Environment`] runs
//! setup stages, a test body and finish stages in order.

pub mod config;
pub mod environment;
pub mod error;
pub mod funcs;

pub use config::EnvConfig;
pub use environment::Environment;
pub use error::{BoxError, EnvError, Phase};
pub use funcs::{
    install_cilium, install_cilium_using, install_cilium_with_opts, uninstall_cilium,
    uninstall_cilium_using, EnvFunc, StageOutcome,
};
