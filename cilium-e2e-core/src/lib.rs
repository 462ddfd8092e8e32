//! Core types shared across all cilium-e2e crates

pub mod config;
pub mod context;
pub mod error;
pub mod system;

// Re-export commonly used types
pub use config::{load_config, load_effective_config, save_config, Config};
pub use context::{CancelHandle, ContextError, ExecutionContext};
pub use error::{CoreError, CoreResult};

pub use system::{config_path_from_env, default_config_path, resolve_config_path};

/// Version information for the cilium-e2e project
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
