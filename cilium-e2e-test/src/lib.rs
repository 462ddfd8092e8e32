//! Test utilities for the cilium-e2e workspace
//!
//! This crate provides common test helpers shared by the workspace's
//! integration tests.
//!
//! # Features
//!
//! - **Fake tools**: shell-script stand-ins for the cilium CLI placed in a
//!   throwaway directory, with scripted output and an invocation log
//! - **Log capture**: run a closure under a subscriber that writes into a buffer

#[cfg(unix)]
pub mod fake_tool;
pub mod logs;

// Re-export commonly used items
#[cfg(unix)]
pub use fake_tool::{empty_bin_dir, FakeTool, FakeToolBuilder};
pub use logs::{capture_logs, LogBuffer};

// Re-export test dependencies for convenience
pub use anyhow::{Context, Result};
pub use tempfile;

/// Initialize test logging (call once per test module)
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}
