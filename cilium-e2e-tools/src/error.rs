//! Error types for locating and driving the cilium CLI

use cilium_e2e_core::ContextError;
use std::io;
use thiserror::Error;

/// Failure to run one external process to a successful exit
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed while waiting for {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} {}", describe_exit(.code))]
    NonZeroExit { program: String, code: Option<i32> },

    #[error("{program} was stopped: {reason}")]
    Interrupted {
        program: String,
        #[source]
        reason: ContextError,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

/// Which step of a lifecycle operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Locate,
    VersionCheck,
    Subcommand,
}

/// Errors returned by [`crate::ExternalTool::locate`] and the lifecycle operations
#[derive(Debug, Error)]
pub enum CiliumCliError {
    /// The executable is not on the search path; install it out-of-band
    #[error("{tool} CLI not installed or could not be found: {source}")]
    NotFound {
        tool: String,
        #[source]
        source: which::Error,
    },

    /// The executable exists but `version` did not run cleanly
    #[error("failed to determine {tool} version: {source}")]
    VersionCheckFailed {
        tool: String,
        #[source]
        source: RunError,
    },

    /// A lifecycle subcommand failed; `stderr` holds what it printed
    #[error("{tool} {subcommand} failed: {source}{}", stderr_suffix(.stderr))]
    SubcommandFailed {
        tool: String,
        subcommand: String,
        stderr: String,
        #[source]
        source: RunError,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {}", stderr)
    }
}

impl CiliumCliError {
    pub fn stage(&self) -> Stage {
        match self {
            CiliumCliError::NotFound { .. } => Stage::Locate,
            CiliumCliError::VersionCheckFailed { .. } => Stage::VersionCheck,
            CiliumCliError::SubcommandFailed { .. } => Stage::Subcommand,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.stage() == Stage::Locate
    }

    /// Captured stderr of a failed subcommand
    pub fn stderr(&self) -> Option<&str> {
        match self {
            CiliumCliError::SubcommandFailed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}
