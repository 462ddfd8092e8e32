//! Errors reported by environment stages

use cilium_e2e_tools::CiliumCliError;
use std::fmt;
use thiserror::Error;

/// Error type carried by stage functions
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which group of stages failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Finish,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Setup => write!(f, "setup"),
            Phase::Finish => write!(f, "finish"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("{phase} stage '{name}' failed: {source}")]
    Stage {
        phase: Phase,
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("test body failed: {0}")]
    Body(#[source] BoxError),
}

impl EnvError {
    pub fn phase(&self) -> Option<Phase> {
        match self {
            EnvError::Stage { phase, .. } => Some(*phase),
            EnvError::Body(_) => None,
        }
    }

    pub fn stage_name(&self) -> Option<&str> {
        match self {
            EnvError::Stage { name, .. } => Some(name),
            EnvError::Body(_) => None,
        }
    }

    /// The lifecycle error behind a failed stage, if that is what failed
    pub fn cilium_error(&self) -> Option<&CiliumCliError> {
        let source = match self {
            EnvError::Stage { source, .. } => source,
            EnvError::Body(source) => source,
        };
        source.downcast_ref::<CiliumCliError>()
    }
}
