//! Configuration types for cilium-e2e

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::system::resolve_config_path;
use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub cilium: CiliumConfig,
    #[serde(default)]
    pub install: InstallConfig,
    #[serde(default)]
    pub cluster: ClusterConfig,
}

/// How the cilium CLI is found and how options are passed to it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CiliumConfig {
    /// Executable name resolved on the search path
    #[serde(default = "default_binary")]
    pub binary: String,
    /// Directories searched instead of PATH; empty means PATH
    #[serde(default)]
    pub search_path: Vec<PathBuf>,
    /// Option rendering: "set" (`--set key=value`) or "long" (`--key=value`)
    #[serde(default = "default_flag_syntax")]
    pub flag_syntax: String,
    /// Flag used by the "set" syntax
    #[serde(default = "default_set_flag")]
    pub set_flag: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct InstallConfig {
    /// Deployment options passed to `cilium install`
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClusterConfig {
    #[serde(default)]
    pub kubeconfig: Option<PathBuf>,
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

// Default value functions
fn default_binary() -> String { "cilium".to_string() }
fn default_flag_syntax() -> String { "set".to_string() }
fn default_set_flag() -> String { "--set".to_string() }
fn default_namespace() -> String { "kube-system".to_string() }

impl Default for CiliumConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            search_path: Vec::new(),
            flag_syntax: default_flag_syntax(),
            set_flag: default_set_flag(),
        }
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            kubeconfig: None,
            namespace: default_namespace(),
        }
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> CoreResult<Config> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| CoreError::Configuration(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> CoreResult<()> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| CoreError::Configuration(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Load the configuration the current process should use
///
/// See [`resolve_config_path`] for lookup order. Without any file the
/// defaults are returned. A file that was asked for but cannot be read is an
/// error.
pub fn load_effective_config(explicit: Option<&Path>) -> CoreResult<Config> {
    match resolve_config_path(explicit) {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            load_config(&path).map_err(|e| match e {
                CoreError::Io(io) => CoreError::Configuration(format!(
                    "Failed to read config {}: {}",
                    path.display(),
                    io
                )),
                other => other,
            })
        }
        None => {
            debug!("No configuration file found, using defaults");
            Ok(default_config())
        }
    }
}
