//! Environment handle passed to every stage

use cilium_e2e_core::config::CiliumConfig;
use cilium_e2e_core::Config;
use std::path::PathBuf;

/// Cluster and tool settings shared by the stages of one environment
#[derive(Debug, Clone, PartialEq)]
pub struct EnvConfig {
    /// Kubeconfig of the target cluster; `None` leaves it to the tool
    pub kubeconfig: Option<PathBuf>,
    pub namespace: String,
    pub cilium: CiliumConfig,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl EnvConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            kubeconfig: config.cluster.kubeconfig.clone(),
            namespace: config.cluster.namespace.clone(),
            cilium: config.cilium.clone(),
        }
    }

    pub fn with_kubeconfig(mut self, kubeconfig: impl Into<PathBuf>) -> Self {
        self.kubeconfig = Some(kubeconfig.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
}
