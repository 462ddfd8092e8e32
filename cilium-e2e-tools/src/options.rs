//! Deployment options and their rendering into command-line flags

use cilium_e2e_core::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Deployment-time settings passed to `cilium install`
///
/// Keys are kept sorted so the rendered arguments are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeploymentOptions(BTreeMap<String, String>);

impl DeploymentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Overlay `other` on top of these options; its values win
    pub fn merge(&mut self, other: &DeploymentOptions) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }

    /// Parse a `KEY=VALUE` pair as given on the command line
    pub fn parse_pair(pair: &str) -> Result<(String, String), CoreError> {
        match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            }
            _ => Err(CoreError::InvalidInput(format!(
                "expected KEY=VALUE, got '{}'",
                pair
            ))),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for DeploymentOptions
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<BTreeMap<String, String>> for DeploymentOptions {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl From<HashMap<String, String>> for DeploymentOptions {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

/// How each option pair becomes command-line arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagSyntax {
    /// `<flag> key=value`, e.g. `--set ipam.mode=kubernetes`
    Set { flag: String },
    /// `--key=value`
    Long,
}

impl Default for FlagSyntax {
    fn default() -> Self {
        FlagSyntax::Set {
            flag: "--set".to_string(),
        }
    }
}

impl FlagSyntax {
    pub fn set(flag: impl Into<String>) -> Self {
        FlagSyntax::Set { flag: flag.into() }
    }

    /// Build from the `flag_syntax` and `set_flag` configuration values
    pub fn from_config(kind: &str, set_flag: &str) -> Result<Self, CoreError> {
        match kind.to_lowercase().as_str() {
            "set" => Ok(FlagSyntax::set(set_flag)),
            "long" => Ok(FlagSyntax::Long),
            other => Err(CoreError::Configuration(format!(
                "unknown flag_syntax '{}', expected 'set' or 'long'",
                other
            ))),
        }
    }

    pub fn render(&self, options: &DeploymentOptions) -> Vec<String> {
        let mut args = Vec::new();
        for (key, value) in options.iter() {
            match self {
                FlagSyntax::Set { flag } => {
                    args.push(flag.clone());
                    args.push(format!("{}={}", key, value));
                }
                FlagSyntax::Long => args.push(format!("--{}={}", key, value)),
            }
        }
        args
    }
}
