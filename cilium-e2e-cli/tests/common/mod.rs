#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use cilium_e2e_core::{save_config, Config};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated HOME with room for a config file
pub struct Workspace {
    pub temp_dir: TempDir,
}

impl Workspace {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    /// Write a config that resolves the tool only in `bin_dir`
    pub fn config_for(&self, bin_dir: &Path, edit: impl FnOnce(&mut Config)) -> Result<PathBuf> {
        let mut config = Config::default();
        config.cilium.search_path = vec![bin_dir.to_path_buf()];
        edit(&mut config);

        let path = self.temp_dir.path().join("cilium-e2e.toml");
        save_config(&path, &config)?;
        Ok(path)
    }

    /// The binary with HOME pointed here and no inherited config or log settings
    pub fn cmd(&self) -> Result<Command> {
        let mut cmd = Command::cargo_bin("cilium-e2e")?;
        cmd.env("HOME", self.temp_dir.path())
            .env("NO_COLOR", "1")
            .env_remove("CILIUM_E2E_CONFIG")
            .env_remove("CILIUM_E2E_LOG")
            .env_remove("RUST_LOG");
        Ok(cmd)
    }
}
