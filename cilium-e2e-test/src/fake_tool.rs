//! Shell-script stand-ins for external CLIs
//!
//! A [`FakeTool`] is an executable `#!/bin/sh` script written into its own
//! temporary `bin` directory. Each subcommand can be scripted with stdout,
//! stderr and an exit code, or told to hang. Every invocation appends its
//! arguments to a log file so tests can assert on what was actually run.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[derive(Debug, Clone, Default)]
struct Behaviour {
    stdout: String,
    stderr: String,
    exit_code: i32,
    hang: bool,
}

/// Builder for a [`FakeTool`]
#[derive(Debug, Clone)]
pub struct FakeToolBuilder {
    name: String,
    behaviours: BTreeMap<String, Behaviour>,
}

impl FakeToolBuilder {
    fn behaviour(&mut self, subcommand: &str) -> &mut Behaviour {
        self.behaviours.entry(subcommand.to_string()).or_default()
    }

    /// Print `stdout` and exit 0 for `subcommand`
    pub fn succeed_with(mut self, subcommand: &str, stdout: &str) -> Self {
        let behaviour = self.behaviour(subcommand);
        behaviour.stdout = stdout.to_string();
        behaviour.exit_code = 0;
        self
    }

    /// Print `stderr` and exit with `code` for `subcommand`
    pub fn fail_with(mut self, subcommand: &str, code: i32, stderr: &str) -> Self {
        let behaviour = self.behaviour(subcommand);
        behaviour.stderr = stderr.to_string();
        behaviour.exit_code = code;
        self
    }

    /// Shorthand for a `version` subcommand printing `version`
    pub fn version(self, version: &str) -> Self {
        self.succeed_with("version", &format!("{version}\n"))
    }

    /// Make `subcommand` block until it is killed
    pub fn hang_on(mut self, subcommand: &str) -> Self {
        self.behaviour(subcommand).hang = true;
        self
    }

    pub fn build(self) -> Result<FakeTool> {
        let dir = TempDir::new().context("Failed to create fake tool directory")?;
        let bin_dir = dir.path().join("bin");
        fs::create_dir_all(&bin_dir)
            .with_context(|| format!("Failed to create {}", bin_dir.display()))?;

        let log = dir.path().join("invocations.log");
        let path = bin_dir.join(&self.name);
        fs::write(&path, self.script(&log))
            .with_context(|| format!("Failed to write {}", path.display()))?;

        let mut permissions = fs::metadata(&path)?.permissions();
        permissions.set_mode(0o755);
        fs::set_permissions(&path, permissions)
            .with_context(|| format!("Failed to make {} executable", path.display()))?;

        Ok(FakeTool {
            _dir: dir,
            name: self.name,
            bin_dir,
            path,
            log,
        })
    }

    fn script(&self, log: &Path) -> String {
        let mut script = String::from("#!/bin/sh\n");
        script.push_str(&format!(
            "echo \"$*\" >> {}\n",
            quote(&log.to_string_lossy())
        ));
        script.push_str("case \"$1\" in\n");

        for (subcommand, behaviour) in &self.behaviours {
            script.push_str(&format!("  {})\n", quote(subcommand)));
            if !behaviour.stdout.is_empty() {
                script.push_str(&format!("    printf '%s' {}\n", quote(&behaviour.stdout)));
            }
            if !behaviour.stderr.is_empty() {
                script.push_str(&format!(
                    "    printf '%s' {} >&2\n",
                    quote(&behaviour.stderr)
                ));
            }
            if behaviour.hang {
                // exec so that killing the script kills the sleep too
                script.push_str("    exec sleep 30\n");
            }
            script.push_str(&format!("    exit {}\n    ;;\n", behaviour.exit_code));
        }

        script.push_str("esac\nexit 0\n");
        script
    }
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// An executable fake on disk, removed when dropped
#[derive(Debug)]
pub struct FakeTool {
    _dir: TempDir,
    name: String,
    bin_dir: PathBuf,
    path: PathBuf,
    log: PathBuf,
}

impl FakeTool {
    pub fn builder(name: &str) -> FakeToolBuilder {
        FakeToolBuilder {
            name: name.to_string(),
            behaviours: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory holding only this tool, suitable as a search path
    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Argument lines of every invocation so far, oldest first
    pub fn invocations(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .map(|contents| contents.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn calls_to(&self, subcommand: &str) -> usize {
        self.invocations()
            .iter()
            .filter(|line| line.split_whitespace().next() == Some(subcommand))
            .count()
    }
}

/// An empty directory to use as a search path where no tool exists
pub fn empty_bin_dir() -> Result<TempDir> {
    TempDir::new().context("Failed to create empty bin directory")
}
