//! Process execution as an injected capability

mod system;

pub use system::SystemRunner;

use cilium_e2e_core::ExecutionContext;
use std::fmt;
use std::path::PathBuf;

use crate::error::RunError;

/// One external command: a program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// First argument, e.g. `install` in `cilium install --set a=b`
    pub fn subcommand(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    pub fn program_name(&self) -> String {
        self.program.display().to_string()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured result of a process that ran to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was ended by a signal
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn success_with(stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: Vec::new(),
        }
    }

    pub fn failure(code: i32, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            code: Some(code),
            stdout: Vec::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

impl Default for CommandOutput {
    fn default() -> Self {
        Self::success_with(Vec::new())
    }
}

/// Runs external commands on behalf of the locator and lifecycle driver
///
/// `Ok` means the process ran to completion, whatever its exit code.
/// Implementations must not start a process once `ctx` is done, and must not
/// leave one running after `ctx` ends.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(
        &self,
        ctx: &ExecutionContext,
        invocation: &Invocation,
    ) -> Result<CommandOutput, RunError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_invocation_builder() {
        let invocation = Invocation::new("/usr/local/bin/cilium")
            .arg("install")
            .args(["--set", "ipam.mode=kubernetes"]);

        assert_eq!(invocation.subcommand(), Some("install"));
        assert_eq!(
            invocation.args,
            vec!["install", "--set", "ipam.mode=kubernetes"]
        );
        assert_eq!(
            invocation.to_string(),
            "/usr/local/bin/cilium install --set ipam.mode=kubernetes"
        );
    }

    #[test]
    fn test_invocation_without_args() {
        let invocation = Invocation::new("cilium");
        assert_eq!(invocation.subcommand(), None);
        assert_eq!(invocation.to_string(), "cilium");
    }

    #[test]
    fn test_output_status() {
        assert!(CommandOutput::default().success());
        assert!(CommandOutput::success_with("ok\n").success());

        let failed = CommandOutput::failure(1, "Error: boom\n");
        assert!(!failed.success());
        assert_eq!(failed.stderr_lossy(), "Error: boom\n");

        let signalled = CommandOutput {
            code: None,
            stdout: Vec::new(),
            stderr: Vec::new(),
        };
        assert!(!signalled.success());
    }
}
