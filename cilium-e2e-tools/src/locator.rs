//! Finding the external tool and confirming it runs

use cilium_e2e_core::ExecutionContext;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::error::{CiliumCliError, RunError};
use crate::runner::{CommandOutput, CommandRunner, Invocation};
use crate::search::SearchPath;

/// A tool that was found on the search path and answered `version`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocatedTool {
    pub path: PathBuf,
    /// First line of `version` output, if it was not empty
    pub version: Option<String>,
}

/// Failed run of a located tool, with whatever it wrote to stderr
pub(crate) struct RunFailure {
    pub error: RunError,
    pub stderr: String,
}

/// An external executable and the capability used to run it
#[derive(Clone)]
pub struct ExternalTool {
    name: String,
    search_path: SearchPath,
    runner: Arc<dyn CommandRunner>,
}

impl ExternalTool {
    pub fn new(name: impl Into<String>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            name: name.into(),
            search_path: SearchPath::System,
            runner,
        }
    }

    pub fn with_search_path(mut self, search_path: SearchPath) -> Self {
        self.search_path = search_path;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn search_path(&self) -> &SearchPath {
        &self.search_path
    }

    /// Confirm the tool is present and responsive
    ///
    /// Resolves the name on the search path, then runs `<tool> version`. The
    /// first output line is logged once at INFO. Nothing is installed when the
    /// tool is missing, and nothing is logged on failure.
    pub fn locate(&self, ctx: &ExecutionContext) -> Result<LocatedTool, CiliumCliError> {
        let path = self
            .search_path
            .resolve(&self.name)
            .map_err(|source| CiliumCliError::NotFound {
                tool: self.name.clone(),
                source,
            })?;

        let output = self
            .run(ctx, &Invocation::new(&path).arg("version"))
            .map_err(|failure| CiliumCliError::VersionCheckFailed {
                tool: self.name.clone(),
                source: failure.error,
            })?;

        let version = first_line(&output);
        if let Some(version) = &version {
            info!(version = %version, "Found {} CLI version", self.name);
        }

        // TODO: reject versions older than the minimum cilium-cli the suites support

        Ok(LocatedTool { path, version })
    }

    /// Run an invocation and require a zero exit
    pub(crate) fn run(
        &self,
        ctx: &ExecutionContext,
        invocation: &Invocation,
    ) -> Result<CommandOutput, RunFailure> {
        match self.runner.run(ctx, invocation) {
            Ok(output) if output.success() => Ok(output),
            Ok(output) => Err(RunFailure {
                error: RunError::NonZeroExit {
                    program: invocation.program_name(),
                    code: output.code,
                },
                stderr: output.stderr_lossy().trim().to_string(),
            }),
            Err(error) => Err(RunFailure {
                error,
                stderr: String::new(),
            }),
        }
    }
}

impl fmt::Debug for ExternalTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalTool")
            .field("name", &self.name)
            .field("search_path", &self.search_path)
            .finish_non_exhaustive()
    }
}

fn first_line(output: &CommandOutput) -> Option<String> {
    output
        .stdout_lossy()
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::runner::MockCommandRunner;
    use cilium_e2e_core::ContextError;
    use cilium_e2e_test::capture_logs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;
    use tracing::Level;

    fn bin_dir_with(name: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(name);
        std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        dir
    }

    fn tool_with(runner: MockCommandRunner, dir: &TempDir) -> ExternalTool {
        ExternalTool::new("cilium", Arc::new(runner))
            .with_search_path(SearchPath::dirs([dir.path()]))
    }

    #[test]
    fn test_missing_tool_runs_nothing() {
        let dir = TempDir::new().unwrap();
        let mut runner = MockCommandRunner::new();
        runner.expect_run().never();

        let err = tool_with(runner, &dir)
            .locate(&ExecutionContext::background())
            .unwrap_err();

        assert!(matches!(err, CiliumCliError::NotFound { .. }));
        assert!(err
            .to_string()
            .contains("not installed or could not be found"));
    }

    #[test]
    fn test_runs_version_on_resolved_path() {
        let dir = bin_dir_with("cilium");
        let expected = dir.path().join("cilium");
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(move |_, invocation| {
                invocation.program == expected && invocation.args == ["version"]
            })
            .times(1)
            .returning(|_, _| {
                Ok(CommandOutput::success_with(
                    "cilium-cli: v0.15.0 compiled with go1.20.4 on linux/amd64\ncilium image (default): v1.13.4\n",
                ))
            });

        let located = tool_with(runner, &dir)
            .locate(&ExecutionContext::background())
            .unwrap();

        assert_eq!(located.path, dir.path().join("cilium"));
        assert_eq!(
            located.version.as_deref(),
            Some("cilium-cli: v0.15.0 compiled with go1.20.4 on linux/amd64")
        );
    }

    #[test]
    fn test_version_failure() {
        let dir = bin_dir_with("cilium");
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .times(1)
            .returning(|_, _| Ok(CommandOutput::failure(1, "unknown command\n")));

        let (result, logs) = capture_logs(Level::INFO, || {
            tool_with(runner, &dir).locate(&ExecutionContext::background())
        });
        let err = result.unwrap_err();
        assert!(logs.lines().is_empty(), "logs: {:?}", logs.lines());

        match err {
            CiliumCliError::VersionCheckFailed { tool, source } => {
                assert_eq!(tool, "cilium");
                assert!(matches!(source, RunError::NonZeroExit { code: Some(1), .. }));
            }
            other => panic!("Expected VersionCheckFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_version_interrupted() {
        let dir = bin_dir_with("cilium");
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(1).returning(|_, invocation| {
            Err(RunError::Interrupted {
                program: invocation.program_name(),
                reason: ContextError::Cancelled,
            })
        });

        let err = tool_with(runner, &dir)
            .locate(&ExecutionContext::background())
            .unwrap_err();
        assert!(matches!(err, CiliumCliError::VersionCheckFailed { .. }));
    }

    #[test]
    fn test_empty_version_output_is_not_an_error() {
        let dir = bin_dir_with("cilium");
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .times(1)
            .returning(|_, _| Ok(CommandOutput::success_with("\nsecond line\n")));

        let (result, logs) = capture_logs(Level::INFO, || {
            tool_with(runner, &dir).locate(&ExecutionContext::background())
        });
        assert_eq!(result.unwrap().version, None);
        assert!(!logs.contains("Found cilium CLI version"));
        assert!(logs.lines().is_empty(), "logs: {:?}", logs.lines());
    }

    #[test]
    fn test_debug_omits_runner() {
        let tool = ExternalTool::new("cilium", Arc::new(MockCommandRunner::new()));
        let rendered = format!("{:?}", tool);
        assert!(rendered.contains("cilium"));
        assert!(rendered.contains("System"));
    }
}
