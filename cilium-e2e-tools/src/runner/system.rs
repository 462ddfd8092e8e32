//! Command runner backed by real child processes

use cilium_e2e_core::ExecutionContext;
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::debug;

use super::{CommandOutput, CommandRunner, Invocation};
use crate::error::RunError;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs commands as real child processes
///
/// Both output streams are drained on reader threads while the child is
/// polled, so a chatty process cannot block on a full pipe. The context is
/// checked between polls; once it is done the child is killed and reaped.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    poll_interval: Duration,
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemRunner {
    pub fn new() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    fn sleep_interval(&self, ctx: &ExecutionContext) -> Duration {
        match ctx.remaining() {
            Some(remaining) if remaining < self.poll_interval => remaining,
            _ => self.poll_interval,
        }
    }
}

fn drain<R>(mut reader: R) -> JoinHandle<Vec<u8>>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        buf
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

fn finished(handle: &Option<JoinHandle<Vec<u8>>>) -> bool {
    handle.as_ref().map_or(true, JoinHandle::is_finished)
}

fn stop(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        ctx: &ExecutionContext,
        invocation: &Invocation,
    ) -> Result<CommandOutput, RunError> {
        let program = invocation.program_name();
        if let Some(reason) = ctx.err() {
            return Err(RunError::Interrupted { program, reason });
        }

        debug!("Executing command: {}", invocation);
        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RunError::Spawn {
                program: program.clone(),
                source,
            })?;

        let stdout_handle = child.stdout.take().map(drain);
        let stderr_handle = child.stderr.take().map(drain);

        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if let Some(reason) = ctx.err() {
                        debug!("Stopping {} (pid {}): {}", program, child.id(), reason);
                        stop(&mut child);
                        // Reader threads are left to finish on their own: a
                        // grandchild may still hold the pipes open.
                        return Err(RunError::Interrupted { program, reason });
                    }
                    thread::sleep(self.sleep_interval(ctx));
                }
                Err(source) => {
                    stop(&mut child);
                    return Err(RunError::Io { program, source });
                }
            }
        };

        // A grandchild that inherited the pipes keeps the readers blocked
        // after the child itself has exited.
        while !finished(&stdout_handle) || !finished(&stderr_handle) {
            if let Some(reason) = ctx.err() {
                debug!("Abandoning output of {}: {}", program, reason);
                return Err(RunError::Interrupted { program, reason });
            }
            thread::sleep(self.sleep_interval(ctx));
        }

        Ok(CommandOutput {
            code: status.code(),
            stdout: collect(stdout_handle),
            stderr: collect(stderr_handle),
        })
    }
}
