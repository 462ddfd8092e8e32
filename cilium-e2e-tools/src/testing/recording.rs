//! Scripted command runner that records every invocation

use cilium_e2e_core::ExecutionContext;
use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

use crate::error::RunError;
use crate::runner::{CommandOutput, CommandRunner, Invocation};

#[derive(Debug, Clone)]
enum Scripted {
    Output(CommandOutput),
    SpawnError(String),
}

/// Runner that records invocations and answers from a script
///
/// Responses are keyed by subcommand (the first argument). Anything not
/// scripted exits 0 with no output. A done context is refused without being
/// recorded, the same way the system runner spawns nothing.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    responses: HashMap<String, Scripted>,
    calls: Mutex<Vec<Invocation>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, subcommand: &str, output: CommandOutput) -> Self {
        self.responses
            .insert(subcommand.to_string(), Scripted::Output(output));
        self
    }

    pub fn succeed_with(self, subcommand: &str, stdout: &str) -> Self {
        self.respond(subcommand, CommandOutput::success_with(stdout))
    }

    pub fn fail_with(self, subcommand: &str, code: i32, stderr: &str) -> Self {
        self.respond(subcommand, CommandOutput::failure(code, stderr))
    }

    pub fn fail_to_spawn(mut self, subcommand: &str, message: &str) -> Self {
        self.responses
            .insert(subcommand.to_string(), Scripted::SpawnError(message.to_string()));
        self
    }

    /// Every invocation seen so far, oldest first
    pub fn invocations(&self) -> Vec<Invocation> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub fn calls_to(&self, subcommand: &str) -> usize {
        self.invocations()
            .iter()
            .filter(|invocation| invocation.subcommand() == Some(subcommand))
            .count()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(
        &self,
        ctx: &ExecutionContext,
        invocation: &Invocation,
    ) -> Result<CommandOutput, RunError> {
        if let Some(reason) = ctx.err() {
            return Err(RunError::Interrupted {
                program: invocation.program_name(),
                reason,
            });
        }

        if let Ok(mut calls) = self.calls.lock() {
            calls.push(invocation.clone());
        }

        let scripted = invocation
            .subcommand()
            .and_then(|subcommand| self.responses.get(subcommand));
        match scripted {
            Some(Scripted::Output(output)) => Ok(output.clone()),
            Some(Scripted::SpawnError(message)) => Err(RunError::Spawn {
                program: invocation.program_name(),
                source: io::Error::new(io::ErrorKind::Other, message.clone()),
            }),
            None => Ok(CommandOutput::default()),
        }
    }
}
