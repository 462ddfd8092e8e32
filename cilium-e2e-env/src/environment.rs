//! Ordered setup, body and finish stages around one test

use cilium_e2e_core::ExecutionContext;
use tracing::debug;

use crate::config::EnvConfig;
use crate::error::{EnvError, Phase};
use crate::funcs::{EnvFunc, StageOutcome};

/// A test environment: setup stages, then the test body, then finish stages
///
/// The context is threaded through every stage in registration order. The
/// first failing setup stage stops everything, so neither the body nor the
/// finish stages run. Finish stages run whenever setup succeeded, even if the
/// body failed; a body failure is reported in preference to a finish failure.
pub struct Environment {
    config: EnvConfig,
    ctx: ExecutionContext,
    setup: Vec<(String, EnvFunc)>,
    finish: Vec<(String, EnvFunc)>,
}

impl Environment {
    pub fn new(config: EnvConfig) -> Self {
        Self {
            config,
            ctx: ExecutionContext::background(),
            setup: Vec::new(),
            finish: Vec::new(),
        }
    }

    /// Start from `ctx` instead of the background context
    pub fn with_context(mut self, ctx: ExecutionContext) -> Self {
        self.ctx = ctx;
        self
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn setup(mut self, name: impl Into<String>, stage: EnvFunc) -> Self {
        self.setup.push((name.into(), stage));
        self
    }

    pub fn finish(mut self, name: impl Into<String>, stage: EnvFunc) -> Self {
        self.finish.push((name.into(), stage));
        self
    }

    /// Run every stage around `body` and return the final context
    pub fn run<F>(&self, body: F) -> (ExecutionContext, Result<(), EnvError>)
    where
        F: FnOnce(ExecutionContext, &EnvConfig) -> StageOutcome,
    {
        let (ctx, setup) = self.run_phase(Phase::Setup, &self.setup, self.ctx.clone());
        if let Err(err) = setup {
            return (ctx, Err(err));
        }

        debug!("Running test body");
        let (ctx, body) = body(ctx, &self.config);
        let body = body.map_err(EnvError::Body);

        let (ctx, finish) = self.run_phase(Phase::Finish, &self.finish, ctx);
        (ctx, body.and(finish))
    }

    fn run_phase(
        &self,
        phase: Phase,
        stages: &[(String, EnvFunc)],
        mut ctx: ExecutionContext,
    ) -> (ExecutionContext, Result<(), EnvError>) {
        for (name, stage) in stages {
            debug!("Running {} stage '{}'", phase, name);
            let (next, result) = stage(ctx, &self.config);
            ctx = next;
            if let Err(source) = result {
                return (
                    ctx,
                    Err(EnvError::Stage {
                        phase,
                        name: name.clone(),
                        source,
                    }),
                );
            }
        }
        (ctx, Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    type Journal = Arc<Mutex<Vec<String>>>;

    fn record(journal: &Journal, entry: &str) {
        journal.lock().unwrap().push(entry.to_string());
    }

    fn stage(journal: &Journal, name: &str, fail: bool) -> EnvFunc {
        let journal = journal.clone();
        let name = name.to_string();
        Arc::new(move |ctx: ExecutionContext, _env: &EnvConfig| {
            record(&journal, &name);
            let result: Result<(), BoxError> = if fail {
                Err(format!("{name} exploded").into())
            } else {
                Ok(())
            };
            (ctx.with_value(name.clone(), true), result)
        })
    }

    #[test]
    fn test_stages_run_in_order_around_body() {
        let journal = Journal::default();
        let env = Environment::new(EnvConfig::new())
            .setup("first", stage(&journal, "first", false))
            .setup("second", stage(&journal, "second", false))
            .finish("teardown", stage(&journal, "teardown", false));

        let body_journal = journal.clone();
        let (ctx, result) = env.run(|ctx, _env| {
            assert!(ctx.contains_key("first"));
            assert!(ctx.contains_key("second"));
            record(&body_journal, "body");
            (ctx, Ok(()))
        });

        result.unwrap();
        assert!(ctx.contains_key("teardown"));
        assert_eq!(
            *journal.lock().unwrap(),
            vec!["first", "second", "body", "teardown"]
        );
    }

    #[test]
    fn test_setup_failure_skips_body_and_finish() {
        let journal = Journal::default();
        let env = Environment::new(EnvConfig::new())
            .setup("install-cilium", stage(&journal, "install-cilium", true))
            .setup("never", stage(&journal, "never", false))
            .finish("teardown", stage(&journal, "teardown", false));

        let (_, result) = env.run(|ctx, _env| panic!("body must not run: {ctx:?}"));

        let err = result.unwrap_err();
        assert_eq!(err.phase(), Some(Phase::Setup));
        assert_eq!(err.stage_name(), Some("install-cilium"));
        assert_eq!(*journal.lock().unwrap(), vec!["install-cilium"]);
    }

    #[test]
    fn test_finish_runs_after_body_failure() {
        let journal = Journal::default();
        let env = Environment::new(EnvConfig::new())
            .finish("teardown", stage(&journal, "teardown", true));

        let (_, result) = env.run(|ctx, _env| (ctx, Err("assertion failed".into())));

        let err = result.unwrap_err();
        assert!(matches!(err, EnvError::Body(_)));
        assert_eq!(*journal.lock().unwrap(), vec!["teardown"]);
    }

    #[test]
    fn test_finish_failure_reported_when_body_passes() {
        let journal = Journal::default();
        let env = Environment::new(EnvConfig::new())
            .finish("uninstall-cilium", stage(&journal, "uninstall-cilium", true))
            .finish("never", stage(&journal, "never", false));

        let (_, result) = env.run(|ctx, _env| (ctx, Ok(())));

        let err = result.unwrap_err();
        assert_eq!(err.phase(), Some(Phase::Finish));
        assert_eq!(err.stage_name(), Some("uninstall-cilium"));
        assert_eq!(*journal.lock().unwrap(), vec!["uninstall-cilium"]);
    }

    #[test]
    fn test_starting_context_is_threaded() {
        let ctx = ExecutionContext::background().with_value("cluster", "kind-e2e");
        let env = Environment::new(EnvConfig::new().with_namespace("e2e")).with_context(ctx);

        let (_, result) = env.run(|ctx, env| {
            assert_eq!(ctx.value::<&'static str>("cluster"), Some(&"kind-e2e"));
            assert_eq!(env.namespace, "e2e");
            (ctx, Ok(()))
        });

        result.unwrap();
        assert_eq!(env.config().namespace, "e2e");
    }
}
