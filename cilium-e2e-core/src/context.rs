//! Execution context threaded through setup and teardown stages
//!
//! An [`ExecutionContext`] is an immutable carrier of values, an optional
//! deadline and a cancellation signal. Attaching anything returns a new
//! context; the context it was derived from is left untouched, so a stage can
//! never change what an earlier stage handed to someone else.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Reason a context is no longer live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("context cancelled")]
    Cancelled,

    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

type Value = Arc<dyn Any + Send + Sync>;

#[derive(Default)]
struct Inner {
    values: HashMap<String, Value>,
    deadline: Option<Instant>,
    cancel_flags: Vec<Arc<AtomicBool>>,
}

/// Caller-owned carrier of cross-stage values
#[derive(Clone, Default)]
pub struct ExecutionContext {
    inner: Arc<Inner>,
}

/// Cancels the context it was created with and every context derived from it
#[derive(Debug, Clone)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

impl ExecutionContext {
    /// An empty context with no deadline that is never cancelled
    pub fn background() -> Self {
        Self::default()
    }

    fn derive(&self, update: impl FnOnce(&mut Inner)) -> Self {
        let mut inner = Inner {
            values: self.inner.values.clone(),
            deadline: self.inner.deadline,
            cancel_flags: self.inner.cancel_flags.clone(),
        };
        update(&mut inner);
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Return a copy of this context with `value` attached under `key`
    pub fn with_value<T>(&self, key: impl Into<String>, value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        let key = key.into();
        self.derive(|inner| {
            inner.values.insert(key, Arc::new(value));
        })
    }

    /// Look up a value attached under `key`, if it has type `T`
    pub fn value<T>(&self, key: &str) -> Option<&T>
    where
        T: Any + Send + Sync,
    {
        self.inner
            .values
            .get(key)
            .and_then(|value| value.downcast_ref::<T>())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.values.contains_key(key)
    }

    /// Return a copy of this context that expires at `deadline`
    ///
    /// An earlier deadline inherited from the parent is kept.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        self.derive(|inner| {
            inner.deadline = Some(match inner.deadline {
                Some(existing) if existing < deadline => existing,
                _ => deadline,
            });
        })
    }

    /// A timeout too large to represent as an instant leaves the deadline unchanged
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self.derive(|_| {}),
        }
    }

    /// Return a cancellable copy of this context and the handle that cancels it
    pub fn with_cancel(&self) -> (Self, CancelHandle) {
        let flag = Arc::new(AtomicBool::new(false));
        let handle = CancelHandle { flag: flag.clone() };
        let ctx = self.derive(|inner| inner.cancel_flags.push(flag));
        (ctx, handle)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }

    /// Time left before the deadline; `None` when there is no deadline
    pub fn remaining(&self) -> Option<Duration> {
        self.inner
            .deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Why the context is done, or `None` while it is still live
    pub fn err(&self) -> Option<ContextError> {
        if self
            .inner
            .cancel_flags
            .iter()
            .any(|flag| flag.load(Ordering::SeqCst))
        {
            return Some(ContextError::Cancelled);
        }
        match self.inner.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(ContextError::DeadlineExceeded),
            _ => None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.err().is_some()
    }

    /// Whether both handles refer to the very same context
    pub fn same(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.inner.values.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("ExecutionContext")
            .field("keys", &keys)
            .field("deadline", &self.inner.deadline)
            .field("err", &self.err())
            .finish()
    }
}
