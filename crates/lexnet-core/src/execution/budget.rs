//! Step, time and cancellation limits for a single query.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;

/// Why a traversal stopped before exploring everything it could reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Truncation {
    /// The depth ceiling cut off reachable nodes.
    DepthLimit {
        /// The ceiling that was hit.
        depth: usize,
    },
    /// The step budget ran out.
    StepBudget {
        /// Steps taken when the traversal stopped.
        steps: u64,
    },
    /// The deadline passed.
    Deadline,
    /// The caller cancelled the query.
    Cancelled,
}

/// Shared flag a caller flips to stop a running query.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Every clone observes it.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Limits checked between traversal layers.
///
/// A step is one edge examined.
#[derive(Debug, Clone, Default)]
pub struct QueryBudget {
    max_steps: Option<u64>,
    deadline: Option<Instant>,
    cancel: Option<CancellationToken>,
}

impl QueryBudget {
    /// A budget with no limits.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Caps the number of edges examined.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Sets the deadline to `timeout` from now.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Instant::now().checked_add(timeout);
        self
    }

    /// Sets an absolute deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Attaches a cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Returns why the query must stop, if it must.
    #[must_use]
    pub fn check(&self, steps: u64) -> Option<Truncation> {
        if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return Some(Truncation::Cancelled);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Some(Truncation::Deadline);
        }
        if self.max_steps.is_some_and(|max| steps > max) {
            return Some(Truncation::StepBudget { steps });
        }
        None
    }
}
