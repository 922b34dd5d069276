//! Query execution.
//!
//! [`LexNet::ask`](crate::LexNet::ask) parses a query with
//! [`lexnet_adapters::parse_query`] and hands it to the executor, which
//! resolves lemmas and relation names against the loaded graph and runs the
//! traversal under the depth ceiling and the query's budget.

mod executor;
mod result;

use std::time::Duration;

use lexnet_core::{CancellationToken, QueryBudget};

pub(crate) use executor::{QueryExecutor, resolve_selector};
pub use result::{Answer, LookupResult, PathResult, RelationResult, RelationShape, RelationTree};

use crate::config::Config;

/// Per-query overrides of the configured limits.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Depth ceiling for this query.
    pub max_depth: Option<usize>,
    /// Step budget for this query.
    pub max_steps: Option<u64>,
    /// Wall-clock budget for this query.
    pub timeout: Option<Duration>,
    /// Flag the caller may set to stop the query.
    pub cancel: Option<CancellationToken>,
}

impl QueryOptions {
    /// Options that keep every configured default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the depth ceiling.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Sets the step budget.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Attaches a cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The budget for one query, falling back to `config` for unset limits.
    pub(crate) fn budget(&self, config: &Config) -> QueryBudget {
        let mut budget = QueryBudget::unlimited();
        if let Some(steps) = self.max_steps.or(config.max_steps) {
            budget = budget.with_max_steps(steps);
        }
        if let Some(timeout) = self.timeout.or(config.query_timeout) {
            budget = budget.with_timeout(timeout);
        }
        if let Some(token) = &self.cancel {
            budget = budget.with_cancellation(token.clone());
        }
        budget
    }
}
