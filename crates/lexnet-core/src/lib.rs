//! # lexnet-core
//!
//! The in-memory lexical graph and the traversals that run over it.
//!
//! - [`graph`] - [`LexicalGraph`](graph::LexicalGraph), built once by
//!   [`GraphBuilder`](graph::GraphBuilder) and immutable afterwards
//! - [`execution`] - bounded breadth-first traversal, bidirectional path
//!   search and the per-query [`QueryBudget`](execution::QueryBudget)

pub mod execution;
pub mod graph;

pub use execution::{CancellationToken, QueryBudget, Truncation};
pub use graph::{Direction, GraphBuilder, LexicalGraph, LoadReport};
