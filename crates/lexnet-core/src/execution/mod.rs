//! Bounded traversals over the lexical graph.
//!
//! Every traversal here takes a hard depth ceiling; there is no unbounded
//! mode. Long-running searches also consult a [`QueryBudget`] between BFS
//! layers and stop with a [`Truncation`] instead of an error.

mod budget;
mod shortest_path;
mod traversal;

pub use budget::{CancellationToken, QueryBudget, Truncation};
pub use shortest_path::{PathSearch, PathStep, bidirectional_path};
pub use traversal::{Discovery, Layer, LayeredBfs};
