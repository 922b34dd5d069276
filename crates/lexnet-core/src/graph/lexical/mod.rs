//! Lexical units, synsets and the immutable store built from them.

mod builder;
mod counts;
mod record;
mod relations;
mod store;

pub use builder::{DuplicateUnit, GraphBuilder, LoadReport, SynsetDraft, UnitDraft};
pub use counts::{CountOverlay, CountTable, CountTotals};
pub use record::{LexicalUnit, Synset};
pub use relations::RelationTable;
pub use store::{LexicalGraph, RelationEdge};

#[cfg(test)]
pub(crate) use builder::tests::{small_graph, synset as synset_draft, unit as unit_draft};
