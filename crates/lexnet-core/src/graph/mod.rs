//! The lexical graph: lexical units, synsets and typed relations.

pub mod lexical;

pub use lexical::{
    CountOverlay, CountTable, CountTotals, DuplicateUnit, GraphBuilder, LexicalGraph, LexicalUnit, LoadReport,
    RelationEdge, RelationTable, Synset, SynsetDraft, UnitDraft,
};

/// Which way to follow an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// From source to target.
    Outgoing,
    /// From target back to source.
    Incoming,
}

impl Direction {
    /// The opposite direction.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Outgoing => Self::Incoming,
            Self::Incoming => Self::Outgoing,
        }
    }
}
