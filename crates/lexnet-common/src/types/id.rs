//! Identifier types for lexical units, synsets and relation names.
//!
//! Ids are dense ordinals assigned in load order, so they double as
//! indexes into the store's vectors and give a deterministic tie-break.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a lexical unit (one sense of one lemma).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[repr(transparent)]
pub struct UnitId(pub u32);

impl UnitId {
    /// The invalid/null unit id.
    pub const INVALID: Self = Self(u32::MAX);

    /// Creates a new UnitId from a raw u32 value.
    #[inline]
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the id as a vector index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Checks if this is a valid unit id.
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "UnitId({})", self.0)
        } else {
            write!(f, "UnitId(INVALID)")
        }
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for UnitId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Identifier of a synset.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[repr(transparent)]
pub struct SynsetId(pub u32);

impl SynsetId {
    /// The invalid/null synset id.
    pub const INVALID: Self = Self(u32::MAX);

    /// Creates a new SynsetId from a raw u32 value.
    #[inline]
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the id as a vector index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Checks if this is a valid synset id.
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl fmt::Debug for SynsetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "SynsetId({})", self.0)
        } else {
            write!(f, "SynsetId(INVALID)")
        }
    }
}

impl fmt::Display for SynsetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SynsetId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Interned relation name.
///
/// `RelationId(0)` is always `SYNONYM`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[repr(transparent)]
pub struct RelationId(pub u16);

impl RelationId {
    /// The implicit relation between members of one synset.
    pub const SYNONYM: Self = Self(0);

    /// Returns the id as a vector index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for RelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RelationId({})", self.0)
    }
}

/// Either kind of node in the lexical graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeRef {
    /// A lexical unit.
    Unit(UnitId),
    /// A synset.
    Synset(SynsetId),
}

impl From<UnitId> for NodeRef {
    fn from(id: UnitId) -> Self {
        Self::Unit(id)
    }
}

impl From<SynsetId> for NodeRef {
    fn from(id: SynsetId) -> Self {
        Self::Synset(id)
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit(id) => write!(f, "unit:{id}"),
            Self::Synset(id) => write!(f, "synset:{id}"),
        }
    }
}
