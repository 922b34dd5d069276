//! Inspection types returned by [`LexNet`](crate::LexNet).

use lexnet_common::Category;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkState {
    /// Nothing loaded.
    Empty,
    /// A load is in progress.
    Loading,
    /// Loaded and answering queries.
    Ready,
}

impl std::fmt::Display for NetworkState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkState::Empty => write!(f, "empty"),
            NetworkState::Loading => write!(f, "loading"),
            NetworkState::Ready => write!(f, "ready"),
        }
    }
}

/// High-level network information returned by `net.info()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkInfo {
    /// Lifecycle state.
    pub state: NetworkState,
    /// Number of lexical units.
    pub unit_count: usize,
    /// Number of synsets, implicit ones included.
    pub synset_count: usize,
    /// Number of stored synset-to-synset edges.
    pub edge_count: usize,
    /// Relation names, sorted.
    pub relations: Vec<String>,
    /// Whether word counts are loaded.
    pub has_counts: bool,
    /// Current depth ceiling.
    pub max_depth: usize,
    /// Library version.
    pub version: String,
}

/// A lexical unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitInfo {
    /// Source id.
    pub id: String,
    /// `lemma:category:sense`.
    pub spec: String,
    /// Written form.
    pub lemma: String,
    /// Part of speech.
    pub category: Category,
    /// Sense number.
    pub sense: u32,
    /// Source id of the owning synset.
    pub synset: String,
    /// Word count, if counts are loaded.
    pub count: Option<u64>,
}

/// A synset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynsetInfo {
    /// Source id; implicit synsets are named after their only member.
    pub id: String,
    /// Alternative id.
    pub alias: Option<String>,
    /// Whether the synset was created for a unit no synset listed.
    pub implicit: bool,
    /// Member unit specs.
    pub members: Vec<String>,
}

/// A common subsumer of two lexical units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsumerInfo {
    /// The subsuming synset.
    pub synset: SynsetInfo,
    /// Hops from the first unit's synset plus hops from the second's.
    pub distance: usize,
    /// Information content, when counts are loaded and it is defined.
    pub information_content: Option<f64>,
}
