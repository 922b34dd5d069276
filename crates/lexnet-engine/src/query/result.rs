//! Query results.

use indexmap::map::Entry;
use lexnet_common::collections::{LexIndexMap, lex_index_map};
use lexnet_core::Truncation;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// The answer to a query, one variant per query form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Answer {
    /// Senses of a lemma.
    Lookup(LookupResult),
    /// Units related to a lemma.
    Relation(RelationResult),
    /// A path between two lemmas.
    Path(PathResult),
}

impl Answer {
    /// The lookup result, if this is one.
    #[must_use]
    pub fn as_lookup(&self) -> Option<&LookupResult> {
        match self {
            Self::Lookup(result) => Some(result),
            _ => None,
        }
    }

    /// The relation result, if this is one.
    #[must_use]
    pub fn as_relation(&self) -> Option<&RelationResult> {
        match self {
            Self::Relation(result) => Some(result),
            _ => None,
        }
    }

    /// The path result, if this is one.
    #[must_use]
    pub fn as_path(&self) -> Option<&PathResult> {
        match self {
            Self::Path(result) => Some(result),
            _ => None,
        }
    }

    /// Why the query stopped early, if it did.
    #[must_use]
    pub fn truncation(&self) -> Option<Truncation> {
        match self {
            Self::Lookup(_) => None,
            Self::Relation(result) => result.truncation,
            Self::Path(result) => result.truncation,
        }
    }
}

/// Unit specs (`lemma:category:sense`) in lookup order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LookupResult {
    /// Matching units.
    pub units: Vec<String>,
}

/// How a relation query was evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationShape {
    /// One hop along a named relation.
    SingleHop,
    /// The transitive closure of a named relation.
    Closure,
    /// Every relation at once.
    Unrestricted,
}

/// Breadth-first discovery tree: relation name, then unit spec, then what
/// was discovered from that unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RelationTree(LexIndexMap<String, LexIndexMap<String, RelationTree>>);

impl RelationTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self(lex_index_map())
    }

    /// Whether nothing was discovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Relation names at the top level.
    pub fn relations(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Units reached from the root along `relation`, with their subtrees.
    #[must_use]
    pub fn get(&self, relation: &str) -> Option<&LexIndexMap<String, RelationTree>> {
        self.0.get(relation)
    }

    /// Inserts `unit` under `relation`, returning its subtree. An existing
    /// entry is kept.
    pub fn entry(&mut self, relation: &str, unit: String) -> &mut RelationTree {
        self.0
            .entry(relation.to_string())
            .or_insert_with(lex_index_map)
            .entry(unit)
            .or_default()
    }

    /// Adds everything in `other` that this tree lacks.
    pub fn merge(&mut self, other: RelationTree) {
        for (relation, units) in other.0 {
            let mine = self.0.entry(relation).or_insert_with(lex_index_map);
            for (unit, subtree) in units {
                match mine.entry(unit) {
                    Entry::Occupied(mut entry) => entry.get_mut().merge(subtree),
                    Entry::Vacant(entry) => {
                        entry.insert(subtree);
                    }
                }
            }
        }
    }

    /// Relation name to units, in breadth-first order over the tree, each
    /// unit listed once per relation.
    #[must_use]
    pub fn flatten(&self) -> LexIndexMap<String, Vec<String>> {
        let mut flat: LexIndexMap<String, Vec<String>> = lex_index_map();
        let mut queue = std::collections::VecDeque::from([self]);
        while let Some(tree) = queue.pop_front() {
            for (relation, units) in &tree.0 {
                let list = flat.entry(relation.clone()).or_default();
                for (unit, subtree) in units {
                    if !list.contains(unit) {
                        list.push(unit.clone());
                    }
                    queue.push_back(subtree);
                }
            }
        }
        flat
    }

    /// Number of (relation, unit) entries at every level.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0
            .values()
            .flat_map(|units| units.values())
            .map(|subtree| 1 + subtree.len())
            .sum()
    }
}

/// Result of a relation query.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationResult {
    /// How the query was evaluated.
    pub shape: RelationShape,
    /// The depth the traversal was allowed to reach.
    pub depth: usize,
    /// What was found.
    pub tree: RelationTree,
    /// Why the traversal stopped early, if it did.
    pub truncation: Option<Truncation>,
}

impl RelationResult {
    /// Relation name to units in discovery order.
    #[must_use]
    pub fn flatten(&self) -> LexIndexMap<String, Vec<String>> {
        self.tree.flatten()
    }

    /// Units found along `relation`, in discovery order.
    #[must_use]
    pub fn units(&self, relation: &str) -> Vec<String> {
        self.flatten()
            .swap_remove(&relation.to_ascii_uppercase())
            .unwrap_or_default()
    }

    /// Whether nothing was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

impl Serialize for RelationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RelationResult", 4)?;
        state.serialize_field("shape", &self.shape)?;
        state.serialize_field("depth", &self.depth)?;
        match self.shape {
            RelationShape::SingleHop => state.serialize_field("relations", &self.flatten())?,
            RelationShape::Closure | RelationShape::Unrestricted => {
                state.serialize_field("relations", &self.tree)?;
            }
        }
        state.serialize_field("truncation", &self.truncation)?;
        state.end()
    }
}

/// Result of a path query: `unit, RELATION, unit, ..., unit`, empty when
/// no path was found within the depth ceiling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathResult {
    /// Unit specs alternating with relation names.
    pub path: Vec<String>,
    /// Why the search stopped early, if it did.
    pub truncation: Option<Truncation>,
}

impl PathResult {
    /// Whether a path was found.
    #[must_use]
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of relation hops.
    #[must_use]
    pub fn hops(&self) -> usize {
        self.path.len() / 2
    }
}
