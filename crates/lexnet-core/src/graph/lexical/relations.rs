//! Interned relation names.

use arcstr::ArcStr;
use lexnet_common::RelationId;
use lexnet_common::collections::{LexMap, lex_map};

/// Name of the implicit relation between members of a synset.
pub const SYNONYM: &str = "SYNONYM";

/// Interning table for relation names.
///
/// Names are stored upper case, so lookups ignore case. Besides the id, every
/// relation has a rank: its position in the alphabetical order of all names.
/// Adjacency lists are sorted by rank so neighbors come out grouped by
/// relation name.
#[derive(Debug, Clone)]
pub struct RelationTable {
    names: Vec<ArcStr>,
    by_name: LexMap<ArcStr, RelationId>,
    ranks: Vec<u16>,
}

impl Default for RelationTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RelationTable {
    /// Creates a table holding only [`SYNONYM`].
    #[must_use]
    pub fn new() -> Self {
        let mut table = Self {
            names: Vec::new(),
            by_name: lex_map(),
            ranks: Vec::new(),
        };
        table.intern(SYNONYM);
        table
    }

    /// Returns the id for `name`, adding it if unseen.
    ///
    /// Returns `None` once the id space is exhausted.
    pub fn intern(&mut self, name: &str) -> Option<RelationId> {
        let upper = name.trim().to_uppercase();
        if let Some(&id) = self.by_name.get(upper.as_str()) {
            return Some(id);
        }
        let id = RelationId(u16::try_from(self.names.len()).ok()?);
        let name = ArcStr::from(upper);
        self.names.push(name.clone());
        self.by_name.insert(name, id);
        self.rerank();
        Some(id)
    }

    fn rerank(&mut self) {
        let mut order: Vec<usize> = (0..self.names.len()).collect();
        order.sort_by(|&a, &b| self.names[a].cmp(&self.names[b]));
        self.ranks = vec![0; self.names.len()];
        for (rank, index) in order.into_iter().enumerate() {
            // Bounded by the id space checked in `intern`.
            self.ranks[index] = rank as u16;
        }
    }

    /// Looks a name up, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<RelationId> {
        self.by_name.get(name.to_uppercase().as_str()).copied()
    }

    /// Returns the canonical (upper case) name.
    #[must_use]
    pub fn name(&self, id: RelationId) -> &ArcStr {
        &self.names[id.index()]
    }

    /// Alphabetical rank of the relation.
    #[must_use]
    pub fn rank(&self, id: RelationId) -> u16 {
        self.ranks[id.index()]
    }

    /// Number of distinct relations, [`SYNONYM`] included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: [`SYNONYM`] is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All names in alphabetical order.
    #[must_use]
    pub fn sorted_names(&self) -> Vec<ArcStr> {
        let mut names = self.names.clone();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synonym_is_reserved() {
        let table = RelationTable::new();
        assert_eq!(table.get("synonym"), Some(RelationId::SYNONYM));
        assert_eq!(table.name(RelationId::SYNONYM).as_str(), SYNONYM);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_intern_is_case_insensitive() {
        let mut table = RelationTable::new();
        let a = table.intern("has_hyperonym").unwrap();
        let b = table.intern("HAS_HYPERONYM").unwrap();
        assert_eq!(a, b);
        assert_eq!(table.name(a).as_str(), "HAS_HYPERONYM");
        assert_eq!(table.get("Has_Hyperonym"), Some(a));
        assert_eq!(table.get("HAS_MERONYM"), None);
    }

    #[test]
    fn test_ranks_follow_alphabetical_order() {
        let mut table = RelationTable::new();
        let role = table.intern("ROLE_INSTRUMENT").unwrap();
        let hyper = table.intern("HAS_HYPERONYM").unwrap();
        assert!(table.rank(hyper) < table.rank(role));
        assert!(table.rank(role) < table.rank(RelationId::SYNONYM));
        assert_eq!(
            table.sorted_names(),
            vec![
                ArcStr::from("HAS_HYPERONYM"),
                ArcStr::from("ROLE_INSTRUMENT"),
                ArcStr::from("SYNONYM"),
            ]
        );
    }
}
