//! The immutable lexical graph.
//!
//! Only synset-to-synset relations are stored. Relations between lexical
//! units are derived on the fly: a unit is related to every unit of every
//! synset its own synset is related to, and to the other members of its
//! synset through `SYNONYM`.
//!
//! Neighbor lists come out sorted by relation name, then by id, so every
//! traversal over the graph is deterministic.

use arcstr::ArcStr;
use lexnet_common::collections::LexMap;
use lexnet_common::{Category, CountCategory, NodeRef, RelationId, SynsetId, UnitId};
use smallvec::SmallVec;

use super::counts::{CountOverlay, CountTable, CountTotals};
use super::record::{LexicalUnit, Synset};
use super::relations::RelationTable;
use crate::execution::LayeredBfs;
use crate::graph::Direction;

pub(super) type EdgeList = SmallVec<[(RelationId, SynsetId); 4]>;

/// A typed edge between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelationEdge {
    /// Where the edge starts.
    pub source: NodeRef,
    /// Where the edge ends.
    pub target: NodeRef,
    /// Relation type.
    pub relation: RelationId,
}

/// Lexical units, synsets and the relations between them.
///
/// Built by [`GraphBuilder`](super::GraphBuilder); read-only afterwards
/// except for the count overlay applied while loading.
#[derive(Debug, Clone)]
pub struct LexicalGraph {
    pub(super) units: Vec<LexicalUnit>,
    pub(super) synsets: Vec<Synset>,
    pub(super) relations: RelationTable,
    pub(super) outgoing: Vec<EdgeList>,
    pub(super) incoming: Vec<EdgeList>,
    pub(super) lemmas: LexMap<ArcStr, Vec<UnitId>>,
    pub(super) unit_ids: LexMap<ArcStr, UnitId>,
    pub(super) synset_ids: LexMap<ArcStr, SynsetId>,
    pub(super) edge_count: usize,
    pub(super) has_counts: bool,
    pub(super) table_totals: Option<CountTotals>,
}

impl LexicalGraph {
    /// Number of lexical units.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Number of synsets, implicit singletons included.
    #[must_use]
    pub fn synset_count(&self) -> usize {
        self.synsets.len()
    }

    /// Number of stored synset-to-synset edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Whether any lexical unit carries a count.
    #[must_use]
    pub fn has_counts(&self) -> bool {
        self.has_counts
    }

    /// Corpus size per count bucket: the totals of the last applied
    /// [`CountTable`], or the unit counts summed per bucket when counts
    /// came with the units themselves.
    #[must_use]
    pub fn count_totals(&self) -> CountTotals {
        if let Some(totals) = self.table_totals {
            return totals;
        }
        let mut totals = CountTotals::default();
        for unit in &self.units {
            totals.add(CountCategory::from(unit.category), unit.count.unwrap_or(0));
        }
        totals
    }

    /// The relation name table.
    #[must_use]
    pub fn relations(&self) -> &RelationTable {
        &self.relations
    }

    /// Resolves a relation name, ignoring case.
    #[must_use]
    pub fn relation_id(&self, name: &str) -> Option<RelationId> {
        self.relations.get(name)
    }

    /// Canonical name of a relation.
    #[must_use]
    pub fn relation_name(&self, id: RelationId) -> &str {
        self.relations.name(id).as_str()
    }

    /// All lexical units, indexed by [`UnitId`].
    #[must_use]
    pub fn units(&self) -> &[LexicalUnit] {
        &self.units
    }

    /// All synsets, indexed by [`SynsetId`].
    #[must_use]
    pub fn synsets(&self) -> &[Synset] {
        &self.synsets
    }

    /// Gets a lexical unit.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&LexicalUnit> {
        self.units.get(id.index())
    }

    /// Gets a synset.
    #[must_use]
    pub fn synset(&self, id: SynsetId) -> Option<&Synset> {
        self.synsets.get(id.index())
    }

    /// `lemma:category:sense` of a unit, empty for unknown ids.
    #[must_use]
    pub fn unit_spec(&self, id: UnitId) -> String {
        self.unit(id).map(LexicalUnit::spec).unwrap_or_default()
    }

    /// Finds a unit by its source id.
    #[must_use]
    pub fn unit_by_external_id(&self, external_id: &str) -> Option<UnitId> {
        self.unit_ids.get(external_id).copied()
    }

    /// Finds a synset by its source id or alias.
    #[must_use]
    pub fn synset_by_external_id(&self, external_id: &str) -> Option<SynsetId> {
        self.synset_ids.get(external_id).copied()
    }

    /// All senses of a lemma, optionally restricted to one category.
    ///
    /// Ordered by synset id, then sense number. Matching is exact and case
    /// sensitive; an unknown lemma gives an empty list.
    #[must_use]
    pub fn lookup_lemma(&self, lemma: &str, category: Option<Category>) -> Vec<UnitId> {
        let Some(ids) = self.lemmas.get(lemma) else {
            return Vec::new();
        };
        ids.iter()
            .copied()
            .filter(|&id| category.is_none_or(|c| self.units[id.index()].category == c))
            .collect()
    }

    /// Stored edges of a synset in one direction.
    ///
    /// For [`Direction::Incoming`] the synset in each pair is the source of
    /// the edge.
    #[must_use]
    pub fn synset_edges(&self, synset: SynsetId, direction: Direction) -> &[(RelationId, SynsetId)] {
        let lists = match direction {
            Direction::Outgoing => &self.outgoing,
            Direction::Incoming => &self.incoming,
        };
        lists.get(synset.index()).map_or(&[], |list| list.as_slice())
    }

    /// Own count of a synset: the sum of its members' counts.
    #[must_use]
    pub fn synset_count_of(&self, synset: SynsetId) -> u64 {
        self.synset(synset).map_or(0, |s| {
            s.members
                .iter()
                .map(|&m| self.units[m.index()].count.unwrap_or(0))
                .fold(0u64, u64::saturating_add)
        })
    }

    /// Unit-level neighbors, written into `out` (previous contents dropped).
    ///
    /// With `relation` set, only that relation is followed. Sorted by
    /// relation name, then unit id.
    pub fn unit_neighbors_into(
        &self,
        unit: UnitId,
        relation: Option<RelationId>,
        direction: Direction,
        out: &mut Vec<(UnitId, RelationId)>,
    ) {
        out.clear();
        let Some(record) = self.unit(unit) else {
            return;
        };
        let own = &self.synsets[record.synset.index()];

        if relation.is_none_or(|r| r == RelationId::SYNONYM) {
            out.extend(
                own.members
                    .iter()
                    .filter(|&&m| m != unit)
                    .map(|&m| (m, RelationId::SYNONYM)),
            );
        }
        for &(rel, other) in self.synset_edges(record.synset, direction) {
            if relation.is_some_and(|r| r != rel) {
                continue;
            }
            out.extend(self.synsets[other.index()].members.iter().map(|&m| (m, rel)));
        }
        out.sort_unstable_by_key(|&(m, rel)| (self.relations.rank(rel), m));
    }

    /// Unit-level neighbors as a new vector.
    #[must_use]
    pub fn unit_neighbors(
        &self,
        unit: UnitId,
        relation: Option<RelationId>,
        direction: Direction,
    ) -> Vec<(UnitId, RelationId)> {
        let mut out = Vec::new();
        self.unit_neighbors_into(unit, relation, direction, &mut out);
        out
    }

    /// Outgoing neighbors of either kind of node.
    #[must_use]
    pub fn neighbors(&self, node: NodeRef, relation: Option<RelationId>) -> Vec<(NodeRef, RelationId)> {
        match node {
            NodeRef::Unit(unit) => self
                .unit_neighbors(unit, relation, Direction::Outgoing)
                .into_iter()
                .map(|(m, rel)| (NodeRef::Unit(m), rel))
                .collect(),
            NodeRef::Synset(synset) => self
                .synset_edges(synset, Direction::Outgoing)
                .iter()
                .filter(|&&(rel, _)| relation.is_none_or(|r| r == rel))
                .map(|&(rel, target)| (NodeRef::Synset(target), rel))
                .collect(),
        }
    }

    /// Every stored synset edge, followed by the `SYNONYM` edges between
    /// members of the same synset.
    pub fn edges(&self) -> impl Iterator<Item = RelationEdge> + '_ {
        let stored = self.outgoing.iter().enumerate().flat_map(|(index, list)| {
            let source = NodeRef::Synset(SynsetId(index as u32));
            list.iter().map(move |&(relation, target)| RelationEdge {
                source,
                target: NodeRef::Synset(target),
                relation,
            })
        });
        let synonyms = self.synsets.iter().flat_map(|synset| {
            synset.members.iter().flat_map(move |&a| {
                synset
                    .members
                    .iter()
                    .filter(move |&&b| b != a)
                    .map(move |&b| RelationEdge {
                        source: NodeRef::Unit(a),
                        target: NodeRef::Unit(b),
                        relation: RelationId::SYNONYM,
                    })
            })
        });
        stored.chain(synonyms)
    }

    /// Breadth-first closure over lexical units along one relation (or all
    /// of them), bounded by `max_depth` hops.
    pub fn unit_closure(
        &self,
        starts: impl IntoIterator<Item = UnitId>,
        relation: Option<RelationId>,
        direction: Direction,
        max_depth: usize,
    ) -> LayeredBfs<UnitId, impl FnMut(UnitId, &mut Vec<(UnitId, RelationId)>) + '_> {
        LayeredBfs::new(starts, max_depth, move |unit, out: &mut Vec<(UnitId, RelationId)>| {
            self.unit_neighbors_into(unit, relation, direction, out);
        })
    }

    /// Breadth-first closure over synsets following each `(relation,
    /// direction)` step, bounded by `max_depth` hops.
    pub fn synset_closure(
        &self,
        starts: impl IntoIterator<Item = SynsetId>,
        steps: SmallVec<[(RelationId, Direction); 2]>,
        max_depth: usize,
    ) -> LayeredBfs<SynsetId, impl FnMut(SynsetId, &mut Vec<(SynsetId, RelationId)>) + '_> {
        LayeredBfs::new(starts, max_depth, move |synset, out: &mut Vec<(SynsetId, RelationId)>| {
            out.clear();
            for &(relation, direction) in &steps {
                out.extend(
                    self.synset_edges(synset, direction)
                        .iter()
                        .filter(|&&(rel, _)| rel == relation)
                        .map(|&(rel, other)| (other, rel)),
                );
            }
        })
    }

    /// Sets every unit's count from `table`, zero when the table has no
    /// entry for the unit's lemma and category.
    pub fn apply_counts(&mut self, table: &CountTable) -> CountOverlay {
        let mut overlay = CountOverlay::default();
        for unit in &mut self.units {
            match table.get(&unit.lemma, CountCategory::from(unit.category)) {
                Some(count) => {
                    unit.count = Some(count);
                    overlay.matched += 1;
                }
                None => {
                    unit.count = Some(0);
                    overlay.unmatched += 1;
                }
            }
        }
        self.has_counts = true;
        let totals = table.totals();
        self.table_totals = Some(totals);
        tracing::info!(
            matched = overlay.matched,
            unmatched = overlay.unmatched,
            corpus = totals.all(),
            "applied word counts"
        );
        overlay
    }
}
