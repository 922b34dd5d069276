//! Assembles a [`LexicalGraph`] from parsed records, repairing what it can.
//!
//! Lexical units must all be added before the synsets that list them.
//! Relation targets are resolved in [`GraphBuilder::finish`], so a synset
//! may point at synsets that appear later in the source.

use arcstr::ArcStr;
use lexnet_common::collections::{LexMap, LexSet, lex_map, lex_set};
use lexnet_common::{Category, RelationId, SynsetId, UnitId};
use serde::Serialize;
use smallvec::SmallVec;

use super::counts::CountOverlay;
use super::record::{LexicalUnit, Synset};
use super::relations::RelationTable;
use super::store::{EdgeList, LexicalGraph};

/// A lexical unit as read from the source, before validation.
#[derive(Debug, Clone)]
pub struct UnitDraft {
    /// Source id (`c_lu_id`).
    pub external_id: ArcStr,
    /// Written form.
    pub lemma: ArcStr,
    /// Category exactly as spelled in the source.
    pub category: String,
    /// Sense number.
    pub sense: u32,
    /// Count carried by the source, if any.
    pub count: Option<u64>,
}

/// A synset as read from the source, before validation.
#[derive(Debug, Clone, Default)]
pub struct SynsetDraft {
    /// Source id (`c_sy_id`).
    pub external_id: ArcStr,
    /// Alternative id (`d_synset_id`).
    pub alias: Option<ArcStr>,
    /// Member unit ids, as listed.
    pub members: Vec<ArcStr>,
    /// `(relation name, target synset id)` pairs, as listed.
    pub relations: Vec<(ArcStr, ArcStr)>,
}

/// What loading found and repaired.
///
/// Every repair leaves the graph consistent; none of them is fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Lexical units in the graph.
    pub units: usize,
    /// Synsets in the graph, implicit ones included.
    pub synsets: usize,
    /// Stored synset-to-synset edges.
    pub relations: usize,
    /// Categories rewritten to canonical spelling.
    pub normalized_categories: usize,
    /// Units dropped for an unrecognizable category.
    pub dropped_units: usize,
    /// Units no synset listed; each got a singleton synset.
    pub orphan_units: usize,
    /// Synset members naming unknown units.
    pub dangling_members: usize,
    /// Units listed twice by the same synset.
    pub duplicate_members: usize,
    /// Units listed by a second synset (the first listing wins).
    pub reassigned_members: usize,
    /// Synsets whose id was already taken (dropped).
    pub duplicate_synsets: usize,
    /// Relations whose target is unknown.
    pub dangling_relations: usize,
    /// Relations repeating an existing edge.
    pub duplicate_relations: usize,
    /// Relations from a synset to itself.
    pub self_loops: usize,
    /// Lines of the count table that could not be parsed.
    pub skipped_count_lines: usize,
    /// Result of the count overlay, if one was applied.
    pub counts: Option<CountOverlay>,
}

impl LoadReport {
    /// Total number of repairs.
    #[must_use]
    pub fn repairs(&self) -> usize {
        self.normalized_categories
            + self.dropped_units
            + self.orphan_units
            + self.dangling_members
            + self.duplicate_members
            + self.reassigned_members
            + self.duplicate_synsets
            + self.dangling_relations
            + self.duplicate_relations
            + self.self_loops
    }
}

/// Returned by [`GraphBuilder::add_unit`] when the id is already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateUnit(pub ArcStr);

/// Builds a [`LexicalGraph`].
#[derive(Debug)]
pub struct GraphBuilder {
    units: Vec<LexicalUnit>,
    unit_ids: LexMap<ArcStr, UnitId>,
    synsets: Vec<Synset>,
    synset_ids: LexMap<ArcStr, SynsetId>,
    pending: Vec<(SynsetId, RelationId, ArcStr)>,
    relations: RelationTable,
    report: LoadReport,
    has_counts: bool,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            units: Vec::new(),
            unit_ids: lex_map(),
            synsets: Vec::new(),
            synset_ids: lex_map(),
            pending: Vec::new(),
            relations: RelationTable::new(),
            report: LoadReport::default(),
            has_counts: false,
        }
    }

    /// Adds a lexical unit.
    ///
    /// Returns `Ok(None)` when the unit is dropped because its category is
    /// not recognized.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateUnit`] if a unit with the same source id exists.
    pub fn add_unit(&mut self, draft: UnitDraft) -> Result<Option<UnitId>, DuplicateUnit> {
        if self.unit_ids.contains_key(&draft.external_id) {
            return Err(DuplicateUnit(draft.external_id));
        }
        let Some((category, normalized)) = Category::normalize(&draft.category) else {
            tracing::debug!(
                id = %draft.external_id,
                category = %draft.category,
                "dropping lexical unit with unknown category"
            );
            self.report.dropped_units += 1;
            return Ok(None);
        };
        if normalized {
            self.report.normalized_categories += 1;
        }

        let id = UnitId(self.units.len() as u32);
        self.has_counts |= draft.count.is_some();
        self.unit_ids.insert(draft.external_id.clone(), id);
        self.units.push(LexicalUnit {
            id,
            external_id: draft.external_id,
            lemma: draft.lemma,
            category,
            sense: draft.sense,
            synset: SynsetId::INVALID,
            count: draft.count,
        });
        Ok(Some(id))
    }

    /// Adds a synset. Returns `None` if its id was already taken.
    pub fn add_synset(&mut self, draft: SynsetDraft) -> Option<SynsetId> {
        if self.synset_ids.contains_key(&draft.external_id) {
            tracing::debug!(id = %draft.external_id, "dropping duplicate synset");
            self.report.duplicate_synsets += 1;
            return None;
        }

        let id = SynsetId(self.synsets.len() as u32);
        self.synset_ids.insert(draft.external_id.clone(), id);
        if let Some(alias) = &draft.alias
            && !self.synset_ids.contains_key(alias)
        {
            self.synset_ids.insert(alias.clone(), id);
        }

        let mut members: SmallVec<[UnitId; 4]> = SmallVec::new();
        for member in &draft.members {
            let Some(&unit) = self.unit_ids.get(member) else {
                tracing::debug!(synset = %draft.external_id, unit = %member, "unknown synset member");
                self.report.dangling_members += 1;
                continue;
            };
            let record = &mut self.units[unit.index()];
            if record.synset == id {
                self.report.duplicate_members += 1;
            } else if record.synset.is_valid() {
                tracing::debug!(
                    synset = %draft.external_id,
                    unit = %member,
                    "unit already belongs to another synset"
                );
                self.report.reassigned_members += 1;
            } else {
                record.synset = id;
                members.push(unit);
            }
        }

        for (name, target) in draft.relations {
            match self.relations.intern(&name) {
                Some(relation) => self.pending.push((id, relation, target)),
                None => {
                    tracing::debug!(relation = %name, "relation table full");
                    self.report.dangling_relations += 1;
                }
            }
        }

        self.synsets.push(Synset {
            id,
            external_id: Some(draft.external_id),
            alias: draft.alias,
            members,
        });
        Some(id)
    }

    /// Number of units added so far.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Resolves relations, fills in implicit synsets and freezes the graph.
    #[must_use]
    pub fn finish(mut self) -> (LexicalGraph, LoadReport) {
        for index in 0..self.units.len() {
            if self.units[index].synset.is_valid() {
                continue;
            }
            let synset = SynsetId(self.synsets.len() as u32);
            let unit = UnitId(index as u32);
            self.units[index].synset = synset;
            self.synsets.push(Synset {
                id: synset,
                external_id: None,
                alias: None,
                members: SmallVec::from_slice(&[unit]),
            });
            self.report.orphan_units += 1;
        }

        let mut outgoing: Vec<EdgeList> = vec![EdgeList::new(); self.synsets.len()];
        let mut incoming: Vec<EdgeList> = vec![EdgeList::new(); self.synsets.len()];
        let mut seen: LexSet<(SynsetId, RelationId, SynsetId)> = lex_set();
        let mut edge_count = 0;

        for (source, relation, target_name) in std::mem::take(&mut self.pending) {
            let Some(&target) = self.synset_ids.get(&target_name) else {
                tracing::debug!(
                    relation = %self.relations.name(relation),
                    target = %target_name,
                    "relation target not found"
                );
                self.report.dangling_relations += 1;
                continue;
            };
            if source == target {
                self.report.self_loops += 1;
                continue;
            }
            if !seen.insert((source, relation, target)) {
                self.report.duplicate_relations += 1;
                continue;
            }
            outgoing[source.index()].push((relation, target));
            incoming[target.index()].push((relation, source));
            edge_count += 1;
        }

        let relations = &self.relations;
        for list in outgoing.iter_mut().chain(incoming.iter_mut()) {
            list.sort_unstable_by_key(|&(rel, other)| (relations.rank(rel), other));
        }

        let mut lemmas: LexMap<ArcStr, Vec<UnitId>> = lex_map();
        for unit in &self.units {
            lemmas.entry(unit.lemma.clone()).or_default().push(unit.id);
        }
        for ids in lemmas.values_mut() {
            ids.sort_unstable_by_key(|id| {
                let unit = &self.units[id.index()];
                (unit.synset, unit.sense, unit.id)
            });
        }

        self.report.units = self.units.len();
        self.report.synsets = self.synsets.len();
        self.report.relations = edge_count;

        let repairs = self.report.repairs();
        if repairs > 0 {
            tracing::warn!(
                repairs,
                dangling_members = self.report.dangling_members,
                dangling_relations = self.report.dangling_relations,
                duplicate_relations = self.report.duplicate_relations,
                self_loops = self.report.self_loops,
                orphan_units = self.report.orphan_units,
                dropped_units = self.report.dropped_units,
                "repaired inconsistencies in lexical data"
            );
        }
        tracing::info!(
            units = self.report.units,
            synsets = self.report.synsets,
            relations = edge_count,
            "lexical graph built"
        );

        let graph = LexicalGraph {
            units: self.units,
            synsets: self.synsets,
            relations: self.relations,
            outgoing,
            incoming,
            lemmas,
            unit_ids: self.unit_ids,
            synset_ids: self.synset_ids,
            edge_count,
            has_counts: self.has_counts,
            table_totals: None,
        };
        (graph, self.report)
    }
}
