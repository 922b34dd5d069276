//! The hyperonym hierarchy as the similarity measures see it.

use std::sync::{Arc, OnceLock};

use lexnet_common::collections::{LexConcurrentMap, LexMap, lex_concurrent_map, lex_map};
use lexnet_common::{CountCategory, RelationId, SynsetId};
use lexnet_core::graph::CountTotals;
use lexnet_core::{Direction, LexicalGraph};
use smallvec::SmallVec;

use crate::config::SimilarityConfig;

type Steps = SmallVec<[(RelationId, Direction); 2]>;

/// Memoized hierarchy figures of one loaded graph.
///
/// Every entry is a pure function of the graph, so two threads computing
/// the same entry store the same value.
#[derive(Debug)]
pub(crate) struct SimilarityCache {
    ancestors: LexConcurrentMap<SynsetId, Arc<[(SynsetId, usize)]>>,
    subcounts: LexConcurrentMap<SynsetId, u64>,
    lcs_information: LexConcurrentMap<(SynsetId, SynsetId), Option<f64>>,
    root_mass: OnceLock<u64>,
    totals: OnceLock<CountTotals>,
}

impl SimilarityCache {
    pub(crate) fn new() -> Self {
        Self {
            ancestors: lex_concurrent_map(),
            subcounts: lex_concurrent_map(),
            lcs_information: lex_concurrent_map(),
            root_mass: OnceLock::new(),
            totals: OnceLock::new(),
        }
    }
}

/// A common ancestor of two synsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Subsumer {
    pub(crate) synset: SynsetId,
    /// Hops from the first synset plus hops from the second.
    pub(crate) distance: usize,
}

/// Hierarchy queries over a graph, backed by a [`SimilarityCache`].
///
/// Parents of a synset are the targets of its hyperonym edges and the
/// sources of hyponym edges pointing at it.
pub(crate) struct Hierarchy<'a> {
    graph: &'a LexicalGraph,
    cache: &'a SimilarityCache,
    config: &'a SimilarityConfig,
    up: Steps,
    down: Steps,
}

impl<'a> Hierarchy<'a> {
    pub(crate) fn new(
        graph: &'a LexicalGraph,
        cache: &'a SimilarityCache,
        config: &'a SimilarityConfig,
    ) -> Self {
        let mut up = Steps::new();
        if let Some(hyperonym) = graph.relation_id(&config.hyperonym_relation) {
            up.push((hyperonym, Direction::Outgoing));
        }
        if let Some(hyponym) = graph.relation_id(&config.hyponym_relation) {
            up.push((hyponym, Direction::Incoming));
        }
        let down = up.iter().map(|&(rel, dir)| (rel, dir.reverse())).collect();
        Self {
            graph,
            cache,
            config,
            up,
            down,
        }
    }

    /// The synset itself at distance 0, then its ancestors by distance.
    pub(crate) fn ancestors(&self, synset: SynsetId) -> Arc<[(SynsetId, usize)]> {
        if let Some(hit) = self.cache.ancestors.get(&synset) {
            return Arc::clone(hit.value());
        }
        let mut found = vec![(synset, 0)];
        let closure = self.graph.synset_closure(
            [synset],
            self.up.clone(),
            self.config.max_hierarchy_depth,
        );
        for layer in closure {
            found.extend(layer.nodes().map(|node| (node, layer.depth)));
        }
        let found: Arc<[(SynsetId, usize)]> = found.into();
        self.cache.ancestors.insert(synset, Arc::clone(&found));
        found
    }

    /// Own count plus the counts of every distinct descendant.
    ///
    /// Unlike [`ancestors`](Self::ancestors) this ignores the depth bound:
    /// a cut-off subtree would make an ancestor lighter than its
    /// descendants. No simple path is longer than the synset count.
    pub(crate) fn subcount(&self, synset: SynsetId) -> u64 {
        if let Some(hit) = self.cache.subcounts.get(&synset) {
            return *hit.value();
        }
        let mut total = self.graph.synset_count_of(synset);
        let closure =
            self.graph
                .synset_closure([synset], self.down.clone(), self.graph.synset_count());
        for layer in closure {
            for node in layer.nodes() {
                total = total.saturating_add(self.graph.synset_count_of(node));
            }
        }
        self.cache.subcounts.insert(synset, total);
        total
    }

    /// Sum of every synset's own count.
    pub(crate) fn root_mass(&self) -> u64 {
        *self.cache.root_mass.get_or_init(|| {
            self.graph
                .synsets()
                .iter()
                .map(|synset| self.graph.synset_count_of(synset.id))
                .fold(0u64, u64::saturating_add)
        })
    }

    /// Corpus size of the bucket of the synset's first member, or of the
    /// whole corpus when that bucket is empty.
    pub(crate) fn category_total(&self, synset: SynsetId) -> u64 {
        let totals = self.cache.totals.get_or_init(|| self.graph.count_totals());
        let bucket = self
            .graph
            .synset(synset)
            .and_then(|s| s.members.first())
            .and_then(|&member| self.graph.unit(member))
            .map(|unit| CountCategory::from(unit.category));
        match bucket.map(|b| totals.get(b)) {
            Some(total) if total > 0 => total,
            _ => totals.all(),
        }
    }

    /// `subcount / root_mass`, or `subcount / category_total` with category
    /// totals enabled; `None` when the denominator is zero.
    pub(crate) fn probability(&self, synset: SynsetId) -> Option<f64> {
        let mass = if self.config.category_totals {
            self.category_total(synset)
        } else {
            self.root_mass()
        };
        if mass == 0 {
            return None;
        }
        let mut subcount = self.subcount(synset);
        if subcount == 0 && self.config.smoothing {
            subcount = 1;
        }
        Some(subcount as f64 / mass as f64)
    }

    /// `-log2(probability)`; `None` when the probability is zero.
    pub(crate) fn information_content(&self, synset: SynsetId) -> Option<f64> {
        let p = self.probability(synset)?;
        if p <= 0.0 {
            return None;
        }
        // + 0.0 turns -0.0 into 0.0
        Some(-p.log2() + 0.0)
    }

    /// Every common ancestor (each synset counts as its own ancestor),
    /// ordered by distance, then id.
    pub(crate) fn common_subsumers(&self, a: SynsetId, b: SynsetId) -> Vec<Subsumer> {
        let ancestors_a = self.ancestors(a);
        let from_a: LexMap<SynsetId, usize> = {
            let mut map = lex_map();
            for &(synset, distance) in ancestors_a.iter() {
                map.entry(synset).or_insert(distance);
            }
            map
        };
        let mut common: Vec<Subsumer> = self
            .ancestors(b)
            .iter()
            .filter_map(|&(synset, distance)| {
                from_a.get(&synset).map(|&d| Subsumer {
                    synset,
                    distance: d + distance,
                })
            })
            .collect();
        common.sort_by_key(|s| (s.distance, s.synset));
        common
    }

    /// Common subsumers at minimal distance, by id.
    pub(crate) fn nearest_common_subsumers(&self, a: SynsetId, b: SynsetId) -> Vec<Subsumer> {
        let common = self.common_subsumers(a, b);
        let Some(nearest) = common.first().map(|s| s.distance) else {
            return common;
        };
        common.into_iter().take_while(|s| s.distance == nearest).collect()
    }

    /// Common subsumers of maximal information content, by id. Subsumers
    /// with undefined information content are never chosen.
    pub(crate) fn least_common_subsumers(&self, a: SynsetId, b: SynsetId) -> Vec<Subsumer> {
        let mut best: Option<f64> = None;
        let mut chosen: Vec<Subsumer> = Vec::new();
        for subsumer in self.common_subsumers(a, b) {
            let Some(ic) = self.information_content(subsumer.synset) else {
                continue;
            };
            match best {
                Some(top) if ic < top => {}
                Some(top) if ic == top => chosen.push(subsumer),
                _ => {
                    best = Some(ic);
                    chosen.clear();
                    chosen.push(subsumer);
                }
            }
        }
        chosen.sort_by_key(|s| s.synset);
        chosen
    }

    /// The least common subsumer with the lowest id.
    pub(crate) fn least_common_subsumer(&self, a: SynsetId, b: SynsetId) -> Option<Subsumer> {
        self.least_common_subsumers(a, b).into_iter().next()
    }

    /// Information content of the least common subsumer: 0 when the two
    /// synsets share no ancestor, `None` when they do but none of the
    /// shared ancestors has a defined information content.
    pub(crate) fn lcs_information(&self, a: SynsetId, b: SynsetId) -> Option<f64> {
        let key = if a <= b { (a, b) } else { (b, a) };
        if let Some(hit) = self.cache.lcs_information.get(&key) {
            return *hit.value();
        }
        let common = self.common_subsumers(a, b);
        let value = if common.is_empty() {
            Some(0.0)
        } else {
            common
                .iter()
                .filter_map(|s| self.information_content(s.synset))
                .fold(None, |best: Option<f64>, ic| Some(best.map_or(ic, |b| b.max(ic))))
        };
        self.cache.lcs_information.insert(key, value);
        value
    }
}
