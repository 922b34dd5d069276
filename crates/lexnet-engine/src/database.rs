//! The network handle and its operations.
//!
//! Start here with [`LexNet`]: create one from a [`Config`], load the
//! sources once, then query it from as many threads as you like.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;

use lexnet_adapters::{Source, load_graph, parse_query};
use lexnet_common::collections::{LexIndexMap, lex_index_map, lex_set};
use lexnet_common::utils::error::{Error, QueryError, QueryErrorKind, Result};
use lexnet_common::{NodeRef, SynsetId, UnitId};
use lexnet_core::{LexicalGraph, LoadReport};

use crate::admin::{NetworkInfo, NetworkState, SubsumerInfo, SynsetInfo, UnitInfo};
use crate::config::{Config, ConfigError, SensePolicy};
use crate::query::{Answer, QueryExecutor, QueryOptions, resolve_selector};
use crate::similarity::{self, Hierarchy, Metric, SimilarityCache, Subsumer};

/// The sources of one load.
#[derive(Debug)]
pub struct Sources {
    /// Lexical-unit XML extract.
    pub lexical_units: Source,
    /// Synset XML extract.
    pub synsets: Source,
    /// Optional word-count table.
    pub counts: Option<Source>,
}

impl Sources {
    /// The two XML extracts, without counts.
    #[must_use]
    pub fn new(lexical_units: Source, synsets: Source) -> Self {
        Self {
            lexical_units,
            synsets,
            counts: None,
        }
    }

    /// Adds a word-count table.
    #[must_use]
    pub fn with_counts(mut self, counts: Source) -> Self {
        self.counts = Some(counts);
        self
    }

    /// The paths named by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if either XML path is missing.
    pub fn from_config(config: &Config) -> Result<Self> {
        let lexical_units = config
            .lexical_units_source
            .clone()
            .ok_or(ConfigError::MissingSource("lexical_units_source"))?;
        let synsets = config
            .synsets_source
            .clone()
            .ok_or(ConfigError::MissingSource("synsets_source"))?;
        Ok(Self {
            lexical_units: Source::path(lexical_units),
            synsets: Source::path(synsets),
            counts: config.counts_source.clone().map(Source::path),
        })
    }
}

/// A loaded graph with everything derived from it.
struct Snapshot {
    graph: LexicalGraph,
    report: LoadReport,
    similarity: SimilarityCache,
}

enum State {
    Empty,
    Loading,
    Ready(Arc<Snapshot>),
}

/// Your handle to a lexical network.
///
/// A network starts empty, is loaded exactly once and is read-only from
/// then on. Every query method takes `&self`; share the handle behind an
/// `Arc` to query from several threads.
///
/// # Examples
///
/// ```no_run
/// use lexnet_engine::{Config, LexNet};
///
/// let net = LexNet::open(Config::from_paths("cdb_lu.xml", "cdb_syn.xml"))?;
/// let answer = net.ask("taal has_hyperonym")?;
/// if let Some(result) = answer.as_relation() {
///     println!("{:?}", result.flatten());
/// }
/// # Ok::<(), lexnet_engine::Error>(())
/// ```
pub struct LexNet {
    config: Config,
    state: RwLock<State>,
    max_depth: AtomicUsize,
}

impl LexNet {
    /// Creates an empty network.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            max_depth: AtomicUsize::new(config.max_depth),
            config,
            state: RwLock::new(State::Empty),
        })
    }

    /// Creates a network and loads the sources named by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an invalid configuration and
    /// [`Error::Load`] if the sources cannot be loaded.
    pub fn open(config: Config) -> Result<Self> {
        let sources = Sources::from_config(&config)?;
        let net = Self::new(config)?;
        net.load(sources)?;
        Ok(net)
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Loads the sources. Blocks until done.
    ///
    /// On failure the network is empty again and may be loaded anew.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyLoaded`] if a load has started before,
    /// [`Error::Config`] if counts are required but not given, and
    /// [`Error::Load`] if the sources are unreadable or malformed.
    pub fn load(&self, sources: Sources) -> Result<LoadReport> {
        {
            let mut state = self.state.write();
            if !matches!(*state, State::Empty) {
                return Err(Error::AlreadyLoaded);
            }
            *state = State::Loading;
        }

        if self.config.require_counts && sources.counts.is_none() {
            *self.state.write() = State::Empty;
            return Err(ConfigError::MissingSource("counts_source").into());
        }

        match load_graph(sources.lexical_units, sources.synsets, sources.counts) {
            Ok((graph, report)) => {
                tracing::info!(
                    units = report.units,
                    synsets = report.synsets,
                    relations = report.relations,
                    repairs = report.repairs(),
                    "lexical network ready"
                );
                let snapshot = Snapshot {
                    graph,
                    report: report.clone(),
                    similarity: SimilarityCache::new(),
                };
                *self.state.write() = State::Ready(Arc::new(snapshot));
                Ok(report)
            }
            Err(err) => {
                tracing::warn!(error = %err, "loading failed");
                *self.state.write() = State::Empty;
                Err(err.into())
            }
        }
    }

    /// Lifecycle state.
    #[must_use]
    pub fn state(&self) -> NetworkState {
        match &*self.state.read() {
            State::Empty => NetworkState::Empty,
            State::Loading => NetworkState::Loading,
            State::Ready(_) => NetworkState::Ready,
        }
    }

    /// Whether queries can be answered.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state() == NetworkState::Ready
    }

    fn snapshot(&self) -> Result<Arc<Snapshot>> {
        match &*self.state.read() {
            State::Ready(snapshot) => Ok(Arc::clone(snapshot)),
            State::Loading => Err(Error::NotReady("still loading")),
            State::Empty => Err(Error::NotReady("nothing loaded")),
        }
    }

    /// Current default depth ceiling.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth.load(Ordering::Relaxed)
    }

    /// Changes the default depth ceiling for queries that do not set their
    /// own. Queries already running keep theirs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidValue`] for zero.
    pub fn set_max_depth(&self, max_depth: usize) -> Result<()> {
        if max_depth == 0 {
            return Err(Error::InvalidValue("max_depth must be at least 1".to_string()));
        }
        self.max_depth.store(max_depth, Ordering::Relaxed);
        Ok(())
    }

    /// Answers a query with the default limits.
    ///
    /// # Errors
    ///
    /// See [`ask_with`](Self::ask_with).
    pub fn ask(&self, query: &str) -> Result<Answer> {
        self.ask_with(query, QueryOptions::default())
    }

    /// Answers a query.
    ///
    /// An unknown lemma gives an empty answer, not an error. Running into
    /// the depth ceiling or the budget gives a partial answer whose
    /// `truncation` says why.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] before loading completes,
    /// [`Error::Query`] for syntax errors and unknown relation names, and
    /// [`Error::InvalidValue`] for a zero depth ceiling.
    pub fn ask_with(&self, query: &str, options: QueryOptions) -> Result<Answer> {
        let snapshot = self.snapshot()?;
        let ceiling = match options.max_depth {
            Some(0) => {
                return Err(Error::InvalidValue("max_depth must be at least 1".to_string()));
            }
            Some(depth) => depth,
            None => self.max_depth(),
        };
        let parsed = parse_query(query)?;
        let budget = options.budget(&self.config);
        QueryExecutor::new(&snapshot.graph, &self.config, ceiling, budget).execute(&parsed)
    }

    /// Similarity of two lexical units, each given as a unit id or a unit
    /// spec (`taal`, `taal:noun`, `taal:noun:1`).
    ///
    /// Returns `Ok(None)` when a selector matches nothing or an
    /// information content the metric needs is undefined.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCounts`] without word counts, and
    /// [`Error::AmbiguousLemma`] when, under [`SensePolicy::Strict`], a
    /// selector matches several units.
    pub fn similarity(&self, metric: Metric, first: &str, second: &str) -> Result<Option<f64>> {
        let snapshot = self.snapshot()?;
        let graph = &snapshot.graph;
        if !graph.has_counts() {
            return Err(Error::MissingCounts);
        }
        let a = resolve_selector(graph, first)?;
        let b = resolve_selector(graph, second)?;
        if a.is_empty() || b.is_empty() {
            return Ok(None);
        }
        if self.config.similarity.sense_policy == SensePolicy::Strict {
            require_single(graph, first, &a)?;
            require_single(graph, second, &b)?;
        }

        let hierarchy = Hierarchy::new(graph, &snapshot.similarity, &self.config.similarity);
        Ok(similarity::best_score(
            &hierarchy,
            metric,
            &synsets_of(graph, &a),
            &synsets_of(graph, &b),
        ))
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Units matching a selector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] before loading completes, or a syntax
    /// error for a malformed selector.
    pub fn units(&self, selector: &str) -> Result<Vec<UnitInfo>> {
        let snapshot = self.snapshot()?;
        let graph = &snapshot.graph;
        Ok(resolve_selector(graph, selector)?
            .into_iter()
            .filter_map(|id| unit_info(graph, id))
            .collect())
    }

    /// Synsets containing a unit matching the selector, in lookup order.
    ///
    /// # Errors
    ///
    /// Same as [`units`](Self::units).
    pub fn synsets(&self, selector: &str) -> Result<Vec<SynsetInfo>> {
        let snapshot = self.snapshot()?;
        let graph = &snapshot.graph;
        let units = resolve_selector(graph, selector)?;
        Ok(synsets_of(graph, &units)
            .into_iter()
            .filter_map(|id| synset_info(graph, id))
            .collect())
    }

    /// Synsets one stored edge away from the synsets of the matching
    /// units, grouped by relation name. With `relation` set, only that
    /// relation is followed.
    ///
    /// # Errors
    ///
    /// Same as [`units`](Self::units); an unknown relation name is a query
    /// error.
    pub fn related_synsets(
        &self,
        selector: &str,
        relation: Option<&str>,
    ) -> Result<LexIndexMap<String, Vec<SynsetInfo>>> {
        let snapshot = self.snapshot()?;
        let graph = &snapshot.graph;
        let filter = match relation {
            Some(name) => Some(graph.relation_id(name).ok_or_else(|| {
                Error::from(QueryError::new(
                    QueryErrorKind::UnknownRelation,
                    format!("'{name}' is not a relation of this network"),
                ))
            })?),
            None => None,
        };

        let mut grouped: LexIndexMap<String, Vec<SynsetInfo>> = lex_index_map();
        let mut seen = lex_set();
        for synset in synsets_of(graph, &resolve_selector(graph, selector)?) {
            for (target, rel) in graph.neighbors(synset.into(), filter) {
                let NodeRef::Synset(target) = target else {
                    continue;
                };
                if !seen.insert((rel, target)) {
                    continue;
                }
                if let Some(info) = synset_info(graph, target) {
                    grouped
                        .entry(graph.relation_name(rel).to_string())
                        .or_default()
                        .push(info);
                }
            }
        }
        Ok(grouped)
    }

    /// The unit with the given source id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] before loading completes.
    pub fn unit_by_id(&self, id: &str) -> Result<Option<UnitInfo>> {
        let snapshot = self.snapshot()?;
        Ok(snapshot
            .graph
            .unit_by_external_id(id)
            .and_then(|unit| unit_info(&snapshot.graph, unit)))
    }

    /// The synset with the given source id or alias.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] before loading completes.
    pub fn synset_by_id(&self, id: &str) -> Result<Option<SynsetInfo>> {
        let snapshot = self.snapshot()?;
        Ok(snapshot
            .graph
            .synset_by_external_id(id)
            .and_then(|synset| synset_info(&snapshot.graph, synset)))
    }

    /// The member of a synset spelled `lemma`, as a unit spec.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] before loading completes.
    pub fn unit_from_synset(&self, synset_id: &str, lemma: &str) -> Result<Option<String>> {
        let snapshot = self.snapshot()?;
        let graph = &snapshot.graph;
        Ok(graph
            .synset_by_external_id(synset_id)
            .and_then(|id| graph.synset(id))
            .and_then(|synset| {
                synset
                    .members
                    .iter()
                    .copied()
                    .find(|&m| graph.unit(m).is_some_and(|u| u.lemma.as_str() == lemma))
            })
            .map(|unit| graph.unit_spec(unit)))
    }

    // ========================================================================
    // Counts and information content
    // ========================================================================

    /// Count of every matching unit; with `subcount`, the subcount of its
    /// synset instead.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCounts`] without word counts.
    pub fn counts(&self, selector: &str, subcount: bool) -> Result<LexIndexMap<String, u64>> {
        self.per_unit(selector, |graph, hierarchy, unit| {
            let record = graph.unit(unit)?;
            Some(if subcount {
                hierarchy.subcount(record.synset)
            } else {
                record.count.unwrap_or(0)
            })
        })
    }

    /// Corpus size per count bucket (`noun`, `verb`, `adj`, `other`) and
    /// overall (`all`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCounts`] without word counts.
    pub fn total_counts(&self) -> Result<LexIndexMap<String, u64>> {
        let snapshot = self.snapshot()?;
        if !snapshot.graph.has_counts() {
            return Err(Error::MissingCounts);
        }
        let totals = snapshot.graph.count_totals();
        let mut out = lex_index_map();
        for (name, total) in [
            ("noun", totals.noun),
            ("verb", totals.verb),
            ("adj", totals.adj),
            ("other", totals.other),
            ("all", totals.all()),
        ] {
            out.insert(name.to_string(), total);
        }
        Ok(out)
    }

    /// Probability of the synset of every matching unit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCounts`] without word counts.
    pub fn probabilities(&self, selector: &str) -> Result<LexIndexMap<String, Option<f64>>> {
        self.per_unit(selector, |graph, hierarchy, unit| {
            Some(hierarchy.probability(graph.unit(unit)?.synset))
        })
    }

    /// Information content of the synset of every matching unit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCounts`] without word counts.
    pub fn information_content(&self, selector: &str) -> Result<LexIndexMap<String, Option<f64>>> {
        self.per_unit(selector, |graph, hierarchy, unit| {
            Some(hierarchy.information_content(graph.unit(unit)?.synset))
        })
    }

    fn per_unit<T>(
        &self,
        selector: &str,
        value: impl Fn(&LexicalGraph, &Hierarchy<'_>, UnitId) -> Option<T>,
    ) -> Result<LexIndexMap<String, T>> {
        let snapshot = self.snapshot()?;
        let graph = &snapshot.graph;
        if !graph.has_counts() {
            return Err(Error::MissingCounts);
        }
        let hierarchy = Hierarchy::new(graph, &snapshot.similarity, &self.config.similarity);
        let mut out = lex_index_map();
        for unit in resolve_selector(graph, selector)? {
            if let Some(v) = value(graph, &hierarchy, unit) {
                out.insert(graph.unit_spec(unit), v);
            }
        }
        Ok(out)
    }

    // ========================================================================
    // Subsumers
    // ========================================================================

    /// Every common subsumer of the matching units, nearest first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] before loading completes, or a syntax
    /// error for a malformed selector.
    pub fn common_subsumers(&self, first: &str, second: &str) -> Result<Vec<SubsumerInfo>> {
        self.subsumers(first, second, Keep::All, |h, a, b| h.common_subsumers(a, b))
    }

    /// The common subsumers at minimal distance over every sense pair.
    ///
    /// # Errors
    ///
    /// Same as [`common_subsumers`](Self::common_subsumers).
    pub fn nearest_common_subsumers(&self, first: &str, second: &str) -> Result<Vec<SubsumerInfo>> {
        self.subsumers(first, second, Keep::Nearest, |h, a, b| {
            h.nearest_common_subsumers(a, b)
        })
    }

    /// The common subsumers of maximal information content over every
    /// sense pair, by synset id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCounts`] without word counts, otherwise the
    /// same as [`common_subsumers`](Self::common_subsumers).
    pub fn least_common_subsumers(&self, first: &str, second: &str) -> Result<Vec<SubsumerInfo>> {
        if !self.snapshot()?.graph.has_counts() {
            return Err(Error::MissingCounts);
        }
        self.subsumers(first, second, Keep::Richest, |h, a, b| {
            h.least_common_subsumers(a, b)
        })
    }

    /// The least common subsumer: maximal information content, lowest
    /// synset id on ties. `None` when nothing is shared.
    ///
    /// # Errors
    ///
    /// Same as [`least_common_subsumers`](Self::least_common_subsumers).
    pub fn least_common_subsumer(&self, first: &str, second: &str) -> Result<Option<SubsumerInfo>> {
        if !self.snapshot()?.graph.has_counts() {
            return Err(Error::MissingCounts);
        }
        let found = self.subsumers(first, second, Keep::Richest, |h, a, b| {
            h.least_common_subsumer(a, b).into_iter().collect()
        })?;
        Ok(found.into_iter().next())
    }

    /// Runs `find` on every sense pair, merges the results keeping each
    /// synset's minimal distance, then applies `keep` to the merged set.
    fn subsumers(
        &self,
        first: &str,
        second: &str,
        keep: Keep,
        find: impl Fn(&Hierarchy<'_>, SynsetId, SynsetId) -> Vec<Subsumer>,
    ) -> Result<Vec<SubsumerInfo>> {
        let snapshot = self.snapshot()?;
        let graph = &snapshot.graph;
        let hierarchy = Hierarchy::new(graph, &snapshot.similarity, &self.config.similarity);
        let a = synsets_of(graph, &resolve_selector(graph, first)?);
        let b = synsets_of(graph, &resolve_selector(graph, second)?);

        let mut found: LexIndexMap<SynsetId, usize> = lex_index_map();
        for &x in &a {
            for &y in &b {
                for subsumer in find(&hierarchy, x, y) {
                    let distance = found.entry(subsumer.synset).or_insert(subsumer.distance);
                    *distance = (*distance).min(subsumer.distance);
                }
            }
        }
        let information = |synset: SynsetId| {
            if graph.has_counts() {
                hierarchy.information_content(synset)
            } else {
                None
            }
        };
        let mut found: Vec<(SynsetId, usize, Option<f64>)> = found
            .into_iter()
            .map(|(synset, distance)| (synset, distance, information(synset)))
            .collect();
        found.sort_by_key(|&(synset, distance, _)| (distance, synset));

        match keep {
            Keep::All => {}
            Keep::Nearest => {
                if let Some(&(_, nearest, _)) = found.first() {
                    found.retain(|&(_, distance, _)| distance == nearest);
                }
            }
            Keep::Richest => {
                let top = found
                    .iter()
                    .filter_map(|&(_, _, ic)| ic)
                    .fold(None, |best: Option<f64>, ic| Some(best.map_or(ic, |b| b.max(ic))));
                found.retain(|&(_, _, ic)| top.is_some() && ic == top);
                found.sort_by_key(|&(synset, _, _)| synset);
            }
        }

        Ok(found
            .into_iter()
            .filter_map(|(synset, distance, information_content)| {
                Some(SubsumerInfo {
                    synset: synset_info(graph, synset)?,
                    distance,
                    information_content,
                })
            })
            .collect())
    }

    // ========================================================================
    // Admin
    // ========================================================================

    /// What was repaired while loading.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] before loading completes.
    pub fn load_report(&self) -> Result<LoadReport> {
        Ok(self.snapshot()?.report.clone())
    }

    /// Returns high-level information about the network, in any state.
    #[must_use]
    pub fn info(&self) -> NetworkInfo {
        let state = self.state();
        let snapshot = self.snapshot().ok();
        let graph = snapshot.as_ref().map(|s| &s.graph);
        NetworkInfo {
            state,
            unit_count: graph.map_or(0, LexicalGraph::unit_count),
            synset_count: graph.map_or(0, LexicalGraph::synset_count),
            edge_count: graph.map_or(0, LexicalGraph::edge_count),
            relations: graph.map_or_else(Vec::new, |g| {
                g.relations()
                    .sorted_names()
                    .into_iter()
                    .map(|name| name.to_string())
                    .collect()
            }),
            has_counts: graph.is_some_and(LexicalGraph::has_counts),
            max_depth: self.max_depth(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Which of the merged subsumers to return.
#[derive(Debug, Clone, Copy)]
enum Keep {
    All,
    /// Minimal distance.
    Nearest,
    /// Maximal information content.
    Richest,
}

fn require_single(graph: &LexicalGraph, selector: &str, units: &[UnitId]) -> Result<()> {
    if units.len() > 1 {
        return Err(Error::AmbiguousLemma {
            selector: selector.to_string(),
            candidates: units.iter().map(|&u| graph.unit_spec(u)).collect(),
        });
    }
    Ok(())
}

/// Distinct synsets of `units`, in order of first appearance.
fn synsets_of(graph: &LexicalGraph, units: &[UnitId]) -> Vec<SynsetId> {
    let mut seen = lex_set();
    units
        .iter()
        .filter_map(|&u| graph.unit(u).map(|record| record.synset))
        .filter(|&s| seen.insert(s))
        .collect()
}

fn unit_info(graph: &LexicalGraph, id: UnitId) -> Option<UnitInfo> {
    let unit = graph.unit(id)?;
    let synset = synset_info(graph, unit.synset)?;
    Some(UnitInfo {
        id: unit.external_id.to_string(),
        spec: unit.spec(),
        lemma: unit.lemma.to_string(),
        category: unit.category,
        sense: unit.sense,
        synset: synset.id,
        count: unit.count,
    })
}

fn synset_info(graph: &LexicalGraph, id: SynsetId) -> Option<SynsetInfo> {
    let synset = graph.synset(id)?;
    let name = match &synset.external_id {
        Some(external) => external.to_string(),
        None => synset
            .members
            .first()
            .and_then(|&m| graph.unit(m))
            .map(|u| u.external_id.to_string())?,
    };
    Some(SynsetInfo {
        id: name,
        alias: synset.alias.as_ref().map(ToString::to_string),
        implicit: synset.is_implicit(),
        members: synset.members.iter().map(|&m| graph.unit_spec(m)).collect(),
    })
}
