use lexnet_adapters::{DepthSpec, Query, RelationSpec, UnitPattern, parse_unit};
use lexnet_common::collections::{LexMap, lex_map};
use lexnet_common::utils::error::{QueryError, QueryErrorKind, Result};
use lexnet_common::utils::strings::{find_similar, format_suggestion};
use lexnet_common::{RelationId, UnitId};
use lexnet_core::execution::{PathStep, bidirectional_path};
use lexnet_core::{Direction, LexicalGraph, QueryBudget, Truncation};

use super::result::{Answer, LookupResult, PathResult, RelationResult, RelationShape, RelationTree};
use crate::config::Config;

type Children = LexMap<UnitId, Vec<(RelationId, UnitId)>>;

/// Units matching a pattern, in lookup order.
pub(crate) fn resolve_units(graph: &LexicalGraph, pattern: &UnitPattern) -> Vec<UnitId> {
    let mut units = graph.lookup_lemma(&pattern.lemma, pattern.category);
    if let Some(sense) = pattern.sense {
        units.retain(|&id| graph.unit(id).is_some_and(|unit| unit.sense == sense));
    }
    units
}

/// Units named by a selector: an external unit id, or a unit pattern.
pub(crate) fn resolve_selector(graph: &LexicalGraph, selector: &str) -> Result<Vec<UnitId>> {
    if let Some(unit) = graph.unit_by_external_id(selector.trim()) {
        return Ok(vec![unit]);
    }
    let pattern = parse_unit(selector)?;
    Ok(resolve_units(graph, &pattern))
}

/// Runs parsed queries against one graph.
pub(crate) struct QueryExecutor<'a> {
    graph: &'a LexicalGraph,
    config: &'a Config,
    ceiling: usize,
    budget: QueryBudget,
}

impl<'a> QueryExecutor<'a> {
    pub(crate) fn new(
        graph: &'a LexicalGraph,
        config: &'a Config,
        ceiling: usize,
        budget: QueryBudget,
    ) -> Self {
        Self {
            graph,
            config,
            ceiling,
            budget,
        }
    }

    pub(crate) fn execute(&self, query: &Query) -> Result<Answer> {
        match query {
            Query::Lookup(unit) => Ok(Answer::Lookup(self.lookup(unit))),
            Query::Related { unit, relation } => self.related(unit, relation).map(Answer::Relation),
            Query::Path { from, relation, to } => {
                self.path(from, relation, to).map(Answer::Path)
            }
        }
    }

    fn lookup(&self, pattern: &UnitPattern) -> LookupResult {
        LookupResult {
            units: resolve_units(self.graph, pattern)
                .into_iter()
                .map(|id| self.graph.unit_spec(id))
                .collect(),
        }
    }

    fn related(&self, pattern: &UnitPattern, spec: &RelationSpec) -> Result<RelationResult> {
        let relation = self.resolve_relation(spec)?;
        let (depth, from_ceiling) = self.depth_for(spec);
        let shape = match (&spec.name, spec.depth) {
            (None, _) => RelationShape::Unrestricted,
            (Some(_), DepthSpec::Default) if depth == 1 && !from_ceiling => RelationShape::SingleHop,
            (Some(_), _) => RelationShape::Closure,
        };
        let starts = resolve_units(self.graph, pattern);
        tracing::trace!(
            unit = %pattern,
            relation = %spec,
            candidates = starts.len(),
            depth,
            "relation query"
        );

        let mut tree = RelationTree::new();
        let mut truncation = self.budget.check(0);
        let mut steps = 0u64;

        if truncation.is_none() {
            'candidates: for &start in &starts {
                let mut bfs = self.graph.unit_closure([start], relation, Direction::Outgoing, depth);
                let mut children: Children = lex_map();
                while let Some(layer) = bfs.next() {
                    for discovery in &layer.discoveries {
                        children
                            .entry(discovery.parent)
                            .or_default()
                            .push((discovery.relation, discovery.node));
                    }
                    if let Some(reason) = self.budget.check(steps + bfs.steps()) {
                        truncation = Some(reason);
                        tree.merge(self.build_tree(start, &children));
                        break 'candidates;
                    }
                }
                if from_ceiling && truncation.is_none() && bfs.has_more() {
                    truncation = Some(Truncation::DepthLimit { depth });
                }
                steps += bfs.steps();
                tree.merge(self.build_tree(start, &children));
            }
        }

        Ok(RelationResult {
            shape,
            depth,
            tree,
            truncation,
        })
    }

    fn path(
        &self,
        from: &UnitPattern,
        spec: &RelationSpec,
        to: &UnitPattern,
    ) -> Result<PathResult> {
        let relation = self.resolve_relation(spec)?;
        let (depth, from_ceiling) = self.depth_for(spec);
        let sources = resolve_units(self.graph, from);
        let targets = resolve_units(self.graph, to);
        tracing::trace!(from = %from, to = %to, relation = %spec, depth, "path query");

        let search = bidirectional_path(self.graph, &sources, &targets, relation, depth, &self.budget);
        let truncation = match search.truncation {
            Some(Truncation::DepthLimit { .. }) if !from_ceiling => None,
            other => other,
        };
        let path = search
            .path
            .unwrap_or_default()
            .into_iter()
            .map(|step| match step {
                PathStep::Unit(unit) => self.graph.unit_spec(unit),
                PathStep::Relation(rel) => self.graph.relation_name(rel).to_string(),
            })
            .collect();
        Ok(PathResult { path, truncation })
    }

    fn resolve_relation(&self, spec: &RelationSpec) -> Result<Option<RelationId>> {
        let Some(name) = &spec.name else {
            return Ok(None);
        };
        if let Some(id) = self.graph.relation_id(name) {
            return Ok(Some(id));
        }
        let names = self.graph.relations().sorted_names();
        let mut err = QueryError::new(
            QueryErrorKind::UnknownRelation,
            format!("'{name}' is not a relation of this network"),
        )
        .with_span(spec.span);
        if let Some(similar) = find_similar(name, &names) {
            err = err.with_suggestion(format_suggestion(similar));
        }
        Err(err.into())
    }

    /// Depth to traverse, and whether the ceiling (rather than the query)
    /// set it.
    fn depth_for(&self, spec: &RelationSpec) -> (usize, bool) {
        match spec.depth {
            DepthSpec::Exactly(depth) => {
                let depth = usize::from(depth);
                if depth > self.ceiling {
                    (self.ceiling, true)
                } else {
                    (depth, false)
                }
            }
            DepthSpec::Max => (self.ceiling, true),
            DepthSpec::Default => match &spec.name {
                Some(name) if !self.config.is_hierarchical(name) => (1, false),
                _ => (self.ceiling, true),
            },
        }
    }

    fn build_tree(&self, node: UnitId, children: &Children) -> RelationTree {
        let mut tree = RelationTree::new();
        if let Some(list) = children.get(&node) {
            for &(relation, child) in list {
                let subtree = self.build_tree(child, children);
                *tree.entry(self.graph.relation_name(relation), self.graph.unit_spec(child)) = subtree;
            }
        }
        tree
    }
}
