//! Bidirectional shortest path between two sets of lexical units.
//!
//! The search alternates one forward layer (following edges from the
//! sources) with one backward layer (following edges into the targets) until
//! the two frontiers meet. The depth ceiling bounds the total number of hops
//! explored on both sides together.

use lexnet_common::collections::{LexMap, lex_map};
use lexnet_common::{RelationId, UnitId};

use super::budget::{QueryBudget, Truncation};
use crate::graph::{Direction, LexicalGraph};

/// One element of a path: units alternate with the relations between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep {
    /// A lexical unit on the path.
    Unit(UnitId),
    /// The relation leading to the next unit.
    Relation(RelationId),
}

/// Outcome of a path search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathSearch {
    /// `unit, relation, unit, ..., unit`, or `None` if no path was found.
    pub path: Option<Vec<PathStep>>,
    /// Why the search stopped early, if it did.
    pub truncation: Option<Truncation>,
    /// Edges examined.
    pub steps: u64,
}

/// Back-pointers: the neighbor each node was reached from, `None` for the
/// seeds of that side.
type Trail = LexMap<UnitId, Option<(UnitId, RelationId)>>;

/// Finds a shortest path from any of `sources` to any of `targets`.
///
/// With `relation` set, only that relation is followed. When the endpoint
/// sets overlap the path is the first shared unit alone. Among paths of equal
/// length the first one met under the graph's deterministic neighbor order
/// is returned.
#[must_use]
pub fn bidirectional_path(
    graph: &LexicalGraph,
    sources: &[UnitId],
    targets: &[UnitId],
    relation: Option<RelationId>,
    max_depth: usize,
    budget: &QueryBudget,
) -> PathSearch {
    let mut search = PathSearch::default();
    if sources.is_empty() || targets.is_empty() {
        return search;
    }

    let mut forward_trail: Trail = lex_map();
    let mut backward_trail: Trail = lex_map();
    for &source in sources {
        forward_trail.entry(source).or_insert(None);
    }
    for &target in targets {
        backward_trail.entry(target).or_insert(None);
    }

    if let Some(&shared) = sources.iter().find(|s| backward_trail.contains_key(*s)) {
        search.path = Some(vec![PathStep::Unit(shared)]);
        return search;
    }

    let mut forward: Vec<UnitId> = dedup_in_order(sources);
    let mut backward: Vec<UnitId> = dedup_in_order(targets);
    let mut next: Vec<UnitId> = Vec::new();
    let mut scratch: Vec<(UnitId, RelationId)> = Vec::new();
    let mut level = 0;
    let mut forward_turn = true;

    while !forward.is_empty() && !backward.is_empty() {
        if level >= max_depth {
            search.truncation = Some(Truncation::DepthLimit { depth: max_depth });
            return search;
        }
        if let Some(reason) = budget.check(search.steps) {
            search.truncation = Some(reason);
            return search;
        }

        let (frontier, own, other, direction) = if forward_turn {
            (&forward, &mut forward_trail, &backward_trail, Direction::Outgoing)
        } else {
            (&backward, &mut backward_trail, &forward_trail, Direction::Incoming)
        };

        next.clear();
        let mut meeting = None;
        'layer: for &node in frontier {
            graph.unit_neighbors_into(node, relation, direction, &mut scratch);
            search.steps += scratch.len() as u64;
            for &(neighbor, rel) in &scratch {
                if !own.contains_key(&neighbor) {
                    own.insert(neighbor, Some((node, rel)));
                    next.push(neighbor);
                }
                if other.contains_key(&neighbor) {
                    meeting = Some(neighbor);
                    break 'layer;
                }
            }
        }

        if let Some(meeting) = meeting {
            search.path = Some(join(meeting, &forward_trail, &backward_trail));
            return search;
        }

        if forward_turn {
            std::mem::swap(&mut forward, &mut next);
        } else {
            std::mem::swap(&mut backward, &mut next);
        }
        forward_turn = !forward_turn;
        level += 1;
    }

    search
}

fn dedup_in_order(ids: &[UnitId]) -> Vec<UnitId> {
    let mut seen = lexnet_common::collections::lex_set();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Stitches the two half-paths together at `meeting`.
fn join(meeting: UnitId, forward: &Trail, backward: &Trail) -> Vec<PathStep> {
    let mut head = vec![PathStep::Unit(meeting)];
    let mut node = meeting;
    while let Some(&Some((previous, rel))) = forward.get(&node) {
        head.push(PathStep::Relation(rel));
        head.push(PathStep::Unit(previous));
        node = previous;
    }
    head.reverse();

    let mut node = meeting;
    while let Some(&Some((following, rel))) = backward.get(&node) {
        head.push(PathStep::Relation(rel));
        head.push(PathStep::Unit(following));
        node = following;
    }
    head
}
