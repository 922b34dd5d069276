//! Layered breadth-first search.
//!
//! [`LayeredBfs`] yields one BFS layer per `next()` call. Callers inspect
//! each layer and may stop between layers, which is where budgets and
//! deadlines are checked.

use std::hash::Hash;

use lexnet_common::RelationId;
use lexnet_common::collections::{LexSet, lex_set};

/// A node reached for the first time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discovery<N> {
    /// The newly reached node.
    pub node: N,
    /// The node it was reached from.
    pub parent: N,
    /// The relation followed.
    pub relation: RelationId,
}

/// All nodes first reached at one distance from the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer<N> {
    /// Distance from the start nodes, starting at 1.
    pub depth: usize,
    /// Discoveries in expansion order.
    pub discoveries: Vec<Discovery<N>>,
}

impl<N: Copy> Layer<N> {
    /// The nodes of this layer.
    pub fn nodes(&self) -> impl Iterator<Item = N> + '_ {
        self.discoveries.iter().map(|d| d.node)
    }
}

/// Breadth-first search that stops after `max_depth` layers.
///
/// `expand` writes the neighbors of a node into the buffer it is given
/// (the buffer is cleared by `expand` or arrives empty). A node is reported
/// once, in the layer where it is first reached; among several parents the
/// first in expansion order wins.
pub struct LayeredBfs<N, F> {
    expand: F,
    discovered: LexSet<N>,
    frontier: Vec<N>,
    scratch: Vec<(N, RelationId)>,
    depth: usize,
    max_depth: usize,
    steps: u64,
}

impl<N, F> LayeredBfs<N, F>
where
    N: Copy + Eq + Hash,
    F: FnMut(N, &mut Vec<(N, RelationId)>),
{
    /// Starts a search from `starts` (depth 0, never reported).
    pub fn new(starts: impl IntoIterator<Item = N>, max_depth: usize, expand: F) -> Self {
        let mut discovered = lex_set();
        let mut frontier = Vec::new();
        for start in starts {
            if discovered.insert(start) {
                frontier.push(start);
            }
        }
        Self {
            expand,
            discovered,
            frontier,
            scratch: Vec::new(),
            depth: 0,
            max_depth,
            steps: 0,
        }
    }

    /// Depth of the last layer produced.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Edges examined so far.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Whether `node` was reached (or is a start node).
    #[must_use]
    pub fn is_discovered(&self, node: &N) -> bool {
        self.discovered.contains(node)
    }

    /// Whether the search stopped because of the depth ceiling while
    /// undiscovered nodes were still one hop away.
    ///
    /// Only meaningful once `next()` has returned `None`.
    pub fn has_more(&mut self) -> bool {
        if self.depth < self.max_depth || self.frontier.is_empty() {
            return false;
        }
        let frontier = std::mem::take(&mut self.frontier);
        let mut found = false;
        for &node in &frontier {
            self.scratch.clear();
            (self.expand)(node, &mut self.scratch);
            self.steps += self.scratch.len() as u64;
            if self.scratch.iter().any(|(n, _)| !self.discovered.contains(n)) {
                found = true;
                break;
            }
        }
        self.frontier = frontier;
        found
    }

    /// Runs to completion and returns the nodes of each layer.
    pub fn collect_layers(mut self) -> Vec<Vec<N>> {
        let mut layers = Vec::new();
        while let Some(layer) = self.next() {
            layers.push(layer.nodes().collect());
        }
        layers
    }
}

impl<N, F> Iterator for LayeredBfs<N, F>
where
    N: Copy + Eq + Hash,
    F: FnMut(N, &mut Vec<(N, RelationId)>),
{
    type Item = Layer<N>;

    fn next(&mut self) -> Option<Layer<N>> {
        if self.depth >= self.max_depth || self.frontier.is_empty() {
            return None;
        }

        let current = std::mem::take(&mut self.frontier);
        let mut discoveries = Vec::new();
        for &parent in &current {
            self.scratch.clear();
            (self.expand)(parent, &mut self.scratch);
            self.steps += self.scratch.len() as u64;
            for &(node, relation) in &self.scratch {
                if self.discovered.insert(node) {
                    discoveries.push(Discovery {
                        node,
                        parent,
                        relation,
                    });
                    self.frontier.push(node);
                }
            }
        }
        self.depth += 1;

        if discoveries.is_empty() {
            return None;
        }
        Some(Layer {
            depth: self.depth,
            discoveries,
        })
    }
}
