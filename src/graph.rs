//! GraphIndex - per-call adjacency index over a graph snapshot
//!
//! Both core components ask the same questions of a snapshot (outgoing
//! edges, in-degrees, incidence), so one O(N+E) pass answers all of them
//! instead of re-filtering the edge list per query.
//!
//! Performance notes:
//! - Borrowed `&str` keys: the index lives for a single validate/layout
//!   call, so ids are borrowed from the snapshot, never cloned
//! - FxHashMap/FxHashSet for faster non-crypto hashing
//! - SmallVec for stack-allocated small adjacency lists (0-4 edges)
//!
//! Robustness rules live here so both components inherit them: a
//! duplicate node id keeps its first occurrence, and an edge naming a
//! missing endpoint is dropped entirely.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::model::{Edge, Node};

/// Stack-allocated adjacency list: most nodes have 0-4 outgoing edges
pub type AdjVec<'a> = SmallVec<[&'a str; 4]>;

/// Adjacency view over one snapshot of nodes and edges.
pub struct GraphIndex<'a> {
    /// Nodes in insertion order, first occurrence per id
    nodes: Vec<&'a Node>,
    /// node id -> successor ids, in edge-insertion order
    outgoing: FxHashMap<&'a str, AdjVec<'a>>,
    /// node id -> number of kept edges pointing at it
    in_degree: FxHashMap<&'a str, usize>,
    /// node ids that appear as either endpoint of a kept edge
    linked: FxHashSet<&'a str>,
}

impl<'a> GraphIndex<'a> {
    pub fn build(nodes: &'a [Node], edges: &'a [Edge]) -> Self {
        let capacity = nodes.len();
        let mut ordered: Vec<&Node> = Vec::with_capacity(capacity);
        let mut outgoing: FxHashMap<&str, AdjVec> =
            FxHashMap::with_capacity_and_hasher(capacity, Default::default());
        let mut in_degree: FxHashMap<&str, usize> =
            FxHashMap::with_capacity_and_hasher(capacity, Default::default());
        let mut linked: FxHashSet<&str> = FxHashSet::default();

        for node in nodes {
            let id = node.id.as_str();
            // Duplicate ids are a caller bug; first occurrence wins.
            if in_degree.contains_key(id) {
                continue;
            }
            ordered.push(node);
            outgoing.insert(id, AdjVec::new());
            in_degree.insert(id, 0);
        }

        for edge in edges {
            let (from, to) = (edge.from.as_str(), edge.to.as_str());
            // An edge naming an unknown node is treated as absent.
            if !in_degree.contains_key(from) || !in_degree.contains_key(to) {
                continue;
            }
            if let Some(successors) = outgoing.get_mut(from) {
                successors.push(to);
            }
            if let Some(degree) = in_degree.get_mut(to) {
                *degree += 1;
            }
            linked.insert(from);
            linked.insert(to);
        }

        Self {
            nodes: ordered,
            outgoing,
            in_degree,
            linked,
        }
    }

    /// Nodes in insertion order (deduplicated).
    pub fn nodes(&self) -> &[&'a Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.in_degree.contains_key(id)
    }

    /// Successors of a node, in edge-insertion order.
    #[inline]
    pub fn outgoing(&self, id: &str) -> &[&'a str] {
        self.outgoing.get(id).map_or(&[], SmallVec::as_slice)
    }

    #[inline]
    pub fn in_degree(&self, id: &str) -> usize {
        self.in_degree.get(id).copied().unwrap_or(0)
    }

    /// The full in-degree map; layout clones this as its working set.
    pub fn in_degrees(&self) -> &FxHashMap<&'a str, usize> {
        &self.in_degree
    }

    /// Whether the node touches at least one kept edge.
    #[inline]
    pub fn is_linked(&self, id: &str) -> bool {
        self.linked.contains(id)
    }

    /// Detect whether the graph contains any directed cycle.
    ///
    /// Iterative DFS over an explicit frame stack (no recursion-depth
    /// limit on large graphs). Two marker sets: `visited` (ever entered)
    /// and `on_stack` (currently on the DFS path). A node is marked
    /// on-stack before its outgoing edges are scanned, so a self-loop is
    /// its own back-edge. An outgoing edge to an on-stack node signals a
    /// cycle. Roots and successors are taken in insertion order.
    pub fn has_cycle(&self) -> bool {
        let mut visited: FxHashSet<&str> = FxHashSet::default();
        let mut on_stack: FxHashSet<&str> = FxHashSet::default();
        // (node, index of the next outgoing edge to scan)
        let mut stack: Vec<(&str, usize)> = Vec::new();

        for node in &self.nodes {
            let root = node.id.as_str();
            if visited.contains(root) {
                continue;
            }
            visited.insert(root);
            on_stack.insert(root);
            stack.push((root, 0));

            while let Some(frame) = stack.last_mut() {
                let id = frame.0;
                let successors = self.outgoing(id);
                if frame.1 < successors.len() {
                    let next = successors[frame.1];
                    frame.1 += 1;
                    if on_stack.contains(next) {
                        return true;
                    }
                    if visited.insert(next) {
                        on_stack.insert(next);
                        stack.push((next, 0));
                    }
                } else {
                    on_stack.remove(id);
                    stack.pop();
                }
            }
        }

        false
    }
}
