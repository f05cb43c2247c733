//! Layered auto-layout
//!
//! Kahn-style layering for pipeline canvases. Each wave of
//! in-degree-zero nodes becomes one layer; targets uncovered while a
//! wave drains form the next one, so every edge points at a strictly
//! deeper layer. Layer and slot positions are then converted into
//! canvas coordinates, with each layer centered as a block.
//!
//! Algorithm steps:
//! 1. Seed layer 0 with in-degree-zero nodes, in insertion order
//! 2. Peel waves: draining a layer decrements its targets, and a target
//!    reaching zero joins the next layer in discovery order
//! 3. Park nodes a cycle kept unreachable in one trailing layer
//! 4. Convert layer/slot grid positions into x/y coordinates
//!
//! The wave loop terminates on any input, cyclic ones included: each
//! kept edge is drained at most once, so waves strictly consume the
//! graph and cycle members simply never reach zero.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::graph::GraphIndex;
use crate::model::{Edge, Node};

pub const DEFAULT_NODE_WIDTH: f64 = 150.0;
pub const DEFAULT_LAYER_HEIGHT: f64 = 100.0;
pub const DEFAULT_CANVAS_WIDTH: f64 = 900.0;

/// Layout configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Horizontal pitch: one slot per node width
    pub node_width: f64,
    /// Vertical pitch between consecutive layers
    pub layer_height: f64,
    /// Canvas width used to center each layer
    pub canvas_width: f64,
    /// X offset applied to every node
    pub origin_x: f64,
    /// Y offset applied to every node
    pub origin_y: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: DEFAULT_NODE_WIDTH,
            layer_height: DEFAULT_LAYER_HEIGHT,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }
}

/// Position of one node in the computed layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Placement {
    /// Layer (vertical rank, 0 = top)
    pub layer: usize,
    /// Slot within the layer (horizontal rank, 0 = leftmost)
    pub slot: usize,
    /// X coordinate on the canvas
    pub x: f64,
    /// Y coordinate on the canvas
    pub y: f64,
}

/// Computed layout with one placement per node
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Placements indexed by node id
    placements: FxHashMap<String, Placement>,
    /// Node ids organized by layer, slot order within each
    layers: Vec<Vec<String>>,
    /// Nodes parked in the trailing layer because a cycle starved them
    unresolved: Vec<String>,
}

impl Layout {
    /// Compute a layout for one snapshot of nodes and edges.
    ///
    /// Total over any input: duplicate ids collapse to their first
    /// occurrence, edges naming a missing node are dropped, and cycle
    /// members land in a trailing layer instead of wedging the loop.
    pub fn compute(nodes: &[Node], edges: &[Edge], config: &LayoutConfig) -> Self {
        let index = GraphIndex::build(nodes, edges);
        if index.is_empty() {
            return Self {
                placements: FxHashMap::default(),
                layers: Vec::new(),
                unresolved: Vec::new(),
            };
        }

        // Step 1: layer 0 is every node nothing points at
        let mut in_degree = index.in_degrees().clone();
        let mut placed: FxHashSet<&str> = FxHashSet::default();
        let mut waves: Vec<Vec<&str>> = Vec::new();
        let mut current: Vec<&str> = index
            .nodes()
            .iter()
            .filter(|node| index.in_degree(&node.id) == 0)
            .map(|node| node.id.as_str())
            .collect();

        // Step 2: drain waves until none forms
        while !current.is_empty() {
            for &id in &current {
                placed.insert(id);
            }
            let mut next: Vec<&str> = Vec::new();
            for &id in &current {
                for &succ in index.outgoing(id) {
                    if let Some(degree) = in_degree.get_mut(succ) {
                        *degree = degree.saturating_sub(1);
                        if *degree == 0 && !placed.contains(succ) {
                            next.push(succ);
                        }
                    }
                }
            }
            waves.push(current);
            current = next;
        }

        // Step 3: one trailing layer for cycle members, insertion order
        let unresolved: Vec<&str> = index
            .nodes()
            .iter()
            .map(|node| node.id.as_str())
            .filter(|id| !placed.contains(id))
            .collect();
        if !unresolved.is_empty() {
            waves.push(unresolved.clone());
        }

        // Step 4: grid to canvas coordinates, each layer centered
        let mut placements: FxHashMap<String, Placement> =
            FxHashMap::with_capacity_and_hasher(index.len(), Default::default());
        let mut layers: Vec<Vec<String>> = Vec::with_capacity(waves.len());

        for (layer, ids) in waves.iter().enumerate() {
            let block_width = ids.len() as f64 * config.node_width;
            let centering = (config.canvas_width - block_width) / 2.0;
            let y = config.origin_y + layer as f64 * config.layer_height;

            let mut row = Vec::with_capacity(ids.len());
            for (slot, &id) in ids.iter().enumerate() {
                let x = config.origin_x + slot as f64 * config.node_width + centering;
                placements.insert(id.to_string(), Placement { layer, slot, x, y });
                row.push(id.to_string());
            }
            layers.push(row);
        }

        Self {
            placements,
            layers,
            unresolved: unresolved.into_iter().map(String::from).collect(),
        }
    }

    /// Placement of a node by id.
    pub fn get(&self, id: &str) -> Option<&Placement> {
        self.placements.get(id)
    }

    /// All placements indexed by node id.
    pub fn placements(&self) -> &FxHashMap<String, Placement> {
        &self.placements
    }

    /// Node ids organized by layer, slot order within each.
    pub fn layers(&self) -> &[Vec<String>] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Nodes in the trailing layer, in insertion order. Non-empty
    /// exactly when the snapshot contains a cycle.
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}
