//! Graph validation
//!
//! Three structural checks over one snapshot, always run in the same
//! order and never short-circuited, so a broken pipeline reports every
//! problem at once:
//! 1. Minimum size - a pipeline needs at least [`MIN_NODES`] nodes
//! 2. Connectivity - every node must touch at least one edge
//! 3. Acyclicity - data must flow one way
//!
//! Edges that name a missing node are dropped by [`GraphIndex`] before
//! any check runs, so they neither connect a node nor form a cycle.

use crate::graph::GraphIndex;
use crate::model::{Edge, Node};
use crate::report::{ValidationIssue, ValidationReport};

/// Smallest pipeline that can do any work: one producer, one consumer.
pub const MIN_NODES: usize = 2;

/// Validate one snapshot of nodes and edges.
pub fn validate(nodes: &[Node], edges: &[Edge]) -> ValidationReport {
    let index = GraphIndex::build(nodes, edges);
    let mut report = ValidationReport::new(nodes.len(), edges.len());

    if let Some(issue) = check_minimum_size(nodes) {
        report.push(issue);
    }
    if let Some(issue) = check_connectivity(&index) {
        report.push(issue);
    }
    if let Some(issue) = check_acyclicity(&index) {
        report.push(issue);
    }

    report
}

fn check_minimum_size(nodes: &[Node]) -> Option<ValidationIssue> {
    if nodes.len() < MIN_NODES {
        return Some(ValidationIssue::TooFewNodes {
            required: MIN_NODES,
            found: nodes.len(),
        });
    }
    None
}

/// One issue naming every unconnected node, not one issue per node.
fn check_connectivity(index: &GraphIndex) -> Option<ValidationIssue> {
    let names: Vec<String> = index
        .nodes()
        .iter()
        .filter(|node| !index.is_linked(&node.id))
        .map(|node| node.name.clone())
        .collect();

    if names.is_empty() {
        return None;
    }
    Some(ValidationIssue::UnconnectedNodes { names })
}

/// At most one cycle issue regardless of how many loops exist.
fn check_acyclicity(index: &GraphIndex) -> Option<ValidationIssue> {
    if index.has_cycle() {
        return Some(ValidationIssue::CycleDetected);
    }
    None
}
