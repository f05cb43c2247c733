//! Validation report types
//!
//! One [`ValidationIssue`] per failed check, collected into a
//! [`ValidationReport`] together with the snapshot counts. Messages are
//! rendered through `Display` so every consumer (CLI, JSON output, host
//! editor) shows the same text.

use thiserror::Error;

/// A single failed validation check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("Pipeline needs at least {required} nodes, found {found}")]
    TooFewNodes { required: usize, found: usize },

    /// Display names of every node without a connection, in the order
    /// the nodes were added.
    #[error("Unconnected nodes: {}", names.join(", "))]
    UnconnectedNodes { names: Vec<String> },

    #[error("Pipeline contains a cycle")]
    CycleDetected,
}

impl ValidationIssue {
    /// A short hint on how to clear the issue.
    pub fn suggestion(&self) -> &'static str {
        match self {
            ValidationIssue::TooFewNodes { .. } => "Add more nodes to the canvas",
            ValidationIssue::UnconnectedNodes { .. } => {
                "Connect the listed nodes or remove them"
            }
            ValidationIssue::CycleDetected => {
                "Remove or reverse a connection to break the loop"
            }
        }
    }
}

/// Outcome of validating one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    node_count: usize,
    edge_count: usize,
    errors: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new(node_count: usize, edge_count: usize) -> Self {
        Self {
            node_count,
            edge_count,
            errors: Vec::new(),
        }
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.errors.push(issue);
    }

    /// A snapshot is valid exactly when no check failed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Issues in check order: size, connectivity, acyclicity.
    pub fn errors(&self) -> &[ValidationIssue] {
        &self.errors
    }

    /// Rendered issue messages, in check order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}
