//! Directed edges between pipeline nodes
//!
//! An edge carries direction (`from` → `to`), but the underlying
//! connection relation is undirected-unique: a pair of nodes can hold at
//! most one edge between them in either direction.

use serde::{Deserialize, Serialize};

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub from: String,
    pub to: String,
}

impl Edge {
    pub fn new(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    /// True when this edge connects `a` and `b`, in either direction.
    pub fn links(&self, a: &str, b: &str) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}
