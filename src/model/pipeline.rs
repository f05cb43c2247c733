//! Pipeline document - the editor-owned node/edge collection
//!
//! The host editor mutates the graph exclusively through this type, which
//! is what upholds the snapshot invariants the pure core relies on: unique
//! ids, endpoint-valid edges, no self connections, at most one connection
//! per node pair (in either direction), cascade delete of incident edges.
//!
//! Documents serialize as JSON with a `schema` version tag, in the shape
//! the host's JSON panel displays. Node and edge order is insertion order
//! and is preserved across serialization; both core components use it for
//! deterministic tie-breaking.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StrataError};
use crate::layout::{Layout, LayoutConfig};
use crate::report::ValidationReport;

use super::{Edge, Node, NodeKind, Point};

/// Expected schema version for v0.1 pipeline documents
pub const SCHEMA_V01: &str = "strata/pipeline@0.1";

fn default_schema() -> String {
    SCHEMA_V01.to_string()
}

/// An editable pipeline graph document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(default = "default_schema")]
    schema: String,
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
    // Id allocation cursors. Not serialized: allocation skips over ids
    // already present, so a freshly loaded document starts at zero safely.
    #[serde(skip)]
    node_seq: u64,
    #[serde(skip)]
    edge_seq: u64,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Create an empty document at the current schema version.
    pub fn new() -> Self {
        Self {
            schema: default_schema(),
            nodes: Vec::new(),
            edges: Vec::new(),
            node_seq: 0,
            edge_seq: 0,
        }
    }

    /// Build a document from pre-existing parts, enforcing the document
    /// invariants up front.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self> {
        let pipeline = Self {
            schema: default_schema(),
            nodes,
            edges,
            node_seq: 0,
            edge_seq: 0,
        };
        pipeline.check_integrity()?;
        Ok(pipeline)
    }

    /// Parse a JSON document, then check schema version and integrity.
    ///
    /// A missing `schema` field defaults to the current version so that
    /// hand-written `{nodes, edges}` documents load; a present-but-wrong
    /// one is rejected.
    pub fn load_str(json: &str) -> Result<Self> {
        let pipeline: Pipeline = serde_json::from_str(json)?;
        pipeline.validate_schema()?;
        pipeline.check_integrity()?;
        Ok(pipeline)
    }

    /// Pretty JSON, the shape shown in the host's document panel.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    // ═══════════════════════════════════════════════════════════════
    // Editing operations
    // ═══════════════════════════════════════════════════════════════

    /// Add a node with a generated id (`n1`, `n2`, ...).
    ///
    /// The name is trimmed before storage; a name that is blank after
    /// trimming is rejected.
    pub fn add_node(&mut self, name: &str, kind: NodeKind, position: Point) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StrataError::BlankNodeName);
        }
        let id = self.alloc_node_id();
        self.nodes.push(Node {
            id: id.clone(),
            name: name.to_string(),
            kind,
            position,
        });
        Ok(id)
    }

    /// Remove a node. Incident edges go with it.
    pub fn remove_node(&mut self, id: &str) -> Result<Node> {
        let pos = self
            .nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| StrataError::NodeNotFound { id: id.to_string() })?;
        let node = self.nodes.remove(pos);
        self.edges.retain(|e| e.from != id && e.to != id);
        Ok(node)
    }

    /// Connect two distinct existing nodes with a generated edge id
    /// (`e1`, `e2`, ...).
    ///
    /// A connection is unique per node pair regardless of direction:
    /// if `a→b` or `b→a` already exists, the call is rejected.
    pub fn connect(&mut self, from: &str, to: &str) -> Result<String> {
        if from == to {
            return Err(StrataError::SelfConnection {
                id: from.to_string(),
            });
        }
        if self.node(from).is_none() {
            return Err(StrataError::NodeNotFound {
                id: from.to_string(),
            });
        }
        if self.node(to).is_none() {
            return Err(StrataError::NodeNotFound { id: to.to_string() });
        }
        if self.edges.iter().any(|e| e.links(from, to)) {
            return Err(StrataError::DuplicateConnection {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        let id = self.alloc_edge_id();
        self.edges.push(Edge {
            id: id.clone(),
            from: from.to_string(),
            to: to.to_string(),
        });
        Ok(id)
    }

    /// Remove a single edge by id.
    pub fn disconnect(&mut self, edge_id: &str) -> Result<Edge> {
        let pos = self
            .edges
            .iter()
            .position(|e| e.id == edge_id)
            .ok_or_else(|| StrataError::EdgeNotFound {
                id: edge_id.to_string(),
            })?;
        Ok(self.edges.remove(pos))
    }

    /// Move a node. This is the hook the host's drag handler calls.
    pub fn set_position(&mut self, id: &str, position: Point) -> Result<()> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| StrataError::NodeNotFound { id: id.to_string() })?;
        node.position = position;
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════
    // Core delegation
    // ═══════════════════════════════════════════════════════════════

    /// Run the structural validator over the current snapshot.
    pub fn validate(&self) -> ValidationReport {
        crate::validate::validate(&self.nodes, &self.edges)
    }

    /// Compute a layered layout for the current snapshot.
    pub fn compute_layout(&self, config: &LayoutConfig) -> Layout {
        Layout::compute(&self.nodes, &self.edges, config)
    }

    /// Write layout positions back onto the nodes.
    pub fn apply_layout(&mut self, layout: &Layout) {
        for node in &mut self.nodes {
            if let Some(placement) = layout.get(&node.id) {
                node.position = Point::new(placement.x, placement.y);
            }
        }
    }

    /// Content hash of the graph structure.
    ///
    /// Positions are excluded: dragging a node around must not invalidate
    /// a cached validation verdict. Returns a 16-character hex string
    /// (64-bit xxh3).
    pub fn compute_hash(&self) -> String {
        use xxhash_rust::xxh3::xxh3_64;

        let mut hasher_input = String::new();
        hasher_input.push_str(&self.schema);
        hasher_input.push_str(&self.nodes.len().to_string());
        for node in &self.nodes {
            hasher_input.push_str(&node.id);
            hasher_input.push_str(&node.name);
            hasher_input.push_str(node.kind.as_str());
        }
        hasher_input.push_str(&self.edges.len().to_string());
        for edge in &self.edges {
            hasher_input.push_str(&edge.from);
            hasher_input.push_str("->");
            hasher_input.push_str(&edge.to);
        }

        format!("{:016x}", xxh3_64(hasher_input.as_bytes()))
    }

    // ═══════════════════════════════════════════════════════════════
    // Internal
    // ═══════════════════════════════════════════════════════════════

    fn validate_schema(&self) -> Result<()> {
        if self.schema != SCHEMA_V01 {
            return Err(StrataError::InvalidSchema {
                expected: SCHEMA_V01.to_string(),
                actual: self.schema.clone(),
            });
        }
        Ok(())
    }

    /// Enforce the document invariants over arbitrary parsed input.
    /// Reports the first offender; deterministic because node and edge
    /// order is the document order.
    fn check_integrity(&self) -> Result<()> {
        let mut node_ids: FxHashSet<&str> = FxHashSet::default();
        for node in &self.nodes {
            if node.name.trim().is_empty() {
                return Err(StrataError::BlankNodeName);
            }
            if !node_ids.insert(node.id.as_str()) {
                return Err(StrataError::DuplicateNodeId {
                    id: node.id.clone(),
                });
            }
        }

        let mut edge_ids: FxHashSet<&str> = FxHashSet::default();
        let mut connections: FxHashSet<(&str, &str)> = FxHashSet::default();
        for edge in &self.edges {
            if !edge_ids.insert(edge.id.as_str()) {
                return Err(StrataError::DuplicateEdgeId {
                    id: edge.id.clone(),
                });
            }
            if edge.from == edge.to {
                return Err(StrataError::SelfConnection {
                    id: edge.from.clone(),
                });
            }
            for endpoint in [&edge.from, &edge.to] {
                if !node_ids.contains(endpoint.as_str()) {
                    return Err(StrataError::EdgeEndpointMissing {
                        edge_id: edge.id.clone(),
                        node_id: endpoint.clone(),
                    });
                }
            }
            let key = if edge.from <= edge.to {
                (edge.from.as_str(), edge.to.as_str())
            } else {
                (edge.to.as_str(), edge.from.as_str())
            };
            if !connections.insert(key) {
                return Err(StrataError::DuplicateConnection {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                });
            }
        }
        Ok(())
    }

    fn alloc_node_id(&mut self) -> String {
        loop {
            self.node_seq += 1;
            let id = format!("n{}", self.node_seq);
            if !self.nodes.iter().any(|n| n.id == id) {
                return id;
            }
        }
    }

    fn alloc_edge_id(&mut self) -> String {
        loop {
            self.edge_seq += 1;
            let id = format!("e{}", self.edge_seq);
            if !self.edges.iter().any(|e| e.id == id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn three_node_pipeline() -> Pipeline {
        let mut p = Pipeline::new();
        p.add_node("Ingest", NodeKind::Source, Point::default()).unwrap();
        p.add_node("Clean", NodeKind::Transform, Point::default()).unwrap();
        p.add_node("Store", NodeKind::Sink, Point::default()).unwrap();
        p
    }

    // ═══════════════════════════════════════════════════════════════
    // Editing: nodes
    // ═══════════════════════════════════════════════════════════════

    #[test]
    fn add_node_generates_sequential_ids() {
        let mut p = Pipeline::new();
        let a = p.add_node("A", NodeKind::Source, Point::default()).unwrap();
        let b = p.add_node("B", NodeKind::Sink, Point::default()).unwrap();
        assert_eq!(a, "n1");
        assert_eq!(b, "n2");
        assert_eq!(p.nodes().len(), 2);
    }

    #[test]
    fn add_node_rejects_blank_names() {
        let mut p = Pipeline::new();
        let err = p.add_node("   ", NodeKind::Source, Point::default()).unwrap_err();
        assert!(matches!(err, StrataError::BlankNodeName));
        assert!(p.nodes().is_empty());
    }

    #[test]
    fn add_node_trims_names() {
        let mut p = Pipeline::new();
        let id = p.add_node("  Ingest  ", NodeKind::Source, Point::default()).unwrap();
        assert_eq!(p.node(&id).unwrap().name, "Ingest");
    }

    #[test]
    fn generated_ids_skip_existing_ones() {
        let nodes = vec![
            Node::new("n1", "A", NodeKind::Source),
            Node::new("n3", "B", NodeKind::Sink),
        ];
        let mut p = Pipeline::from_parts(nodes, vec![]).unwrap();
        assert_eq!(p.add_node("C", NodeKind::Transform, Point::default()).unwrap(), "n2");
        assert_eq!(p.add_node("D", NodeKind::Transform, Point::default()).unwrap(), "n4");
    }

    #[test]
    fn remove_node_cascades_to_incident_edges() {
        let mut p = three_node_pipeline();
        p.connect("n1", "n2").unwrap();
        p.connect("n2", "n3").unwrap();
        p.connect("n1", "n3").unwrap();

        let removed = p.remove_node("n2").unwrap();
        assert_eq!(removed.name, "Clean");
        assert_eq!(p.nodes().len(), 2);
        // Only the n1→n3 edge survives.
        assert_eq!(p.edges().len(), 1);
        assert!(p.edges()[0].links("n1", "n3"));
    }

    #[test]
    fn remove_node_unknown_id_errors() {
        let mut p = three_node_pipeline();
        let err = p.remove_node("n99").unwrap_err();
        assert!(matches!(err, StrataError::NodeNotFound { .. }));
        assert_eq!(err.code(), "STRATA-011");
    }

    #[test]
    fn set_position_moves_the_node() {
        let mut p = three_node_pipeline();
        p.set_position("n1", Point::new(120.0, 40.0)).unwrap();
        assert_eq!(p.node("n1").unwrap().position, Point::new(120.0, 40.0));
    }

    // ═══════════════════════════════════════════════════════════════
    // Editing: edges
    // ═══════════════════════════════════════════════════════════════

    #[test]
    fn connect_creates_directed_edges() {
        let mut p = three_node_pipeline();
        let e = p.connect("n1", "n2").unwrap();
        assert_eq!(e, "e1");
        assert_eq!(p.edges()[0].from, "n1");
        assert_eq!(p.edges()[0].to, "n2");
    }

    #[test]
    fn connect_rejects_self_connections() {
        let mut p = three_node_pipeline();
        let err = p.connect("n1", "n1").unwrap_err();
        assert!(matches!(err, StrataError::SelfConnection { .. }));
    }

    #[test]
    fn connect_rejects_unknown_endpoints() {
        let mut p = three_node_pipeline();
        assert!(matches!(
            p.connect("n9", "n1").unwrap_err(),
            StrataError::NodeNotFound { .. }
        ));
        assert!(matches!(
            p.connect("n1", "n9").unwrap_err(),
            StrataError::NodeNotFound { .. }
        ));
    }

    #[test]
    fn connect_rejects_duplicate_connections() {
        let mut p = three_node_pipeline();
        p.connect("n1", "n2").unwrap();
        let err = p.connect("n1", "n2").unwrap_err();
        assert!(matches!(err, StrataError::DuplicateConnection { .. }));
    }

    #[test]
    fn connect_rejects_reverse_duplicates() {
        let mut p = three_node_pipeline();
        p.connect("n1", "n2").unwrap();
        // The connection relation is undirected-unique.
        let err = p.connect("n2", "n1").unwrap_err();
        assert!(matches!(err, StrataError::DuplicateConnection { .. }));
    }

    #[test]
    fn disconnect_then_reconnect_is_allowed() {
        let mut p = three_node_pipeline();
        let e = p.connect("n1", "n2").unwrap();
        let removed = p.disconnect(&e).unwrap();
        assert_eq!(removed.id, "e1");
        assert!(p.edges().is_empty());
        assert_eq!(p.connect("n2", "n1").unwrap(), "e2");
    }

    #[test]
    fn disconnect_unknown_edge_errors() {
        let mut p = three_node_pipeline();
        let err = p.disconnect("e7").unwrap_err();
        assert!(matches!(err, StrataError::EdgeNotFound { .. }));
    }

    // ═══════════════════════════════════════════════════════════════
    // Documents
    // ═══════════════════════════════════════════════════════════════

    #[test]
    fn load_str_parses_a_full_document() {
        let json = r#"{
            "schema": "strata/pipeline@0.1",
            "nodes": [
                {"id": "a", "name": "Ingest", "type": "source", "position": {"x": 10.0, "y": 20.0}},
                {"id": "b", "name": "Store", "type": "sink"}
            ],
            "edges": [
                {"id": "e1", "from": "a", "to": "b"}
            ]
        }"#;
        let p = Pipeline::load_str(json).unwrap();
        assert_eq!(p.nodes().len(), 2);
        assert_eq!(p.edges().len(), 1);
        assert_eq!(p.node("a").unwrap().position, Point::new(10.0, 20.0));
    }

    #[test]
    fn load_str_defaults_missing_schema() {
        let p = Pipeline::load_str(r#"{"nodes": [], "edges": []}"#).unwrap();
        assert_eq!(p.schema(), SCHEMA_V01);
    }

    #[test]
    fn load_str_rejects_wrong_schema() {
        let err =
            Pipeline::load_str(r#"{"schema": "strata/pipeline@9.9", "nodes": [], "edges": []}"#)
                .unwrap_err();
        assert!(matches!(err, StrataError::InvalidSchema { .. }));
        assert_eq!(err.code(), "STRATA-002");
    }

    #[test]
    fn load_str_rejects_duplicate_node_ids() {
        let json = r#"{"nodes": [
            {"id": "a", "name": "A", "type": "source"},
            {"id": "a", "name": "B", "type": "sink"}
        ], "edges": []}"#;
        let err = Pipeline::load_str(json).unwrap_err();
        assert!(matches!(err, StrataError::DuplicateNodeId { .. }));
    }

    #[test]
    fn load_str_rejects_duplicate_edge_ids() {
        let json = r#"{"nodes": [
            {"id": "a", "name": "A", "type": "source"},
            {"id": "b", "name": "B", "type": "transform"},
            {"id": "c", "name": "C", "type": "sink"}
        ], "edges": [
            {"id": "e1", "from": "a", "to": "b"},
            {"id": "e1", "from": "b", "to": "c"}
        ]}"#;
        let err = Pipeline::load_str(json).unwrap_err();
        assert!(matches!(err, StrataError::DuplicateEdgeId { id } if id == "e1"));
    }

    #[test]
    fn load_str_rejects_dangling_edges() {
        let json = r#"{"nodes": [
            {"id": "a", "name": "A", "type": "source"}
        ], "edges": [
            {"id": "e1", "from": "a", "to": "ghost"}
        ]}"#;
        let err = Pipeline::load_str(json).unwrap_err();
        assert!(matches!(err, StrataError::EdgeEndpointMissing { .. }));
    }

    #[test]
    fn load_str_rejects_reverse_duplicate_connections() {
        let json = r#"{"nodes": [
            {"id": "a", "name": "A", "type": "source"},
            {"id": "b", "name": "B", "type": "sink"}
        ], "edges": [
            {"id": "e1", "from": "a", "to": "b"},
            {"id": "e2", "from": "b", "to": "a"}
        ]}"#;
        let err = Pipeline::load_str(json).unwrap_err();
        assert!(matches!(err, StrataError::DuplicateConnection { .. }));
    }

    #[test]
    fn load_str_rejects_self_edges() {
        let json = r#"{"nodes": [
            {"id": "a", "name": "A", "type": "source"}
        ], "edges": [
            {"id": "e1", "from": "a", "to": "a"}
        ]}"#;
        let err = Pipeline::load_str(json).unwrap_err();
        assert!(matches!(err, StrataError::SelfConnection { .. }));
    }

    #[test]
    fn to_json_round_trips() {
        let mut p = three_node_pipeline();
        p.connect("n1", "n2").unwrap();
        let json = p.to_json().unwrap();
        let reloaded = Pipeline::load_str(&json).unwrap();
        assert_eq!(reloaded.nodes(), p.nodes());
        assert_eq!(reloaded.edges(), p.edges());
        assert_eq!(reloaded.schema(), SCHEMA_V01);
    }

    // ═══════════════════════════════════════════════════════════════
    // Hashing and delegation
    // ═══════════════════════════════════════════════════════════════

    #[test]
    fn hash_is_stable_for_unchanged_content() {
        let p = three_node_pipeline();
        assert_eq!(p.compute_hash(), p.compute_hash());
        assert_eq!(p.compute_hash().len(), 16);
    }

    #[test]
    fn hash_changes_when_structure_changes() {
        let mut p = three_node_pipeline();
        let before = p.compute_hash();
        p.connect("n1", "n2").unwrap();
        assert_ne!(p.compute_hash(), before);
    }

    #[test]
    fn hash_ignores_positions() {
        let mut p = three_node_pipeline();
        let before = p.compute_hash();
        p.set_position("n1", Point::new(500.0, 500.0)).unwrap();
        assert_eq!(p.compute_hash(), before);
    }

    #[test]
    fn validate_and_layout_run_over_the_document() {
        let mut p = three_node_pipeline();
        p.connect("n1", "n2").unwrap();
        p.connect("n2", "n3").unwrap();

        let report = p.validate();
        assert!(report.is_valid());

        let layout = p.compute_layout(&LayoutConfig::default());
        assert_eq!(layout.len(), 3);
        assert!(layout.unresolved().is_empty());
    }

    #[test]
    fn apply_layout_writes_positions_back() {
        let mut p = three_node_pipeline();
        p.connect("n1", "n2").unwrap();
        p.connect("n2", "n3").unwrap();

        let layout = p.compute_layout(&LayoutConfig::default());
        p.apply_layout(&layout);

        for node in p.nodes() {
            let placement = layout.get(&node.id).unwrap();
            assert_eq!(node.position, Point::new(placement.x, placement.y));
        }
    }
}
