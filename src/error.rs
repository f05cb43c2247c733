//! Strata Error Types with Error Codes
//!
//! Error code ranges:
//! - STRATA-001-009: Document errors
//! - STRATA-010-019: Node errors
//! - STRATA-020-029: Edge errors
//! - STRATA-090-099: IO/JSON errors
//!
//! Structural problems found by `validate` are not errors; those are
//! reported through `report::ValidationIssue` so a broken pipeline can
//! still be edited, laid out, and saved.

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StrataError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// All error variants are part of the public API.
///
/// Implements both `thiserror::Error` for std error compatibility
/// and `miette::Diagnostic` for fancy terminal error display.
#[derive(Error, Debug, Diagnostic)]
#[diagnostic(url(docsrs))]
pub enum StrataError {
    // ═══════════════════════════════════════════
    // DOCUMENT ERRORS (001-009)
    // ═══════════════════════════════════════════
    #[error("[STRATA-001] Pipeline file not found: {path}")]
    #[diagnostic(code(strata::document_not_found), help("Check the file path exists"))]
    DocumentNotFound { path: String },

    #[error("[STRATA-002] Invalid schema tag: expected '{expected}', got '{actual}'")]
    #[diagnostic(
        code(strata::invalid_schema),
        help("Use 'strata/pipeline@0.1' as the schema tag")
    )]
    InvalidSchema { expected: String, actual: String },

    #[error("[STRATA-003] Unknown output format: '{value}'")]
    UnknownFormat { value: String },

    // ═══════════════════════════════════════════
    // NODE ERRORS (010-019)
    // ═══════════════════════════════════════════
    #[error("[STRATA-010] Node name cannot be blank")]
    BlankNodeName,

    #[error("[STRATA-011] Node '{id}' not found")]
    NodeNotFound { id: String },

    #[error("[STRATA-012] Duplicate node id: '{id}'")]
    DuplicateNodeId { id: String },

    // ═══════════════════════════════════════════
    // EDGE ERRORS (020-029)
    // ═══════════════════════════════════════════
    #[error("[STRATA-020] Node '{id}' cannot connect to itself")]
    #[diagnostic(
        code(strata::self_connection),
        help("Connect the node to a different node")
    )]
    SelfConnection { id: String },

    #[error("[STRATA-021] Nodes '{from}' and '{to}' are already connected")]
    #[diagnostic(
        code(strata::duplicate_connection),
        help("Remove one of the two connections")
    )]
    DuplicateConnection { from: String, to: String },

    #[error("[STRATA-022] Edge '{id}' not found")]
    EdgeNotFound { id: String },

    #[error("[STRATA-023] Edge '{edge_id}' references unknown node '{node_id}'")]
    EdgeEndpointMissing { edge_id: String, node_id: String },

    #[error("[STRATA-024] Duplicate edge id: '{id}'")]
    DuplicateEdgeId { id: String },

    // ═══════════════════════════════════════════
    // IO / JSON ERRORS (090-099)
    // ═══════════════════════════════════════════
    #[error("[STRATA-090] IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("[STRATA-091] JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StrataError {
    /// Get the error code (e.g., "STRATA-001")
    pub fn code(&self) -> &'static str {
        match self {
            // Document errors
            Self::DocumentNotFound { .. } => "STRATA-001",
            Self::InvalidSchema { .. } => "STRATA-002",
            Self::UnknownFormat { .. } => "STRATA-003",
            // Node errors
            Self::BlankNodeName => "STRATA-010",
            Self::NodeNotFound { .. } => "STRATA-011",
            Self::DuplicateNodeId { .. } => "STRATA-012",
            // Edge errors
            Self::SelfConnection { .. } => "STRATA-020",
            Self::DuplicateConnection { .. } => "STRATA-021",
            Self::EdgeNotFound { .. } => "STRATA-022",
            Self::EdgeEndpointMissing { .. } => "STRATA-023",
            Self::DuplicateEdgeId { .. } => "STRATA-024",
            // IO/JSON errors
            Self::Io(_) => "STRATA-090",
            Self::Json(_) => "STRATA-091",
        }
    }
}

impl FixSuggestion for StrataError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            StrataError::DocumentNotFound { .. } => Some("Check the file path exists"),
            StrataError::InvalidSchema { .. } => {
                Some("Use 'strata/pipeline@0.1' as the schema tag")
            }
            StrataError::UnknownFormat { .. } => Some("Use 'text', 'json', or 'compact'"),
            StrataError::BlankNodeName => Some("Give the node a non-empty display name"),
            StrataError::NodeNotFound { .. } => {
                Some("Check the node id against the current pipeline")
            }
            StrataError::DuplicateNodeId { .. } => Some("Use a unique id for every node"),
            StrataError::SelfConnection { .. } => Some("Connect the node to a different node"),
            StrataError::DuplicateConnection { .. } => Some("Remove one of the two connections"),
            StrataError::EdgeNotFound { .. } => {
                Some("Check the edge id against the current pipeline")
            }
            StrataError::EdgeEndpointMissing { .. } => {
                Some("Remove the edge or add the missing node")
            }
            StrataError::DuplicateEdgeId { .. } => Some("Use a unique id for every edge"),
            StrataError::Io(_) => Some("Check file path and permissions"),
            StrataError::Json(_) => Some("Check JSON syntax"),
        }
    }
}
