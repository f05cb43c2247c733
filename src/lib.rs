//! Strata - graph validation and layered auto-layout for pipeline canvases
//!
//! Both core components are pure: they read one immutable snapshot of
//! nodes and edges, never mutate the document, and recompute from
//! scratch on every call.
//!
//! ## Module Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     DOMAIN MODEL                     │
//! │  model/     Pipeline document (Node, Edge, Pipeline) │
//! └──────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌──────────────────────────────────────────────────────┐
//! │                   CORE COMPONENTS                    │
//! │  validate   Structural checks → ValidationReport     │
//! │  layout     Layered auto-layout → Layout             │
//! └──────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//! ┌──────────────────────────────────────────────────────┐
//! │                   SHARED PLUMBING                    │
//! │  graph      Per-call adjacency index (GraphIndex)    │
//! │  report     Validation issue and report types        │
//! │  error      Error types with fix suggestions         │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Responsibilities
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`model`] | Pipeline document: nodes, edges, JSON (de)serialization |
//! | [`validate`] | Size, connectivity, acyclicity checks over one snapshot |
//! | [`layout`] | Kahn-style wave layering and canvas coordinates |
//! | [`graph`] | Borrowed adjacency index shared by both components |
//! | [`report`] | `ValidationIssue` and `ValidationReport` |
//! | [`error`] | `StrataError` with codes and fix suggestions |

// ═══════════════════════════════════════════════════════════════
// DOMAIN MODEL - Pipeline document
// ═══════════════════════════════════════════════════════════════
pub mod model;

// ═══════════════════════════════════════════════════════════════
// CORE COMPONENTS - Validation and layout
// ═══════════════════════════════════════════════════════════════
pub mod layout;
pub mod validate;

// ═══════════════════════════════════════════════════════════════
// SHARED PLUMBING - Adjacency index, report types
// ═══════════════════════════════════════════════════════════════
pub mod graph;
pub mod report;

// ═══════════════════════════════════════════════════════════════
// CROSS-CUTTING - Error handling
// ═══════════════════════════════════════════════════════════════
pub mod error;

// ═══════════════════════════════════════════════════════════════
// PUBLIC API RE-EXPORTS
// ═══════════════════════════════════════════════════════════════

// Error types
pub use error::{FixSuggestion, Result, StrataError};

// Model types
pub use model::{Edge, Node, NodeKind, Pipeline, Point, SCHEMA_V01};

// Validation
pub use report::{ValidationIssue, ValidationReport};
pub use validate::validate;

// Layout
pub use layout::{Layout, LayoutConfig, Placement};

// Graph index
pub use graph::GraphIndex;
