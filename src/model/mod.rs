//! Domain model: nodes, edges, and the editable pipeline document

mod edge;
mod node;
mod pipeline;

pub use edge::Edge;
pub use node::{Node, NodeKind, Point};
pub use pipeline::{Pipeline, SCHEMA_V01};
