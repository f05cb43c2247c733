//! Node types for the pipeline canvas
//!
//! A node is a named, typed box on the canvas. The kind tag is purely
//! descriptive: it never constrains which edges may be drawn and neither
//! the validator nor the layout engine reads it.

use serde::{Deserialize, Serialize};

/// What a node claims to do on the canvas. Descriptive only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Source,
    Transform,
    Sink,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Transform => "transform",
            Self::Sink => "sink",
        }
    }
}

/// Canvas coordinates. Written by the layout engine or the host's drag
/// handler, never by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single pipeline node.
///
/// Ids are opaque unique strings. The display name is guaranteed non-blank
/// for nodes created through [`Pipeline`](crate::model::Pipeline); raw
/// snapshots handed to the core are not trusted to uphold that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub position: Point,
}

impl Node {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            position: Point::default(),
        }
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Point::new(x, y);
        self
    }
}
