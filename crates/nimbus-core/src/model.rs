//! Core data model for Nimbus diagrams.
//!
//! A diagram is a flat list of nodes and a flat list of edges — the same
//! shape the graph canvas renders and persists. Parent/child structure is
//! encoded as a `parent_id` back-reference on the node, not as ownership:
//! several nodes may share a parent, and a node's `position` is relative
//! to its parent when `parent_id` is set. Exactly one node (the root) has
//! no parent and anchors depth and side decisions for the mind-map tree.

use crate::id::ElementId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Id of the root idea node in documents created by Nimbus.
pub const ROOT_NODE_ID: &str = "root";

/// Node type tag rendered as a plain rectangle by the canvas.
pub const RECTANGLE_SHAPE: &str = "rectangleShape";

// ─── Geometry primitives ─────────────────────────────────────────────────

/// A 2D position in canvas space (or parent space for parented nodes).
/// Origin top-left, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Euclidean distance to another position.
    pub fn distance(self, other: Self) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

// ─── Text properties ─────────────────────────────────────────────────────

/// Horizontal text alignment inside a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
    Justify,
}

/// Vertical text alignment inside a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Text styling carried by a node and edited from the property panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextProperties {
    pub text_align: TextAlign,
    pub vertical_align: VerticalAlign,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
}

/// A partial update from the property panel. `None` fields are untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextPropertiesUpdate {
    pub text_align: Option<TextAlign>,
    pub vertical_align: Option<VerticalAlign>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strikethrough: Option<bool>,
}

impl TextProperties {
    /// Merge a partial update, overwriting only the fields it sets.
    pub fn merge(&mut self, update: TextPropertiesUpdate) {
        if let Some(v) = update.text_align {
            self.text_align = v;
        }
        if let Some(v) = update.vertical_align {
            self.vertical_align = v;
        }
        if let Some(v) = update.bold {
            self.bold = v;
        }
        if let Some(v) = update.italic {
            self.italic = v;
        }
        if let Some(v) = update.underline {
            self.underline = v;
        }
        if let Some(v) = update.strikethrough {
            self.strikethrough = v;
        }
    }
}

// ─── Node payload ────────────────────────────────────────────────────────

/// A configurable option on a resource node (`{name, value, show}`).
/// Order is user-visible and preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceOption {
    pub name: String,
    pub value: String,
    pub show: bool,
}

/// The typed payload of a diagram node.
///
/// The trailing `Option<bool>` fields are transient UI state owned by the
/// canvas (inline-edit mode, handle hover, resize chrome, selection
/// mirror). They ride along on the node so the canvas can render them,
/// and are stripped before anything is persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementData {
    pub resource_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_properties: Option<TextProperties>,
    #[serde(skip_serializing_if = "SmallVec::is_empty")]
    pub resource_options: SmallVec<[ResourceOption; 4]>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_editing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_handles: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resizing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
}

impl ElementData {
    /// Whether the node is currently in inline-edit mode on the canvas.
    pub fn editing(&self) -> bool {
        self.is_editing.unwrap_or(false)
    }

    /// Drop the transient UI flags (selection mirror, handle hover,
    /// resize chrome) so the payload is fit for storage.
    pub fn without_transient_flags(mut self) -> Self {
        self.show_handles = None;
        self.resizing = None;
        self.selected = None;
        self
    }
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// A placeable diagram entity: a resource box on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramElement {
    pub id: ElementId,
    /// Tag selecting the canvas rendering/behavior variant.
    #[serde(rename = "type")]
    pub element_type: String,
    /// Relative to the parent when `parent_id` is set, canvas space otherwise.
    pub position: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ElementId>,
    pub data: ElementData,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

impl DiagramElement {
    pub fn new(id: ElementId, element_type: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            element_type: element_type.into(),
            position,
            parent_id: None,
            data: ElementData::default(),
            selected: false,
            width: None,
            height: None,
        }
    }
}

// ─── Handles ─────────────────────────────────────────────────────────────

/// Which side of a node a tree edge attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleSide {
    Left,
    Right,
}

impl HandleSide {
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl fmt::Display for HandleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// Whether a handle anchors the source or the target end of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleType {
    Source,
    Target,
}

impl fmt::Display for HandleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Canonical handle id: `{node}-{side}-{source|target}`.
pub fn handle_id(node: ElementId, side: HandleSide, handle_type: HandleType) -> String {
    format!("{node}-{side}-{handle_type}")
}

// ─── Edges ───────────────────────────────────────────────────────────────

/// Arrowhead style understood by the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Arrow,
    ArrowClosed,
}

/// Arrowhead attached to one end of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeMarker {
    #[serde(rename = "type")]
    pub kind: MarkerKind,
    pub width: f32,
    pub height: f32,
}

impl EdgeMarker {
    /// The closed arrowhead used by the property panel's marker toggles.
    pub fn arrow_closed() -> Self {
        Self {
            kind: MarkerKind::ArrowClosed,
            width: 30.0,
            height: 30.0,
        }
    }
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: ElementId,
    pub source: ElementId,
    pub target: ElementId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub animated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_start: Option<EdgeMarker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_end: Option<EdgeMarker>,
    /// Line-type tag selecting how the canvas draws the connection.
    #[serde(rename = "type")]
    pub edge_type: String,
}

impl Edge {
    /// A tree edge from `source` to `target`, leaving `source` on `side`
    /// and entering `target` from the opposite side, as Tab/Enter create
    /// them. Edge ids follow the `e-{source}-{target}` convention.
    pub fn tree(source: ElementId, target: ElementId, side: HandleSide) -> Self {
        Self {
            id: ElementId::intern(&format!("e-{source}-{target}")),
            source,
            target,
            source_handle: Some(handle_id(source, side, HandleType::Source)),
            target_handle: Some(handle_id(target, side.opposite(), HandleType::Target)),
            label: None,
            animated: false,
            marker_start: None,
            marker_end: None,
            edge_type: "default".to_string(),
        }
    }
}

// ─── Connection query ────────────────────────────────────────────────────

/// Collaborator contract: list the connections anchored at a named handle.
/// The canvas provides this for rendered handles; [`Diagram`] implements it
/// over the edge list for headless use.
pub trait ConnectionQuery {
    fn connections(&self, node: ElementId, handle_type: HandleType, handle: &str) -> Vec<&Edge>;
}

// ─── Diagram ─────────────────────────────────────────────────────────────

/// The in-memory node/edge lists — the single source of truth for the
/// editor. Storage and clipboard hold passive snapshots of this.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagram {
    pub nodes: Vec<DiagramElement>,
    pub edges: Vec<Edge>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: ElementId) -> Option<&DiagramElement> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: ElementId) -> Option<&mut DiagramElement> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn edge(&self, id: ElementId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn edge_mut(&mut self, id: ElementId) -> Option<&mut Edge> {
        self.edges.iter_mut().find(|e| e.id == id)
    }

    /// The unique parentless node anchoring the tree, if present.
    pub fn root(&self) -> Option<&DiagramElement> {
        self.nodes.iter().find(|n| n.parent_id.is_none())
    }

    /// Clear the canvas selection flag on every node.
    pub fn deselect_all(&mut self) {
        for node in &mut self.nodes {
            node.selected = false;
        }
    }

    /// Remove the given nodes and their incident edges — the canvas
    /// delete contract (elements plus dependents). Unknown ids are
    /// ignored.
    pub fn remove_nodes(&mut self, ids: &[ElementId]) {
        self.nodes.retain(|n| !ids.contains(&n.id));
        self.edges
            .retain(|e| !ids.contains(&e.source) && !ids.contains(&e.target));
    }
}

impl ConnectionQuery for Diagram {
    fn connections(&self, node: ElementId, handle_type: HandleType, handle: &str) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|e| match handle_type {
                HandleType::Source => {
                    e.source == node && e.source_handle.as_deref() == Some(handle)
                }
                HandleType::Target => {
                    e.target == node && e.target_handle.as_deref() == Some(handle)
                }
            })
            .collect()
    }
}
