//! Geometry utilities over the flat node list.
//!
//! Positions of parented nodes are stored relative to their parent, so
//! anything spatial (placement probes, arrow-key navigation, side
//! decisions) first resolves nodes to canvas space by walking the
//! `parent_id` chain. The chain is user data and may be broken or even
//! cyclic in a loaded document; every walk carries a visited set and
//! degrades to the offsets accumulated so far.

use crate::id::ElementId;
use crate::model::{DiagramElement, Position};
use std::collections::HashSet;

/// Footprint assumed for nodes that carry no measured size. Matches the
/// placeholder box the canvas renders for a fresh rectangle node.
pub const DEFAULT_NODE_WIDTH: f32 = 100.0;
pub const DEFAULT_NODE_HEIGHT: f32 = 40.0;

// ─── Rectangles ──────────────────────────────────────────────────────────

/// An axis-aligned rectangle in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// AABB overlap test. Touching rectangles do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// The canvas-space footprint of a node: its absolute position plus its
/// measured size, falling back to the default placeholder box.
pub fn node_footprint(node: &DiagramElement, nodes: &[DiagramElement]) -> Rect {
    let pos = absolute_position(node, nodes);
    Rect::new(
        pos.x,
        pos.y,
        node.width.unwrap_or(DEFAULT_NODE_WIDTH),
        node.height.unwrap_or(DEFAULT_NODE_HEIGHT),
    )
}

// ─── Parent-chain walks ──────────────────────────────────────────────────

/// Resolve a node's canvas-space position by accumulating parent offsets
/// up the `parent_id` chain. A parentless node resolves to its stored
/// position. A missing parent ends the walk; a repeated id means the
/// chain is cyclic and also ends it.
pub fn absolute_position(node: &DiagramElement, nodes: &[DiagramElement]) -> Position {
    let mut position = node.position;
    let mut parent_id = node.parent_id;
    let mut visited: HashSet<ElementId> = HashSet::new();
    visited.insert(node.id);

    while let Some(id) = parent_id {
        if !visited.insert(id) {
            log::warn!("cyclic parent chain at {id}, stopping position walk");
            break;
        }
        match nodes.iter().find(|n| n.id == id) {
            Some(parent) => {
                position.x += parent.position.x;
                position.y += parent.position.y;
                parent_id = parent.parent_id;
            }
            None => break,
        }
    }

    position
}

/// Hops from a node to the nearest parentless ancestor: the root is at
/// depth 0, its children at 1, and so on. Broken or cyclic chains count
/// the hops that resolved.
pub fn tree_depth(node: &DiagramElement, nodes: &[DiagramElement]) -> usize {
    let mut depth = 0;
    let mut parent_id = node.parent_id;
    let mut visited: HashSet<ElementId> = HashSet::new();
    visited.insert(node.id);

    while let Some(id) = parent_id {
        if !visited.insert(id) {
            log::warn!("cyclic parent chain at {id}, stopping depth walk");
            break;
        }
        depth += 1;
        parent_id = nodes.iter().find(|n| n.id == id).and_then(|n| n.parent_id);
    }

    depth
}

// ─── Directional search ──────────────────────────────────────────────────

/// A spatial direction for arrow-key navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Whether `delta` (candidate minus origin) lies strictly in this
    /// direction's half-plane.
    fn admits(self, delta: Position) -> bool {
        match self {
            Self::Left => delta.x < 0.0,
            Self::Right => delta.x > 0.0,
            Self::Up => delta.y < 0.0,
            Self::Down => delta.y > 0.0,
        }
    }
}

/// Among all other nodes, the one strictly in `direction` from `from`
/// (by absolute position) with the smallest Euclidean distance. Ties keep
/// the earlier node in the list, so results are stable across calls.
pub fn closest_node_in_direction<'a>(
    from: &DiagramElement,
    nodes: &'a [DiagramElement],
    direction: Direction,
) -> Option<&'a DiagramElement> {
    let origin = absolute_position(from, nodes);

    let mut best: Option<(&DiagramElement, f32)> = None;
    for candidate in nodes.iter().filter(|n| n.id != from.id) {
        let position = absolute_position(candidate, nodes);
        let delta = Position::new(position.x - origin.x, position.y - origin.y);
        if !direction.admits(delta) {
            continue;
        }
        let distance = origin.distance(position);
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((candidate, distance));
        }
    }

    best.map(|(node, _)| node)
}
