//! The mind-map mutation engine.
//!
//! Keyboard commands over the current selection: Tab grows the tree with
//! a child of the selected node, Enter adds a sibling under the same
//! parent, arrows move the selection spatially, Delete removes nodes
//! (never the root, never a bare edge), and copy/paste clones the
//! selection with a cascading offset.
//!
//! Side selection keeps the map balanced: extending the root prefers the
//! side with fewer connections (ties go right), any other node extends
//! away from the root on its own side.

use crate::state::{EditorState, Notice};
use nimbus_core::geometry::{Direction, absolute_position, closest_node_in_direction, tree_depth};
use nimbus_core::model::{
    ConnectionQuery, DiagramElement, Edge, HandleSide, HandleType, Position, RECTANGLE_SHAPE,
    ROOT_NODE_ID, handle_id,
};
use nimbus_core::placement::{IntersectionOracle, find_free_position};
use nimbus_core::resources::{self, GENERIC};
use nimbus_core::ElementId;
use smallvec::SmallVec;

/// Horizontal distance between a node and the branch Tab/Enter create.
const BRANCH_OFFSET_X: f32 = 240.0;
/// Vertical offset of an Enter sibling from its reference slot.
const SIBLING_OFFSET_Y: f32 = 60.0;
/// Vertical probe spacing for Enter, independent of depth.
const SIBLING_SPACING: f32 = 60.0;
/// Diagonal step applied per paste of the same buffer.
const PASTE_STEP: f32 = 20.0;

/// Vertical probe spacing for Tab: tighter as the tree deepens.
fn branch_spacing(depth: usize) -> f32 {
    match depth {
        0 => 100.0,
        1 => 60.0,
        2 => 40.0,
        _ => 20.0,
    }
}

/// A fresh generic idea box, born selected and in inline-edit mode.
fn new_idea_node(position: Position, parent: Option<ElementId>) -> DiagramElement {
    let mut node = DiagramElement::new(ElementId::fresh(), RECTANGLE_SHAPE, position);
    node.parent_id = parent;
    node.selected = true;
    node.data.resource_type = GENERIC.to_string();
    node.data.description = Some(String::new());
    node.data.text_properties = resources::default_text_properties(GENERIC);
    node.data.is_editing = Some(true);
    node
}

impl EditorState {
    /// Tab: add a child of the selected node, extending the tree
    /// sideways. No-op while nothing is selected, while the selection is
    /// mid-inline-edit, or when the document has no root anchor.
    pub fn add_child(&mut self, oracle: &impl IntersectionOracle) {
        let Some(selected_id) = self.selected_node_id else {
            return;
        };
        let Some(selected) = self.diagram.node(selected_id).cloned() else {
            return;
        };
        if selected.data.editing() {
            return;
        }
        let root_id = ElementId::intern(ROOT_NODE_ID);
        let Some(root) = self.diagram.node(root_id).cloned() else {
            return;
        };

        let selected_abs = absolute_position(&selected, &self.diagram.nodes);
        let depth = tree_depth(&selected, &self.diagram.nodes);
        log::debug!("adding child of {selected_id} at depth {depth}");

        let side = if selected.id == root.id {
            // Balance the root: the side with fewer connections wins,
            // ties go right.
            let left = self
                .diagram
                .connections(
                    root_id,
                    HandleType::Source,
                    &handle_id(root_id, HandleSide::Left, HandleType::Source),
                )
                .len();
            let right = self
                .diagram
                .connections(
                    root_id,
                    HandleType::Source,
                    &handle_id(root_id, HandleSide::Right, HandleType::Source),
                )
                .len();
            log::debug!("root connections: left={left}, right={right}");
            if left >= right {
                HandleSide::Right
            } else {
                HandleSide::Left
            }
        } else if selected_abs.x > root.position.x {
            HandleSide::Right
        } else {
            HandleSide::Left
        };

        let base = Position::new(
            match side {
                HandleSide::Right => BRANCH_OFFSET_X,
                HandleSide::Left => -BRANCH_OFFSET_X,
            },
            0.0,
        );
        let position = find_free_position(
            &self.diagram.nodes,
            base,
            branch_spacing(depth),
            Some(selected_id),
            oracle,
        );

        let node = new_idea_node(position, Some(selected_id));
        let new_id = node.id;
        let edge = Edge::tree(selected_id, new_id, side);

        self.diagram.deselect_all();
        self.diagram.nodes.push(node);
        self.diagram.edges.push(edge);
        self.select_only(new_id);
    }

    /// Enter: add a sibling of the selected node under the same parent.
    /// The sibling lands above the reference slot when the selected node
    /// sits below the root, below it otherwise. No-op on the root, on an
    /// empty selection, or mid-inline-edit.
    pub fn add_sibling(&mut self, oracle: &impl IntersectionOracle) {
        let Some(selected_id) = self.selected_node_id else {
            return;
        };
        let Some(selected) = self.diagram.node(selected_id).cloned() else {
            return;
        };
        if selected.data.editing() {
            return;
        }
        let Some(root) = self.diagram.root().cloned() else {
            return;
        };
        if selected.id == root.id {
            return;
        }

        let parent_id = selected.parent_id;
        let selected_abs = absolute_position(&selected, &self.diagram.nodes);
        let above = selected_abs.y > root.position.y;
        let side = if selected_abs.x > root.position.x {
            HandleSide::Right
        } else {
            HandleSide::Left
        };
        log::debug!(
            "adding sibling of {selected_id} on the {side}, {}",
            if above { "above" } else { "below" }
        );

        let base = Position::new(
            match side {
                HandleSide::Right => BRANCH_OFFSET_X,
                HandleSide::Left => -BRANCH_OFFSET_X,
            },
            if above {
                -SIBLING_OFFSET_Y
            } else {
                SIBLING_OFFSET_Y
            },
        );
        let position =
            find_free_position(&self.diagram.nodes, base, SIBLING_SPACING, parent_id, oracle);

        let node = new_idea_node(position, parent_id);
        let new_id = node.id;

        self.diagram.deselect_all();
        self.diagram.nodes.push(node);
        // A parentless sibling gets no edge — there is nothing to hang
        // it from.
        if let Some(parent_id) = parent_id {
            self.diagram.edges.push(Edge::tree(parent_id, new_id, side));
        }
        self.select_only(new_id);
    }

    /// Arrow keys: move the selection to the geometrically closest node
    /// in the pressed direction, if any.
    pub fn navigate(&mut self, direction: Direction) {
        let Some(selected_id) = self.selected_node_id else {
            return;
        };
        let found = {
            let Some(selected) = self.diagram.node(selected_id) else {
                return;
            };
            closest_node_in_direction(selected, &self.diagram.nodes, direction).map(|n| n.id)
        };
        if let Some(found_id) = found {
            self.select_only(found_id);
        }
    }

    /// Delete the node selection along with incident edges. The root is
    /// undeletable, and edges cannot be deleted on their own.
    pub fn delete_selection(&mut self) -> Option<Notice> {
        if !self.selected_node_ids.is_empty() {
            let root_id = ElementId::intern(ROOT_NODE_ID);
            if self.selected_node_ids.contains(&root_id) {
                return Some(Notice::warning("Cannot delete the root idea node"));
            }

            log::info!("deleting nodes {:?}", self.selected_node_ids);
            let ids: Vec<ElementId> = self.selected_node_ids.iter().copied().collect();
            self.diagram.remove_nodes(&ids);
            self.selected_node_ids.clear();
            self.selected_node_id = None;
            None
        } else if self.selected_edge_id.is_some() {
            Some(Notice::warning(
                "Relations cannot be deleted on their own. Delete the node instead.",
            ))
        } else {
            None
        }
    }

    /// Copy the canvas selection into the clipboard buffer by value and
    /// restart the paste cascade.
    pub fn copy_selection(&mut self) -> Option<Notice> {
        let selected: Vec<DiagramElement> = self
            .diagram
            .nodes
            .iter()
            .filter(|n| n.selected)
            .cloned()
            .collect();
        if selected.is_empty() {
            return None;
        }

        let count = selected.len();
        self.copied_nodes = selected;
        self.paste_count = 0;
        Some(Notice::success(format!(
            "Copied {count} node{}",
            if count > 1 { "s" } else { "" }
        )))
    }

    /// Paste the buffered nodes as fresh clones, offset diagonally a
    /// step further on every repeat so pastes never stack.
    pub fn paste(&mut self) -> Option<Notice> {
        if self.copied_nodes.is_empty() {
            return None;
        }

        self.diagram.deselect_all();

        let step = PASTE_STEP * (self.paste_count + 1) as f32;
        let clones: Vec<DiagramElement> = self
            .copied_nodes
            .iter()
            .map(|node| {
                let mut clone = node.clone();
                clone.id = ElementId::fresh();
                clone.position = node.position.offset(step, step);
                clone.selected = true;
                clone
            })
            .collect();

        let ids: SmallVec<[ElementId; 4]> = clones.iter().map(|n| n.id).collect();
        let count = clones.len();
        self.diagram.nodes.extend(clones);
        self.paste_count += 1;
        self.selected_node_id = ids.last().copied();
        self.selected_node_ids = ids;

        Some(Notice::success(format!(
            "Pasted {count} node{}",
            if count > 1 { "s" } else { "" }
        )))
    }
}
