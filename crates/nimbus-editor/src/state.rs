//! Editor state.
//!
//! Everything the editor tracks outside the diagram itself — selection,
//! clipboard buffer, paste cascade counter, fullscreen and panel flags —
//! lives in one struct so every handler is an ordinary method and the
//! engine runs headless. Handlers execute synchronously on the caller's
//! thread; each one either completes its mutation or is a no-op per its
//! guards, so observers only ever see whole updates.

use nimbus_core::model::{Diagram, DiagramElement, Edge};
use nimbus_core::storage::{self, KeyValueStore};
use nimbus_core::ElementId;
use smallvec::SmallVec;

/// Advisory feedback from a handler, surfaced to the user as a toast.
/// Never fatal; the session continues regardless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Warning(String),
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success(message.into())
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::Warning(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success(m) | Self::Warning(m) => m,
        }
    }
}

/// The whole editor: diagram plus UI state.
#[derive(Debug, Clone)]
pub struct EditorState {
    pub diagram: Diagram,

    /// Ids of all nodes in the canvas selection.
    pub selected_node_ids: SmallVec<[ElementId; 4]>,
    /// The node shown in the property panel — the most recently
    /// selected one.
    pub selected_node_id: Option<ElementId>,
    pub selected_edge_id: Option<ElementId>,

    /// Clipboard snapshot, captured by value on copy.
    pub(crate) copied_nodes: Vec<DiagramElement>,
    /// How many times the buffer was pasted since the last copy; drives
    /// the diagonal paste cascade.
    pub(crate) paste_count: u32,

    pub fullscreen: bool,
    pub properties_panel_visible: bool,
    pub resource_panel_visible: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    /// An empty project.
    pub fn new() -> Self {
        Self {
            diagram: Diagram::new(),
            selected_node_ids: SmallVec::new(),
            selected_node_id: None,
            selected_edge_id: None,
            copied_nodes: Vec::new(),
            paste_count: 0,
            fullscreen: false,
            properties_panel_visible: true,
            resource_panel_visible: true,
        }
    }

    pub fn with_diagram(diagram: Diagram) -> Self {
        Self {
            diagram,
            ..Self::new()
        }
    }

    pub fn selected_node(&self) -> Option<&DiagramElement> {
        self.selected_node_id.and_then(|id| self.diagram.node(id))
    }

    pub fn selected_edge(&self) -> Option<&Edge> {
        self.selected_edge_id.and_then(|id| self.diagram.edge(id))
    }

    // ─── Selection ───────────────────────────────────────────────────────

    /// Replace the node selection. The property-panel node is the last
    /// id; node `selected` flags are kept in sync.
    pub fn select_nodes(&mut self, ids: &[ElementId]) {
        for node in &mut self.diagram.nodes {
            node.selected = ids.contains(&node.id);
        }
        self.selected_node_ids = ids.iter().copied().collect();
        self.selected_node_id = ids.last().copied();
    }

    /// Select exactly one node.
    pub(crate) fn select_only(&mut self, id: ElementId) {
        self.select_nodes(&[id]);
    }

    pub fn select_edge(&mut self, id: Option<ElementId>) {
        if self.selected_edge_id != id {
            log::info!("selected edge: {id:?}");
            self.selected_edge_id = id;
        }
    }

    fn clear_selection(&mut self) {
        self.diagram.deselect_all();
        self.selected_node_ids.clear();
        self.selected_node_id = None;
        self.selected_edge_id = None;
    }

    // ─── Project operations ──────────────────────────────────────────────

    /// Start over with empty node/edge lists.
    pub fn new_project(&mut self) {
        log::info!("creating new project");
        self.diagram = Diagram::new();
        self.clear_selection();
    }

    /// Persist the diagram to the host's key/value store.
    pub fn save(&self, store: &mut impl KeyValueStore) {
        log::info!("saving diagram to storage");
        storage::save_diagram(&self.diagram, store);
    }

    /// Replace the diagram with whatever the store holds (empty on
    /// malformed data). Selection cannot survive a wholesale swap.
    pub fn restore(&mut self, store: &impl KeyValueStore) {
        log::info!("restoring diagram from storage");
        self.diagram = storage::restore_diagram(store);
        self.clear_selection();
    }

    /// The `{nodes, edges}` snapshot for the system clipboard.
    pub fn project_json(&self) -> String {
        storage::project_json(&self.diagram)
    }

    // ─── UI chrome ───────────────────────────────────────────────────────

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    pub fn toggle_properties_panel(&mut self) {
        self.properties_panel_visible = !self.properties_panel_visible;
    }

    pub fn toggle_resource_panel(&mut self) {
        self.resource_panel_visible = !self.resource_panel_visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_core::model::{Position, RECTANGLE_SHAPE};
    use nimbus_core::sample::starter_diagram;

    fn state_with_nodes(ids: &[&str]) -> EditorState {
        let mut diagram = Diagram::new();
        for id in ids {
            diagram.nodes.push(DiagramElement::new(
                ElementId::intern(id),
                RECTANGLE_SHAPE,
                Position::default(),
            ));
        }
        EditorState::with_diagram(diagram)
    }

    #[test]
    fn select_nodes_tracks_last_as_panel_node() {
        let mut state = state_with_nodes(&["a", "b", "c"]);
        state.select_nodes(&[ElementId::intern("a"), ElementId::intern("c")]);

        assert_eq!(state.selected_node_ids.len(), 2);
        assert_eq!(state.selected_node_id, Some(ElementId::intern("c")));
        assert!(state.diagram.node(ElementId::intern("a")).unwrap().selected);
        assert!(!state.diagram.node(ElementId::intern("b")).unwrap().selected);
    }

    #[test]
    fn empty_selection_clears_panel_node() {
        let mut state = state_with_nodes(&["a"]);
        state.select_nodes(&[ElementId::intern("a")]);
        state.select_nodes(&[]);
        assert_eq!(state.selected_node_id, None);
        assert!(state.selected_node_ids.is_empty());
    }

    #[test]
    fn new_project_clears_everything() {
        let mut state = EditorState::with_diagram(starter_diagram());
        state.select_nodes(&[ElementId::intern("idea-1")]);
        state.new_project();

        assert!(state.diagram.nodes.is_empty());
        assert!(state.diagram.edges.is_empty());
        assert_eq!(state.selected_node_id, None);
    }

    #[test]
    fn panel_toggles_flip() {
        let mut state = EditorState::new();
        assert!(state.properties_panel_visible);
        state.toggle_properties_panel();
        assert!(!state.properties_panel_visible);
        state.toggle_fullscreen();
        assert!(state.fullscreen);
    }
}
