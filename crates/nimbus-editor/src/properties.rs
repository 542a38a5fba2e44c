//! Property-panel mutations.
//!
//! The panel edits whatever is currently selected: node payload fields
//! on the selected node, edge attributes on the selected edge. Every
//! setter silently no-ops without a matching selection, so the panel
//! never has to guard.

use crate::state::EditorState;
use nimbus_core::model::{Edge, EdgeMarker, ElementData, ResourceOption, TextPropertiesUpdate};

impl EditorState {
    fn update_selected_data(&mut self, update: impl FnOnce(&mut ElementData)) {
        let Some(id) = self.selected_node_id else {
            return;
        };
        if let Some(node) = self.diagram.node_mut(id) {
            update(&mut node.data);
        }
    }

    fn update_selected_edge(&mut self, update: impl FnOnce(&mut Edge)) {
        let Some(id) = self.selected_edge_id else {
            return;
        };
        if let Some(edge) = self.diagram.edge_mut(id) {
            update(edge);
        }
    }

    // ─── Node payload ────────────────────────────────────────────────────

    pub fn set_node_name(&mut self, name: &str) {
        self.update_selected_data(|data| data.resource_name = Some(name.to_string()));
    }

    pub fn set_node_sku(&mut self, sku: &str) {
        self.update_selected_data(|data| data.sku = Some(sku.to_string()));
    }

    pub fn set_node_description(&mut self, description: &str) {
        self.update_selected_data(|data| data.description = Some(description.to_string()));
    }

    /// Merge a partial text-properties update into the node's current
    /// properties (defaults when it had none).
    pub fn update_text_properties(&mut self, update: TextPropertiesUpdate) {
        self.update_selected_data(|data| {
            let mut props = data.text_properties.unwrap_or_default();
            props.merge(update);
            data.text_properties = Some(props);
        });
    }

    /// Update a resource option by name, or append it. A newly appended
    /// option starts hidden unless `show` says otherwise; an existing
    /// option keeps its visibility when `show` is `None`.
    pub fn set_resource_option(&mut self, name: &str, value: &str, show: Option<bool>) {
        self.update_selected_data(|data| {
            match data.resource_options.iter_mut().find(|o| o.name == name) {
                Some(option) => {
                    option.value = value.to_string();
                    if let Some(show) = show {
                        option.show = show;
                    }
                }
                None => data.resource_options.push(ResourceOption {
                    name: name.to_string(),
                    value: value.to_string(),
                    show: show.unwrap_or(false),
                }),
            }
        });
    }

    // ─── Edge attributes ─────────────────────────────────────────────────

    pub fn set_edge_label(&mut self, label: &str) {
        self.update_selected_edge(|edge| edge.label = Some(label.to_string()));
    }

    pub fn set_edge_animated(&mut self, animated: bool) {
        self.update_selected_edge(|edge| edge.animated = animated);
    }

    /// Reverse the selected edge: source and target swap along with
    /// their handles.
    pub fn switch_edge_direction(&mut self) {
        self.update_selected_edge(|edge| {
            std::mem::swap(&mut edge.source, &mut edge.target);
            std::mem::swap(&mut edge.source_handle, &mut edge.target_handle);
        });
    }

    /// Toggle the arrowheads on the selected edge's ends.
    pub fn set_edge_markers(&mut self, start: bool, end: bool) {
        self.update_selected_edge(|edge| {
            edge.marker_start = start.then(EdgeMarker::arrow_closed);
            edge.marker_end = end.then(EdgeMarker::arrow_closed);
        });
    }
}
