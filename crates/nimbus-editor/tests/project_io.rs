//! Project lifecycle: save, restore, reset, and the clipboard snapshot,
//! driven through the editor the way the toolbar and menubar are wired.

use nimbus_core::model::ROOT_NODE_ID;
use nimbus_core::placement::FootprintOracle;
use nimbus_core::sample::starter_diagram;
use nimbus_core::storage::{EDGES_KEY, MemoryStore, NODES_KEY};
use nimbus_core::{ElementId, KeyValueStore};
use nimbus_editor::EditorState;

#[test]
fn save_then_restore_preserves_the_map() {
    let mut state = EditorState::with_diagram(starter_diagram());
    state.select_nodes(&[ElementId::intern(ROOT_NODE_ID)]);
    state.add_child(&FootprintOracle);
    // Commit the inline edit so the flag doesn't muddy the comparison.
    let new_id = state.selected_node_id.unwrap();
    state.diagram.node_mut(new_id).unwrap().data.is_editing = None;

    let mut store = MemoryStore::new();
    state.save(&mut store);

    let mut restored = EditorState::new();
    restored.restore(&store);

    assert_eq!(restored.diagram.nodes.len(), state.diagram.nodes.len());
    assert_eq!(restored.diagram.edges, state.diagram.edges);
    assert_eq!(
        restored.diagram.node(new_id).unwrap().parent_id,
        Some(ElementId::intern(ROOT_NODE_ID))
    );
    // Selection does not survive a wholesale restore.
    assert_eq!(restored.selected_node_id, None);
}

#[test]
fn restore_from_garbage_yields_an_empty_project() {
    let mut store = MemoryStore::new();
    store.set(NODES_KEY, "<html>definitely not json</html>".to_string());
    store.set(EDGES_KEY, "[]".to_string());

    let mut state = EditorState::with_diagram(starter_diagram());
    state.restore(&store);

    assert!(state.diagram.nodes.is_empty());
    assert!(state.diagram.edges.is_empty());
}

#[test]
fn project_json_strips_transient_flags() {
    let mut state = EditorState::with_diagram(starter_diagram());
    state
        .diagram
        .node_mut(ElementId::intern("idea-1"))
        .unwrap()
        .data
        .show_handles = Some(true);

    let json = state.project_json();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let nodes = value["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 3);
    assert!(
        nodes
            .iter()
            .all(|n| n["data"].get("showHandles").is_none()),
        "transient canvas flags must not leak into the export"
    );
    assert_eq!(value["edges"].as_array().unwrap().len(), 2);
}

#[test]
fn new_project_wipes_a_saved_session() {
    let mut state = EditorState::with_diagram(starter_diagram());
    let mut store = MemoryStore::new();
    state.save(&mut store);

    state.new_project();
    assert!(state.diagram.nodes.is_empty());

    // The old snapshot is still in the store and can be brought back.
    state.restore(&store);
    assert_eq!(state.diagram.nodes.len(), 3);
}
