//! End-to-end keyboard flows over a realistic mind map: grow the tree
//! with Tab/Enter, walk it with arrows, duplicate with copy/paste, and
//! drive everything through the keymap the way a host UI would.

use nimbus_core::geometry::{Direction, absolute_position};
use nimbus_core::model::ROOT_NODE_ID;
use nimbus_core::placement::FootprintOracle;
use nimbus_core::sample::starter_diagram;
use nimbus_core::ElementId;
use nimbus_editor::{EditorAction, EditorState, Keymap, Notice, apply_action};

fn starter_state() -> EditorState {
    let mut state = EditorState::with_diagram(starter_diagram());
    state.select_nodes(&[ElementId::intern(ROOT_NODE_ID)]);
    state
}

/// Feed a key event through the keymap into the editor.
fn press(state: &mut EditorState, key: &str, cmd: bool) -> Option<Notice> {
    let action = Keymap::resolve(key, cmd, false, false, false)?;
    apply_action(state, action, &FootprintOracle)
}

#[test]
fn growing_a_branch_with_tab() {
    let mut state = starter_state();
    let nodes_before = state.diagram.nodes.len();

    press(&mut state, "Tab", false);

    assert_eq!(state.diagram.nodes.len(), nodes_before + 1);
    let child = state.selected_node().expect("new node is selected");
    assert_eq!(child.parent_id, Some(ElementId::intern(ROOT_NODE_ID)));
    // The starter map has one branch per side; the tie goes right.
    let child_abs = absolute_position(child, &state.diagram.nodes);
    let root_abs = absolute_position(state.diagram.root().unwrap(), &state.diagram.nodes);
    assert!(child_abs.x > root_abs.x);
}

#[test]
fn tab_chain_builds_a_deepening_tree() {
    let mut state = starter_state();

    // Three Tabs in a row: each extends the freshly selected node, but
    // the first child is in inline-edit mode, so later Tabs only fire
    // after the edit is committed.
    press(&mut state, "Tab", false);
    let first = state.selected_node_id.unwrap();

    // Mid-edit Tab is swallowed.
    press(&mut state, "Tab", false);
    assert_eq!(state.selected_node_id, Some(first));

    state
        .diagram
        .node_mut(first)
        .unwrap()
        .data
        .is_editing = None;
    press(&mut state, "Tab", false);
    let second = state.selected_node_id.unwrap();
    assert_ne!(second, first);
    assert_eq!(
        state.diagram.node(second).unwrap().parent_id,
        Some(first),
        "Tab parents to the selected node"
    );

    // Every edge still points at live nodes.
    for edge in &state.diagram.edges {
        assert!(state.diagram.node(edge.source).is_some());
        assert!(state.diagram.node(edge.target).is_some());
    }
}

#[test]
fn enter_adds_a_sibling_not_a_child() {
    let mut state = starter_state();
    state.select_nodes(&[ElementId::intern("idea-1")]);

    press(&mut state, "Enter", false);

    let sibling = state.selected_node().unwrap();
    assert_eq!(
        sibling.parent_id,
        Some(ElementId::intern(ROOT_NODE_ID)),
        "same parent as idea-1"
    );
    let edge = state.diagram.edges.last().unwrap();
    assert_eq!(edge.source, ElementId::intern(ROOT_NODE_ID));
    assert_eq!(edge.target, sibling.id);
}

#[test]
fn arrows_walk_the_starter_map() {
    let mut state = starter_state();

    press(&mut state, "ArrowRight", false);
    assert_eq!(state.selected_node_id, Some(ElementId::intern("idea-1")));

    press(&mut state, "ArrowLeft", false);
    assert_eq!(state.selected_node_id, Some(ElementId::intern(ROOT_NODE_ID)));

    press(&mut state, "ArrowLeft", false);
    assert_eq!(state.selected_node_id, Some(ElementId::intern("idea-2")));
}

#[test]
fn navigation_then_delete_prunes_the_branch() {
    let mut state = starter_state();
    state.select_nodes(&[ElementId::intern("idea-1")]);

    let notice = press(&mut state, "Delete", false);

    assert_eq!(notice, None);
    assert!(state.diagram.node(ElementId::intern("idea-1")).is_none());
    assert!(
        state
            .diagram
            .edges
            .iter()
            .all(|e| e.target != ElementId::intern("idea-1")),
        "the branch edge went with the node"
    );
}

#[test]
fn root_deletion_warns_and_changes_nothing() {
    let mut state = starter_state();
    let diagram_before = state.diagram.clone();

    let notice = press(&mut state, "Delete", false);

    assert!(matches!(notice, Some(Notice::Warning(_))));
    assert_eq!(state.diagram, diagram_before);
}

#[test]
fn copy_paste_twice_cascades_offsets() {
    let mut state = starter_state();
    state.select_nodes(&[ElementId::intern("idea-1"), ElementId::intern("idea-2")]);
    let original_positions: Vec<_> = ["idea-1", "idea-2"]
        .iter()
        .map(|id| state.diagram.node(ElementId::intern(id)).unwrap().position)
        .collect();

    press(&mut state, "c", true).expect("copy reports a notice");
    press(&mut state, "v", true).expect("paste reports a notice");
    press(&mut state, "v", true).expect("paste reports a notice");

    // 3 originals + 2 + 2 clones.
    assert_eq!(state.diagram.nodes.len(), 7);

    let clones: Vec<_> = state.diagram.nodes[3..].iter().collect();
    for (i, clone) in clones[..2].iter().enumerate() {
        assert_eq!(clone.position.x, original_positions[i].x + 20.0);
        assert_eq!(clone.position.y, original_positions[i].y + 20.0);
    }
    for (i, clone) in clones[2..].iter().enumerate() {
        assert_eq!(clone.position.x, original_positions[i].x + 40.0);
        assert_eq!(clone.position.y, original_positions[i].y + 40.0);
    }

    // Fresh ids everywhere, and only the second paste is selected.
    let mut seen = std::collections::HashSet::new();
    for node in &state.diagram.nodes {
        assert!(seen.insert(node.id), "duplicate id {}", node.id);
    }
    assert!(clones[..2].iter().all(|n| !n.selected));
    assert!(clones[2..].iter().all(|n| n.selected));
}

#[test]
fn paste_without_copy_is_silent() {
    let mut state = starter_state();
    assert_eq!(press(&mut state, "v", true), None);
    assert_eq!(state.diagram.nodes.len(), 3);
}

#[test]
fn unbound_keys_do_nothing() {
    let mut state = starter_state();
    let before = state.diagram.clone();
    assert_eq!(press(&mut state, "x", false), None);
    assert_eq!(state.diagram, before);
}

#[test]
fn navigation_works_through_the_action_enum() {
    let mut state = starter_state();
    apply_action(
        &mut state,
        EditorAction::Navigate(Direction::Right),
        &FootprintOracle,
    );
    assert_eq!(state.selected_node_id, Some(ElementId::intern("idea-1")));
}
