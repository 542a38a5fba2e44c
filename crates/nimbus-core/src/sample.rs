//! The starter document shown on first launch: a root idea with one
//! branch on each side, so both tree directions are exercised.

use crate::id::ElementId;
use crate::model::{
    Diagram, DiagramElement, Edge, HandleSide, Position, RECTANGLE_SHAPE, ROOT_NODE_ID,
};
use crate::resources::{self, GENERIC};

fn idea(id: &str, position: Position, parent: Option<ElementId>, name: &str) -> DiagramElement {
    let mut node = DiagramElement::new(ElementId::intern(id), RECTANGLE_SHAPE, position);
    node.parent_id = parent;
    node.data.resource_type = GENERIC.to_string();
    node.data.resource_name = Some(name.to_string());
    node.data.text_properties = resources::default_text_properties(GENERIC);
    node
}

/// A small mind map: root at canvas center, one idea to each side.
pub fn starter_diagram() -> Diagram {
    let root_id = ElementId::intern(ROOT_NODE_ID);
    let root = idea(ROOT_NODE_ID, Position::new(400.0, 300.0), None, "Main idea");
    let right = idea("idea-1", Position::new(240.0, 0.0), Some(root_id), "First thought");
    let left = idea("idea-2", Position::new(-240.0, 0.0), Some(root_id), "Second thought");

    let edges = vec![
        Edge::tree(root_id, right.id, HandleSide::Right),
        Edge::tree(root_id, left.id, HandleSide::Left),
    ];

    Diagram {
        nodes: vec![root, right, left],
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::absolute_position;

    #[test]
    fn starter_diagram_is_well_formed() {
        let diagram = starter_diagram();
        assert_eq!(diagram.root().unwrap().id.as_str(), ROOT_NODE_ID);
        for edge in &diagram.edges {
            assert!(diagram.node(edge.source).is_some());
            assert!(diagram.node(edge.target).is_some());
        }
    }

    #[test]
    fn branches_sit_on_opposite_sides_of_root() {
        let diagram = starter_diagram();
        let root = absolute_position(diagram.root().unwrap(), &diagram.nodes);
        let right = absolute_position(
            diagram.node(ElementId::intern("idea-1")).unwrap(),
            &diagram.nodes,
        );
        let left = absolute_position(
            diagram.node(ElementId::intern("idea-2")).unwrap(),
            &diagram.nodes,
        );
        assert!(right.x > root.x);
        assert!(left.x < root.x);
    }
}
