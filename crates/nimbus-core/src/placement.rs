//! Free-position solver.
//!
//! When Tab/Enter create a node at a desired offset from an existing one,
//! the slot may already be occupied. The solver probes candidate
//! positions with a placeholder footprint and asks an intersection
//! oracle which nodes overlap, displacing vertically in a zig-zag
//! (down, up, further down, further up …) until a free slot appears.
//! The horizontal coordinate is never altered, so siblings stay in
//! their column.

use crate::geometry::{self, Rect, absolute_position};
use crate::id::ElementId;
use crate::model::{DiagramElement, Position};

/// Probe footprint used for candidate positions — the placeholder box of
/// a freshly created rectangle node.
pub const PROBE_WIDTH: f32 = geometry::DEFAULT_NODE_WIDTH;
pub const PROBE_HEIGHT: f32 = geometry::DEFAULT_NODE_HEIGHT;

/// Upper bound on probe attempts. A dense canvas can in principle occupy
/// every slot the zig-zag visits; past this the solver gives up and
/// returns the last candidate rather than spin forever.
const MAX_TRIES: u32 = 512;

/// Collaborator contract of the graph canvas: which existing nodes does a
/// probe rectangle overlap, given the current layout? The node list is
/// passed through so implementations without their own layout state (the
/// headless [`FootprintOracle`]) can compute it.
pub trait IntersectionOracle {
    fn intersecting(&self, nodes: &[DiagramElement], probe: Rect) -> Vec<ElementId>;
}

/// Headless oracle: AABB overlap against every node's footprint
/// (absolute position plus measured or placeholder size).
#[derive(Debug, Clone, Copy, Default)]
pub struct FootprintOracle;

impl IntersectionOracle for FootprintOracle {
    fn intersecting(&self, nodes: &[DiagramElement], probe: Rect) -> Vec<ElementId> {
        nodes
            .iter()
            .filter(|n| geometry::node_footprint(n, nodes).intersects(&probe))
            .map(|n| n.id)
            .collect()
    }
}

/// Find a non-overlapping position for a new node.
///
/// `base` is relative to `parent` when one is given; the result is
/// converted back to parent-relative coordinates on the way out. Even
/// tries grow the vertical offset and displace downward, odd tries reuse
/// the current offset magnitude and displace upward.
pub fn find_free_position(
    nodes: &[DiagramElement],
    base: Position,
    spacing: f32,
    parent: Option<ElementId>,
    oracle: &impl IntersectionOracle,
) -> Position {
    log::debug!("finding free position around ({}, {})", base.x, base.y);

    let parent_origin = parent
        .and_then(|id| nodes.iter().find(|n| n.id == id))
        .map(|p| absolute_position(p, nodes));

    let base = match parent_origin {
        Some(origin) => base.offset(origin.x, origin.y),
        None => base,
    };

    let mut position = base;
    let mut offset = 0.0;
    let mut tries = 0u32;

    loop {
        let probe = Rect::new(position.x, position.y, PROBE_WIDTH, PROBE_HEIGHT);
        if oracle.intersecting(nodes, probe).is_empty() {
            break;
        }
        if tries >= MAX_TRIES {
            log::warn!(
                "no free slot after {MAX_TRIES} tries, placing at ({}, {})",
                position.x,
                position.y
            );
            break;
        }
        if tries % 2 == 0 {
            offset += spacing;
        }
        position.y = base.y + offset * if tries % 2 == 0 { 1.0 } else { -1.0 };
        log::debug!("occupied, trying ({}, {})", position.x, position.y);
        tries += 1;
    }

    match parent_origin {
        Some(origin) => position.offset(-origin.x, -origin.y),
        None => position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RECTANGLE_SHAPE;
    use pretty_assertions::assert_eq;

    fn node_at(id: &str, x: f32, y: f32) -> DiagramElement {
        DiagramElement::new(
            ElementId::intern(id),
            RECTANGLE_SHAPE,
            Position::new(x, y),
        )
    }

    #[test]
    fn free_base_position_is_returned_unchanged() {
        let nodes = vec![node_at("far", 1000.0, 1000.0)];
        let found =
            find_free_position(&nodes, Position::new(0.0, 0.0), 60.0, None, &FootprintOracle);
        assert_eq!(found, Position::new(0.0, 0.0));
    }

    #[test]
    fn occupied_base_displaces_downward_first() {
        // A node sits exactly on the base slot; one spacing step down is free.
        let nodes = vec![node_at("blocker", 0.0, 0.0)];
        let found =
            find_free_position(&nodes, Position::new(0.0, 0.0), 60.0, None, &FootprintOracle);
        assert_eq!(found, Position::new(0.0, 60.0));
    }

    #[test]
    fn zig_zag_reaches_the_slot_above() {
        // Base and the slot below are taken; the mirrored slot above is free.
        let nodes = vec![node_at("a", 0.0, 0.0), node_at("b", 0.0, 60.0)];
        let found =
            find_free_position(&nodes, Position::new(0.0, 0.0), 60.0, None, &FootprintOracle);
        assert_eq!(found, Position::new(0.0, -60.0));
    }

    #[test]
    fn horizontal_coordinate_never_changes() {
        let nodes: Vec<_> = (0..6).map(|i| node_at(&format!("n{i}"), 240.0, i as f32 * 60.0 - 120.0)).collect();
        let found =
            find_free_position(&nodes, Position::new(240.0, 0.0), 60.0, None, &FootprintOracle);
        assert_eq!(found.x, 240.0);
    }

    #[test]
    fn result_never_intersects_existing_nodes() {
        let nodes: Vec<_> = (0..10)
            .map(|i| node_at(&format!("grid{i}"), 0.0, (i as f32 - 5.0) * 50.0))
            .collect();
        let found =
            find_free_position(&nodes, Position::new(0.0, 0.0), 40.0, None, &FootprintOracle);
        let probe = Rect::new(found.x, found.y, PROBE_WIDTH, PROBE_HEIGHT);
        assert!(FootprintOracle.intersecting(&nodes, probe).is_empty());
    }

    #[test]
    fn parent_relative_base_resolves_and_converts_back() {
        let mut child = node_at("child", 40.0, 0.0);
        child.parent_id = Some(ElementId::intern("base"));
        let nodes = vec![node_at("base", 500.0, 500.0), child];

        // Base (240, 0) relative to "base" lands at absolute (740, 500),
        // which is free, so the relative answer is the base offset itself.
        let found = find_free_position(
            &nodes,
            Position::new(240.0, 0.0),
            60.0,
            Some(ElementId::intern("base")),
            &FootprintOracle,
        );
        assert_eq!(found, Position::new(240.0, 0.0));
    }

    struct AlwaysBlocked;

    impl IntersectionOracle for AlwaysBlocked {
        fn intersecting(&self, _nodes: &[DiagramElement], _probe: Rect) -> Vec<ElementId> {
            vec![ElementId::intern("everywhere")]
        }
    }

    #[test]
    fn pathological_canvas_terminates_at_the_cap() {
        let found =
            find_free_position(&[], Position::new(10.0, 20.0), 60.0, None, &AlwaysBlocked);
        // Still vertical-only, still finite.
        assert_eq!(found.x, 10.0);
    }
}
