//! Persistence and clipboard snapshots.
//!
//! The host provides a string key/value store (browser local storage or
//! anything equivalent); the diagram is written as two independent JSON
//! entries, `nodes` and `edges`. Transient UI flags are stripped before
//! serialization. Restore fails closed: an unparseable entry yields an
//! empty diagram rather than a half-loaded one, and edges whose
//! endpoints did not survive are dropped.

use crate::model::{Diagram, DiagramElement, Edge};

pub const NODES_KEY: &str = "nodes";
pub const EDGES_KEY: &str = "edges";

/// Collaborator contract for persistence — a flat string store with the
/// local-storage shape. Writes are fire-and-forget.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// In-memory store for tests and headless embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: std::collections::HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }
}

/// Copy the node list with transient UI flags removed.
pub fn clean_nodes_for_storage(nodes: &[DiagramElement]) -> Vec<DiagramElement> {
    nodes
        .iter()
        .map(|node| {
            let mut cleaned = node.clone();
            cleaned.data = cleaned.data.without_transient_flags();
            cleaned
        })
        .collect()
}

/// Serialize the diagram into the store's `nodes` and `edges` entries.
pub fn save_diagram(diagram: &Diagram, store: &mut impl KeyValueStore) {
    let cleaned = clean_nodes_for_storage(&diagram.nodes);

    // Serialization of these types cannot fail; string maps only.
    if let Ok(nodes) = serde_json::to_string(&cleaned) {
        store.set(NODES_KEY, nodes);
    }
    if let Ok(edges) = serde_json::to_string(&diagram.edges) {
        store.set(EDGES_KEY, edges);
    }
}

/// Restore a diagram from the store. Missing entries load as empty
/// lists; a malformed entry fails the whole restore closed.
pub fn restore_diagram(store: &impl KeyValueStore) -> Diagram {
    let nodes: Vec<DiagramElement> = match store.get(NODES_KEY) {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(nodes) => nodes,
            Err(err) => {
                log::warn!("stored nodes are malformed ({err}), restoring empty diagram");
                return Diagram::new();
            }
        },
        None => Vec::new(),
    };

    let edges: Vec<Edge> = match store.get(EDGES_KEY) {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(edges) => edges,
            Err(err) => {
                log::warn!("stored edges are malformed ({err}), restoring empty diagram");
                return Diagram::new();
            }
        },
        None => Vec::new(),
    };

    let mut diagram = Diagram { nodes, edges };
    drop_dangling_edges(&mut diagram);
    diagram
}

/// Enforce the edge-endpoint invariant on loaded data.
fn drop_dangling_edges(diagram: &mut Diagram) {
    let before = diagram.edges.len();
    let nodes = &diagram.nodes;
    diagram.edges.retain(|e| {
        nodes.iter().any(|n| n.id == e.source) && nodes.iter().any(|n| n.id == e.target)
    });
    let dropped = before - diagram.edges.len();
    if dropped > 0 {
        log::warn!("dropped {dropped} edges with missing endpoints");
    }
}

/// The clipboard export: one JSON object `{nodes, edges}` with the same
/// node-cleaning rule applied, pretty-printed for pasting elsewhere.
pub fn project_json(diagram: &Diagram) -> String {
    #[derive(serde::Serialize)]
    struct Project<'a> {
        nodes: Vec<DiagramElement>,
        edges: &'a [Edge],
    }

    let project = Project {
        nodes: clean_nodes_for_storage(&diagram.nodes),
        edges: &diagram.edges,
    };
    serde_json::to_string_pretty(&project).unwrap_or_else(|_| "{}".to_string())
}
