pub mod geometry;
pub mod id;
pub mod model;
pub mod placement;
pub mod resources;
pub mod sample;
pub mod storage;

pub use geometry::{Direction, Rect, absolute_position, closest_node_in_direction, tree_depth};
pub use id::ElementId;
pub use model::*;
pub use placement::{FootprintOracle, IntersectionOracle, find_free_position};
pub use storage::{KeyValueStore, MemoryStore};
