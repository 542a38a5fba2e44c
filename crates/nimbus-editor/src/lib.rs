pub mod commands;
pub mod keymap;
pub mod properties;
pub mod state;

pub use keymap::{EditorAction, Keymap, apply_action};
pub use state::{EditorState, Notice};
