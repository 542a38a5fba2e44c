//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `EditorAction`s so the host
//! only forwards raw key events. `ctrl` and `meta` are interchangeable
//! (⌘ on macOS, Ctrl elsewhere).

use crate::state::{EditorState, Notice};
use nimbus_core::geometry::Direction;
use nimbus_core::placement::IntersectionOracle;

/// Actions the keyboard can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    /// Delete the current node selection.
    DeleteSelection,
    /// Move focus to the resource search box (handled by the host UI).
    FocusSearch,
    CopySelection,
    Paste,
    /// Tab: add a child of the selected node.
    AddChild,
    /// Enter: add a sibling under the selected node's parent.
    AddSibling,
    /// Arrow keys: move the selection spatially.
    Navigate(Direction),
}

/// Resolves key events into editor actions.
pub struct Keymap;

impl Keymap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"Tab"`, `"c"`).
    /// Returns `None` for unbound combos.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    ) -> Option<EditorAction> {
        let cmd = ctrl || meta;

        if cmd {
            return match key {
                "c" | "C" => Some(EditorAction::CopySelection),
                "v" | "V" => Some(EditorAction::Paste),
                "f" | "F" => Some(EditorAction::FocusSearch),
                _ => None,
            };
        }

        if shift || alt {
            return None;
        }

        match key {
            "Tab" => Some(EditorAction::AddChild),
            "Enter" => Some(EditorAction::AddSibling),
            "Delete" | "Backspace" => Some(EditorAction::DeleteSelection),
            "ArrowLeft" => Some(EditorAction::Navigate(Direction::Left)),
            "ArrowRight" => Some(EditorAction::Navigate(Direction::Right)),
            "ArrowUp" => Some(EditorAction::Navigate(Direction::Up)),
            "ArrowDown" => Some(EditorAction::Navigate(Direction::Down)),
            _ => None,
        }
    }
}

/// Apply a resolved action to the editor. `FocusSearch` is the host's
/// job (it owns the search box) and passes through untouched.
pub fn apply_action(
    state: &mut EditorState,
    action: EditorAction,
    oracle: &impl IntersectionOracle,
) -> Option<Notice> {
    match action {
        EditorAction::DeleteSelection => state.delete_selection(),
        EditorAction::CopySelection => state.copy_selection(),
        EditorAction::Paste => state.paste(),
        EditorAction::AddChild => {
            state.add_child(oracle);
            None
        }
        EditorAction::AddSibling => {
            state.add_sibling(oracle);
            None
        }
        EditorAction::Navigate(direction) => {
            state.navigate(direction);
            None
        }
        EditorAction::FocusSearch => None,
    }
}
