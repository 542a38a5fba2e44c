//! Static registry of resource node types.
//!
//! Each entry names a resource variant the canvas can render and the
//! text properties a freshly created node of that type starts with.
//! The generic idea box is what Tab/Enter produce; the cloud resource
//! entries come from the resource panel.

use crate::model::{TextAlign, TextProperties, VerticalAlign};

/// Resource type of the plain idea box created by Tab/Enter.
pub const GENERIC: &str = "generic";

/// A renderable resource variant.
#[derive(Debug, Clone, Copy)]
pub struct ResourceType {
    pub name: &'static str,
    pub default_text_properties: Option<TextProperties>,
}

const CENTERED: TextProperties = TextProperties {
    text_align: TextAlign::Center,
    vertical_align: VerticalAlign::Middle,
    bold: false,
    italic: false,
    underline: false,
    strikethrough: false,
};

const LABELED: TextProperties = TextProperties {
    text_align: TextAlign::Center,
    vertical_align: VerticalAlign::Bottom,
    bold: false,
    italic: false,
    underline: false,
    strikethrough: false,
};

/// The resource variants known to the editor.
pub const RESOURCE_NODE_TYPES: &[ResourceType] = &[
    ResourceType {
        name: GENERIC,
        default_text_properties: Some(CENTERED),
    },
    ResourceType {
        name: "azure-virtual-machine",
        default_text_properties: Some(LABELED),
    },
    ResourceType {
        name: "azure-storage-account",
        default_text_properties: Some(LABELED),
    },
    ResourceType {
        name: "azure-function-app",
        default_text_properties: Some(LABELED),
    },
];

/// The starting text properties for a resource type, if the registry
/// defines any.
pub fn default_text_properties(resource_type: &str) -> Option<TextProperties> {
    RESOURCE_NODE_TYPES
        .iter()
        .find(|r| r.name == resource_type)
        .and_then(|r| r.default_text_properties)
}
