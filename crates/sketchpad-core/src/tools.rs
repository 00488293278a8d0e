//! Tool selection for the editor.

use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Pan,
    Selection,
    #[default]
    Rectangle,
    Line,
    Pencil,
    Text,
}

impl ToolKind {
    /// All tools in toolbar order.
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Pan,
        ToolKind::Selection,
        ToolKind::Rectangle,
        ToolKind::Line,
        ToolKind::Pencil,
        ToolKind::Text,
    ];

    /// Lowercase name of the tool.
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Pan => "pan",
            ToolKind::Selection => "selection",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Line => "line",
            ToolKind::Pencil => "pencil",
            ToolKind::Text => "text",
        }
    }

    /// Tool bound to a digit key (`"1"` through `"6"`, toolbar order).
    pub fn from_shortcut(key: &str) -> Option<Self> {
        let digit: usize = key.parse().ok()?;
        digit.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// Whether this tool creates elements.
    pub fn is_drawing(&self) -> bool {
        !matches!(self, ToolKind::Pan | ToolKind::Selection)
    }
}
