//! Editor configuration.

use crate::camera::{MAX_ZOOM, MIN_ZOOM};
use crate::geometry::HitOrder;
use crate::shapes::TEXT_LINE_HEIGHT;
use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};

/// Viewport dimensions in screen units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Tunables for an [`Editor`](crate::Editor) session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Tool active when the session starts.
    pub default_tool: ToolKind,
    /// Element order for hit-testing.
    pub hit_order: HitOrder,
    /// Maximum undo snapshots; `None` keeps everything.
    pub history_limit: Option<usize>,
    /// Zoom bounds, clamped into `[MIN_ZOOM, MAX_ZOOM]` by the camera.
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub viewport: ViewportConfig,
    /// Height of committed text boxes, in world units.
    pub text_line_height: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_tool: ToolKind::default(),
            hit_order: HitOrder::default(),
            history_limit: None,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            viewport: ViewportConfig::default(),
            text_line_height: TEXT_LINE_HEIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{ "default_tool": "pencil", "hit_order": "topmost" }"#).unwrap();
        assert_eq!(config.default_tool, ToolKind::Pencil);
        assert_eq!(config.hit_order, HitOrder::Topmost);
        assert_eq!(config.history_limit, None);
        assert!((config.max_zoom - 20.0).abs() < f64::EPSILON);
        assert!((config.text_line_height - 24.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: EditorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
    }
}
