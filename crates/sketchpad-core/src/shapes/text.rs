//! Text element and text measurement.

use super::{Anchors, ElementId};

/// Font size used to lay out text, in world units.
pub const TEXT_FONT_SIZE: f64 = 24.0;

/// Fixed height of a text box, in world units.
pub const TEXT_LINE_HEIGHT: f64 = 24.0;

/// Measures rendered text width. Provided by the host's text engine.
pub trait TextMeasure {
    /// Width of `text` at [`TEXT_FONT_SIZE`], in world units.
    fn width(&self, text: &str) -> f64;
}

/// Character-count estimate for hosts without a text engine.
#[derive(Debug, Clone, Copy)]
pub struct ApproxTextMeasure {
    /// Average glyph advance as a fraction of the font size.
    pub char_width_factor: f64,
}

impl Default for ApproxTextMeasure {
    fn default() -> Self {
        Self {
            char_width_factor: 0.55,
        }
    }
}

impl TextMeasure for ApproxTextMeasure {
    fn width(&self, text: &str) -> f64 {
        // Widest line wins
        let max_line_len = text
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        max_line_len as f64 * TEXT_FONT_SIZE * self.char_width_factor
    }
}

/// A text annotation whose anchors are its bounding box.
#[derive(Debug, Clone)]
pub struct Text {
    pub(crate) id: ElementId,
    /// Bounding box (top-left `(x1, y1)`).
    pub anchors: Anchors,
    content: String,
}

impl Text {
    /// Create an empty text element.
    pub fn new(id: ElementId, anchors: Anchors) -> Self {
        Self {
            id,
            anchors,
            content: String::new(),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Get the text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Set the text content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_anchors(mut self, anchors: Anchors) -> Self {
        self.anchors = anchors;
        self
    }
}
