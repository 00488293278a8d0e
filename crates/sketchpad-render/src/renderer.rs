//! Renderer trait abstraction and the render pass.

use crate::freehand::{FREEHAND_STROKE_SIZE, outline_to_path, tessellate_freehand};
use kurbo::{Affine, BezPath, Point};
use sketchpad_core::Editor;
use sketchpad_core::shapes::{Element, ElementId, Primitive, TEXT_FONT_SIZE};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Primitive payload not supported by this renderer")]
    UnsupportedPrimitive,
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// Elements in draw order.
    pub elements: &'a [Element],
    /// World-to-screen transform.
    pub transform: Affine,
    /// Element currently shown in the text overlay (skipped here).
    pub editing_element: Option<ElementId>,
    /// Font size for text, in world units.
    pub font_size: f64,
    /// Width of freehand strokes, in world units.
    pub freehand_size: f64,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(elements: &'a [Element], transform: Affine) -> Self {
        Self {
            elements,
            transform,
            editing_element: None,
            font_size: TEXT_FONT_SIZE,
            freehand_size: FREEHAND_STROKE_SIZE,
        }
    }

    /// Context for the editor's current frame.
    pub fn from_editor(editor: &'a Editor) -> Self {
        Self::new(editor.elements(), editor.camera().transform())
            .with_editing_element(editor.editing_element())
    }

    /// Set the element being edited (will be skipped in the render pass).
    pub fn with_editing_element(mut self, id: Option<ElementId>) -> Self {
        self.editing_element = id;
        self
    }

    pub fn with_freehand_size(mut self, size: f64) -> Self {
        self.freehand_size = size;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Draw a primitive built for a line or rectangle.
    fn draw_primitive(&mut self, primitive: &Primitive, transform: Affine) -> RenderResult<()>;

    /// Fill a closed outline (freehand strokes).
    fn fill_outline(&mut self, path: &BezPath, transform: Affine) -> RenderResult<()>;

    /// Draw text with its top-left corner at `origin`.
    fn fill_text(
        &mut self,
        text: &str,
        origin: Point,
        font_size: f64,
        transform: Affine,
    ) -> RenderResult<()>;
}

/// Draw every element in order. Returns the number of elements drawn.
pub fn render_scene<R: Renderer + ?Sized>(
    renderer: &mut R,
    ctx: &RenderContext<'_>,
) -> RenderResult<usize> {
    let mut drawn = 0;
    for element in ctx.elements {
        if ctx.editing_element == Some(element.id()) {
            continue;
        }
        match element {
            Element::Line(line) => renderer.draw_primitive(line.primitive(), ctx.transform)?,
            Element::Rectangle(rect) => renderer.draw_primitive(rect.primitive(), ctx.transform)?,
            Element::Freehand(stroke) => {
                let outline = tessellate_freehand(&stroke.points, ctx.freehand_size);
                renderer.fill_outline(&outline_to_path(&outline), ctx.transform)?;
            }
            Element::Text(text) => renderer.fill_text(
                text.content(),
                text.anchors.start(),
                ctx.font_size,
                ctx.transform,
            )?,
        }
        drawn += 1;
    }
    log::trace!("Rendered {} of {} elements", drawn, ctx.elements.len());
    Ok(drawn)
}
