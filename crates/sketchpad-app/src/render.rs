//! Renderer that reports draw calls through the log.

use kurbo::{Affine, BezPath, Point, Shape};
use sketchpad_core::shapes::Primitive;
use sketchpad_render::{RenderResult, Renderer, RendererError};

/// Counts draw calls and logs their screen-space bounds.
#[derive(Debug, Default)]
pub struct LogRenderer {
    pub primitives: usize,
    pub outlines: usize,
    pub texts: usize,
}

impl Renderer for LogRenderer {
    fn draw_primitive(&mut self, primitive: &Primitive, transform: Affine) -> RenderResult<()> {
        let path = primitive
            .downcast_ref::<BezPath>()
            .ok_or(RendererError::UnsupportedPrimitive)?;
        log::debug!("primitive at {:?}", transform.transform_rect_bbox(path.bounding_box()));
        self.primitives += 1;
        Ok(())
    }

    fn fill_outline(&mut self, path: &BezPath, transform: Affine) -> RenderResult<()> {
        log::debug!("outline at {:?}", transform.transform_rect_bbox(path.bounding_box()));
        self.outlines += 1;
        Ok(())
    }

    fn fill_text(
        &mut self,
        text: &str,
        origin: Point,
        font_size: f64,
        transform: Affine,
    ) -> RenderResult<()> {
        log::debug!("text {:?} at {:?} ({}px)", text, transform * origin, font_size);
        self.texts += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchpad_core::shapes::{Anchors, Element, ElementKind, PathPrimitives};
    use sketchpad_render::{RenderContext, render_scene};

    #[test]
    fn test_counts_draw_calls() {
        let elements = vec![
            Element::create(ElementKind::Line, Anchors::new(0.0, 0.0, 1.0, 1.0), &PathPrimitives),
            Element::create(ElementKind::Freehand, Anchors::default(), &PathPrimitives),
            Element::create(ElementKind::Text, Anchors::default(), &PathPrimitives),
        ];
        let mut renderer = LogRenderer::default();
        render_scene(&mut renderer, &RenderContext::new(&elements, Affine::IDENTITY)).unwrap();
        assert_eq!(
            (renderer.primitives, renderer.outlines, renderer.texts),
            (1, 1, 1)
        );
    }
}
