//! Line element.

use super::{Anchors, ElementId, Primitive, PrimitiveBuilder};
use kurbo::Point;

/// A straight segment between two anchors.
#[derive(Debug, Clone)]
pub struct Line {
    pub(crate) id: ElementId,
    /// Start `(x1, y1)` and end `(x2, y2)` points.
    pub anchors: Anchors,
    primitive: Primitive,
}

impl Line {
    /// Create a line, building its primitive from the anchors.
    pub fn new(id: ElementId, anchors: Anchors, builder: &dyn PrimitiveBuilder) -> Self {
        let primitive = builder.line(anchors.x1, anchors.y1, anchors.x2, anchors.y2);
        Self {
            id,
            anchors,
            primitive,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn start(&self) -> Point {
        self.anchors.start()
    }

    pub fn end(&self) -> Point {
        self.anchors.end()
    }

    /// Render primitive built for the current anchors.
    pub fn primitive(&self) -> &Primitive {
        &self.primitive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::PathPrimitives;
    use uuid::Uuid;

    #[test]
    fn test_line_creation() {
        let line = Line::new(
            Uuid::new_v4(),
            Anchors::new(0.0, 0.0, 100.0, 50.0),
            &PathPrimitives,
        );
        assert_eq!(line.start(), Point::new(0.0, 0.0));
        assert_eq!(line.end(), Point::new(100.0, 50.0));
        assert!(line.primitive().downcast_ref::<kurbo::BezPath>().is_some());
    }
}
