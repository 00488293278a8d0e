//! Rectangle element.

use super::{Anchors, ElementId, Primitive, PrimitiveBuilder};

/// An axis-aligned rectangle spanned by two opposite corners.
#[derive(Debug, Clone)]
pub struct Rectangle {
    pub(crate) id: ElementId,
    /// Opposite corners. Ordered as min/max once the rectangle is normalized.
    pub anchors: Anchors,
    primitive: Primitive,
}

impl Rectangle {
    /// Create a rectangle, building its primitive from the anchors.
    pub fn new(id: ElementId, anchors: Anchors, builder: &dyn PrimitiveBuilder) -> Self {
        let primitive = builder.rectangle(
            anchors.x1,
            anchors.y1,
            anchors.width(),
            anchors.height(),
        );
        Self {
            id,
            anchors,
            primitive,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Render primitive built for the current anchors.
    pub fn primitive(&self) -> &Primitive {
        &self.primitive
    }
}
