//! Opaque render primitives owned by lines and rectangles.

use kurbo::{BezPath, Line as KurboLine, Rect, Shape as KurboShape};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Opaque handle to a drawable built by the renderer.
///
/// The payload type is chosen by the [`PrimitiveBuilder`] and is only
/// meaningful to the renderer that consumes it. Cloning shares the payload,
/// so history snapshots stay cheap.
#[derive(Clone)]
pub struct Primitive(Arc<dyn Any + Send + Sync>);

impl Primitive {
    /// Wrap a renderer-specific payload.
    pub fn new<T: Any + Send + Sync>(payload: T) -> Self {
        Self(Arc::new(payload))
    }

    /// Borrow the payload if it has the expected type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.0).downcast_ref::<T>()
    }
}

impl fmt::Debug for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Primitive(..)")
    }
}

/// Builds render primitives for anchored shapes.
pub trait PrimitiveBuilder {
    /// Primitive for a segment from `(x1, y1)` to `(x2, y2)`.
    fn line(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> Primitive;

    /// Primitive for a rectangle at `(x, y)`; width and height may be negative
    /// while the shape is still being drawn.
    fn rectangle(&self, x: f64, y: f64, width: f64, height: f64) -> Primitive;
}

/// Builds plain vector paths (`kurbo::BezPath`) as primitives.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathPrimitives;

/// Flattening tolerance used when converting shapes to paths.
const PATH_TOLERANCE: f64 = 0.1;

impl PrimitiveBuilder for PathPrimitives {
    fn line(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> Primitive {
        let path: BezPath = KurboLine::new((x1, y1), (x2, y2)).to_path(PATH_TOLERANCE);
        Primitive::new(path)
    }

    fn rectangle(&self, x: f64, y: f64, width: f64, height: f64) -> Primitive {
        let rect = Rect::from_points((x, y), (x + width, y + height));
        Primitive::new(rect.to_path(PATH_TOLERANCE))
    }
}
