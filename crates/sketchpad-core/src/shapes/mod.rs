//! Element definitions for the canvas.

mod freehand;
mod line;
mod primitive;
mod rectangle;
mod text;

pub use freehand::Freehand;
pub use line::Line;
pub use primitive::{PathPrimitives, Primitive, PrimitiveBuilder};
pub use rectangle::Rectangle;
pub use text::{ApproxTextMeasure, Text, TextMeasure, TEXT_FONT_SIZE, TEXT_LINE_HEIGHT};

use crate::tools::ToolKind;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Element model errors.
#[derive(Debug, Error)]
pub enum ElementError {
    #[error("Element kind not recognized: {0}")]
    UnrecognizedKind(String),
    #[error("Element not found: {0}")]
    NotFound(ElementId),
    #[error("Element {0} is not a freehand stroke")]
    NotFreehand(ElementId),
}

/// The two geometry-defining points of an element.
///
/// Lines use them as endpoints, rectangles as opposite corners, text as its
/// bounding box. Freehand strokes derive them from their sampled points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Anchors {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Anchors {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build anchors from a start and an end point.
    pub fn from_points(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    /// The `(x1, y1)` anchor.
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// The `(x2, y2)` anchor.
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Signed horizontal extent (`x2 - x1`).
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Signed vertical extent (`y2 - y1`).
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Shift both anchors so that `(x1, y1)` lands on `origin`, keeping the
    /// signed width and height.
    pub fn moved_to(&self, origin: Point) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + self.width(),
            origin.y + self.height(),
        )
    }
}

/// The closed set of element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Line,
    Rectangle,
    Freehand,
    Text,
}

impl ElementKind {
    /// Lowercase name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Line => "line",
            ElementKind::Rectangle => "rectangle",
            ElementKind::Freehand => "freehand",
            ElementKind::Text => "text",
        }
    }

    /// Whether anchors must be put in canonical order once an edit ends.
    pub fn requires_normalization(&self) -> bool {
        matches!(self, ElementKind::Line | ElementKind::Rectangle)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementKind {
    type Err = ElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(ElementKind::Line),
            "rectangle" => Ok(ElementKind::Rectangle),
            "freehand" | "pencil" => Ok(ElementKind::Freehand),
            "text" => Ok(ElementKind::Text),
            other => Err(ElementError::UnrecognizedKind(other.to_string())),
        }
    }
}

impl TryFrom<ToolKind> for ElementKind {
    type Error = ElementError;

    fn try_from(tool: ToolKind) -> Result<Self, Self::Error> {
        match tool {
            ToolKind::Line => Ok(ElementKind::Line),
            ToolKind::Rectangle => Ok(ElementKind::Rectangle),
            ToolKind::Pencil => Ok(ElementKind::Freehand),
            ToolKind::Text => Ok(ElementKind::Text),
            ToolKind::Pan | ToolKind::Selection => {
                Err(ElementError::UnrecognizedKind(tool.name().to_string()))
            }
        }
    }
}

/// A shape on the canvas.
#[derive(Debug, Clone)]
pub enum Element {
    Line(Line),
    Rectangle(Rectangle),
    Freehand(Freehand),
    Text(Text),
}

impl Element {
    /// Create a new element with a fresh identifier.
    ///
    /// Freehand strokes ignore the span and start with a single point at
    /// `(x1, y1)`; text starts with an empty payload.
    pub fn create(kind: ElementKind, anchors: Anchors, builder: &dyn PrimitiveBuilder) -> Self {
        Self::build(Uuid::new_v4(), kind, anchors, builder)
    }

    /// Construct an element of the given kind with an explicit identifier.
    pub fn build(
        id: ElementId,
        kind: ElementKind,
        anchors: Anchors,
        builder: &dyn PrimitiveBuilder,
    ) -> Self {
        match kind {
            ElementKind::Line => Element::Line(Line::new(id, anchors, builder)),
            ElementKind::Rectangle => Element::Rectangle(Rectangle::new(id, anchors, builder)),
            ElementKind::Freehand => Element::Freehand(Freehand::new(id, anchors.start())),
            ElementKind::Text => Element::Text(Text::new(id, anchors)),
        }
    }

    pub fn id(&self) -> ElementId {
        match self {
            Element::Line(e) => e.id,
            Element::Rectangle(e) => e.id,
            Element::Freehand(e) => e.id,
            Element::Text(e) => e.id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Line(_) => ElementKind::Line,
            Element::Rectangle(_) => ElementKind::Rectangle,
            Element::Freehand(_) => ElementKind::Freehand,
            Element::Text(_) => ElementKind::Text,
        }
    }

    /// Current anchors. Freehand strokes report their point bounding box.
    pub fn anchors(&self) -> Anchors {
        match self {
            Element::Line(e) => e.anchors,
            Element::Rectangle(e) => e.anchors,
            Element::Freehand(e) => e.anchors(),
            Element::Text(e) => e.anchors,
        }
    }

    /// Copy of this element placed on new anchors, keeping identity and
    /// payload. Lines and rectangles rebuild their primitive; freehand
    /// strokes are translated by the shift of `(x1, y1)`.
    pub fn with_anchors(&self, anchors: Anchors, builder: &dyn PrimitiveBuilder) -> Self {
        match self {
            Element::Line(e) => Element::Line(Line::new(e.id, anchors, builder)),
            Element::Rectangle(e) => Element::Rectangle(Rectangle::new(e.id, anchors, builder)),
            Element::Freehand(e) => {
                let delta = anchors.start() - e.anchors().start();
                Element::Freehand(e.translated(delta))
            }
            Element::Text(e) => Element::Text(e.clone().with_anchors(anchors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("line".parse::<ElementKind>().unwrap(), ElementKind::Line);
        assert_eq!("pencil".parse::<ElementKind>().unwrap(), ElementKind::Freehand);
        assert!(matches!(
            "ellipse".parse::<ElementKind>(),
            Err(ElementError::UnrecognizedKind(name)) if name == "ellipse"
        ));
    }

    #[test]
    fn test_kind_from_tool() {
        assert_eq!(ElementKind::try_from(ToolKind::Pencil).unwrap(), ElementKind::Freehand);
        assert!(ElementKind::try_from(ToolKind::Pan).is_err());
        assert!(ElementKind::try_from(ToolKind::Selection).is_err());
    }

    #[test]
    fn test_create_freehand_seeds_single_point() {
        let anchors = Anchors::new(5.0, 6.0, 50.0, 60.0);
        let element = Element::create(ElementKind::Freehand, anchors, &PathPrimitives);
        match element {
            Element::Freehand(f) => {
                assert_eq!(f.points, vec![Point::new(5.0, 6.0)]);
            }
            other => panic!("expected freehand, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_create_text_is_empty() {
        let anchors = Anchors::new(1.0, 2.0, 3.0, 4.0);
        let element = Element::create(ElementKind::Text, anchors, &PathPrimitives);
        let Element::Text(text) = element else {
            panic!("expected text");
        };
        assert!(text.content().is_empty());
        assert_eq!(text.anchors, anchors);
    }

    #[test]
    fn test_with_anchors_keeps_identity() {
        let line = Element::create(
            ElementKind::Line,
            Anchors::new(0.0, 0.0, 10.0, 0.0),
            &PathPrimitives,
        );
        let moved = line.with_anchors(Anchors::new(5.0, 5.0, 15.0, 5.0), &PathPrimitives);
        assert_eq!(moved.id(), line.id());
        assert_eq!(moved.anchors(), Anchors::new(5.0, 5.0, 15.0, 5.0));
    }

    #[test]
    fn test_anchors_moved_to_preserves_extent() {
        let anchors = Anchors::new(10.0, 20.0, 4.0, 50.0);
        let moved = anchors.moved_to(Point::new(0.0, 0.0));
        assert_eq!(moved, Anchors::new(0.0, 0.0, -6.0, 30.0));
    }
}
