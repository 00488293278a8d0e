//! Hit-testing, anchor normalization and resize math.

use crate::shapes::{Anchors, Element, ElementId, ElementKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Maximum collinearity slack for a point to count as on a segment.
pub const SEGMENT_TOLERANCE: f64 = 5.0;

/// Half-size of the box around an anchor that grabs it as a handle.
pub const HANDLE_BOX: f64 = 20.0;

/// Where a point falls relative to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionTag {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Start,
    End,
    Inside,
}

/// Order in which elements are tested during hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitOrder {
    /// Oldest element first.
    #[default]
    Insertion,
    /// Most recently added element first.
    Topmost,
}

/// Result of a hit-test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub id: ElementId,
    /// Position in the element sequence.
    pub position: usize,
    pub tag: PositionTag,
}

/// Pointer shape hint shown while hovering with the selection tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    Move,
    NwseResize,
    NeswResize,
}

impl CursorHint {
    /// CSS-style cursor name.
    pub fn name(&self) -> &'static str {
        match self {
            CursorHint::Default => "default",
            CursorHint::Move => "move",
            CursorHint::NwseResize => "nwse-resize",
            CursorHint::NeswResize => "nesw-resize",
        }
    }
}

/// Whether `point` lies in the handle box around `anchor`.
pub fn near_point(anchor: Point, point: Point) -> bool {
    (anchor.x - point.x).abs() < HANDLE_BOX && (anchor.y - point.y).abs() < HANDLE_BOX
}

/// Whether `point` lies on the segment `a`-`b`, within `tolerance`.
pub fn on_segment(a: Point, b: Point, point: Point, tolerance: f64) -> bool {
    let slack = a.distance(b) - (a.distance(point) + b.distance(point));
    slack.abs() < tolerance
}

fn within_box(anchors: &Anchors, point: Point) -> bool {
    anchors.x1 <= point.x && point.x <= anchors.x2 && anchors.y1 <= point.y && point.y <= anchors.y2
}

/// Classify `point` against a single element.
pub fn classify(point: Point, element: &Element) -> Option<PositionTag> {
    match element {
        Element::Line(line) => {
            let (start, end) = (line.start(), line.end());
            if on_segment(start, end, point, SEGMENT_TOLERANCE) {
                Some(PositionTag::Inside)
            } else if near_point(start, point) {
                Some(PositionTag::Start)
            } else if near_point(end, point) {
                Some(PositionTag::End)
            } else {
                None
            }
        }
        Element::Rectangle(rect) => {
            let a = rect.anchors;
            if within_box(&a, point) {
                return Some(PositionTag::Inside);
            }
            [
                (Point::new(a.x1, a.y1), PositionTag::TopLeft),
                (Point::new(a.x2, a.y1), PositionTag::TopRight),
                (Point::new(a.x1, a.y2), PositionTag::BottomLeft),
                (Point::new(a.x2, a.y2), PositionTag::BottomRight),
            ]
            .into_iter()
            .find(|(corner, _)| near_point(*corner, point))
            .map(|(_, tag)| tag)
        }
        Element::Freehand(freehand) => freehand
            .points
            .windows(2)
            .any(|pair| on_segment(pair[0], pair[1], point, SEGMENT_TOLERANCE))
            .then_some(PositionTag::Inside),
        Element::Text(text) => within_box(&text.anchors, point).then_some(PositionTag::Inside),
    }
}

/// Find the element under `point`.
pub fn hit_test(point: Point, elements: &[Element], order: HitOrder) -> Option<Hit> {
    let classify_at = |(position, element): (usize, &Element)| {
        classify(point, element).map(|tag| Hit {
            id: element.id(),
            position,
            tag,
        })
    };
    match order {
        HitOrder::Insertion => elements.iter().enumerate().find_map(classify_at),
        HitOrder::Topmost => elements.iter().enumerate().rev().find_map(classify_at),
    }
}

/// Put anchors in canonical order for their kind.
pub fn normalize(kind: ElementKind, anchors: Anchors) -> Anchors {
    let Anchors { x1, y1, x2, y2 } = anchors;
    match kind {
        ElementKind::Rectangle => Anchors::new(x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2)),
        ElementKind::Line => {
            if x1 < x2 || (x1 == x2 && y1 <= y2) {
                anchors
            } else {
                Anchors::new(x2, y2, x1, y1)
            }
        }
        ElementKind::Freehand | ElementKind::Text => anchors,
    }
}

/// Move the anchor(s) addressed by `tag` to `point`.
pub fn resize(tag: Option<PositionTag>, anchors: Anchors, point: Point) -> Anchors {
    let Anchors { x1, y1, x2, y2 } = anchors;
    match tag {
        Some(PositionTag::TopLeft | PositionTag::Start) => Anchors::new(point.x, point.y, x2, y2),
        Some(PositionTag::TopRight) => Anchors::new(x1, point.y, point.x, y2),
        Some(PositionTag::BottomLeft) => Anchors::new(point.x, y1, x2, point.y),
        Some(PositionTag::BottomRight | PositionTag::End) => Anchors::new(x1, y1, point.x, point.y),
        Some(PositionTag::Inside) | None => anchors,
    }
}

/// Hover cursor for a position tag.
pub fn cursor_for(tag: Option<PositionTag>) -> CursorHint {
    match tag {
        Some(PositionTag::TopLeft | PositionTag::BottomRight) => CursorHint::NwseResize,
        Some(PositionTag::TopRight | PositionTag::BottomLeft) => CursorHint::NeswResize,
        Some(PositionTag::Start | PositionTag::End | PositionTag::Inside) => CursorHint::Move,
        None => CursorHint::Default,
    }
}
