//! Freehand stroke element.

use super::{Anchors, ElementId};
use kurbo::{Point, Rect, Vec2};

/// A freehand stroke: an ordered, append-only series of sampled points.
#[derive(Debug, Clone)]
pub struct Freehand {
    pub(crate) id: ElementId,
    /// Sampled points in drawing order.
    pub points: Vec<Point>,
}

impl Freehand {
    /// Start a stroke with a single sampled point.
    pub fn new(id: ElementId, start: Point) -> Self {
        Self {
            id,
            points: vec![start],
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Add a point to the stroke.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the stroke has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Same stroke with its points replaced.
    pub fn with_points(&self, points: Vec<Point>) -> Self {
        Self {
            id: self.id,
            points,
        }
    }

    /// Same stroke shifted by `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        self.with_points(self.points.iter().map(|p| *p + delta).collect())
    }

    /// Bounding box of the sampled points.
    pub fn bounds(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };
        self.points
            .iter()
            .skip(1)
            .fold(Rect::from_points(*first, *first), |acc, p| acc.union_pt(*p))
    }

    /// Anchors derived from the bounding box.
    pub fn anchors(&self) -> Anchors {
        let b = self.bounds();
        Anchors::new(b.x0, b.y0, b.x1, b.y1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_add_points() {
        let mut freehand = Freehand::new(Uuid::new_v4(), Point::new(0.0, 0.0));
        freehand.add_point(Point::new(10.0, 10.0));
        assert_eq!(freehand.len(), 2);
        assert!(!freehand.is_empty());
    }

    #[test]
    fn test_bounds() {
        let mut freehand = Freehand::new(Uuid::new_v4(), Point::new(0.0, 0.0));
        freehand.add_point(Point::new(100.0, 50.0));
        freehand.add_point(Point::new(50.0, 100.0));

        let bounds = freehand.bounds();
        assert!((bounds.x0).abs() < f64::EPSILON);
        assert!((bounds.y0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_translated_keeps_id_and_count() {
        let mut freehand = Freehand::new(Uuid::new_v4(), Point::new(1.0, 1.0));
        freehand.add_point(Point::new(2.0, 3.0));
        let moved = freehand.translated(Vec2::new(3.0, 4.0));
        assert_eq!(moved.id(), freehand.id());
        assert_eq!(moved.points, vec![Point::new(4.0, 5.0), Point::new(5.0, 7.0)]);
    }
}
