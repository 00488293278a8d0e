//! Freehand stroke outlines.

use kurbo::{BezPath, Point, Vec2};

/// Default stroke width for freehand outlines, in world units.
pub const FREEHAND_STROKE_SIZE: f64 = 2.0;

/// Segments used to approximate the dot left by a single-point stroke.
const DOT_SEGMENTS: usize = 8;

/// Turn a sampled point sequence into a closed outline of constant width.
///
/// The outline walks the left side of the stroke forward and the right side
/// back, so it can be filled directly. A single point becomes a small polygon.
pub fn tessellate_freehand(points: &[Point], size: f64) -> Vec<Point> {
    let radius = size / 2.0;
    match points {
        [] => Vec::new(),
        [only] => (0..DOT_SEGMENTS)
            .map(|i| {
                let angle = std::f64::consts::TAU * i as f64 / DOT_SEGMENTS as f64;
                *only + Vec2::from_angle(angle) * radius
            })
            .collect(),
        _ => {
            let mut left = Vec::with_capacity(points.len());
            let mut right = Vec::with_capacity(points.len());
            let mut direction = Vec2::new(1.0, 0.0);
            for (i, point) in points.iter().enumerate() {
                let prev = points[i.saturating_sub(1)];
                let next = points[(i + 1).min(points.len() - 1)];
                let heading = next - prev;
                // Keep the last heading through repeated samples
                if heading.hypot() > f64::EPSILON {
                    direction = heading.normalize();
                }
                let normal = direction.turn_90() * radius;
                left.push(*point + normal);
                right.push(*point - normal);
            }
            left.extend(right.into_iter().rev());
            left
        }
    }
}

/// Smooth a closed outline into a fillable path.
///
/// Each outline point becomes the control point of a quadratic segment that
/// ends halfway to the next point.
pub fn outline_to_path(outline: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some(&first) = outline.first() else {
        return path;
    };
    path.move_to(first);
    for (i, point) in outline.iter().enumerate() {
        let next = outline[(i + 1) % outline.len()];
        path.quad_to(*point, point.midpoint(next));
    }
    path.close_path();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{PathEl, Shape};

    #[test]
    fn test_empty_stroke() {
        assert!(tessellate_freehand(&[], FREEHAND_STROKE_SIZE).is_empty());
        assert!(outline_to_path(&[]).elements().is_empty());
    }

    #[test]
    fn test_single_point_dot() {
        let center = Point::new(10.0, 10.0);
        let outline = tessellate_freehand(&[center], 4.0);
        assert_eq!(outline.len(), DOT_SEGMENTS);
        for p in outline {
            assert!((p.distance(center) - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_horizontal_stroke_outline() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(20.0, 0.0)];
        let outline = tessellate_freehand(&points, 2.0);
        assert_eq!(outline.len(), 6);
        // Left side forward at y = +1, right side back at y = -1
        assert!((outline[0].y - 1.0).abs() < 1e-9);
        assert!((outline[2].x - 20.0).abs() < 1e-9);
        assert!((outline[3].y + 1.0).abs() < 1e-9);
        assert!((outline[3].x - 20.0).abs() < 1e-9);
        assert!((outline[5].x).abs() < 1e-9);
    }

    #[test]
    fn test_repeated_samples_keep_width() {
        let points = [Point::new(0.0, 0.0), Point::new(0.0, 10.0), Point::new(0.0, 10.0)];
        let outline = tessellate_freehand(&points, 2.0);
        for p in &outline {
            assert!((p.x.abs() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_outline_path_is_closed_quads() {
        let outline = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let path = outline_to_path(&outline);
        let elements = path.elements();
        assert_eq!(elements.len(), outline.len() + 2);
        assert!(matches!(elements[0], PathEl::MoveTo(_)));
        assert!(matches!(elements[1], PathEl::QuadTo(_, _)));
        assert!(matches!(elements.last(), Some(PathEl::ClosePath)));

        let bbox = path.bounding_box();
        assert!(bbox.x0 >= -f64::EPSILON && bbox.x1 <= 10.0 + f64::EPSILON);
    }
}
