//! Polygon geometry taken verbatim from the analyzer's vertex list.

use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// A closed polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonGeometry {
    /// Vertices in the order supplied, never simplified.
    pub vertices: Vec<Point>,
    /// Anchor for rotation.
    pub pivot: Point,
}

impl PolygonGeometry {
    pub fn new(vertices: Vec<Point>, pivot: Point) -> Self {
        Self { vertices, pivot }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut iter = self.vertices.iter();
        if let Some(first) = iter.next() {
            path.move_to(*first);
            for p in iter {
                path.line_to(*p);
            }
            path.close_path();
        }
        path
    }

    /// Bounding box of the vertices (degenerate at the pivot when empty).
    pub fn bounds(&self) -> Rect {
        let mut iter = self.vertices.iter();
        match iter.next() {
            Some(first) => iter.fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p)),
            None => Rect::from_points(self.pivot, self.pivot),
        }
    }

    /// Whether `point` is inside the polygon or within `tolerance` of its outline.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        if self.vertices.len() >= 3 && self.to_path().winding(point) != 0 {
            return true;
        }
        let mut ring = self.vertices.clone();
        if let Some(first) = self.vertices.first() {
            ring.push(*first);
        }
        point_to_polyline_dist(point, &ring) <= tolerance
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    point.distance(a + seg * t)
}

/// Minimum distance from a point to a polyline. A single point counts as a
/// zero-length segment.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [only] => point.distance(*only),
        _ => points
            .windows(2)
            .map(|w| point_to_segment_dist(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> PolygonGeometry {
        PolygonGeometry::new(
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ],
            Point::new(5.0, 5.0),
        )
    }

    #[test]
    fn test_path_closes_ring() {
        let path = square().to_path();
        assert_eq!(path.elements().len(), 5);
    }

    #[test]
    fn test_hit_test_inside_and_outline() {
        let poly = square();
        assert!(poly.hit_test(Point::new(5.0, 5.0), 0.0));
        assert!(poly.hit_test(Point::new(11.0, 5.0), 1.5));
        assert!(!poly.hit_test(Point::new(15.0, 5.0), 1.5));
    }

    #[test]
    fn test_bounds() {
        let bounds = square().bounds();
        assert!((bounds.width() - 10.0).abs() < f64::EPSILON);
        assert!((bounds.height() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_segment_distance() {
        let d = point_to_segment_dist(Point::new(5.0, 3.0), Point::ZERO, Point::new(10.0, 0.0));
        assert!((d - 3.0).abs() < 1e-9);
        let d = point_to_segment_dist(Point::new(13.0, 4.0), Point::ZERO, Point::new(10.0, 0.0));
        assert!((d - 5.0).abs() < 1e-9);
    }
}
