//! Ellipse geometry reconstructed from conjugate diameter points.

use kurbo::{Affine, BezPath, Ellipse as KurboEllipse, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};

/// A possibly rotated ellipse.
///
/// Placement treats the ellipse as a `width` x `height` box anchored at its
/// top-left corner, rotated about its own center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EllipseGeometry {
    /// Center point.
    pub center: Point,
    /// Full width (major diameter before rotation).
    pub width: f64,
    /// Full height.
    pub height: f64,
    /// Rotation in radians.
    pub rotation: f64,
}

impl EllipseGeometry {
    pub fn new(center: Point, width: f64, height: f64, rotation: f64) -> Self {
        Self {
            center,
            width,
            height,
            rotation,
        }
    }

    /// A circle of the given diameter.
    pub fn circle(center: Point, diameter: f64) -> Self {
        Self::new(center, diameter, diameter, 0.0)
    }

    pub fn rotation_degrees(&self) -> f64 {
        self.rotation.to_degrees()
    }

    /// Top-left of the unrotated bounding box.
    pub fn origin(&self) -> Point {
        self.center - Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Maps the local box `(0, 0)..(width, height)` into canvas space.
    pub fn placement(&self) -> Affine {
        Affine::translate(self.origin().to_vec2()) * Affine::rotate_about(self.rotation, self.local_center())
    }

    /// Center of the local box.
    pub fn local_center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn as_kurbo(&self) -> KurboEllipse {
        KurboEllipse::new(self.center, (self.width / 2.0, self.height / 2.0), self.rotation)
    }

    /// Outline in the local box, before placement.
    pub fn local_path(&self) -> BezPath {
        KurboEllipse::new(self.local_center(), (self.width / 2.0, self.height / 2.0), 0.0).to_path(0.1)
    }

    pub fn bounds(&self) -> Rect {
        self.as_kurbo().bounding_box()
    }

    pub fn is_degenerate(&self) -> bool {
        self.width < f64::EPSILON || self.height < f64::EPSILON
    }

    /// Whether a point of the local box lies inside the ellipse grown by
    /// `tolerance`.
    pub fn local_hit_test(&self, point: Point, tolerance: f64) -> bool {
        let rx = self.width / 2.0 + tolerance;
        let ry = self.height / 2.0 + tolerance;
        if rx < f64::EPSILON || ry < f64::EPSILON {
            return false;
        }
        let center = self.local_center();
        let dx = (point.x - center.x) / rx;
        let dy = (point.y - center.y) / ry;
        dx * dx + dy * dy <= 1.0
    }
}
