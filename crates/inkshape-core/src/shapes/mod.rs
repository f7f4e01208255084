//! Shapes placed on the scene.

mod ellipse;
mod polygon;

pub use ellipse::EllipseGeometry;
pub use polygon::{PolygonGeometry, point_to_polyline_dist, point_to_segment_dist};

use kurbo::{Affine, BezPath, Point, Rect};
use peniko::Color;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Two-stop linear gradient used to fill recognized shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientFill {
    pub start: SerializableColor,
    pub end: SerializableColor,
    /// Gradient direction in degrees.
    pub angle: f64,
}

impl GradientFill {
    /// Alpha of the start stop.
    pub const START_ALPHA: u8 = 128;
    /// Alpha of the end stop.
    pub const END_ALPHA: u8 = 192;

    /// Random colors, translucent, random direction.
    pub fn random(rng: &mut impl Rng) -> Self {
        let start: [u8; 3] = rng.random();
        let end: [u8; 3] = rng.random();
        Self {
            start: SerializableColor::new(start[0], start[1], start[2], Self::START_ALPHA),
            end: SerializableColor::new(end[0], end[1], end[2], Self::END_ALPHA),
            angle: rng.random_range(0.0..360.0),
        }
    }

    pub fn start_color(&self) -> Color {
        self.start.into()
    }

    pub fn end_color(&self) -> Color {
        self.end.into()
    }
}

/// Geometry produced by shape reconstruction. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeGeometry {
    Ellipse(EllipseGeometry),
    Polygon(PolygonGeometry),
}

impl ShapeGeometry {
    /// Point the shape spins around when animated.
    pub fn rotation_center(&self) -> Point {
        match self {
            ShapeGeometry::Ellipse(e) => e.center,
            ShapeGeometry::Polygon(p) => p.pivot,
        }
    }

    /// Maps the geometry's local frame into canvas space. Ellipses live in a
    /// top-left-anchored `width` x `height` box; polygon vertices are already
    /// in canvas space.
    pub fn placement(&self) -> Affine {
        match self {
            ShapeGeometry::Ellipse(e) => e.placement(),
            ShapeGeometry::Polygon(_) => Affine::IDENTITY,
        }
    }

    /// Outline in the local frame.
    pub fn local_path(&self) -> BezPath {
        match self {
            ShapeGeometry::Ellipse(e) => e.local_path(),
            ShapeGeometry::Polygon(p) => p.to_path(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            ShapeGeometry::Ellipse(e) => e.bounds(),
            ShapeGeometry::Polygon(p) => p.bounds(),
        }
    }

    /// Hit test against a point in the local frame.
    pub fn local_hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            ShapeGeometry::Ellipse(e) => e.local_hit_test(point, tolerance),
            ShapeGeometry::Polygon(p) => p.hit_test(point, tolerance),
        }
    }
}

/// A recognized shape placed on the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneShape {
    pub(crate) id: ShapeId,
    geometry: ShapeGeometry,
    pub fill: GradientFill,
    pub outline: SerializableColor,
    /// Translation applied by dragging. Starts at the origin.
    pub(crate) position: Point,
}

impl SceneShape {
    pub(crate) fn new(geometry: ShapeGeometry, fill: GradientFill) -> Self {
        Self {
            id: Uuid::new_v4(),
            geometry,
            fill,
            outline: SerializableColor::black(),
            position: Point::ZERO,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn geometry(&self) -> &ShapeGeometry {
        &self.geometry
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Full placement of the local frame: reconstruction placement, then
    /// animation spin about the shape's own center, then the drag
    /// translation.
    pub fn transform(&self, rotation_degrees: f64) -> Affine {
        Affine::translate(self.position.to_vec2())
            * Affine::rotate_about(rotation_degrees.to_radians(), self.geometry.rotation_center())
            * self.geometry.placement()
    }

    /// Placed outline in canvas coordinates.
    pub fn to_path(&self, rotation_degrees: f64) -> BezPath {
        self.transform(rotation_degrees) * self.geometry.local_path()
    }

    /// Hit test in canvas coordinates.
    pub fn hit_test(&self, point: Point, tolerance: f64, rotation_degrees: f64) -> bool {
        let local = self.transform(rotation_degrees).inverse() * point;
        self.geometry.local_hit_test(local, tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Shape as _;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const EPS: f64 = 1e-9;

    fn polygon_shape() -> SceneShape {
        let geometry = ShapeGeometry::Polygon(PolygonGeometry::new(
            vec![Point::new(0.0, 0.0), Point::new(20.0, 0.0), Point::new(20.0, 4.0), Point::new(0.0, 4.0)],
            Point::new(10.0, 2.0),
        ));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        SceneShape::new(geometry, GradientFill::random(&mut rng))
    }

    #[test]
    fn test_random_fill_alphas() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..16 {
            let fill = GradientFill::random(&mut rng);
            assert_eq!(fill.start.a, GradientFill::START_ALPHA);
            assert_eq!(fill.end.a, GradientFill::END_ALPHA);
            assert!((0.0..360.0).contains(&fill.angle));
        }
    }

    #[test]
    fn test_random_fill_is_seeded() {
        let a = GradientFill::random(&mut ChaCha8Rng::seed_from_u64(9));
        let b = GradientFill::random(&mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_color_round_trip() {
        let color = SerializableColor::new(10, 20, 30, 128);
        let back: SerializableColor = Color::from(color).into();
        assert_eq!(color, back);
    }

    #[test]
    fn test_transform_translates_then_spins_about_pivot() {
        let mut shape = polygon_shape();
        shape.position = Point::new(100.0, 50.0);
        let pivot = shape.transform(90.0) * Point::new(10.0, 2.0);
        assert!((pivot.x - 110.0).abs() < EPS);
        assert!((pivot.y - 52.0).abs() < EPS);
    }

    #[test]
    fn test_hit_test_follows_position_and_rotation() {
        let mut shape = polygon_shape();
        assert!(shape.hit_test(Point::new(18.0, 2.0), 0.0, 0.0));
        // Upright after a quarter turn about (10, 2).
        assert!(!shape.hit_test(Point::new(18.0, 2.0), 0.0, 90.0));
        assert!(shape.hit_test(Point::new(10.0, 10.0), 0.0, 90.0));

        shape.position = Point::new(100.0, 0.0);
        assert!(shape.hit_test(Point::new(118.0, 2.0), 0.0, 0.0));
        assert!(!shape.hit_test(Point::new(18.0, 2.0), 0.0, 0.0));
    }

    #[test]
    fn test_ellipse_transform_includes_placement() {
        let ellipse = EllipseGeometry::new(Point::new(50.0, 40.0), 20.0, 10.0, std::f64::consts::FRAC_PI_2);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut shape = SceneShape::new(ShapeGeometry::Ellipse(ellipse), GradientFill::random(&mut rng));
        shape.position = Point::new(5.0, 0.0);

        // Local box center lands on the dragged center whatever the spin.
        for spin in [0.0, 45.0, 270.0] {
            let center = shape.transform(spin) * Point::new(10.0, 5.0);
            assert!((center.x - 55.0).abs() < EPS);
            assert!((center.y - 40.0).abs() < EPS);
        }

        // Reconstruction rotation stands the wide ellipse upright.
        let bounds = shape.to_path(0.0).bounding_box();
        assert!((bounds.width() - 10.0).abs() < 1e-6);
        assert!((bounds.height() - 20.0).abs() < 1e-6);
        assert!(shape.hit_test(Point::new(55.0, 48.0), 0.0, 0.0));
        assert!(!shape.hit_test(Point::new(63.0, 40.0), 0.0, 0.0));
    }
}
