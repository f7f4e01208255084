//! Shape reconstruction from analyzer output.
//!
//! Ellipses and circles arrive as four conjugate diameter endpoints; the
//! width runs from `points[0]` to `points[2]`, the height from `points[1]` to
//! `points[3]`. Every other drawing kind becomes a polygon over the supplied
//! points.

use crate::analysis::{AnalysisOutcome, DrawingKind, InkDrawing, RecognizedElement};
use crate::shapes::{EllipseGeometry, PolygonGeometry, ShapeGeometry};

/// Reconstruct the shape for the last element of an analysis pass.
///
/// Earlier elements of the same pass are ignored. Returns `None` when the
/// pass did not update, recognized nothing, or ended with a non-drawing.
pub fn realize_outcome(outcome: &AnalysisOutcome) -> Option<ShapeGeometry> {
    match outcome.last_element()? {
        RecognizedElement::Drawing(drawing) => Some(reconstruct_drawing(drawing)),
        other => {
            log::info!("Ignoring recognized element: {}", other.kind_name());
            None
        }
    }
}

/// Convert one recognized drawing into shape geometry.
pub fn reconstruct_drawing(drawing: &InkDrawing) -> ShapeGeometry {
    if drawing.kind.is_elliptical() {
        ShapeGeometry::Ellipse(reconstruct_ellipse(drawing))
    } else {
        ShapeGeometry::Polygon(reconstruct_polygon(drawing))
    }
}

fn reconstruct_ellipse(drawing: &InkDrawing) -> EllipseGeometry {
    match (drawing.kind, drawing.points.as_slice()) {
        (DrawingKind::Circle, [p0, _, p2, ..]) => EllipseGeometry::circle(p0.midpoint(*p2), p0.distance(*p2)),
        (DrawingKind::Ellipse, [p0, p1, p2, p3, ..]) => {
            let axis = *p2 - *p0;
            EllipseGeometry::new(
                p0.midpoint(*p2),
                axis.hypot(),
                p1.distance(*p3),
                axis.y.atan2(axis.x),
            )
        }
        _ => {
            log::debug!(
                "{:?} with {} points, using bounding rect",
                drawing.kind,
                drawing.points.len()
            );
            let rect = drawing.bounding_rect;
            match drawing.kind {
                DrawingKind::Circle => EllipseGeometry::circle(rect.center(), rect.width().max(rect.height())),
                _ => EllipseGeometry::new(rect.center(), rect.width(), rect.height(), 0.0),
            }
        }
    }
}

fn reconstruct_polygon(drawing: &InkDrawing) -> PolygonGeometry {
    PolygonGeometry::new(drawing.points.clone(), drawing.center)
}
