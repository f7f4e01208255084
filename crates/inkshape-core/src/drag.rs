//! Per-pointer drag sessions.
//!
//! Mouse, pen and touch pointers are interchangeable; each active pointer
//! captures at most one shape.

use crate::scene::SceneModel;
use crate::shapes::ShapeId;
use kurbo::{Point, Vec2};
use std::collections::HashMap;

/// Identifier of a pointer as reported by the input system.
pub type PointerId = u32;

/// A pointer currently dragging a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub shape_id: ShapeId,
    pub pointer_id: PointerId,
    /// Shape position minus pointer position at pointer-down.
    pub origin_offset: Vec2,
}

/// Tracks drag sessions keyed by pointer.
#[derive(Debug, Default)]
pub struct DragController {
    sessions: HashMap<PointerId, DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture `pointer_id` for `shape_id`.
    ///
    /// Returns `false` if the pointer is already captured or the shape does
    /// not exist.
    pub fn pointer_down(
        &mut self,
        scene: &SceneModel,
        shape_id: ShapeId,
        pointer_id: PointerId,
        pointer: Point,
    ) -> bool {
        if self.sessions.contains_key(&pointer_id) {
            log::debug!("Pointer {} already captured", pointer_id);
            return false;
        }
        let Some(shape) = scene.get_shape(shape_id) else {
            return false;
        };
        self.sessions.insert(
            pointer_id,
            DragSession {
                shape_id,
                pointer_id,
                origin_offset: shape.position() - pointer,
            },
        );
        true
    }

    /// Move the captured shape under the pointer.
    ///
    /// Returns the shape and its new position, or `None` when the pointer
    /// holds no session.
    pub fn pointer_move(
        &mut self,
        scene: &mut SceneModel,
        pointer_id: PointerId,
        pointer: Point,
    ) -> Option<(ShapeId, Point)> {
        let session = *self.sessions.get(&pointer_id)?;
        let position = pointer + session.origin_offset;
        if scene.set_position(session.shape_id, position) {
            Some((session.shape_id, position))
        } else {
            // Shape vanished under the pointer.
            self.sessions.remove(&pointer_id);
            None
        }
    }

    /// Release the pointer. Returns the ended session, if any.
    pub fn pointer_up(&mut self, pointer_id: PointerId) -> Option<DragSession> {
        self.sessions.remove(&pointer_id)
    }

    /// The input system took the pointer away; same as releasing it.
    pub fn pointer_cancel(&mut self, pointer_id: PointerId) -> Option<DragSession> {
        self.pointer_up(pointer_id)
    }

    pub fn session(&self, pointer_id: PointerId) -> Option<&DragSession> {
        self.sessions.get(&pointer_id)
    }

    pub fn is_captured(&self, pointer_id: PointerId) -> bool {
        self.sessions.contains_key(&pointer_id)
    }

    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }

    /// Drop every session.
    pub fn release_all(&mut self) {
        self.sessions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{GradientFill, PolygonGeometry, SerializableColor, ShapeGeometry};

    const EPS: f64 = 1e-9;

    fn scene_with_triangle() -> (SceneModel, ShapeId) {
        let mut scene = SceneModel::new();
        let id = scene.add_shape(
            ShapeGeometry::Polygon(PolygonGeometry::new(
                vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 8.0)],
                Point::new(5.0, 4.0),
            )),
            GradientFill {
                start: SerializableColor::black(),
                end: SerializableColor::black(),
                angle: 0.0,
            },
        );
        (scene, id)
    }

    #[test]
    fn test_offset_and_translation() {
        let (mut scene, id) = scene_with_triangle();
        scene.set_position(id, Point::new(20.0, 30.0));
        let geometry = scene.get_shape(id).unwrap().geometry().clone();

        let mut drag = DragController::new();
        assert!(drag.pointer_down(&scene, id, 1, Point::new(25.0, 33.0)));
        let offset = drag.session(1).unwrap().origin_offset;
        assert!((offset.x + 5.0).abs() < EPS);
        assert!((offset.y + 3.0).abs() < EPS);

        let (moved, position) = drag.pointer_move(&mut scene, 1, Point::new(100.0, 50.0)).unwrap();
        assert_eq!(moved, id);
        assert!((position.x - 95.0).abs() < EPS);
        assert!((position.y - 47.0).abs() < EPS);

        let shape = scene.get_shape(id).unwrap();
        assert_eq!(shape.position(), position);
        assert_eq!(shape.geometry(), &geometry);
    }

    #[test]
    fn test_move_without_session_is_ignored() {
        let (mut scene, id) = scene_with_triangle();
        let mut drag = DragController::new();
        assert!(drag.pointer_move(&mut scene, 7, Point::new(1.0, 1.0)).is_none());
        assert_eq!(scene.get_shape(id).unwrap().position(), Point::ZERO);
        assert!(drag.pointer_up(7).is_none());
    }

    #[test]
    fn test_release_ends_session() {
        let (mut scene, id) = scene_with_triangle();
        let mut drag = DragController::new();
        drag.pointer_down(&scene, id, 1, Point::ZERO);
        assert!(drag.pointer_up(1).is_some());
        assert!(!drag.is_captured(1));
        assert!(drag.pointer_move(&mut scene, 1, Point::new(9.0, 9.0)).is_none());
        assert_eq!(scene.get_shape(id).unwrap().position(), Point::ZERO);
    }

    #[test]
    fn test_one_session_per_pointer() {
        let (scene, id) = scene_with_triangle();
        let mut drag = DragController::new();
        assert!(drag.pointer_down(&scene, id, 1, Point::ZERO));
        assert!(!drag.pointer_down(&scene, id, 1, Point::new(4.0, 4.0)));
        assert_eq!(drag.session(1).unwrap().origin_offset, Vec2::ZERO);
    }

    #[test]
    fn test_independent_pointers() {
        let mut scene = SceneModel::new();
        let fill = GradientFill {
            start: SerializableColor::black(),
            end: SerializableColor::black(),
            angle: 0.0,
        };
        let a = scene.add_shape(
            ShapeGeometry::Polygon(PolygonGeometry::new(vec![Point::ZERO], Point::ZERO)),
            fill,
        );
        let b = scene.add_shape(
            ShapeGeometry::Polygon(PolygonGeometry::new(vec![Point::ZERO], Point::ZERO)),
            fill,
        );

        let mut drag = DragController::new();
        drag.pointer_down(&scene, a, 1, Point::ZERO);
        drag.pointer_down(&scene, b, 2, Point::ZERO);
        drag.pointer_move(&mut scene, 2, Point::new(3.0, 4.0));
        drag.pointer_cancel(1);
        drag.pointer_move(&mut scene, 1, Point::new(9.0, 9.0));

        assert_eq!(scene.get_shape(a).unwrap().position(), Point::ZERO);
        assert_eq!(scene.get_shape(b).unwrap().position(), Point::new(3.0, 4.0));
        assert_eq!(drag.active_count(), 1);
    }

    #[test]
    fn test_unknown_shape_not_captured() {
        let (scene, _) = scene_with_triangle();
        let mut drag = DragController::new();
        assert!(!drag.pointer_down(&scene, ShapeId::new_v4(), 1, Point::ZERO));
        assert!(!drag.is_captured(1));
    }
}
