//! Ordered collection of placed shapes and the events reported to the renderer.

use crate::shapes::{GradientFill, SceneShape, ShapeGeometry, ShapeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Change notifications for the rendering side, in the order they happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    ShapeAdded(SceneShape),
    /// Every listed shape was removed.
    ShapesRemoved(Vec<ShapeId>),
    ShapeTranslated { id: ShapeId, position: Point },
    ShapeRotationUpdated { id: ShapeId, angle: f64 },
    /// The capture surface should drop its wet strokes.
    InkCleared,
}

/// Shapes in insertion order (back to front).
#[derive(Debug, Default)]
pub struct SceneModel {
    shapes: HashMap<ShapeId, SceneShape>,
    z_order: Vec<ShapeId>,
}

impl SceneModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new shape on top of the others.
    pub fn add_shape(&mut self, geometry: ShapeGeometry, fill: GradientFill) -> ShapeId {
        let shape = SceneShape::new(geometry, fill);
        let id = shape.id();
        self.z_order.push(id);
        self.shapes.insert(id, shape);
        id
    }

    /// Remove every shape, returning their ids back to front.
    pub fn clear_all(&mut self) -> Vec<ShapeId> {
        self.shapes.clear();
        std::mem::take(&mut self.z_order)
    }

    pub fn get_shape(&self, id: ShapeId) -> Option<&SceneShape> {
        self.shapes.get(&id)
    }

    /// Shapes back to front.
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &SceneShape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    pub fn ids(&self) -> &[ShapeId] {
        &self.z_order
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Move a shape. Translation is the only mutation a placed shape accepts.
    pub(crate) fn set_position(&mut self, id: ShapeId, position: Point) -> bool {
        match self.shapes.get_mut(&id) {
            Some(shape) => {
                shape.position = position;
                true
            }
            None => false,
        }
    }

    /// Top-most shape under `point`. `rotation_of` supplies each shape's
    /// current animation angle in degrees.
    pub fn shape_at(
        &self,
        point: Point,
        tolerance: f64,
        rotation_of: impl Fn(ShapeId) -> f64,
    ) -> Option<ShapeId> {
        self.z_order.iter().rev().copied().find(|&id| {
            self.shapes
                .get(&id)
                .is_some_and(|s| s.hit_test(point, tolerance, rotation_of(id)))
        })
    }
}
