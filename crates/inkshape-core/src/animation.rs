//! Continuous-rotation animation per shape, toggled globally.

use crate::scene::SceneModel;
use crate::shapes::ShapeId;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Default time for one full turn.
pub const DEFAULT_SPIN_PERIOD_MS: u64 = 3000;

/// Spin direction, picked once per shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpinDirection {
    /// 0° → 360°.
    Forward,
    /// 360° → 0°.
    Reverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayState {
    Playing,
    Paused,
}

/// Animation state of one shape. Created on first activation, kept across
/// pause/resume.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationHandle {
    pub shape_id: ShapeId,
    pub direction: SpinDirection,
    pub play_state: PlayState,
    /// Time spent playing, which fixes the current angle.
    elapsed: Duration,
}

impl AnimationHandle {
    fn new(shape_id: ShapeId, direction: SpinDirection) -> Self {
        Self {
            shape_id,
            direction,
            play_state: PlayState::Playing,
            elapsed: Duration::ZERO,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.play_state == PlayState::Playing
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Current angle in degrees; repeats forever with the given period.
    pub fn angle(&self, period: Duration) -> f64 {
        let period = period.as_secs_f64();
        if period <= 0.0 {
            return 0.0;
        }
        let turn = 360.0 * (self.elapsed.as_secs_f64() % period) / period;
        match self.direction {
            SpinDirection::Forward => turn,
            SpinDirection::Reverse => 360.0 - turn,
        }
    }
}

/// Owns every shape's animation handle.
#[derive(Debug)]
pub struct AnimationController {
    handles: HashMap<ShapeId, AnimationHandle>,
    period: Duration,
    /// Global toggle; shapes added while on start animated.
    enabled: bool,
}

impl Default for AnimationController {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_SPIN_PERIOD_MS))
    }
}

impl AnimationController {
    pub fn new(period: Duration) -> Self {
        Self {
            handles: HashMap::new(),
            period,
            enabled: false,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn handle(&self, shape_id: ShapeId) -> Option<&AnimationHandle> {
        self.handles.get(&shape_id)
    }

    /// Start or resume spinning a shape.
    ///
    /// A fresh shape gets a random direction; a paused one resumes where it
    /// stopped. Playing shapes are left alone.
    pub fn activate(&mut self, shape_id: ShapeId, rng: &mut impl Rng) {
        let handle = self.handles.entry(shape_id).or_insert_with(|| {
            let direction = if rng.random_bool(0.5) {
                SpinDirection::Forward
            } else {
                SpinDirection::Reverse
            };
            log::debug!("Animating shape {} ({:?})", shape_id, direction);
            AnimationHandle::new(shape_id, direction)
        });
        handle.play_state = PlayState::Playing;
    }

    /// Pause a playing shape, keeping its angle.
    pub fn deactivate(&mut self, shape_id: ShapeId) {
        if let Some(handle) = self.handles.get_mut(&shape_id) {
            handle.play_state = PlayState::Paused;
        }
    }

    /// Flip the global toggle and apply it to every shape in the scene.
    pub fn set_enabled(&mut self, enabled: bool, scene: &SceneModel, rng: &mut impl Rng) {
        self.enabled = enabled;
        for &id in scene.ids() {
            if enabled {
                self.activate(id, &mut *rng);
            } else {
                self.deactivate(id);
            }
        }
    }

    /// Hook for newly reconstructed shapes: animate them if the toggle is on.
    pub fn on_shape_added(&mut self, shape_id: ShapeId, rng: &mut impl Rng) {
        if self.enabled {
            self.activate(shape_id, rng);
        }
    }

    /// Advance playing shapes by one frame. Returns `(shape, angle)` for each
    /// playing shape, in scene order.
    pub fn advance(&mut self, dt: Duration, scene: &SceneModel) -> Vec<(ShapeId, f64)> {
        let period = self.period;
        scene
            .ids()
            .iter()
            .filter_map(|id| {
                let handle = self.handles.get_mut(id).filter(|h| h.is_playing())?;
                handle.elapsed += dt;
                Some((*id, handle.angle(period)))
            })
            .collect()
    }

    /// Current angle of a shape, 0 if it was never animated.
    pub fn angle(&self, shape_id: ShapeId) -> f64 {
        self.handles
            .get(&shape_id)
            .map_or(0.0, |h| h.angle(self.period))
    }

    /// Drop every handle (the scene was cleared).
    pub fn clear(&mut self) {
        self.handles.clear();
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
