//! The recognition session: wires capture events, the debounce timer, the
//! analyzer, reconstruction and the interaction controllers together.
//!
//! Everything runs on one thread. [`InkSession::tick`] is the only async
//! operation and suspends only while the analyzer works.

use crate::analysis::InkAnalyzer;
use crate::animation::AnimationController;
use crate::config::SessionConfig;
use crate::drag::{DragController, PointerId};
use crate::reconstruct::realize_outcome;
use crate::scene::{SceneEvent, SceneModel};
use crate::scheduler::{DebounceScheduler, TimerAction};
use crate::shapes::{GradientFill, ShapeGeometry, ShapeId};
use crate::stroke::{Stroke, StrokeHint};
use kurbo::Point;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Which interaction the pointer drives. Ink and drag are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Pointer input draws strokes.
    #[default]
    Ink,
    /// Pointer input drags shapes; ink capture is off.
    Drag,
}

/// One drawing surface with its recognized shapes.
pub struct InkSession<A: InkAnalyzer> {
    config: SessionConfig,
    analyzer: A,
    scheduler: DebounceScheduler,
    scene: SceneModel,
    drag: DragController,
    animation: AnimationController,
    rng: ChaCha8Rng,
    mode: InputMode,
    /// Pending notifications for the renderer.
    events: Vec<SceneEvent>,
}

impl<A: InkAnalyzer> InkSession<A> {
    pub fn new(analyzer: A, config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self {
            scheduler: DebounceScheduler::new(config.debounce()),
            animation: AnimationController::new(config.spin_period()),
            config,
            analyzer,
            scene: SceneModel::new(),
            drag: DragController::new(),
            rng,
            mode: InputMode::Ink,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    pub fn analyzer_mut(&mut self) -> &mut A {
        &mut self.analyzer
    }

    pub fn scene(&self) -> &SceneModel {
        &self.scene
    }

    pub fn scheduler(&self) -> &DebounceScheduler {
        &self.scheduler
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn animation(&self) -> &AnimationController {
        &self.animation
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn ink_input_enabled(&self) -> bool {
        self.mode == InputMode::Ink
    }

    pub fn drag_mode_enabled(&self) -> bool {
        self.mode == InputMode::Drag
    }

    /// Take the notifications produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Capture surface ---

    pub fn on_stroke_started(&mut self) {
        if !self.ink_input_enabled() {
            log::debug!("Ink input disabled, ignoring stroke start");
            return;
        }
        self.scheduler.on_stroke_started();
    }

    pub fn on_strokes_collected(&mut self, strokes: Vec<Stroke>, now: Instant) {
        if !self.ink_input_enabled() {
            log::debug!("Ink input disabled, dropping {} strokes", strokes.len());
            return;
        }
        let added = self.scheduler.on_strokes_collected(strokes, now);
        self.analyzer.add_strokes(added);
        for stroke in added {
            self.analyzer.set_stroke_hint(stroke.id, StrokeHint::Drawing);
        }
    }

    // --- Timer ---

    /// Fire the debounce timer if it is due and run analysis.
    ///
    /// Returns the id of the shape created by this tick, if any. The session
    /// stays borrowed until analysis completes; capture events the host
    /// receives meanwhile are delivered afterwards and form the next batch.
    pub async fn tick(&mut self, now: Instant) -> Option<ShapeId> {
        match self.scheduler.poll(now, self.analyzer.is_busy()) {
            TimerAction::Wait | TimerAction::Retry => None,
            TimerAction::Analyze => self.run_analysis().await,
        }
    }

    async fn run_analysis(&mut self) -> Option<ShapeId> {
        let result = self.analyzer.analyze().await;
        let shape = match result {
            Ok(outcome) => realize_outcome(&outcome).map(|geometry| self.place_shape(geometry)),
            Err(e) => {
                log::warn!("Ink analysis failed: {}", e);
                None
            }
        };
        let batch = self.scheduler.finish_analysis();
        log::debug!("Analyzed {} strokes", batch.len());
        self.analyzer.clear_all_data();
        self.events.push(SceneEvent::InkCleared);
        shape
    }

    fn place_shape(&mut self, geometry: ShapeGeometry) -> ShapeId {
        let fill = GradientFill::random(&mut self.rng);
        let id = self.scene.add_shape(geometry, fill);
        if let Some(shape) = self.scene.get_shape(id) {
            self.events.push(SceneEvent::ShapeAdded(shape.clone()));
        }
        self.animation.on_shape_added(id, &mut self.rng);
        log::info!("Added shape {}", id);
        id
    }

    // --- Pointer ---

    /// Start dragging whatever shape lies under the pointer.
    pub fn pointer_down(&mut self, pointer_id: PointerId, position: Point) -> Option<ShapeId> {
        if !self.drag_mode_enabled() {
            return None;
        }
        let animation = &self.animation;
        let tolerance = f64::from(self.config.hit_tolerance);
        let shape_id = self
            .scene
            .shape_at(position, tolerance, |id| animation.angle(id))?;
        self.pointer_down_on(shape_id, pointer_id, position)
            .then_some(shape_id)
    }

    /// Start dragging a shape the host already hit-tested.
    pub fn pointer_down_on(&mut self, shape_id: ShapeId, pointer_id: PointerId, position: Point) -> bool {
        if !self.drag_mode_enabled() {
            return false;
        }
        self.drag.pointer_down(&self.scene, shape_id, pointer_id, position)
    }

    pub fn pointer_move(&mut self, pointer_id: PointerId, position: Point) {
        if let Some((id, position)) = self.drag.pointer_move(&mut self.scene, pointer_id, position) {
            self.events.push(SceneEvent::ShapeTranslated { id, position });
        }
    }

    pub fn pointer_up(&mut self, pointer_id: PointerId) {
        self.drag.pointer_up(pointer_id);
    }

    pub fn pointer_cancel(&mut self, pointer_id: PointerId) {
        self.drag.pointer_cancel(pointer_id);
    }

    // --- Animation clock ---

    /// Advance the spin animation by one frame.
    pub fn advance_animation(&mut self, dt: Duration) {
        for (id, angle) in self.animation.advance(dt, &self.scene) {
            self.events.push(SceneEvent::ShapeRotationUpdated { id, angle });
        }
    }

    // --- User commands ---

    /// Remove every shape and stroke and disarm the timer.
    pub fn clear_canvas(&mut self) {
        let removed = self.scene.clear_all();
        self.drag.release_all();
        self.animation.clear();
        self.scheduler.cancel();
        self.analyzer.clear_all_data();
        log::info!("Canvas cleared ({} shapes)", removed.len());
        self.events.push(SceneEvent::ShapesRemoved(removed));
        self.events.push(SceneEvent::InkCleared);
    }

    pub fn toggle_drag_mode(&mut self, on: bool) {
        self.mode = if on { InputMode::Drag } else { InputMode::Ink };
        if !on {
            self.drag.release_all();
        }
    }

    pub fn toggle_animation(&mut self, on: bool) {
        self.animation.set_enabled(on, &self.scene, &mut self.rng);
    }
}
