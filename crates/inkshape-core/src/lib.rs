//! InkShape Core Library
//!
//! Turns freehand strokes into recognized circles, ellipses and polygons, and
//! tracks per-shape drag and animation state. Stroke capture, the recognizer
//! itself and rendering live outside this crate.

pub mod analysis;
pub mod animation;
pub mod config;
pub mod drag;
pub mod reconstruct;
pub mod scene;
pub mod scheduler;
pub mod session;
pub mod shapes;
pub mod stroke;

pub use analysis::{
    AnalysisError, AnalysisOutcome, AnalysisStatus, DrawingKind, InkAnalyzer, InkDrawing,
    RecognizedElement, ScriptedAnalyzer,
};
pub use animation::{AnimationController, AnimationHandle, PlayState, SpinDirection};
pub use config::{ConfigError, SessionConfig};
pub use drag::{DragController, DragSession, PointerId};
pub use reconstruct::{realize_outcome, reconstruct_drawing};
pub use scene::{SceneEvent, SceneModel};
pub use scheduler::{DebounceScheduler, SchedulerState, TimerAction};
pub use session::{InkSession, InputMode};
pub use shapes::{EllipseGeometry, GradientFill, PolygonGeometry, SceneShape, ShapeGeometry, ShapeId};
pub use stroke::{Stroke, StrokeBuffer, StrokeHint, StrokeId};
