//! Boundary to the external ink analyzer.
//!
//! The analyzer classifies a set of strokes into drawings and other elements.
//! How it does so is outside this crate; this module only fixes the contract
//! and the shape of its results.

mod scripted;

pub use scripted::ScriptedAnalyzer;

use crate::stroke::{SharedStroke, StrokeHint, StrokeId};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Analyzer errors.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Analysis failed: {0}")]
    Failed(String),
    #[error("Analyzer disconnected")]
    Disconnected,
}

/// Result type for analyzer operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Whether the analyzer's view of the strokes changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnalysisStatus {
    #[default]
    Unchanged,
    Updated,
}

/// Kind of drawing the analyzer recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawingKind {
    /// A drawing that matched no specific shape.
    Drawing,
    Circle,
    Ellipse,
    Triangle,
    IsoscelesTriangle,
    EquilateralTriangle,
    RightTriangle,
    Quadrilateral,
    Rectangle,
    Square,
    Diamond,
    Trapezoid,
    Parallelogram,
    Pentagon,
    Hexagon,
}

impl DrawingKind {
    /// Circles and ellipses are described by conjugate diameter points;
    /// every other kind by its vertex list.
    pub fn is_elliptical(&self) -> bool {
        matches!(self, DrawingKind::Circle | DrawingKind::Ellipse)
    }
}

/// A recognized drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InkDrawing {
    pub kind: DrawingKind,
    /// For circles/ellipses, the four conjugate diameter endpoints.
    /// For everything else, the polygon vertices in order.
    pub points: Vec<Point>,
    pub bounding_rect: Rect,
    pub center: Point,
}

/// One unit of the analyzer's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecognizedElement {
    Drawing(InkDrawing),
    /// Anything that is not a drawing (handwriting, lists, ...).
    Other { kind: String },
}

impl RecognizedElement {
    /// Name of the element kind, for logging.
    pub fn kind_name(&self) -> &str {
        match self {
            RecognizedElement::Drawing(_) => "InkDrawing",
            RecognizedElement::Other { kind } => kind.as_str(),
        }
    }
}

/// Result of one analysis pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub status: AnalysisStatus,
    pub elements: Vec<RecognizedElement>,
}

impl AnalysisOutcome {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn updated(elements: Vec<RecognizedElement>) -> Self {
        Self {
            status: AnalysisStatus::Updated,
            elements,
        }
    }

    /// The element realized as a shape: the last one, and only if the pass
    /// actually updated.
    pub fn last_element(&self) -> Option<&RecognizedElement> {
        match self.status {
            AnalysisStatus::Updated => self.elements.last(),
            AnalysisStatus::Unchanged => None,
        }
    }
}

/// Contract of the external ink analyzer.
///
/// `analyze` is the only asynchronous operation. The analyzer cannot cancel
/// an in-flight request; callers wait for it to complete.
pub trait InkAnalyzer {
    /// Register strokes for the next analysis pass.
    fn add_strokes(&mut self, strokes: &[SharedStroke]);

    /// Attach a semantic hint to a registered stroke.
    fn set_stroke_hint(&mut self, stroke: StrokeId, hint: StrokeHint);

    /// Whether a previous analysis is still running.
    fn is_busy(&self) -> bool;

    /// Analyze every registered stroke.
    fn analyze(&mut self) -> BoxFuture<'_, AnalysisResult<AnalysisOutcome>>;

    /// Forget every registered stroke and any working state.
    fn clear_all_data(&mut self);
}
