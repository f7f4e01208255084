//! Raw ink strokes and the buffer that holds them between recognition runs.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Identifier assigned to a stroke by the capture surface.
pub type StrokeId = u64;

/// Semantic hint attached to a stroke before analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StrokeHint {
    /// Let the analyzer decide.
    #[default]
    Auto,
    /// The stroke belongs to a drawing, not to handwriting.
    Drawing,
}

/// One continuous pen-down to pen-up path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub id: StrokeId,
    /// Sampled points in canvas coordinates.
    pub points: Vec<Point>,
}

impl Stroke {
    pub fn new(id: StrokeId, points: Vec<Point>) -> Self {
        Self { id, points }
    }
}

/// Strokes are shared with the analyzer rather than copied.
pub type SharedStroke = Arc<Stroke>;

/// Accumulates strokes since the last analysis attempt.
#[derive(Debug, Default)]
pub struct StrokeBuffer {
    strokes: Vec<SharedStroke>,
}

impl StrokeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append strokes, returning the newly stored handles.
    pub fn extend(&mut self, strokes: impl IntoIterator<Item = Stroke>) -> &[SharedStroke] {
        let start = self.strokes.len();
        self.strokes.extend(strokes.into_iter().map(Arc::new));
        &self.strokes[start..]
    }

    pub fn strokes(&self) -> &[SharedStroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Remove every stroke, returning what was held.
    pub fn take(&mut self) -> Vec<SharedStroke> {
        std::mem::take(&mut self.strokes)
    }
}
