//! In-memory analyzer that replays queued outcomes.

use super::{AnalysisOutcome, AnalysisResult, BoxFuture, InkAnalyzer};
use crate::stroke::{SharedStroke, StrokeHint, StrokeId};
use std::collections::{HashMap, VecDeque};

/// Analyzer for tests and demos.
///
/// Each call to [`InkAnalyzer::analyze`] pops the next queued result; with
/// nothing queued it reports an unchanged outcome.
#[derive(Debug, Default)]
pub struct ScriptedAnalyzer {
    strokes: Vec<SharedStroke>,
    hints: HashMap<StrokeId, StrokeHint>,
    script: VecDeque<AnalysisResult<AnalysisOutcome>>,
    busy: bool,
    analyze_calls: usize,
    clear_calls: usize,
}

impl ScriptedAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of a future `analyze` call.
    pub fn push_result(&mut self, result: AnalysisResult<AnalysisOutcome>) {
        self.script.push_back(result);
    }

    pub fn push_outcome(&mut self, outcome: AnalysisOutcome) {
        self.push_result(Ok(outcome));
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Strokes registered since the last clear.
    pub fn strokes(&self) -> &[SharedStroke] {
        &self.strokes
    }

    pub fn hint(&self, stroke: StrokeId) -> Option<StrokeHint> {
        self.hints.get(&stroke).copied()
    }

    pub fn analyze_calls(&self) -> usize {
        self.analyze_calls
    }

    pub fn clear_calls(&self) -> usize {
        self.clear_calls
    }
}

impl InkAnalyzer for ScriptedAnalyzer {
    fn add_strokes(&mut self, strokes: &[SharedStroke]) {
        self.strokes.extend(strokes.iter().cloned());
    }

    fn set_stroke_hint(&mut self, stroke: StrokeId, hint: StrokeHint) {
        self.hints.insert(stroke, hint);
    }

    fn is_busy(&self) -> bool {
        self.busy
    }

    fn analyze(&mut self) -> BoxFuture<'_, AnalysisResult<AnalysisOutcome>> {
        self.analyze_calls += 1;
        let result = self
            .script
            .pop_front()
            .unwrap_or_else(|| Ok(AnalysisOutcome::unchanged()));
        Box::pin(async move { result })
    }

    fn clear_all_data(&mut self) {
        self.strokes.clear();
        self.hints.clear();
        self.clear_calls += 1;
    }
}
