//! Debounce timer deciding when accumulated strokes are analyzed.
//!
//! Multi-stroke shapes (a rectangle drawn as four lines) must reach the
//! analyzer as one unit, so analysis waits for a quiet period after the last
//! collected stroke. A timer that fires while the analyzer is busy is re-armed
//! rather than dropped.

use crate::stroke::{SharedStroke, Stroke, StrokeBuffer};
use std::time::Duration;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Default quiet period before analysis.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// State of the single debounce timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerState {
    /// No timer armed.
    #[default]
    Idle,
    /// Timer armed, fires at `deadline`.
    Pending { deadline: Instant },
}

/// What the caller should do after polling the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Timer not armed or not yet due.
    Wait,
    /// Timer fired while the analyzer was busy and has been re-armed.
    Retry,
    /// Timer fired; run analysis, then call [`DebounceScheduler::finish_analysis`].
    Analyze,
}

/// Owns the stroke buffer and the debounce timer.
#[derive(Debug)]
pub struct DebounceScheduler {
    delay: Duration,
    state: SchedulerState,
    buffer: StrokeBuffer,
}

impl Default for DebounceScheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }
}

impl DebounceScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            state: SchedulerState::Idle,
            buffer: StrokeBuffer::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, SchedulerState::Pending { .. })
    }

    pub fn buffer(&self) -> &StrokeBuffer {
        &self.buffer
    }

    /// A new stroke is in progress: never analyze mid-stroke.
    pub fn on_stroke_started(&mut self) {
        if self.is_pending() {
            log::debug!("Stroke started, cancelling pending analysis");
        }
        self.state = SchedulerState::Idle;
    }

    /// Buffer finished strokes and restart the full delay.
    /// Returns the handles of the strokes just added.
    pub fn on_strokes_collected(
        &mut self,
        strokes: impl IntoIterator<Item = Stroke>,
        now: Instant,
    ) -> &[SharedStroke] {
        self.arm(now);
        self.buffer.extend(strokes)
    }

    /// Fire the timer if it is due.
    ///
    /// A busy analyzer re-arms the timer with the full delay. There is no
    /// retry limit.
    pub fn poll(&mut self, now: Instant, analyzer_busy: bool) -> TimerAction {
        match self.state {
            SchedulerState::Idle => TimerAction::Wait,
            SchedulerState::Pending { deadline } if now < deadline => TimerAction::Wait,
            SchedulerState::Pending { .. } => {
                if analyzer_busy {
                    log::debug!("Analyzer busy, retrying in {:?}", self.delay);
                    self.arm(now);
                    TimerAction::Retry
                } else {
                    self.state = SchedulerState::Idle;
                    TimerAction::Analyze
                }
            }
        }
    }

    /// Clear the batch after an analysis attempt, whatever its outcome.
    pub fn finish_analysis(&mut self) -> Vec<SharedStroke> {
        self.buffer.take()
    }

    /// Disarm the timer and drop the batch.
    pub fn cancel(&mut self) {
        self.state = SchedulerState::Idle;
        self.buffer.take();
    }

    fn arm(&mut self, now: Instant) {
        self.state = SchedulerState::Pending {
            deadline: now + self.delay,
        };
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use kurbo::Point;

    const DELAY: Duration = Duration::from_millis(500);

    fn stroke(id: u64) -> Stroke {
        Stroke::new(id, vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)])
    }

    #[test]
    fn test_collect_arms_timer() {
        let mut scheduler = DebounceScheduler::new(DELAY);
        let t0 = Instant::now();
        scheduler.on_strokes_collected([stroke(1)], t0);
        assert_eq!(
            scheduler.state(),
            SchedulerState::Pending { deadline: t0 + DELAY }
        );
        assert_eq!(scheduler.buffer().len(), 1);
    }

    #[test]
    fn test_stroke_started_cancels_timer() {
        let mut scheduler = DebounceScheduler::new(DELAY);
        let t0 = Instant::now();
        scheduler.on_strokes_collected([stroke(1)], t0);
        scheduler.on_stroke_started();
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert_eq!(scheduler.poll(t0 + DELAY * 2, false), TimerAction::Wait);
        // The batch survives; only the timer is cancelled.
        assert_eq!(scheduler.buffer().len(), 1);
    }

    #[test]
    fn test_each_collect_restarts_full_delay() {
        let mut scheduler = DebounceScheduler::new(DELAY);
        let t0 = Instant::now();
        for i in 0..5u32 {
            let now = t0 + Duration::from_millis(400) * i;
            scheduler.on_strokes_collected([stroke(u64::from(i))], now);
            assert_eq!(
                scheduler.state(),
                SchedulerState::Pending { deadline: now + DELAY }
            );
        }
        let last = t0 + Duration::from_millis(1600);
        assert_eq!(scheduler.poll(last + Duration::from_millis(499), false), TimerAction::Wait);
        assert_eq!(scheduler.poll(last + DELAY, false), TimerAction::Analyze);
    }

    #[test]
    fn test_busy_rearms_without_limit() {
        let mut scheduler = DebounceScheduler::new(DELAY);
        let t0 = Instant::now();
        scheduler.on_strokes_collected([stroke(1)], t0);

        let mut now = t0 + DELAY;
        for _ in 0..20 {
            assert_eq!(scheduler.poll(now, true), TimerAction::Retry);
            assert_eq!(
                scheduler.state(),
                SchedulerState::Pending { deadline: now + DELAY }
            );
            now += DELAY;
        }
        assert_eq!(scheduler.poll(now, false), TimerAction::Analyze);
        assert_eq!(scheduler.state(), SchedulerState::Idle);
    }

    #[test]
    fn test_finish_analysis_clears_batch() {
        let mut scheduler = DebounceScheduler::new(DELAY);
        let t0 = Instant::now();
        scheduler.on_strokes_collected([stroke(1), stroke(2)], t0);
        assert_eq!(scheduler.poll(t0 + DELAY, false), TimerAction::Analyze);
        let batch = scheduler.finish_analysis();
        assert_eq!(batch.len(), 2);
        assert!(scheduler.buffer().is_empty());
    }

    #[test]
    fn test_cancel_drops_everything() {
        let mut scheduler = DebounceScheduler::new(DELAY);
        let t0 = Instant::now();
        scheduler.on_strokes_collected([stroke(1)], t0);
        scheduler.cancel();
        assert!(!scheduler.is_pending());
        assert!(scheduler.buffer().is_empty());
    }
}
