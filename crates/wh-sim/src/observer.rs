//! Simulation observer trait for progress reporting and data collection.

use wh_core::{Grid, GridSnapshot};

use crate::StepSummary;

/// Callbacks invoked by [`Sim`](crate::Sim) around each step.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_step_end(&mut self, s: &StepSummary) {
///         if s.step % self.interval == 0 {
///             println!("step {}: {} boxes left", s.step, s.boxes_remaining);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the start of every step with the floor as it stands before
    /// any robot acts.
    fn on_snapshot(&mut self, _step: u64, _grid: &Grid) {}

    /// Called after every robot has acted.
    fn on_step_end(&mut self, _summary: &StepSummary) {}

    /// Called by [`Sim::finish`](crate::Sim::finish) with the final floor.
    fn on_sim_end(&mut self, _steps_taken: u64, _grid: &Grid) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Records grid snapshots for later playback.
///
/// Keeps the pre-step floor every `interval` steps, plus the final floor
/// when the simulation finishes.
pub struct SnapshotRecorder {
    interval: u64,
    frames:   Vec<GridSnapshot>,
}

impl SnapshotRecorder {
    /// Record every step.
    pub fn new() -> Self {
        Self::every(1)
    }

    /// Record every `interval` steps (`0` is treated as `1`).
    pub fn every(interval: u64) -> Self {
        Self { interval: interval.max(1), frames: Vec::new() }
    }

    pub fn frames(&self) -> &[GridSnapshot] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<GridSnapshot> {
        self.frames
    }
}

impl Default for SnapshotRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimObserver for SnapshotRecorder {
    fn on_snapshot(&mut self, step: u64, grid: &Grid) {
        if step.is_multiple_of(self.interval) {
            self.frames.push(grid.snapshot());
        }
    }

    fn on_sim_end(&mut self, _steps_taken: u64, grid: &Grid) {
        self.frames.push(grid.snapshot());
    }
}
