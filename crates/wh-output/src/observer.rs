//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use wh_core::Grid;
use wh_sim::{SimObserver, StepSummary};

use crate::row::{CellRow, StepSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes floor snapshots and step summaries to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After the run, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:            W,
    snapshot_interval: u64,
    last_error:        Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Record the floor every `snapshot_interval` steps (`0` disables
    /// per-step snapshots; the final floor is always written).
    pub fn new(writer: W, snapshot_interval: u64) -> Self {
        Self {
            writer,
            snapshot_interval,
            last_error: None,
        }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    fn write_floor(&mut self, step: u64, grid: &Grid) {
        let rows = CellRow::from_snapshot(step, &grid.snapshot());
        let result = self.writer.write_cells(&rows);
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_snapshot(&mut self, step: u64, grid: &Grid) {
        if self.snapshot_interval > 0 && step.is_multiple_of(self.snapshot_interval) {
            self.write_floor(step, grid);
        }
    }

    fn on_step_end(&mut self, summary: &StepSummary) {
        let result = self.writer.write_step_summary(&StepSummaryRow::from(summary));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, steps_taken: u64, grid: &Grid) {
        self.write_floor(steps_taken, grid);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
