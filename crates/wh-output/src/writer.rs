//! The `OutputWriter` trait implemented by backend writers.

use crate::{CellRow, OutputResult, StepSummaryRow};

/// Trait implemented by output backends.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with [`SimOutputObserver::take_error`](crate::SimOutputObserver::take_error).
pub trait OutputWriter {
    /// Write every cell of one recorded floor.
    fn write_cells(&mut self, rows: &[CellRow]) -> OutputResult<()>;

    /// Write one step summary row.
    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
