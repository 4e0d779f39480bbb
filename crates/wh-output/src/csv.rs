//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `grid_snapshots.csv`
//! - `step_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{CellRow, OutputResult, StepSummaryRow};

pub const SNAPSHOT_FILE: &str = "grid_snapshots.csv";
pub const SUMMARY_FILE:  &str = "step_summaries.csv";

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join(SNAPSHOT_FILE))?;
        snapshots.write_record(["step", "x", "y", "code"])?;

        let mut summaries = Writer::from_path(dir.join(SUMMARY_FILE))?;
        summaries.write_record([
            "step",
            "moves_made",
            "boxes_remaining",
            "moves",
            "pickups",
            "drop_offs",
            "blocked",
        ])?;

        Ok(Self {
            snapshots,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_cells(&mut self, rows: &[CellRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.step.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.code.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.step.to_string(),
            row.moves_made.to_string(),
            row.boxes_remaining.to_string(),
            row.moves.to_string(),
            row.pickups.to_string(),
            row.drop_offs.to_string(),
            row.blocked.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
