//! Plain data row types written by output backends.

use wh_core::GridSnapshot;
use wh_sim::StepSummary;

/// One cell of a recorded floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRow {
    pub step: u64,
    pub x:    u32,
    pub y:    u32,
    /// Cell code as in `wh_core::Cell::code`.
    pub code: i8,
}

impl CellRow {
    /// Flatten a snapshot into rows, row-major by `y`.
    pub fn from_snapshot(step: u64, snapshot: &GridSnapshot) -> Vec<CellRow> {
        snapshot
            .cells()
            .map(|(x, y, code)| CellRow { step, x, y, code })
            .collect()
    }
}

/// Counters after one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSummaryRow {
    pub step:            u64,
    pub moves_made:      u64,
    pub boxes_remaining: u32,
    pub moves:           u32,
    pub pickups:         u32,
    pub drop_offs:       u32,
    pub blocked:         u32,
}

impl From<&StepSummary> for StepSummaryRow {
    fn from(s: &StepSummary) -> Self {
        Self {
            step:            s.step,
            moves_made:      s.moves_made,
            boxes_remaining: s.boxes_remaining,
            moves:           s.moves,
            pickups:         s.pickups,
            drop_offs:       s.drop_offs,
            blocked:         s.blocked,
        }
    }
}
