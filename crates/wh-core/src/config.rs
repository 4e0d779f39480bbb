//! Run configuration.

use crate::{WhError, WhResult};

/// Boxes per rack implied by the rack-count formula: one rack is set aside for
/// every five boxes, and the rack itself counts as one of those five.
pub const BOXES_PER_RACK: u32 = 5;

/// Top-level simulation configuration.
///
/// Typically built from CLI flags or loaded from a JSON file by the driver.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WarehouseConfig {
    /// Floor width in cells (x axis).
    pub width: u32,

    /// Floor height in cells (y axis).
    pub height: u32,

    /// Boxes in the run, including the ones turned into racks.
    pub total_boxes: u32,

    /// Robots placed on the floor.
    pub num_robots: u32,

    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            width:       5,
            height:      5,
            total_boxes: 4,
            num_robots:  1,
            seed:        42,
        }
    }
}

impl WarehouseConfig {
    /// `ceil(total_boxes / 5)`.
    #[inline]
    pub fn racks_needed(&self) -> u32 {
        self.total_boxes.div_ceil(BOXES_PER_RACK)
    }

    /// Loose boxes scattered on the floor: `total_boxes - racks_needed`.
    #[inline]
    pub fn initial_loose_boxes(&self) -> u32 {
        self.total_boxes - self.racks_needed()
    }

    /// Cells consumed by the initial scene.
    #[inline]
    pub fn occupied_cells(&self) -> u64 {
        self.racks_needed() as u64 + self.initial_loose_boxes() as u64 + self.num_robots as u64
    }

    /// Reject dimensions or counts that cannot produce a scene.
    pub fn validate(&self) -> WhResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(WhError::InvalidConfiguration(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height,
            )));
        }
        let area = self.width as u64 * self.height as u64;
        if area > usize::MAX as u64 {
            return Err(WhError::InvalidConfiguration(format!(
                "grid {}x{} is too large",
                self.width, self.height,
            )));
        }
        let needed = self.occupied_cells();
        if needed > area {
            return Err(WhError::InvalidConfiguration(format!(
                "{} racks + {} boxes + {} robots need {needed} cells but the grid has {area}",
                self.racks_needed(),
                self.initial_loose_boxes(),
                self.num_robots,
            )));
        }
        Ok(())
    }
}
