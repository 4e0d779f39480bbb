//! `wh-sim` — step driver for the warehouse robot simulation.
//!
//! # One step
//!
//! ```text
//! on_snapshot(step, grid)            — floor before anyone acts
//! for robot in roster (fixed order):
//!   idle     → pick up adjacent box (E, W, N, S)   else random step
//!   carrying → drop on adjacent rack (E, W, N, S)  else random step
//!   (writes hit the grid immediately; later robots see them)
//! on_step_end(summary)
//! ```
//!
//! The simulation never decides it is done.  It exposes
//! [`Sim::is_complete`] and the counters; the driver chooses when to stop
//! calling [`Sim::step`].
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wh_core::WarehouseConfig;
//! use wh_sim::{Sim, SnapshotRecorder};
//!
//! let mut sim = Sim::new(WarehouseConfig::default())?;
//! let mut recorder = SnapshotRecorder::new();
//! while !sim.is_complete() && sim.steps_taken() < 10_000 {
//!     sim.step_with(&mut recorder);
//! }
//! sim.finish(&mut recorder);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod robot;
pub mod scene;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, SnapshotRecorder};
pub use robot::{Action, Robot};
pub use scene::Layout;
pub use sim::{Sim, StepSummary};
