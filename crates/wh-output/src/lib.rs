//! `wh-output` — recording backends for the warehouse simulation.
//!
//! | Backend | Files created                                   |
//! |---------|-------------------------------------------------|
//! | CSV     | `grid_snapshots.csv`, `step_summaries.csv`      |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `wh_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wh_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, 1);
//! while !sim.is_complete() {
//!     sim.step_with(&mut obs);
//! }
//! sim.finish(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{CellRow, StepSummaryRow};
pub use writer::OutputWriter;
