//! `wh-core` — foundational types for the warehouse robot simulation.
//!
//! This crate is a dependency of every other `wh-*` crate.  It has no `wh-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`coord`]       | `Coord`, `Direction` and the E/W/N/S scan order       |
//! | [`cell`]        | `Cell` states and their integer codes                 |
//! | [`grid`]        | `Grid`, `GridSnapshot`                                |
//! | [`ids`]         | `RobotId`                                             |
//! | [`rng`]         | `SimRng`                                              |
//! | [`config`]      | `WarehouseConfig`                                     |
//! | [`error`]       | `WhError`, `WhResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config and snapshots.    |

pub mod cell;
pub mod config;
pub mod coord;
pub mod error;
pub mod grid;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::{Cell, RACK_CAPACITY, ROBOT_CODE};
pub use config::{BOXES_PER_RACK, WarehouseConfig};
pub use coord::{Coord, Direction};
pub use error::{WhError, WhResult};
pub use grid::{Grid, GridSnapshot};
pub use ids::RobotId;
pub use rng::SimRng;
