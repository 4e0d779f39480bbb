//! Warehouse error type.
//!
//! Higher crates define their own enums and wrap `WhError` as one variant
//! through `#[from]`.

use thiserror::Error;

/// The base error type shared by all `wh-*` crates.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WhError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x:      i64,
        y:      i64,
        width:  u32,
        height: u32,
    },

    #[error("unknown cell code {0}")]
    InvalidCellCode(i8),

    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

/// Shorthand result type for all `wh-*` crates.
pub type WhResult<T> = Result<T, WhError>;
