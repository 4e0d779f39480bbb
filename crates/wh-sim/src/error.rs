use thiserror::Error;
use wh_core::WhError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] WhError),

    #[error("invariant violated: {0}")]
    InvariantViolated(String),
}

pub type SimResult<T> = Result<T, SimError>;
