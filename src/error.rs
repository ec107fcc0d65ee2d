use std::collections::TryReserveError;

use crate::config::ConfigError;

/// Errors surfaced by filter construction and the batch-level API.
#[derive(Debug, thiserror::Error)]
pub enum PhaseOffsetError {
    #[error("cannot allocate offset estimates for {vlen} carriers")]
    Allocation {
        vlen: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("smoothing factor {0} outside [0, 1]")]
    AlphaOutOfRange(f32),

    #[error("item width mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("output buffer too short: need {needed}, got {actual}")]
    OutputTooShort { needed: usize, actual: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, PhaseOffsetError>;
