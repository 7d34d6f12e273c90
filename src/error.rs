//! Error types surfaced by the engine (see spec §7).

use thiserror::Error;

/// Everything that can go wrong at the engine's public boundary.
///
/// The engine never retries internally; callers decide whether to discard
/// a point or abort a run.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("input vector has {got} dimensions, expected {expected}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),

    #[error("input vector contains a NaN or infinite value")]
    NonFinite,
}

/// Convenience alias used throughout the crate's fallible public surface.
pub type EngineResult<T> = Result<T, EngineError>;
