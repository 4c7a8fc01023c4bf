//! Error types for the scoring engine

use thiserror::Error;

/// Failures reported by the engine.
///
/// Every variant is deterministic: the same inputs always produce the same
/// error, so callers report rather than retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("unknown material '{0}'")]
    UnknownMaterial(String),

    #[error("unknown climate zone '{0}' (expected hot, temperate or cold)")]
    UnknownClimateZone(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
