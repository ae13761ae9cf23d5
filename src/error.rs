//! Error types for the engine.
//!
//! World queries, generation and meshing are total and never fail. Only the
//! surfaces that touch the outside world (configuration files) return errors.

use thiserror::Error;

/// Main error type for the engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Convenience alias used by fallible engine entry points.
pub type EngineResult<T> = Result<T, EngineError>;
