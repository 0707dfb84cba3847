use thiserror::Error;

/// Error type for the fallible edges of the engine: parsing, validation and storage.
///
/// Data conditions inside a projection (missing schedules, non-convergent payoff)
/// are reported in the result types instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid month: {0}")]
    InvalidMonth(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
