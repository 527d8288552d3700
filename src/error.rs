//! Error types for the classic-agents crate

use thiserror::Error;

/// Main error type for the classic-agents crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("candidate grid for '{parameter}' is empty")]
    EmptyCandidateGrid { parameter: String },

    #[error("game state reports zero agents")]
    NoAgents,

    #[error("discount factor {value} must lie in [0, 1]")]
    InvalidDiscount { value: f64 },

    #[error("data/label length mismatch: {data} data points but {labels} labels")]
    LengthMismatch { data: usize, labels: usize },

    #[error("training set is empty")]
    EmptyTrainingSet,

    #[error("label '{label}' is not one of the legal labels")]
    UnknownLabel { label: String },

    #[error("invalid strategy '{input}'. Expected one of: {expected}")]
    ParseStrategy { input: String, expected: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
