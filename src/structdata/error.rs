use thiserror::Error;

/// A filter line that could not be turned into a predicate.
///
/// These are reported to the user and the offending line is skipped; the
/// remaining lines of a filter set are still parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Failed to parse filter \"{0}\"")]
    Unparsable(String),

    #[error("Failed to parse comparison \"{0}\"")]
    Comparator(String),
}

#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, DataError>;
