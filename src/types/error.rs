use thiserror::Error;

/// contribgraph error types
#[derive(Error, Debug)]
pub enum ContribError {
    /// Request failed (transport error or non-success status)
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Response body was not a JSON object
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for contribgraph
pub type Result<T> = std::result::Result<T, ContribError>;
