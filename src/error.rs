use thiserror::Error;

/// Unified error type for release-train operations
#[derive(Error, Debug)]
pub enum ReleaseTrainError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid workflow parameters: {0}")]
    Params(String),

    #[error("Substitution error: {0}")]
    Substitution(String),

    #[error("External process error: {0}")]
    Process(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-train
pub type Result<T> = std::result::Result<T, ReleaseTrainError>;

impl ReleaseTrainError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseTrainError::Config(msg.into())
    }

    /// Create a workflow parameter error with context
    pub fn params(msg: impl Into<String>) -> Self {
        ReleaseTrainError::Params(msg.into())
    }

    /// Create a substitution error with context
    pub fn substitution(msg: impl Into<String>) -> Self {
        ReleaseTrainError::Substitution(msg.into())
    }

    /// Create an external process error with context
    pub fn process(msg: impl Into<String>) -> Self {
        ReleaseTrainError::Process(msg.into())
    }
}
