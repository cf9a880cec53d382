use thiserror::Error;

/// Unified error type for auto-changeset operations
#[derive(Error, Debug)]
pub enum ChangesetError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Package metadata error: {0}")]
    Package(String),

    #[error("Command failed: {0}")]
    Command(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for Results in auto-changeset
pub type Result<T> = std::result::Result<T, ChangesetError>;

impl ChangesetError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChangesetError::Config(msg.into())
    }

    /// Create a package metadata error with context
    pub fn package(msg: impl Into<String>) -> Self {
        ChangesetError::Package(msg.into())
    }

    /// Create an external command error with context
    pub fn command(msg: impl Into<String>) -> Self {
        ChangesetError::Command(msg.into())
    }
}
