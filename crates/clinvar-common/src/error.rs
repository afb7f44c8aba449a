//! Error types for ClinVar ingestion

use thiserror::Error;

/// Result type alias for ClinVar operations
pub type Result<T> = std::result::Result<T, ClinvarError>;

/// Main error type for ClinVar ingestion
#[derive(Error, Debug)]
pub enum ClinvarError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid genome_version: {0}")]
    InvalidGenomeVersion(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// An external program ran but exited unsuccessfully
    #[error("Command `{program}` failed: {status}")]
    CommandFailed { program: String, status: String },

    #[error("FTP error: {0}")]
    Ftp(String),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClinvarError {
    /// Create a command failure error
    pub fn command_failed(program: impl Into<String>, status: impl ToString) -> Self {
        Self::CommandFailed {
            program: program.into(),
            status: status.to_string(),
        }
    }

    /// Create an engine error
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for errors raised by argument validation, before any side effect
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidGenomeVersion(_))
    }
}
