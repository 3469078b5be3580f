//! Error types for health checks

use thiserror::Error;

/// Result type alias for health-check operations
pub type Result<T> = std::result::Result<T, HealthError>;

/// Main error type for health-check operations
#[derive(Error, Debug)]
pub enum HealthError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to parse {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

#[derive(Debug)]
struct StringError(String);

impl std::fmt::Display for StringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for StringError {}

impl HealthError {
    /// Create a not-found error for a named entity
    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound(entity.into())
    }

    /// Create a network error from a message
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(Box::new(StringError(msg.into())))
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
