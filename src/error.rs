use thiserror::Error;

/// Error types for the bilingual synchronisation crate
///
/// Only providers, configuration loading and the CLI ever hand these to a
/// caller. The synchronizer itself swallows them and leaves fields unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Invalid or missing configuration (API key, provider name, ...)
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Transport failure talking to a provider, including timeouts
    #[error("Network error: {0}")]
    NetworkError(String),
    /// The provider could not classify a text
    #[error("Detection error: {0}")]
    DetectionError(String),
    /// The provider could not translate a text
    #[error("Translation error: {0}")]
    TranslationError(String),
    /// A language code with characters outside `[A-Za-z0-9_-]`
    #[error("Invalid language code: {0}")]
    InvalidLanguage(String),
    /// A record that is not a JSON object, or a field that is not a string
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    /// Filesystem or stdin failure
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<reqwest::Error> for SyncError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            SyncError::NetworkError(format!("request timed out: {}", error))
        } else {
            SyncError::NetworkError(error.to_string())
        }
    }
}

impl From<std::io::Error> for SyncError {
    fn from(error: std::io::Error) -> Self {
        SyncError::Io(error.to_string())
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(error: serde_json::Error) -> Self {
        SyncError::InvalidRecord(error.to_string())
    }
}

/// Result type for synchronisation and provider operations
pub type SyncResult<T> = Result<T, SyncError>;
