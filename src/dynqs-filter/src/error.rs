//! Error types for filter assembly

/// Result type for filter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Filter error type
///
/// Malformed query data never produces an error; offending keys are dropped.
/// Errors come from configuration or from user-supplied hooks.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("Custom hook for '{key}' failed: {message}")]
    Hook { key: String, message: String },
}

impl Error {
    /// Create a configuration error with a custom message
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a hook failure for the given query key
    pub fn hook(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Hook {
            key: key.into(),
            message: message.into(),
        }
    }
}
