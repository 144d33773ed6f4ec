//! Error types for the filters.

use thiserror::Error;

/// Main error type for filters and the pipeline.
#[derive(Error, Debug)]
pub enum FilterError {
    /// A filter refused the request. The host must abort and surface `reason` to the user.
    #[error("{reason}")]
    Rejected { filter: String, reason: String },

    /// Configuration errors (invalid values, unreadable config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl FilterError {
    pub fn rejected(filter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            filter: filter.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// Failures of the translation endpoint. These never leave the translate filter.
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("translation endpoint not found (404): {url}")]
    NotFound { url: String },

    #[error("translation request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for filter operations.
pub type Result<T> = std::result::Result<T, FilterError>;
