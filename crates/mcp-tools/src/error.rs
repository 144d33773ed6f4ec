//! Error types for the tool servers.
//!
//! Tools never return these to an MCP client; each tool renders its failure into the text it
//! returns. The enum exists so the lower layers can use `?`.

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    /// HTTP errors (weather API)
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Database errors (connect, query, commit)
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// Connecting to the database took too long
    #[error("database connection timed out after {}s", .0.as_secs())]
    ConnectTimeout(Duration),
}

/// Result type alias for tool operations.
pub type Result<T> = std::result::Result<T, ToolError>;
