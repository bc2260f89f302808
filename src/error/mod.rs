//! Error handling module for match-video

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for match-video operations
#[derive(Error, Debug)]
pub enum MatchVideoError {
    /// Anchor, resolver or argument error from the domain layer
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The media backend reported an error while probing a video
    #[error("Unable to read the metadata for {}, {message}", path.display())]
    MetadataRead { path: PathBuf, message: String },

    /// A required external tool is not available
    #[error("Tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// An external tool exited abnormally
    #[error("{tool} failed: {message}")]
    BackendFailed { tool: String, message: String },

    /// Tool output could not be understood
    #[error("Failed to parse {tool} output: {message}")]
    ParseError { tool: String, message: String },

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MatchVideoError {
    /// Create a backend failure error
    pub fn backend_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BackendFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse_error(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for match-video operations
pub type MatchVideoResult<T> = std::result::Result<T, MatchVideoError>;
