// Domain errors - Error types for the domain layer

use std::fmt;

use crate::utils::time::format_clock;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// The video carries no anchors at clip-extraction time
    NoAnchorsSet { video: String },
    /// No anchor in the period sits at or before the requested clock
    NoAnchorBeforeTime { period: u32, clock: f64 },
    /// A chapter title does not read as `Period {int}, {real}`
    MalformedAnchorTitle { title: String },
    /// Chapter metadata text that cannot be read back
    MalformedMetadata(String),
    /// Anchor values outside their domain (zero period, negative or non-finite times)
    InvalidAnchor(String),
    /// Invalid arguments provided
    BadArgs(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NoAnchorsSet { video } => write!(f, "{} has no set anchors", video),
            DomainError::NoAnchorBeforeTime { period, clock } => write!(
                f,
                "No anchors set in period {} before {}",
                period,
                format_clock(*clock)
            ),
            DomainError::MalformedAnchorTitle { title } => write!(
                f,
                "Malformed anchor title '{}', expected 'Period <int>, <seconds>'",
                title
            ),
            DomainError::MalformedMetadata(msg) => write!(f, "Malformed chapter metadata: {}", msg),
            DomainError::InvalidAnchor(msg) => write!(f, "Invalid anchor: {}", msg),
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
