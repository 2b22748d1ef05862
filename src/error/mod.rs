//! Error handling for the triage engine.

pub mod util;

use std::io;
use std::path::PathBuf;

use crate::kb::validator::ValidationReport;

/// Specialized error type for knowledge-base loading and case evaluation
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    /// Error opening or reading a file
    #[error("IO error for {path} ({purpose}): {source}")]
    Io {
        path: PathBuf,
        purpose: String,
        #[source]
        source: io::Error,
    },

    /// A document could not be parsed
    #[error("Failed to parse {document}: {source}")]
    Json {
        document: String,
        #[source]
        source: serde_json::Error,
    },

    /// The knowledge base failed its consistency checks
    #[error("{0}")]
    Consistency(ValidationReport),

    /// Invalid engine configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TriageError {
    /// Create an IO error carrying the path and what the file was needed for
    pub fn io(path: impl Into<PathBuf>, purpose: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            purpose: purpose.into(),
            source,
        }
    }

    /// Create a parse error for the named document
    pub fn json(document: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            document: document.into(),
            source,
        }
    }

    /// Returns the validation report if this is a consistency failure
    #[must_use]
    pub const fn validation_report(&self) -> Option<&ValidationReport> {
        match self {
            Self::Consistency(report) => Some(report),
            _ => None,
        }
    }
}

impl From<ValidationReport> for TriageError {
    fn from(report: ValidationReport) -> Self {
        Self::Consistency(report)
    }
}

/// Result type for triage operations
pub type Result<T> = std::result::Result<T, TriageError>;
