use std::path::Path;

use thiserror::Error;

/// Fatal errors that stop a pipeline run.
///
/// Per-file problems (unreadable or malformed sources, bundle violations)
/// are reported as data and never surface here.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// I/O error on a path the run cannot do without
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Directory traversal failed
    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: String,
        source: walkdir::Error,
    },

    /// Catalog or report serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `generatedAt` override could not be parsed
    #[error("Invalid timestamp '{0}': expected RFC 3339 or Unix seconds")]
    InvalidTimestamp(String),

    /// Drift baseline missing fields or malformed
    #[error("Invalid baseline {path}: {message}")]
    InvalidBaseline { path: String, message: String },

    /// Generic pipeline error with message
    #[error("{0}")]
    Other(String),
}

impl PipelineError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn walk(path: &Path, source: walkdir::Error) -> Self {
        Self::Walk {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn invalid_baseline(path: &Path, message: impl Into<String>) -> Self {
        Self::InvalidBaseline {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
