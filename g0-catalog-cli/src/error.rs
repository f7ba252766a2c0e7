use g0_catalog_lib::{PipelineError, SettingsError};
use thiserror::Error;

/// Errors that abort a CLI command (exit code 2).
///
/// Findings such as parse errors or bundle violations are not errors here;
/// commands report them and return [`crate::commands::Outcome::Fail`].
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Pipeline could not run to completion
    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    /// Settings file missing values or malformed
    #[error("Config error: {0}")]
    Settings(#[from] SettingsError),

    /// JSON report serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Logger could not be installed
    #[error("Logging error: {0}")]
    Logging(String),
}

impl CliError {
    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    pub(crate) fn logging(msg: impl Into<String>) -> Self {
        Self::Logging(msg.into())
    }
}
