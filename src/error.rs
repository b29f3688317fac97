//! Error types for the planning pipeline.
//!
//! Fatal conditions (missing configuration, missing schedule document) abort
//! the run before any allocation happens. Row-level parse problems are not
//! errors at all; the schedule parser skips malformed rows silently.

use thiserror::Error;

/// Errors surfaced by configuration loading, planning, and publishing.
#[derive(Error, Debug)]
pub enum PlanError {
    /// Required configuration file or field absent or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Schedule document not found at any candidate location.
    #[error("schedule not found; tried: {0}")]
    ScheduleNotFound(String),

    /// File I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend request failures while publishing.
    #[error("HTTP error: {0}")]
    Http(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PlanError>;

impl PlanError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = PlanError::config("sprints.capacity_points must be at least 1");
        assert_eq!(
            err.to_string(),
            "configuration error: sprints.capacity_points must be at least 1"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PlanError = io_err.into();
        assert!(matches!(err, PlanError::Io(_)));
    }
}
