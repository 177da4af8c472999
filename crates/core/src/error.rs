//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Domain-level error.
///
/// Keep this focused on deterministic dispatch/parameter failures. Engine
/// and storage concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    /// The requested job name is not one of the defined queries.
    #[error("unknown job: {0}")]
    UnknownJob(String),

    /// A required job parameter was absent from the payload.
    #[error("missing parameter: {0}")]
    MissingParam(&'static str),

    /// A job parameter was present but of the wrong type.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParam { name: &'static str, reason: String },
}

impl AnalyticsError {
    pub fn unknown_job(name: impl Into<String>) -> Self {
        Self::UnknownJob(name.into())
    }

    pub fn invalid_param(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParam {
            name,
            reason: reason.into(),
        }
    }
}
