//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A file write failed (per-file; recorded in the result, reported at
    /// the end of the run).
    #[error("Failed to write {path}: {reason}")]
    FileWrite { path: PathBuf, reason: String },

    /// Filesystem operation failed (stat, mkdir, read).
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Interactive input was required but no prompt is available.
    #[error("Interactive input required but not available")]
    PromptUnavailable,

    /// The user aborted an interactive prompt.
    #[error("Cancelled by user")]
    Cancelled,

    /// Adapter-internal lock poisoned.
    #[error("Registry lock error")]
    RegistryLockError,

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FileWrite { path, .. } | Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::PromptUnavailable => vec![
                "Provide every required parameter with -p key=value".into(),
                "Or run without --non-interactive in a terminal".into(),
            ],
            Self::Cancelled => vec!["Nothing further was written".into()],
            Self::RegistryLockError => vec![
                "The bundle registry is locked".into(),
                "Try again in a moment".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FileWrite { .. } | Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::RegistryLockError => ErrorCategory::Internal,
            Self::PromptUnavailable => ErrorCategory::Configuration,
            Self::Cancelled => ErrorCategory::Validation,
            Self::ValidationFailed(_) => ErrorCategory::Validation,
        }
    }
}
