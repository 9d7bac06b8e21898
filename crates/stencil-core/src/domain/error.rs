// ============================================================================
// domain/error.rs - COMPREHENSIVE ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid bundle: {0}")]
    InvalidBundle(String),

    #[error("Bundle '{bundle_id}' has no files")]
    EmptyBundle { bundle_id: String },

    #[error("Duplicate path in bundle: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes the target root: {path}")]
    PathEscapesRoot { path: String },

    // ========================================================================
    // Parameter Errors
    // ========================================================================
    #[error("Missing required parameter: {name}")]
    MissingParameter { name: String },

    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Duplicate parameter in schema: {name}")]
    DuplicateParameter { name: String },

    // ========================================================================
    // Not Found Errors (404-level equivalent)
    // ========================================================================
    #[error("Unknown bundle: {name}")]
    UnknownBundle { name: String },

    // ========================================================================
    // Template Authoring Errors
    // ========================================================================
    #[error("Template '{path}' references undeclared placeholder '{placeholder}'")]
    TemplateError { path: String, placeholder: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidBundle(msg) => vec![
                "Check the bundle definition".into(),
                format!("Details: {}", msg),
            ],
            Self::UnknownBundle { name } => vec![
                format!("No bundle registered under '{}'", name),
                "Try: stencil list".into(),
            ],
            Self::MissingParameter { name } => vec![
                format!("Provide a value with: -p {}=<value>", name),
                "Or drop --non-interactive to be prompted".into(),
            ],
            Self::InvalidParameter { name, reason } => vec![
                format!("Parameter '{}': {}", name, reason),
                "Try: stencil show <bundle> to see the expected values".into(),
            ],
            Self::EmptyBundle { bundle_id } => vec![
                format!("Bundle '{}' is corrupted", bundle_id),
                "Please report this issue or use a different bundle".into(),
            ],
            Self::TemplateError { path, placeholder } => vec![
                format!("File '{}' uses '{{{{{}}}}}'", path, placeholder),
                "The bundle author must declare it in the parameter schema".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidBundle(_)
            | Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::PathEscapesRoot { .. }
            | Self::MissingParameter { .. }
            | Self::InvalidParameter { .. }
            | Self::DuplicateParameter { .. } => ErrorCategory::Validation,
            Self::UnknownBundle { .. } => ErrorCategory::NotFound,
            Self::EmptyBundle { .. } | Self::TemplateError { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
