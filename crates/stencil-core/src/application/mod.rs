//! Application layer for Stencil.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldEngine, ParameterResolver)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    BundleInfo, // DTO for bundle metadata
    ParameterResolver,
    ScaffoldEngine,
};

// Re-export port traits (for adapter implementation)
pub use ports::{BundleRegistry, Filesystem, ParameterPrompt};

pub use error::ApplicationError;
