// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Stencil.
//!
//! This module contains pure business logic with ZERO external dependencies.
//! All I/O, prompting, and bundle-loading concerns are handled via ports
//! (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No external crates**: Only std library + thiserror
//! - **Immutable entities**: Bundles never change after construction
//! - **Rich domain model**: Behavior lives in entities, not services
//!
// Public API - what the world sees
pub mod bundle;
pub mod error;
pub mod plan;
pub mod schema;
pub mod substitute;

// Re-exports for convenience
pub use bundle::{
    BundleId, BundleMetadata, FileContent, MergeStrategy, TemplateBundle, TemplateBundleBuilder,
    TemplateFile, TemplateSource,
};

pub use error::{DomainError, ErrorCategory};

pub use plan::{
    ConflictMode, ConflictPolicy, Decision, ExistingStatus, FileOutcome, PlanEntry,
    RenderedContent, ScaffoldPlan, ScaffoldResult,
};

pub use schema::{ParameterSchema, ParameterSpec, ResolvedParameters, ValidationRule};

pub use substitute::substitute;
