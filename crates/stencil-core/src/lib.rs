//! Stencil Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Stencil
//! project scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          stencil-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (ScaffoldEngine, ParameterResolver)   │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Driven: Registry, Filesystem, Prompt) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     stencil-adapters (Infrastructure)   │
//! │  (InMemoryRegistry, LocalFilesystem..)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (TemplateBundle, ScaffoldPlan, Policy) │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```text
//! use stencil_core::{
//!     application::{ParameterResolver, ScaffoldEngine},
//!     domain::{ConflictMode, ConflictPolicy},
//! };
//!
//! // 1. Resolve parameters against the bundle schema
//! let params = ParameterResolver::non_interactive().resolve(&schema, &provided)?;
//!
//! // 2. Use the engine (with injected adapters)
//! let engine = ScaffoldEngine::new(registry, filesystem);
//! let plan = engine.plan("pytest-setup", &params, "./my-project".as_ref())?;
//! let result = engine.apply(&plan, ConflictPolicy::new(ConflictMode::Skip))?;
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ParameterResolver, ScaffoldEngine,
        ports::{BundleRegistry, Filesystem, ParameterPrompt},
    };
    pub use crate::domain::{
        BundleId, BundleMetadata, ConflictMode, ConflictPolicy, FileContent, FileOutcome,
        MergeStrategy, ParameterSchema, ParameterSpec, ResolvedParameters, ScaffoldPlan,
        ScaffoldResult, TemplateBundle, TemplateFile, TemplateSource, ValidationRule,
    };
    pub use crate::error::{StencilError, StencilResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
