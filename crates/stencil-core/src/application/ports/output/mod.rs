//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stencil-adapters` crate implements `Filesystem` and `BundleRegistry`;
//! the CLI implements `ParameterPrompt` on top of its terminal toolkit.

use crate::domain::{ParameterSpec, TemplateBundle};
use crate::error::StencilResult;
use std::path::Path;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stencil_adapters::filesystem::LocalFilesystem` (production)
/// - `stencil_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Content is bytes: textual templates are rendered before they reach
///   this port, binary payloads pass through untouched
/// - `write_file` must be all-or-nothing per file; the local adapter writes
///   to a temporary path and renames into place
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories. Idempotent.
    fn create_dir_all(&self, path: &Path) -> StencilResult<()>;

    /// Write content to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &[u8]) -> StencilResult<()>;

    /// Read a file's full content.
    fn read_file(&self, path: &Path) -> StencilResult<Vec<u8>>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for bundle lookup.
///
/// Registries are populated once at process start and read-only afterwards;
/// the trait therefore exposes no mutation.
///
/// Implemented by:
/// - `stencil_adapters::registry::InMemoryRegistry` (built-in + loaded bundles)
pub trait BundleRegistry: Send + Sync {
    /// Get a bundle by name. Fails with `UnknownBundle`.
    fn get(&self, name: &str) -> StencilResult<TemplateBundle>;

    /// List all registered bundles, sorted by name.
    fn list(&self) -> StencilResult<Vec<TemplateBundle>>;
}

/// Port for interactive parameter collection.
///
/// The resolver drives the loop (re-prompting on invalid input); the
/// implementation only has to ask once and report what the user typed.
pub trait ParameterPrompt {
    /// Ask for one parameter value.
    ///
    /// `retry_reason` carries the validation error of the previous attempt,
    /// if any, so the implementation can display it.
    ///
    /// Returns `Ok(None)` when the user cancels (EOF / escape); the whole
    /// invocation then aborts cleanly.
    fn prompt(
        &self,
        spec: &ParameterSpec,
        retry_reason: Option<&str>,
    ) -> StencilResult<Option<String>>;
}
