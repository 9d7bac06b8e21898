//! Infrastructure adapters for Stencil.
//!
//! This crate implements the ports defined in `stencil-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_bundles;
pub mod bundle_loader;
pub mod filesystem;
pub mod registry;

// Re-export commonly used adapters
pub use bundle_loader::{FilesystemBundleLoader, discover_bundles};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use registry::InMemoryRegistry;
