//! Application services - use case orchestration.

pub mod resolver;
pub mod scaffold;

pub use resolver::ParameterResolver;
pub use scaffold::{BundleInfo, ScaffoldEngine};
