//! # Template Bundle Aggregate
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ TemplateBundle (Aggregate Root)                             │
//! │  ├── BundleId (Entity)                                      │
//! │  ├── BundleMetadata (Value Object)                          │
//! │  ├── ParameterSchema (Value Object, see schema.rs)          │
//! │  └── Vec<TemplateFile> (Value Objects, ordered)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! A bundle is a named, versioned blueprint: an ordered set of file templates
//! plus the parameters those templates require. Bundles are built once at
//! process start and never mutated afterwards; everything downstream
//! (planning, rendering, conflict handling) treats them as immutable input.
//!
//! **Identity vs equality:** two bundles with the same [`BundleId`]
//! (`python-project@1.0.0`) are the same blueprint; there is no per-instance
//! identity because bundles are never persisted or hot-reloaded mid-run.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::domain::error::DomainError;
use crate::domain::schema::ParameterSchema;

// ============================================================================
// Bundle Identity
// ============================================================================

/// Unique identifier for a bundle.
///
/// ## Format
///
/// Human-readable: `name@version` (e.g., `pytest-setup@1.0.0`). Lookup by
/// bare name is the common case; the version is carried for display and
/// future version-range matching.
///
/// ## Constraints
///
/// - Name cannot contain `@` (enforced by `assert!` in constructor)
/// - Version follows SemVer in practice, but stored as opaque string
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BundleId {
    /// Bundle name (e.g., "pytest-setup")
    name: String,
    /// SemVer version string (e.g., "1.0.0")
    version: String,
}

impl BundleId {
    /// Create a new bundle ID.
    ///
    /// # Panics
    ///
    /// Panics if name contains `@`. This is a programming error (invalid
    /// bundle name), not a runtime error.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        let name = name.into();
        let version = version.into();
        assert!(!name.contains('@'), "Bundle name cannot contain @: {}", name);
        Self { name, version }
    }

    /// Parse from string format `name@version`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBundle` if the format is wrong (missing `@` or
    /// multiple `@`).
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let parts: Vec<&str> = s.split('@').collect();
        if parts.len() != 2 {
            return Err(DomainError::InvalidBundle(format!(
                "Invalid bundle ID format: {}. Expected 'name@version'",
                s
            )));
        }
        Ok(Self::new(parts[0], parts[1]))
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for BundleId {
    /// Display as `name@version` format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

// ============================================================================
// Bundle Metadata
// ============================================================================

/// Human-readable metadata for CLI display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleMetadata {
    /// One-line description shown by `stencil list`.
    pub description: String,
    /// Free-form tags for grouping ("python", "docs", "ci").
    pub tags: Vec<String>,
}

impl BundleMetadata {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

// ============================================================================
// Template File Content
// ============================================================================

/// Where template text lives.
///
/// `Static` covers bundles compiled into the binary (zero-copy, `include_str!`
/// friendly); `Owned` covers bundles loaded from disk at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Static(&'static str),
    Owned(String),
}

impl TemplateSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s,
        }
    }
}

impl From<&'static str> for TemplateSource {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl From<String> for TemplateSource {
    fn from(s: String) -> Self {
        Self::Owned(s)
    }
}

/// File payload: textual templates get placeholder substitution, binary
/// payloads are copied to the target byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Text(TemplateSource),
    Binary(Vec<u8>),
}

impl FileContent {
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

/// How a file behaves when the target already exists and the merge conflict
/// mode is selected.
///
/// Only append-friendly files (ignore lists, hook configs) opt in; everything
/// else declines the capability and the policy falls back to Skip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Not mergeable; merge mode degrades to Skip for this file.
    #[default]
    None,
    /// Rendered content is appended unless the target already contains it.
    Append,
}

/// One file a bundle materializes.
///
/// The path is itself a template string: `src/{{project_name_snake}}/__init__.py`
/// resolves per invocation. Paths are validated to stay relative and inside
/// the target root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Relative target path, may embed `{{placeholders}}`.
    pub path: String,
    /// Text template or verbatim bytes.
    pub content: FileContent,
    /// Merge capability under `--mode merge`.
    pub merge: MergeStrategy,
}

impl TemplateFile {
    /// Textual file with placeholder substitution.
    pub fn text(path: impl Into<String>, content: impl Into<TemplateSource>) -> Self {
        Self {
            path: path.into(),
            content: FileContent::Text(content.into()),
            merge: MergeStrategy::None,
        }
    }

    /// Binary file copied verbatim (path still substituted).
    pub fn binary(path: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            content: FileContent::Binary(bytes),
            merge: MergeStrategy::None,
        }
    }

    /// Mark the file append-friendly for merge mode.
    pub fn mergeable(mut self) -> Self {
        self.merge = MergeStrategy::Append;
        self
    }

    /// A path is acceptable when it is relative and never walks above the
    /// target root. Checked against the raw template string, so `..` cannot
    /// be smuggled in via parameters either (placeholder values are validated
    /// separately by their rules).
    fn validate_path(&self) -> Result<(), DomainError> {
        let path = Path::new(&self.path);
        if path.is_absolute() {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: self.path.clone(),
            });
        }
        if path
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(DomainError::PathEscapesRoot {
                path: self.path.clone(),
            });
        }
        if self.path.is_empty() {
            return Err(DomainError::InvalidBundle("file path cannot be empty".into()));
        }
        Ok(())
    }
}

// ============================================================================
// Core Bundle Aggregate
// ============================================================================

/// The central domain aggregate: a named set of file templates plus the
/// parameter schema they require.
///
/// ## Invariants (enforced by `validate()`)
///
/// 1. `id.name` is non-empty
/// 2. The file list is non-empty
/// 3. All template paths are unique, relative, and root-contained
/// 4. The parameter schema has unique, well-formed names
///
/// ## Lifecycle
///
/// 1. **Definition:** built via [`TemplateBundleBuilder`] or loaded from a
///    manifest
/// 2. **Validation:** `validate()` before registration
/// 3. **Planning:** the engine renders paths/content into a `ScaffoldPlan`
#[derive(Debug, Clone)]
pub struct TemplateBundle {
    pub id: BundleId,
    pub metadata: BundleMetadata,
    pub schema: ParameterSchema,
    /// Ordered: apply processes files front to back, so parents-first
    /// layouts and deterministic reports come for free.
    pub files: Vec<TemplateFile>,
}

impl TemplateBundle {
    /// Start the builder pattern for fluent construction.
    pub fn builder() -> TemplateBundleBuilder {
        TemplateBundleBuilder::default()
    }

    /// Validate all invariants. Registries call this before accepting a
    /// bundle, so a registered bundle is always well-formed.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.name().is_empty() {
            return Err(DomainError::InvalidBundle("Bundle name cannot be empty".into()));
        }

        if self.files.is_empty() {
            return Err(DomainError::EmptyBundle {
                bundle_id: self.id.to_string(),
            });
        }

        let mut seen = HashSet::new();
        for file in &self.files {
            file.validate_path()?;
            if !seen.insert(file.path.as_str()) {
                return Err(DomainError::DuplicatePath {
                    path: file.path.clone(),
                });
            }
        }

        self.schema.validate()
    }
}

/// Builder for constructing bundles with validation at `build()`.
#[derive(Default)]
pub struct TemplateBundleBuilder {
    id: Option<BundleId>,
    metadata: Option<BundleMetadata>,
    schema: ParameterSchema,
    files: Vec<TemplateFile>,
}

impl TemplateBundleBuilder {
    pub fn id(mut self, id: BundleId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn metadata(mut self, metadata: BundleMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn schema(mut self, schema: ParameterSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Add a single file (accumulates).
    pub fn add_file(mut self, file: TemplateFile) -> Self {
        self.files.push(file);
        self
    }

    /// Consume builder and construct a validated `TemplateBundle`.
    ///
    /// # Errors
    ///
    /// - `InvalidBundle` if id is not set or the file list is empty
    /// - any invariant violation surfaced by `TemplateBundle::validate`
    pub fn build(self) -> Result<TemplateBundle, DomainError> {
        let bundle = TemplateBundle {
            id: self
                .id
                .ok_or_else(|| DomainError::InvalidBundle("missing required field: id".into()))?,
            metadata: self.metadata.unwrap_or_default(),
            schema: self.schema,
            files: self.files,
        };
        bundle.validate()?;
        Ok(bundle)
    }
}
