//! Scaffold Engine - main application orchestrator.
//!
//! The engine splits scaffolding into two phases:
//! 1. `plan` - render every template file against the resolved parameters
//!    and record what already exists at the target (no writes);
//! 2. `apply` - walk the plan in order, writing, skipping, overwriting, or
//!    merging per the conflict policy, tolerating per-file failures.
//!
//! The split keeps dry-run trivially correct: preview and real run share the
//! same plan.

use std::collections::HashSet;
use std::path::{Component, Path};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{BundleRegistry, Filesystem},
    },
    domain::{
        ConflictPolicy, Decision, DomainError, ExistingStatus, FileContent, FileOutcome,
        PlanEntry, RenderedContent, ResolvedParameters, ScaffoldPlan, ScaffoldResult,
        TemplateBundle, substitute,
    },
    error::StencilResult,
};

/// Bundle metadata for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BundleInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub files: usize,
    pub parameters: usize,
}

impl From<&TemplateBundle> for BundleInfo {
    fn from(bundle: &TemplateBundle) -> Self {
        Self {
            id: bundle.id.to_string(),
            name: bundle.id.name().to_string(),
            description: bundle.metadata.description.clone(),
            tags: bundle.metadata.tags.clone(),
            files: bundle.files.len(),
            parameters: bundle.schema.len(),
        }
    }
}

/// Main scaffolding engine.
///
/// Owns its adapters; one engine serves the whole invocation.
pub struct ScaffoldEngine {
    registry: Box<dyn BundleRegistry>,
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldEngine {
    /// Create a new engine with the given adapters.
    pub fn new(registry: Box<dyn BundleRegistry>, filesystem: Box<dyn Filesystem>) -> Self {
        Self { registry, filesystem }
    }

    /// Fetch a bundle for parameter resolution or display.
    pub fn bundle(&self, name: &str) -> StencilResult<TemplateBundle> {
        self.registry.get(name)
    }

    /// List all registered bundles.
    pub fn list_bundles(&self) -> StencilResult<Vec<BundleInfo>> {
        let bundles = self.registry.list()?;
        Ok(bundles.iter().map(BundleInfo::from).collect())
    }

    /// Compute a scaffold plan: every file rendered, nothing written.
    ///
    /// Deterministic for identical inputs and identical on-disk state; the
    /// only I/O is per-target existence checks.
    #[instrument(skip_all, fields(bundle = %bundle_name, root = %target_root.display()))]
    pub fn plan(
        &self,
        bundle_name: &str,
        params: &ResolvedParameters,
        target_root: &Path,
    ) -> StencilResult<ScaffoldPlan> {
        let bundle = self.registry.get(bundle_name)?;

        let mut entries = Vec::with_capacity(bundle.files.len());
        let mut seen = HashSet::new();

        for file in &bundle.files {
            let relative = substitute(&file.path, &file.path, params)?;
            check_rendered_path(&relative)?;

            // Parameters could collapse two template paths onto one target.
            if !seen.insert(relative.clone()) {
                return Err(DomainError::DuplicatePath { path: relative }.into());
            }

            let content = match &file.content {
                FileContent::Text(source) => {
                    RenderedContent::Text(substitute(source.as_str(), &file.path, params)?)
                }
                FileContent::Binary(bytes) => RenderedContent::Binary(bytes.clone()),
            };

            let target = target_root.join(&relative);
            let existing = if self.filesystem.exists(&target) {
                ExistingStatus::Present
            } else {
                ExistingStatus::Absent
            };

            entries.push(PlanEntry {
                relative: relative.into(),
                target,
                content,
                existing,
                merge: file.merge,
            });
        }

        info!(files = entries.len(), "plan computed");
        Ok(ScaffoldPlan {
            bundle: bundle.id.to_string(),
            root: target_root.to_path_buf(),
            entries,
        })
    }

    /// Execute a plan under the given conflict policy.
    ///
    /// Iterates in plan order. One file's failure is recorded and the run
    /// continues; the caller inspects `ScaffoldResult::success()` for the
    /// overall verdict.
    #[instrument(skip_all, fields(bundle = %plan.bundle, mode = %policy.mode()))]
    pub fn apply(&self, plan: &ScaffoldPlan, policy: ConflictPolicy) -> StencilResult<ScaffoldResult> {
        let mut result = ScaffoldResult::new();

        for entry in &plan.entries {
            let outcome = if !entry.exists() {
                self.write_entry(entry).map_or_else(
                    |e| FileOutcome::Failed { reason: e.to_string() },
                    |()| FileOutcome::Written,
                )
            } else {
                match policy.decide(entry) {
                    Decision::Skip => {
                        if policy.mode() == crate::domain::ConflictMode::Merge {
                            warn!(path = %entry.relative.display(), "not mergeable, skipping");
                        }
                        FileOutcome::Skipped
                    }
                    Decision::Overwrite => self.write_entry(entry).map_or_else(
                        |e| FileOutcome::Failed { reason: e.to_string() },
                        |()| FileOutcome::Overwritten,
                    ),
                    Decision::Merge => self.merge_entry(entry).unwrap_or_else(|e| {
                        FileOutcome::Failed { reason: e.to_string() }
                    }),
                }
            };

            debug!(path = %entry.relative.display(), outcome = %outcome, "applied");
            result.record(&entry.relative, outcome);
        }

        if result.success() {
            info!(
                written = result.written(),
                skipped = result.skipped(),
                overwritten = result.overwritten(),
                merged = result.merged(),
                "apply completed"
            );
        } else {
            warn!(failed = result.failed(), "apply completed with failures");
        }

        Ok(result)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Write one entry, creating parent directories as needed.
    fn write_entry(&self, entry: &PlanEntry) -> StencilResult<()> {
        if let Some(parent) = entry.target.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem
            .write_file(&entry.target, entry.content.as_bytes())
    }

    /// Append-merge one entry into its existing target.
    ///
    /// If the existing file already contains the rendered content the file
    /// is left alone (`Skipped`), which makes merge idempotent.
    fn merge_entry(&self, entry: &PlanEntry) -> StencilResult<FileOutcome> {
        let RenderedContent::Text(addition) = &entry.content else {
            warn!(path = %entry.relative.display(), "binary file cannot merge, skipping");
            return Ok(FileOutcome::Skipped);
        };

        let existing_bytes = self.filesystem.read_file(&entry.target)?;
        let existing = String::from_utf8(existing_bytes).map_err(|_| {
            ApplicationError::FilesystemError {
                path: entry.target.clone(),
                reason: "existing file is not valid UTF-8".into(),
            }
        })?;

        if existing.contains(addition.trim_end()) {
            return Ok(FileOutcome::Skipped);
        }

        let mut merged = existing;
        if !merged.is_empty() && !merged.ends_with('\n') {
            merged.push('\n');
        }
        merged.push_str(addition);

        self.filesystem.write_file(&entry.target, merged.as_bytes())?;
        Ok(FileOutcome::Merged)
    }
}

/// Rendered paths must stay relative and inside the root even after
/// parameter values are spliced in.
fn check_rendered_path(path: &str) -> Result<(), DomainError> {
    let p = Path::new(path);
    if p.is_absolute() {
        return Err(DomainError::AbsolutePathNotAllowed { path: path.into() });
    }
    if p.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(DomainError::PathEscapesRoot { path: path.into() });
    }
    Ok(())
}
