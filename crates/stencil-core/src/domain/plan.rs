//! Scaffold plans, conflict policy, and per-file outcomes.
//!
//! Planning and writing are split deliberately: `plan` is a side-effect-free
//! preview (the only I/O is existence checks), `apply` performs the writes.
//! The conflict decision sits between the two as a pure function of the plan
//! entry and the selected mode, which makes dry-run output and the real run
//! agree by construction.
//!
//! Per target file the lifecycle is:
//!
//! ```text
//! NotPlanned → Planned → {Written | Skipped | Overwritten | Merged | Failed}
//! ```
//!
//! All five right-hand states are terminal; no transition leaves a file
//! half-written (writes go through a temp-file-and-rename adapter).

use std::fmt;
use std::path::{Path, PathBuf};

// ============================================================================
// Plan
// ============================================================================

/// Whether the target path existed on disk at planning time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistingStatus {
    Absent,
    Present,
}

/// Fully rendered payload, ready to hit the disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedContent {
    Text(String),
    Binary(Vec<u8>),
}

impl RenderedContent {
    /// Byte view for writing.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(s) => s.as_bytes(),
            Self::Binary(b) => b,
        }
    }
}

/// One planned write: rendered path, rendered content, and what the engine
/// found at the target when the plan was computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    /// Rendered path, relative to the plan root.
    pub relative: PathBuf,
    /// Absolute (root-joined) target path.
    pub target: PathBuf,
    pub content: RenderedContent,
    pub existing: ExistingStatus,
    pub merge: crate::domain::MergeStrategy,
}

impl PlanEntry {
    pub fn exists(&self) -> bool {
        self.existing == ExistingStatus::Present
    }
}

/// Ordered, previewable result of resolving a bundle against parameters and
/// the current filesystem state.
///
/// Deterministic: identical inputs and identical on-disk state produce an
/// identical plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldPlan {
    /// Bundle the plan was computed from (`name@version`).
    pub bundle: String,
    /// Target root every entry resolves under.
    pub root: PathBuf,
    pub entries: Vec<PlanEntry>,
}

impl ScaffoldPlan {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose target already exists (the conflict set).
    pub fn conflicts(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries.iter().filter(|e| e.exists())
    }
}

// ============================================================================
// Conflict Policy
// ============================================================================

/// User-selected conflict mode. Always explicit, never inferred.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictMode {
    /// Never clobber an existing file (the safe default).
    #[default]
    Skip,
    /// Always overwrite existing files.
    Force,
    /// Append to append-friendly files; fall back to Skip elsewhere.
    Merge,
}

impl fmt::Display for ConflictMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Skip => "skip",
            Self::Force => "force",
            Self::Merge => "merge",
        };
        write!(f, "{s}")
    }
}

/// What to do with one conflicting file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Skip,
    Overwrite,
    Merge,
}

/// Per-file conflict decision for a whole apply run.
///
/// Pure: the decision depends only on the mode and the entry's declared
/// merge capability, so it can be evaluated during dry-run with no I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictPolicy {
    mode: ConflictMode,
}

impl ConflictPolicy {
    pub fn new(mode: ConflictMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ConflictMode {
        self.mode
    }

    /// Decide what happens to an entry whose target exists.
    ///
    /// Merge mode is a capability the entry may decline: files without an
    /// append strategy degrade to Skip (the engine logs the fallback).
    pub fn decide(&self, entry: &PlanEntry) -> Decision {
        match self.mode {
            ConflictMode::Skip => Decision::Skip,
            ConflictMode::Force => Decision::Overwrite,
            ConflictMode::Merge => match entry.merge {
                crate::domain::MergeStrategy::Append => Decision::Merge,
                crate::domain::MergeStrategy::None => Decision::Skip,
            },
        }
    }
}

// ============================================================================
// Result
// ============================================================================

/// Terminal state of one planned file after `apply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Written,
    Skipped,
    Overwritten,
    Merged,
    Failed { reason: String },
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Written => write!(f, "written"),
            Self::Skipped => write!(f, "skipped"),
            Self::Overwritten => write!(f, "overwritten"),
            Self::Merged => write!(f, "merged"),
            Self::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}

/// Per-invocation report: one outcome per planned file, in plan order.
///
/// Created fresh per `apply`, handed to the CLI for display, then discarded.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldResult {
    outcomes: Vec<(PathBuf, FileOutcome)>,
}

impl ScaffoldResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, path: impl Into<PathBuf>, outcome: FileOutcome) {
        self.outcomes.push((path.into(), outcome));
    }

    pub fn outcomes(&self) -> impl Iterator<Item = (&Path, &FileOutcome)> {
        self.outcomes.iter().map(|(p, o)| (p.as_path(), o))
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }

    pub fn written(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Written))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped))
    }

    pub fn overwritten(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Overwritten))
    }

    pub fn merged(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Merged))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    /// Overall success: no per-file failure. Skips are success.
    pub fn success(&self) -> bool {
        self.failed() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MergeStrategy;

    fn entry(merge: MergeStrategy, existing: ExistingStatus) -> PlanEntry {
        PlanEntry {
            relative: PathBuf::from("a.txt"),
            target: PathBuf::from("/tmp/a.txt"),
            content: RenderedContent::Text("hi".into()),
            existing,
            merge,
        }
    }

    #[test]
    fn skip_mode_always_skips() {
        let policy = ConflictPolicy::new(ConflictMode::Skip);
        let e = entry(MergeStrategy::Append, ExistingStatus::Present);
        assert_eq!(policy.decide(&e), Decision::Skip);
    }

    #[test]
    fn force_mode_always_overwrites() {
        let policy = ConflictPolicy::new(ConflictMode::Force);
        let e = entry(MergeStrategy::None, ExistingStatus::Present);
        assert_eq!(policy.decide(&e), Decision::Overwrite);
    }

    #[test]
    fn merge_mode_respects_capability() {
        let policy = ConflictPolicy::new(ConflictMode::Merge);
        let mergeable = entry(MergeStrategy::Append, ExistingStatus::Present);
        let plain = entry(MergeStrategy::None, ExistingStatus::Present);
        assert_eq!(policy.decide(&mergeable), Decision::Merge);
        assert_eq!(policy.decide(&plain), Decision::Skip);
    }

    #[test]
    fn result_counts_and_success() {
        let mut result = ScaffoldResult::new();
        result.record("a", FileOutcome::Written);
        result.record("b", FileOutcome::Skipped);
        result.record("c", FileOutcome::Overwritten);
        result.record("d", FileOutcome::Merged);
        assert_eq!(result.written(), 1);
        assert_eq!(result.skipped(), 1);
        assert_eq!(result.overwritten(), 1);
        assert_eq!(result.merged(), 1);
        assert!(result.success());

        result.record("e", FileOutcome::Failed { reason: "disk full".into() });
        assert_eq!(result.failed(), 1);
        assert!(!result.success());
    }

    #[test]
    fn plan_conflicts_filters_existing() {
        let plan = ScaffoldPlan {
            bundle: "demo@1.0.0".into(),
            root: PathBuf::from("/tmp"),
            entries: vec![
                entry(MergeStrategy::None, ExistingStatus::Absent),
                entry(MergeStrategy::None, ExistingStatus::Present),
            ],
        };
        assert_eq!(plan.conflicts().count(), 1);
    }
}
