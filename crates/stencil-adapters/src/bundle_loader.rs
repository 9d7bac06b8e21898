//! Filesystem-based bundle loading.
//!
//! A bundle on disk is a directory containing a `bundle.toml` manifest plus
//! the template files themselves:
//!
//! ```text
//! my-bundle/
//! ├── bundle.toml
//! ├── README.md
//! └── src/
//!     └── {{project_name_snake}}/
//!         └── __init__.py
//! ```
//!
//! The manifest declares identity, parameters, and per-file options:
//!
//! ```toml
//! [bundle]
//! name        = "my-bundle"
//! version     = "1.0.0"
//! description = "My local bundle"
//! tags        = ["python"]
//!
//! [[params]]
//! name        = "project_name"
//! description = "Project name"
//! rule        = "slug"          # non-empty | slug | version
//! # default   = "demo"
//! # one_of    = ["lib", "app"]  # replaces `rule`
//!
//! [[files]]
//! path  = ".gitignore"
//! merge = "append"
//! ```
//!
//! Every file under the directory except `bundle.toml` becomes a
//! [`TemplateFile`]. UTF-8 files are treated as text templates (placeholder
//! substitution applies); anything else is carried as binary and copied
//! verbatim.
//!
//! # Discovery
//!
//! [`discover_bundles`] probes, in order, `$STENCIL_BUNDLES_DIR` and
//! `./bundles`, loading from the first directory that exists. A directory
//! that fails to parse is skipped with a `WARN`; it never aborts startup.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use stencil_core::domain::{
    BundleId, BundleMetadata, DomainError, ParameterSchema, ParameterSpec, TemplateBundle,
    TemplateFile, ValidationRule,
};

// ── Discovery ─────────────────────────────────────────────────────────────────

/// Load user bundles from the first existing candidate directory.
///
/// Returns an empty `Vec` when no directory is found; the built-in bundles
/// keep the registry useful regardless.
#[instrument]
pub fn discover_bundles() -> Vec<TemplateBundle> {
    for candidate in candidate_paths() {
        debug!(path = %candidate.display(), "checking candidate bundles path");

        if !candidate.is_dir() {
            continue;
        }

        let loader = FilesystemBundleLoader::new(&candidate);
        match loader.load_all() {
            Ok(bundles) if !bundles.is_empty() => {
                info!(
                    path = %candidate.display(),
                    count = bundles.len(),
                    "user bundles loaded"
                );
                return bundles;
            }
            Ok(_) => {
                debug!(path = %candidate.display(), "directory contains no bundles");
            }
            Err(e) => {
                warn!(path = %candidate.display(), error = %e, "failed to read bundles directory");
            }
        }
    }

    Vec::new()
}

/// Ordered candidate directories: `$STENCIL_BUNDLES_DIR`, then `./bundles`.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(2);
    if let Ok(env_dir) = std::env::var("STENCIL_BUNDLES_DIR") {
        paths.push(PathBuf::from(env_dir));
    }
    paths.push(PathBuf::from("bundles"));
    paths
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads bundles from a directory of `bundle.toml`-described subdirectories.
pub struct FilesystemBundleLoader {
    root: PathBuf,
}

impl FilesystemBundleLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load every bundle under the root.
    ///
    /// A subdirectory that fails to parse is skipped with a `WARN`; a
    /// root that cannot be read at all is an error.
    pub fn load_all(&self) -> Result<Vec<TemplateBundle>, DomainError> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| {
            DomainError::InvalidBundle(format!(
                "cannot read bundles directory {}: {}",
                self.root.display(),
                e
            ))
        })?;

        let mut bundles = Vec::new();
        for entry in entries.flatten() {
            let dir = entry.path();
            if !dir.is_dir() || !dir.join("bundle.toml").is_file() {
                continue;
            }

            match self.load_bundle(&dir) {
                Ok(bundle) => {
                    debug!(bundle = %bundle.id, "bundle loaded");
                    bundles.push(bundle);
                }
                Err(e) => {
                    warn!(path = %dir.display(), error = %e, "skipping invalid bundle");
                }
            }
        }

        bundles.sort_by(|a, b| a.id.name().cmp(b.id.name()));
        Ok(bundles)
    }

    /// Load a single bundle directory.
    pub fn load_bundle(&self, dir: &Path) -> Result<TemplateBundle, DomainError> {
        let manifest_path = dir.join("bundle.toml");
        let manifest_text = std::fs::read_to_string(&manifest_path).map_err(|e| {
            DomainError::InvalidBundle(format!("cannot read {}: {}", manifest_path.display(), e))
        })?;

        let manifest: Manifest = toml::from_str(&manifest_text).map_err(|e| {
            DomainError::InvalidBundle(format!("bad manifest {}: {}", manifest_path.display(), e))
        })?;

        let mut builder = TemplateBundle::builder()
            .id(BundleId::new(&manifest.bundle.name, &manifest.bundle.version))
            .metadata(manifest.bundle.metadata())
            .schema(manifest.schema()?);

        for file in self.collect_files(dir, &manifest)? {
            builder = builder.add_file(file);
        }

        builder.build()
    }

    /// Walk the bundle directory and turn every non-manifest file into a
    /// `TemplateFile`, applying per-file manifest options.
    fn collect_files(
        &self,
        dir: &Path,
        manifest: &Manifest,
    ) -> Result<Vec<TemplateFile>, DomainError> {
        let mut files = Vec::new();

        // Deterministic order: sort by file name so loading is stable across
        // platforms and filesystems.
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                DomainError::InvalidBundle(format!("walk failed under {}: {}", dir.display(), e))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let rel = entry
                .path()
                .strip_prefix(dir)
                .map_err(|_| DomainError::InvalidBundle("path outside bundle root".into()))?;
            let rel = normalize(rel);
            if rel == "bundle.toml" {
                continue;
            }

            let bytes = std::fs::read(entry.path()).map_err(|e| {
                DomainError::InvalidBundle(format!("cannot read {}: {}", entry.path().display(), e))
            })?;

            let mut file = match String::from_utf8(bytes) {
                Ok(text) => TemplateFile::text(rel.clone(), text),
                Err(not_utf8) => TemplateFile::binary(rel.clone(), not_utf8.into_bytes()),
            };

            if manifest.merge_append(&rel) {
                file = file.mergeable();
            }

            files.push(file);
        }

        Ok(files)
    }
}

/// Render a relative path with forward slashes regardless of platform.
fn normalize(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

// ── Manifest schema ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct Manifest {
    bundle: ManifestBundle,
    #[serde(default)]
    params: Vec<ManifestParam>,
    #[serde(default)]
    files: Vec<ManifestFileRule>,
}

impl Manifest {
    fn schema(&self) -> Result<ParameterSchema, DomainError> {
        let mut schema = ParameterSchema::new();
        for param in &self.params {
            schema = schema.with(param.spec()?);
        }
        Ok(schema)
    }

    fn merge_append(&self, rel: &str) -> bool {
        self.files
            .iter()
            .any(|f| f.path == rel && f.merge.as_deref() == Some("append"))
    }
}

#[derive(Debug, Deserialize)]
struct ManifestBundle {
    name: String,
    #[serde(default = "default_version")]
    version: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
}

impl ManifestBundle {
    fn metadata(&self) -> BundleMetadata {
        let mut metadata = BundleMetadata::new(&self.description);
        for tag in &self.tags {
            metadata = metadata.with_tag(tag);
        }
        metadata
    }
}

fn default_version() -> String {
    "1.0.0".into()
}

#[derive(Debug, Deserialize)]
struct ManifestParam {
    name: String,
    #[serde(default)]
    description: String,
    rule: Option<String>,
    one_of: Option<Vec<String>>,
    default: Option<String>,
}

impl ManifestParam {
    fn spec(&self) -> Result<ParameterSpec, DomainError> {
        let rule = match (&self.one_of, self.rule.as_deref()) {
            (Some(options), _) => ValidationRule::OneOf(options.clone()),
            (None, Some("non-empty") | None) => ValidationRule::NonEmpty,
            (None, Some("slug")) => ValidationRule::Slug,
            (None, Some("version")) => ValidationRule::Version,
            (None, Some(other)) => {
                return Err(DomainError::InvalidBundle(format!(
                    "unknown validation rule '{}' for parameter '{}'",
                    other, self.name
                )));
            }
        };

        let mut spec = ParameterSpec::new(&self.name, &self.description, rule);
        if let Some(default) = &self.default {
            spec = spec.with_default(default);
        }
        Ok(spec)
    }
}

#[derive(Debug, Deserialize)]
struct ManifestFileRule {
    path: String,
    merge: Option<String>,
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use stencil_core::domain::{FileContent, MergeStrategy};
    use tempfile::TempDir;

    const MANIFEST: &str = r#"
[bundle]
name        = "local-notes"
version     = "0.2.0"
description = "Notes scaffolding"
tags        = ["notes"]

[[params]]
name        = "project_name"
description = "Project name"
rule        = "slug"

[[params]]
name    = "layout"
one_of  = ["flat", "nested"]
default = "flat"

[[files]]
path  = ".gitignore"
merge = "append"
"#;

    fn seed_bundle(root: &Path, name: &str) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(dir.join("notes")).unwrap();
        fs::write(dir.join("bundle.toml"), MANIFEST).unwrap();
        fs::write(dir.join("README.md"), "# {{project_name}}\n").unwrap();
        fs::write(dir.join(".gitignore"), "*.tmp\n").unwrap();
        fs::write(dir.join("notes/intro.md"), "Intro\n").unwrap();
        dir
    }

    #[test]
    fn load_bundle_parses_manifest_and_files() {
        let temp = TempDir::new().unwrap();
        let dir = seed_bundle(temp.path(), "local-notes");

        let loader = FilesystemBundleLoader::new(temp.path());
        let bundle = loader.load_bundle(&dir).unwrap();

        assert_eq!(bundle.id.to_string(), "local-notes@0.2.0");
        assert_eq!(bundle.metadata.description, "Notes scaffolding");
        assert_eq!(bundle.files.len(), 3);
        assert_eq!(bundle.schema.len(), 2);
        assert!(matches!(
            bundle.schema.get("layout").unwrap().rule,
            ValidationRule::OneOf(_)
        ));
    }

    #[test]
    fn manifest_is_not_a_template_file() {
        let temp = TempDir::new().unwrap();
        let dir = seed_bundle(temp.path(), "b");

        let bundle = FilesystemBundleLoader::new(temp.path())
            .load_bundle(&dir)
            .unwrap();
        assert!(bundle.files.iter().all(|f| f.path != "bundle.toml"));
    }

    #[test]
    fn merge_flag_applies_from_manifest() {
        let temp = TempDir::new().unwrap();
        let dir = seed_bundle(temp.path(), "b");

        let bundle = FilesystemBundleLoader::new(temp.path())
            .load_bundle(&dir)
            .unwrap();
        let gitignore = bundle.files.iter().find(|f| f.path == ".gitignore").unwrap();
        let readme = bundle.files.iter().find(|f| f.path == "README.md").unwrap();
        assert_eq!(gitignore.merge, MergeStrategy::Append);
        assert_eq!(readme.merge, MergeStrategy::None);
    }

    #[test]
    fn binary_files_are_detected() {
        let temp = TempDir::new().unwrap();
        let dir = seed_bundle(temp.path(), "b");
        fs::write(dir.join("logo.bin"), [0u8, 159, 146, 150]).unwrap();

        let bundle = FilesystemBundleLoader::new(temp.path())
            .load_bundle(&dir)
            .unwrap();
        let logo = bundle.files.iter().find(|f| f.path == "logo.bin").unwrap();
        assert!(matches!(logo.content, FileContent::Binary(_)));
    }

    #[test]
    fn load_all_skips_broken_bundles() {
        let temp = TempDir::new().unwrap();
        seed_bundle(temp.path(), "good");

        let broken = temp.path().join("broken");
        fs::create_dir_all(&broken).unwrap();
        fs::write(broken.join("bundle.toml"), "not [valid toml").unwrap();

        let bundles = FilesystemBundleLoader::new(temp.path()).load_all().unwrap();
        assert_eq!(bundles.len(), 1);
        assert_eq!(bundles[0].id.name(), "local-notes");
    }

    #[test]
    fn load_all_ignores_plain_directories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("no-manifest")).unwrap();

        let bundles = FilesystemBundleLoader::new(temp.path()).load_all().unwrap();
        assert!(bundles.is_empty());
    }

    #[test]
    fn unknown_rule_is_rejected() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("b");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("bundle.toml"),
            "[bundle]\nname = \"b\"\n\n[[params]]\nname = \"x\"\nrule = \"regex\"\n",
        )
        .unwrap();
        fs::write(dir.join("f.txt"), "x").unwrap();

        let err = FilesystemBundleLoader::new(temp.path())
            .load_bundle(&dir)
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidBundle(_)));
    }
}
