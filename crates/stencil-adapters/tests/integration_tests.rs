//! Integration tests wiring the real adapters into the core engine.

use std::collections::BTreeMap;
use std::path::Path;

use stencil_adapters::{InMemoryRegistry, LocalFilesystem, MemoryFilesystem};
use stencil_core::application::ports::Filesystem;
use stencil_core::application::{ParameterResolver, ScaffoldEngine};
use stencil_core::domain::{ConflictMode, ConflictPolicy};
use tempfile::TempDir;

fn flags(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn engine_with_memory() -> (ScaffoldEngine, MemoryFilesystem) {
    let registry = InMemoryRegistry::with_builtin().unwrap();
    let fs = MemoryFilesystem::new();
    let engine = ScaffoldEngine::new(Box::new(registry), Box::new(fs.clone()));
    (engine, fs)
}

#[test]
fn full_scaffold_workflow_in_memory() {
    let (engine, fs) = engine_with_memory();

    let bundle = engine.bundle("python-project").unwrap();
    let params = ParameterResolver::non_interactive()
        .resolve(
            &bundle.schema,
            &flags(&[("project_name", "my-tool"), ("author", "Ada")]),
        )
        .unwrap();

    let plan = engine
        .plan("python-project", &params, Path::new("/out"))
        .unwrap();
    let result = engine
        .apply(&plan, ConflictPolicy::new(ConflictMode::Skip))
        .unwrap();

    assert!(result.success());
    assert_eq!(result.written(), 5);
    assert!(fs.exists(Path::new("/out/pyproject.toml")));
    assert!(fs.exists(Path::new("/out/src/my_tool/__init__.py")));

    let pyproject = fs.read_string(Path::new("/out/pyproject.toml")).unwrap();
    assert!(pyproject.contains("name = \"my-tool\""));
    assert!(pyproject.contains(">=3.12"));
    assert!(!pyproject.contains("{{"));
}

#[test]
fn pytest_setup_scenarios_on_real_filesystem() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().to_path_buf();

    let registry = InMemoryRegistry::with_builtin().unwrap();
    let engine = ScaffoldEngine::new(Box::new(registry), Box::new(LocalFilesystem::new()));

    let bundle = engine.bundle("pytest-setup").unwrap();
    let params = ParameterResolver::non_interactive()
        .resolve(&bundle.schema, &flags(&[("project_name", "demo")]))
        .unwrap();

    // First apply into an empty root: everything written.
    let plan = engine.plan("pytest-setup", &params, &root).unwrap();
    let first = engine
        .apply(&plan, ConflictPolicy::new(ConflictMode::Skip))
        .unwrap();
    assert_eq!(first.written(), 2);
    assert_eq!(first.skipped(), 0);
    assert_eq!(first.failed(), 0);

    let test_file = root.join("tests/test_import.py");
    let original = std::fs::read_to_string(&test_file).unwrap();
    assert!(original.contains("import demo"));

    // Second apply without force: everything skipped, filesystem unchanged.
    std::fs::write(&test_file, "# user edits\n").unwrap();
    let plan2 = engine.plan("pytest-setup", &params, &root).unwrap();
    let second = engine
        .apply(&plan2, ConflictPolicy::new(ConflictMode::Skip))
        .unwrap();
    assert_eq!(second.written(), 0);
    assert_eq!(second.skipped(), 2);
    assert_eq!(std::fs::read_to_string(&test_file).unwrap(), "# user edits\n");

    // Third apply with force: everything overwritten.
    let plan3 = engine.plan("pytest-setup", &params, &root).unwrap();
    let third = engine
        .apply(&plan3, ConflictPolicy::new(ConflictMode::Force))
        .unwrap();
    assert_eq!(third.overwritten(), 2);
    assert_eq!(std::fs::read_to_string(&test_file).unwrap(), original);
}

#[test]
fn missing_parameter_means_zero_writes() {
    let (engine, fs) = engine_with_memory();

    let bundle = engine.bundle("pytest-setup").unwrap();
    let err = ParameterResolver::non_interactive()
        .resolve(&bundle.schema, &flags(&[]))
        .unwrap_err();

    assert!(matches!(
        err,
        stencil_core::error::StencilError::Domain(
            stencil_core::domain::DomainError::MissingParameter { .. }
        )
    ));
    assert_eq!(fs.file_count(), 0);
}

#[test]
fn merge_mode_appends_gitignore_on_real_filesystem() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().to_path_buf();
    std::fs::write(root.join(".gitignore"), "# mine\n*.secret\n").unwrap();

    let registry = InMemoryRegistry::with_builtin().unwrap();
    let engine = ScaffoldEngine::new(Box::new(registry), Box::new(LocalFilesystem::new()));

    let bundle = engine.bundle("python-project").unwrap();
    let params = ParameterResolver::non_interactive()
        .resolve(
            &bundle.schema,
            &flags(&[("project_name", "demo"), ("author", "Ada")]),
        )
        .unwrap();

    let plan = engine.plan("python-project", &params, &root).unwrap();
    let result = engine
        .apply(&plan, ConflictPolicy::new(ConflictMode::Merge))
        .unwrap();

    assert_eq!(result.merged(), 1);
    let merged = std::fs::read_to_string(root.join(".gitignore")).unwrap();
    assert!(merged.starts_with("# mine\n*.secret\n"));
    assert!(merged.contains("__pycache__/"));
}

#[test]
fn user_bundles_load_and_scaffold() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("local-docs");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("bundle.toml"),
        "[bundle]\nname = \"local-docs\"\ndescription = \"Local docs\"\n\n\
         [[params]]\nname = \"project_name\"\nrule = \"slug\"\n",
    )
    .unwrap();
    std::fs::write(dir.join("NOTES.md"), "Notes for {{project_name}}\n").unwrap();

    let registry = InMemoryRegistry::with_builtin().unwrap();
    let loader = stencil_adapters::FilesystemBundleLoader::new(temp.path());
    for bundle in loader.load_all().unwrap() {
        registry.insert(bundle).unwrap();
    }

    let fs = MemoryFilesystem::new();
    let engine = ScaffoldEngine::new(Box::new(registry), Box::new(fs.clone()));

    let bundle = engine.bundle("local-docs").unwrap();
    let params = ParameterResolver::non_interactive()
        .resolve(&bundle.schema, &flags(&[("project_name", "demo")]))
        .unwrap();
    let plan = engine.plan("local-docs", &params, Path::new("/out")).unwrap();
    engine
        .apply(&plan, ConflictPolicy::new(ConflictMode::Skip))
        .unwrap();

    assert_eq!(
        fs.read_string(Path::new("/out/NOTES.md")).unwrap(),
        "Notes for demo\n"
    );
}
