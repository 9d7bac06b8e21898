//! End-to-end tests running the compiled `stencil` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn stencil() -> Command {
    let mut cmd = Command::cargo_bin("stencil").expect("binary builds");
    // Deterministic output regardless of the CI terminal.
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("STENCIL_BUNDLES_DIR");
    cmd.env_remove("RUST_LOG");
    cmd
}

// ── help / version ────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    stencil()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("apply"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_matches_cargo() {
    stencil()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_args_shows_help_and_fails() {
    stencil().assert().failure();
}

#[test]
fn no_color_env_is_presence_based() {
    // https://no-color.org: any non-empty value disables colour; none of
    // the conventional spellings may be rejected as a bad flag value.
    for value in ["1", "true", "yes", "anything"] {
        Command::cargo_bin("stencil")
            .unwrap()
            .env("NO_COLOR", value)
            .env_remove("STENCIL_BUNDLES_DIR")
            .arg("list")
            .assert()
            .success();
    }
}

// ── list / show ───────────────────────────────────────────────────────────────

#[test]
fn list_shows_builtin_bundles() {
    stencil()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("python-project"))
        .stdout(predicate::str::contains("pytest-setup"))
        .stdout(predicate::str::contains("docs-init"));
}

#[test]
fn list_json_is_parseable() {
    let output = stencil()
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    let names: Vec<&str> = parsed
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|b| b["name"].as_str())
        .collect();
    assert!(names.contains(&"python-project"));
}

#[test]
fn show_lists_parameters_and_files() {
    stencil()
        .args(["show", "python-project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("project_name"))
        .stdout(predicate::str::contains("pyproject.toml"))
        .stdout(predicate::str::contains("append-friendly"));
}

#[test]
fn show_unknown_bundle_exits_3() {
    stencil()
        .args(["show", "no-such-bundle"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("no-such-bundle"));
}

// ── apply ─────────────────────────────────────────────────────────────────────

fn apply_pytest_setup(root: &std::path::Path, extra: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = stencil();
    cmd.args([
        "apply",
        "pytest-setup",
        "--non-interactive",
        "--root",
        root.to_str().unwrap(),
        "-p",
        "project_name=demo",
    ]);
    cmd.args(extra);
    cmd.assert()
}

#[test]
fn apply_then_reapply_then_force() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    // First run into an empty directory: both files written.
    apply_pytest_setup(root, &[])
        .success()
        .stdout(predicate::str::contains("written: 2"));

    let test_file = root.join("tests/test_import.py");
    let workflow = root.join(".github/workflows/test.yml");
    assert!(workflow.is_file());
    let original = std::fs::read_to_string(&test_file).unwrap();
    assert!(original.contains("import demo"));

    // Second run without force: everything skipped, user edits survive.
    std::fs::write(&test_file, "# user edits\n").unwrap();
    apply_pytest_setup(root, &[])
        .success()
        .stdout(predicate::str::contains("skipped: 2"));
    assert_eq!(std::fs::read_to_string(&test_file).unwrap(), "# user edits\n");

    // Force mode overwrites and restores bundle content.
    apply_pytest_setup(root, &["--mode", "force"])
        .success()
        .stdout(predicate::str::contains("overwritten: 2"));
    assert_eq!(std::fs::read_to_string(&test_file).unwrap(), original);
}

#[test]
fn missing_parameter_fails_with_zero_writes() {
    let temp = TempDir::new().unwrap();

    stencil()
        .args([
            "apply",
            "pytest-setup",
            "--non-interactive",
            "--root",
            temp.path().to_str().unwrap(),
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("project_name"));

    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();

    apply_pytest_setup(temp.path(), &["--dry-run"])
        .success()
        .stdout(predicate::str::contains("would write"))
        .stdout(predicate::str::contains("No files were written."));

    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn apply_unknown_bundle_exits_3() {
    let temp = TempDir::new().unwrap();

    stencil()
        .args([
            "apply",
            "no-such-bundle",
            "--non-interactive",
            "--root",
            temp.path().to_str().unwrap(),
        ])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn invalid_parameter_value_exits_2() {
    let temp = TempDir::new().unwrap();

    stencil()
        .args([
            "apply",
            "pytest-setup",
            "--non-interactive",
            "--root",
            temp.path().to_str().unwrap(),
            "-p",
            "project_name=Not A Slug!",
        ])
        .assert()
        .failure()
        .code(2);

    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn undeclared_parameter_is_rejected() {
    let temp = TempDir::new().unwrap();

    stencil()
        .args([
            "apply",
            "pytest-setup",
            "--non-interactive",
            "--root",
            temp.path().to_str().unwrap(),
            "-p",
            "project_name=demo",
            "-p",
            "porject_nmae=typo",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("porject_nmae"));
}

#[test]
fn merge_mode_appends_to_gitignore() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    std::fs::write(root.join(".gitignore"), "# mine\n*.secret\n").unwrap();

    stencil()
        .args([
            "apply",
            "python-project",
            "--non-interactive",
            "--root",
            root.to_str().unwrap(),
            "--mode",
            "merge",
            "-p",
            "project_name=demo",
            "-p",
            "author=Ada",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("merged: 1"));

    let merged = std::fs::read_to_string(root.join(".gitignore")).unwrap();
    assert!(merged.starts_with("# mine\n*.secret\n"));
    assert!(merged.contains("__pycache__/"));
}

// ── bundle discovery ──────────────────────────────────────────────────────────

#[test]
fn user_bundle_dir_is_discovered_via_env() {
    let bundles = TempDir::new().unwrap();
    let dir = bundles.path().join("notes");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("bundle.toml"),
        "[bundle]\nname = \"notes\"\ndescription = \"Notes bundle\"\n\n\
         [[params]]\nname = \"project_name\"\nrule = \"slug\"\n",
    )
    .unwrap();
    std::fs::write(dir.join("NOTES.md"), "Notes for {{project_name}}\n").unwrap();

    let target = TempDir::new().unwrap();
    let mut cmd = stencil();
    cmd.env("STENCIL_BUNDLES_DIR", bundles.path());
    cmd.args([
        "apply",
        "notes",
        "--non-interactive",
        "--root",
        target.path().to_str().unwrap(),
        "-p",
        "project_name=demo",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("written: 1"));

    assert_eq!(
        std::fs::read_to_string(target.path().join("NOTES.md")).unwrap(),
        "Notes for demo\n"
    );
}

// ── completions ───────────────────────────────────────────────────────────────

#[test]
fn completions_bash_mentions_binary() {
    stencil()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stencil"));
}
