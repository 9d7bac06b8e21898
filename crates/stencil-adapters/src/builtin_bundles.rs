//! Built-in bundles compiled into the binary.
//!
//! This module provides [`all_bundles`], the single entry-point for the
//! bundles that ship with Stencil. Three bundles cover the common Python
//! project lifecycle:
//!
//! - **`python-project`** — pyproject skeleton, package init, README,
//!   `.gitignore`, `.pre-commit-config.yaml`.
//! - **`pytest-setup`** — a smoke-test suite plus a GitHub Actions workflow
//!   running it on every push and pull request.
//! - **`docs-init`** — Sphinx documentation boilerplate plus a Read the Docs
//!   config.
//!
//! The ignore and pre-commit files are append-friendly: under `--mode merge`
//! their content is appended to an existing file instead of being skipped.
//!
//! User-defined bundles discovered on disk (see [`crate::bundle_loader`])
//! are registered on top of these and may shadow them by name.

use stencil_core::domain::{
    BundleId, BundleMetadata, DomainError, ParameterSchema, ParameterSpec, TemplateBundle,
    TemplateFile, ValidationRule,
};

// ── Public API ────────────────────────────────────────────────────────────────

/// Construct every built-in bundle.
pub fn all_bundles() -> Result<Vec<TemplateBundle>, DomainError> {
    Ok(vec![python_project()?, pytest_setup()?, docs_init()?])
}

/// `python-project`: minimal package skeleton following src-layout.
pub fn python_project() -> Result<TemplateBundle, DomainError> {
    TemplateBundle::builder()
        .id(BundleId::new("python-project", "1.0.0"))
        .metadata(
            BundleMetadata::new("Python package skeleton (src layout, uv-friendly)")
                .with_tag("python"),
        )
        .schema(
            ParameterSchema::new()
                .with(ParameterSpec::new(
                    "project_name",
                    "Project name",
                    ValidationRule::Slug,
                ))
                .with(ParameterSpec::new(
                    "author",
                    "Author name",
                    ValidationRule::NonEmpty,
                ))
                .with(
                    ParameterSpec::new("license", "License", ValidationRule::OneOf(vec![
                        "MIT".into(),
                        "Apache-2.0".into(),
                        "Proprietary".into(),
                    ]))
                    .with_default("MIT"),
                )
                .with(
                    ParameterSpec::new(
                        "python_version",
                        "Minimum Python version",
                        ValidationRule::Version,
                    )
                    .with_default("3.12"),
                ),
        )
        .add_file(TemplateFile::text("pyproject.toml", PYPROJECT_TOML))
        .add_file(TemplateFile::text(
            "src/{{project_name_snake}}/__init__.py",
            PACKAGE_INIT,
        ))
        .add_file(TemplateFile::text("README.md", README_MD))
        .add_file(TemplateFile::text(".gitignore", GITIGNORE).mergeable())
        .add_file(TemplateFile::text(".pre-commit-config.yaml", PRE_COMMIT).mergeable())
        .build()
}

/// `pytest-setup`: smoke tests plus CI workflow.
pub fn pytest_setup() -> Result<TemplateBundle, DomainError> {
    TemplateBundle::builder()
        .id(BundleId::new("pytest-setup", "1.0.0"))
        .metadata(
            BundleMetadata::new("Pytest suite and GitHub Actions test workflow")
                .with_tag("python")
                .with_tag("ci"),
        )
        .schema(
            ParameterSchema::new()
                .with(ParameterSpec::new(
                    "project_name",
                    "Project name",
                    ValidationRule::Slug,
                ))
                .with(
                    ParameterSpec::new(
                        "python_version",
                        "Python version for CI",
                        ValidationRule::Version,
                    )
                    .with_default("3.12"),
                ),
        )
        .add_file(TemplateFile::text("tests/test_import.py", TEST_IMPORT))
        .add_file(TemplateFile::text(".github/workflows/test.yml", TEST_WORKFLOW))
        .build()
}

/// `docs-init`: Sphinx boilerplate plus Read the Docs config.
pub fn docs_init() -> Result<TemplateBundle, DomainError> {
    TemplateBundle::builder()
        .id(BundleId::new("docs-init", "1.0.0"))
        .metadata(
            BundleMetadata::new("Sphinx documentation boilerplate with Read the Docs config")
                .with_tag("python")
                .with_tag("docs"),
        )
        .schema(
            ParameterSchema::new()
                .with(ParameterSpec::new(
                    "project_name",
                    "Project name",
                    ValidationRule::Slug,
                ))
                .with(ParameterSpec::new(
                    "author",
                    "Author name",
                    ValidationRule::NonEmpty,
                ))
                .with(
                    ParameterSpec::new(
                        "python_version",
                        "Python version for the docs build",
                        ValidationRule::Version,
                    )
                    .with_default("3.12"),
                ),
        )
        .add_file(TemplateFile::text("docs/source/conf.py", SPHINX_CONF))
        .add_file(TemplateFile::text("docs/source/index.rst", SPHINX_INDEX))
        .add_file(TemplateFile::text("docs/Makefile", SPHINX_MAKEFILE))
        .add_file(TemplateFile::text(".readthedocs.yaml", READTHEDOCS))
        .build()
}

// ── python-project content ────────────────────────────────────────────────────

const PYPROJECT_TOML: &str = r#"[project]
name = "{{project_name_kebab}}"
version = "0.1.0"
description = "{{project_name}}"
authors = [{ name = "{{author}}" }]
license = { text = "{{license}}" }
readme = "README.md"
requires-python = ">={{python_version}}"
dependencies = []

[build-system]
requires = ["hatchling"]
build-backend = "hatchling.build"

[tool.ruff]
line-length = 88
"#;

const PACKAGE_INIT: &str = r#""""{{project_name}} package."""

__version__ = "0.1.0"
"#;

const README_MD: &str = r#"# {{project_name}}

By {{author}}.

## Installation

```bash
uv sync
```
"#;

const GITIGNORE: &str = r#"# Custom
.vscode/
.DS_Store

# Python
__pycache__/
*.py[cod]
build/
dist/
*.egg-info/
.venv/
.pytest_cache/
.ruff_cache/
.coverage
docs/build/
"#;

const PRE_COMMIT: &str = r#"repos:
  - repo: https://github.com/astral-sh/ruff-pre-commit
    rev: v0.6.9
    hooks:
      - id: ruff
        args: [--fix]
      - id: ruff-format
  - repo: https://github.com/pre-commit/pre-commit-hooks
    rev: v5.0.0
    hooks:
      - id: trailing-whitespace
      - id: end-of-file-fixer
      - id: check-yaml
"#;

// ── pytest-setup content ──────────────────────────────────────────────────────

const TEST_IMPORT: &str = r#"import pytest


@pytest.fixture(autouse=True)
def mock_variable():
    """Mock some variable."""
    yield 42


def test_variable(mock_variable):
    """Test the variable."""
    assert mock_variable == 42


def test_import():
    """Test the project's import."""
    import {{project_name_snake}}  # noqa: F401
"#;

// The `${{ matrix.python-version }}` expressions below are GitHub Actions
// syntax and pass through substitution untouched; only `{{python_version}}`
// is a Stencil placeholder.
const TEST_WORKFLOW: &str = r#"name: Tests

on:
  pull_request:
  push:
    branches: [main]

jobs:
  test-install:
    runs-on: ubuntu-latest
    strategy:
      matrix:
        python-version: ["{{python_version}}"]
    steps:
      - uses: actions/checkout@v4
      - name: Set up Python ${{ matrix.python-version }}
        uses: actions/setup-python@v5
        with:
          python-version: ${{ matrix.python-version }}
      - name: Install uv
        run: curl -LsSf https://astral.sh/uv/install.sh | sh
      - name: Install dependencies
        run: uv sync
  test-pytest:
    runs-on: ubuntu-latest
    strategy:
      matrix:
        python-version: ["{{python_version}}"]
    steps:
      - uses: actions/checkout@v4
      - name: Set up Python ${{ matrix.python-version }}
        uses: actions/setup-python@v5
        with:
          python-version: ${{ matrix.python-version }}
      - name: Install uv
        run: curl -LsSf https://astral.sh/uv/install.sh | sh
      - name: Install dependencies
        run: uv sync
      - name: Run tests
        run: uv run pytest
"#;

// ── docs-init content ─────────────────────────────────────────────────────────

const SPHINX_CONF: &str = r#""""Sphinx configuration for {{project_name}}."""

project = "{{project_name}}"
author = "{{author}}"
copyright = "2026, {{author}}"

extensions = [
    "sphinx.ext.autodoc",
    "sphinx.ext.napoleon",
    "sphinx.ext.viewcode",
    "myst_parser",
]

html_theme = "furo"
html_title = "{{project_name}}"

templates_path = ["_templates"]
exclude_patterns = []
"#;

const SPHINX_INDEX: &str = r#"{{project_name}}
================================================================

Welcome to the {{project_name}} documentation.

.. toctree::
   :maxdepth: 2
   :caption: Contents

"#;

const SPHINX_MAKEFILE: &str = r#"# Minimal makefile for Sphinx documentation

SPHINXOPTS    ?=
SPHINXBUILD   ?= sphinx-build
SOURCEDIR     = source
BUILDDIR      = build

help:
	@$(SPHINXBUILD) -M help "$(SOURCEDIR)" "$(BUILDDIR)" $(SPHINXOPTS) $(O)

.PHONY: help Makefile

%: Makefile
	@$(SPHINXBUILD) -M $@ "$(SOURCEDIR)" "$(BUILDDIR)" $(SPHINXOPTS) $(O)
"#;

const READTHEDOCS: &str = r#"version: 2

build:
  os: ubuntu-24.04
  tools:
    python: "{{python_version}}"

sphinx:
  configuration: docs/source/conf.py

python:
  install:
    - method: pip
      path: .
"#;

// ── Tests ─────────────────────────────────────────────────────────────────────
