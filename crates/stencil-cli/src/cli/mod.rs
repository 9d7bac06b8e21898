//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use stencil_core::domain::ConflictMode;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "stencil",
    bin_name = "stencil",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Template-driven project scaffolding",
    long_about = "Stencil stamps parameterised file bundles into a target \
                  directory, with conflict handling that keeps re-runs safe.",
    after_help = "EXAMPLES:\n\
        \x20 stencil apply python-project -p project_name=my-tool -p author=Ada\n\
        \x20 stencil apply pytest-setup --root ./my-tool --mode force\n\
        \x20 stencil list\n\
        \x20 stencil show docs-init\n\
        \x20 stencil completions bash > /usr/share/bash-completion/completions/stencil",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply a bundle to a target directory.
    #[command(
        visible_alias = "a",
        about = "Apply a bundle to a directory",
        after_help = "EXAMPLES:\n\
            \x20 stencil apply python-project -p project_name=my-tool -p author=Ada\n\
            \x20 stencil apply pytest-setup --root ../my-tool --dry-run\n\
            \x20 stencil apply python-project --mode merge --non-interactive \\\n\
            \x20     -p project_name=my-tool -p author=Ada"
    )]
    Apply(ApplyArgs),

    /// List available bundles.
    #[command(
        visible_alias = "ls",
        about = "List available bundles",
        after_help = "EXAMPLES:\n\
            \x20 stencil list\n\
            \x20 stencil list --format json"
    )]
    List(ListArgs),

    /// Show a bundle's files and parameters.
    #[command(
        about = "Show bundle details",
        after_help = "EXAMPLES:\n\
            \x20 stencil show python-project\n\
            \x20 stencil show pytest-setup"
    )]
    Show(ShowArgs),

    /// Initialise a Stencil configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 stencil init          # default location\n\
            \x20 stencil init --force  # overwrite existing config"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stencil completions bash > ~/.local/share/bash-completion/completions/stencil\n\
            \x20 stencil completions zsh  > ~/.zfunc/_stencil\n\
            \x20 stencil completions fish > ~/.config/fish/completions/stencil.fish"
    )]
    Completions(CompletionsArgs),
}

// ── apply ─────────────────────────────────────────────────────────────────────

/// Arguments for `stencil apply`.
#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Bundle to apply.
    #[arg(value_name = "BUNDLE", help = "Bundle name (see `stencil list`)")]
    pub bundle: String,

    /// Target directory the bundle is stamped into.
    #[arg(
        short = 'r',
        long = "root",
        value_name = "DIR",
        default_value = ".",
        help = "Target directory (default: current directory)"
    )]
    pub root: PathBuf,

    /// Parameter values, repeatable.
    #[arg(
        short = 'p',
        long = "param",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        help = "Set a bundle parameter (repeatable)"
    )]
    pub params: Vec<(String, String)>,

    /// Never prompt; missing parameters are an error.
    #[arg(
        long = "non-interactive",
        help = "Fail on missing parameters instead of prompting"
    )]
    pub non_interactive: bool,

    /// Conflict handling for files that already exist.
    #[arg(
        short = 'm',
        long = "mode",
        value_enum,
        default_value = "skip",
        help = "Conflict mode for existing files"
    )]
    pub mode: ModeArg,

    /// Preview the plan without writing any files.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,
}

/// `KEY=VALUE` parser for `-p` / `--param`.
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("'{s}' is not KEY=VALUE"))?;
    if key.is_empty() {
        return Err(format!("'{s}' has an empty key"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Conflict mode as seen on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ModeArg {
    /// Leave existing files untouched.
    #[default]
    Skip,
    /// Overwrite existing files.
    Force,
    /// Append to append-friendly files, skip the rest.
    Merge,
}

impl From<ModeArg> for ConflictMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Skip => ConflictMode::Skip,
            ModeArg::Force => ConflictMode::Force,
            ModeArg::Merge => ConflictMode::Merge,
        }
    }
}

impl std::fmt::Display for ModeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Force => write!(f, "force"),
            Self::Merge => write!(f, "merge"),
        }
    }
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── show ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil show`.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Bundle to inspect.
    #[arg(value_name = "BUNDLE", help = "Bundle name (see `stencil list`)")]
    pub bundle: String,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stencil completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
