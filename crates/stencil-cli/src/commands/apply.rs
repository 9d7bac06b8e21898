//! Implementation of the `stencil apply` command.
//!
//! Responsibility: translate CLI arguments into resolved parameters and a
//! conflict policy, call the core engine, and display results.  No business
//! logic lives here.

use std::collections::BTreeMap;

use tracing::{debug, info, instrument};

use stencil_adapters::LocalFilesystem;
use stencil_core::{
    application::{ParameterResolver, ScaffoldEngine},
    domain::{ConflictMode, ConflictPolicy, ExistingStatus, ScaffoldPlan},
};

use crate::{
    cli::{ApplyArgs, GlobalArgs, ModeArg},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `stencil apply` command.
///
/// Dispatch sequence:
/// 1. Build the registry (built-ins + discovered bundles) and the engine
/// 2. Resolve parameters (flags, prompts, defaults)
/// 3. Compute the plan
/// 4. Early-exit if `--dry-run`
/// 5. Apply the plan under the selected conflict policy
/// 6. Report per-file outcomes; fail the invocation if any file failed
#[instrument(skip_all, fields(bundle = %args.bundle))]
pub fn execute(
    args: ApplyArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let registry = super::build_registry(&config)?;
    let engine = ScaffoldEngine::new(Box::new(registry), Box::new(LocalFilesystem::new()));

    let bundle = engine.bundle(&args.bundle)?;

    // 2. Resolve parameters
    let provided: BTreeMap<String, String> = args.params.iter().cloned().collect();
    let params = resolve_params(&engine, &args, &global, &provided)?;

    let mode = select_mode(&args, &config);
    debug!(mode = %mode, root = %args.root.display(), "Conflict mode resolved");

    // 3. Plan
    let plan = engine.plan(&args.bundle, &params, &args.root)?;

    // 4. Dry run: describe but do not write.
    if args.dry_run {
        return preview(&plan, mode, &output).map_err(CliError::from);
    }

    // 5. Apply
    output.header(&format!(
        "Applying '{}' to {}...",
        bundle.id,
        args.root.display()
    ))?;
    info!(bundle = %args.bundle, root = %args.root.display(), "Apply started");

    let result = engine.apply(&plan, ConflictPolicy::new(mode.into()))?;

    // 6. Report
    for (path, outcome) in result.outcomes() {
        output.outcome(&path.display().to_string(), outcome)?;
    }
    output.print("")?;

    let summary = format!(
        "written: {}, skipped: {}, overwritten: {}, merged: {}, failed: {}",
        result.written(),
        result.skipped(),
        result.overwritten(),
        result.merged(),
        result.failed(),
    );

    if result.success() {
        info!(bundle = %args.bundle, "Apply completed");
        output.success(&summary)?;
        Ok(())
    } else {
        output.error(&summary)?;
        Err(CliError::ApplyFailed {
            failed: result.failed(),
        })
    }
}

// ── Parameter resolution ──────────────────────────────────────────────────────

#[cfg(feature = "interactive")]
fn resolve_params(
    engine: &ScaffoldEngine,
    args: &ApplyArgs,
    global: &GlobalArgs,
    provided: &BTreeMap<String, String>,
) -> CliResult<stencil_core::domain::ResolvedParameters> {
    use std::io::IsTerminal;

    let bundle = engine.bundle(&args.bundle)?;

    let interactive =
        !args.non_interactive && !global.quiet && std::io::stdin().is_terminal();

    let result = if interactive {
        let prompt = crate::prompt::TerminalPrompt::new(!global.no_color);
        ParameterResolver::interactive(&prompt).resolve(&bundle.schema, provided)
    } else {
        ParameterResolver::non_interactive().resolve(&bundle.schema, provided)
    };

    result.map_err(|e| {
        if e.is_cancelled() {
            CliError::Cancelled
        } else {
            CliError::Core(e)
        }
    })
}

#[cfg(not(feature = "interactive"))]
fn resolve_params(
    engine: &ScaffoldEngine,
    args: &ApplyArgs,
    _global: &GlobalArgs,
    provided: &BTreeMap<String, String>,
) -> CliResult<stencil_core::domain::ResolvedParameters> {
    let bundle = engine.bundle(&args.bundle)?;
    ParameterResolver::non_interactive()
        .resolve(&bundle.schema, provided)
        .map_err(CliError::Core)
}

// ── Mode selection ────────────────────────────────────────────────────────────

/// `--mode` wins; otherwise `defaults.mode` from config; otherwise Skip.
/// An unrecognised config value falls back to Skip rather than aborting.
fn select_mode(args: &ApplyArgs, config: &AppConfig) -> ModeArg {
    if args.mode != ModeArg::Skip {
        return args.mode;
    }
    match config.defaults.mode.as_deref() {
        Some("force") => ModeArg::Force,
        Some("merge") => ModeArg::Merge,
        _ => ModeArg::Skip,
    }
}

// ── Dry run ───────────────────────────────────────────────────────────────────

fn preview(plan: &ScaffoldPlan, mode: ModeArg, output: &OutputManager) -> std::io::Result<()> {
    output.header(&format!(
        "Dry run: {} file(s) planned under {} (mode: {mode})",
        plan.len(),
        plan.root.display(),
    ))?;

    let policy = ConflictPolicy::new(ConflictMode::from(mode));
    for entry in &plan.entries {
        let verdict = match entry.existing {
            ExistingStatus::Absent => "would write",
            ExistingStatus::Present => match policy.decide(entry) {
                stencil_core::domain::Decision::Skip => "would skip",
                stencil_core::domain::Decision::Overwrite => "would overwrite",
                stencil_core::domain::Decision::Merge => "would merge",
            },
        };
        output.print(&format!("  {verdict:<16} {}", entry.relative.display()))?;
    }

    output.info("No files were written.")?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
