//! Implementation of the `stencil list` command.

use stencil_adapters::MemoryFilesystem;
use stencil_core::application::ScaffoldEngine;

use crate::{
    cli::{GlobalArgs, ListArgs, ListFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(
    args: ListArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let registry = super::build_registry(&config)?;
    // Listing never touches the real filesystem.
    let engine = ScaffoldEngine::new(Box::new(registry), Box::new(MemoryFilesystem::new()));
    let bundles = engine.list_bundles()?;

    match args.format {
        ListFormat::Table => {
            output.header("Available bundles:")?;
            for info in &bundles {
                let tags = if info.tags.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", info.tags.join(", "))
                };
                output.print(&format!(
                    "  {:<18} {} ({} files, {} params){}",
                    info.name, info.description, info.files, info.parameters, tags,
                ))?;
            }
        }

        ListFormat::List => {
            for info in &bundles {
                println!("{}", info.name);
            }
        }

        ListFormat::Json => {
            // Serialise as a JSON array to stdout (bypasses OutputManager
            // because JSON output must be parseable even in non-TTY pipes).
            let json = serde_json::to_string_pretty(&bundles).map_err(|e| {
                CliError::InvalidInput {
                    message: format!("failed to serialise bundle list: {e}"),
                    source: Some(Box::new(e)),
                }
            })?;
            println!("{json}");
        }
    }

    Ok(())
}
