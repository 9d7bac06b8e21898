//! Implementation of the `stencil show` command.

use stencil_core::domain::{MergeStrategy, ValidationRule};

use crate::{
    cli::{GlobalArgs, ShowArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    args: ShowArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    use stencil_adapters::MemoryFilesystem;
    use stencil_core::application::ScaffoldEngine;

    let registry = super::build_registry(&config)?;
    let engine = ScaffoldEngine::new(Box::new(registry), Box::new(MemoryFilesystem::new()));
    let bundle = engine.bundle(&args.bundle)?;

    output.header(&bundle.id.to_string())?;
    output.print(&format!("  {}", bundle.metadata.description))?;
    if !bundle.metadata.tags.is_empty() {
        output.print(&format!("  tags: {}", bundle.metadata.tags.join(", ")))?;
    }

    output.print("")?;
    output.header("Parameters:")?;
    if bundle.schema.is_empty() {
        output.print("  (none)")?;
    }
    for spec in bundle.schema.specs() {
        let default = spec
            .default
            .as_deref()
            .map(|d| format!(" (default: {d})"))
            .unwrap_or_default();
        output.print(&format!(
            "  {:<18} [{}] {}{}",
            spec.name,
            rule_text(&spec.rule),
            spec.description,
            default,
        ))?;
    }

    output.print("")?;
    output.header("Files:")?;
    for file in &bundle.files {
        let merge = if file.merge == MergeStrategy::Append {
            "  (append-friendly)"
        } else {
            ""
        };
        output.print(&format!("  {}{}", file.path, merge))?;
    }

    Ok(())
}

fn rule_text(rule: &ValidationRule) -> String {
    match rule {
        ValidationRule::NonEmpty => "non-empty".into(),
        ValidationRule::Slug => "slug".into(),
        ValidationRule::Version => "version".into(),
        ValidationRule::OneOf(choices) => format!("one of: {}", choices.join("|")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_text_lists_choices() {
        let rule = ValidationRule::OneOf(vec!["MIT".into(), "Apache-2.0".into()]);
        assert_eq!(rule_text(&rule), "one of: MIT|Apache-2.0");
    }

    #[test]
    fn rule_text_plain_rules() {
        assert_eq!(rule_text(&ValidationRule::NonEmpty), "non-empty");
        assert_eq!(rule_text(&ValidationRule::Slug), "slug");
        assert_eq!(rule_text(&ValidationRule::Version), "version");
    }
}
