//! Terminal prompt adapter for interactive parameter resolution.
//!
//! Compiled only with the `interactive` feature; without it, `apply` runs as
//! if `--non-interactive` were always set.

use dialoguer::{Input, theme::ColorfulTheme, theme::SimpleTheme};
use stencil_core::application::ApplicationError;
use stencil_core::application::ports::ParameterPrompt;
use stencil_core::domain::ParameterSpec;
use stencil_core::error::StencilResult;

/// Prompts on the controlling terminal via `dialoguer`.
pub struct TerminalPrompt {
    use_color: bool,
}

impl TerminalPrompt {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn ask(&self, spec: &ParameterSpec) -> dialoguer::Result<String> {
        let prompt = format!("{} ({})", spec.name, spec.description);
        match (self.use_color, &spec.default) {
            (true, Some(default)) => Input::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .default(default.clone())
                .interact_text(),
            (true, None) => Input::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .interact_text(),
            (false, Some(default)) => Input::with_theme(&SimpleTheme)
                .with_prompt(prompt)
                .default(default.clone())
                .interact_text(),
            (false, None) => Input::with_theme(&SimpleTheme)
                .with_prompt(prompt)
                .interact_text(),
        }
    }
}

impl ParameterPrompt for TerminalPrompt {
    fn prompt(
        &self,
        spec: &ParameterSpec,
        retry_reason: Option<&str>,
    ) -> StencilResult<Option<String>> {
        if let Some(reason) = retry_reason {
            eprintln!("invalid value: {reason}");
        }

        match self.ask(spec) {
            Ok(value) => Ok(Some(value)),
            Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => {
                Ok(None)
            }
            Err(_) => Err(ApplicationError::PromptUnavailable.into()),
        }
    }
}
